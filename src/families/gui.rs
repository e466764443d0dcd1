//! Cross-platform widget families.
//!
//! `Mac` and `Windows` each provide a [`Button`] and a [`Checkbox`]. Client
//! code picks a variant once and then renders widgets through
//! [`GuiFactory`] without naming a concrete widget type.
//!
//! ```
//! use ferrous_factory::families::gui::{self, GuiFactory, MAC, WINDOWS};
//!
//! let registry = gui::registry().unwrap();
//!
//! let mac = registry.resolve_family(MAC).unwrap();
//! assert_eq!(mac.create_button().unwrap().render(), "[Mac Button]");
//! assert_eq!(mac.create_checkbox().unwrap().render(), "[Mac Checkbox]");
//!
//! let windows = registry.resolve_family(WINDOWS).unwrap();
//! assert_eq!(windows.create_button().unwrap().render(), "[Windows Button]");
//! ```

use std::sync::Arc;

use crate::{
    CreationRegistry, Creator, Family, FactoryResult, FamilyRegistrar, Product, ProductCollection,
    Variant, VariantFamily,
};

pub const MAC: Variant = Variant::new("Mac");
pub const WINDOWS: Variant = Variant::new("Windows");

pub trait Button: Product {
    fn render(&self) -> String;
}

pub trait Checkbox: Product {
    fn render(&self) -> String;
}

pub struct MacButton;

impl Product for MacButton {
    fn variant(&self) -> Variant {
        MAC
    }
}

impl Button for MacButton {
    fn render(&self) -> String {
        "[Mac Button]".to_string()
    }
}

pub struct MacCheckbox;

impl Product for MacCheckbox {
    fn variant(&self) -> Variant {
        MAC
    }
}

impl Checkbox for MacCheckbox {
    fn render(&self) -> String {
        "[Mac Checkbox]".to_string()
    }
}

pub struct WindowsButton;

impl Product for WindowsButton {
    fn variant(&self) -> Variant {
        WINDOWS
    }
}

impl Button for WindowsButton {
    fn render(&self) -> String {
        "[Windows Button]".to_string()
    }
}

pub struct WindowsCheckbox;

impl Product for WindowsCheckbox {
    fn variant(&self) -> Variant {
        WINDOWS
    }
}

impl Checkbox for WindowsCheckbox {
    fn render(&self) -> String {
        "[Windows Checkbox]".to_string()
    }
}

pub struct MacFamily;

impl VariantFamily for MacFamily {
    fn variant(&self) -> Variant {
        MAC
    }

    fn register(self, products: &mut FamilyRegistrar<'_>) {
        products
            .add::<dyn Button, _>(|| Arc::new(MacButton))
            .add::<dyn Checkbox, _>(|| Arc::new(MacCheckbox));
    }
}

pub struct WindowsFamily;

impl VariantFamily for WindowsFamily {
    fn variant(&self) -> Variant {
        WINDOWS
    }

    fn register(self, products: &mut FamilyRegistrar<'_>) {
        products
            .add::<dyn Button, _>(|| Arc::new(WindowsButton))
            .add::<dyn Checkbox, _>(|| Arc::new(WindowsCheckbox));
    }
}

/// Typed view of a widget family.
pub trait GuiFactory {
    fn create_button(&self) -> FactoryResult<Arc<dyn Button>>;
    fn create_checkbox(&self) -> FactoryResult<Arc<dyn Checkbox>>;
}

impl GuiFactory for Family {
    fn create_button(&self) -> FactoryResult<Arc<dyn Button>> {
        self.create::<dyn Button>()
    }

    fn create_checkbox(&self) -> FactoryResult<Arc<dyn Checkbox>> {
        self.create::<dyn Checkbox>()
    }
}

/// Dialog whose button type is chosen by the concrete creator.
///
/// ```
/// use ferrous_factory::families::gui::{Dialog, MacDialog, WindowsDialog};
///
/// assert_eq!(MacDialog.render(), "This dialog's button is [Mac Button]");
/// assert_eq!(WindowsDialog.render(), "This dialog's button is [Windows Button]");
/// ```
pub trait Dialog: Creator<Product = dyn Button> {
    fn render(&self) -> String {
        format!("This dialog's button is {}", self.make_product().render())
    }
}

impl<C: ?Sized + Creator<Product = dyn Button>> Dialog for C {}

pub struct MacDialog;

impl Creator for MacDialog {
    type Product = dyn Button;

    fn make_product(&self) -> Arc<dyn Button> {
        Arc::new(MacButton)
    }
}

pub struct WindowsDialog;

impl Creator for WindowsDialog {
    type Product = dyn Button;

    fn make_product(&self) -> Arc<dyn Button> {
        Arc::new(WindowsButton)
    }
}

/// Collection holding both widget families.
pub fn collection() -> ProductCollection {
    let mut products = ProductCollection::new();
    products.add_family(MacFamily).add_family(WindowsFamily);
    products
}

/// Registry holding both widget families.
pub fn registry() -> FactoryResult<CreationRegistry> {
    collection().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_families_are_total() {
        let products = collection();
        assert!(products.validate().is_complete());
        assert_eq!(products.variants(), &[MAC, WINDOWS]);
        assert_eq!(products.kinds().len(), 2);
    }

    #[test]
    fn dialog_creators_tag_their_buttons() {
        assert_eq!(MacDialog.make_product().variant(), MAC);
        assert_eq!(WindowsDialog.make_product().variant(), WINDOWS);
    }
}
