//! Variant families for modular registration.
//!
//! A family bundles the constructors of one variant so it can be added to a
//! collection in one call.

use std::sync::Arc;

use crate::{Creator, CreationRequest, ProductCollection, Variant};
use crate::traits::Product;

/// One variant's implementations of every product kind.
///
/// # Example
///
/// ```rust
/// use ferrous_factory::{FamilyRegistrar, Product, ProductCollection, Variant, VariantFamily};
/// use std::sync::Arc;
///
/// const MAC: Variant = Variant::new("Mac");
///
/// trait Button: Product {}
/// trait Checkbox: Product {}
///
/// struct MacButton;
/// impl Product for MacButton {
///     fn variant(&self) -> Variant { MAC }
/// }
/// impl Button for MacButton {}
///
/// struct MacCheckbox;
/// impl Product for MacCheckbox {
///     fn variant(&self) -> Variant { MAC }
/// }
/// impl Checkbox for MacCheckbox {}
///
/// struct MacFamily;
///
/// impl VariantFamily for MacFamily {
///     fn variant(&self) -> Variant { MAC }
///
///     fn register(self, products: &mut FamilyRegistrar<'_>) {
///         products
///             .add::<dyn Button, _>(|| Arc::new(MacButton))
///             .add::<dyn Checkbox, _>(|| Arc::new(MacCheckbox));
///     }
/// }
///
/// let mut products = ProductCollection::new();
/// products.add_family(MacFamily);
/// let registry = products.build().unwrap();
/// assert_eq!(registry.resolve_family(MAC).unwrap().kinds().len(), 2);
/// ```
pub trait VariantFamily {
    /// The variant every registered constructor belongs to.
    fn variant(&self) -> Variant;

    /// Registers this family's constructors.
    fn register(self, products: &mut FamilyRegistrar<'_>);
}

/// Registration handle bound to a single variant.
pub struct FamilyRegistrar<'a> {
    products: &'a mut ProductCollection,
    variant: Variant,
}

impl<'a> FamilyRegistrar<'a> {
    pub(crate) fn new(products: &'a mut ProductCollection, variant: Variant) -> Self {
        Self { products, variant }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Registers the constructor for capability `T` under this family's variant.
    pub fn add<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: ?Sized + Product,
        F: Fn() -> Arc<T> + Send + Sync + 'static,
    {
        self.products.add_product::<T, F>(self.variant, factory);
        self
    }

    /// Registers a creator under this family's variant.
    pub fn add_creator<C: Creator>(&mut self, creator: C) -> &mut Self {
        self.products.add_creator(self.variant, creator);
        self
    }

    /// Whether this family already registered capability `T`.
    pub fn contains<T: ?Sized + Product>(&self) -> bool {
        self.products.contains(&CreationRequest::of::<T>(self.variant))
    }
}

/// Extension trait for chaining families by value.
///
/// ```rust
/// use ferrous_factory::{FamilyRegistrar, ProductCollection, ProductCollectionExt, Variant, VariantFamily};
///
/// struct Empty(Variant);
/// impl VariantFamily for Empty {
///     fn variant(&self) -> Variant { self.0 }
///     fn register(self, _: &mut FamilyRegistrar<'_>) {}
/// }
///
/// let products = ProductCollection::new()
///     .with_family(Empty(Variant::new("A")))
///     .with_family(Empty(Variant::new("B")));
/// assert_eq!(products.variants().len(), 2);
/// ```
pub trait ProductCollectionExt {
    /// Adds a family and returns the collection.
    fn with_family<F: VariantFamily>(self, family: F) -> Self
    where
        Self: Sized;
}

impl ProductCollectionExt for ProductCollection {
    fn with_family<F: VariantFamily>(mut self, family: F) -> Self {
        self.add_family(family);
        self
    }
}

