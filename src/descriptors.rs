//! Product descriptors for introspection and diagnostics.

use crate::key::{CreationRequest, ProductKind, Variant};

/// Describes one registered constructor.
///
/// # Examples
///
/// ```rust
/// use ferrous_factory::{Product, ProductCollection, Variant};
/// use std::sync::Arc;
///
/// const MAC: Variant = Variant::new("Mac");
///
/// trait Button: Product {}
/// struct MacButton;
/// impl Product for MacButton {
///     fn variant(&self) -> Variant { MAC }
/// }
/// impl Button for MacButton {}
///
/// let mut products = ProductCollection::new();
/// products.add_product::<dyn Button, _>(MAC, || Arc::new(MacButton));
///
/// let descriptors = products.descriptors();
/// assert_eq!(descriptors.len(), 1);
/// assert_eq!(descriptors[0].kind_name(), "Button");
/// assert_eq!(descriptors[0].variant(), MAC);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDescriptor {
    /// The (kind, variant) pair this constructor answers
    pub request: CreationRequest,
    /// Concrete type or creator that builds the instance
    pub source: &'static str,
}

impl ProductDescriptor {
    pub fn kind(&self) -> ProductKind {
        self.request.kind
    }

    /// Short name of the kind, e.g. `Button`.
    pub fn kind_name(&self) -> &'static str {
        self.request.kind.short_name()
    }

    pub fn variant(&self) -> Variant {
        self.request.variant
    }
}
