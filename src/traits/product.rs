//! The supertrait shared by every product capability.

use crate::error::{FactoryError, FactoryResult};
use crate::key::Variant;

/// Base capability of every created object.
///
/// Each capability trait (`Button`, `PaymentMethod`, ...) extends `Product`, so
/// every instance can report the variant that produced it. The tag is what
/// collaboration operations check before combining two products.
///
/// # Examples
///
/// ```
/// use ferrous_factory::{Product, Variant};
///
/// const MAC: Variant = Variant::new("Mac");
///
/// trait Button: Product {
///     fn render(&self) -> String;
/// }
///
/// struct MacButton;
///
/// impl Product for MacButton {
///     fn variant(&self) -> Variant { MAC }
/// }
///
/// impl Button for MacButton {
///     fn render(&self) -> String { "[Mac Button]".to_string() }
/// }
///
/// let button: Box<dyn Button> = Box::new(MacButton);
/// assert_eq!(button.variant(), MAC);
/// ```
pub trait Product: Send + Sync + 'static {
    /// The variant this instance belongs to.
    fn variant(&self) -> Variant;
}

/// Checks that `peer` was produced under the same variant as `own`.
///
/// Collaboration operations call this before using their peer. Mixing
/// variants is rejected with [`FactoryError::VariantMismatch`] rather than
/// producing a meaningless result.
///
/// # Examples
///
/// ```
/// use ferrous_factory::{ensure_compatible, FactoryError, Product, Variant};
///
/// struct Tagged(Variant);
/// impl Product for Tagged {
///     fn variant(&self) -> Variant { self.0 }
/// }
///
/// let mac = Tagged(Variant::new("Mac"));
/// let windows = Tagged(Variant::new("Windows"));
///
/// assert!(ensure_compatible(&mac, &Tagged(Variant::new("Mac"))).is_ok());
/// assert_eq!(
///     ensure_compatible(&mac, &windows),
///     Err(FactoryError::VariantMismatch { expected: "Mac", found: "Windows" })
/// );
/// ```
pub fn ensure_compatible<A, B>(own: &A, peer: &B) -> FactoryResult<()>
where
    A: ?Sized + Product,
    B: ?Sized + Product,
{
    let expected = own.variant();
    let found = peer.variant();
    if expected == found {
        Ok(())
    } else {
        Err(FactoryError::VariantMismatch {
            expected: expected.name(),
            found: found.name(),
        })
    }
}
