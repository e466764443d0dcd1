//! Factory-method style creators.
//!
//! A creator is anything that can make one product. Business logic built on
//! top of a creator lives in default trait methods, so it runs unchanged for
//! every variant: adding a variant means adding one product type and one
//! creator, never editing the template or its callers.
//!
//! ```
//! use ferrous_factory::{Creator, Product, Variant};
//! use std::sync::Arc;
//!
//! const EMAIL: Variant = Variant::new("Email");
//!
//! trait Notifier: Product {
//!     fn send(&self, to: &str) -> String;
//! }
//!
//! struct EmailNotifier;
//! impl Product for EmailNotifier {
//!     fn variant(&self) -> Variant { EMAIL }
//! }
//! impl Notifier for EmailNotifier {
//!     fn send(&self, to: &str) -> String { format!("mail to {}", to) }
//! }
//!
//! // The template: written once against the capability
//! trait NotificationService: Creator<Product = dyn Notifier> {
//!     fn notify(&self, to: &str) -> String {
//!         self.make_product().send(to)
//!     }
//! }
//! impl<C: ?Sized + Creator<Product = dyn Notifier>> NotificationService for C {}
//!
//! // The extension: one creator per variant
//! struct EmailCreator;
//! impl Creator for EmailCreator {
//!     type Product = dyn Notifier;
//!     fn make_product(&self) -> Arc<dyn Notifier> { Arc::new(EmailNotifier) }
//! }
//!
//! assert_eq!(EmailCreator.notify("ops"), "mail to ops");
//! ```

use std::sync::Arc;
use crate::traits::Product;

/// Makes one product of a fixed capability.
///
/// `make_product` is the extension point; `perform_task` is the fixed
/// template that creates a product and hands it to domain logic. Creators
/// can also be registered into a registry with
/// [`ProductCollection::add_creator`](crate::ProductCollection::add_creator).
pub trait Creator: Send + Sync + 'static {
    /// Capability the creator produces, usually a trait object type.
    type Product: ?Sized + Product;

    /// Creates a new product.
    fn make_product(&self) -> Arc<Self::Product>;

    /// Creates a product and runs `task` on it.
    fn perform_task<R, F>(&self, task: F) -> R
    where
        F: FnOnce(&Self::Product) -> R,
        Self: Sized,
    {
        let product = self.make_product();
        task(&product)
    }
}

impl<C: Creator + ?Sized> Creator for Box<C> {
    type Product = C::Product;

    fn make_product(&self) -> Arc<Self::Product> {
        (**self).make_product()
    }
}

impl<C: Creator + ?Sized> Creator for Arc<C> {
    type Product = C::Product;

    fn make_product(&self) -> Arc<Self::Product> {
        (**self).make_product()
    }
}

/// Adapts a closure into a [`Creator`].
///
/// # Examples
///
/// ```
/// use ferrous_factory::{Creator, FnCreator, Product, Variant};
/// use std::sync::Arc;
///
/// trait Shape: Product {
///     fn sides(&self) -> u32;
/// }
///
/// struct Square;
/// impl Product for Square {
///     fn variant(&self) -> Variant { Variant::new("Flat") }
/// }
/// impl Shape for Square {
///     fn sides(&self) -> u32 { 4 }
/// }
///
/// let creator = FnCreator::<dyn Shape, _>::new(|| Arc::new(Square));
/// assert_eq!(creator.perform_task(|shape| shape.sides()), 4);
/// ```
pub struct FnCreator<T: ?Sized, F> {
    factory: F,
    _product: std::marker::PhantomData<fn() -> Arc<T>>,
}

impl<T, F> FnCreator<T, F>
where
    T: ?Sized + Product,
    F: Fn() -> Arc<T> + Send + Sync + 'static,
{
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            _product: std::marker::PhantomData,
        }
    }
}

impl<T, F> Creator for FnCreator<T, F>
where
    T: ?Sized + Product,
    F: Fn() -> Arc<T> + Send + Sync + 'static,
{
    type Product = T;

    fn make_product(&self) -> Arc<T> {
        (self.factory)()
    }
}
