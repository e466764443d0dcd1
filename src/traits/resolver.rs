//! Resolver traits for product resolution.

use std::any::Any;
use std::sync::Arc;
use crate::error::{FactoryError, FactoryResult};
use crate::key::{CreationRequest, Variant};
use crate::lifetime::Lifetime;
use crate::traits::Product;

/// Core resolver trait for object-safe product resolution.
///
/// Resolves a [`CreationRequest`] into a type-erased instance. The returned
/// `Arc<dyn Any>` wraps an `Arc<T>` where `T` is the capability type the
/// request's kind names (usually a trait object such as `dyn Button`).
///
/// Most callers should use the [`Resolver`] trait instead, which provides
/// typed generic methods built on top of this trait.
pub trait ResolverCore: Send + Sync {
    /// Resolves one request under the given lifecycle mode.
    ///
    /// # Returns
    ///
    /// * `Ok(AnyArc)` - The instance, stored as `Arc<Arc<T>>` behind `dyn Any`
    /// * `Err(FactoryError)` - Unknown kind or variant, or a variant tag mismatch
    fn resolve_any(
        &self,
        request: &CreationRequest,
        lifetime: Lifetime,
    ) -> FactoryResult<Arc<dyn Any + Send + Sync>>;
}

/// High-level resolver interface with typed generic methods.
///
/// Implemented for every [`ResolverCore`], so the registry and anything
/// wrapping it share the same surface.
///
/// # Examples
///
/// ```
/// use ferrous_factory::{Lifetime, Product, ProductCollection, Resolver, Variant};
/// use std::sync::Arc;
///
/// const MAC: Variant = Variant::new("Mac");
///
/// trait Button: Product {
///     fn render(&self) -> String;
/// }
///
/// struct MacButton;
/// impl Product for MacButton {
///     fn variant(&self) -> Variant { MAC }
/// }
/// impl Button for MacButton {
///     fn render(&self) -> String { "[Mac Button]".to_string() }
/// }
///
/// let mut products = ProductCollection::new();
/// products.add_product::<dyn Button, _>(MAC, || Arc::new(MacButton));
///
/// let registry = products.build().unwrap();
/// let button = registry.resolve_transient::<dyn Button>(MAC).unwrap();
/// assert_eq!(button.render(), "[Mac Button]");
/// ```
pub trait Resolver: ResolverCore {
    /// Resolves capability `T` under `variant` with the given lifecycle mode.
    ///
    /// # Returns
    ///
    /// * `Ok(Arc<T>)` - The instance
    /// * `Err(FactoryError)` - Unknown kind or variant, or a variant tag mismatch
    fn resolve<T>(&self, variant: Variant, lifetime: Lifetime) -> FactoryResult<Arc<T>>
    where
        T: ?Sized + Product,
    {
        let request = CreationRequest::of::<T>(variant);
        let any = self.resolve_any(&request, lifetime)?;
        // Stored as Arc<Arc<T>> so unsized capabilities survive the erasure
        any.downcast::<Arc<T>>()
            .map(|boxed| (*boxed).clone())
            .map_err(|_| FactoryError::TypeMismatch(std::any::type_name::<T>()))
    }

    /// Resolves a fresh instance of `T`.
    fn resolve_transient<T>(&self, variant: Variant) -> FactoryResult<Arc<T>>
    where
        T: ?Sized + Product,
    {
        self.resolve::<T>(variant, Lifetime::Transient)
    }

    /// Resolves the shared instance of `T`, creating it on first demand.
    fn resolve_singleton<T>(&self, variant: Variant) -> FactoryResult<Arc<T>>
    where
        T: ?Sized + Product,
    {
        self.resolve::<T>(variant, Lifetime::Singleton)
    }

    /// Resolves capability `T`, panicking on failure.
    ///
    /// # Panics
    ///
    /// Panics if the kind or variant is unknown or the instance carries the
    /// wrong variant tag.
    fn resolve_required<T>(&self, variant: Variant, lifetime: Lifetime) -> Arc<T>
    where
        T: ?Sized + Product,
    {
        self.resolve::<T>(variant, lifetime)
            .unwrap_or_else(|e| panic!("Failed to resolve {}: {:?}", std::any::type_name::<T>(), e))
    }
}

impl<R: ResolverCore + ?Sized> Resolver for R {}
