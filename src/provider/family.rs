//! Family handles: one creator per kind, all bound to a single variant.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::{CreationRequest, FactoryError, FactoryResult, Lifetime, ProductKind, Variant};
use crate::traits::{Product, Resolver};
use super::{AnyProduct, CreationRegistry};

/// Creators for every declared kind, bound to one variant.
///
/// Obtained from [`CreationRegistry::resolve_family`]. Products created
/// through one `Family` always report its variant, so any two of them may
/// collaborate.
///
/// # Examples
///
/// ```
/// use ferrous_factory::{Product, ProductCollection, Variant};
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
/// let mut products = ProductCollection::new();
/// products
///     .add_product::<dyn Button, _>(MAC, || Arc::new(MacButton))
///     .add_product::<dyn Checkbox, _>(MAC, || Arc::new(MacCheckbox));
/// let registry = products.build().unwrap();
///
/// let family = registry.resolve_family(MAC).unwrap();
/// let button = family.create::<dyn Button>().unwrap();
/// let checkbox = family.create::<dyn Checkbox>().unwrap();
/// assert_eq!(button.variant(), checkbox.variant());
/// ```
#[derive(Clone)]
pub struct Family {
    registry: CreationRegistry,
    variant: Variant,
}

impl Family {
    pub(crate) fn new(registry: CreationRegistry, variant: Variant) -> Self {
        Self { registry, variant }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Every kind this family can create.
    pub fn kinds(&self) -> &[ProductKind] {
        self.registry.kinds()
    }

    pub fn supports<T: ?Sized + Product>(&self) -> bool {
        self.registry.contains(&CreationRequest::of::<T>(self.variant))
    }

    /// Creates a fresh instance of capability `T`.
    pub fn create<T: ?Sized + Product>(&self) -> FactoryResult<Arc<T>> {
        self.registry.resolve::<T>(self.variant, Lifetime::Transient)
    }

    /// Returns the shared instance of capability `T`.
    pub fn shared<T: ?Sized + Product>(&self) -> FactoryResult<Arc<T>> {
        self.registry.resolve::<T>(self.variant, Lifetime::Singleton)
    }

    /// Detached creator for capability `T`.
    ///
    /// # Errors
    ///
    /// `UnknownKind` if `T` was never declared.
    pub fn creator<T: ?Sized + Product>(&self) -> FactoryResult<FamilyCreator<T>> {
        let kind = ProductKind::of::<T>();
        if !self.registry.kinds().contains(&kind) {
            return Err(FactoryError::UnknownKind(kind.display_name().to_string()));
        }
        Ok(FamilyCreator {
            registry: self.registry.clone(),
            variant: self.variant,
            _product: PhantomData,
        })
    }

    /// One type-erased creator per declared kind, in declaration order.
    pub fn creators(&self) -> Vec<KindCreator> {
        self.registry.kinds()
            .iter()
            .map(|kind| KindCreator {
                registry: self.registry.clone(),
                request: CreationRequest::new(*kind, self.variant),
            })
            .collect()
    }
}

impl std::fmt::Debug for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Family")
            .field("variant", &self.variant)
            .field("kinds", &self.registry.kinds())
            .finish()
    }
}

/// Creates instances of one capability under one variant.
pub struct FamilyCreator<T: ?Sized> {
    registry: CreationRegistry,
    variant: Variant,
    _product: PhantomData<fn() -> Arc<T>>,
}

impl<T: ?Sized + Product> FamilyCreator<T> {
    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn create(&self) -> FactoryResult<Arc<T>> {
        self.registry.resolve::<T>(self.variant, Lifetime::Transient)
    }
}

impl<T: ?Sized> Clone for FamilyCreator<T> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            variant: self.variant,
            _product: PhantomData,
        }
    }
}

/// Creator for a kind known only at runtime.
#[derive(Clone)]
pub struct KindCreator {
    registry: CreationRegistry,
    request: CreationRequest,
}

impl KindCreator {
    pub fn kind(&self) -> ProductKind {
        self.request.kind
    }

    pub fn variant(&self) -> Variant {
        self.request.variant
    }

    pub fn create(&self) -> FactoryResult<AnyProduct> {
        self.registry.resolve_request(&self.request, Lifetime::Transient)
    }
}
