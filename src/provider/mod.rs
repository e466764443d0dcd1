//! Creation registry module.
//!
//! This module contains the `CreationRegistry` type, the frozen lookup table
//! that resolves creation requests into product instances.

use std::sync::Arc;
use std::time::Instant;

use crate::{CreationRequest, FactoryError, FactoryResult, Lifetime, ProductDescriptor, ProductKind, Variant};
use crate::config::RegistryConfig;
use crate::internal::{circular, SingletonSlots};
use crate::observer::Observers;
use crate::registration::{AnyArc, Registration, Registry};
use crate::traits::{Product, ResolverCore};

pub mod family;
pub use family::{Family, FamilyCreator, KindCreator};

/// Resolves creation requests against a closed, total table of constructors.
///
/// Built by [`ProductCollection::build`](crate::ProductCollection::build).
/// The table is immutable and read without locks; only singleton slots are
/// synchronized, and only while they are being filled.
///
/// # Thread Safety
///
/// `CreationRegistry` is `Send + Sync` and cheap to clone (it shares one
/// `Arc` internally). Concurrent first-time singleton resolutions construct
/// exactly one instance; every caller receives that instance.
///
/// # Examples
///
/// ```
/// use ferrous_factory::{Lifetime, Product, ProductCollection, Resolver, Variant};
/// use std::sync::Arc;
///
/// const MAC: Variant = Variant::new("Mac");
/// const WINDOWS: Variant = Variant::new("Windows");
///
/// trait Button: Product {
///     fn render(&self) -> String;
/// }
///
/// struct StyledButton(Variant);
/// impl Product for StyledButton {
///     fn variant(&self) -> Variant { self.0 }
/// }
/// impl Button for StyledButton {
///     fn render(&self) -> String { format!("[{} Button]", self.0) }
/// }
///
/// let mut products = ProductCollection::new();
/// products.add_product::<dyn Button, _>(MAC, || Arc::new(StyledButton(MAC)));
/// products.add_product::<dyn Button, _>(WINDOWS, || Arc::new(StyledButton(WINDOWS)));
///
/// let registry = products.build().unwrap();
/// let button = registry.resolve::<dyn Button>(WINDOWS, Lifetime::Transient).unwrap();
/// assert_eq!(button.render(), "[Windows Button]");
/// ```
#[derive(Clone)]
pub struct CreationRegistry {
    inner: Arc<RegistryInner>,
}

pub(crate) struct RegistryInner {
    pub registry: Registry,
    pub slots: SingletonSlots,
    pub observers: Observers,
    pub config: RegistryConfig,
}

impl CreationRegistry {
    pub(crate) fn new(registry: Registry, observers: Observers, config: RegistryConfig) -> Self {
        let slots = SingletonSlots::new(registry.slot_count);
        Self {
            inner: Arc::new(RegistryInner {
                registry,
                slots,
                observers,
                config,
            }),
        }
    }

    #[inline]
    pub(crate) fn inner(&self) -> &RegistryInner {
        &self.inner
    }

    /// Returns the family of creators bound to `variant`.
    ///
    /// Every product created through the returned [`Family`] reports
    /// `variant`, so all of them are mutually compatible.
    ///
    /// # Errors
    ///
    /// `UnknownVariant` if `variant` was never declared.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferrous_factory::{FactoryError, ProductCollection, Variant};
    ///
    /// let mut products = ProductCollection::new();
    /// products.declare_variant(Variant::new("Mac"));
    /// let registry = products.build().unwrap();
    ///
    /// assert!(registry.resolve_family(Variant::new("Mac")).is_ok());
    /// assert!(matches!(
    ///     registry.resolve_family(Variant::new("Linux")),
    ///     Err(FactoryError::UnknownVariant(_))
    /// ));
    /// ```
    pub fn resolve_family(&self, variant: Variant) -> FactoryResult<Family> {
        if self.inner().registry.has_variant(variant) {
            Ok(Family::new(self.clone(), variant))
        } else {
            Err(FactoryError::UnknownVariant(variant.name().to_string()))
        }
    }

    /// Resolves a request whose kind is only known as a value.
    pub fn resolve_request(&self, request: &CreationRequest, lifetime: Lifetime) -> FactoryResult<AnyProduct> {
        let value = self.resolve_any(request, lifetime)?;
        Ok(AnyProduct { request: *request, value })
    }

    /// Looks up kind and variant by name, then resolves.
    ///
    /// Kinds match by full type name or short name (`Button`).
    pub fn resolve_by_name(&self, kind: &str, variant: &str, lifetime: Lifetime) -> FactoryResult<AnyProduct> {
        let variant = self.variant_named(variant)?;
        let kind = self.kind_named(kind)?;
        self.resolve_request(&CreationRequest::new(kind, variant), lifetime)
    }

    /// String-keyed simple factory: a fresh instance of `kind` under `variant`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferrous_factory::{FactoryError, Product, ProductCollection, Variant};
    /// use std::sync::Arc;
    ///
    /// const IOS: Variant = Variant::new("ios");
    ///
    /// trait Button: Product {}
    /// struct IosButton;
    /// impl Product for IosButton {
    ///     fn variant(&self) -> Variant { IOS }
    /// }
    /// impl Button for IosButton {}
    ///
    /// let mut products = ProductCollection::new();
    /// products.add_product::<dyn Button, _>(IOS, || Arc::new(IosButton));
    /// let registry = products.build().unwrap();
    ///
    /// let button = registry.create_by_name("Button", "ios").unwrap();
    /// assert_eq!(button.variant(), IOS);
    /// assert!(button.downcast::<dyn Button>().is_ok());
    ///
    /// assert!(matches!(
    ///     registry.create_by_name("Button", "android"),
    ///     Err(FactoryError::UnknownVariant(_))
    /// ));
    /// ```
    pub fn create_by_name(&self, kind: &str, variant: &str) -> FactoryResult<AnyProduct> {
        self.resolve_by_name(kind, variant, Lifetime::Transient)
    }

    /// Finds a declared variant by name.
    pub fn variant_named(&self, name: &str) -> FactoryResult<Variant> {
        self.inner().registry.variants.iter()
            .copied()
            .find(|variant| variant.name() == name)
            .ok_or_else(|| FactoryError::UnknownVariant(name.to_string()))
    }

    /// Finds a declared kind by full or short type name.
    ///
    /// A full name always wins. Kinds sharing a short name, such as
    /// `Handler<A>` and `Handler<B>`, resolve to the first declared.
    pub fn kind_named(&self, name: &str) -> FactoryResult<ProductKind> {
        let kinds = &self.inner().registry.kinds;
        kinds.iter()
            .find(|kind| kind.display_name() == name)
            .or_else(|| kinds.iter().find(|kind| kind.short_name() == name))
            .copied()
            .ok_or_else(|| FactoryError::UnknownKind(name.to_string()))
    }

    /// Declared variants in declaration order.
    pub fn variants(&self) -> &[Variant] {
        &self.inner().registry.variants
    }

    /// Declared kinds in declaration order.
    pub fn kinds(&self) -> &[ProductKind] {
        &self.inner().registry.kinds
    }

    pub fn contains(&self, request: &CreationRequest) -> bool {
        self.inner().registry.contains_key(request)
    }

    pub fn descriptors(&self) -> Vec<ProductDescriptor> {
        crate::collection::describe(&self.inner().registry)
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.inner().config
    }

    /// Number of singleton slots currently holding an instance.
    pub fn singleton_count(&self) -> usize {
        self.inner().slots.filled()
    }

    /// Identity of the shared inner state, distinguishing slot indices across registries.
    fn registry_id(&self) -> usize {
        Arc::as_ptr(&self.inner) as usize
    }

    fn lookup(&self, request: &CreationRequest) -> FactoryResult<&Registration> {
        let registry = &self.inner().registry;
        if !registry.has_variant(request.variant) {
            return Err(FactoryError::UnknownVariant(request.variant.name().to_string()));
        }
        if !registry.has_kind(&request.kind) {
            return Err(FactoryError::UnknownKind(request.kind.display_name().to_string()));
        }
        // Totality was checked at build time
        registry.get(request).ok_or(FactoryError::IncompleteFamily {
            variant: request.variant.name(),
            kind: request.kind.display_name(),
        })
    }

    /// Resolves and reports whether a cached singleton answered.
    fn resolve_entry(&self, request: &CreationRequest, lifetime: Lifetime) -> FactoryResult<(AnyArc, bool)> {
        let registration = self.lookup(request)?;

        match lifetime {
            Lifetime::Transient => {
                let (value, tag) = (registration.ctor)();
                check_tag(request, tag)?;
                Ok((value, false))
            }
            Lifetime::Singleton => {
                let slot = self.inner().slots.get(registration.slot)
                    .ok_or_else(|| FactoryError::UnknownKind(request.kind.display_name().to_string()))?;

                // A constructor resolving its own slot would wait on itself
                let registry_id = self.registry_id();
                circular::check(registry_id, registration.slot, request)?;

                let ((cached_variant, value), created) = slot.get_or_try_init(|| {
                    let _filling = circular::FillGuard::new(registry_id, registration.slot, *request);
                    let (value, tag) = (registration.ctor)();
                    check_tag(request, tag)?;
                    tracing::trace!(
                        target: "ferrous_factory",
                        kind = request.kind.short_name(),
                        variant = request.variant.name(),
                        "singleton slot filled"
                    );
                    Ok((tag, value))
                })?;

                // Per-kind slots may already hold another variant's instance
                if cached_variant != request.variant {
                    return Err(FactoryError::VariantMismatch {
                        expected: request.variant.name(),
                        found: cached_variant.name(),
                    });
                }
                Ok((value, !created))
            }
        }
    }
}

fn check_tag(request: &CreationRequest, tag: Variant) -> FactoryResult<()> {
    if tag == request.variant {
        Ok(())
    } else {
        Err(FactoryError::VariantMismatch {
            expected: request.variant.name(),
            found: tag.name(),
        })
    }
}

impl ResolverCore for CreationRegistry {
    fn resolve_any(&self, request: &CreationRequest, lifetime: Lifetime) -> FactoryResult<AnyArc> {
        let observers = &self.inner().observers;
        if !observers.has_observers() {
            return self.resolve_entry(request, lifetime).map(|(value, _)| value);
        }

        let start = Instant::now();
        observers.resolving(request, lifetime);
        match self.resolve_entry(request, lifetime) {
            Ok((value, cached)) => {
                observers.resolved(request, lifetime, start.elapsed(), cached);
                Ok(value)
            }
            Err(error) => {
                observers.resolution_failed(request, &error);
                Err(error)
            }
        }
    }
}

/// Type-erased product returned by value-level and name-based resolution.
#[derive(Clone)]
pub struct AnyProduct {
    request: CreationRequest,
    value: AnyArc,
}

impl AnyProduct {
    pub fn request(&self) -> CreationRequest {
        self.request
    }

    pub fn kind(&self) -> ProductKind {
        self.request.kind
    }

    pub fn variant(&self) -> Variant {
        self.request.variant
    }

    /// Recovers the typed capability.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if `T` is not the capability this product was created as.
    pub fn downcast<T: ?Sized + Product>(&self) -> FactoryResult<Arc<T>> {
        if self.request.kind.type_id() != std::any::TypeId::of::<T>() {
            return Err(FactoryError::TypeMismatch(std::any::type_name::<T>()));
        }
        self.value.downcast_ref::<Arc<T>>()
            .cloned()
            .ok_or(FactoryError::TypeMismatch(std::any::type_name::<T>()))
    }

    /// Whether both handles refer to the same instance.
    pub fn ptr_eq(&self, other: &AnyProduct) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl std::fmt::Debug for AnyProduct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnyProduct")
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}
