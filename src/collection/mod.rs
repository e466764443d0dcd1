//! Product collection module.
//!
//! This module contains the `ProductCollection` type, where variants, kinds
//! and constructors are declared before being frozen into a
//! [`CreationRegistry`].

use std::sync::Arc;

use crate::{CreationRequest, Creator, FactoryResult, ProductDescriptor, ProductKind, Variant};
use crate::config::RegistryConfig;
use crate::observer::{FactoryObserver, Observers};
use crate::registration::{Registration, Registry};
use crate::traits::Product;
use crate::validation::ValidationReport;
use crate::CreationRegistry;

pub mod family_module;
pub use family_module::*;

/// Mutable builder for a closed creation table.
///
/// Register one constructor per (kind, variant) pair, then call
/// [`build`](Self::build). Registering a constructor implicitly declares its
/// kind and variant; `build` refuses a table where some declared variant
/// lacks a constructor for some declared kind.
///
/// # Examples
///
/// ```rust
/// use ferrous_factory::{Product, ProductCollection, Variant};
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
/// let family = registry.resolve_family(MAC).unwrap();
/// assert_eq!(family.create::<dyn Button>().unwrap().render(), "[Mac Button]");
/// ```
pub struct ProductCollection {
    registry: Registry,
    observers: Observers,
    config: RegistryConfig,
}

impl ProductCollection {
    /// Creates a new empty collection with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates a new empty collection with the given configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            registry: Registry::new(),
            observers: Observers::new(),
            config,
        }
    }

    /// Replaces the configuration used by [`build`](Self::build).
    pub fn configure(&mut self, config: RegistryConfig) -> &mut Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // ----- Declarations -----

    /// Declares a variant. Every declared kind must then be registered for it.
    pub fn declare_variant(&mut self, variant: Variant) -> &mut Self {
        self.registry.declare_variant(variant);
        self
    }

    /// Declares capability `T` as a kind every variant must supply.
    pub fn declare_kind<T: ?Sized + Product>(&mut self) -> &mut Self {
        self.registry.declare_kind(ProductKind::of::<T>());
        self
    }

    // ----- Constructors -----

    /// Registers the constructor for capability `T` under `variant`.
    ///
    /// A later registration for the same pair replaces the earlier one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use ferrous_factory::{Product, ProductCollection, Variant};
    /// # use std::sync::Arc;
    /// const CARD: Variant = Variant::new("CreditCard");
    ///
    /// trait PaymentMethod: Product {}
    /// struct CardPayment;
    /// impl Product for CardPayment {
    ///     fn variant(&self) -> Variant { CARD }
    /// }
    /// impl PaymentMethod for CardPayment {}
    ///
    /// let mut products = ProductCollection::new();
    /// products.add_product::<dyn PaymentMethod, _>(CARD, || Arc::new(CardPayment));
    /// ```
    pub fn add_product<T, F>(&mut self, variant: Variant, factory: F) -> &mut Self
    where
        T: ?Sized + Product,
        F: Fn() -> Arc<T> + Send + Sync + 'static,
    {
        let request = CreationRequest::of::<T>(variant);
        let source = std::any::type_name::<F>();
        self.registry.insert(request, Registration::typed(factory, source));
        self
    }

    /// Registers a constructor only if the pair has none yet.
    ///
    /// Returns `true` if the constructor was added.
    pub fn try_add_product<T, F>(&mut self, variant: Variant, factory: F) -> bool
    where
        T: ?Sized + Product,
        F: Fn() -> Arc<T> + Send + Sync + 'static,
    {
        if self.registry.contains_key(&CreationRequest::of::<T>(variant)) {
            false
        } else {
            self.add_product::<T, F>(variant, factory);
            true
        }
    }

    /// Registers a factory-method [`Creator`] as the constructor for its
    /// product kind under `variant`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ferrous_factory::{Creator, Lifetime, Product, ProductCollection, Resolver, Variant};
    /// use std::sync::Arc;
    ///
    /// const PAYPAL: Variant = Variant::new("PayPal");
    ///
    /// trait PaymentMethod: Product {
    ///     fn pay(&self, amount: u64) -> String;
    /// }
    ///
    /// struct PayPalPayment;
    /// impl Product for PayPalPayment {
    ///     fn variant(&self) -> Variant { PAYPAL }
    /// }
    /// impl PaymentMethod for PayPalPayment {
    ///     fn pay(&self, amount: u64) -> String { format!("paid {} via PayPal", amount) }
    /// }
    ///
    /// struct PayPalProcessor;
    /// impl Creator for PayPalProcessor {
    ///     type Product = dyn PaymentMethod;
    ///     fn make_product(&self) -> Arc<dyn PaymentMethod> { Arc::new(PayPalPayment) }
    /// }
    ///
    /// let mut products = ProductCollection::new();
    /// products.add_creator(PAYPAL, PayPalProcessor);
    ///
    /// let registry = products.build().unwrap();
    /// let method = registry.resolve::<dyn PaymentMethod>(PAYPAL, Lifetime::Transient).unwrap();
    /// assert_eq!(method.pay(20_000), "paid 20000 via PayPal");
    /// ```
    pub fn add_creator<C: Creator>(&mut self, variant: Variant, creator: C) -> &mut Self {
        let request = CreationRequest::of::<C::Product>(variant);
        let source = std::any::type_name::<C>();
        let creator = Arc::new(creator);
        self.registry.insert(
            request,
            Registration::typed::<C::Product, _>(move || creator.make_product(), source),
        );
        self
    }

    /// Registers every constructor of a [`VariantFamily`].
    pub fn add_family<F: VariantFamily>(&mut self, family: F) -> &mut Self {
        let variant = family.variant();
        self.registry.declare_variant(variant);
        let mut registrar = FamilyRegistrar::new(self, variant);
        family.register(&mut registrar);
        self
    }

    // ----- Observation -----

    /// Adds an observer notified of every resolution on the built registry.
    pub fn add_observer(&mut self, observer: Arc<dyn FactoryObserver>) -> &mut Self {
        self.observers.add(observer);
        self
    }

    // ----- Introspection -----

    /// Whether a constructor is registered for the pair.
    pub fn contains(&self, request: &CreationRequest) -> bool {
        self.registry.contains_key(request)
    }

    /// Declared variants in declaration order.
    pub fn variants(&self) -> &[Variant] {
        &self.registry.variants
    }

    /// Declared kinds in declaration order.
    pub fn kinds(&self) -> &[ProductKind] {
        &self.registry.kinds
    }

    /// Registered constructors, sorted by kind then variant.
    pub fn descriptors(&self) -> Vec<ProductDescriptor> {
        describe(&self.registry)
    }

    /// Checks totality (and variant tags when `verify_on_build` is set)
    /// without consuming the collection.
    pub fn validate(&self) -> ValidationReport {
        let report = ValidationReport::check_totality(&self.registry);
        if self.config.verify_on_build {
            report.check_tags(&self.registry)
        } else {
            report
        }
    }

    /// Freezes the table into a [`CreationRegistry`].
    ///
    /// # Errors
    ///
    /// * `IncompleteFamily` - a declared variant has no constructor for a declared kind
    /// * `VariantMismatch` - with `verify_on_build`, a constructor produced an
    ///   instance tagged with another variant
    pub fn build(mut self) -> FactoryResult<CreationRegistry> {
        self.validate().into_result()?;
        self.registry.finalize(self.config.slot_policy);

        tracing::debug!(
            target: "ferrous_factory",
            variants = self.registry.variants.len(),
            kinds = self.registry.kinds.len(),
            slots = self.registry.slot_count,
            slot_policy = ?self.config.slot_policy,
            "creation registry built"
        );

        Ok(CreationRegistry::new(self.registry, self.observers, self.config))
    }
}

impl Default for ProductCollection {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn describe(registry: &Registry) -> Vec<ProductDescriptor> {
    registry.sorted_entries()
        .into_iter()
        .map(|(request, registration)| ProductDescriptor {
            request: *request,
            source: registration.source,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Variant = Variant::new("A");
    const B: Variant = Variant::new("B");

    trait Widget: Product {}

    struct Tagged(Variant);
    impl Product for Tagged {
        fn variant(&self) -> Variant {
            self.0
        }
    }
    impl Widget for Tagged {}

    #[test]
    fn try_add_keeps_first_registration() {
        let mut products = ProductCollection::new();
        assert!(products.try_add_product::<dyn Widget, _>(A, || Arc::new(Tagged(A))));
        assert!(!products.try_add_product::<dyn Widget, _>(A, || Arc::new(Tagged(B))));
        assert_eq!(products.descriptors().len(), 1);
    }

    #[test]
    fn declarations_are_deduplicated() {
        let mut products = ProductCollection::new();
        products.declare_variant(A).declare_variant(A).declare_kind::<dyn Widget>();
        products.add_product::<dyn Widget, _>(A, || Arc::new(Tagged(A)));

        assert_eq!(products.variants(), &[A]);
        assert_eq!(products.kinds().len(), 1);
    }

    #[test]
    fn validate_does_not_construct_by_default() {
        let mut products = ProductCollection::new();
        products.add_product::<dyn Widget, _>(A, || -> Arc<dyn Widget> {
            panic!("constructor must not run during plain validation")
        });
        assert!(products.validate().is_complete());
    }
}
