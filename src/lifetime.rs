//! Lifecycle mode definitions.

/// Lifecycle mode controlling instance caching behavior
///
/// Chosen per resolution call: the same registered constructor can serve both
/// a fresh instance and the process-wide cached one.
///
/// # Examples
///
/// ```rust
/// use ferrous_factory::{Lifetime, ProductCollection, Product, Resolver, Variant};
/// use std::sync::Arc;
///
/// const PLAIN: Variant = Variant::new("Plain");
///
/// trait Clock: Product {}
/// struct PlainClock;
/// impl Product for PlainClock {
///     fn variant(&self) -> Variant { PLAIN }
/// }
/// impl Clock for PlainClock {}
///
/// let mut products = ProductCollection::new();
/// products.add_product::<dyn Clock, _>(PLAIN, || Arc::new(PlainClock));
/// let registry = products.build().unwrap();
///
/// // Singleton: one instance for the registry's whole life
/// let a = registry.resolve::<dyn Clock>(PLAIN, Lifetime::Singleton).unwrap();
/// let b = registry.resolve::<dyn Clock>(PLAIN, Lifetime::Singleton).unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
///
/// // Transient: new instance every time
/// let c = registry.resolve::<dyn Clock>(PLAIN, Lifetime::Transient).unwrap();
/// let d = registry.resolve::<dyn Clock>(PLAIN, Lifetime::Transient).unwrap();
/// assert!(!Arc::ptr_eq(&c, &d));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// New instance per resolution, never cached
    ///
    /// The constructor runs on every call. The caller owns the result and
    /// it is dropped with the last `Arc`.
    Transient,
    /// Single instance per slot, created on first demand and cached forever
    ///
    /// The first resolver constructs the instance under mutual exclusion;
    /// every later or concurrent resolver observes that same instance. There
    /// is no teardown path: the slot lives as long as the registry.
    Singleton,
}

impl Lifetime {
    /// Short lowercase label used in log events.
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifetime::Transient => "transient",
            Lifetime::Singleton => "singleton",
        }
    }
}
