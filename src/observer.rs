//! Diagnostic observers for creation traceability.
//!
//! This module provides hooks for observing resolution events: which
//! request was resolved, under which lifecycle mode, how long it took, and
//! whether a cached singleton answered it.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use crate::error::FactoryError;
use crate::key::CreationRequest;
use crate::lifetime::Lifetime;

/// Observer trait for resolution events.
///
/// Observer calls are made synchronously during resolution. Keep
/// implementations lightweight.
///
/// # Examples
///
/// ```
/// use ferrous_factory::{CreationRequest, FactoryError, FactoryObserver, Lifetime, ProductCollection};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// struct PrintingObserver;
///
/// impl FactoryObserver for PrintingObserver {
///     fn resolving(&self, request: &CreationRequest, lifetime: Lifetime) {
///         println!("resolving {} ({})", request, lifetime.as_str());
///     }
///
///     fn resolved(&self, request: &CreationRequest, _lifetime: Lifetime, duration: Duration, cached: bool) {
///         println!("resolved {} in {:?} (cached: {})", request, duration, cached);
///     }
///
///     fn resolution_failed(&self, request: &CreationRequest, error: &FactoryError) {
///         println!("failed {}: {}", request, error);
///     }
/// }
///
/// let mut products = ProductCollection::new();
/// products.add_observer(Arc::new(PrintingObserver));
/// let registry = products.build().unwrap();
/// ```
pub trait FactoryObserver: Send + Sync {
    /// Called before the registry looks up or constructs the instance.
    fn resolving(&self, request: &CreationRequest, lifetime: Lifetime);

    /// Called after a successful resolution.
    ///
    /// `cached` is `true` when an existing singleton answered the request.
    fn resolved(&self, request: &CreationRequest, lifetime: Lifetime, duration: Duration, cached: bool);

    /// Called when a resolution fails. The error is still returned to the caller.
    fn resolution_failed(&self, _request: &CreationRequest, _error: &FactoryError) {}
}

/// Container for registered observers.
///
/// Designed to cost nothing when no observers are registered.
#[derive(Default, Clone)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn FactoryObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn FactoryObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    #[inline]
    pub(crate) fn resolving(&self, request: &CreationRequest, lifetime: Lifetime) {
        for observer in &self.observers {
            observer.resolving(request, lifetime);
        }
    }

    #[inline]
    pub(crate) fn resolved(&self, request: &CreationRequest, lifetime: Lifetime, duration: Duration, cached: bool) {
        for observer in &self.observers {
            observer.resolved(request, lifetime, duration, cached);
        }
    }

    #[inline]
    pub(crate) fn resolution_failed(&self, request: &CreationRequest, error: &FactoryError) {
        for observer in &self.observers {
            observer.resolution_failed(request, error);
        }
    }
}

/// Built-in observer that emits `tracing` events.
///
/// Resolutions are logged at `debug`, failures at `warn`, all under the
/// `ferrous_factory` target. Install a subscriber (for example
/// `tracing_subscriber::fmt`) to see them.
///
/// # Examples
///
/// ```
/// use ferrous_factory::{ProductCollection, LoggingObserver};
/// use std::sync::Arc;
///
/// let mut products = ProductCollection::new();
/// products.add_observer(Arc::new(LoggingObserver::with_prefix("gui")));
/// let registry = products.build().unwrap();
/// ```
pub struct LoggingObserver {
    prefix: String,
}

impl LoggingObserver {
    pub fn new() -> Self {
        Self {
            prefix: "ferrous-factory".to_string(),
        }
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl FactoryObserver for LoggingObserver {
    fn resolving(&self, request: &CreationRequest, lifetime: Lifetime) {
        tracing::trace!(
            target: "ferrous_factory",
            prefix = %self.prefix,
            kind = request.kind.short_name(),
            variant = request.variant.name(),
            lifetime = lifetime.as_str(),
            "resolving"
        );
    }

    fn resolved(&self, request: &CreationRequest, lifetime: Lifetime, duration: Duration, cached: bool) {
        tracing::debug!(
            target: "ferrous_factory",
            prefix = %self.prefix,
            kind = request.kind.short_name(),
            variant = request.variant.name(),
            lifetime = lifetime.as_str(),
            cached,
            elapsed_ns = duration.as_nanos() as u64,
            "resolved"
        );
    }

    fn resolution_failed(&self, request: &CreationRequest, error: &FactoryError) {
        tracing::warn!(
            target: "ferrous_factory",
            prefix = %self.prefix,
            kind = request.kind.short_name(),
            variant = request.variant.name(),
            error = %error,
            "resolution failed"
        );
    }
}

/// Observer that counts resolutions, constructions and failures.
///
/// Useful in tests and for spotting singletons that are requested far more
/// often than they are built.
pub struct MetricsObserver {
    resolution_count: AtomicU64,
    construction_count: AtomicU64,
    cache_hit_count: AtomicU64,
    failure_count: AtomicU64,
    total_resolution_time: AtomicU64,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self {
            resolution_count: AtomicU64::new(0),
            construction_count: AtomicU64::new(0),
            cache_hit_count: AtomicU64::new(0),
            failure_count: AtomicU64::new(0),
            total_resolution_time: AtomicU64::new(0),
        }
    }

    /// Successful resolutions observed.
    pub fn resolution_count(&self) -> u64 {
        self.resolution_count.load(Ordering::Relaxed)
    }

    /// Resolutions that ran a constructor.
    pub fn construction_count(&self) -> u64 {
        self.construction_count.load(Ordering::Relaxed)
    }

    /// Singleton resolutions answered from a filled slot.
    pub fn cache_hit_count(&self) -> u64 {
        self.cache_hit_count.load(Ordering::Relaxed)
    }

    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    /// Average time per successful resolution.
    pub fn average_resolution_time(&self) -> Option<Duration> {
        let count = self.resolution_count();
        if count == 0 {
            return None;
        }

        let total_ns = self.total_resolution_time.load(Ordering::Relaxed);
        Some(Duration::from_nanos(total_ns / count))
    }

    pub fn reset(&self) {
        self.resolution_count.store(0, Ordering::Relaxed);
        self.construction_count.store(0, Ordering::Relaxed);
        self.cache_hit_count.store(0, Ordering::Relaxed);
        self.failure_count.store(0, Ordering::Relaxed);
        self.total_resolution_time.store(0, Ordering::Relaxed);
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl FactoryObserver for MetricsObserver {
    fn resolving(&self, _request: &CreationRequest, _lifetime: Lifetime) {}

    fn resolved(&self, _request: &CreationRequest, _lifetime: Lifetime, duration: Duration, cached: bool) {
        self.resolution_count.fetch_add(1, Ordering::Relaxed);
        self.total_resolution_time.fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        if cached {
            self.cache_hit_count.fetch_add(1, Ordering::Relaxed);
        } else {
            self.construction_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn resolution_failed(&self, _request: &CreationRequest, _error: &FactoryError) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }
}
