//! Singleton: one process-wide registry, one lazily created instance per kind.

use ferrous_factory::{
    CreationRegistry, FactoryResult, Lifetime, MetricsObserver, Product, ProductCollection,
    Resolver, Variant,
};
use std::sync::{Arc, OnceLock};
use std::thread;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT: Variant = Variant::new("Default");

// ===== Products =====

trait AppSettings: Product {
    fn do_something(&self) -> String;
    fn instance_id(&self) -> usize;
}

struct Settings {
    id: usize,
}

impl Product for Settings {
    fn variant(&self) -> Variant {
        DEFAULT
    }
}

impl AppSettings for Settings {
    fn do_something(&self) -> String {
        format!("Singleton instance #{} is doing something.", self.id)
    }

    fn instance_id(&self) -> usize {
        self.id
    }
}

// ===== Process-wide Registry =====

static METRICS: OnceLock<Arc<MetricsObserver>> = OnceLock::new();
static REGISTRY: OnceLock<CreationRegistry> = OnceLock::new();

fn metrics() -> Arc<MetricsObserver> {
    METRICS.get_or_init(|| Arc::new(MetricsObserver::new())).clone()
}

fn registry() -> FactoryResult<&'static CreationRegistry> {
    if let Some(registry) = REGISTRY.get() {
        return Ok(registry);
    }

    let created = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let mut products = ProductCollection::new();
    products
        .add_product::<dyn AppSettings, _>(DEFAULT, move || {
            let id = created.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Arc::new(Settings { id })
        })
        .add_observer(metrics());
    let built = products.build()?;

    Ok(REGISTRY.get_or_init(|| built))
}

fn main() -> FactoryResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let first = registry()?.resolve::<dyn AppSettings>(DEFAULT, Lifetime::Singleton)?;
    let second = registry()?.resolve::<dyn AppSettings>(DEFAULT, Lifetime::Singleton)?;
    info!("{}", first.do_something());
    info!("same instance: {}", Arc::ptr_eq(&first, &second));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            thread::spawn(|| -> FactoryResult<usize> {
                let settings = registry()?.resolve_singleton::<dyn AppSettings>(DEFAULT)?;
                Ok(settings.instance_id())
            })
        })
        .collect();

    for handle in handles {
        match handle.join() {
            Ok(result) => info!("thread saw instance #{}", result?),
            Err(_) => info!("worker thread panicked"),
        }
    }

    let fresh = registry()?.resolve_transient::<dyn AppSettings>(DEFAULT)?;
    info!("a transient request still builds a new one: #{}", fresh.instance_id());

    let metrics = metrics();
    info!(
        constructions = metrics.construction_count(),
        cache_hits = metrics.cache_hit_count(),
        "singleton metrics"
    );

    Ok(())
}
