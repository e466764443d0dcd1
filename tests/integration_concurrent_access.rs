/// Concurrent access integration tests
///
/// These tests verify that singleton slots are filled exactly once when many
/// threads race to resolve them, and that transient resolution stays
/// independent across threads.

use ferrous_factory::{
    CreationRegistry, FactoryError, Product, ProductCollection, RegistryConfig, Resolver,
    SlotPolicy, Variant,
};
use std::sync::{Arc, Barrier, atomic::{AtomicU32, Ordering}};
use std::thread;
use std::time::Duration;

const PRIMARY: Variant = Variant::new("Primary");
const BACKUP: Variant = Variant::new("Backup");

// ===== Test Products =====

trait Connection: Product {
    fn id(&self) -> u32;
    fn creation_thread(&self) -> &str;
}

struct PooledConnection {
    variant: Variant,
    id: u32,
    creation_thread: String,
}

impl Product for PooledConnection {
    fn variant(&self) -> Variant {
        self.variant
    }
}

impl Connection for PooledConnection {
    fn id(&self) -> u32 {
        self.id
    }

    fn creation_thread(&self) -> &str {
        &self.creation_thread
    }
}

fn counting_registry(policy: SlotPolicy, slow: bool) -> (CreationRegistry, Arc<AtomicU32>) {
    let constructed = Arc::new(AtomicU32::new(0));
    let mut products = ProductCollection::with_config(RegistryConfig::new().with_slot_policy(policy));

    for variant in [PRIMARY, BACKUP] {
        let constructed = constructed.clone();
        products.add_product::<dyn Connection, _>(variant, move || {
            if slow {
                // Widen the race window
                thread::sleep(Duration::from_millis(20));
            }
            Arc::new(PooledConnection {
                variant,
                id: constructed.fetch_add(1, Ordering::SeqCst),
                creation_thread: format!("{:?}", thread::current().id()),
            })
        });
    }

    (products.build().unwrap(), constructed)
}

// ===== Integration Tests =====

#[test]
fn test_concurrent_first_singleton_constructs_once() {
    let (registry, constructed) = counting_registry(SlotPolicy::PerKind, true);
    let thread_count = 16;
    let barrier = Arc::new(Barrier::new(thread_count));

    let handles: Vec<_> = (0..thread_count)
        .map(|_| {
            let registry = registry.clone();
            let barrier = Arc::clone(&barrier);

            thread::spawn(move || {
                barrier.wait(); // Synchronize start
                registry.resolve_singleton::<dyn Connection>(PRIMARY).unwrap()
            })
        })
        .collect();

    let results: Vec<Arc<dyn Connection>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(constructed.load(Ordering::SeqCst), 1);
    for connection in &results {
        assert!(Arc::ptr_eq(connection, &results[0]));
    }

    // Later resolutions observe the same instance
    let later = registry.resolve_singleton::<dyn Connection>(PRIMARY).unwrap();
    assert!(Arc::ptr_eq(&later, &results[0]));
    assert_eq!(later.id(), 0);
    assert!(!later.creation_thread().is_empty());
}

#[test]
fn test_concurrent_singletons_per_request() {
    let (registry, constructed) = counting_registry(SlotPolicy::PerRequest, true);
    let thread_count = 12;
    let barrier = Arc::new(Barrier::new(thread_count));

    let handles: Vec<_> = (0..thread_count)
        .map(|i| {
            let registry = registry.clone();
            let barrier = Arc::clone(&barrier);
            let variant = if i % 2 == 0 { PRIMARY } else { BACKUP };

            thread::spawn(move || {
                barrier.wait();
                registry.resolve_singleton::<dyn Connection>(variant).unwrap()
            })
        })
        .collect();

    let results: Vec<Arc<dyn Connection>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // One instance per (kind, variant)
    assert_eq!(constructed.load(Ordering::SeqCst), 2);
    let mut ids: Vec<u32> = results.iter().map(|c| c.id()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 2);

    for connection in &results {
        let expected = registry.resolve_singleton::<dyn Connection>(connection.variant()).unwrap();
        assert!(Arc::ptr_eq(connection, &expected));
    }
}

#[test]
fn test_concurrent_per_kind_race_has_one_winner() {
    let (registry, constructed) = counting_registry(SlotPolicy::PerKind, true);
    let thread_count = 8;
    let barrier = Arc::new(Barrier::new(thread_count));

    let handles: Vec<_> = (0..thread_count)
        .map(|i| {
            let registry = registry.clone();
            let barrier = Arc::clone(&barrier);
            let variant = if i % 2 == 0 { PRIMARY } else { BACKUP };

            thread::spawn(move || {
                barrier.wait();
                registry.resolve_singleton::<dyn Connection>(variant).map(|c| c.variant())
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // Whichever variant won the slot, the losers see a mismatch, never a second instance
    assert_eq!(constructed.load(Ordering::SeqCst), 1);
    let winner = results.iter().find_map(|r| r.as_ref().ok().copied()).unwrap();
    for result in &results {
        match result {
            Ok(variant) => assert_eq!(*variant, winner),
            Err(FactoryError::VariantMismatch { found, .. }) => assert_eq!(*found, winner.name()),
            Err(other) => panic!("unexpected error: {}", other),
        }
    }
}

#[test]
fn test_concurrent_transient_resolution() {
    let (registry, constructed) = counting_registry(SlotPolicy::PerKind, false);
    let thread_count = 8;
    let per_thread = 50;
    let barrier = Arc::new(Barrier::new(thread_count));

    let handles: Vec<_> = (0..thread_count)
        .map(|_| {
            let registry = registry.clone();
            let barrier = Arc::clone(&barrier);

            thread::spawn(move || {
                barrier.wait();
                (0..per_thread)
                    .map(|_| registry.resolve_transient::<dyn Connection>(BACKUP).unwrap().id())
                    .collect::<Vec<u32>>()
            })
        })
        .collect();

    let mut ids: Vec<u32> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), thread_count * per_thread);
    assert_eq!(constructed.load(Ordering::SeqCst), (thread_count * per_thread) as u32);
    assert_eq!(registry.singleton_count(), 0);
}

#[test]
fn test_family_handles_across_threads() {
    let (registry, _) = counting_registry(SlotPolicy::PerKind, false);
    let family = registry.resolve_family(BACKUP).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let family = family.clone();
            thread::spawn(move || family.create::<dyn Connection>().unwrap().variant())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), BACKUP);
    }
}
