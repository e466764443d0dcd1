//! # ferrous-factory
//!
//! Polymorphic object creation for Rust: abstract factory, factory method and
//! singleton unified behind one closed creation registry.
//!
//! ## Features
//!
//! - **Variant families**: one implementation per product kind, all tagged
//!   with the variant that produced them
//! - **Closed, total registry**: missing (kind, variant) constructors are
//!   reported when the registry is built, never at call time
//! - **Lifecycle modes**: fresh instance per call, or one lazily created
//!   instance shared for the registry's whole life
//! - **Thread-safe singletons**: concurrent first-time resolvers construct
//!   exactly one instance
//! - **Factory-method creators**: template logic written once against a
//!   capability trait, extended by adding creators
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_factory::{Product, ProductCollection, Variant};
//! use std::sync::Arc;
//!
//! const MAC: Variant = Variant::new("Mac");
//! const WINDOWS: Variant = Variant::new("Windows");
//!
//! // Capability every variant must provide
//! trait Button: Product {
//!     fn render(&self) -> String;
//! }
//!
//! struct MacButton;
//! impl Product for MacButton {
//!     fn variant(&self) -> Variant { MAC }
//! }
//! impl Button for MacButton {
//!     fn render(&self) -> String { "[Mac Button]".to_string() }
//! }
//!
//! struct WindowsButton;
//! impl Product for WindowsButton {
//!     fn variant(&self) -> Variant { WINDOWS }
//! }
//! impl Button for WindowsButton {
//!     fn render(&self) -> String { "[Windows Button]".to_string() }
//! }
//!
//! // Register one constructor per (kind, variant) pair
//! let mut products = ProductCollection::new();
//! products
//!     .add_product::<dyn Button, _>(MAC, || Arc::new(MacButton))
//!     .add_product::<dyn Button, _>(WINDOWS, || Arc::new(WindowsButton));
//!
//! // Build and pick a family at runtime
//! let registry = products.build().unwrap();
//! let family = registry.resolve_family(WINDOWS).unwrap();
//! assert_eq!(family.create::<dyn Button>().unwrap().render(), "[Windows Button]");
//! ```
//!
//! ## Lifecycle Modes
//!
//! - **Transient**: the constructor runs on every resolution
//! - **Singleton**: the first resolution constructs and caches; every later
//!   one returns the cached instance
//!
//! ```rust
//! use ferrous_factory::{Lifetime, Resolver};
//! use ferrous_factory::families::gui::{self, Button, MAC};
//! use std::sync::Arc;
//!
//! let registry = gui::registry().unwrap();
//!
//! let a = registry.resolve::<dyn Button>(MAC, Lifetime::Singleton).unwrap();
//! let b = registry.resolve::<dyn Button>(MAC, Lifetime::Singleton).unwrap();
//! assert!(Arc::ptr_eq(&a, &b));
//!
//! let c = registry.resolve::<dyn Button>(MAC, Lifetime::Transient).unwrap();
//! assert!(!Arc::ptr_eq(&a, &c));
//! ```
//!
//! ## Collaboration
//!
//! Products may accept other products as collaborators. Mixing variants is a
//! caller error and is rejected with [`FactoryError::VariantMismatch`]; see
//! [`ensure_compatible`] and [`families::reference`].

// Module declarations
pub mod collection;
pub mod config;
pub mod creator;
pub mod descriptors;
pub mod error;
pub mod families;
pub mod key;
pub mod lifetime;
pub mod observer;
pub mod provider;
pub mod traits;
pub mod validation;

// Internal modules
mod internal;
mod registration;

// Re-export core types
pub use collection::{FamilyRegistrar, ProductCollection, ProductCollectionExt, VariantFamily};
pub use config::{RegistryConfig, SlotPolicy};
pub use creator::{Creator, FnCreator};
pub use descriptors::ProductDescriptor;
pub use error::{FactoryError, FactoryResult};
pub use key::{CreationRequest, ProductKind, Variant};
pub use lifetime::Lifetime;
pub use observer::{FactoryObserver, LoggingObserver, MetricsObserver};
pub use provider::{AnyProduct, CreationRegistry, Family, FamilyCreator, KindCreator};
pub use traits::{ensure_compatible, Product, Resolver, ResolverCore};
pub use validation::ValidationReport;
