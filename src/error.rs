//! Error types for the creation registry.

use std::fmt;

/// Creation errors
///
/// Every variant describes a caller error: a request outside the configured
/// closed set, a family missing a constructor, or products from different
/// variants being combined. None of them are transient, so the registry never
/// retries and never swallows them; they surface synchronously at the call
/// that caused them.
///
/// # Examples
///
/// ```rust
/// use ferrous_factory::{FactoryError, ProductCollection, Variant};
///
/// const LINUX: Variant = Variant::new("Linux");
///
/// let registry = ProductCollection::new().build().unwrap();
/// match registry.resolve_family(LINUX) {
///     Err(FactoryError::UnknownVariant(name)) => assert_eq!(name, "Linux"),
///     _ => unreachable!(),
/// }
/// ```
///
/// ```rust
/// use ferrous_factory::FactoryError;
///
/// let unknown_kind = FactoryError::UnknownKind("Slider".to_string());
/// let mismatch = FactoryError::VariantMismatch { expected: "Mac", found: "Windows" };
/// let circular = FactoryError::Circular(vec!["Button@Mac".into(), "Button@Windows".into()]);
///
/// println!("Error: {}", unknown_kind);
/// println!("Error: {}", mismatch);
/// println!("Error: {}", circular);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactoryError {
    /// Requested variant is not among the declared variants
    UnknownVariant(String),
    /// Requested product kind is not among the declared kinds
    UnknownKind(String),
    /// Products (or a cached singleton) from different variants were combined
    VariantMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// A declared variant has no constructor for a declared kind
    IncompleteFamily {
        variant: &'static str,
        kind: &'static str,
    },
    /// Stored instance could not be downcast to the requested capability
    TypeMismatch(&'static str),
    /// A singleton constructor re-entered a slot it is still filling (includes path)
    Circular(Vec<String>),
}

impl fmt::Display for FactoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactoryError::UnknownVariant(name) => write!(f, "Unknown variant: {}", name),
            FactoryError::UnknownKind(name) => write!(f, "Unknown product kind: {}", name),
            FactoryError::VariantMismatch { expected, found } => {
                write!(f, "Variant mismatch: expected {}, found {}", expected, found)
            }
            FactoryError::IncompleteFamily { variant, kind } => {
                write!(f, "Incomplete family: variant {} has no constructor for {}", variant, kind)
            }
            FactoryError::TypeMismatch(name) => write!(f, "Type mismatch for: {}", name),
            FactoryError::Circular(path) => {
                write!(f, "Circular singleton initialization: {}", path.join(" -> "))
            }
        }
    }
}

impl std::error::Error for FactoryError {}

/// Result type for creation operations
///
/// A convenience alias for `Result<T, FactoryError>` used throughout the crate.
///
/// # Examples
///
/// ```rust
/// use ferrous_factory::{FactoryResult, FactoryError};
///
/// fn pick_theme(name: &str) -> FactoryResult<&'static str> {
///     match name {
///         "Mac" => Ok("Mac"),
///         other => Err(FactoryError::UnknownVariant(other.to_string())),
///     }
/// }
///
/// assert!(pick_theme("Mac").is_ok());
/// assert!(pick_theme("Amiga").is_err());
/// ```
pub type FactoryResult<T> = Result<T, FactoryError>;
