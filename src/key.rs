//! Identifier types for creation requests.

use std::any::TypeId;
use std::fmt;

/// Name of a family of mutually compatible implementations.
///
/// Variants are plain `Copy` values so they can be declared as constants next
/// to the family that implements them. Two variants are equal when their
/// names are equal.
///
/// # Examples
///
/// ```rust
/// use ferrous_factory::Variant;
///
/// const MAC: Variant = Variant::new("Mac");
/// const WINDOWS: Variant = Variant::new("Windows");
///
/// assert_eq!(MAC.name(), "Mac");
/// assert_ne!(MAC, WINDOWS);
/// assert_eq!(MAC, Variant::new("Mac"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variant(&'static str);

impl Variant {
    /// Creates a variant identifier.
    pub const fn new(name: &'static str) -> Self {
        Variant(name)
    }

    /// The variant's name.
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Role a created object fulfills, identified by its capability type.
///
/// A kind is usually a trait object type such as `dyn Button`. Equality and
/// hashing use the `TypeId` only; the type name is carried for diagnostics.
///
/// # Examples
///
/// ```rust
/// use ferrous_factory::{Product, ProductKind};
///
/// trait Button: Product {}
/// trait Checkbox: Product {}
///
/// let button = ProductKind::of::<dyn Button>();
/// assert_eq!(button, ProductKind::of::<dyn Button>());
/// assert_ne!(button, ProductKind::of::<dyn Checkbox>());
/// assert_eq!(button.short_name(), "Button");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ProductKind {
    id: TypeId,
    name: &'static str,
}

impl ProductKind {
    /// Kind for the capability type `T`.
    #[inline(always)]
    pub fn of<T: ?Sized + 'static>() -> Self {
        ProductKind {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The full type name, e.g. `dyn my_app::gui::Button`.
    pub fn display_name(&self) -> &'static str {
        self.name
    }

    /// The type name without `dyn` and module path, e.g. `Button`.
    ///
    /// Generic arguments and extra bounds are dropped, so
    /// `dyn app::Handler<app::Msg> + Send` is `Handler`.
    pub fn short_name(&self) -> &'static str {
        let name = self.name.strip_prefix("dyn ").unwrap_or(self.name);
        let head = match name.find(|c: char| matches!(c, '<' | '(' | ' ')) {
            Some(0) | None => name,
            Some(end) => &name[..end],
        };
        head.rsplit("::").next().unwrap_or(head)
    }

    /// Whether `name` refers to this kind, by full or short name.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name == name || self.short_name() == name
    }

    pub(crate) fn type_id(&self) -> TypeId {
        self.id
    }
}

impl PartialEq for ProductKind {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ProductKind {}

impl std::hash::Hash for ProductKind {
    #[inline(always)]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// Ordering by name keeps descriptor listings stable across runs
impl PartialOrd for ProductKind {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ProductKind {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.name.cmp(other.name).then_with(|| self.id.cmp(&other.id))
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// The (kind, variant) pair submitted to the registry.
///
/// # Examples
///
/// ```rust
/// use ferrous_factory::{CreationRequest, Product, Variant};
///
/// trait Button: Product {}
/// const MAC: Variant = Variant::new("Mac");
///
/// let request = CreationRequest::of::<dyn Button>(MAC);
/// assert_eq!(request.variant, MAC);
/// assert_eq!(request.kind.short_name(), "Button");
/// assert_eq!(request.to_string(), "Button@Mac");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CreationRequest {
    pub kind: ProductKind,
    pub variant: Variant,
}

impl CreationRequest {
    pub fn new(kind: ProductKind, variant: Variant) -> Self {
        Self { kind, variant }
    }

    /// Request for capability `T` under `variant`.
    #[inline(always)]
    pub fn of<T: ?Sized + 'static>(variant: Variant) -> Self {
        Self::new(ProductKind::of::<T>(), variant)
    }
}

impl fmt::Display for CreationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.kind, self.variant)
    }
}
