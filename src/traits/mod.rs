//! Core traits for products and resolution.

mod product;
mod resolver;

pub use product::{Product, ensure_compatible};
pub use resolver::{Resolver, ResolverCore};
