//! Generic two-product families with collaboration.
//!
//! [`ProductB::collaborate`] accepts any [`ProductA`], but only a peer from
//! the same variant gives a meaningful result. Peers from another variant are
//! rejected with `VariantMismatch`.
//!
//! ```
//! use ferrous_factory::FactoryError;
//! use ferrous_factory::families::reference::{self, ProductA, ProductB, V1, V2};
//!
//! let registry = reference::registry().unwrap();
//! let v1 = registry.resolve_family(V1).unwrap();
//! let v2 = registry.resolve_family(V2).unwrap();
//!
//! let a1 = v1.create::<dyn ProductA>().unwrap();
//! let b1 = v1.create::<dyn ProductB>().unwrap();
//! assert_eq!(
//!     b1.collaborate(a1.as_ref()).unwrap(),
//!     "The result of B1 collaborating with (The result of product A1.)"
//! );
//!
//! let a2 = v2.create::<dyn ProductA>().unwrap();
//! assert_eq!(
//!     b1.collaborate(a2.as_ref()),
//!     Err(FactoryError::VariantMismatch { expected: "V1", found: "V2" })
//! );
//! ```

use std::sync::Arc;

use crate::{
    ensure_compatible, CreationRegistry, FactoryResult, FamilyRegistrar, Product, ProductCollection,
    Variant, VariantFamily,
};

pub const V1: Variant = Variant::new("V1");
pub const V2: Variant = Variant::new("V2");

pub trait ProductA: Product {
    fn useful_function_a(&self) -> String;
}

pub trait ProductB: Product {
    fn useful_function_b(&self) -> String;

    /// Works with a peer product from the same variant.
    ///
    /// # Errors
    ///
    /// `VariantMismatch` if `peer` was created under another variant.
    fn collaborate(&self, peer: &dyn ProductA) -> FactoryResult<String>;
}

pub struct ProductA1;

impl Product for ProductA1 {
    fn variant(&self) -> Variant {
        V1
    }
}

impl ProductA for ProductA1 {
    fn useful_function_a(&self) -> String {
        "The result of product A1.".to_string()
    }
}

pub struct ProductA2;

impl Product for ProductA2 {
    fn variant(&self) -> Variant {
        V2
    }
}

impl ProductA for ProductA2 {
    fn useful_function_a(&self) -> String {
        "The result of product A2.".to_string()
    }
}

pub struct ProductB1;

impl Product for ProductB1 {
    fn variant(&self) -> Variant {
        V1
    }
}

impl ProductB for ProductB1 {
    fn useful_function_b(&self) -> String {
        "The result of product B1.".to_string()
    }

    fn collaborate(&self, peer: &dyn ProductA) -> FactoryResult<String> {
        ensure_compatible(self, peer)?;
        Ok(format!("The result of B1 collaborating with ({})", peer.useful_function_a()))
    }
}

pub struct ProductB2;

impl Product for ProductB2 {
    fn variant(&self) -> Variant {
        V2
    }
}

impl ProductB for ProductB2 {
    fn useful_function_b(&self) -> String {
        "The result of product B2.".to_string()
    }

    fn collaborate(&self, peer: &dyn ProductA) -> FactoryResult<String> {
        ensure_compatible(self, peer)?;
        Ok(format!("The result of B2 collaborating with ({})", peer.useful_function_a()))
    }
}

pub struct Variant1;

impl VariantFamily for Variant1 {
    fn variant(&self) -> Variant {
        V1
    }

    fn register(self, products: &mut FamilyRegistrar<'_>) {
        products
            .add::<dyn ProductA, _>(|| Arc::new(ProductA1))
            .add::<dyn ProductB, _>(|| Arc::new(ProductB1));
    }
}

pub struct Variant2;

impl VariantFamily for Variant2 {
    fn variant(&self) -> Variant {
        V2
    }

    fn register(self, products: &mut FamilyRegistrar<'_>) {
        products
            .add::<dyn ProductA, _>(|| Arc::new(ProductA2))
            .add::<dyn ProductB, _>(|| Arc::new(ProductB2));
    }
}

pub fn registry() -> FactoryResult<CreationRegistry> {
    let mut products = ProductCollection::new();
    products.add_family(Variant1).add_family(Variant2);
    products.build()
}
