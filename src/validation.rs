//! Build-time validation of the creation table.
//!
//! The registry is closed and total: every declared variant must provide a
//! constructor for every declared kind. Holes are reported here, at startup,
//! so that no resolution call can discover them later.

use crate::error::{FactoryError, FactoryResult};
use crate::key::{CreationRequest, Variant};
use crate::registration::Registry;

/// Outcome of validating a product collection.
///
/// # Examples
///
/// ```
/// use ferrous_factory::{FactoryError, Product, ProductCollection, Variant};
/// use std::sync::Arc;
///
/// const MAC: Variant = Variant::new("Mac");
/// const WINDOWS: Variant = Variant::new("Windows");
///
/// trait Button: Product {}
/// struct Tagged(Variant);
/// impl Product for Tagged {
///     fn variant(&self) -> Variant { self.0 }
/// }
/// impl Button for Tagged {}
///
/// let mut products = ProductCollection::new();
/// products.add_product::<dyn Button, _>(MAC, || Arc::new(Tagged(MAC)));
/// products.declare_variant(WINDOWS);
///
/// let report = products.validate();
/// assert!(!report.is_complete());
/// assert_eq!(report.missing.len(), 1);
/// assert!(matches!(
///     report.into_result(),
///     Err(FactoryError::IncompleteFamily { variant: "Windows", kind: _ })
/// ));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Declared pairs with no constructor, sorted by kind then variant
    pub missing: Vec<CreationRequest>,
    /// Entries whose instance reported a different variant than registered
    /// (only filled when constructors were exercised)
    pub mislabeled: Vec<(CreationRequest, Variant)>,
}

impl ValidationReport {
    pub(crate) fn check_totality(registry: &Registry) -> Self {
        Self {
            missing: registry.missing_entries(),
            mislabeled: Vec::new(),
        }
    }

    /// Runs every constructor once and compares the reported variant tag.
    pub(crate) fn check_tags(mut self, registry: &Registry) -> Self {
        for (request, registration) in registry.sorted_entries() {
            let (_, reported) = (registration.ctor)();
            if reported != request.variant {
                self.mislabeled.push((*request, reported));
            }
        }
        self
    }

    /// True when the table is total and no tag mismatches were found.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.mislabeled.is_empty()
    }

    /// Converts the first problem into an error.
    pub fn into_result(self) -> FactoryResult<()> {
        if let Some(request) = self.missing.first() {
            return Err(FactoryError::IncompleteFamily {
                variant: request.variant.name(),
                kind: request.kind.display_name(),
            });
        }
        if let Some((request, reported)) = self.mislabeled.first() {
            return Err(FactoryError::VariantMismatch {
                expected: request.variant.name(),
                found: reported.name(),
            });
        }
        Ok(())
    }
}
