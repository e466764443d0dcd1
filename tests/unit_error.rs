/// Unit tests for FactoryError and FactoryResult types

use ferrous_factory::{FactoryError, FactoryResult};
use std::error::Error;

#[test]
fn test_error_display_unknown_variant() {
    let error = FactoryError::UnknownVariant("Linux".to_string());
    assert_eq!(error.to_string(), "Unknown variant: Linux");
}

#[test]
fn test_error_display_unknown_kind() {
    let error = FactoryError::UnknownKind("Slider".to_string());
    assert_eq!(error.to_string(), "Unknown product kind: Slider");
}

#[test]
fn test_error_display_variant_mismatch() {
    let error = FactoryError::VariantMismatch { expected: "Mac", found: "Windows" };
    let display_str = error.to_string();
    assert_eq!(display_str, "Variant mismatch: expected Mac, found Windows");
    assert!(display_str.find("Mac") < display_str.find("Windows"));
}

#[test]
fn test_error_display_incomplete_family() {
    let error = FactoryError::IncompleteFamily { variant: "Windows", kind: "dyn app::Checkbox" };
    assert_eq!(
        error.to_string(),
        "Incomplete family: variant Windows has no constructor for dyn app::Checkbox"
    );
}

#[test]
fn test_error_display_type_mismatch() {
    let error = FactoryError::TypeMismatch("dyn app::Button");
    assert_eq!(error.to_string(), "Type mismatch for: dyn app::Button");
}

#[test]
fn test_error_display_circular() {
    let error = FactoryError::Circular(vec!["Button@Mac".to_string(), "Button@Windows".to_string()]);
    assert_eq!(
        error.to_string(),
        "Circular singleton initialization: Button@Mac -> Button@Windows"
    );
}

#[test]
fn test_error_is_std_error() {
    let error: Box<dyn Error> = Box::new(FactoryError::UnknownKind("Slider".to_string()));
    assert!(error.source().is_none());
    assert_eq!(error.to_string(), "Unknown product kind: Slider");
}

#[test]
fn test_error_equality_and_clone() {
    let a = FactoryError::VariantMismatch { expected: "V1", found: "V2" };
    assert_eq!(a.clone(), a);
    assert_ne!(a, FactoryError::VariantMismatch { expected: "V2", found: "V1" });
    assert_ne!(
        FactoryError::UnknownKind("X".to_string()),
        FactoryError::UnknownVariant("X".to_string())
    );
}

#[test]
fn test_result_alias_propagates() {
    fn inner() -> FactoryResult<u8> {
        Err(FactoryError::UnknownVariant("Amiga".to_string()))
    }

    fn outer() -> FactoryResult<u8> {
        let value = inner()?;
        Ok(value + 1)
    }

    assert_eq!(outer(), Err(FactoryError::UnknownVariant("Amiga".to_string())));
}
