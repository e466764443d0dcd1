/// Registry configuration from code, environment and JSON

use ferrous_factory::config::{ENV_SLOT_POLICY, ENV_VERIFY_ON_BUILD};
use ferrous_factory::families::gui::{Button, MacFamily, WindowsFamily, MAC, WINDOWS};
use ferrous_factory::{
    FactoryError, ProductCollection, ProductCollectionExt, RegistryConfig, Resolver, SlotPolicy,
};
use serial_test::serial;
use std::env;

fn clear_env() {
    env::remove_var(ENV_SLOT_POLICY);
    env::remove_var(ENV_VERIFY_ON_BUILD);
}

#[test]
#[serial]
fn from_env_defaults_when_unset() {
    clear_env();
    assert_eq!(RegistryConfig::from_env().unwrap(), RegistryConfig::default());
}

#[test]
#[serial]
fn from_env_reads_overrides() {
    clear_env();
    env::set_var(ENV_SLOT_POLICY, "per-request");
    env::set_var(ENV_VERIFY_ON_BUILD, "true");

    let config = RegistryConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.slot_policy, SlotPolicy::PerRequest);
    assert!(config.verify_on_build);
}

#[test]
#[serial]
fn from_env_rejects_malformed_values() {
    clear_env();
    env::set_var(ENV_SLOT_POLICY, "per_thread");
    let policy = RegistryConfig::from_env();
    clear_env();
    assert!(matches!(policy, Err(FactoryError::TypeMismatch(_))));

    env::set_var(ENV_VERIFY_ON_BUILD, "sometimes");
    let verify = RegistryConfig::from_env();
    clear_env();
    assert!(verify.is_err());
}

#[test]
#[serial]
fn env_config_drives_the_registry() {
    clear_env();
    env::set_var(ENV_SLOT_POLICY, "per_request");
    let config = RegistryConfig::from_env().unwrap();
    clear_env();

    let registry = ProductCollection::with_config(config)
        .with_family(MacFamily)
        .with_family(WindowsFamily)
        .build()
        .unwrap();

    assert!(registry.resolve_singleton::<dyn Button>(MAC).is_ok());
    assert!(registry.resolve_singleton::<dyn Button>(WINDOWS).is_ok());
    assert_eq!(registry.config().slot_policy, SlotPolicy::PerRequest);
}

#[test]
fn configure_replaces_config_before_build() {
    let mut products = ProductCollection::new();
    products.configure(RegistryConfig::new().with_verify_on_build(true));
    assert!(products.config().verify_on_build);
}

#[cfg(feature = "config")]
mod json {
    use super::*;

    #[test]
    fn from_json_str_parses_partial_objects() {
        let config = RegistryConfig::from_json_str(r#"{"slot_policy": "per_request"}"#).unwrap();
        assert_eq!(config.slot_policy, SlotPolicy::PerRequest);
        assert!(!config.verify_on_build);

        let config = RegistryConfig::from_json_str("{}").unwrap();
        assert_eq!(config, RegistryConfig::default());
    }

    #[test]
    fn from_json_str_rejects_unknown_policy() {
        assert!(RegistryConfig::from_json_str(r#"{"slot_policy": "global"}"#).is_err());
        assert!(RegistryConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn config_round_trips_through_serde() {
        let config = RegistryConfig::new()
            .with_slot_policy(SlotPolicy::PerRequest)
            .with_verify_on_build(true);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"slot_policy":"per_request","verify_on_build":true}"#);
    }
}
