//! Registry configuration.
//!
//! Settings are fixed when the registry is built. They can be set in code,
//! read from environment variables, or (with the `config` feature) parsed
//! from JSON.

use std::env;
#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
use crate::error::{FactoryError, FactoryResult};

/// Environment variable selecting the [`SlotPolicy`]
pub const ENV_SLOT_POLICY: &str = "FERROUS_FACTORY_SLOT_POLICY";
/// Environment variable toggling [`RegistryConfig::verify_on_build`]
pub const ENV_VERIFY_ON_BUILD: &str = "FERROUS_FACTORY_VERIFY_ON_BUILD";

/// How singleton slots are keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum SlotPolicy {
    /// One slot per product kind. The first singleton resolution fixes the
    /// slot's variant; a later singleton request for another variant of the
    /// same kind fails with `VariantMismatch`.
    #[default]
    PerKind,
    /// One slot per (kind, variant) pair.
    PerRequest,
}

impl SlotPolicy {
    /// Parses `per_kind` / `per_request` (case-insensitive, `-` accepted).
    pub fn parse(value: &str) -> FactoryResult<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "per_kind" | "kind" => Ok(SlotPolicy::PerKind),
            "per_request" | "request" => Ok(SlotPolicy::PerRequest),
            _ => Err(FactoryError::TypeMismatch("slot policy must be per_kind or per_request")),
        }
    }
}

/// Configuration applied by `ProductCollection::build`.
///
/// # Examples
///
/// ```
/// use ferrous_factory::{ProductCollection, RegistryConfig, SlotPolicy};
///
/// let config = RegistryConfig::new()
///     .with_slot_policy(SlotPolicy::PerRequest)
///     .with_verify_on_build(true);
///
/// let registry = ProductCollection::with_config(config).build().unwrap();
/// assert_eq!(registry.config().slot_policy, SlotPolicy::PerRequest);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct RegistryConfig {
    /// Keying of singleton slots
    pub slot_policy: SlotPolicy,
    /// Construct one instance per entry during `build` and check its variant tag
    pub verify_on_build: bool,
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot_policy(mut self, policy: SlotPolicy) -> Self {
        self.slot_policy = policy;
        self
    }

    pub fn with_verify_on_build(mut self, verify: bool) -> Self {
        self.verify_on_build = verify;
        self
    }

    /// Reads overrides from the environment on top of the defaults.
    ///
    /// Unset variables keep their default; malformed values are errors.
    pub fn from_env() -> FactoryResult<Self> {
        let mut config = Self::default();

        if let Ok(value) = env::var(ENV_SLOT_POLICY) {
            config.slot_policy = SlotPolicy::parse(&value)?;
        }

        if let Ok(value) = env::var(ENV_VERIFY_ON_BUILD) {
            config.verify_on_build = parse_bool(&value)?;
        }

        Ok(config)
    }

    /// Parses a JSON object, e.g. `{"slot_policy": "per_request"}`.
    #[cfg(feature = "config")]
    pub fn from_json_str(json: &str) -> FactoryResult<Self> {
        serde_json::from_str(json)
            .map_err(|_| FactoryError::TypeMismatch("Invalid JSON configuration"))
    }
}

fn parse_bool(value: &str) -> FactoryResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(FactoryError::TypeMismatch("Config value is not a boolean")),
    }
}
