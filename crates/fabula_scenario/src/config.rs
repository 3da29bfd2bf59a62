//! Validation configuration.
//!
//! Settings are layered with the `config` crate: built-in defaults, then an
//! optional TOML file, then `FABULA_`-prefixed environment variables using
//! `__` to separate nested keys (`FABULA_LIMITS__MAX_PATHS=100`).

use derive_getters::Getters;
use fabula_error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, instrument};

/// Prefix of environment variables read by [`ValidationConfig::load`].
pub const ENV_PREFIX: &str = "FABULA";

/// What to do when two scenes share an identifier.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DuplicatePolicy {
    /// The later scene replaces the earlier one, keeping the earlier position
    #[default]
    Overwrite,
    /// Duplicates fail the scene-schema stage
    Reject,
}

/// Ceilings on exhaustive path enumeration.
///
/// Enumeration is unmemoized and can grow exponentially with branching and
/// shared sub-targets; exceeding any ceiling yields a `ResourceExceeded` error.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Getters,
    derive_builder::Builder,
)]
#[builder(default)]
#[serde(default)]
pub struct EnumerationLimits {
    /// Maximum number of recorded paths
    max_paths: usize,
    /// Maximum number of scenes on a single path
    max_depth: usize,
    /// Maximum number of traversal frames expanded
    max_visits: usize,
}

impl Default for EnumerationLimits {
    fn default() -> Self {
        Self {
            max_paths: 10_000,
            max_depth: 512,
            max_visits: 1_000_000,
        }
    }
}

impl EnumerationLimits {
    /// Limits that never trigger, matching unbounded enumeration.
    pub fn unbounded() -> Self {
        Self {
            max_paths: usize::MAX,
            max_depth: usize::MAX,
            max_visits: usize::MAX,
        }
    }
}

/// Configuration for scenario validation.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(default, setter(into))]
#[serde(default)]
pub struct ValidationConfig {
    /// Preferred root scene for depth checking and path enumeration
    start_scene: String,
    /// Handling of duplicate scene identifiers
    duplicate_policy: DuplicatePolicy,
    /// Path enumeration ceilings
    limits: EnumerationLimits,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            start_scene: "start".to_string(),
            duplicate_policy: DuplicatePolicy::default(),
            limits: EnumerationLimits::default(),
        }
    }
}

impl ValidationConfig {
    /// Loads configuration from defaults, an optional TOML file, and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_environment(path, None)
    }

    /// Loads configuration with an explicit environment instead of the process one.
    ///
    /// `environment` maps variable names (e.g. `FABULA_START_SCENE`) to values.
    #[instrument(skip(environment))]
    pub fn load_with_environment(
        path: Option<&Path>,
        environment: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let defaults = config::Config::try_from(&Self::default())
            .map_err(|e| ConfigError::new(format!("Failed to encode defaults: {}", e)))?;

        let mut builder = config::Config::builder().add_source(defaults);

        if let Some(path) = path {
            debug!(path = %path.display(), "Adding configuration file");
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(environment.map(|vars| vars.into_iter().collect())),
        );

        let loaded: Self = builder
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| ConfigError::new(format!("Failed to load configuration: {}", e)))?;

        loaded.check()?;
        debug!(?loaded, "Configuration loaded");
        Ok(loaded)
    }

    /// Rejects settings that would make every validation fail.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.start_scene.trim().is_empty() {
            return Err(ConfigError::new("start_scene must not be empty"));
        }

        let limits = [
            ("max_paths", self.limits.max_paths),
            ("max_depth", self.limits.max_depth),
            ("max_visits", self.limits.max_visits),
        ];
        if let Some((name, _)) = limits.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::new(format!("limits.{} must be positive", name)));
        }

        Ok(())
    }
}
