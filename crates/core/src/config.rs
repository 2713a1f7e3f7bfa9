//! Deployment configuration for the frontend.

use crate::error::ApiError;
use crate::types::ApiType;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which API variant runs and where the remote backend lives.
///
/// Fixed per deployment: switching variants means reconfiguring and
/// restarting, never a runtime call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// The active API variant.
    pub api_type: ApiType,

    /// Base URL of the remote backend. Only consulted by the `real` variant.
    pub api_base: String,

    /// Request timeout in seconds for the remote variant.
    pub timeout_secs: u64,

    /// Override for the cookie jar location. `None` uses the platform
    /// default data directory.
    pub cookie_path: Option<PathBuf>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            api_type: ApiType::Dummy,
            api_base: "http://localhost:8080".to_owned(),
            timeout_secs: 30,
            cookie_path: None,
        }
    }
}

impl WebConfig {
    /// Load configuration from a file, with `CTB_` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ApiError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(config::Environment::with_prefix("CTB"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load configuration from defaults plus `CTB_` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment override cannot be parsed.
    pub fn from_env() -> Result<Self, ApiError> {
        let defaults = Self::default();

        let settings = config::Config::builder()
            .set_default("api_type", defaults.api_type.to_string())?
            .set_default("api_base", defaults.api_base)?
            .set_default("timeout_secs", defaults.timeout_secs)?
            .add_source(config::Environment::with_prefix("CTB"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
