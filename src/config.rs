//! Extension configuration.
//!
//! Every field has a default, so an empty TOML document or an empty
//! environment both yield a working config:
//!
//! ```toml
//! path = "/static/url_for.js"
//! endpoint = "url_for_js"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default mount path of the script.
pub const DEFAULT_PATH: &str = "/flask_util.js";

/// Endpoint name the script route gets when none is configured.
pub const DEFAULT_ENDPOINT: &str = "flask_util_js";

/// Environment variable overriding [`Config::path`].
pub const PATH_ENV: &str = "URL_FOR_JS_PATH";

/// Environment variable overriding [`Config::endpoint`].
pub const ENDPOINT_ENV: &str = "URL_FOR_JS_ENDPOINT";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Route pattern the script is served at.
    pub path: String,

    /// Endpoint name of the script route. `None` means
    /// [`DEFAULT_ENDPOINT`].
    pub endpoint: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self { path: DEFAULT_PATH.to_owned(), endpoint: None }
    }
}

impl Config {
    /// Reads [`PATH_ENV`] and [`ENDPOINT_ENV`], falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(path) = std::env::var(PATH_ENV) {
            config.path = path;
        }
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            config.endpoint = Some(endpoint);
        }
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document with optional `path` and `endpoint` keys.
    pub fn from_toml(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// The endpoint name the script route is registered under.
    pub fn endpoint_name(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.path.starts_with('/') {
            return Err(Error::InvalidConfig(format!(
                "path `{}` must start with `/`",
                self.path
            )));
        }
        if self.endpoint.as_deref().is_some_and(|e| e.trim().is_empty()) {
            return Err(Error::InvalidConfig("endpoint must not be empty".to_owned()));
        }
        Ok(())
    }
}
