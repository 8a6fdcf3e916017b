//! Unified error type.

use thiserror::Error;

/// The error type returned by urlmap's fallible operations.
///
/// Building a URL never fails: an unknown endpoint or an unsatisfiable
/// pattern yields an empty string. This type surfaces the remaining
/// failures: binding a port, misconfiguration, and installing the script
/// route twice.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// The script route was installed twice, either by calling
    /// [`UrlForJs::init_app`](crate::UrlForJs::init_app) again or by
    /// installing a second extension onto the same router.
    #[error("url_for script is already installed (endpoint `{endpoint}`)")]
    AlreadyInstalled { endpoint: String },

    /// A route pattern was rejected by the router (invalid syntax or a
    /// conflict with an existing route).
    #[error("invalid route: {0}")]
    Route(#[from] matchit::InsertError),

    #[error("failed to serialize route table: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid configuration file: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias for urlmap operations.
pub type Result<T> = std::result::Result<T, Error>;
