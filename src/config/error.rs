use std::path::PathBuf;

use crate::storage::StorageError;

/// Errors that can occur while resolving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this application.
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The API base URL does not parse.
    #[error("invalid API base URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The API base URL parses but is not HTTP(S).
    #[error("API base URL must use http or https, got {0:?}")]
    UnsupportedScheme(String),

    /// The API base URL carries a query or fragment, which endpoint paths
    /// cannot be appended to.
    #[error("API base URL must not have a query or fragment: {0:?}")]
    BaseUrlSuffix(String),

    /// `success_message_secs` is above [`MAX_SUCCESS_MESSAGE_SECS`](super::MAX_SUCCESS_MESSAGE_SECS).
    #[error("success_message_secs must be at most {max}, got {secs}")]
    SuccessDelayTooLong { secs: u64, max: u64 },

    /// No default data directory is available.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
