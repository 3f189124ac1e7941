//! CLI error types.

use mdstyle_config::ConfigError;
use mdstyle_preview::WatchError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Watch(#[from] WatchError),

    #[error("Failed to serialize tree: {0}")]
    Json(#[from] serde_json::Error),
}
