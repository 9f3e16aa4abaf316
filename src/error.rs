//! Application error types.

use thiserror::Error;

/// Crate-level errors.
///
/// Unreachable paths and unknown node ids are empty results by design, not
/// errors; only the upstream fetch and configuration loading can fail. A
/// fetch failure is scoped to the asset in flight and leaves the previous
/// graph intact.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("failed to load relationships: {0}")]
    Fetch(String),

    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}
