//! Error types

use crate::fold::FoldState;

/// Errors raised by the fold animator and its configuration.
#[derive(Debug, thiserror::Error)]
pub enum FoldError {
    /// Fold count or duration is zero, or an easing curve is malformed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The container is missing from the tree or measures zero rows.
    #[error("container '{0}' is not attached or has zero height")]
    NotAttached(String),

    /// An open/close cycle is still pending on this instance.
    #[error("animation already in progress (state: {0})")]
    AnimationInProgress(FoldState),

    /// A JSON configuration document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
