//! Error types for identification.

use causal_core::GraphError;
use thiserror::Error;

/// Errors surfaced by the identification layer.
///
/// Queries themselves are total; these only come from setting things up.
#[derive(Debug, Error)]
pub enum IdentifyError {
    /// The configuration text is not valid TOML for [`crate::IdentifyConfig`].
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] toml::de::Error),

    /// A configuration value is out of range.
    #[error("invalid value for `{field}`: {message}")]
    Validation { field: String, message: String },

    /// The graph could not be constructed.
    #[error(transparent)]
    Graph(#[from] GraphError),
}
