//! Error types for logo generation.

use thiserror::Error;

/// Result type for logo generation operations.
pub type LogoResult<T> = Result<T, LogoError>;

/// Errors that can reach a caller of the generation pipeline.
///
/// Intermediate upstream misses never appear here; they are absorbed by the
/// strategy chain. Only validation, configuration and last-resort failures do.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LogoError {
    /// The request was missing a required field or had a blank description.
    #[error("{0}")]
    InvalidRequest(String),

    /// The service is missing configuration it needs (e.g. the provider key).
    #[error("{0}")]
    Configuration(String),

    /// The last-resort upstream call failed and no fallback remains.
    #[error("Failed to generate logo: {0}")]
    TerminalUpstream(String),

    /// A data URI could not be built or parsed.
    #[error("invalid data URI: {0}")]
    DataUri(String),
}

impl LogoError {
    /// Short label used for metrics and logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::Configuration(_) => "configuration",
            Self::TerminalUpstream(_) => "upstream",
            Self::DataUri(_) => "data_uri",
        }
    }
}
