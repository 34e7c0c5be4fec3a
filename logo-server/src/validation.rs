//! Input validation for untrusted data.
//!
//! Generation requests are checked here before any upstream call is made:
//! first the body, then the provider credential.

use logo_core::{GenerationRequest, LogoError, LogoResult};
use serde::Deserialize;

use crate::config::ServerConfig;

/// Message returned when no provider key is configured.
pub const MISSING_API_KEY_MESSAGE: &str = "API key not configured";

/// Raw JSON body of `POST /api/generate`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBody {
    /// Free-text logo description.
    #[serde(default)]
    pub prompt: Option<String>,
    /// Style tag; any string is accepted.
    #[serde(default)]
    pub style: Option<String>,
    /// Color-scheme tag; any string is accepted.
    #[serde(default)]
    pub color_scheme: Option<String>,
}

/// A request that passed validation, with the credential to use for it.
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    /// The generation request.
    pub request: GenerationRequest,
    /// Provider API key.
    pub api_key: String,
}

/// Parse a raw JSON body.
///
/// # Errors
///
/// Returns [`LogoError::InvalidRequest`] if the body is not a JSON object
/// with string-or-null fields.
pub fn parse_body(bytes: &[u8]) -> LogoResult<GenerateBody> {
    serde_json::from_slice(bytes)
        .map_err(|e| LogoError::InvalidRequest(format!("Invalid request body: {e}")))
}

/// Validate a generate request against the current configuration.
///
/// # Errors
///
/// Returns [`LogoError::InvalidRequest`] if the prompt is missing or blank.
/// Returns [`LogoError::Configuration`] if no API key is configured.
pub fn validate_generate(body: GenerateBody, config: &ServerConfig) -> LogoResult<ValidatedRequest> {
    let request = GenerationRequest::new(
        body.prompt.unwrap_or_default(),
        body.style,
        body.color_scheme,
    )?;

    let api_key = config
        .api_key()
        .ok_or_else(|| LogoError::Configuration(MISSING_API_KEY_MESSAGE.to_string()))?;

    Ok(ValidatedRequest {
        request,
        api_key: api_key.to_string(),
    })
}
