//! Upstream generation capabilities.
//!
//! Each capability is a small async trait so that strategies can run against
//! the real provider client or against in-process stubs.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Errors raised by an upstream provider call.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The configured endpoint could not be turned into a request URL.
    #[error("invalid provider URL: {0}")]
    InvalidUrl(String),
    /// HTTP layer failed (connection, timeout, etc.).
    #[error("provider HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// JSON parsing failed unexpectedly.
    #[error("failed to parse provider payload: {0}")]
    Json(#[from] serde_json::Error),
    /// The provider answered with a non-success status.
    #[error("provider returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message reported by the provider, or the raw body.
        message: String,
    },
    /// The response did not match the expected structure.
    #[error("unexpected provider response: {0}")]
    UnexpectedResponse(String),
}

impl ProviderError {
    /// Returns true if the call never produced an HTTP response in time.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}

/// Fixed sampling parameters for direct raster synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterParams {
    /// Number of images requested.
    pub sample_count: u32,
    /// Aspect ratio, e.g. `1:1`.
    pub aspect_ratio: String,
    /// Content safety tier.
    pub safety_filter_level: String,
    /// Whether people may be depicted.
    pub person_generation: String,
}

impl Default for RasterParams {
    /// One square image with a permissive safety tier.
    fn default() -> Self {
        Self {
            sample_count: 1,
            aspect_ratio: "1:1".to_string(),
            safety_filter_level: "block_few".to_string(),
            person_generation: "allow_adult".to_string(),
        }
    }
}

/// One synthesized raster image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterPayload {
    /// Image bytes, base64-encoded by the provider. May be empty.
    pub base64_bytes: String,
}

/// Output modality requested from a multimodal model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Modality {
    /// Inline image data.
    Image,
    /// Plain text.
    Text,
}

/// One part of a multimodal response, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    /// Inline, base64-encoded media.
    InlineImage {
        /// Declared MIME type.
        mime_type: String,
        /// Base64 payload.
        data: String,
    },
    /// Text content.
    Text(String),
}

/// Prompt in, zero or more raster images out.
#[async_trait]
pub trait RasterSynthesis: Send + Sync {
    /// Synthesize images for `prompt`.
    async fn synthesize(
        &self,
        prompt: &str,
        params: &RasterParams,
    ) -> Result<Vec<RasterPayload>, ProviderError>;
}

/// Prompt in, ordered list of image and text parts out.
#[async_trait]
pub trait MultimodalGeneration: Send + Sync {
    /// Generate content parts for `prompt` in the requested modalities.
    async fn generate_parts(
        &self,
        prompt: &str,
        modalities: &[Modality],
    ) -> Result<Vec<ContentPart>, ProviderError>;
}

/// Prompt in, free text out.
#[async_trait]
pub trait TextGeneration: Send + Sync {
    /// Generate text for `prompt`.
    ///
    /// Implementations return an error when the provider produced no text
    /// at all, so callers never see a silent empty answer.
    async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError>;
}
