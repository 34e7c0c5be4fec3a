//! Client for the Generative Language REST API.
//!
//! One client implements all three generation capabilities:
//! `:predict` for direct image synthesis and `:generateContent` for both
//! multimodal and plain-text generation.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::GeminiSettings;
use crate::provider::{
    ContentPart, Modality, MultimodalGeneration, ProviderError, RasterParams, RasterPayload,
    RasterSynthesis, TextGeneration,
};

const API_VERSION: &str = "v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";
/// Longest raw body quoted in error messages.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Asynchronous Generative Language API client.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<InnerClient>,
}

struct InnerClient {
    http: Client,
    base_url: Url,
    api_key: String,
    settings: GeminiSettings,
}

impl GeminiClient {
    /// Build an HTTP client bounded by the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the HTTP client fails to build.
    pub fn build_http(settings: &GeminiSettings) -> Result<Client, ProviderError> {
        Ok(Client::builder()
            .user_agent(concat!("saorsa-logo/", env!("CARGO_PKG_VERSION")))
            .timeout(settings.request_timeout())
            .build()?)
    }

    /// Create a client with its own HTTP connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidUrl`] if the base URL is malformed.
    /// Returns [`ProviderError::Http`] if the HTTP client fails to build.
    pub fn new(settings: &GeminiSettings, api_key: impl Into<String>) -> Result<Self, ProviderError> {
        Self::with_http(Self::build_http(settings)?, settings, api_key)
    }

    /// Create a client that shares an existing HTTP connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidUrl`] if the base URL is malformed.
    pub fn with_http(
        http: Client,
        settings: &GeminiSettings,
        api_key: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let mut base_url =
            Url::parse(&settings.base_url).map_err(|e| ProviderError::InvalidUrl(e.to_string()))?;

        // Url::join replaces the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            inner: Arc::new(InnerClient {
                http,
                base_url,
                api_key: api_key.into(),
                settings: settings.clone(),
            }),
        })
    }

    fn model_url(&self, model: &str, method: &str) -> Result<Url, ProviderError> {
        self.inner
            .base_url
            .join(&format!("{API_VERSION}/models/{model}:{method}"))
            .map_err(|e| ProviderError::InvalidUrl(e.to_string()))
    }

    async fn post_json<B, R>(&self, url: Url, body: &B) -> Result<R, ProviderError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .inner
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.inner.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        Ok(serde_json::from_str(&text)?)
    }

    async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
        modalities: Option<&[Modality]>,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: modalities.map(|m| GenerationConfig {
                response_modalities: m.to_vec(),
            }),
        };

        let url = self.model_url(model, "generateContent")?;
        self.post_json(url, &request).await
    }
}

/// Pull `error.message` out of an error body, or quote the body itself.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.chars().take(MAX_ERROR_BODY_CHARS).collect())
}

#[async_trait]
impl RasterSynthesis for GeminiClient {
    #[tracing::instrument(name = "gemini_predict", skip_all, fields(model = %self.inner.settings.raster_model))]
    async fn synthesize(
        &self,
        prompt: &str,
        params: &RasterParams,
    ) -> Result<Vec<RasterPayload>, ProviderError> {
        let request = PredictRequest {
            instances: vec![PredictInstance { prompt }],
            parameters: params,
        };

        let url = self.model_url(&self.inner.settings.raster_model, "predict")?;
        let response: PredictResponse = self.post_json(url, &request).await?;

        Ok(response
            .predictions
            .into_iter()
            .map(|p| RasterPayload {
                base64_bytes: p.bytes_base64_encoded.unwrap_or_default(),
            })
            .collect())
    }
}

#[async_trait]
impl MultimodalGeneration for GeminiClient {
    #[tracing::instrument(name = "gemini_multimodal", skip_all, fields(model = %self.inner.settings.multimodal_model))]
    async fn generate_parts(
        &self,
        prompt: &str,
        modalities: &[Modality],
    ) -> Result<Vec<ContentPart>, ProviderError> {
        let response = self
            .generate_content(&self.inner.settings.multimodal_model, prompt, Some(modalities))
            .await?;

        Ok(response.into_first_candidate_parts())
    }
}

#[async_trait]
impl TextGeneration for GeminiClient {
    #[tracing::instrument(name = "gemini_text", skip_all, fields(model = %self.inner.settings.text_model))]
    async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError> {
        let response = self
            .generate_content(&self.inner.settings.text_model, prompt, None)
            .await?;

        let block_reason = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone());

        let texts: Vec<String> = response
            .into_first_candidate_parts()
            .into_iter()
            .filter_map(|part| match part {
                ContentPart::Text(text) => Some(text),
                ContentPart::InlineImage { .. } => None,
            })
            .collect();

        if texts.is_empty() {
            let reason = block_reason.map_or_else(
                || "response contained no text".to_string(),
                |r| format!("prompt blocked: {r}"),
            );
            return Err(ProviderError::UnexpectedResponse(reason));
        }

        Ok(texts.concat())
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Serialize)]
struct PredictRequest<'a> {
    instances: Vec<PredictInstance<'a>>,
    parameters: &'a RasterParams,
}

#[derive(Serialize)]
struct PredictInstance<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<Modality>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// Parts of the first candidate in declaration order; later candidates
    /// are ignored.
    fn into_first_candidate_parts(self) -> Vec<ContentPart> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(ResponsePart::into_content_part)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

impl ResponsePart {
    fn into_content_part(self) -> Option<ContentPart> {
        if let Some(inline) = self.inline_data {
            return Some(ContentPart::InlineImage {
                mime_type: inline.mime_type,
                data: inline.data,
            });
        }
        self.text.map(ContentPart::Text)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: String,
    #[serde(default)]
    data: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}
