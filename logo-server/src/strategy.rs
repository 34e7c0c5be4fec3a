//! Generation strategies.
//!
//! Each strategy wraps one upstream capability, shapes its own request and
//! interprets the response into an [`UpstreamOutcome`]. Strategies never
//! retry and never return errors; transport failures are reported as
//! [`UpstreamOutcome::Failure`] for the chain to absorb.

use std::sync::Arc;

use async_trait::async_trait;
use logo_core::markup::extract_svg;
use logo_core::prompt::{concept_prompt, image_instruction, vector_markup_prompt};
use logo_core::{GenerationRequest, GenerationResult, LogoError, LogoResult};

use crate::provider::{
    ContentPart, Modality, MultimodalGeneration, ProviderError, RasterParams, RasterSynthesis,
    TextGeneration,
};

/// Words that mark a text reply as a refusal rather than a technical miss.
const REFUSAL_MARKERS: [&str; 2] = ["policy", "unable"];

/// Reported when the last-resort reply carries no usable text.
const NO_TEXT_MESSAGE: &str = "response contained no text";

/// Longest upstream excerpt carried in an [`UpstreamOutcome::Empty`].
const MAX_SNIPPET_CHARS: usize = 500;

/// Inputs shared by every strategy for one request.
#[derive(Debug, Clone, Copy)]
pub struct StrategyContext<'a> {
    /// The validated request.
    pub request: &'a GenerationRequest,
    /// Output of the prompt compositor for `request`.
    pub composed_prompt: &'a str,
}

/// What a single strategy attempt produced.
#[derive(Debug)]
pub enum UpstreamOutcome {
    /// A usable artifact. Ends the chain.
    Success(GenerationResult),
    /// The provider explicitly refused. Ends the chain with its text.
    Declined(String),
    /// The provider answered but nothing usable could be extracted.
    Empty {
        /// Short description of what came back, for logs.
        detail: String,
        /// Non-blank text the terminal strategy may return verbatim.
        salvaged_text: Option<String>,
    },
    /// The call itself failed.
    Failure(ProviderError),
}

impl UpstreamOutcome {
    fn empty(detail: impl Into<String>) -> Self {
        Self::Empty {
            detail: detail.into(),
            salvaged_text: None,
        }
    }

    /// Metrics label for the outcome. Timed-out calls get their own label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::Declined(_) => "declined",
            Self::Empty { .. } => "empty",
            Self::Failure(err) if err.is_timeout() => "timeout",
            Self::Failure(_) => "failure",
        }
    }
}

/// One step of the generation chain.
#[async_trait]
pub trait GenerationStrategy: Send + Sync {
    /// Stable name used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Make exactly one attempt for the given context.
    async fn attempt(&self, ctx: &StrategyContext<'_>) -> UpstreamOutcome;
}

/// Truncate upstream text for logging.
fn snippet(text: &str) -> String {
    text.chars().take(MAX_SNIPPET_CHARS).collect()
}

/// Whether a text reply reads as a content-policy refusal.
#[must_use]
pub fn is_refusal(text: &str) -> bool {
    let lower = text.to_lowercase();
    REFUSAL_MARKERS.iter().any(|marker| lower.contains(marker))
}

// ============================================================================
// 1. Direct raster synthesis
// ============================================================================

/// Calls an image-synthesis model with fixed sampling parameters.
pub struct DirectRasterStrategy {
    provider: Arc<dyn RasterSynthesis>,
    params: RasterParams,
}

impl DirectRasterStrategy {
    /// Create the strategy with default parameters (one square image).
    pub fn new(provider: Arc<dyn RasterSynthesis>) -> Self {
        Self {
            provider,
            params: RasterParams::default(),
        }
    }
}

#[async_trait]
impl GenerationStrategy for DirectRasterStrategy {
    fn name(&self) -> &'static str {
        "direct_raster"
    }

    async fn attempt(&self, ctx: &StrategyContext<'_>) -> UpstreamOutcome {
        let payloads = match self.provider.synthesize(ctx.composed_prompt, &self.params).await {
            Ok(payloads) => payloads,
            Err(err) => return UpstreamOutcome::Failure(err),
        };

        // The predict endpoint is always asked for PNG output.
        match payloads.iter().find(|p| !p.base64_bytes.is_empty()) {
            Some(payload) => UpstreamOutcome::Success(GenerationResult::raster(
                logo_core::data_uri::PNG_MIME,
                &payload.base64_bytes,
            )),
            None => UpstreamOutcome::empty(format!(
                "{} prediction(s), none with image bytes",
                payloads.len()
            )),
        }
    }
}

// ============================================================================
// 2. Multimodal image-capable generation
// ============================================================================

/// Asks an image-capable multimodal model to generate an image.
pub struct MultimodalImageStrategy {
    provider: Arc<dyn MultimodalGeneration>,
}

impl MultimodalImageStrategy {
    /// Create the strategy.
    pub fn new(provider: Arc<dyn MultimodalGeneration>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl GenerationStrategy for MultimodalImageStrategy {
    fn name(&self) -> &'static str {
        "multimodal_image"
    }

    async fn attempt(&self, ctx: &StrategyContext<'_>) -> UpstreamOutcome {
        let prompt = image_instruction(ctx.composed_prompt);
        let parts = match self
            .provider
            .generate_parts(&prompt, &[Modality::Image, Modality::Text])
            .await
        {
            Ok(parts) => parts,
            Err(err) => return UpstreamOutcome::Failure(err),
        };

        // Image parts win over text parts regardless of position.
        for part in &parts {
            if let ContentPart::InlineImage { mime_type, data } = part {
                if !data.is_empty() {
                    return UpstreamOutcome::Success(GenerationResult::raster(mime_type, data));
                }
            }
        }

        for part in &parts {
            if let ContentPart::Text(text) = part {
                if is_refusal(text) {
                    return UpstreamOutcome::Declined(text.clone());
                }
            }
        }

        let text: String = parts
            .iter()
            .filter_map(|part| match part {
                ContentPart::Text(text) => Some(text.as_str()),
                ContentPart::InlineImage { .. } => None,
            })
            .collect();
        UpstreamOutcome::empty(format!("{} part(s), no image: {}", parts.len(), snippet(&text)))
    }
}

// ============================================================================
// 3. Vector-markup synthesis
// ============================================================================

/// Asks a text model for SVG markup only and extracts the first `<svg>` span.
pub struct VectorMarkupStrategy {
    provider: Arc<dyn TextGeneration>,
}

impl VectorMarkupStrategy {
    /// Create the strategy.
    pub fn new(provider: Arc<dyn TextGeneration>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl GenerationStrategy for VectorMarkupStrategy {
    fn name(&self) -> &'static str {
        "vector_markup"
    }

    async fn attempt(&self, ctx: &StrategyContext<'_>) -> UpstreamOutcome {
        let prompt = vector_markup_prompt(ctx.request);
        let text = match self.provider.generate_text(&prompt).await {
            Ok(text) => text,
            Err(err) => return UpstreamOutcome::Failure(err),
        };

        if let Some(markup) = extract_svg(&text) {
            return UpstreamOutcome::Success(GenerationResult::vector(markup));
        }

        UpstreamOutcome::Empty {
            detail: format!("no <svg> span: {}", snippet(&text)),
            salvaged_text: (!text.trim().is_empty()).then_some(text),
        }
    }
}

// ============================================================================
// 4. Textual fallback
// ============================================================================

/// Last resort: always answers with a written design concept.
///
/// Returns text salvaged from an earlier strategy verbatim when there is
/// some; otherwise asks the text model for a fresh concept description.
pub struct TextualFallback {
    provider: Arc<dyn TextGeneration>,
}

impl TextualFallback {
    /// Create the terminal strategy.
    pub fn new(provider: Arc<dyn TextGeneration>) -> Self {
        Self { provider }
    }

    /// Name used in logs and metrics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        "textual_fallback"
    }

    /// Produce the final textual result.
    ///
    /// # Errors
    ///
    /// Returns [`LogoError::TerminalUpstream`] if a fresh call was needed and
    /// failed or came back blank; there is nothing left to fall back to.
    pub async fn conclude(
        &self,
        ctx: &StrategyContext<'_>,
        salvaged_text: Option<String>,
    ) -> LogoResult<GenerationResult> {
        if let Some(text) = salvaged_text {
            return Ok(GenerationResult::textual(text));
        }

        let text = self
            .provider
            .generate_text(&concept_prompt(ctx.request))
            .await
            .map_err(|err| LogoError::TerminalUpstream(err.to_string()))?;

        if text.trim().is_empty() {
            return Err(LogoError::TerminalUpstream(NO_TEXT_MESSAGE.to_string()));
        }

        Ok(GenerationResult::textual(text))
    }
}
