//! The generation chain.
//!
//! Strategies run one at a time in a fixed order. The first success or
//! refusal ends the chain; empty answers and failures move on to the next
//! strategy. When every strategy has been tried, the textual fallback
//! always produces a result unless its own upstream call fails.

use std::sync::Arc;

use logo_core::{compose_prompt, GenerationRequest, GenerationResult, LogoResult};
use tracing::{info, warn};

use crate::metrics;
use crate::provider::{MultimodalGeneration, RasterSynthesis, TextGeneration};
use crate::strategy::{
    DirectRasterStrategy, GenerationStrategy, MultimodalImageStrategy, StrategyContext,
    TextualFallback, UpstreamOutcome, VectorMarkupStrategy,
};

/// Runs an ordered list of strategies for each request.
///
/// Holds no per-request state; one instance may serve concurrent requests.
pub struct Orchestrator {
    strategies: Vec<Box<dyn GenerationStrategy>>,
    terminal: TextualFallback,
}

impl Orchestrator {
    /// Build a chain from explicit strategies and a terminal fallback.
    pub fn new(strategies: Vec<Box<dyn GenerationStrategy>>, terminal: TextualFallback) -> Self {
        Self {
            strategies,
            terminal,
        }
    }

    /// The standard chain: raster, multimodal, vector markup, then text.
    pub fn from_capabilities(
        raster: Arc<dyn RasterSynthesis>,
        multimodal: Arc<dyn MultimodalGeneration>,
        text: Arc<dyn TextGeneration>,
    ) -> Self {
        Self::new(
            vec![
                Box::new(DirectRasterStrategy::new(raster)),
                Box::new(MultimodalImageStrategy::new(multimodal)),
                Box::new(VectorMarkupStrategy::new(Arc::clone(&text))),
            ],
            TextualFallback::new(text),
        )
    }

    /// The standard chain backed by one provider offering every capability.
    pub fn for_provider<P>(provider: Arc<P>) -> Self
    where
        P: RasterSynthesis + MultimodalGeneration + TextGeneration + 'static,
    {
        Self::from_capabilities(provider.clone(), provider.clone(), provider)
    }

    /// Strategy names in attempt order, terminal fallback last.
    #[must_use]
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies
            .iter()
            .map(|s| s.name())
            .chain(std::iter::once(self.terminal.name()))
            .collect()
    }

    /// Run the chain for one request.
    ///
    /// # Errors
    ///
    /// Returns [`logo_core::LogoError::TerminalUpstream`] only when the
    /// textual fallback had to call upstream and that call failed.
    #[tracing::instrument(name = "generate_logo", skip_all)]
    pub async fn generate(&self, request: &GenerationRequest) -> LogoResult<GenerationResult> {
        let composed_prompt = compose_prompt(request);
        let ctx = StrategyContext {
            request,
            composed_prompt: &composed_prompt,
        };

        let mut salvaged_text = None;

        for strategy in &self.strategies {
            let name = strategy.name();
            let outcome = strategy.attempt(&ctx).await;
            metrics::record_strategy_attempt(name, outcome.label());

            match outcome {
                UpstreamOutcome::Success(result) => {
                    info!(strategy = name, kind = result.kind(), "strategy produced result");
                    return Ok(result);
                }
                UpstreamOutcome::Declined(text) => {
                    info!(strategy = name, "upstream declined request");
                    return Ok(GenerationResult::textual(text));
                }
                UpstreamOutcome::Empty {
                    detail,
                    salvaged_text: salvaged,
                } => {
                    info!(strategy = name, %detail, "strategy returned nothing usable");
                    if salvaged.is_some() {
                        salvaged_text = salvaged;
                    }
                }
                UpstreamOutcome::Failure(err) => {
                    warn!(
                        strategy = name,
                        timed_out = err.is_timeout(),
                        error = %err,
                        "strategy failed"
                    );
                }
            }
        }

        let name = self.terminal.name();
        let result = self.terminal.conclude(&ctx, salvaged_text).await;
        match &result {
            Ok(_) => {
                metrics::record_strategy_attempt(name, "success");
                info!(strategy = name, "falling back to textual concept");
            }
            Err(err) => {
                metrics::record_strategy_attempt(name, "failure");
                warn!(strategy = name, error = %err, "terminal strategy failed");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use logo_core::data_uri;
    use logo_core::LogoError;

    use crate::provider::{ContentPart, Modality, ProviderError, RasterParams, RasterPayload};

    /// Scripted reply for a stubbed upstream call.
    enum Reply<T> {
        Ok(T),
        Fail(&'static str),
    }

    impl<T: Clone> Reply<T> {
        fn get(&self) -> Result<T, ProviderError> {
            match self {
                Self::Ok(value) => Ok(value.clone()),
                Self::Fail(message) => Err(ProviderError::UnexpectedResponse((*message).into())),
            }
        }
    }

    /// Provider stub that counts calls to each capability.
    struct StubProvider {
        raster: Reply<Vec<RasterPayload>>,
        parts: Reply<Vec<ContentPart>>,
        /// Replies for successive text calls.
        texts: Mutex<Vec<Reply<String>>>,
        raster_calls: AtomicUsize,
        multimodal_calls: AtomicUsize,
        text_prompts: Mutex<Vec<String>>,
    }

    impl StubProvider {
        fn new(
            raster: Reply<Vec<RasterPayload>>,
            parts: Reply<Vec<ContentPart>>,
            texts: Vec<Reply<String>>,
        ) -> Arc<Self> {
            Arc::new(Self {
                raster,
                parts,
                texts: Mutex::new(texts),
                raster_calls: AtomicUsize::new(0),
                multimodal_calls: AtomicUsize::new(0),
                text_prompts: Mutex::new(Vec::new()),
            })
        }

        fn raster_calls(&self) -> usize {
            self.raster_calls.load(Ordering::SeqCst)
        }

        fn multimodal_calls(&self) -> usize {
            self.multimodal_calls.load(Ordering::SeqCst)
        }

        fn text_prompts(&self) -> Vec<String> {
            self.text_prompts.lock().expect("lock").clone()
        }
    }

    #[async_trait]
    impl RasterSynthesis for StubProvider {
        async fn synthesize(
            &self,
            _prompt: &str,
            params: &RasterParams,
        ) -> Result<Vec<RasterPayload>, ProviderError> {
            assert_eq!(params, &RasterParams::default());
            self.raster_calls.fetch_add(1, Ordering::SeqCst);
            self.raster.get()
        }
    }

    #[async_trait]
    impl MultimodalGeneration for StubProvider {
        async fn generate_parts(
            &self,
            prompt: &str,
            modalities: &[Modality],
        ) -> Result<Vec<ContentPart>, ProviderError> {
            assert!(prompt.starts_with("Generate an image: "));
            assert_eq!(modalities, &[Modality::Image, Modality::Text]);
            self.multimodal_calls.fetch_add(1, Ordering::SeqCst);
            self.parts.get()
        }
    }

    #[async_trait]
    impl TextGeneration for StubProvider {
        async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError> {
            self.text_prompts.lock().expect("lock").push(prompt.to_string());
            let mut texts = self.texts.lock().expect("lock");
            assert!(!texts.is_empty(), "unexpected text call");
            texts.remove(0).get()
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest::new("a lighthouse", Some("vintage".into()), Some("earth".into()))
            .expect("valid request")
    }

    fn png(bytes: &str) -> Vec<RasterPayload> {
        vec![RasterPayload {
            base64_bytes: bytes.into(),
        }]
    }

    const SVG: &str = "<svg viewBox=\"0 0 400 400\">\n  <circle cx=\"200\" cy=\"200\" r=\"80\"/>\n</svg>";

    #[tokio::test]
    async fn test_raster_success_short_circuits() {
        let stub = StubProvider::new(Reply::Ok(png("AAAA")), Reply::Fail("unused"), vec![]);
        let result = Orchestrator::for_provider(stub.clone())
            .generate(&request())
            .await
            .expect("result");

        assert_eq!(result, GenerationResult::raster("image/png", "AAAA"));
        assert_eq!(stub.raster_calls(), 1);
        assert_eq!(stub.multimodal_calls(), 0);
        assert!(stub.text_prompts().is_empty());
    }

    #[tokio::test]
    async fn test_first_prediction_with_bytes_wins() {
        let predictions = vec![
            RasterPayload {
                base64_bytes: String::new(),
            },
            RasterPayload {
                base64_bytes: "SECOND".into(),
            },
        ];
        let stub = StubProvider::new(Reply::Ok(predictions), Reply::Fail("unused"), vec![]);
        let result = Orchestrator::for_provider(stub)
            .generate(&request())
            .await
            .expect("result");
        assert_eq!(result, GenerationResult::raster("image/png", "SECOND"));
    }

    #[tokio::test]
    async fn test_multimodal_image_after_empty_raster() {
        let parts = vec![
            ContentPart::Text("Here is your logo".into()),
            ContentPart::InlineImage {
                mime_type: "image/jpeg".into(),
                data: "FIRST".into(),
            },
            ContentPart::InlineImage {
                mime_type: "image/png".into(),
                data: "SECOND".into(),
            },
        ];
        let stub = StubProvider::new(Reply::Ok(vec![]), Reply::Ok(parts), vec![]);
        let result = Orchestrator::for_provider(stub.clone())
            .generate(&request())
            .await
            .expect("result");

        assert_eq!(
            result,
            GenerationResult::RasterImage {
                data_uri: "data:image/jpeg;base64,FIRST".into()
            }
        );
        assert_eq!(stub.multimodal_calls(), 1);
        assert!(stub.text_prompts().is_empty());
    }

    #[tokio::test]
    async fn test_refusal_short_circuits_with_text() {
        let refusal = "I'm Unable to generate images of that subject.";
        let parts = vec![
            ContentPart::Text("Thinking about it.".into()),
            ContentPart::Text(refusal.into()),
        ];
        let stub = StubProvider::new(Reply::Fail("timeout"), Reply::Ok(parts), vec![]);
        let result = Orchestrator::for_provider(stub.clone())
            .generate(&request())
            .await
            .expect("result");

        assert_eq!(result, GenerationResult::textual(refusal));
        assert!(stub.text_prompts().is_empty());
    }

    #[tokio::test]
    async fn test_image_part_wins_over_earlier_refusal_text() {
        let parts = vec![
            ContentPart::Text("I'm unable to match that policy exactly, but here goes.".into()),
            ContentPart::InlineImage {
                mime_type: "image/png".into(),
                data: "DRAWN".into(),
            },
        ];
        let stub = StubProvider::new(Reply::Ok(vec![]), Reply::Ok(parts), vec![]);
        let result = Orchestrator::for_provider(stub.clone())
            .generate(&request())
            .await
            .expect("result");

        assert_eq!(result, GenerationResult::raster("image/png", "DRAWN"));
        assert_eq!(stub.multimodal_calls(), 1);
        assert!(stub.text_prompts().is_empty());
    }

    #[tokio::test]
    async fn test_fenced_svg_from_text_model() {
        let fenced = format!("```svg\n{SVG}\n```");
        let stub = StubProvider::new(
            Reply::Fail("imagen down"),
            Reply::Ok(vec![ContentPart::Text("Sure, here is a sketch".into())]),
            vec![Reply::Ok(fenced)],
        );
        let result = Orchestrator::for_provider(stub.clone())
            .generate(&request())
            .await
            .expect("result");

        match result {
            GenerationResult::VectorImage { data_uri, markup } => {
                assert_eq!(markup, SVG);
                let decoded = data_uri::decode(&data_uri).expect("decodes");
                assert_eq!(decoded.mime_type, data_uri::SVG_MIME);
                assert_eq!(decoded.bytes, SVG.as_bytes());
            }
            other => panic!("expected vector result, got {other:?}"),
        }

        let prompts = stub.text_prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Style: vintage"));
        assert!(prompts[0].contains("Output ONLY the SVG code"));
    }

    #[tokio::test]
    async fn test_text_without_svg_is_returned_verbatim() {
        let prose = "A lighthouse rendered in warm browns with a serif wordmark.";
        let stub = StubProvider::new(
            Reply::Ok(vec![]),
            Reply::Ok(vec![]),
            vec![Reply::Ok(prose.into())],
        );
        let result = Orchestrator::for_provider(stub.clone())
            .generate(&request())
            .await
            .expect("result");

        assert_eq!(result, GenerationResult::textual(prose));
        assert_eq!(stub.text_prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_vector_failure_triggers_fresh_concept_call() {
        let concept = "Concept: a lighthouse beam forming the letter L.";
        let stub = StubProvider::new(
            Reply::Fail("imagen down"),
            Reply::Fail("multimodal down"),
            vec![Reply::Fail("text down"), Reply::Ok(concept.into())],
        );
        let result = Orchestrator::for_provider(stub.clone())
            .generate(&request())
            .await
            .expect("result");

        assert_eq!(result, GenerationResult::textual(concept));
        let prompts = stub.text_prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[1].starts_with("Create a professional logo design concept."));
    }

    #[tokio::test]
    async fn test_blank_svg_reply_triggers_fresh_concept_call() {
        let stub = StubProvider::new(
            Reply::Ok(vec![]),
            Reply::Ok(vec![]),
            vec![Reply::Ok("  \n".into()), Reply::Ok("concept".into())],
        );
        let result = Orchestrator::for_provider(stub.clone())
            .generate(&request())
            .await
            .expect("result");
        assert_eq!(result, GenerationResult::textual("concept"));
        assert_eq!(stub.text_prompts().len(), 2);
    }

    #[tokio::test]
    async fn test_terminal_failure_surfaces() {
        let stub = StubProvider::new(
            Reply::Fail("imagen down"),
            Reply::Fail("multimodal down"),
            vec![Reply::Fail("text down"), Reply::Fail("still down")],
        );
        let err = Orchestrator::for_provider(stub)
            .generate(&request())
            .await
            .expect_err("should fail");

        match err {
            LogoError::TerminalUpstream(message) => assert!(message.contains("still down")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_blank_concept_reply_is_terminal_failure() {
        let stub = StubProvider::new(
            Reply::Fail("imagen down"),
            Reply::Fail("multimodal down"),
            vec![Reply::Ok("   ".into()), Reply::Ok(String::new())],
        );
        let err = Orchestrator::for_provider(stub.clone())
            .generate(&request())
            .await
            .expect_err("should fail");

        assert_eq!(
            err,
            LogoError::TerminalUpstream("response contained no text".into())
        );
        assert_eq!(stub.text_prompts().len(), 2);
    }

    #[test]
    fn test_strategy_order_is_fixed() {
        let stub = StubProvider::new(Reply::Ok(vec![]), Reply::Ok(vec![]), vec![]);
        assert_eq!(
            Orchestrator::for_provider(stub).strategy_names(),
            vec![
                "direct_raster",
                "multimodal_image",
                "vector_markup",
                "textual_fallback"
            ]
        );
    }
}
