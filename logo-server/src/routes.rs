//! API route handlers.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use logo_core::catalog::{color_scheme_entries, style_entries};
use logo_core::{CatalogEntry, GenerationResult, DEFAULT_COLOR_SCHEME, DEFAULT_STYLE};
use serde::Serialize;

use crate::error::ApiError;
use crate::metrics;
use crate::validation::{parse_body, validate_generate};
use crate::AppState;

/// Generate a logo from `{ prompt, style?, colorScheme? }`.
///
/// Responds with one of the three [`GenerationResult`] shapes, or with
/// `{ error }` and a 4xx/5xx status.
#[tracing::instrument(name = "generate_handler", skip(state, body), fields(body_len = body.len()))]
pub async fn generate_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerationResult>, ApiError> {
    let outcome = generate(&state, &body).await;

    match &outcome {
        Ok(result) => metrics::record_generation_result(result.kind()),
        Err(err) => {
            metrics::record_generation_error(err.0.kind());
            tracing::debug!(error = %err.0, "generation rejected");
        }
    }

    outcome.map(Json)
}

async fn generate(state: &AppState, body: &[u8]) -> Result<GenerationResult, ApiError> {
    let body = parse_body(body)?;
    let validated = validate_generate(body, state.config())?;
    let orchestrator = state.orchestrator(&validated.api_key)?;
    Ok(orchestrator.generate(&validated.request).await?)
}

/// Default tags reported by [`options_handler`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultTags {
    /// Default style tag.
    pub style: &'static str,
    /// Default color-scheme tag.
    pub color_scheme: &'static str,
}

/// Selectable styles and color schemes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResponse {
    /// Known style tags.
    pub styles: Vec<CatalogEntry>,
    /// Known color-scheme tags.
    pub color_schemes: Vec<CatalogEntry>,
    /// Tags applied when a request omits them.
    pub defaults: DefaultTags,
}

/// List the style and color-scheme catalog.
pub async fn options_handler() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        styles: style_entries(),
        color_schemes: color_scheme_entries(),
        defaults: DefaultTags {
            style: DEFAULT_STYLE,
            color_scheme: DEFAULT_COLOR_SCHEME,
        },
    })
}
