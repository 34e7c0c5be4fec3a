//! Validated generation requests.

use crate::error::{LogoError, LogoResult};

/// Style applied when the caller does not supply one.
pub const DEFAULT_STYLE: &str = "modern";
/// Color scheme applied when the caller does not supply one.
pub const DEFAULT_COLOR_SCHEME: &str = "vibrant";

/// User-facing message for a missing or blank description.
pub const MISSING_PROMPT_MESSAGE: &str = "Prompt is required";

/// A logo design request with a guaranteed non-blank description.
///
/// Style and color-scheme tags are kept verbatim; unknown values are allowed
/// so that clients can introduce new tags without a server release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    description: String,
    style: Option<String>,
    color_scheme: Option<String>,
}

impl GenerationRequest {
    /// Build a request, rejecting an absent-in-effect description.
    ///
    /// Empty or whitespace-only tags are treated as not supplied.
    ///
    /// # Errors
    ///
    /// Returns [`LogoError::InvalidRequest`] if `description` is empty or
    /// whitespace only.
    pub fn new(
        description: impl Into<String>,
        style: Option<String>,
        color_scheme: Option<String>,
    ) -> LogoResult<Self> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(LogoError::InvalidRequest(MISSING_PROMPT_MESSAGE.to_string()));
        }

        Ok(Self {
            description,
            style: style.filter(|s| !s.trim().is_empty()),
            color_scheme: color_scheme.filter(|c| !c.trim().is_empty()),
        })
    }

    /// The free-text description, exactly as supplied.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Style tag, or [`DEFAULT_STYLE`] when not supplied.
    #[must_use]
    pub fn style(&self) -> &str {
        self.style.as_deref().unwrap_or(DEFAULT_STYLE)
    }

    /// Color-scheme tag, or [`DEFAULT_COLOR_SCHEME`] when not supplied.
    #[must_use]
    pub fn color_scheme(&self) -> &str {
        self.color_scheme.as_deref().unwrap_or(DEFAULT_COLOR_SCHEME)
    }

    /// Style tag only if the caller supplied one.
    #[must_use]
    pub fn explicit_style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// Color-scheme tag only if the caller supplied one.
    #[must_use]
    pub fn explicit_color_scheme(&self) -> Option<&str> {
        self.color_scheme.as_deref()
    }
}
