//! Prompt composition for upstream generation calls.
//!
//! Every function here is pure: the same request always yields the same text.

use crate::request::GenerationRequest;

/// Qualifiers appended to every composed image prompt.
const QUALITY_SUFFIX: &str = "professional logo design, high quality, detailed, clean background";

/// Style used in vector-markup instructions when the caller gave none.
const VECTOR_FALLBACK_STYLE: &str = "modern minimalist";
/// Colors used in vector-markup instructions when the caller gave none.
const VECTOR_FALLBACK_COLORS: &str = "vibrant colors";

/// Build the base image prompt from the description and both modifiers.
///
/// ```
/// use logo_core::{compose_prompt, GenerationRequest};
///
/// let request = GenerationRequest::new("a fox", Some("vintage".into()), None).unwrap();
/// assert_eq!(
///     compose_prompt(&request),
///     "a fox, vintage style, vibrant colors, professional logo design, high quality, detailed, clean background"
/// );
/// ```
#[must_use]
pub fn compose_prompt(request: &GenerationRequest) -> String {
    format!(
        "{}, {} style, {} colors, {QUALITY_SUFFIX}",
        request.description(),
        request.style(),
        request.color_scheme()
    )
}

/// Frame a composed prompt as an explicit image-generation instruction.
#[must_use]
pub fn image_instruction(composed: &str) -> String {
    format!("Generate an image: {composed}")
}

/// Instructions asking a text model for standalone SVG markup only.
#[must_use]
pub fn vector_markup_prompt(request: &GenerationRequest) -> String {
    let style = request.explicit_style().unwrap_or(VECTOR_FALLBACK_STYLE);
    let colors = request
        .explicit_color_scheme()
        .unwrap_or(VECTOR_FALLBACK_COLORS);

    format!(
        "Create a detailed, professional SVG logo.

Description: {description}
Style: {style}
Colors: {colors}

Create an SVG with:
- viewBox=\"0 0 400 400\" for more detail
- Use gradients (linearGradient, radialGradient) for depth
- Use multiple layered shapes for complexity
- Add subtle shadows or highlights
- Make it visually interesting and professional

Output ONLY the SVG code, starting with <svg and ending with </svg>. No explanations.",
        description = request.description(),
    )
}

/// Instructions asking a text model for a written design concept.
///
/// Used when no visual artifact could be obtained at all.
#[must_use]
pub fn concept_prompt(request: &GenerationRequest) -> String {
    format!(
        "Create a professional logo design concept.
Description: {description}
Style: {style}
Color scheme: {colors}

Generate a detailed, creative description of this logo design that could be used as a visual reference. Include specific details about:
- The main visual elements and their arrangement
- The typography style if text is included
- The color palette with specific hex codes
- The overall composition and balance
- Any symbolic meaning or design rationale

Make it professional and suitable for a business or brand.",
        description = request.description(),
        style = request.style(),
        colors = request.color_scheme(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(style: Option<&str>, colors: Option<&str>) -> GenerationRequest {
        GenerationRequest::new(
            "mountain bakery",
            style.map(str::to_string),
            colors.map(str::to_string),
        )
        .expect("valid request")
    }

    #[test]
    fn test_compose_uses_defaults() {
        assert_eq!(
            compose_prompt(&request(None, None)),
            "mountain bakery, modern style, vibrant colors, professional logo design, high quality, detailed, clean background"
        );
    }

    #[test]
    fn test_compose_passes_tags_verbatim() {
        let composed = compose_prompt(&request(Some("Art Deco"), Some("teal & copper")));
        assert!(composed.starts_with("mountain bakery, Art Deco style, teal & copper colors, "));
    }

    #[test]
    fn test_image_instruction_wraps_prompt() {
        assert_eq!(image_instruction("x"), "Generate an image: x");
    }

    #[test]
    fn test_vector_prompt_uses_own_fallbacks() {
        let prompt = vector_markup_prompt(&request(None, None));
        assert!(prompt.contains("Style: modern minimalist"));
        assert!(prompt.contains("Colors: vibrant colors"));
        assert!(prompt.contains("viewBox=\"0 0 400 400\""));
        assert!(prompt.contains("Output ONLY the SVG code"));
    }

    #[test]
    fn test_vector_prompt_uses_explicit_tags() {
        let prompt = vector_markup_prompt(&request(Some("bold"), Some("neon")));
        assert!(prompt.contains("Description: mountain bakery"));
        assert!(prompt.contains("Style: bold"));
        assert!(prompt.contains("Colors: neon"));
    }

    #[test]
    fn test_concept_prompt_mentions_palette() {
        let prompt = concept_prompt(&request(Some("elegant"), None));
        assert!(prompt.contains("Style: elegant"));
        assert!(prompt.contains("Color scheme: vibrant"));
        assert!(prompt.contains("hex codes"));
    }
}
