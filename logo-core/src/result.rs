//! The outcome of a successful generation.
//!
//! Serializes to the wire shapes clients consume:
//!
//! ```text
//! { "type": "image",       "image": "data:image/png;base64,..." }
//! { "type": "svg",         "image": "data:image/svg+xml;base64,...", "svg": "<svg ...>" }
//! { "type": "description", "description": "..." }
//! ```

use serde::{Deserialize, Serialize};

use crate::data_uri;

/// A generated logo artifact. Exactly one variant is ever produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GenerationResult {
    /// A self-contained base64 raster image.
    #[serde(rename = "image")]
    RasterImage {
        /// Embeddable data URI.
        #[serde(rename = "image")]
        data_uri: String,
    },

    /// Vector markup together with its embeddable encoding.
    #[serde(rename = "svg")]
    VectorImage {
        /// `image/svg+xml` data URI of `markup`.
        #[serde(rename = "image")]
        data_uri: String,
        /// Editable SVG source.
        #[serde(rename = "svg")]
        markup: String,
    },

    /// Prose describing a design, used when no image could be produced.
    #[serde(rename = "description")]
    TextualConcept {
        /// Free-form text.
        description: String,
    },
}

impl GenerationResult {
    /// Raster result from an already base64-encoded payload.
    ///
    /// An empty `mime_type` falls back to `image/png`.
    #[must_use]
    pub fn raster(mime_type: &str, base64_payload: &str) -> Self {
        let mime_type = if mime_type.trim().is_empty() {
            data_uri::PNG_MIME
        } else {
            mime_type
        };
        Self::RasterImage {
            data_uri: data_uri::from_base64(mime_type, base64_payload),
        }
    }

    /// Vector result, encoding `markup` into a data URI.
    #[must_use]
    pub fn vector(markup: impl Into<String>) -> Self {
        let markup = markup.into();
        Self::VectorImage {
            data_uri: data_uri::encode_svg(&markup),
            markup,
        }
    }

    /// Textual concept result.
    #[must_use]
    pub fn textual(description: impl Into<String>) -> Self {
        Self::TextualConcept {
            description: description.into(),
        }
    }

    /// Wire tag of the variant (`image`, `svg` or `description`).
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RasterImage { .. } => "image",
            Self::VectorImage { .. } => "svg",
            Self::TextualConcept { .. } => "description",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raster_wire_shape() {
        let result = GenerationResult::raster("image/png", "AAAA");
        let json = serde_json::to_value(&result).expect("should serialize");
        assert_eq!(
            json,
            json!({ "type": "image", "image": "data:image/png;base64,AAAA" })
        );
    }

    #[test]
    fn test_raster_defaults_mime() {
        let result = GenerationResult::raster("", "AAAA");
        assert_eq!(
            result,
            GenerationResult::RasterImage {
                data_uri: "data:image/png;base64,AAAA".into()
            }
        );
    }

    #[test]
    fn test_vector_wire_shape() {
        let result = GenerationResult::vector("<svg></svg>");
        let json = serde_json::to_value(&result).expect("should serialize");
        assert_eq!(json["type"], "svg");
        assert_eq!(json["svg"], "<svg></svg>");
        assert_eq!(json["image"], "data:image/svg+xml;base64,PHN2Zz48L3N2Zz4=");
        assert_eq!(json.as_object().map(serde_json::Map::len), Some(3));
    }

    #[test]
    fn test_description_wire_shape() {
        let result = GenerationResult::textual("A bold fox");
        let json = serde_json::to_value(&result).expect("should serialize");
        assert_eq!(json, json!({ "type": "description", "description": "A bold fox" }));
        assert_eq!(result.kind(), "description");
    }

    #[test]
    fn test_deserialize_tagged() {
        let result: GenerationResult = serde_json::from_value(json!({
            "type": "svg",
            "image": "data:image/svg+xml;base64,PHN2Zz48L3N2Zz4=",
            "svg": "<svg></svg>"
        }))
        .expect("should deserialize");
        assert_eq!(result, GenerationResult::vector("<svg></svg>"));
    }
}
