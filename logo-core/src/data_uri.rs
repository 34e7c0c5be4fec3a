//! Base64 data URIs for generated artifacts.
//!
//! Produces and parses URIs of the form `data:image/png;base64,iVBORw0KGgo...`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{LogoError, LogoResult};

/// MIME type for raster images produced upstream.
pub const PNG_MIME: &str = "image/png";
/// MIME type for vector markup.
pub const SVG_MIME: &str = "image/svg+xml";

/// A parsed data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedDataUri {
    /// Declared MIME type.
    pub mime_type: String,
    /// Decoded payload bytes.
    pub bytes: Vec<u8>,
}

/// Encode raw bytes as a base64 data URI.
#[must_use]
pub fn encode(mime_type: &str, bytes: &[u8]) -> String {
    from_base64(mime_type, &STANDARD.encode(bytes))
}

/// Wrap a payload that is already base64-encoded.
#[must_use]
pub fn from_base64(mime_type: &str, payload: &str) -> String {
    format!("data:{mime_type};base64,{payload}")
}

/// Encode SVG markup as an `image/svg+xml` data URI.
#[must_use]
pub fn encode_svg(markup: &str) -> String {
    encode(SVG_MIME, markup.as_bytes())
}

/// Parse a base64 data URI back into its MIME type and bytes.
///
/// # Errors
///
/// Returns [`LogoError::DataUri`] if the URI lacks the `data:` scheme, the
/// comma separator or the `;base64` marker, or if the payload is not valid
/// base64.
pub fn decode(uri: &str) -> LogoResult<DecodedDataUri> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| LogoError::DataUri("missing data: scheme".to_string()))?;

    let (metadata, payload) = rest
        .split_once(',')
        .ok_or_else(|| LogoError::DataUri("missing comma".to_string()))?;

    let mime_type = metadata
        .strip_suffix(";base64")
        .ok_or_else(|| LogoError::DataUri("only base64 payloads are supported".to_string()))?;

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| LogoError::DataUri(format!("failed to decode base64: {e}")))?;

    Ok(DecodedDataUri {
        mime_type: mime_type.to_string(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_round_trip() {
        let markup = "<svg xmlns=\"http://www.w3.org/2000/svg\"><text>Café ☕</text></svg>";
        let uri = encode_svg(markup);
        assert!(uri.starts_with("data:image/svg+xml;base64,"));

        let decoded = decode(&uri).expect("should decode");
        assert_eq!(decoded.mime_type, SVG_MIME);
        assert_eq!(decoded.bytes, markup.as_bytes());
    }

    #[test]
    fn test_from_base64_keeps_payload() {
        let payload = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";
        let uri = from_base64(PNG_MIME, payload);
        assert_eq!(uri, format!("data:image/png;base64,{payload}"));

        let decoded = decode(&uri).expect("should decode");
        assert_eq!(&decoded.bytes[0..4], &[137, 80, 78, 71]);
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(matches!(decode("https://x/y.png"), Err(LogoError::DataUri(_))));
        assert!(matches!(decode("data:image/png;base64"), Err(LogoError::DataUri(_))));
        assert!(matches!(decode("data:image/png,abc"), Err(LogoError::DataUri(_))));
        assert!(matches!(
            decode("data:image/png;base64,!!!"),
            Err(LogoError::DataUri(_))
        ));
    }
}
