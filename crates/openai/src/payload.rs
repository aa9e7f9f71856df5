//! Wire types for the Images API and the tagged payload union.
//!
//! A successful generation datum carries *either* inline base64 bytes or
//! a URL that must itself be fetched. Both cases are made explicit here
//! and resolved through one normalization path in the client, instead of
//! ad hoc presence checks scattered through the pipeline.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;

/// Response body of `POST /images/generations`.
#[derive(Debug, Deserialize)]
pub struct GenerationsResponse {
    #[serde(default)]
    pub data: Vec<ImageDatum>,
    pub error: Option<ApiErrorBody>,
}

/// One generated image entry.
#[derive(Debug, Deserialize)]
pub struct ImageDatum {
    pub b64_json: Option<String>,
    pub url: Option<String>,
}

/// Structured provider error body (`{"error": {"message": ...}}`).
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub code: Option<serde_json::Value>,
}

/// The two shapes a generation result can take, made explicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePayload {
    /// Base64-encoded image bytes delivered inline.
    Inline(String),
    /// A URL the client must fetch to obtain the bytes.
    Remote(String),
}

impl ImagePayload {
    /// Extract the payload from a generation datum. Inline data wins when
    /// both fields are present.
    pub fn from_datum(datum: ImageDatum) -> Option<Self> {
        if let Some(b64) = datum.b64_json {
            Some(Self::Inline(b64))
        } else {
            datum.url.map(Self::Remote)
        }
    }
}

/// Decode an inline base64 payload into raw bytes.
pub fn decode_inline(b64: &str) -> Result<Vec<u8>, base64::DecodeError> {
    BASE64.decode(b64)
}

/// Parse a structured error message out of a non-success response body.
///
/// Returns `None` when the body is not the provider's JSON error shape,
/// in which case the failure is treated as transient rather than a
/// well-formed rejection.
pub fn parse_error_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorEnvelope {
        error: ApiErrorBody,
    }
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|e| e.error.message)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datum_with_inline_bytes() {
        let response: GenerationsResponse =
            serde_json::from_str(r#"{"data":[{"b64_json":"aGVsbG8="}]}"#).unwrap();
        let payload = ImagePayload::from_datum(response.data.into_iter().next().unwrap()).unwrap();
        assert_eq!(payload, ImagePayload::Inline("aGVsbG8=".to_string()));
        assert_eq!(decode_inline("aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn datum_with_url() {
        let response: GenerationsResponse =
            serde_json::from_str(r#"{"data":[{"url":"https://img.test/a.png"}]}"#).unwrap();
        let payload = ImagePayload::from_datum(response.data.into_iter().next().unwrap()).unwrap();
        assert_eq!(
            payload,
            ImagePayload::Remote("https://img.test/a.png".to_string())
        );
    }

    #[test]
    fn inline_wins_over_url() {
        let datum = ImageDatum {
            b64_json: Some("aGVsbG8=".to_string()),
            url: Some("https://img.test/a.png".to_string()),
        };
        assert_eq!(
            ImagePayload::from_datum(datum),
            Some(ImagePayload::Inline("aGVsbG8=".to_string()))
        );
    }

    #[test]
    fn empty_datum_has_no_payload() {
        let datum = ImageDatum {
            b64_json: None,
            url: None,
        };
        assert_eq!(ImagePayload::from_datum(datum), None);
    }

    #[test]
    fn structured_error_message_parses() {
        let body = r#"{"error":{"message":"Your prompt was blocked","type":"invalid_request_error","code":null}}"#;
        assert_eq!(
            parse_error_message(body).as_deref(),
            Some("Your prompt was blocked")
        );
    }

    #[test]
    fn unstructured_error_body_is_none() {
        assert_eq!(parse_error_message("<html>bad gateway</html>"), None);
        assert_eq!(parse_error_message(""), None);
    }

    #[test]
    fn invalid_base64_surfaces_decode_error() {
        assert!(decode_inline("!!not-base64!!").is_err());
    }
}
