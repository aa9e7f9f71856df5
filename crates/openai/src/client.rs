//! HTTP client for the Images API generation endpoint.
//!
//! Each [`ImagesClient::synthesize`] call issues `POST /images/generations`
//! under the policy's hard deadline, retrying transient failures with
//! linear backoff. Well-formed provider rejections (a structured 4xx error
//! body) surface immediately without retry: a malformed request fails the
//! same way every time, and retrying it only burns the deadline budget.

use std::time::Duration;

use atelier_core::canvas::CanvasSize;
use atelier_core::types::SynthesizedImage;

use crate::payload::{parse_error_message, GenerationsResponse, ImagePayload};
use crate::retry::RetryPolicy;

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default generation model.
pub const DEFAULT_MODEL: &str = "gpt-image-1";

/// Content type assumed for inline payloads; the provider delivers PNG.
const INLINE_CONTENT_TYPE: &str = "image/png";

/// Synthesis failures the caller can discriminate to decide whether a
/// higher-level retry makes sense.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    /// Every attempt ran into its hard deadline.
    #[error("Image synthesis timed out after {0:?}")]
    Timeout(Duration),

    /// The provider rejected the request (malformed or blocked prompt).
    /// Never retried.
    #[error("Image synthesis rejected: {0}")]
    Rejected(String),

    /// Transient failures exhausted the retry budget.
    #[error("Image synthesis unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of a single attempt, before retry classification.
#[derive(Debug)]
enum AttemptError {
    /// The attempt hit its deadline and the request was cancelled.
    Deadline,
    /// Network-level failure (DNS, TLS, connection reset, ...).
    Transport(String),
    /// Non-success status without a well-formed rejection body.
    Upstream { status: u16, body: String },
    /// Well-formed provider rejection; terminal.
    Rejected(String),
}

/// Client for one image generation provider endpoint.
pub struct ImagesClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    retry: RetryPolicy,
}

impl ImagesClient {
    /// Create a client with the default base URL and model.
    pub fn new(api_key: String, retry: RetryPolicy) -> Self {
        Self::with_endpoint(DEFAULT_BASE_URL.to_string(), DEFAULT_MODEL.to_string(), api_key, retry)
    }

    /// Create a client against a specific endpoint and model. Used by
    /// configuration (and tests pointing at a stub server).
    pub fn with_endpoint(
        base_url: String,
        model: String,
        api_key: String,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            retry,
        }
    }

    /// Provider identifier persisted on assets, e.g. `openai:gpt-image-1`.
    pub fn provider_id(&self) -> String {
        format!("openai:{}", self.model)
    }

    /// Generate one image for the prompt at the given canvas size.
    ///
    /// Runs up to `retry.max_attempts` attempts, each under
    /// `retry.request_deadline`; the backoff between attempts is linear.
    pub async fn synthesize(
        &self,
        prompt: &str,
        size: CanvasSize,
    ) -> Result<SynthesizedImage, SynthesisError> {
        let mut last_failure = AttemptError::Transport("no attempt ran".to_string());

        for attempt in 1..=self.retry.max_attempts {
            let delay = self.retry.backoff_delay(attempt);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let outcome =
                tokio::time::timeout(self.retry.request_deadline, self.attempt(prompt, size)).await;

            match outcome {
                // Dropping the attempt future cancels the in-flight call.
                Err(_elapsed) => {
                    tracing::warn!(
                        attempt,
                        deadline_ms = self.retry.request_deadline.as_millis() as u64,
                        "Image synthesis attempt hit its deadline",
                    );
                    last_failure = AttemptError::Deadline;
                }
                Ok(Ok(image)) => {
                    tracing::info!(
                        attempt,
                        bytes = image.bytes.len(),
                        size = %size,
                        "Image synthesis succeeded",
                    );
                    return Ok(image);
                }
                Ok(Err(AttemptError::Rejected(message))) => {
                    tracing::warn!(attempt, %message, "Image synthesis rejected by provider");
                    return Err(SynthesisError::Rejected(message));
                }
                Ok(Err(failure)) => {
                    tracing::warn!(attempt, ?failure, "Image synthesis attempt failed");
                    last_failure = failure;
                }
            }
        }

        Err(classify_exhausted(last_failure, self.retry.request_deadline))
    }

    /// One generation attempt: request, status handling, and payload
    /// normalization (inline decode or URL fetch).
    async fn attempt(
        &self,
        prompt: &str,
        size: CanvasSize,
    ) -> Result<SynthesizedImage, AttemptError> {
        let body = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "size": size.to_string(),
        });

        let response = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AttemptError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(classify_failure(status.as_u16(), &body));
        }

        let parsed: GenerationsResponse = response
            .json()
            .await
            .map_err(|e| AttemptError::Transport(format!("Malformed response body: {e}")))?;

        if let Some(error) = parsed.error {
            return Err(AttemptError::Rejected(error.message));
        }

        let payload = parsed
            .data
            .into_iter()
            .next()
            .and_then(ImagePayload::from_datum)
            .ok_or_else(|| {
                AttemptError::Transport("Provider returned no image payload".to_string())
            })?;

        self.normalize(payload).await
    }

    /// Collapse both payload shapes into raw image bytes.
    async fn normalize(&self, payload: ImagePayload) -> Result<SynthesizedImage, AttemptError> {
        match payload {
            ImagePayload::Inline(b64) => {
                let bytes = crate::payload::decode_inline(&b64)
                    .map_err(|e| AttemptError::Transport(format!("Invalid base64 payload: {e}")))?;
                Ok(SynthesizedImage {
                    bytes,
                    content_type: INLINE_CONTENT_TYPE.to_string(),
                })
            }
            ImagePayload::Remote(url) => self.fetch_remote(&url).await,
        }
    }

    /// Fetch a result image from the provider-returned URL, with its own
    /// timeout.
    async fn fetch_remote(&self, url: &str) -> Result<SynthesizedImage, AttemptError> {
        let response = self
            .client
            .get(url)
            .timeout(self.retry.fetch_timeout)
            .send()
            .await
            .map_err(|e| AttemptError::Transport(format!("Image fetch failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AttemptError::Upstream {
                status: status.as_u16(),
                body: format!("Image fetch returned {status}"),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(INLINE_CONTENT_TYPE)
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AttemptError::Transport(format!("Image fetch failed: {e}")))?;
        if bytes.is_empty() {
            return Err(AttemptError::Transport(
                "Image fetch returned an empty body".to_string(),
            ));
        }

        Ok(SynthesizedImage {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}

/// Classify a non-success HTTP response.
///
/// A 4xx with a structured provider error body is a terminal rejection;
/// anything else is treated as transient and retried.
fn classify_failure(status: u16, body: &str) -> AttemptError {
    if (400..500).contains(&status) {
        if let Some(message) = parse_error_message(body) {
            return AttemptError::Rejected(message);
        }
    }
    AttemptError::Upstream {
        status,
        body: body.chars().take(200).collect(),
    }
}

/// Map the last attempt failure onto the caller-facing error once retries
/// are exhausted.
fn classify_exhausted(last: AttemptError, deadline: Duration) -> SynthesisError {
    match last {
        AttemptError::Deadline => SynthesisError::Timeout(deadline),
        AttemptError::Transport(message) => SynthesisError::Unavailable(message),
        AttemptError::Upstream { status, body } => {
            SynthesisError::Unavailable(format!("Provider returned {status}: {body}"))
        }
        // Rejections return early; reaching here means a logic error, but
        // surfacing the message still beats panicking.
        AttemptError::Rejected(message) => SynthesisError::Rejected(message),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    // -- classify_failure --

    #[test]
    fn structured_4xx_is_rejected() {
        let body = r#"{"error":{"message":"prompt blocked","type":"invalid_request_error"}}"#;
        assert_matches!(classify_failure(400, body), AttemptError::Rejected(m) if m == "prompt blocked");
    }

    #[test]
    fn unstructured_4xx_is_retryable() {
        assert_matches!(
            classify_failure(429, "slow down"),
            AttemptError::Upstream { status: 429, .. }
        );
    }

    #[test]
    fn structured_5xx_is_retryable() {
        // A 5xx is a provider fault even when the body parses; only
        // client-side rejections bypass retry.
        let body = r#"{"error":{"message":"internal","type":"server_error"}}"#;
        assert_matches!(
            classify_failure(500, body),
            AttemptError::Upstream { status: 500, .. }
        );
    }

    #[test]
    fn upstream_body_is_truncated() {
        let long_body = "x".repeat(1000);
        assert_matches!(
            classify_failure(502, &long_body),
            AttemptError::Upstream { body, .. } if body.len() == 200
        );
    }

    // -- classify_exhausted --

    #[test]
    fn exhausted_deadline_is_timeout() {
        let deadline = Duration::from_secs(45);
        assert_matches!(
            classify_exhausted(AttemptError::Deadline, deadline),
            SynthesisError::Timeout(d) if d == deadline
        );
    }

    #[test]
    fn exhausted_transport_is_unavailable() {
        assert_matches!(
            classify_exhausted(
                AttemptError::Transport("connection reset".to_string()),
                Duration::from_secs(45),
            ),
            SynthesisError::Unavailable(_)
        );
    }

    #[test]
    fn exhausted_upstream_is_unavailable() {
        assert_matches!(
            classify_exhausted(
                AttemptError::Upstream {
                    status: 503,
                    body: "unavailable".to_string(),
                },
                Duration::from_secs(45),
            ),
            SynthesisError::Unavailable(m) if m.contains("503")
        );
    }
}
