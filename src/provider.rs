//! The remote analysis capability, abstracted behind one trait with one
//! operation so tests can substitute a mock without touching request
//! building.
//!
//! [`GeminiProvider`] is the production implementation: it serialises a
//! [`ModelRequest`] into the `generateContent` REST wire format, posts it,
//! and returns the raw textual payload. Parsing and shaping of that payload
//! live in [`crate::pipeline::respond`] — the provider never interprets the
//! analysis itself.

use crate::error::DocwiseError;
use crate::pipeline::request::{ContentPart, ModelRequest};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable holding the service credential.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// A remote service that turns a [`ModelRequest`] into a textual payload.
///
/// Exactly one operation: submit request → raw text or failure. The call may
/// take on the order of seconds; it is cancellable by abandonment only — no
/// mid-flight cancellation, no partial results, no retry.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Submit the request and await the service's textual payload.
    async fn generate(&self, request: &ModelRequest) -> Result<String, DocwiseError>;
}

/// Production provider for the Gemini `generateContent` endpoint.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiProvider {
    /// Build a provider with an explicit API key.
    pub fn new(api_key: impl Into<String>, timeout_secs: u64) -> Result<Self, DocwiseError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(DocwiseError::MissingApiKey);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| DocwiseError::Internal(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Build a provider from the `GEMINI_API_KEY` environment variable.
    pub fn from_env(timeout_secs: u64) -> Result<Self, DocwiseError> {
        let key = std::env::var(API_KEY_ENV).map_err(|_| DocwiseError::MissingApiKey)?;
        Self::new(key, timeout_secs)
    }

    /// Point the provider at a different endpoint (self-hosted gateways,
    /// tests against a local stub).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Serialise the request into the `generateContent` body.
    fn wire_body(request: &ModelRequest) -> Value {
        let parts: Vec<Value> = request
            .parts
            .iter()
            .map(|part| match part {
                ContentPart::Text(t) => json!({ "text": t }),
                ContentPart::Inline { mime_type, data } => json!({
                    "inlineData": { "mimeType": mime_type, "data": data }
                }),
            })
            .collect();

        let mut body = json!({
            "contents": [{ "parts": parts }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": request.response_schema.clone(),
            }
        });

        if request.enable_search {
            body["tools"] = json!([{ "googleSearch": {} }]);
        }

        body
    }
}

#[async_trait]
impl AnalysisProvider for GeminiProvider {
    async fn generate(&self, request: &ModelRequest) -> Result<String, DocwiseError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, request.model
        );
        let body = Self::wire_body(request);

        info!("Submitting analysis request to model {}", request.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DocwiseError::TransportError {
                message: if e.is_timeout() {
                    format!("request timed out: {e}")
                } else {
                    e.to_string()
                },
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| DocwiseError::TransportError {
                message: e.to_string(),
            })?;

        if !status.is_success() {
            return Err(DocwiseError::ApiError {
                status: status.as_u16(),
                message: extract_api_error(&text),
            });
        }

        let payload: GenerateContentResponse =
            serde_json::from_str(&text).map_err(|source| DocwiseError::MalformedResponse {
                source,
            })?;

        let combined = payload.text();
        if combined.trim().is_empty() {
            return Err(DocwiseError::EmptyResponse);
        }

        debug!("Received {} bytes of analysis text", combined.len());
        Ok(combined)
    }
}

/// Pull the human-readable message out of a service error body, falling
/// back to the raw body (truncated) when it is not the documented shape.
fn extract_api_error(body: &str) -> String {
    #[derive(Deserialize)]
    struct ApiErrorBody {
        error: ApiErrorDetail,
    }
    #[derive(Deserialize)]
    struct ApiErrorDetail {
        message: String,
    }

    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if !parsed.error.message.trim().is_empty() => parsed.error.message,
        _ => {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "Document analysis failed.".to_string()
            } else {
                trimmed.chars().take(200).collect()
            }
        }
    }
}

// ── Wire response envelope ────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenate every text part of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}
