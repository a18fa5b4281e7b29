//! Top-level scan entry points.
//!
//! One scan is one request/response exchange: build the request, resolve a
//! provider, await the single remote call, shape the response. No retry —
//! a failed call surfaces immediately and rerunning the scan is the retry
//! action.

use crate::config::AnalysisConfig;
use crate::error::DocwiseError;
use crate::pipeline::normalize::InputItem;
use crate::pipeline::{request, respond};
use crate::provider::{AnalysisProvider, GeminiProvider};
use crate::result::ScanOutcome;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Analyse one document or compare several.
///
/// Mode is chosen from the input count: a single input gets one thorough
/// analysis, two or more get one analysis per document plus an aggregate
/// comparison (see [`crate::pipeline::request`]).
///
/// # Arguments
/// * `inputs` — normalized inputs in submission order
///   (see [`crate::pipeline::normalize`])
/// * `config` — scan configuration
///
/// # Errors
/// [`DocwiseError::NoInputs`] for an empty sequence; otherwise the remote
/// contract and transport errors documented on [`DocwiseError`].
pub async fn analyze(
    inputs: &[InputItem],
    config: &AnalysisConfig,
) -> Result<ScanOutcome, DocwiseError> {
    let start = Instant::now();

    let request = request::build_request(inputs, config)?;
    info!(
        "Starting scan: {} input(s), mode {:?}, model {}",
        inputs.len(),
        request.mode,
        request.model
    );

    let provider = resolve_provider(config)?;
    let text = provider.generate(&request).await?;
    let outcome = respond::parse_outcome(&text, inputs, request.mode)?;

    info!(
        "Scan complete: {} document(s) in {}ms",
        outcome.docs().len(),
        start.elapsed().as_millis()
    );

    Ok(outcome)
}

/// Synchronous wrapper around [`analyze`].
///
/// Creates a temporary tokio runtime internally.
pub fn analyze_sync(
    inputs: &[InputItem],
    config: &AnalysisConfig,
) -> Result<ScanOutcome, DocwiseError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| DocwiseError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(analyze(inputs, config))
}

/// Resolve the analysis provider, from most-specific to least-specific:
///
/// 1. **Pre-built provider** (`config.provider`) — the caller constructed it
///    entirely; used as-is. This is the mock seam for tests.
/// 2. **Configured key** (`config.api_key`) — explicit per-request
///    credential.
/// 3. **Environment** — `GEMINI_API_KEY`, the single process-start
///    credential.
fn resolve_provider(config: &AnalysisConfig) -> Result<Arc<dyn AnalysisProvider>, DocwiseError> {
    if let Some(ref provider) = config.provider {
        return Ok(Arc::clone(provider));
    }

    if let Some(ref key) = config.api_key {
        return Ok(Arc::new(GeminiProvider::new(
            key.clone(),
            config.api_timeout_secs,
        )?));
    }

    Ok(Arc::new(GeminiProvider::from_env(config.api_timeout_secs)?))
}
