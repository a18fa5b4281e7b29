//! Response shaping: parse the service's JSON text and post-process it into
//! a [`ScanOutcome`].
//!
//! The taxonomy is strict about which error means what:
//!
//! * not JSON at all → [`DocwiseError::MalformedResponse`] (carries the
//!   parse error)
//! * JSON but `docs` missing or not an array in comparison mode →
//!   [`DocwiseError::SchemaViolation`], and no partial result escapes
//! * JSON that otherwise fails to match the requested shape →
//!   [`DocwiseError::SchemaViolation`] with the deserialiser's detail
//!
//! Post-processing deviates from the trusting original in two deliberate
//! ways (see DESIGN.md): risk scores are clamped to [0,100] and
//! comparison-table rows are padded or truncated to exactly one value per
//! document.

use crate::error::DocwiseError;
use crate::pipeline::normalize::InputItem;
use crate::pipeline::request::AnalysisMode;
use crate::result::{AnalysisResult, ComparisonResult, ScanOutcome};
use serde_json::Value;
use tracing::debug;

/// Placeholder shown for a comparison-matrix cell the service left out.
pub const MISSING_CELL: &str = "—";

/// Fallback display name for a non-file single input.
const PASTED_CONTENT: &str = "Pasted Content";

/// Parse and shape the service's textual payload.
///
/// `inputs` must be the exact sequence submitted to the request builder;
/// display names are re-attached by positional index.
pub fn parse_outcome(
    text: &str,
    inputs: &[InputItem],
    mode: AnalysisMode,
) -> Result<ScanOutcome, DocwiseError> {
    if text.trim().is_empty() {
        return Err(DocwiseError::EmptyResponse);
    }

    let value: Value =
        serde_json::from_str(text).map_err(|source| DocwiseError::MalformedResponse { source })?;

    match mode {
        AnalysisMode::Single => {
            let mut analysis: AnalysisResult = serde_json::from_value(value)
                .map_err(|e| DocwiseError::SchemaViolation(e.to_string()))?;

            analysis.file_name = Some(
                inputs
                    .first()
                    .and_then(|i| i.display_name())
                    .unwrap_or(PASTED_CONTENT)
                    .to_string(),
            );
            clamp_scores(&mut analysis);

            Ok(ScanOutcome::Single(analysis))
        }
        AnalysisMode::Comparison => {
            // The docs list is the load-bearing part of the contract; check
            // it explicitly before typed deserialisation so its absence is a
            // schema violation rather than a generic shape error.
            if !value.get("docs").map(Value::is_array).unwrap_or(false) {
                return Err(DocwiseError::SchemaViolation(
                    "Comparison results were missing.".into(),
                ));
            }

            let mut comparison: ComparisonResult = serde_json::from_value(value)
                .map_err(|e| DocwiseError::SchemaViolation(e.to_string()))?;

            for (i, doc) in comparison.docs.iter_mut().enumerate() {
                doc.file_name = Some(
                    inputs
                        .get(i)
                        .and_then(|input| input.display_name())
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("Document {}", i + 1)),
                );
                clamp_scores(doc);
            }

            align_comparison_table(&mut comparison);
            debug!(
                "Parsed comparison: {} docs, {} table rows",
                comparison.docs.len(),
                comparison.comparison_table.len()
            );

            Ok(ScanOutcome::Comparison(comparison))
        }
    }
}

/// Clamp both scores to the declared [0,100] range.
fn clamp_scores(analysis: &mut AnalysisResult) {
    analysis.risk_score = analysis.risk_score.clamp(0, 100);
    analysis.scam_risk_score = analysis.scam_risk_score.clamp(0, 100);
}

/// Make every comparison-table row carry exactly one value per document:
/// missing cells become [`MISSING_CELL`], surplus cells are dropped.
fn align_comparison_table(comparison: &mut ComparisonResult) {
    let doc_count = comparison.docs.len();
    for row in &mut comparison.comparison_table {
        row.values.truncate(doc_count);
        while row.values.len() < doc_count {
            row.values.push(MISSING_CELL.to_string());
        }
    }
}
