//! Typed analysis results returned by the remote service.
//!
//! Field names on the wire are camelCase and mirror the response schemas in
//! [`crate::schema`] one-to-one — the service is asked to produce exactly
//! this shape, so deserialisation is direct with no free-form extraction.
//!
//! Every list field carries `#[serde(default)]`: renderers always see an
//! empty list, never an absent one. Scalar fields default too, so a response
//! that omits a field still produces a usable result instead of a parse
//! failure (the original trusting behaviour). Score clamping and table-row
//! alignment happen afterwards in [`crate::pipeline::respond`].

use serde::{Deserialize, Serialize};

/// The outcome of one user-initiated scan.
///
/// Held by the caller until a reset or the next scan discards it; nothing is
/// persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ScanOutcome {
    /// Single-document analysis (one input submitted).
    Single(AnalysisResult),
    /// Multi-document comparison (two or more inputs submitted).
    Comparison(ComparisonResult),
}

impl ScanOutcome {
    /// All per-document analyses, in input order.
    pub fn docs(&self) -> &[AnalysisResult] {
        match self {
            ScanOutcome::Single(a) => std::slice::from_ref(a),
            ScanOutcome::Comparison(c) => &c.docs,
        }
    }
}

/// One document's findings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisResult {
    /// Display name of the analysed input, attached client-side after
    /// parsing (`"Pasted Content"` for non-file single inputs,
    /// `"Document {i+1}"` fallback in comparisons).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// Free-text summary of the whole document.
    pub summary: String,
    /// Jargon-free restatement of what the document means in practice.
    pub simple_explanation: String,
    /// Hyper-concise one-page version of the summary.
    pub one_page_summary: String,

    /// Overall risk score, 0–100. Clamped during post-processing.
    pub risk_score: i64,
    pub risk_level: RiskLevel,
    pub verdict: Verdict,
    pub verdict_reason: String,

    pub red_flags: Vec<RedFlag>,
    pub financial_breakdown: Vec<FinancialDetail>,
    pub important_dates: Vec<ImportantDate>,

    /// Likelihood the document is fraudulent, 0–100. Clamped during
    /// post-processing.
    pub scam_risk_score: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scam_analysis: Option<String>,

    pub clauses: Vec<SimplifiedClause>,
    pub questions_to_ask: Vec<String>,
    pub personalized_warnings: Vec<String>,
}

/// Aggregate result of a multi-document comparison.
///
/// `docs` is order-preserving and index-aligned with the submitted inputs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComparisonResult {
    pub docs: Vec<AnalysisResult>,
    pub comparison_summary: String,
    /// Identifier of the "best" choice among the documents.
    pub winner: String,
    pub winner_reason: String,
    pub comparison_table: Vec<ComparisonRow>,
}

/// One row of the comparison matrix: a feature label plus one value per
/// document. Post-processing pads missing values with a placeholder so
/// `values.len()` always equals `docs.len()`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonRow {
    pub feature: String,
    pub values: Vec<String>,
}

/// A clause or pattern the service judged risky or one-sided.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedFlag {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub severity: Severity,
    /// Where in the document the flag was found, if the service located it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Marks a clause as unfair or one-sided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_sided: Option<bool>,
}

/// One extracted fee, penalty or charge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialDetail {
    pub label: String,
    /// Display value as written in the document (e.g. "$25/month").
    pub value: String,
    #[serde(rename = "type", default)]
    pub category: FinancialCategory,
    /// Recurrence, if any (e.g. "monthly", "per incident").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
}

/// A critical date or duration extracted from the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportantDate {
    pub date: String,
    pub event: String,
    #[serde(default)]
    pub deadline: bool,
}

/// A clause heading with its plain-language explanation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedClause {
    pub original_title: String,
    pub simplified_explanation: String,
    #[serde(default)]
    pub impact: ClauseImpact,
}

// ── Enumerations ─────────────────────────────────────────────────────────

/// Categorical risk level for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RiskLevel {
    Safe,
    /// Neutral middle ground; also the default when the service omits the
    /// field.
    #[default]
    Caution,
    Risky,
    Critical,
}

/// Categorical verdict for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Mostly normal")]
    MostlyNormal,
    #[default]
    #[serde(rename = "Needs attention")]
    NeedsAttention,
    #[serde(rename = "High risk")]
    HighRisk,
}

/// Severity of a red flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Severity {
    High,
    #[default]
    Medium,
    Low,
}

/// Kind of financial term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinancialCategory {
    Fee,
    Penalty,
    Charge,
    #[default]
    Other,
}

/// Impact classification of a simplified clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClauseImpact {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskLevel::Safe => "Safe",
            RiskLevel::Caution => "Caution",
            RiskLevel::Risky => "Risky",
            RiskLevel::Critical => "Critical",
        };
        f.write_str(s)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Verdict::MostlyNormal => "Mostly normal",
            Verdict::NeedsAttention => "Needs attention",
            Verdict::HighRisk => "High risk",
        };
        f.write_str(s)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_result_list_fields_default_to_empty() {
        let parsed: AnalysisResult =
            serde_json::from_str(r#"{"summary":"ok","riskScore":12}"#).expect("lenient parse");
        assert_eq!(parsed.summary, "ok");
        assert_eq!(parsed.risk_score, 12);
        assert!(parsed.red_flags.is_empty());
        assert!(parsed.clauses.is_empty());
        assert!(parsed.questions_to_ask.is_empty());
        assert!(parsed.file_name.is_none());
    }

    #[test]
    fn verdict_wire_names() {
        let v: Verdict = serde_json::from_str(r#""Mostly normal""#).unwrap();
        assert_eq!(v, Verdict::MostlyNormal);
        assert_eq!(
            serde_json::to_string(&Verdict::HighRisk).unwrap(),
            r#""High risk""#
        );
    }

    #[test]
    fn financial_category_is_lowercase_on_wire() {
        let d: FinancialDetail = serde_json::from_str(
            r#"{"label":"Late fee","value":"$25","type":"penalty","frequency":"monthly"}"#,
        )
        .unwrap();
        assert_eq!(d.category, FinancialCategory::Penalty);
        assert_eq!(d.frequency.as_deref(), Some("monthly"));
    }

    #[test]
    fn red_flag_optional_fields() {
        let f: RedFlag = serde_json::from_str(
            r#"{"title":"Auto-renewal","description":"Renews silently","severity":"High"}"#,
        )
        .unwrap();
        assert_eq!(f.severity, Severity::High);
        assert!(f.location.is_none());
        assert!(f.one_sided.is_none());
    }

    #[test]
    fn scan_outcome_docs_view() {
        let single = ScanOutcome::Single(AnalysisResult::default());
        assert_eq!(single.docs().len(), 1);

        let cmp = ScanOutcome::Comparison(ComparisonResult {
            docs: vec![AnalysisResult::default(), AnalysisResult::default()],
            ..Default::default()
        });
        assert_eq!(cmp.docs().len(), 2);
    }
}
