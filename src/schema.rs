//! Response-shape contracts handed to the structured-output feature of the
//! remote service.
//!
//! These are deliberately plain `serde_json::Value` data — not a validation
//! library — because their only consumer is the service itself: the schema
//! is sent with the request and the model conforms its JSON output to it.
//! Field names and enumerations mirror [`crate::result`] exactly, which is
//! what makes the response directly deserialisable.

use serde_json::{json, Value};

/// Schema for one document's analysis (mirrors
/// [`crate::result::AnalysisResult`]).
pub fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "simpleExplanation": { "type": "STRING" },
            "onePageSummary": { "type": "STRING" },
            "riskScore": { "type": "INTEGER" },
            "riskLevel": { "type": "STRING", "enum": ["Safe", "Caution", "Risky", "Critical"] },
            "verdict": { "type": "STRING", "enum": ["Mostly normal", "Needs attention", "High risk"] },
            "verdictReason": { "type": "STRING" },
            "redFlags": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "severity": { "type": "STRING", "enum": ["High", "Medium", "Low"] },
                        "location": { "type": "STRING" },
                        "oneSided": { "type": "BOOLEAN" }
                    },
                    "required": ["title", "description", "severity"]
                }
            },
            "financialBreakdown": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "label": { "type": "STRING" },
                        "value": { "type": "STRING" },
                        "type": { "type": "STRING", "enum": ["fee", "penalty", "charge", "other"] },
                        "frequency": { "type": "STRING" }
                    }
                }
            },
            "importantDates": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "date": { "type": "STRING" },
                        "event": { "type": "STRING" },
                        "deadline": { "type": "BOOLEAN" }
                    }
                }
            },
            "scamRiskScore": { "type": "INTEGER" },
            "scamAnalysis": { "type": "STRING" },
            "clauses": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "originalTitle": { "type": "STRING" },
                        "simplifiedExplanation": { "type": "STRING" },
                        "impact": { "type": "STRING", "enum": ["Positive", "Neutral", "Negative"] }
                    }
                }
            },
            "questionsToAsk": { "type": "ARRAY", "items": { "type": "STRING" } },
            "personalizedWarnings": { "type": "ARRAY", "items": { "type": "STRING" } }
        }
    })
}

/// Schema for a multi-document comparison (mirrors
/// [`crate::result::ComparisonResult`]). Embeds [`analysis_schema`] for the
/// per-document entries.
pub fn comparison_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "docs": { "type": "ARRAY", "items": analysis_schema() },
            "comparisonSummary": { "type": "STRING" },
            "winner": { "type": "STRING" },
            "winnerReason": { "type": "STRING" },
            "comparisonTable": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "feature": { "type": "STRING" },
                        "values": { "type": "ARRAY", "items": { "type": "STRING" } }
                    }
                }
            }
        }
    })
}
