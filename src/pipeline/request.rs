//! Request assembly: turn normalized inputs plus config into one opaque
//! model request.
//!
//! Pure construction — no I/O happens here. The provider decides how the
//! request goes on the wire; this stage decides *what* is in it: mode,
//! model variant, instruction block, ordered content parts, the response
//! schema contract, and the live-retrieval capability flag.

use crate::config::AnalysisConfig;
use crate::error::DocwiseError;
use crate::pipeline::normalize::InputItem;
use crate::{prompts, schema};
use serde_json::Value;
use tracing::debug;

/// Request/response path for a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    /// One input: a single thorough analysis.
    Single,
    /// Two or more inputs: one analysis per document plus an aggregate
    /// comparison.
    Comparison,
}

/// Which model variant a scan uses.
///
/// A cost/quality policy: comparisons and live URL retrieval get the
/// higher-capability variant, everything else the lighter one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelVariant {
    /// Lighter, cheaper variant.
    Flash,
    /// Higher-capability variant.
    Pro,
}

/// One content block of the request, in submission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text(String),
    /// Binary attachment (base64) tagged with its media type.
    Inline { mime_type: String, data: String },
}

/// A fully assembled model request, ready for an
/// [`crate::provider::AnalysisProvider`].
#[derive(Debug, Clone)]
pub struct ModelRequest {
    /// Resolved model identifier.
    pub model: String,
    pub variant: ModelVariant,
    pub mode: AnalysisMode,
    /// Instruction block followed by per-input content, in order.
    pub parts: Vec<ContentPart>,
    /// Response-shape contract the service is asked to conform to.
    pub response_schema: Value,
    /// Ask the service for live web retrieval (set when any input is a URL).
    pub enable_search: bool,
}

/// Mode selection: comparison whenever two or more inputs are present.
pub fn select_mode(input_count: usize) -> AnalysisMode {
    if input_count >= 2 {
        AnalysisMode::Comparison
    } else {
        AnalysisMode::Single
    }
}

/// Variant selection: comparison mode or any URL input forces the
/// higher-capability path.
pub fn select_variant(inputs: &[InputItem], mode: AnalysisMode) -> ModelVariant {
    if mode == AnalysisMode::Comparison || inputs.iter().any(InputItem::is_url) {
        ModelVariant::Pro
    } else {
        ModelVariant::Flash
    }
}

/// Assemble the request for the given inputs.
///
/// Content layout: the instruction block first, then each input in
/// submission order. In comparison mode every input is wrapped in
/// `--- START OF DOCUMENT N (name) ---` / `--- END OF DOCUMENT N ---`
/// delimiters so the model can attribute findings to the right document.
pub fn build_request(
    inputs: &[InputItem],
    config: &AnalysisConfig,
) -> Result<ModelRequest, DocwiseError> {
    if inputs.is_empty() {
        return Err(DocwiseError::NoInputs);
    }

    let mode = select_mode(inputs.len());
    let variant = select_variant(inputs, mode);
    let enable_search = inputs.iter().any(InputItem::is_url);

    let model = match variant {
        ModelVariant::Flash => config.flash_model.clone(),
        ModelVariant::Pro => config.pro_model.clone(),
    };

    let instructions = config.instructions.clone().unwrap_or_else(|| {
        prompts::build_instructions(config.persona, &config.target_language, mode)
    });

    let mut parts = Vec::with_capacity(1 + inputs.len() * 3);
    parts.push(ContentPart::Text(instructions));

    for (idx, input) in inputs.iter().enumerate() {
        if mode == AnalysisMode::Comparison {
            let name = input.display_name().unwrap_or("pasted input");
            parts.push(ContentPart::Text(prompts::document_start_marker(idx, name)));
        }

        match input {
            InputItem::File {
                data, mime_type, ..
            } => parts.push(ContentPart::Inline {
                mime_type: mime_type.clone(),
                data: data.clone(),
            }),
            InputItem::Text { content } => {
                parts.push(ContentPart::Text(format!("Source (text): {content}")));
            }
            InputItem::Url { url } => {
                parts.push(ContentPart::Text(format!("Source (url): {url}")));
            }
        }

        if mode == AnalysisMode::Comparison {
            parts.push(ContentPart::Text(prompts::document_end_marker(idx)));
        }
    }

    let response_schema = match mode {
        AnalysisMode::Single => schema::analysis_schema(),
        AnalysisMode::Comparison => schema::comparison_schema(),
    };

    debug!(
        "Built request: model={model}, mode={mode:?}, {} parts, search={enable_search}",
        parts.len()
    );

    Ok(ModelRequest {
        model,
        variant,
        mode,
        parts,
        response_schema,
        enable_search,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Persona;

    fn file(name: &str, mime: &str) -> InputItem {
        InputItem::File {
            data: "AAAA".into(),
            mime_type: mime.into(),
            display_name: name.into(),
        }
    }

    fn text_parts(req: &ModelRequest) -> Vec<&str> {
        req.parts
            .iter()
            .filter_map(|p| match p {
                ContentPart::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn empty_inputs_rejected() {
        let err = build_request(&[], &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, DocwiseError::NoInputs));
    }

    #[test]
    fn single_pdf_uses_flash_and_no_delimiters() {
        let config = AnalysisConfig::builder()
            .persona(Persona::Student)
            .target_language("Spanish")
            .build()
            .unwrap();
        let inputs = [file("lease.pdf", "application/pdf")];
        let req = build_request(&inputs, &config).unwrap();

        assert_eq!(req.mode, AnalysisMode::Single);
        assert_eq!(req.variant, ModelVariant::Flash);
        assert_eq!(req.model, "gemini-3-flash-preview");
        assert!(!req.enable_search);
        // instruction block + one inline attachment, nothing else
        assert_eq!(req.parts.len(), 2);
        assert!(text_parts(&req)[0].contains("Target Language: Spanish."));
        assert!(matches!(
            &req.parts[1],
            ContentPart::Inline { mime_type, .. } if mime_type == "application/pdf"
        ));
        assert_eq!(req.response_schema["properties"]["riskScore"]["type"], "INTEGER");
        assert!(req.response_schema["properties"].get("docs").is_none());
    }

    #[test]
    fn two_inputs_get_comparison_mode_and_delimiters() {
        let inputs = [file("a.png", "image/png"), file("b.png", "image/png")];
        let req = build_request(&inputs, &AnalysisConfig::default()).unwrap();

        assert_eq!(req.mode, AnalysisMode::Comparison);
        assert_eq!(req.variant, ModelVariant::Pro);
        assert_eq!(req.model, "gemini-3-pro-preview");
        // instructions + 2 × (start, content, end)
        assert_eq!(req.parts.len(), 7);

        let texts = text_parts(&req);
        assert!(texts.contains(&"--- START OF DOCUMENT 1 (a.png) ---"));
        assert!(texts.contains(&"--- END OF DOCUMENT 1 ---"));
        assert!(texts.contains(&"--- START OF DOCUMENT 2 (b.png) ---"));
        assert_eq!(req.response_schema["properties"]["docs"]["type"], "ARRAY");
    }

    #[test]
    fn lone_url_forces_pro_and_search() {
        let inputs = [InputItem::Url {
            url: "https://example.com/terms".into(),
        }];
        let req = build_request(&inputs, &AnalysisConfig::default()).unwrap();

        assert_eq!(req.mode, AnalysisMode::Single);
        assert_eq!(req.variant, ModelVariant::Pro);
        assert!(req.enable_search);
        assert!(text_parts(&req)
            .iter()
            .any(|t| *t == "Source (url): https://example.com/terms"));
    }

    #[test]
    fn text_input_is_labelled_with_its_kind() {
        let inputs = [InputItem::Text {
            content: "No refunds under any circumstances.".into(),
        }];
        let req = build_request(&inputs, &AnalysisConfig::default()).unwrap();
        assert_eq!(req.variant, ModelVariant::Flash);
        assert!(text_parts(&req)
            .iter()
            .any(|t| t.starts_with("Source (text): No refunds")));
    }

    #[test]
    fn instruction_override_wins() {
        let config = AnalysisConfig::builder()
            .instructions("Summarise only.")
            .build()
            .unwrap();
        let inputs = [file("a.pdf", "application/pdf")];
        let req = build_request(&inputs, &config).unwrap();
        assert_eq!(text_parts(&req)[0], "Summarise only.");
    }
}
