//! Instruction templates sent with every analysis request.
//!
//! Centralising the prompt text here serves two purposes:
//!
//! 1. **Single source of truth** — tweaking an objective or a delimiter
//!    requires editing exactly one place.
//!
//! 2. **Testability** — unit tests can inspect the assembled instruction
//!    block without a live model, so prompt regressions are caught cheaply.
//!
//! Callers can override the whole block via
//! [`crate::config::AnalysisConfig::instructions`]; the functions here are
//! used only when no override is provided.

use crate::config::Persona;
use crate::pipeline::request::AnalysisMode;

/// The five fixed analytical objectives, identical for every scan.
pub const CORE_OBJECTIVES: &str = "\
Core Objectives:
- DECODE: Translate legal jargon into everyday language.
- PROTECT: Highlight unfair, one-sided, or unusual terms.
- FINANCIALS: List all fees, penalties, and renewal charges.
- SCAM CHECK: Check for red flags indicating fraudulent documents.
- DATES: Extract all critical deadlines and durations.";

/// Directive appended in comparison mode.
pub const COMPARISON_DIRECTIVE: &str = "You are comparing multiple documents. \
Provide an individual analysis for each AND a comprehensive comparison result.";

/// Directive appended in single-document mode.
pub const SINGLE_DIRECTIVE: &str = "Analyze the provided document thoroughly.";

/// Assemble the instruction block for one scan.
pub fn build_instructions(persona: Persona, target_language: &str, mode: AnalysisMode) -> String {
    let directive = match mode {
        AnalysisMode::Comparison => COMPARISON_DIRECTIVE,
        AnalysisMode::Single => SINGLE_DIRECTIVE,
    };

    format!(
        "You are DocWise AI, a specialized legal document analysis tool.\n\
         Target Language: {target_language}.\n\
         User Context: {persona}.\n\n\
         {CORE_OBJECTIVES}\n\n\
         {directive}"
    )
}

/// Delimiter marking the start of document `idx` (0-based) in a comparison.
pub fn document_start_marker(idx: usize, display_name: &str) -> String {
    format!("--- START OF DOCUMENT {} ({}) ---", idx + 1, display_name)
}

/// Delimiter closing document `idx` (0-based) in a comparison.
pub fn document_end_marker(idx: usize) -> String {
    format!("--- END OF DOCUMENT {} ---", idx + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instructions_embed_persona_and_language() {
        let text = build_instructions(Persona::Student, "Spanish", AnalysisMode::Single);
        assert!(text.contains("User Context: Student."));
        assert!(text.contains("Target Language: Spanish."));
        assert!(text.contains("SCAM CHECK"));
        assert!(text.contains(SINGLE_DIRECTIVE));
        assert!(!text.contains("comparing multiple documents"));
    }

    #[test]
    fn comparison_directive_selected_by_mode() {
        let text = build_instructions(
            Persona::SmallBusiness,
            "Simple English",
            AnalysisMode::Comparison,
        );
        assert!(text.contains("User Context: Small Business."));
        assert!(text.contains(COMPARISON_DIRECTIVE));
    }

    #[test]
    fn markers_are_one_indexed() {
        assert_eq!(
            document_start_marker(0, "lease.pdf"),
            "--- START OF DOCUMENT 1 (lease.pdf) ---"
        );
        assert_eq!(document_end_marker(1), "--- END OF DOCUMENT 2 ---");
    }
}
