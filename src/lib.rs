//! # docwise
//!
//! Analyse contracts, terms of service, and offers with a hosted LLM:
//! risk scores, red flags, financial terms, clause simplifications, and
//! multi-document comparisons.
//!
//! ## Why this crate?
//!
//! Legal documents are written to be skimmed past, not understood. docwise
//! forwards a document (PDF or image file, pasted text, or a URL) to a
//! hosted model with a fixed instruction prompt and a declared
//! structured-output schema, then validates and shapes the returned JSON
//! into typed results a renderer can trust: every list field present, every
//! score in range, every document carrying its original name.
//!
//! ## Pipeline Overview
//!
//! ```text
//! files / text / URL
//!  │
//!  ├─ 1. Ingest     validate type & size, base64-transcode accepted files
//!  ├─ 2. Normalize  unify the three input kinds into ordered InputItems
//!  ├─ 3. Request    mode, model variant, instruction block, schema contract
//!  ├─ 4. Provider   one generateContent call (the only network I/O)
//!  └─ 5. Respond    parse JSON, attach names, clamp scores, align tables
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docwise::{analyze, ingest_files, normalize_files, AnalysisConfig, Persona};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // API key read from GEMINI_API_KEY
//!     let config = AnalysisConfig::builder()
//!         .persona(Persona::Student)
//!         .target_language("Spanish")
//!         .build()?;
//!
//!     let files = ingest_files(["lease.pdf"]).await;
//!     for rejection in files.rejections() {
//!         eprintln!("skipped: {rejection}");
//!     }
//!
//!     let inputs = normalize_files(files.into_accepted());
//!     let outcome = analyze(&inputs, &config).await?;
//!     for doc in outcome.docs() {
//!         println!(
//!             "{}: risk {} ({})",
//!             doc.file_name.as_deref().unwrap_or("?"),
//!             doc.risk_score,
//!             doc.risk_level
//!         );
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `docwise` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! docwise = { version = "0.3", default-features = false }
//! ```
//!
//! ## Model variants
//!
//! Single-document scans use the lighter `gemini-3-flash-preview`;
//! comparisons and scans with URL inputs use `gemini-3-pro-preview` (live
//! web retrieval is requested alongside). Both are configurable and may be
//! pinned to one model.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod analyze;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod prompts;
pub mod provider;
pub mod result;
pub mod schema;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use analyze::{analyze, analyze_sync};
pub use config::{AnalysisConfig, AnalysisConfigBuilder, Persona};
pub use error::DocwiseError;
pub use pipeline::ingest::{ingest_files, FileSet, IngestedFile, MAX_FILE_BYTES};
pub use pipeline::normalize::{normalize_files, normalize_text, InputItem};
pub use pipeline::request::{build_request, AnalysisMode, ContentPart, ModelRequest, ModelVariant};
pub use provider::{AnalysisProvider, GeminiProvider};
pub use result::{
    AnalysisResult, ClauseImpact, ComparisonResult, ComparisonRow, FinancialCategory,
    FinancialDetail, ImportantDate, RedFlag, RiskLevel, ScanOutcome, Severity, SimplifiedClause,
    Verdict,
};
