//! Error types for the docwise library.
//!
//! Two failure families live in one enum but behave differently at the call
//! sites:
//!
//! * **Validation errors** (bad file type, oversize file, unreadable path)
//!   are collected per file inside [`crate::pipeline::ingest::FileSet`] —
//!   one bad file never aborts the rest of the selection.
//!
//! * **Everything else** (remote-contract violations, transport failures,
//!   configuration problems) is fatal for the scan and returned as
//!   `Err(DocwiseError)` from [`crate::analyze`]. A failed scan surfaces
//!   immediately; there is no automatic retry.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the docwise library.
#[derive(Debug, Error)]
pub enum DocwiseError {
    // ── File validation errors (collected per file, non-fatal) ───────────
    /// File was not found at the given path.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// File extension maps to no supported media type.
    #[error("Unsupported file type for '{path}'\nSupported: PDF, JPEG, PNG, WEBP.")]
    UnsupportedFileType { path: PathBuf },

    /// File exceeds the 10 MiB upload limit.
    #[error("File '{path}' is {size} bytes, over the {limit}-byte limit (10 MiB)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        limit: u64,
    },

    /// File content does not match the media type its extension declares.
    #[error("File '{path}' does not look like {mime_type}\nFirst bytes: {magic:?}")]
    MediaTypeMismatch {
        path: PathBuf,
        mime_type: String,
        magic: [u8; 4],
    },

    // ── Request construction errors ───────────────────────────────────────
    /// A scan was requested with no inputs at all.
    #[error("No inputs to analyse.\nProvide at least one file, pasted text, or URL.")]
    NoInputs,

    // ── Remote contract violations ────────────────────────────────────────
    /// The service returned no textual payload.
    #[error("No analysis generated.")]
    EmptyResponse,

    /// The service's textual payload was not parseable JSON.
    #[error("AI response was not valid JSON: {source}")]
    MalformedResponse {
        #[source]
        source: serde_json::Error,
    },

    /// The parsed payload does not match the requested response schema.
    #[error("AI response error: {0}")]
    SchemaViolation(String),

    // ── Transport / service errors ────────────────────────────────────────
    /// Network-level failure reaching the service.
    #[error("Analysis request failed: {message}")]
    TransportError { message: String },

    /// The service answered with a non-success HTTP status.
    #[error("Analysis service returned HTTP {status}: {message}")]
    ApiError { status: u16, message: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// No API key available from config or the environment.
    #[error("No API key configured.\nSet GEMINI_API_KEY or pass a key via AnalysisConfig.")]
    MissingApiKey,

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DocwiseError {
    /// True for the per-file validation family — the errors that
    /// [`crate::pipeline::ingest`] collects instead of propagating.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DocwiseError::FileNotFound { .. }
                | DocwiseError::PermissionDenied { .. }
                | DocwiseError::UnsupportedFileType { .. }
                | DocwiseError::FileTooLarge { .. }
                | DocwiseError::MediaTypeMismatch { .. }
        )
    }

    /// The single user-facing message for a failed remote call.
    ///
    /// Falls back to a generic message when the underlying error carries
    /// nothing useful, so the error state always has something to show.
    pub fn user_message(&self) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            "Document analysis failed.".to_string()
        } else {
            msg
        }
    }
}
