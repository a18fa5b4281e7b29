//! Input normalization: unify files, pasted text, and URLs into one ordered
//! sequence of [`InputItem`].
//!
//! The three input kinds are fixed, so they are modelled as a closed tagged
//! variant and handled exhaustively here and in
//! [`crate::pipeline::request`] — no open-ended dynamic typing.

use crate::pipeline::ingest::IngestedFile;

/// One normalized input, immutable once constructed.
#[derive(Debug, Clone)]
pub enum InputItem {
    /// An uploaded file, already validated and base64-transcoded.
    File {
        /// Standard base64 of the file bytes.
        data: String,
        mime_type: String,
        display_name: String,
    },
    /// Pasted raw text.
    Text { content: String },
    /// A URL the service should fetch via live retrieval.
    Url { url: String },
}

impl InputItem {
    /// Source-kind label used in prompt text ("file" / "text" / "url").
    pub fn kind(&self) -> &'static str {
        match self {
            InputItem::File { .. } => "file",
            InputItem::Text { .. } => "text",
            InputItem::Url { .. } => "url",
        }
    }

    /// Original display name; only file inputs carry one.
    pub fn display_name(&self) -> Option<&str> {
        match self {
            InputItem::File { display_name, .. } => Some(display_name),
            _ => None,
        }
    }

    pub fn is_url(&self) -> bool {
        matches!(self, InputItem::Url { .. })
    }
}

/// Check if a pasted value looks like a URL.
pub fn is_url_shaped(input: &str) -> bool {
    let s = input.trim();
    s.starts_with("http://") || s.starts_with("https://")
}

/// Normalize a single pasted value: URL-shaped input is tagged `Url`,
/// anything else is `Text`.
pub fn normalize_text(raw: &str) -> InputItem {
    let trimmed = raw.trim();
    if is_url_shaped(trimmed) {
        InputItem::Url {
            url: trimmed.to_string(),
        }
    } else {
        InputItem::Text {
            content: raw.to_string(),
        }
    }
}

/// Normalize accepted files, preserving submission order.
pub fn normalize_files(files: Vec<IngestedFile>) -> Vec<InputItem> {
    files
        .into_iter()
        .map(|f| InputItem::File {
            data: f.data,
            mime_type: f.mime_type,
            display_name: f.display_name,
        })
        .collect()
}
