//! File ingestion: validate selected files and transcode them to base64.
//!
//! Validation is per file and never aborts the rest of the selection — a
//! rejected file becomes a collected [`DocwiseError`] while its neighbours
//! proceed. The accepted list preserves submission order even though files
//! are read and transcoded concurrently.
//!
//! The media type is declared by the file extension (the CLI equivalent of
//! a browser-declared MIME type) and then checked against the content's
//! magic bytes, so a mislabelled file fails here with a clear message
//! instead of a confusing service-side error.

use crate::error::DocwiseError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Upload limit per file: 10 MiB, inclusive.
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// How many files are read and transcoded at once.
const TRANSCODE_CONCURRENCY: usize = 4;

/// One accepted, base64-transcoded file ready for the request builder.
#[derive(Debug, Clone)]
pub struct IngestedFile {
    /// Original file name (final path component), shown in results.
    pub display_name: String,
    /// Declared media type, e.g. `application/pdf`.
    pub mime_type: String,
    /// Standard base64 of the raw file bytes, ready to embed in a JSON
    /// request body.
    pub data: String,
    /// Size of the raw file in bytes (pre-encoding).
    pub byte_len: u64,
}

/// Ordered, append-only accumulator of accepted files plus the validation
/// errors collected along the way.
#[derive(Debug, Default)]
pub struct FileSet {
    accepted: Vec<IngestedFile>,
    rejections: Vec<DocwiseError>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepted files in submission order.
    pub fn accepted(&self) -> &[IngestedFile] {
        &self.accepted
    }

    /// Per-file validation errors, in the order they occurred.
    pub fn rejections(&self) -> &[DocwiseError] {
        &self.rejections
    }

    /// Remove an accepted file by index before submission.
    pub fn remove(&mut self, idx: usize) -> Option<IngestedFile> {
        if idx < self.accepted.len() {
            Some(self.accepted.remove(idx))
        } else {
            None
        }
    }

    /// A scan can only be submitted with at least one accepted file.
    pub fn can_submit(&self) -> bool {
        !self.accepted.is_empty()
    }

    /// Consume the set, keeping only the accepted files.
    pub fn into_accepted(self) -> Vec<IngestedFile> {
        self.accepted
    }
}

/// Map a file extension to its declared media type.
///
/// Returns `None` for anything outside the accepted set
/// (PDF, JPEG, PNG, WEBP).
pub fn mime_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Some("application/pdf"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Check the file content's signature against the declared media type.
fn magic_matches(mime_type: &str, bytes: &[u8]) -> bool {
    match mime_type {
        "application/pdf" => bytes.starts_with(b"%PDF"),
        "image/png" => bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]),
        "image/jpeg" => bytes.starts_with(&[0xFF, 0xD8, 0xFF]),
        // RIFF container: "RIFF" <size> "WEBP"
        "image/webp" => bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP",
        _ => false,
    }
}

/// Validate and transcode a single file.
///
/// Checks run cheapest-first: extension, then size from metadata, then the
/// actual read and magic-byte check. The read + encode is the component's
/// async suspension point.
async fn ingest_one(path: PathBuf) -> Result<IngestedFile, DocwiseError> {
    let mime_type = mime_type_for(&path)
        .ok_or_else(|| DocwiseError::UnsupportedFileType { path: path.clone() })?;

    let meta = match tokio::fs::metadata(&path).await {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(DocwiseError::PermissionDenied { path });
        }
        Err(_) => return Err(DocwiseError::FileNotFound { path }),
    };

    if meta.len() > MAX_FILE_BYTES {
        return Err(DocwiseError::FileTooLarge {
            path,
            size: meta.len(),
            limit: MAX_FILE_BYTES,
        });
    }

    let bytes = match tokio::fs::read(&path).await {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(DocwiseError::PermissionDenied { path });
        }
        Err(_) => return Err(DocwiseError::FileNotFound { path }),
    };

    if !magic_matches(mime_type, &bytes) {
        let mut magic = [0u8; 4];
        for (i, b) in bytes.iter().take(4).enumerate() {
            magic[i] = *b;
        }
        return Err(DocwiseError::MediaTypeMismatch {
            path,
            mime_type: mime_type.to_string(),
            magic,
        });
    }

    let byte_len = bytes.len() as u64;
    let data = STANDARD.encode(&bytes);
    debug!(
        "Ingested '{}' ({mime_type}, {byte_len} bytes → {} base64 chars)",
        path.display(),
        data.len()
    );

    let display_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(IngestedFile {
        display_name,
        mime_type: mime_type.to_string(),
        data,
        byte_len,
    })
}

/// Validate and transcode a set of user-selected files.
///
/// Files are processed concurrently but the accepted list preserves the
/// order the paths were given in. Rejections are collected, not propagated.
pub async fn ingest_files<I, P>(paths: I) -> FileSet
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let futures = paths
        .into_iter()
        .map(|p| ingest_one(p.as_ref().to_path_buf()));

    // `buffered` (not `buffer_unordered`) keeps results in submission order.
    let results: Vec<_> = stream::iter(futures)
        .buffered(TRANSCODE_CONCURRENCY)
        .collect()
        .await;

    let mut set = FileSet::new();
    for result in results {
        match result {
            Ok(file) => set.accepted.push(file),
            Err(e) => {
                warn!("Rejected file: {e}");
                set.rejections.push(e);
            }
        }
    }
    set
}
