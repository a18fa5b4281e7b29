//! Pipeline stages for a document scan.
//!
//! Each submodule implements exactly one transformation step. Keeping stages
//! separate makes each independently testable and keeps the only stage with
//! network I/O ([`crate::provider`]) out of the pure construction code.
//!
//! ## Data Flow
//!
//! ```text
//! ingest ──▶ normalize ──▶ request ──▶ (provider) ──▶ respond
//! (validate   (tagged       (parts,      remote        (parse,
//!  + base64)   variants)     schema)      call          shape)
//! ```
//!
//! 1. [`ingest`]    — validate selected files (type, size, magic bytes) and
//!    transcode accepted ones to base64; the component's only suspension
//!    point
//! 2. [`normalize`] — unify files, pasted text, and URLs into one ordered
//!    [`normalize::InputItem`] sequence
//! 3. [`request`]   — pure assembly of the model request: mode, variant,
//!    instruction block, content parts, response schema, capability flags
//! 4. [`respond`]   — parse the returned JSON text and shape it: display
//!    names, score clamping, comparison-table alignment

pub mod ingest;
pub mod normalize;
pub mod request;
pub mod respond;
