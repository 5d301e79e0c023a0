//! Manifest type and framed text codec.
//!
//! A [`Manifest`] is the authoritative index for one stored payload: the
//! original file name plus the ordered list of piece ids handed out by the
//! transport. It is serialized as a small marker-framed JSON block so it can
//! be stored as a single text object through the same transport that holds
//! the pieces, and recognized again among arbitrary channel content.

mod codec;
mod types;

pub use codec::{MANIFEST_BEGIN, MANIFEST_END, decode, encode};
pub use types::Manifest;

/// Errors from manifest decoding.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("manifest framing markers missing or malformed")]
    Framing,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("manifest content is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
