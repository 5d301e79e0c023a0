//! Error types for store orchestration.

use hookstash_chunk::ChunkError;
use hookstash_manifest::ManifestError;

/// Errors raised by a [`PieceTransport`](crate::PieceTransport) implementation.
///
/// Transport-neutral on purpose: the webhook client maps its HTTP failures
/// into these variants so orchestration code never sees an HTTP type.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request never produced a response (connect failure, timeout,
    /// interrupted body read).
    #[error("request failed: {0}")]
    Request(String),

    /// The endpoint answered with a non-success status.
    #[error("endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response arrived but its shape was not usable (bad JSON, missing
    /// attachment, missing URL).
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Errors produced while storing or retrieving a payload.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Input rejected before any transport call was made.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("chunking failed: {0}")]
    Chunk(#[from] ChunkError),

    /// A piece failed to store; earlier pieces may already exist on the
    /// transport but no manifest was written, so the payload has no handle.
    #[error("upload of piece {index} failed: {reason}")]
    PartialUpload { index: u32, reason: String },

    /// A piece failed to fetch or could not be placed during reassembly.
    #[error("download of piece {index} failed: {reason}")]
    PartialDownload { index: u32, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("blocking task failed: {0}")]
    Join(String),
}
