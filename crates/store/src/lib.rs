//! Store orchestration for payloads that exceed the transport's size limit.
//!
//! This crate holds the business logic only; it never talks HTTP itself.
//! Everything on the wire goes through the [`PieceTransport`] trait, which
//! `hookstash-webhook` implements for real endpoints and tests implement in
//! memory.
//!
//! Write path:
//!
//! 1. validate input (blank name, unreadable source) before any transport
//!    call
//! 2. chunk the payload into index-carrying pieces
//! 3. store every piece, bounded-concurrency, failing fast on the first
//!    error
//! 4. store the manifest listing the piece ids in payload order
//!
//! The id returned for the manifest is the payload's primary handle. The
//! read path inverts this: fetch the manifest, fetch the pieces, reassemble
//! them by the index embedded in each piece's display name.

pub mod download;
pub mod error;
pub mod transport;
pub mod types;
pub mod upload;

pub use download::Downloader;
pub use error::{StoreError, TransportError};
pub use transport::PieceTransport;
pub use types::{
    DEFAULT_MAX_IN_FLIGHT, DEFAULT_PACING, FetchedPiece, StoreConfig, UploadReceipt,
};
pub use upload::Uploader;
