//! Payload chunking for size-limited transports.
//!
//! Splits a byte source into an ordered sequence of [`Piece`]s, each bounded
//! by a configured maximum size. Every piece carries its zero-based emission
//! index; the index is only folded into a display-name string at the
//! transport boundary (see [`piece_name`] / [`parse_piece_index`]) so that
//! ordering survives transports that do not preserve submission order.

mod piece;
mod source;

pub use piece::{Piece, parse_piece_index, piece_count, piece_name};
pub use source::{FileSource, MemorySource, PieceSource, collect_pieces};

/// Default maximum piece size: 20 MiB.
///
/// Sized under common webhook attachment ceilings so a single piece is
/// always accepted as one transport object.
pub const DEFAULT_CHUNK_SIZE: usize = 20 * 1024 * 1024;

/// Errors produced by the chunk crate.
#[derive(Debug, thiserror::Error)]
pub enum ChunkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
