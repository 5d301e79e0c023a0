use std::io::Read;
use std::path::Path;

use crate::piece::Piece;
use crate::{ChunkError, DEFAULT_CHUNK_SIZE};

/// A lazy, ordered producer of [`Piece`]s.
///
/// Each call emits the next piece in payload order, or `Ok(None)` once the
/// source is exhausted. One unit read from the underlying byte source
/// becomes exactly one piece; a source never re-merges or re-splits units,
/// so the size bound holds because every read is capped at the configured
/// chunk size. Read errors surface immediately and are not retried.
pub trait PieceSource {
    /// Returns the next piece, or `None` at the end of the payload.
    fn next_piece(&mut self) -> Result<Option<Piece>, ChunkError>;
}

/// Drains a source into a vector of pieces.
pub fn collect_pieces<S: PieceSource + ?Sized>(source: &mut S) -> Result<Vec<Piece>, ChunkError> {
    let mut pieces = Vec::new();
    while let Some(piece) = source.next_piece()? {
        pieces.push(piece);
    }
    Ok(pieces)
}

// ---------------------------------------------------------------------------
// MemorySource
// ---------------------------------------------------------------------------

/// Fully-buffered piece source over an owned byte buffer.
///
/// Slices the buffer at chunk-size boundaries; only the final piece may be
/// shorter. An empty buffer yields no pieces.
pub struct MemorySource {
    data: Vec<u8>,
    chunk_size: usize,
    offset: usize,
    next_index: u32,
}

impl MemorySource {
    /// Wraps `data` for chunked emission.
    ///
    /// If `chunk_size` is 0, [`DEFAULT_CHUNK_SIZE`] (20 MiB) is used.
    pub fn new(data: Vec<u8>, chunk_size: usize) -> Self {
        let chunk_size = if chunk_size == 0 {
            DEFAULT_CHUNK_SIZE
        } else {
            chunk_size
        };
        Self {
            data,
            chunk_size,
            offset: 0,
            next_index: 0,
        }
    }

    /// Total payload size in bytes.
    pub fn payload_size(&self) -> usize {
        self.data.len()
    }

    /// Bytes not yet emitted.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }
}

impl PieceSource for MemorySource {
    fn next_piece(&mut self) -> Result<Option<Piece>, ChunkError> {
        if self.offset >= self.data.len() {
            return Ok(None);
        }

        let end = usize::min(self.offset + self.chunk_size, self.data.len());
        let piece = Piece::new(self.next_index, self.data[self.offset..end].to_vec());
        self.offset = end;
        self.next_index += 1;
        Ok(Some(piece))
    }
}

// ---------------------------------------------------------------------------
// FileSource
// ---------------------------------------------------------------------------

/// Bounded-read streaming piece source over a file.
///
/// Reads at most the chunk size per unit, so each read becomes one piece
/// without buffering the whole file.
pub struct FileSource {
    file: std::fs::File,
    chunk_size: usize,
    file_size: u64,
    offset: u64,
    next_index: u32,
}

impl FileSource {
    /// Opens `path` for chunked reading.
    ///
    /// If `chunk_size` is 0, [`DEFAULT_CHUNK_SIZE`] (20 MiB) is used.
    pub fn open(path: &Path, chunk_size: usize) -> Result<Self, ChunkError> {
        let file = std::fs::File::open(path)?;
        let file_size = file.metadata()?.len();
        let chunk_size = if chunk_size == 0 {
            DEFAULT_CHUNK_SIZE
        } else {
            chunk_size
        };
        Ok(Self {
            file,
            chunk_size,
            file_size,
            offset: 0,
            next_index: 0,
        })
    }

    /// Total file size in bytes.
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Bytes remaining to read.
    pub fn remaining(&self) -> u64 {
        self.file_size - self.offset
    }
}

impl PieceSource for FileSource {
    fn next_piece(&mut self) -> Result<Option<Piece>, ChunkError> {
        let remaining = self.file_size.saturating_sub(self.offset);
        if remaining == 0 {
            return Ok(None);
        }

        let target = u64::min(remaining, self.chunk_size as u64) as usize;
        let mut buf = vec![0u8; target];
        let mut filled = 0;
        // Fill to the bound so only the final piece runs short.
        while filled < target {
            let n = self.file.read(&mut buf[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        if filled == 0 {
            return Ok(None);
        }
        buf.truncate(filled);

        let piece = Piece::new(self.next_index, buf);
        self.offset += piece.size() as u64;
        self.next_index += 1;
        Ok(Some(piece))
    }
}
