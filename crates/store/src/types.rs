//! Data types for store orchestration.

use std::time::Duration;

use hookstash_chunk::DEFAULT_CHUNK_SIZE;

/// Default number of piece transfers in flight at once.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 4;

/// Default delay between sequential piece operations.
pub const DEFAULT_PACING: Duration = Duration::from_secs(3);

/// Tuning for upload and download runs.
///
/// Immutable once constructed; every orchestrator call reads its own copy,
/// so there is no process-wide chunk-size state to race on.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum piece size in bytes. `0` falls back to
    /// [`DEFAULT_CHUNK_SIZE`].
    pub chunk_size: usize,
    /// Piece transfers allowed in flight at once. `1` selects the
    /// sequential path, where [`pacing`](Self::pacing) applies between
    /// operations.
    pub max_in_flight: usize,
    /// Delay between consecutive piece operations on the sequential path.
    pub pacing: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            pacing: DEFAULT_PACING,
        }
    }
}

/// Outcome of a completed upload.
///
/// `primary_id` is the only value the caller must keep: it alone is enough
/// to download the payload again. The piece ids are informational; they are
/// already recorded in the stored manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    /// Id of the stored manifest object, the payload's single handle.
    pub primary_id: String,
    /// Name the payload was stored under.
    pub file_name: String,
    /// Ids of the stored pieces, in ascending piece-index order.
    pub piece_ids: Vec<String>,
}

/// One piece as returned by the transport: the display name it was stored
/// under (which carries the piece index) plus the raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPiece {
    pub name: String,
    pub data: Vec<u8>,
}
