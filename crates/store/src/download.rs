//! Download orchestration.
//!
//! Fetches the manifest stored under a primary id, fans out the piece
//! fetches, and reassembles the payload. Assembly order comes from the
//! numeric index embedded in each piece's display name, never from the
//! manifest's id order or from fetch completion order.

use std::path::Path;

use futures_util::StreamExt;
use futures_util::stream;
use hookstash_chunk::parse_piece_index;
use tracing::{debug, error, info};

use crate::error::StoreError;
use crate::transport::PieceTransport;
use crate::types::{FetchedPiece, StoreConfig};

/// Drives a payload download end to end.
pub struct Downloader<'a> {
    transport: &'a dyn PieceTransport,
    config: StoreConfig,
}

impl<'a> Downloader<'a> {
    pub fn new(transport: &'a dyn PieceTransport, config: StoreConfig) -> Self {
        Self { transport, config }
    }

    /// Downloads and reassembles the payload stored under `primary_id`.
    ///
    /// Piece fetches run inside the same bounded concurrency window as
    /// uploads; the first failed fetch aborts the run.
    pub async fn download(&self, primary_id: &str) -> Result<Vec<u8>, StoreError> {
        let manifest = self.transport.get_manifest(primary_id).await?;
        debug!(
            file = %manifest.file_name,
            pieces = manifest.piece_count(),
            "manifest fetched"
        );

        // A manifest with no ids is a stored empty payload.
        if manifest.ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut fetched = if self.config.max_in_flight <= 1 {
            self.fetch_sequential(&manifest.ids).await?
        } else {
            self.fetch_windowed(&manifest.ids).await?
        };

        fetched.sort_by_key(|(index, _)| *index);

        let total: usize = fetched.iter().map(|(_, piece)| piece.data.len()).sum();
        let mut payload = Vec::with_capacity(total);
        for (_, piece) in fetched {
            payload.extend_from_slice(&piece.data);
        }

        info!(file = %manifest.file_name, bytes = payload.len(), "download complete");
        Ok(payload)
    }

    /// Downloads the payload under `primary_id` and writes it to `path`.
    pub async fn download_to_file(
        &self,
        primary_id: &str,
        path: &Path,
    ) -> Result<(), StoreError> {
        let payload = self.download(primary_id).await?;
        tokio::fs::write(path, payload).await?;
        Ok(())
    }

    async fn fetch_sequential(
        &self,
        ids: &[String],
    ) -> Result<Vec<(u32, FetchedPiece)>, StoreError> {
        let mut fetched = Vec::with_capacity(ids.len());
        for (position, id) in ids.iter().enumerate() {
            if position > 0 {
                tokio::time::sleep(self.config.pacing).await;
            }
            match self.transport.get_piece(id).await {
                Ok(piece) => fetched.push(resolve_index(position, piece)?),
                Err(e) => {
                    error!(piece = position, error = %e, "piece download failed");
                    return Err(StoreError::PartialDownload {
                        index: position as u32,
                        reason: e.to_string(),
                    });
                }
            }
        }
        Ok(fetched)
    }

    async fn fetch_windowed(
        &self,
        ids: &[String],
    ) -> Result<Vec<(u32, FetchedPiece)>, StoreError> {
        let transport = self.transport;
        let mut fetches = stream::iter(
            ids.iter()
                .enumerate()
                .map(|(position, id)| async move { (position, transport.get_piece(id).await) }),
        )
        .buffer_unordered(self.config.max_in_flight);

        let mut fetched = Vec::with_capacity(ids.len());
        while let Some((position, outcome)) = fetches.next().await {
            match outcome {
                Ok(piece) => fetched.push(resolve_index(position, piece)?),
                Err(e) => {
                    error!(piece = position, error = %e, "piece download failed");
                    return Err(StoreError::PartialDownload {
                        index: position as u32,
                        reason: e.to_string(),
                    });
                }
            }
        }
        Ok(fetched)
    }
}

/// Pairs a fetched piece with the index parsed from its display name.
///
/// `position` is the piece's position in the manifest id list, used only to
/// report which entry was unusable.
fn resolve_index(position: usize, piece: FetchedPiece) -> Result<(u32, FetchedPiece), StoreError> {
    match parse_piece_index(&piece.name) {
        Some(index) => Ok((index, piece)),
        None => Err(StoreError::PartialDownload {
            index: position as u32,
            reason: format!("piece name {:?} carries no index prefix", piece.name),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
