//! Upload orchestration.
//!
//! Splits a payload into pieces, stores every piece through the transport
//! under an index-carrying display name, then stores the manifest listing
//! their ids. The id of the manifest object is the caller's single handle
//! to the payload.

use std::path::Path;

use futures_util::StreamExt;
use futures_util::stream;
use hookstash_chunk::{FileSource, MemorySource, Piece, PieceSource, collect_pieces, piece_name};
use hookstash_manifest::Manifest;
use tracing::{debug, error, info};

use crate::error::StoreError;
use crate::transport::PieceTransport;
use crate::types::{StoreConfig, UploadReceipt};

/// Drives a payload upload end to end.
pub struct Uploader<'a> {
    transport: &'a dyn PieceTransport,
    config: StoreConfig,
}

impl<'a> Uploader<'a> {
    pub fn new(transport: &'a dyn PieceTransport, config: StoreConfig) -> Self {
        Self { transport, config }
    }

    /// Uploads every piece produced by `source`, then the manifest.
    ///
    /// Piece stores run inside a bounded concurrency window
    /// ([`StoreConfig::max_in_flight`]); a window of 1 runs them one at a
    /// time with [`StoreConfig::pacing`] between posts. The first failed
    /// piece aborts the run: pieces already stored stay behind on the
    /// transport, but no manifest is written, so no handle is produced.
    pub async fn upload<S>(
        &self,
        mut source: S,
        file_name: &str,
    ) -> Result<UploadReceipt, StoreError>
    where
        S: PieceSource + Send + 'static,
    {
        validate_file_name(file_name)?;

        let pieces = tokio::task::spawn_blocking(move || collect_pieces(&mut source))
            .await
            .map_err(|e| StoreError::Join(e.to_string()))??;

        self.upload_pieces(pieces, file_name).await
    }

    /// Uploads an in-memory payload under `file_name`.
    pub async fn upload_bytes(
        &self,
        data: Vec<u8>,
        file_name: &str,
    ) -> Result<UploadReceipt, StoreError> {
        validate_file_name(file_name)?;

        let mut source = MemorySource::new(data, self.config.chunk_size);
        let pieces = collect_pieces(&mut source)?;

        self.upload_pieces(pieces, file_name).await
    }

    /// Uploads a file, storing it under its own file name.
    ///
    /// The source is checked up front: a missing path or a non-regular file
    /// is rejected before any byte is read or posted.
    pub async fn upload_file(&self, path: &Path) -> Result<UploadReceipt, StoreError> {
        let file_name = file_name_of(path)?;
        validate_file_name(&file_name)?;
        validate_file_source(path).await?;

        let chunk_size = self.config.chunk_size;
        let path = path.to_path_buf();
        let pieces = tokio::task::spawn_blocking(move || {
            let mut source = FileSource::open(&path, chunk_size)?;
            collect_pieces(&mut source)
        })
        .await
        .map_err(|e| StoreError::Join(e.to_string()))??;

        self.upload_pieces(pieces, &file_name).await
    }

    async fn upload_pieces(
        &self,
        pieces: Vec<Piece>,
        file_name: &str,
    ) -> Result<UploadReceipt, StoreError> {
        let piece_total = pieces.len();
        debug!(file = %file_name, pieces = piece_total, "payload chunked");

        let ids = if self.config.max_in_flight <= 1 {
            self.put_sequential(pieces, file_name).await?
        } else {
            self.put_windowed(pieces, file_name).await?
        };

        let manifest = Manifest::new(file_name, ids);
        let primary_id = self.transport.put_manifest(&manifest).await?;

        info!(
            file = %file_name,
            pieces = piece_total,
            primary = %primary_id,
            "upload complete"
        );

        Ok(UploadReceipt {
            primary_id,
            file_name: file_name.to_string(),
            piece_ids: manifest.ids,
        })
    }

    async fn put_sequential(
        &self,
        pieces: Vec<Piece>,
        file_name: &str,
    ) -> Result<Vec<String>, StoreError> {
        let mut ids = Vec::with_capacity(pieces.len());
        for (n, piece) in pieces.into_iter().enumerate() {
            if n > 0 {
                tokio::time::sleep(self.config.pacing).await;
            }
            let name = piece_name(piece.index, file_name);
            let Piece { index, data } = piece;
            match self.transport.put_piece(&name, data).await {
                Ok(id) => ids.push(id),
                Err(e) => {
                    error!(piece = index, error = %e, "piece upload failed");
                    return Err(StoreError::PartialUpload {
                        index,
                        reason: e.to_string(),
                    });
                }
            }
        }
        Ok(ids)
    }

    async fn put_windowed(
        &self,
        pieces: Vec<Piece>,
        file_name: &str,
    ) -> Result<Vec<String>, StoreError> {
        let transport = self.transport;
        // Slots keyed by piece index: completion order is arbitrary, the
        // manifest must come out in payload order.
        let mut slots: Vec<Option<String>> = vec![None; pieces.len()];

        let mut stores = stream::iter(pieces.into_iter().map(|piece| {
            let name = piece_name(piece.index, file_name);
            let Piece { index, data } = piece;
            async move { (index, transport.put_piece(&name, data).await) }
        }))
        .buffer_unordered(self.config.max_in_flight);

        while let Some((index, outcome)) = stores.next().await {
            match outcome {
                Ok(id) => slots[index as usize] = Some(id),
                Err(e) => {
                    // Dropping the stream cancels every store still in
                    // flight.
                    error!(piece = index, error = %e, "piece upload failed");
                    return Err(StoreError::PartialUpload {
                        index,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(slots.into_iter().flatten().collect())
    }
}

/// Rejects blank payload names before anything touches the transport.
fn validate_file_name(file_name: &str) -> Result<(), StoreError> {
    if file_name.trim().is_empty() {
        return Err(StoreError::Validation(
            "file name must not be blank".into(),
        ));
    }
    Ok(())
}

/// Checks that `path` exists and is a regular file.
async fn validate_file_source(path: &Path) -> Result<(), StoreError> {
    let meta = tokio::fs::metadata(path).await.map_err(|e| {
        StoreError::Validation(format!("unreadable source {}: {e}", path.display()))
    })?;
    if !meta.is_file() {
        return Err(StoreError::Validation(format!(
            "source {} is not a regular file",
            path.display()
        )));
    }
    Ok(())
}

fn file_name_of(path: &Path) -> Result<String, StoreError> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            StoreError::Validation(format!(
                "cannot derive a file name from {}",
                path.display()
            ))
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
