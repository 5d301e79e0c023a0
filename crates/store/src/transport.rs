//! Transport seam between orchestration and the wire.
//!
//! [`PieceTransport`] is the only surface the orchestrators talk to. The
//! webhook client in `hookstash-webhook` implements it for HTTP; tests
//! implement it in memory.

use std::future::Future;
use std::pin::Pin;

use hookstash_manifest::Manifest;

use crate::error::StoreError;
use crate::types::FetchedPiece;

/// Stores and retrieves pieces and manifests by opaque id.
///
/// Methods return boxed futures so the trait stays object-safe; orchestrators
/// hold a `&dyn PieceTransport`.
pub trait PieceTransport: Send + Sync {
    /// Stores one piece under `name`, returning the id of the created
    /// object.
    fn put_piece(
        &self,
        name: &str,
        data: Vec<u8>,
    ) -> Pin<Box<dyn Future<Output = Result<String, StoreError>> + Send + '_>>;

    /// Fetches the piece stored under `id`, returning its display name and
    /// bytes.
    fn get_piece(
        &self,
        id: &str,
    ) -> Pin<Box<dyn Future<Output = Result<FetchedPiece, StoreError>> + Send + '_>>;

    /// Stores an encoded manifest, returning the primary id for the whole
    /// payload.
    fn put_manifest(
        &self,
        manifest: &Manifest,
    ) -> Pin<Box<dyn Future<Output = Result<String, StoreError>> + Send + '_>>;

    /// Fetches and decodes the manifest stored under `primary_id`.
    fn get_manifest(
        &self,
        primary_id: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Manifest, StoreError>> + Send + '_>>;
}
