//! Webhook transport client.
//!
//! Async HTTP client using `reqwest`. Every stored object is one message
//! holding one file attachment: a multipart POST creates it, a metadata GET
//! resolves the message id to the attachment's display name and content URL,
//! a plain GET returns the bytes. Implements the store's [`PieceTransport`]
//! seam on top of those three calls.

use std::future::Future;
use std::pin::Pin;

use hookstash_manifest::{Manifest, ManifestError, decode, encode};
use hookstash_store::{FetchedPiece, PieceTransport, StoreError, TransportError};
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::types::WebhookMessage;

/// Client for one webhook endpoint.
#[derive(Debug)]
pub struct WebhookClient {
    http: reqwest::Client,
    endpoint: String,
}

impl WebhookClient {
    /// Creates a client for `endpoint`.
    ///
    /// The endpoint must not be blank; trailing slashes are trimmed so the
    /// metadata route can be appended cleanly.
    pub fn new(endpoint: &str) -> Result<Self, StoreError> {
        let endpoint = endpoint.trim().trim_end_matches('/');
        if endpoint.is_empty() {
            return Err(StoreError::Validation(
                "webhook endpoint must not be blank".into(),
            ));
        }

        let http = reqwest::Client::builder().build().map_err(request_error)?;

        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
        })
    }

    /// Posts one named object as a message attachment, returning the new
    /// message id.
    async fn post_object(&self, name: &str, data: Vec<u8>) -> Result<String, TransportError> {
        let size = data.len();
        let part = Part::bytes(data).file_name(name.to_string());
        let form = Form::new().part("files[0]", part);

        let resp = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(request_error)?;
        let body = check_status(resp).await?;

        let message: WebhookMessage = serde_json::from_slice(&body)
            .map_err(|e| TransportError::MalformedResponse(format!("message JSON: {e}")))?;
        debug!(object = %name, id = %message.id, bytes = size, "object stored");
        Ok(message.id)
    }

    /// Fetches a message's metadata by id.
    async fn get_message(&self, id: &str) -> Result<WebhookMessage, TransportError> {
        let url = format!("{}/messages/{id}", self.endpoint);
        let resp = self.http.get(&url).send().await.map_err(request_error)?;
        let body = check_status(resp).await?;
        serde_json::from_slice(&body)
            .map_err(|e| TransportError::MalformedResponse(format!("message JSON: {e}")))
    }

    /// Downloads raw content from an attachment URL.
    async fn get_content(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let resp = self.http.get(url).send().await.map_err(request_error)?;
        check_status(resp).await
    }

    /// Resolves a message id to its attachment's display name and bytes.
    async fn get_object(&self, id: &str) -> Result<(String, Vec<u8>), TransportError> {
        let message = self.get_message(id).await?;
        let attachment = message.attachments.into_iter().next().ok_or_else(|| {
            TransportError::MalformedResponse(format!("message {id} has no attachment"))
        })?;
        if attachment.url.is_empty() {
            return Err(TransportError::MalformedResponse(format!(
                "attachment {} has no content URL",
                attachment.id
            )));
        }

        let data = self.get_content(&attachment.url).await?;
        debug!(object = %attachment.filename, id = %id, bytes = data.len(), "object fetched");
        Ok((attachment.filename, data))
    }
}

impl PieceTransport for WebhookClient {
    fn put_piece(
        &self,
        name: &str,
        data: Vec<u8>,
    ) -> Pin<Box<dyn Future<Output = Result<String, StoreError>> + Send + '_>> {
        let name = name.to_string();
        Box::pin(async move { Ok(self.post_object(&name, data).await?) })
    }

    fn get_piece(
        &self,
        id: &str,
    ) -> Pin<Box<dyn Future<Output = Result<FetchedPiece, StoreError>> + Send + '_>> {
        let id = id.to_string();
        Box::pin(async move {
            let (name, data) = self.get_object(&id).await?;
            Ok(FetchedPiece { name, data })
        })
    }

    fn put_manifest(
        &self,
        manifest: &Manifest,
    ) -> Pin<Box<dyn Future<Output = Result<String, StoreError>> + Send + '_>> {
        let name = format!("manifest_{}.txt", manifest.file_name);
        let encoded = encode(manifest);
        Box::pin(async move {
            let text = encoded?;
            Ok(self.post_object(&name, text.into_bytes()).await?)
        })
    }

    fn get_manifest(
        &self,
        primary_id: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Manifest, StoreError>> + Send + '_>> {
        let primary_id = primary_id.to_string();
        Box::pin(async move {
            let (_, data) = self.get_object(&primary_id).await?;
            let text = String::from_utf8(data).map_err(ManifestError::Utf8)?;
            Ok(decode(&text)?)
        })
    }
}

/// Maps any non-success status to [`TransportError::Status`], otherwise
/// returns the full body. A failed body read is an error, never a short
/// success.
async fn check_status(resp: reqwest::Response) -> Result<Vec<u8>, TransportError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(TransportError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(resp.bytes().await.map_err(request_error)?.to_vec())
}

fn request_error(e: reqwest::Error) -> TransportError {
    TransportError::Request(e.to_string())
}
