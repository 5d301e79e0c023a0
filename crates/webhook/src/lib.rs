//! Webhook attachment transport.
//!
//! Implements `hookstash-store`'s `PieceTransport` over a webhook endpoint
//! that stores small file attachments and hands back opaque message ids.

pub mod client;
pub mod types;

pub use client::WebhookClient;
pub use types::{Attachment, WebhookMessage};
