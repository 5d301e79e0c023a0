//! Wire types for the webhook message API.

use serde::{Deserialize, Serialize};

/// One stored attachment inside a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    pub filename: String,
    /// Content URL; empty when the endpoint omits it.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub size: u64,
}

/// A message as returned by the endpoint after a post or metadata lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookMessage {
    pub id: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}
