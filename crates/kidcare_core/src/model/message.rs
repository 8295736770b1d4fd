//! Broadcast message model.
//!
//! # Invariants
//! - A message is immutable once sent.
//! - The message list is ordered most-recent-first.

use serde::{Deserialize, Serialize};

pub type MessageId = String;

/// Urgency label shown next to a broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageUrgency {
    #[default]
    Normal,
    Important,
    Urgent,
}

/// Composer input before recipients are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageDraft {
    pub title: String,
    pub content: String,
    pub category: String,
    pub urgency: MessageUrgency,
}

/// Sent broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub title: String,
    pub content: String,
    pub category: String,
    pub urgency: MessageUrgency,
    pub date: String,
    /// Recipient display names.
    pub sent_to: Vec<String>,
}
