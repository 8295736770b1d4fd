//! Broadcast recipient resolution and message composition.
//!
//! # Invariants
//! - A non-empty explicit selection is returned unchanged (no dedup).
//! - Every named group currently resolves to the full parent roster.
//! - The message list is most-recent-first.

use crate::model::message::{Message, MessageDraft};
use crate::model::parent::{ParentContact, ParentId};
use uuid::Uuid;

/// Shortcut groups offered by the composer.
///
/// None of these is backed by a computed predicate yet; each one selects
/// every parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcastGroup {
    AllParents,
    FrequentlyAbsent,
    VaccinationDue,
}

/// Who a broadcast should reach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipientSelection {
    /// Explicit parent ids; an empty list means everyone.
    Parents(Vec<ParentId>),
    Group(BroadcastGroup),
}

impl Default for RecipientSelection {
    fn default() -> Self {
        Self::Parents(Vec::new())
    }
}

/// Expands a selection into parent ids.
pub fn resolve_recipients(
    parents: &[ParentContact],
    selection: &RecipientSelection,
) -> Vec<ParentId> {
    match selection {
        RecipientSelection::Parents(ids) if !ids.is_empty() => ids.clone(),
        RecipientSelection::Parents(_) | RecipientSelection::Group(_) => {
            parents.iter().map(|parent| parent.id.clone()).collect()
        }
    }
}

/// Display names for parent ids; unmatched ids are kept verbatim.
pub fn recipient_names(parents: &[ParentContact], ids: &[ParentId]) -> Vec<String> {
    ids.iter()
        .map(|id| {
            parents
                .iter()
                .find(|parent| &parent.id == id)
                .map(|parent| parent.name.clone())
                .unwrap_or_else(|| id.clone())
        })
        .collect()
}

/// Builds the persisted message record with a fresh id.
pub fn compose_message(draft: MessageDraft, recipients: Vec<String>, date: &str) -> Message {
    Message {
        id: Uuid::new_v4().to_string(),
        title: draft.title,
        content: draft.content,
        category: draft.category,
        urgency: draft.urgency,
        date: date.to_string(),
        sent_to: recipients,
    }
}

/// Prepends `message` so the newest message comes first.
pub fn post_message(mut messages: Vec<Message>, message: Message) -> Vec<Message> {
    messages.insert(0, message);
    messages
}
