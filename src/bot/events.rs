//! Reaction events delivered by the chat bridge

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A reaction added to a chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionEvent {
    pub channel_id: String,
    pub message_id: String,
    /// Content of the message reacted to, expected to be a link
    pub message_text: String,
    /// Emoji name of the reaction
    pub emoji: String,
}

/// Closed set of reaction kinds the bot acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    ReactionApproved,
    ReactionOther,
}

/// Allow-set of emoji that approve a message for intake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalPolicy {
    emojis: BTreeSet<String>,
}

impl ApprovalPolicy {
    pub fn new<I, S>(emojis: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            emojis: emojis.into_iter().map(Into::into).collect(),
        }
    }

    pub fn classify(&self, emoji: &str) -> EventKind {
        if self.emojis.contains(emoji) {
            EventKind::ReactionApproved
        } else {
            EventKind::ReactionOther
        }
    }

    pub fn emojis(&self) -> impl Iterator<Item = &str> {
        self.emojis.iter().map(String::as_str)
    }
}

impl Default for ApprovalPolicy {
    fn default() -> Self {
        Self::new(["😍", "👌", "👍", "✅"])
    }
}
