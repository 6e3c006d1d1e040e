use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::encoding;
use crate::types::{MessageId, Sender};

/// One entry of a session's message log.
///
/// `seq` is the logical send order and is assigned by the log when the
/// message is appended; it is `0` for a message that has not been appended
/// yet. After appending, `id`, `seq` and `timestamp` never change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub seq: u64,
    /// Withheld pending moderation (sent despite an unsafe verdict).
    pub blocked: bool,
    /// Show the payload scrambled instead of as typed. Display only.
    pub encrypted: bool,
}

impl ChatMessage {
    fn build(sender: Sender, text: impl Into<String>, blocked: bool, encrypted: bool) -> Self {
        Self {
            id: MessageId::new(),
            sender,
            text: text.into(),
            timestamp: Utc::now(),
            seq: 0,
            blocked,
            encrypted,
        }
    }

    /// A message from the local user that passed the safety filter.
    pub fn outgoing(text: impl Into<String>, encrypted: bool) -> Self {
        Self::build(Sender::Me, text, false, encrypted)
    }

    /// A message from the local user sent despite an unsafe verdict.
    pub fn quarantined(text: impl Into<String>, encrypted: bool) -> Self {
        Self::build(Sender::Me, text, true, encrypted)
    }

    pub fn incoming(sender: Sender, text: impl Into<String>) -> Self {
        Self::build(sender, text, false, false)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::build(Sender::System, text, false, false)
    }

    pub fn is_quarantined(&self) -> bool {
        self.blocked
    }

    pub fn display_text(&self) -> String {
        if self.encrypted {
            encoding::scramble(&self.text)
        } else {
            self.text.clone()
        }
    }
}
