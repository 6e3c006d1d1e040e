//! One chat session: the state container the chat surface drives.
//!
//! A session owns its filter, composer workflow and message log. The log is
//! created in [`ChatSession::start`] and discarded by [`ChatSession::close`]
//! (or drop); nothing is shared between sessions.

use casa_shared::{ChatMessage, ContentSafetyFilter, Sender, SessionId};
use casa_store::Database;
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::error::ChatError;
use crate::notice::BlockNotice;
use crate::workflow::{AppealWorkflow, SendOutcome, WorkflowState};

/// Result of a send action, as the surface needs to render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendResult {
    Ignored,
    Appended(ChatMessage),
    Blocked(BlockNotice),
}

pub struct ChatSession {
    id: SessionId,
    peer: Sender,
    filter: ContentSafetyFilter,
    workflow: AppealWorkflow,
    log: Database,
    encrypted_display: bool,
}

impl ChatSession {
    pub fn start(config: &SessionConfig) -> Result<Self, ChatError> {
        let filter =
            ContentSafetyFilter::new()?.with_extra_keywords(&config.extra_risk_keywords)?;
        let peer = Sender::party(config.peer_id.clone())?;

        let mut session = Self {
            id: SessionId::new(),
            peer,
            filter,
            workflow: AppealWorkflow::new(),
            log: Database::open_in_memory()?,
            encrypted_display: config.encrypted_display,
        };

        if !config.welcome_message.is_empty() {
            session.post_system(&config.welcome_message)?;
        }

        info!(session = %session.id, peer = %session.peer, "chat session started");
        Ok(session)
    }

    pub fn draft(&self) -> &str {
        self.workflow.draft()
    }

    pub fn state(&self) -> &WorkflowState {
        self.workflow.state()
    }

    pub fn type_draft(&mut self, text: impl Into<String>) {
        self.workflow.update_draft(text);
    }

    pub fn send(&mut self) -> Result<SendResult, ChatError> {
        let log = &self.log;
        let encrypted = self.encrypted_display;
        let outcome = self.workflow.attempt_send(&self.filter, |text| {
            let mut msg = ChatMessage::outgoing(text, encrypted);
            log.append_message(&mut msg)?;
            Ok::<_, ChatError>(msg)
        })?;

        match outcome {
            SendOutcome::Ignored => Ok(SendResult::Ignored),
            SendOutcome::Delivered(msg) => {
                debug!(session = %self.id, msg_id = %msg.id, seq = msg.seq, "message sent");
                Ok(SendResult::Appended(msg))
            }
            SendOutcome::Blocked(notice) => {
                let matched: Vec<_> = self
                    .filter
                    .evaluate_all(self.workflow.draft())
                    .iter()
                    .filter_map(|findings| findings.reason())
                    .collect();
                info!(
                    session = %self.id,
                    reason = ?notice.reason,
                    ?matched,
                    "outbound message blocked by safety filter"
                );
                Ok(SendResult::Blocked(notice))
            }
        }
    }

    /// "Edit" affordance of the block notice.
    pub fn edit_blocked(&mut self) -> Result<(), ChatError> {
        self.workflow.edit()?;
        debug!(session = %self.id, "blocked draft returned to composer");
        Ok(())
    }

    /// "Submit for review" affordance of the block notice. Appends the draft
    /// as a quarantined message.
    pub fn submit_for_review(&mut self) -> Result<ChatMessage, ChatError> {
        let log = &self.log;
        let encrypted = self.encrypted_display;
        let msg = self.workflow.submit_for_review(|text| {
            let mut msg = ChatMessage::quarantined(text, encrypted);
            log.append_message(&mut msg)?;
            Ok::<_, ChatError>(msg)
        })?;

        // No review queue exists; the blocked flag is the only hand-off.
        warn!(
            session = %self.id,
            msg_id = %msg.id,
            seq = msg.seq,
            "message quarantined pending moderation review"
        );
        Ok(msg)
    }

    /// Append a message from the counter-party.
    pub fn receive(&mut self, text: impl Into<String>) -> Result<ChatMessage, ChatError> {
        let mut msg = ChatMessage::incoming(self.peer.clone(), text);
        self.log.append_message(&mut msg)?;
        Ok(msg)
    }

    pub fn post_system(&mut self, text: impl Into<String>) -> Result<ChatMessage, ChatError> {
        let mut msg = ChatMessage::system(text);
        self.log.append_message(&mut msg)?;
        Ok(msg)
    }

    /// Flip the scrambled-display flag for messages sent from now on.
    pub fn toggle_encrypted_display(&mut self) -> bool {
        self.encrypted_display = !self.encrypted_display;
        debug!(session = %self.id, on = self.encrypted_display, "display scrambling toggled");
        self.encrypted_display
    }

    pub fn messages(&self) -> Result<Vec<ChatMessage>, ChatError> {
        Ok(self.log.list_messages()?)
    }

    pub fn quarantined(&self) -> Result<Vec<ChatMessage>, ChatError> {
        Ok(self.log.quarantined_messages()?)
    }

    pub fn export_json(&self) -> Result<String, ChatError> {
        Ok(serde_json::to_string_pretty(&self.messages()?)?)
    }

    /// End the session. The log is dropped with it.
    pub fn close(self) -> Result<(), ChatError> {
        let total = self.log.message_count()?;
        let quarantined = self.log.quarantined_messages()?.len();
        info!(session = %self.id, total, quarantined, "chat session closed");
        Ok(())
    }
}
