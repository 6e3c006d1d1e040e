//! Draft / block / appeal state machine for one chat composer.
//!
//! ```text
//!   Composing ──send (unsafe)──▶ Blocked ──edit──────────────▶ Composing (draft kept)
//!       ▲  │                        │
//!       │  └─send (safe)─▶ deliver  └──submit for review──────▶ Composing (draft cleared)
//!       └──────────────────────────────────────────────────────┘
//! ```
//!
//! Any edit of the draft while blocked clears the block indicator. Sending
//! hands the draft to a `deliver` callback and clears it only once that
//! callback succeeds; on failure the composer is left exactly as it was.

use casa_shared::ContentSafetyFilter;

use crate::error::WorkflowError;
use crate::notice::BlockNotice;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState {
    Composing,
    Blocked(BlockNotice),
}

/// What a send attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome<T> {
    /// The draft was blank; nothing happened.
    Ignored,
    /// The draft passed the filter and was delivered.
    Delivered(T),
    /// The draft was withheld; it is still in the composer.
    Blocked(BlockNotice),
}

#[derive(Debug, Clone)]
pub struct AppealWorkflow {
    draft: String,
    state: WorkflowState,
}

impl AppealWorkflow {
    pub fn new() -> Self {
        Self {
            draft: String::new(),
            state: WorkflowState::Composing,
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self.state, WorkflowState::Blocked(_))
    }

    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
        self.state = WorkflowState::Composing;
    }

    pub fn attempt_send<T, E>(
        &mut self,
        filter: &ContentSafetyFilter,
        deliver: impl FnOnce(&str) -> Result<T, E>,
    ) -> Result<SendOutcome<T>, E> {
        if self.draft.trim().is_empty() {
            return Ok(SendOutcome::Ignored);
        }

        let findings = filter.evaluate(&self.draft);
        match BlockNotice::from_findings(&findings) {
            None => {
                let delivered = deliver(&self.draft)?;
                self.draft.clear();
                self.state = WorkflowState::Composing;
                Ok(SendOutcome::Delivered(delivered))
            }
            Some(notice) => {
                self.state = WorkflowState::Blocked(notice.clone());
                Ok(SendOutcome::Blocked(notice))
            }
        }
    }

    /// Dismiss the block notice and go back to editing the same draft.
    pub fn edit(&mut self) -> Result<(), WorkflowError> {
        if !self.is_blocked() {
            return Err(WorkflowError::NotBlocked);
        }
        self.state = WorkflowState::Composing;
        Ok(())
    }

    /// Send the blocked draft anyway, flagged for review. The composer is
    /// emptied only if `deliver` succeeds.
    pub fn submit_for_review<T, E>(
        &mut self,
        deliver: impl FnOnce(&str) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<WorkflowError>,
    {
        if !self.is_blocked() {
            return Err(WorkflowError::NotBlocked.into());
        }
        let delivered = deliver(&self.draft)?;
        self.draft.clear();
        self.state = WorkflowState::Composing;
        Ok(delivered)
    }
}

impl Default for AppealWorkflow {
    fn default() -> Self {
        Self::new()
    }
}
