use casa_shared::{SafetyFindings, UnsafeReason};
use serde::Serialize;

/// Overlay payload shown when a draft is blocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockNotice {
    pub reason: UnsafeReason,
    pub reason_label: String,
    pub snippet: Option<String>,
}

impl BlockNotice {
    pub fn new(reason: UnsafeReason, snippet: Option<String>) -> Self {
        Self {
            reason,
            reason_label: reason.label().to_string(),
            snippet,
        }
    }

    /// `None` for safe findings.
    pub fn from_findings(findings: &SafetyFindings) -> Option<Self> {
        match findings {
            SafetyFindings::Safe => None,
            SafetyFindings::Unsafe { reason, snippet } => Some(Self::new(*reason, snippet.clone())),
        }
    }

    pub fn message(&self) -> String {
        match &self.snippet {
            Some(snippet) => format!(
                "A mensagem não foi enviada: contém {} (\"{}\").",
                self.reason_label, snippet
            ),
            None => format!("A mensagem não foi enviada: contém {}.", self.reason_label),
        }
    }
}
