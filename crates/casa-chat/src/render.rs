use casa_shared::{ChatMessage, Sender};

const QUARANTINE_MARKER: &str = "[RETIDA PARA REVISÃO]";

/// One terminal line for a log entry.
pub fn render_message(msg: &ChatMessage, peer_name: &str) -> String {
    let who = match &msg.sender {
        Sender::Me => "Eu",
        Sender::System => "Sistema",
        Sender::Party(_) => peer_name,
    };
    let time = msg.timestamp.format("%H:%M");

    if msg.is_quarantined() {
        format!("{time} {who}: {QUARANTINE_MARKER} {}", msg.display_text())
    } else {
        format!("{time} {who}: {}", msg.display_text())
    }
}
