//! Simulated counter-party for the terminal chat.

use std::time::Duration;

const DEFAULT_REPLIES: &[&str] = &[
    "Obrigado pela mensagem! O imóvel continua disponível.",
    "Posso mostrar o imóvel esta semana. Que dia lhe convém?",
    "Sim, a renda inclui condomínio. Mais alguma dúvida?",
    "Vou confirmar com o proprietário e respondo já.",
];

pub struct AutoResponder {
    delay: Duration,
    replies: Vec<String>,
    next: usize,
}

impl AutoResponder {
    pub fn new(delay: Duration) -> Self {
        Self::with_replies(delay, DEFAULT_REPLIES.iter().map(|r| r.to_string()).collect())
    }

    pub fn with_replies(delay: Duration, replies: Vec<String>) -> Self {
        Self {
            delay,
            replies,
            next: 0,
        }
    }

    /// Wait the configured delay and return the next canned reply, or
    /// `None` if there are no replies configured.
    pub async fn reply(&mut self) -> Option<String> {
        if self.replies.is_empty() {
            return None;
        }
        tokio::time::sleep(self.delay).await;

        let reply = self.replies[self.next % self.replies.len()].clone();
        self.next += 1;
        Some(reply)
    }
}
