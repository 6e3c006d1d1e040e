//! Session configuration loaded from environment variables.
//!
//! All settings have defaults so a session can start with zero
//! configuration.

use std::time::Duration;

use casa_shared::constants::DEFAULT_WELCOME;
use casa_shared::Sender;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Opaque id of the counter-party (listing owner or agent).
    /// Env: `CASA_PEER_ID`
    /// Default: `anunciante`
    pub peer_id: String,

    /// Name shown next to counter-party messages.
    /// Env: `CASA_PEER_NAME`
    /// Default: `Anunciante`
    pub peer_name: String,

    /// Whether the simulated counter-party answers safe messages.
    /// Env: `CASA_AUTO_REPLY` (true/false)
    /// Default: `true`
    pub auto_reply: bool,

    /// Delay before a simulated answer.
    /// Env: `CASA_AUTO_REPLY_DELAY_MS`
    /// Default: `1500`
    pub auto_reply_delay: Duration,

    /// Initial state of the scrambled-display toggle.
    /// Env: `CASA_ENCRYPTED_DISPLAY` (true/false)
    /// Default: `false`
    pub encrypted_display: bool,

    /// Extra risk keywords, comma separated.
    /// Env: `CASA_EXTRA_RISK_KEYWORDS`
    /// Default: none
    pub extra_risk_keywords: Vec<String>,

    /// System notice posted when the session starts. Empty disables it.
    /// Env: `CASA_WELCOME`
    pub welcome_message: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            peer_id: "anunciante".to_string(),
            peer_name: "Anunciante".to_string(),
            auto_reply: true,
            auto_reply_delay: Duration::from_millis(1500),
            encrypted_display: false,
            extra_risk_keywords: Vec::new(),
            welcome_message: DEFAULT_WELCOME.to_string(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(id) = get("CASA_PEER_ID") {
            match Sender::party(id.trim()) {
                Ok(_) => config.peer_id = id.trim().to_string(),
                Err(e) => tracing::warn!(error = %e, "Invalid CASA_PEER_ID, using default"),
            }
        }

        if let Some(name) = get("CASA_PEER_NAME") {
            config.peer_name = name;
        }

        if let Some(val) = get("CASA_AUTO_REPLY") {
            config.auto_reply = parse_flag(&val);
        }

        if let Some(val) = get("CASA_AUTO_REPLY_DELAY_MS") {
            match val.parse::<u64>() {
                Ok(ms) => config.auto_reply_delay = Duration::from_millis(ms),
                Err(e) => {
                    tracing::warn!(value = %val, error = %e, "Invalid CASA_AUTO_REPLY_DELAY_MS, using default");
                }
            }
        }

        if let Some(val) = get("CASA_ENCRYPTED_DISPLAY") {
            config.encrypted_display = parse_flag(&val);
        }

        if let Some(val) = get("CASA_EXTRA_RISK_KEYWORDS") {
            config.extra_risk_keywords = val
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(welcome) = get("CASA_WELCOME") {
            config.welcome_message = welcome;
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter.

        config
    }
}

fn parse_flag(val: &str) -> bool {
    val != "false" && val != "0"
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = SessionConfig::from_lookup(lookup(&[]));
        assert_eq!(config.peer_id, "anunciante");
        assert!(config.auto_reply);
        assert_eq!(config.auto_reply_delay, Duration::from_millis(1500));
        assert!(!config.encrypted_display);
        assert!(config.extra_risk_keywords.is_empty());
    }

    #[test]
    fn test_overrides() {
        let config = SessionConfig::from_lookup(lookup(&[
            ("CASA_PEER_ID", "agente-7"),
            ("CASA_AUTO_REPLY", "0"),
            ("CASA_AUTO_REPLY_DELAY_MS", "10"),
            ("CASA_ENCRYPTED_DISPLAY", "true"),
            ("CASA_EXTRA_RISK_KEYWORDS", " kwik , ,unitel money"),
        ]));
        assert_eq!(config.peer_id, "agente-7");
        assert!(!config.auto_reply);
        assert_eq!(config.auto_reply_delay, Duration::from_millis(10));
        assert!(config.encrypted_display);
        assert_eq!(config.extra_risk_keywords, vec!["kwik", "unitel money"]);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = SessionConfig::from_lookup(lookup(&[
            ("CASA_PEER_ID", "system"),
            ("CASA_AUTO_REPLY_DELAY_MS", "soon"),
        ]));
        assert_eq!(config.peer_id, "anunciante");
        assert_eq!(config.auto_reply_delay, Duration::from_millis(1500));
    }
}
