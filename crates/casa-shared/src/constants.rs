/// Application name
pub const APP_NAME: &str = "Casa";

/// Reserved sender id for messages posted by the platform itself
pub const SYSTEM_SENDER: &str = "system";

/// Reserved sender id for messages typed by the local user
pub const SELF_SENDER: &str = "self";

/// Angolan country calling code, optional in front of a mobile number
pub const NATIONAL_PREFIX: &str = "244";

/// Top-level domains treated as an external link when they appear bare
/// (e.g. `casas.ao`).
pub const LINK_TLDS: &[&str] = &[
    "com", "net", "org", "ao", "pt", "br", "io", "co", "info", "biz", "me", "app",
];

/// Phrases that suggest settling payment or moving the conversation
/// off-platform. Matched case-insensitively as substrings.
pub const RISK_KEYWORDS: &[&str] = &[
    "pagamento direto",
    "pagamento directo",
    "pagar direto",
    "pagar por fora",
    "transferência direta",
    "transferencia direta",
    "fora da plataforma",
    "depósito antecipado",
    "deposito antecipado",
    "whatsapp",
    "telegram",
    "signal app",
    "iban",
];

/// Default welcome notice posted when a session starts
pub const DEFAULT_WELCOME: &str =
    "Por segurança, não partilhe contactos nem combine pagamentos fora da plataforma.";
