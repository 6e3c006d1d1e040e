//! # casa-shared
//!
//! Types shared by every crate of the marketplace chat: message model,
//! sender identities, the outbound content-safety filter and the
//! presentation-only payload scrambling.

pub mod constants;
pub mod encoding;
pub mod error;
pub mod message;
pub mod safety;
pub mod types;

pub use error::{SafetyError, SharedError};
pub use message::ChatMessage;
pub use safety::{ContentSafetyFilter, SafetyFindings, UnsafeReason};
pub use types::{MessageId, Sender, SessionId};
