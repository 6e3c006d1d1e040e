//! # casa-chat
//!
//! Chat composer for the marketplace: runs each outbound draft through the
//! content-safety filter, handles the block / appeal flow and keeps the
//! session's message log.

pub mod autoreply;
pub mod config;
pub mod error;
pub mod notice;
pub mod render;
pub mod session;
pub mod workflow;

use tracing_subscriber::{fmt, EnvFilter};

pub use config::SessionConfig;
pub use error::{ChatError, WorkflowError};
pub use notice::BlockNotice;
pub use session::{ChatSession, SendResult};
pub use workflow::{AppealWorkflow, SendOutcome, WorkflowState};

/// Install the global tracing subscriber (respects `RUST_LOG`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,casa_chat=debug,casa_store=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
