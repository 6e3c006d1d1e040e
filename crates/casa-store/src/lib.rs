//! # casa-store
//!
//! Session-scoped message log for the marketplace chat.
//!
//! Each chat session owns one [`Database`] backed by an in-memory SQLite
//! connection: it is created when the session starts and dropped with it, so
//! nothing outlives the session. The `messages` table is append-only; the
//! schema rejects updates and deletes.

pub mod database;
pub mod messages;
pub mod migrations;

mod error;

pub use database::Database;
pub use error::{Result, StoreError};
