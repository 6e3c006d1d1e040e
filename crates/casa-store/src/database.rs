//! Connection management.
//!
//! The [`Database`] struct owns a [`rusqlite::Connection`] and guarantees that
//! migrations are run before any other operation.

use rusqlite::Connection;

use crate::error::Result;
use crate::migrations;

/// Wrapper around an in-memory [`rusqlite::Connection`].
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open a fresh, empty log.
    ///
    /// The data lives only as long as the returned handle.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run_migrations(&conn)?;

        tracing::debug!("opened in-memory message log");
        Ok(Self { conn })
    }

    /// Return a reference to the underlying `rusqlite::Connection`.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}
