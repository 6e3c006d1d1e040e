//! Schema setup for a fresh message log.
//!
//! Each step in [`STEPS`] carries the `user_version` it brings the schema
//! to. Steps at or below the connection's current version are skipped, so
//! re-running is a no-op.

pub mod v001_initial;

use rusqlite::Connection;

use crate::error::{Result, StoreError};

type Step = (u32, &'static str, fn(&Connection) -> rusqlite::Result<()>);

const STEPS: &[Step] = &[(1, "v001_initial", v001_initial::up)];

/// Schema version a fully set-up log reports.
pub const CURRENT_VERSION: u32 = 1;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    let current: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    for (target, name, up) in STEPS.iter().filter(|(target, _, _)| *target > current) {
        up(conn).map_err(|e| StoreError::Migration(format!("{name}: {e}")))?;
        conn.pragma_update(None, "user_version", *target)?;
        tracing::debug!(step = *name, version = *target, "message log schema step applied");
    }

    Ok(())
}
