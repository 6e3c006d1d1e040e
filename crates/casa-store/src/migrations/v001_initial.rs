//! v001 -- Message log schema.
//!
//! `seq` is the rowid alias and doubles as the logical send order. The two
//! triggers make the table append-only.

use rusqlite::Connection;

const UP_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS messages (
    seq        INTEGER PRIMARY KEY AUTOINCREMENT,
    id         TEXT NOT NULL UNIQUE,          -- UUID v4
    sender     TEXT NOT NULL,                 -- 'system', 'self' or a party id
    body       TEXT NOT NULL,
    timestamp  TEXT NOT NULL,                 -- RFC-3339
    blocked    INTEGER NOT NULL DEFAULT 0,    -- boolean 0/1, quarantined
    encrypted  INTEGER NOT NULL DEFAULT 0     -- boolean 0/1, display toggle
);

CREATE INDEX IF NOT EXISTS idx_messages_blocked ON messages(blocked);

CREATE TRIGGER IF NOT EXISTS messages_no_update
BEFORE UPDATE ON messages
BEGIN
    SELECT RAISE(ABORT, 'messages are append-only');
END;

CREATE TRIGGER IF NOT EXISTS messages_no_delete
BEFORE DELETE ON messages
BEGIN
    SELECT RAISE(ABORT, 'messages are append-only');
END;
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
