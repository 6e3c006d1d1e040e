use casa_shared::{ChatMessage, MessageId, Sender};
use chrono::{DateTime, Utc};
use rusqlite::params;

use crate::database::Database;
use crate::error::{Result, StoreError};

const SELECT_COLUMNS: &str = "SELECT seq, id, sender, body, timestamp, blocked, encrypted FROM messages";

impl Database {
    /// Append a message to the log and stamp it with its send order.
    pub fn append_message(&self, message: &mut ChatMessage) -> Result<u64> {
        self.conn().execute(
            "INSERT INTO messages (id, sender, body, timestamp, blocked, encrypted)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                message.id.to_string(),
                message.sender.as_str(),
                message.text,
                message.timestamp.to_rfc3339(),
                message.blocked,
                message.encrypted,
            ],
        )?;

        let seq = self.conn().last_insert_rowid() as u64;
        message.seq = seq;

        tracing::trace!(msg_id = %message.id, seq, blocked = message.blocked, "message appended");
        Ok(seq)
    }

    /// All messages in send order.
    pub fn list_messages(&self) -> Result<Vec<ChatMessage>> {
        self.query_messages(&format!("{SELECT_COLUMNS} ORDER BY seq ASC"))
    }

    /// Messages sent despite an unsafe verdict, in send order.
    pub fn quarantined_messages(&self) -> Result<Vec<ChatMessage>> {
        self.query_messages(&format!("{SELECT_COLUMNS} WHERE blocked = 1 ORDER BY seq ASC"))
    }

    pub fn get_message_by_id(&self, id: MessageId) -> Result<ChatMessage> {
        let raw = self
            .conn()
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                params![id.to_string()],
                read_row,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
                other => StoreError::Sqlite(other),
            })?;
        raw.into_message()
    }

    pub fn message_count(&self) -> Result<u64> {
        let count: i64 = self
            .conn()
            .query_row("SELECT COUNT(*) FROM messages", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn query_messages(&self, sql: &str) -> Result<Vec<ChatMessage>> {
        let mut stmt = self.conn().prepare(sql)?;
        let rows = stmt.query_map([], read_row)?;

        let mut messages = Vec::new();
        for row in rows {
            messages.push(row?.into_message()?);
        }
        Ok(messages)
    }
}

// Columns as stored, before domain parsing.
struct RawMessage {
    seq: i64,
    id: String,
    sender: String,
    body: String,
    timestamp: String,
    blocked: bool,
    encrypted: bool,
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawMessage> {
    Ok(RawMessage {
        seq: row.get(0)?,
        id: row.get(1)?,
        sender: row.get(2)?,
        body: row.get(3)?,
        timestamp: row.get(4)?,
        blocked: row.get(5)?,
        encrypted: row.get(6)?,
    })
}

impl RawMessage {
    fn into_message(self) -> Result<ChatMessage> {
        let id: MessageId = self
            .id
            .parse()
            .map_err(|e| StoreError::CorruptRow(format!("message id {}: {e}", self.id)))?;
        let sender: Sender = self
            .sender
            .parse()
            .map_err(|e| StoreError::CorruptRow(format!("sender of {id}: {e}")))?;
        let timestamp: DateTime<Utc> = DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| StoreError::CorruptRow(format!("timestamp of {id}: {e}")))?;

        Ok(ChatMessage {
            id,
            sender,
            text: self.body,
            timestamp,
            seq: self.seq as u64,
            blocked: self.blocked,
            encrypted: self.encrypted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_assigns_increasing_seq() {
        let db = Database::open_in_memory().unwrap();
        let mut first = ChatMessage::system("bem-vindo");
        let mut second = ChatMessage::outgoing("olá", false);

        assert_eq!(db.append_message(&mut first).unwrap(), 1);
        assert_eq!(db.append_message(&mut second).unwrap(), 2);
        assert_eq!(second.seq, 2);
        assert_eq!(db.message_count().unwrap(), 2);
    }

    #[test]
    fn list_preserves_insertion_order_and_fields() {
        let db = Database::open_in_memory().unwrap();
        let mut a = ChatMessage::incoming(Sender::Party("ana".into()), "bom dia");
        let mut b = ChatMessage::quarantined("o meu whatsapp é bom", true);
        db.append_message(&mut a).unwrap();
        db.append_message(&mut b).unwrap();

        let all = db.list_messages().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, a.id);
        assert_eq!(all[0].sender, Sender::Party("ana".into()));
        assert_eq!(all[1].text, "o meu whatsapp é bom");
        assert!(all[1].blocked);
        assert!(all[1].encrypted);
        assert_eq!(all[1].timestamp, b.timestamp);
    }

    #[test]
    fn quarantined_filters_blocked_rows() {
        let db = Database::open_in_memory().unwrap();
        db.append_message(&mut ChatMessage::outgoing("olá", false)).unwrap();
        let mut q = ChatMessage::quarantined("liga 923111222", false);
        db.append_message(&mut q).unwrap();

        let quarantined = db.quarantined_messages().unwrap();
        assert_eq!(quarantined.len(), 1);
        assert_eq!(quarantined[0].id, q.id);
    }

    #[test]
    fn get_by_id_and_not_found() {
        let db = Database::open_in_memory().unwrap();
        let mut msg = ChatMessage::outgoing("olá", false);
        db.append_message(&mut msg).unwrap();

        assert_eq!(db.get_message_by_id(msg.id).unwrap(), msg);
        assert!(matches!(
            db.get_message_by_id(MessageId::new()),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn log_rejects_update_and_delete() {
        let db = Database::open_in_memory().unwrap();
        let mut msg = ChatMessage::outgoing("olá", false);
        db.append_message(&mut msg).unwrap();

        assert!(db
            .conn()
            .execute("UPDATE messages SET body = 'editado'", [])
            .is_err());
        assert!(db.conn().execute("DELETE FROM messages", []).is_err());
        assert_eq!(db.get_message_by_id(msg.id).unwrap().text, "olá");
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        let mut msg = ChatMessage::outgoing("olá", false);
        db.append_message(&mut msg).unwrap();
        let mut again = msg.clone();
        assert!(db.append_message(&mut again).is_err());
    }
}
