use rusqlite::{params, Row};

use super::{parse_timestamp, parse_uuid, Database, Result};
use crate::error::DatabaseError;
use crate::models::{Mailbox, Ticket, UnknownCaller};

impl Database {
    // ==================== MAILBOXES ====================

    pub fn insert_mailbox(&self, mailbox: &Mailbox) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO mailboxes (id, login, mail_aliases, unknown_caller) VALUES (?, ?, ?, ?)",
                params![
                    mailbox.id.to_string(),
                    mailbox.login,
                    mailbox.mail_aliases,
                    mailbox.unknown_caller.as_str(),
                ],
            )
            .map_err(DatabaseError::from_write)?;
        Ok(())
    }

    pub fn get_mailbox_by_login(&self, login: &str) -> Result<Option<Mailbox>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM mailboxes WHERE login = ? COLLATE NOCASE")?;

        match stmt.query_row([login], Self::row_to_mailbox) {
            Ok(mailbox) => Ok(Some(mailbox)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn list_mailboxes(&self) -> Result<Vec<Mailbox>> {
        let mut stmt = self.conn.prepare("SELECT * FROM mailboxes ORDER BY login")?;

        let mailboxes = stmt
            .query_map([], Self::row_to_mailbox)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(mailboxes)
    }

    // ==================== TICKETS ====================

    pub fn insert_ticket(&self, ticket: &Ticket) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO tickets (id, reference, title, caller_id, created_at) VALUES (?, ?, ?, ?, ?)",
                params![
                    ticket.id.to_string(),
                    ticket.reference,
                    ticket.title,
                    ticket.caller_id.map(|id| id.to_string()),
                    ticket.created_at.to_rfc3339(),
                ],
            )
            .map_err(DatabaseError::from_write)?;
        Ok(())
    }

    /// Load a ticket together with its caller's current primary e-mail.
    pub fn get_ticket_by_reference(&self, reference: &str) -> Result<Option<Ticket>> {
        let mut stmt = self.conn.prepare(
            r#"SELECT t.*, p.email AS caller_email FROM tickets t
               LEFT JOIN persons p ON p.id = t.caller_id
               WHERE t.reference = ?"#,
        )?;

        match stmt.query_row([reference], Self::row_to_ticket) {
            Ok(ticket) => Ok(Some(ticket)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    // ==================== ROW MAPPERS ====================

    fn row_to_mailbox(row: &Row) -> rusqlite::Result<Mailbox> {
        let id: String = row.get("id")?;
        let unknown_caller: String = row.get("unknown_caller")?;

        Ok(Mailbox {
            id: parse_uuid(&id)?,
            login: row.get("login")?,
            mail_aliases: row.get("mail_aliases")?,
            unknown_caller: UnknownCaller::parse(&unknown_caller),
        })
    }

    fn row_to_ticket(row: &Row) -> rusqlite::Result<Ticket> {
        let id: String = row.get("id")?;
        let caller_id: Option<String> = row.get("caller_id")?;
        let created_at: String = row.get("created_at")?;

        Ok(Ticket {
            id: parse_uuid(&id)?,
            reference: row.get("reference")?,
            title: row.get("title")?,
            caller_id: caller_id.as_deref().map(parse_uuid).transpose()?,
            caller_email: row.get("caller_email")?,
            created_at: parse_timestamp(&created_at),
        })
    }
}
