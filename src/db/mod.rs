use rusqlite::Connection;
use std::path::Path;
use tracing::{debug, info};

use crate::error::DatabaseError;

mod contact_methods;
mod mailboxes;
mod persons;
mod schema;

pub use schema::SCHEMA_VERSION;

pub type Result<T> = std::result::Result<T, DatabaseError>;

pub struct Database {
    conn: Connection,
}

/// Helper to convert UUID parse errors to rusqlite errors
fn parse_uuid(s: &str) -> rusqlite::Result<uuid::Uuid> {
    uuid::Uuid::parse_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn parse_timestamp(s: &str) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .unwrap_or_else(|_| chrono::Utc::now())
}

impl Database {
    /// Open database at `path`, creating it and its directory if needed, running migrations
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        debug!(path = %path.display(), "opening database");
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open in-memory database for testing
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Enable the contact-method extension. Safe to call more than once.
    pub fn install_contact_methods(&self) -> Result<()> {
        self.conn
            .execute_batch(&format!(
                "BEGIN TRANSACTION; {} COMMIT;",
                schema::CONTACT_METHODS_SCHEMA
            ))
            .map_err(|e| DatabaseError::Migration(e.to_string()))?;
        info!("contact method extension installed");
        Ok(())
    }

    /// Whether the contact-method extension is installed.
    pub fn has_contact_methods(&self) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
            [schema::CONTACT_METHODS_TABLE],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn migrate(&self) -> Result<()> {
        let version = self.get_schema_version()?;

        if version == 0 {
            // Run migration in a transaction for atomicity
            self.conn
                .execute_batch(&format!("BEGIN TRANSACTION; {} COMMIT;", schema::SCHEMA_V1))
                .map_err(|e| DatabaseError::Migration(e.to_string()))?;
            self.set_schema_version(1)?;
            debug!(version = SCHEMA_VERSION, "schema created");
        } else if version > SCHEMA_VERSION {
            return Err(DatabaseError::Migration(format!(
                "database schema version {} is newer than supported version {}",
                version, SCHEMA_VERSION
            )));
        }

        Ok(())
    }

    fn get_schema_version(&self) -> Result<i32> {
        let result: rusqlite::Result<i32> =
            self.conn
                .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                    row.get(0)
                });

        match result {
            Ok(v) => Ok(v),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(rusqlite::Error::SqliteFailure(err, msg)) => {
                // "no such table" is error code 1 (SQLITE_ERROR)
                if err.code == rusqlite::ErrorCode::Unknown
                    && msg.as_ref().map_or(false, |m| m.contains("no such table"))
                {
                    Ok(0)
                } else {
                    Err(rusqlite::Error::SqliteFailure(err, msg).into())
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    fn set_schema_version(&self, version: i32) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO schema_version (id, version) VALUES (1, ?)",
            [version],
        )?;
        Ok(())
    }
}
