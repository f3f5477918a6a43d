use chrono::Utc;
use rusqlite::{params, Row};
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid, Database, Result};
use crate::error::DatabaseError;
use crate::models::Person;

impl Database {
    // ==================== PERSON CREATE ====================

    pub fn insert_person(&self, person: &Person) -> Result<()> {
        self.conn
            .execute(
                r#"INSERT INTO persons (
                    id, first_name, name, email, is_active, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?)"#,
                params![
                    person.id.to_string(),
                    person.first_name,
                    person.name,
                    person.email,
                    person.is_active as i32,
                    person.created_at.to_rfc3339(),
                    person.updated_at.to_rfc3339(),
                ],
            )
            .map_err(DatabaseError::from_write)?;
        Ok(())
    }

    // ==================== PERSON READ ====================

    pub fn get_person_by_id(&self, id: Uuid) -> Result<Option<Person>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM persons WHERE id = ? AND is_active = 1")?;

        let result = stmt.query_row([id.to_string()], Self::row_to_person);

        match result {
            Ok(person) => Ok(Some(person)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Active persons whose primary e-mail equals `email`, ignoring case.
    pub fn find_persons_by_email(&self, email: &str) -> Result<Vec<Person>> {
        let mut stmt = self.conn.prepare(
            "SELECT * FROM persons WHERE email = ? COLLATE NOCASE AND is_active = 1 ORDER BY name ASC",
        )?;

        let persons = stmt
            .query_map([email], Self::row_to_person)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(persons)
    }

    pub fn list_persons(&self, limit: u32, offset: u32) -> Result<Vec<Person>> {
        let mut stmt = self.conn.prepare(
            "SELECT * FROM persons WHERE is_active = 1 ORDER BY name ASC, first_name ASC LIMIT ? OFFSET ?",
        )?;

        let persons = stmt
            .query_map([limit, offset], Self::row_to_person)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(persons)
    }

    pub fn count_persons(&self) -> Result<u32> {
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM persons WHERE is_active = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    // ==================== PERSON UPDATE ====================

    /// Overwrite a person's primary e-mail. Automatically sets `updated_at` to now.
    pub fn update_person_email(&self, id: Uuid, email: &str) -> Result<()> {
        let rows = self
            .conn
            .execute(
                "UPDATE persons SET email = ?, updated_at = ? WHERE id = ?",
                params![email, Utc::now().to_rfc3339(), id.to_string()],
            )
            .map_err(DatabaseError::from_write)?;

        if rows == 0 {
            return Err(DatabaseError::NotFound {
                entity: "person",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// Soft delete: the person stays in the table but is no longer matched.
    pub fn deactivate_person(&self, id: Uuid) -> Result<bool> {
        let rows = self.conn.execute(
            "UPDATE persons SET is_active = 0, updated_at = ? WHERE id = ?",
            params![Utc::now().to_rfc3339(), id.to_string()],
        )?;
        Ok(rows > 0)
    }

    // ==================== ROW MAPPERS ====================

    pub(super) fn row_to_person(row: &Row) -> rusqlite::Result<Person> {
        let id: String = row.get("id")?;
        let created_at: String = row.get("created_at")?;
        let updated_at: String = row.get("updated_at")?;

        Ok(Person {
            id: parse_uuid(&id)?,
            first_name: row.get("first_name")?,
            name: row.get("name")?,
            email: row.get("email")?,
            is_active: row.get::<_, i32>("is_active")? == 1,
            created_at: parse_timestamp(&created_at),
            updated_at: parse_timestamp(&updated_at),
        })
    }
}
