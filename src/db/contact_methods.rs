use rusqlite::{params, Row};
use uuid::Uuid;

use super::{parse_uuid, Database, Result};
use crate::error::DatabaseError;
use crate::models::{ContactMethod, MethodKind};

impl Database {
    pub fn insert_contact_method(&self, method: &ContactMethod) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO contact_methods (id, person_id, contact_method, contact_detail)
                 VALUES (?, ?, ?, ?)",
                params![
                    method.id.to_string(),
                    method.person_id.to_string(),
                    method.method.as_str(),
                    method.detail,
                ],
            )
            .map_err(DatabaseError::from_write)?;
        Ok(())
    }

    /// Exact lookup by kind and detail. The detail comparison ignores case but
    /// has no wildcard semantics.
    pub fn find_contact_methods(&self, kind: MethodKind, detail: &str) -> Result<Vec<ContactMethod>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, person_id, contact_method, contact_detail FROM contact_methods
             WHERE contact_method = ? AND contact_detail = ? COLLATE NOCASE
             ORDER BY id",
        )?;

        let methods = stmt
            .query_map(params![kind.as_str(), detail], Self::row_to_contact_method)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(methods)
    }

    pub fn get_contact_methods_for_person(&self, person_id: Uuid) -> Result<Vec<ContactMethod>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, person_id, contact_method, contact_detail FROM contact_methods
             WHERE person_id = ? ORDER BY contact_method, contact_detail",
        )?;

        let methods = stmt
            .query_map([person_id.to_string()], Self::row_to_contact_method)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(methods)
    }

    pub fn list_contact_methods(&self) -> Result<Vec<ContactMethod>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, person_id, contact_method, contact_detail FROM contact_methods
             ORDER BY contact_detail COLLATE NOCASE",
        )?;

        let methods = stmt
            .query_map([], Self::row_to_contact_method)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(methods)
    }

    pub fn delete_contact_method(&self, id: Uuid) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM contact_methods WHERE id = ?", [id.to_string()])?;
        Ok(rows > 0)
    }

    fn row_to_contact_method(row: &Row) -> rusqlite::Result<ContactMethod> {
        let id: String = row.get("id")?;
        let person_id: String = row.get("person_id")?;
        let method: String = row.get("contact_method")?;

        Ok(ContactMethod {
            id: parse_uuid(&id)?,
            person_id: parse_uuid(&person_id)?,
            method: MethodKind::parse(&method),
            detail: row.get("contact_detail")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Person;

    fn setup() -> (Database, Person) {
        let db = Database::open_memory().unwrap();
        db.install_contact_methods().unwrap();

        let person = Person::new("Owner");
        db.insert_person(&person).unwrap();
        (db, person)
    }

    #[test]
    fn test_contact_method_crud() {
        let (db, person) = setup();

        let method = ContactMethod::email(person.id, "owner@example.com");
        db.insert_contact_method(&method).unwrap();

        let methods = db.get_contact_methods_for_person(person.id).unwrap();
        assert_eq!(methods, vec![method.clone()]);
        assert_eq!(db.list_contact_methods().unwrap().len(), 1);

        assert!(db.delete_contact_method(method.id).unwrap());
        assert!(db.get_contact_methods_for_person(person.id).unwrap().is_empty());
    }

    #[test]
    fn test_find_is_exact_and_case_insensitive() {
        let (db, person) = setup();

        db.insert_contact_method(&ContactMethod::email(person.id, "Owner@Example.com"))
            .unwrap();

        assert_eq!(db.find_contact_methods(MethodKind::Email, "owner@example.com").unwrap().len(), 1);
        assert!(db.find_contact_methods(MethodKind::Email, "owner@example").unwrap().is_empty());
        // LIKE wildcards have no effect
        assert!(db.find_contact_methods(MethodKind::Email, "%@example.com").unwrap().is_empty());
        assert!(db.find_contact_methods(MethodKind::Email, "owner_example.com").unwrap().is_empty());
    }

    #[test]
    fn test_find_filters_by_kind() {
        let (db, person) = setup();

        db.insert_contact_method(&ContactMethod::new(person.id, MethodKind::Phone, "555-0100"))
            .unwrap();

        assert!(db.find_contact_methods(MethodKind::Email, "555-0100").unwrap().is_empty());
        assert_eq!(db.find_contact_methods(MethodKind::Phone, "555-0100").unwrap().len(), 1);
    }

    #[test]
    fn test_find_returns_every_duplicate() {
        let (db, person) = setup();
        let other = Person::new("Other");
        db.insert_person(&other).unwrap();

        db.insert_contact_method(&ContactMethod::email(person.id, "dup@x.com")).unwrap();
        db.insert_contact_method(&ContactMethod::email(other.id, "DUP@x.com")).unwrap();

        assert_eq!(db.find_contact_methods(MethodKind::Email, "dup@x.com").unwrap().len(), 2);
    }

    #[test]
    fn test_unknown_person_rejected() {
        let (db, _) = setup();

        let result = db.insert_contact_method(&ContactMethod::email(Uuid::new_v4(), "x@x.com"));
        assert!(matches!(result, Err(DatabaseError::Constraint(_))));
    }
}
