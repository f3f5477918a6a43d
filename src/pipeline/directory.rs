//! The lookups and writes resolvers need from the contact store.

use uuid::Uuid;

use crate::db::Database;
use crate::error::DatabaseError;
use crate::models::{ContactMethod, MethodKind, Person};

/// Store seam between resolvers and persistence.
///
/// `Database` is the production implementation; tests wrap it to observe calls.
pub trait ContactDirectory {
    /// Capability check: is the contact-method extension present?
    fn has_contact_methods(&self) -> Result<bool, DatabaseError>;

    /// Contact methods of `kind` whose detail equals `detail`, ignoring case.
    fn find_contact_methods(
        &self,
        kind: MethodKind,
        detail: &str,
    ) -> Result<Vec<ContactMethod>, DatabaseError>;

    /// Active person by id.
    fn get_person(&self, id: Uuid) -> Result<Option<Person>, DatabaseError>;

    /// Active persons whose primary e-mail equals `email`, ignoring case.
    fn find_persons_by_email(&self, email: &str) -> Result<Vec<Person>, DatabaseError>;

    /// Overwrite and persist a person's primary e-mail.
    fn update_person_email(&self, id: Uuid, email: &str) -> Result<(), DatabaseError>;
}

impl ContactDirectory for Database {
    fn has_contact_methods(&self) -> Result<bool, DatabaseError> {
        Database::has_contact_methods(self)
    }

    fn find_contact_methods(
        &self,
        kind: MethodKind,
        detail: &str,
    ) -> Result<Vec<ContactMethod>, DatabaseError> {
        Database::find_contact_methods(self, kind, detail)
    }

    fn get_person(&self, id: Uuid) -> Result<Option<Person>, DatabaseError> {
        self.get_person_by_id(id)
    }

    fn find_persons_by_email(&self, email: &str) -> Result<Vec<Person>, DatabaseError> {
        Database::find_persons_by_email(self, email)
    }

    fn update_person_email(&self, id: Uuid, email: &str) -> Result<(), DatabaseError> {
        Database::update_person_email(self, id, email)
    }
}
