use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub name: String,
    /// Primary e-mail, the address default caller matching looks at.
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            first_name: None,
            name: name.into(),
            email: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// "First Last", or just the last name when no first name is known.
    pub fn friendly_name(&self) -> String {
        match self.first_name.as_deref() {
            Some(first) if !first.trim().is_empty() => format!("{} {}", first, self.name),
            _ => self.name.clone(),
        }
    }
}
