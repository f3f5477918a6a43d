use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An existing ticket an inbound message replies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,
    pub reference: String,
    pub title: String,
    pub caller_id: Option<Uuid>,
    /// Primary e-mail of the caller, joined in when the ticket is loaded.
    pub caller_email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Ticket {
    pub fn new(reference: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            reference: reference.into(),
            title: title.into(),
            caller_id: None,
            caller_email: None,
            created_at: Utc::now(),
        }
    }
}
