use serde::{Deserialize, Serialize};

use super::Person;

/// One entry of a To or Cc header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub address: String,
    pub name: Option<String>,
}

impl Recipient {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: None,
        }
    }

    pub fn named(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: Some(name.into()),
        }
    }
}

/// An e-mail being turned into (or attached to) a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub message_id: Option<String>,
    pub subject: Option<String>,
    pub sender: String,
    pub to: Vec<Recipient>,
    pub cc: Vec<Recipient>,
    resolved_caller: Option<Person>,
    pub additional_contacts: Vec<Person>,
}

impl InboundMessage {
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            message_id: None,
            subject: None,
            sender: sender.into(),
            to: Vec::new(),
            cc: Vec::new(),
            resolved_caller: None,
            additional_contacts: Vec::new(),
        }
    }

    pub fn with_to<I, S>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.to.extend(addresses.into_iter().map(Recipient::new));
        self
    }

    pub fn with_cc<I, S>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cc.extend(addresses.into_iter().map(Recipient::new));
        self
    }

    pub fn resolved_caller(&self) -> Option<&Person> {
        self.resolved_caller.as_ref()
    }

    pub fn has_caller(&self) -> bool {
        self.resolved_caller.is_some()
    }

    /// Record the caller. The first caller set wins; returns false if one was already set.
    pub fn set_caller(&mut self, person: Person) -> bool {
        if self.resolved_caller.is_some() {
            return false;
        }
        self.resolved_caller = Some(person);
        true
    }

    /// Add a person to the additional contacts unless already listed.
    pub fn add_contact(&mut self, person: Person) -> bool {
        if self.additional_contacts.iter().any(|p| p.id == person.id) {
            return false;
        }
        self.additional_contacts.push(person);
        true
    }

    /// Replace the stored copy of `person` (as caller or additional contact)
    /// with a fresher one. Returns false if the message does not hold that person.
    pub fn refresh_person(&mut self, person: &Person) -> bool {
        let mut refreshed = false;
        if let Some(caller) = self.resolved_caller.as_mut().filter(|c| c.id == person.id) {
            *caller = person.clone();
            refreshed = true;
        }
        for contact in self.additional_contacts.iter_mut().filter(|c| c.id == person.id) {
            *contact = person.clone();
            refreshed = true;
        }
        refreshed
    }

    /// Addresses of all To entries followed by all Cc entries.
    pub fn recipient_addresses(&self) -> impl Iterator<Item = &str> {
        self.to
            .iter()
            .chain(self.cc.iter())
            .map(|r| r.address.as_str())
    }
}
