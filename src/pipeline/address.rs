//! Recipient address filtering shared by the recipient resolvers.

use std::collections::HashSet;

use crate::models::{InboundMessage, Mailbox, Ticket};

/// Comparison key for an address: trimmed, ASCII letters lowercased.
///
/// Folds case the same way the store's `COLLATE NOCASE` lookups do.
pub fn normalize(address: &str) -> String {
    address.trim().to_ascii_lowercase()
}

/// Addresses that never count as additional contacts: the mailbox login, its
/// aliases and the caller (the ticket's original caller on a reply, otherwise
/// the sender).
pub fn excluded_addresses(
    message: &InboundMessage,
    mailbox: &Mailbox,
    ticket: Option<&Ticket>,
) -> HashSet<String> {
    let mut excluded = HashSet::new();
    excluded.insert(normalize(&mailbox.login));
    excluded.extend(mailbox.aliases().into_iter().map(normalize));

    match ticket {
        Some(ticket) => {
            if let Some(email) = ticket.caller_email.as_deref() {
                excluded.insert(normalize(email));
            }
        }
        None => {
            excluded.insert(normalize(&message.sender));
        }
    }

    excluded.remove("");
    excluded
}

/// To and Cc addresses minus [`excluded_addresses`], each address once.
///
/// Header order and the first spelling seen are kept; blank entries are dropped.
pub fn other_recipients(
    message: &InboundMessage,
    mailbox: &Mailbox,
    ticket: Option<&Ticket>,
) -> Vec<String> {
    let excluded = excluded_addresses(message, mailbox, ticket);
    let mut seen = HashSet::new();

    message
        .recipient_addresses()
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .filter(|address| {
            let key = normalize(address);
            !excluded.contains(&key) && seen.insert(key)
        })
        .map(str::to_string)
        .collect()
}
