//! Turning raw RFC 5322 mail into an [`InboundMessage`].

use std::path::Path;

use mail_parser::{Address, MessageParser};

use crate::error::IngestError;
use crate::models::{InboundMessage, Recipient};

/// Parse a raw message. The first From address becomes the sender.
pub fn parse_message(raw: &[u8]) -> Result<InboundMessage, IngestError> {
    let parsed = MessageParser::default()
        .parse(raw)
        .ok_or(IngestError::Unparseable)?;

    let sender = parsed
        .from()
        .and_then(|addr| addr.first())
        .and_then(|a| a.address())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(IngestError::MissingSender)?;

    let mut message = InboundMessage::new(sender);
    message.subject = parsed.subject().map(|s| s.to_string());
    message.message_id = parsed.message_id().map(|s| s.to_string());
    message.to = extract_recipients(parsed.to());
    message.cc = extract_recipients(parsed.cc());
    Ok(message)
}

pub fn read_message(path: impl AsRef<Path>) -> Result<InboundMessage, IngestError> {
    let raw = std::fs::read(path)?;
    parse_message(&raw)
}

/// Recipients of an optional address header, group members flattened.
/// Entries without an address are skipped.
fn extract_recipients(addr: Option<&Address>) -> Vec<Recipient> {
    let Some(addr) = addr else {
        return Vec::new();
    };
    let entries: Vec<&mail_parser::Addr> = match addr {
        Address::List(addrs) => addrs.iter().collect(),
        Address::Group(groups) => groups.iter().flat_map(|g| g.addresses.iter()).collect(),
    };
    entries
        .into_iter()
        .filter_map(|a| {
            let address = a.address.as_ref()?.trim().to_string();
            if address.is_empty() {
                return None;
            }
            Some(Recipient {
                address,
                name: a.name.as_ref().map(|n| n.to_string()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "From: Alice Example <alice@x.com>\r\n\
To: Helpdesk <helpdesk@x.com>, bob@x.com\r\n\
Cc: \"Carol\" <carol@x.com>\r\n\
Subject: Printer on fire\r\n\
Message-ID: <1234@x.com>\r\n\
\r\n\
It is still burning.\r\n";

    #[test]
    fn test_parse_headers() {
        let message = parse_message(RAW.as_bytes()).unwrap();

        assert_eq!(message.sender, "alice@x.com");
        assert_eq!(message.subject.as_deref(), Some("Printer on fire"));
        assert_eq!(message.message_id.as_deref(), Some("1234@x.com"));

        let to: Vec<&str> = message.to.iter().map(|r| r.address.as_str()).collect();
        assert_eq!(to, vec!["helpdesk@x.com", "bob@x.com"]);
        assert_eq!(message.to[0].name.as_deref(), Some("Helpdesk"));
        assert_eq!(message.cc, vec![Recipient::named("carol@x.com", "Carol")]);
        assert!(!message.has_caller());
    }

    #[test]
    fn test_group_recipients_flattened() {
        let raw = "From: alice@x.com\r\n\
To: Team: bob@x.com, dave@x.com;\r\n\
Subject: hi\r\n\
\r\n\
body\r\n";
        let message = parse_message(raw.as_bytes()).unwrap();
        let to: Vec<&str> = message.to.iter().map(|r| r.address.as_str()).collect();
        assert_eq!(to, vec!["bob@x.com", "dave@x.com"]);
    }

    #[test]
    fn test_missing_sender() {
        let raw = "To: bob@x.com\r\nSubject: anonymous\r\n\r\nbody\r\n";
        assert!(matches!(
            parse_message(raw.as_bytes()),
            Err(IngestError::MissingSender)
        ));
    }

    #[test]
    fn test_read_message_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mail.eml");
        std::fs::write(&path, RAW).unwrap();

        let message = read_message(&path).unwrap();
        assert_eq!(message.sender, "alice@x.com");
        assert!(matches!(
            read_message(dir.path().join("missing.eml")),
            Err(IngestError::Io(_))
        ));
    }
}
