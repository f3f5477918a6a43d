use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::cli::ProcessArgs;
use crate::db::Database;
use crate::ingest;
use crate::models::{InboundMessage, Person, Recipient};
use crate::pipeline::{Pipeline, PipelineReport};

/// Result of running the pipeline for one message.
#[derive(Debug, Serialize)]
pub struct Outcome {
    pub sender: String,
    pub caller: Option<Person>,
    pub additional_contacts: Vec<Person>,
    pub report: PipelineReport,
}

/// Execute the process command
pub fn run_process(db: &Database, args: ProcessArgs) -> Result<()> {
    let json = args.json;
    let outcome = process_message(db, args)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!("Sender:  {}", outcome.sender);
    match outcome.caller {
        Some(ref caller) => println!(
            "Caller:  {} <{}>",
            caller.friendly_name(),
            caller.email.as_deref().unwrap_or("-")
        ),
        None => println!("Caller:  (unknown)"),
    }
    if outcome.additional_contacts.is_empty() {
        println!("Contacts: (none)");
    } else {
        println!("Contacts:");
        for person in &outcome.additional_contacts {
            println!(
                "  {} <{}>",
                person.friendly_name(),
                person.email.as_deref().unwrap_or("-")
            );
        }
    }
    println!("Steps:   {}", outcome.report.steps.join(" -> "));
    if let Some(ref halted) = outcome.report.halted {
        println!("Halted by {}: {}", halted.step, halted.reason);
    }

    Ok(())
}

pub fn process_message(db: &Database, args: ProcessArgs) -> Result<Outcome> {
    let mut message = match (args.eml, args.from) {
        (Some(path), _) => ingest::read_message(&path)?,
        (None, Some(from)) => {
            let mut message = InboundMessage::new(from.trim());
            message.to = args.to.iter().map(|a| Recipient::new(a.trim())).collect();
            message.cc = args.cc.iter().map(|a| Recipient::new(a.trim())).collect();
            message
        }
        (None, None) => return Err(anyhow!("Either --eml or --from is required.")),
    };

    let mailbox = db
        .get_mailbox_by_login(&args.mailbox)?
        .ok_or_else(|| anyhow!("Unknown mailbox: {}", args.mailbox))?;

    let ticket = match args.ticket {
        Some(ref reference) => Some(
            db.get_ticket_by_reference(reference)?
                .ok_or_else(|| anyhow!("Unknown ticket: {}", reference))?,
        ),
        None => None,
    };

    let report = Pipeline::standard().run(db, &mut message, &mailbox, ticket.as_ref())?;

    Ok(Outcome {
        caller: message.resolved_caller().cloned(),
        sender: message.sender,
        additional_contacts: message.additional_contacts,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContactMethod, Mailbox};

    fn args(from: &str, to: &[&str], cc: &[&str]) -> ProcessArgs {
        ProcessArgs {
            mailbox: "helpdesk@x.com".to_string(),
            eml: None,
            from: Some(from.to_string()),
            to: to.iter().map(|s| s.to_string()).collect(),
            cc: cc.iter().map(|s| s.to_string()).collect(),
            ticket: None,
            json: false,
        }
    }

    fn setup() -> Database {
        let db = Database::open_memory().unwrap();
        db.install_contact_methods().unwrap();
        db.insert_mailbox(&Mailbox::new("helpdesk@x.com")).unwrap();
        db
    }

    #[test]
    fn test_process_from_flags() {
        let db = setup();
        let mut person = Person::new("Caller");
        person.email = Some("caller@corp.com".to_string());
        db.insert_person(&person).unwrap();
        db.insert_contact_method(&ContactMethod::email(person.id, "caller@home.com"))
            .unwrap();

        let outcome = process_message(&db, args("caller@home.com", &["helpdesk@x.com"], &[])).unwrap();

        assert_eq!(outcome.caller.map(|p| p.id), Some(person.id));
        assert!(outcome.report.completed());
        let stored = db.get_person_by_id(person.id).unwrap().unwrap();
        assert_eq!(stored.email, Some("caller@home.com".to_string()));
    }

    #[test]
    fn test_process_from_eml() {
        let db = setup();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mail.eml");
        std::fs::write(
            &path,
            "From: nobody@x.com\r\nTo: helpdesk@x.com\r\nSubject: hi\r\n\r\nbody\r\n",
        )
        .unwrap();

        let mut process_args = args("", &[], &[]);
        process_args.from = None;
        process_args.eml = Some(path);

        let outcome = process_message(&db, process_args).unwrap();
        assert_eq!(outcome.sender, "nobody@x.com");
        assert!(outcome.caller.is_none());
    }

    #[test]
    fn test_process_unknown_mailbox_or_ticket() {
        let db = setup();

        let mut unknown_mailbox = args("a@x.com", &[], &[]);
        unknown_mailbox.mailbox = "other@x.com".to_string();
        assert!(process_message(&db, unknown_mailbox).is_err());

        let mut unknown_ticket = args("a@x.com", &[], &[]);
        unknown_ticket.ticket = Some("R-404".to_string());
        assert!(process_message(&db, unknown_ticket).is_err());
    }

    #[test]
    fn test_outcome_serializes() {
        let db = setup();
        let outcome = process_message(&db, args("a@x.com", &[], &[])).unwrap();

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["sender"], "a@x.com");
        assert!(json["caller"].is_null());
        assert_eq!(json["report"]["steps"].as_array().unwrap().len(), 4);
    }
}
