use anyhow::{anyhow, bail, Result};
use uuid::Uuid;

use crate::cli::{MailboxArgs, MethodArgs, PersonArgs, TicketArgs};
use crate::db::Database;
use crate::models::{ContactMethod, Mailbox, MethodKind, Person, Ticket, UnknownCaller};

pub fn is_valid_email(email: &str) -> bool {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }
    let (local, domain) = (parts[0], parts[1]);
    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}

fn parse_person_id(db: &Database, raw: &str) -> Result<Person> {
    let id = Uuid::parse_str(raw.trim()).map_err(|_| anyhow!("Invalid person id: {}", raw))?;
    db.get_person_by_id(id)?
        .ok_or_else(|| anyhow!("No active person with id {}", id))
}

pub fn run_add_person(db: &Database, args: PersonArgs) -> Result<Person> {
    let name = args.name.trim();
    if name.is_empty() {
        bail!("Name is required.");
    }

    if let Some(ref e) = args.email {
        if !is_valid_email(e) {
            bail!("Invalid email format: {}", e);
        }
    }

    let mut person = Person::new(name);
    person.first_name = args.first.filter(|f| !f.trim().is_empty());
    person.email = args.email;
    db.insert_person(&person)?;

    println!("Created: {} ({})", person.friendly_name(), person.id);
    Ok(person)
}

pub fn run_add_method(db: &Database, args: MethodArgs) -> Result<ContactMethod> {
    if !db.has_contact_methods()? {
        bail!("Contact methods are not installed. Run `contactmethod install` first.");
    }

    let person = parse_person_id(db, &args.person)?;
    let kind = MethodKind::parse(&args.kind);
    let detail = args.detail.trim();

    if kind == MethodKind::Email && !is_valid_email(detail) {
        bail!("Invalid email format: {}", detail);
    }

    let method = ContactMethod::new(person.id, kind, detail);
    db.insert_contact_method(&method)?;

    println!(
        "Added {} {} for {}",
        method.method.as_str(),
        method.detail,
        person.friendly_name()
    );
    Ok(method)
}

pub fn run_add_mailbox(db: &Database, args: MailboxArgs) -> Result<Mailbox> {
    if !is_valid_email(&args.login) {
        bail!("Invalid email format: {}", args.login);
    }
    if let Some(bad) = args.aliases.iter().find(|a| !is_valid_email(a.trim())) {
        bail!("Invalid alias format: {}", bad);
    }

    let mut mailbox = Mailbox::new(args.login.trim()).with_aliases(&args.aliases);
    if args.reject_unknown {
        mailbox.unknown_caller = UnknownCaller::Reject;
    }
    db.insert_mailbox(&mailbox)?;

    println!("Created mailbox: {}", mailbox.login);
    Ok(mailbox)
}

pub fn run_add_ticket(db: &Database, args: TicketArgs) -> Result<Ticket> {
    let mut ticket = Ticket::new(args.reference.trim(), args.title);
    if let Some(ref raw) = args.caller {
        let caller = parse_person_id(db, raw)?;
        ticket.caller_id = Some(caller.id);
        ticket.caller_email = caller.email;
    }
    db.insert_ticket(&ticket)?;

    println!("Created ticket: {}", ticket.reference);
    Ok(ticket)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person_args(name: &str, email: Option<&str>) -> PersonArgs {
        PersonArgs {
            first: None,
            name: name.to_string(),
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn test_valid_email() {
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("user.name@domain.co.uk"));
        assert!(!is_valid_email("invalid"));
        assert!(!is_valid_email("@domain.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@domain"));
    }

    #[test]
    fn test_add_person_direct() {
        let db = Database::open_memory().unwrap();

        let person = run_add_person(
            &db,
            PersonArgs {
                first: Some("John".to_string()),
                name: "Smith".to_string(),
                email: Some("john@example.com".to_string()),
            },
        )
        .unwrap();

        let stored = db.get_person_by_id(person.id).unwrap().unwrap();
        assert_eq!(stored.friendly_name(), "John Smith");
        assert_eq!(stored.email, Some("john@example.com".to_string()));
    }

    #[test]
    fn test_add_person_requires_name_and_valid_email() {
        let db = Database::open_memory().unwrap();

        assert!(run_add_person(&db, person_args(" ", None)).is_err());
        assert!(run_add_person(&db, person_args("Smith", Some("invalid-email"))).is_err());
        assert_eq!(db.count_persons().unwrap(), 0);
    }

    #[test]
    fn test_add_method_needs_install() {
        let db = Database::open_memory().unwrap();
        let person = run_add_person(&db, person_args("Smith", None)).unwrap();

        let args = MethodArgs {
            person: person.id.to_string(),
            detail: "smith@home.com".to_string(),
            kind: "email".to_string(),
        };
        assert!(run_add_method(&db, args).is_err());
    }

    #[test]
    fn test_add_method() {
        let db = Database::open_memory().unwrap();
        db.install_contact_methods().unwrap();
        let person = run_add_person(&db, person_args("Smith", None)).unwrap();

        let method = run_add_method(
            &db,
            MethodArgs {
                person: person.id.to_string(),
                detail: " smith@home.com ".to_string(),
                kind: "email".to_string(),
            },
        )
        .unwrap();

        assert_eq!(method.detail, "smith@home.com");
        assert_eq!(db.get_contact_methods_for_person(person.id).unwrap().len(), 1);

        let bad_person = MethodArgs {
            person: "not-a-uuid".to_string(),
            detail: "x@home.com".to_string(),
            kind: "email".to_string(),
        };
        assert!(run_add_method(&db, bad_person).is_err());
    }

    #[test]
    fn test_add_mailbox_and_ticket() {
        let db = Database::open_memory().unwrap();

        let mailbox = run_add_mailbox(
            &db,
            MailboxArgs {
                login: "helpdesk@x.com".to_string(),
                aliases: vec!["support@x.com".to_string()],
                reject_unknown: true,
            },
        )
        .unwrap();
        assert_eq!(mailbox.aliases(), vec!["support@x.com"]);
        assert_eq!(mailbox.unknown_caller, UnknownCaller::Reject);

        let caller = run_add_person(&db, person_args("Caller", Some("caller@x.com"))).unwrap();
        run_add_ticket(
            &db,
            TicketArgs {
                reference: "R-1".to_string(),
                title: "Broken".to_string(),
                caller: Some(caller.id.to_string()),
            },
        )
        .unwrap();

        let ticket = db.get_ticket_by_reference("R-1").unwrap().unwrap();
        assert_eq!(ticket.caller_email, Some("caller@x.com".to_string()));
    }

    #[test]
    fn test_add_mailbox_rejects_bad_alias() {
        let db = Database::open_memory().unwrap();
        let result = run_add_mailbox(
            &db,
            MailboxArgs {
                login: "helpdesk@x.com".to_string(),
                aliases: vec!["not an address".to_string()],
                reject_unknown: false,
            },
        );
        assert!(result.is_err());
        assert!(db.list_mailboxes().unwrap().is_empty());
    }
}
