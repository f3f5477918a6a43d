use anyhow::{bail, Result};

use crate::db::Database;

/// Execute the list command
pub fn run_list(db: &Database, what: &str, limit: u32) -> Result<()> {
    for line in list_lines(db, what, limit)? {
        println!("{}", line);
    }
    Ok(())
}

fn list_lines(db: &Database, what: &str, limit: u32) -> Result<Vec<String>> {
    let lines = match what {
        "persons" | "people" => db
            .list_persons(limit, 0)?
            .into_iter()
            .map(|p| {
                format!(
                    "{}  {:<30} {}",
                    p.id,
                    p.friendly_name(),
                    p.email.as_deref().unwrap_or("-")
                )
            })
            .collect(),
        "methods" => {
            if !db.has_contact_methods()? {
                bail!("Contact methods are not installed.");
            }
            db.list_contact_methods()?
                .into_iter()
                .take(limit as usize)
                .map(|m| format!("{}  {:<7} {}", m.person_id, m.method.as_str(), m.detail))
                .collect()
        }
        "mailboxes" => db
            .list_mailboxes()?
            .into_iter()
            .take(limit as usize)
            .map(|m| {
                let aliases = m.aliases().join(", ");
                format!(
                    "{:<30} unknown caller: {:<6} aliases: {}",
                    m.login,
                    m.unknown_caller.as_str(),
                    if aliases.is_empty() { "-" } else { aliases.as_str() }
                )
            })
            .collect(),
        other => bail!("Unknown list target: {} (use persons, methods or mailboxes)", other),
    };
    Ok(lines)
}
