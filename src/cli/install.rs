use anyhow::Result;

use crate::db::Database;

/// Execute the install command
pub fn run_install(db: &Database) -> Result<()> {
    if db.has_contact_methods()? {
        println!("Contact methods already installed.");
        return Ok(());
    }

    db.install_contact_methods()?;
    println!("Contact methods installed.");
    Ok(())
}
