use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod add;
pub mod install;
pub mod list;
pub mod process;

pub use add::{run_add_mailbox, run_add_method, run_add_person, run_add_ticket};
pub use install::run_install;
pub use list::run_list;
pub use process::run_process;

#[derive(Parser)]
#[command(name = "contactmethod")]
#[command(about = "Resolve mail-to-ticket callers and recipients through contact methods")]
#[command(version)]
pub struct Cli {
    /// Database file (overrides CONTACTMETHOD_DB_PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Enable the contact method extension
    Install,
    /// Add a person, contact method, mailbox or ticket
    #[command(subcommand)]
    Add(AddCommand),
    /// List stored records
    List(ListArgs),
    /// Run the resolution pipeline for one inbound message
    Process(ProcessArgs),
}

#[derive(Subcommand)]
pub enum AddCommand {
    Person(PersonArgs),
    Method(MethodArgs),
    Mailbox(MailboxArgs),
    Ticket(TicketArgs),
}

#[derive(Args)]
pub struct PersonArgs {
    #[arg(short, long)]
    pub first: Option<String>,
    #[arg(short, long)]
    pub name: String,
    #[arg(short, long)]
    pub email: Option<String>,
}

#[derive(Args)]
pub struct MethodArgs {
    /// Person UUID
    pub person: String,
    /// Address or number
    pub detail: String,
    #[arg(short, long, default_value = "email")]
    pub kind: String,
}

#[derive(Args)]
pub struct MailboxArgs {
    pub login: String,
    /// Alternate address of this mailbox (repeatable)
    #[arg(short, long = "alias")]
    pub aliases: Vec<String>,
    /// Stop processing mail from senders that match nobody
    #[arg(long)]
    pub reject_unknown: bool,
}

#[derive(Args)]
pub struct TicketArgs {
    pub reference: String,
    #[arg(short, long)]
    pub title: String,
    /// Caller UUID
    #[arg(short, long)]
    pub caller: Option<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// "persons", "methods" or "mailboxes"
    #[arg(default_value = "persons")]
    pub what: String,
    #[arg(short, long, default_value = "50")]
    pub limit: u32,
}

#[derive(Args)]
pub struct ProcessArgs {
    /// Login of the mailbox the message arrived in
    #[arg(short, long)]
    pub mailbox: String,
    /// Raw RFC 5322 message file
    #[arg(long, conflicts_with_all = ["from", "to", "cc"])]
    pub eml: Option<PathBuf>,
    #[arg(long, required_unless_present = "eml")]
    pub from: Option<String>,
    #[arg(long)]
    pub to: Vec<String>,
    #[arg(long)]
    pub cc: Vec<String>,
    /// Reference of the ticket this message replies to
    #[arg(short, long)]
    pub ticket: Option<String>,
    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}
