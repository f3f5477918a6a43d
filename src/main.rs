use clap::Parser;
use contactmethod::cli::{
    run_add_mailbox, run_add_method, run_add_person, run_add_ticket, run_install, run_list,
    run_process, AddCommand, Cli, Commands,
};
use contactmethod::config::Config;
use contactmethod::db::Database;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.db)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_filter)?)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let db = Database::open_at(&config.db_path)?;

    match cli.command {
        Commands::Install => run_install(&db)?,
        Commands::Add(AddCommand::Person(args)) => {
            run_add_person(&db, args)?;
        }
        Commands::Add(AddCommand::Method(args)) => {
            run_add_method(&db, args)?;
        }
        Commands::Add(AddCommand::Mailbox(args)) => {
            run_add_mailbox(&db, args)?;
        }
        Commands::Add(AddCommand::Ticket(args)) => {
            run_add_ticket(&db, args)?;
        }
        Commands::List(args) => run_list(&db, &args.what, args.limit)?,
        Commands::Process(args) => run_process(&db, args)?,
    }

    Ok(())
}
