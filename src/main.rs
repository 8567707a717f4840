use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use expense_tracker::cli::{
    handle_add_command, handle_categories_command, handle_delete_command, handle_list_command,
    handle_show_command, handle_summary_command, AddArgs, CategoriesArgs, DeleteArgs, ListArgs,
    ShowArgs, SummaryArgs,
};
use expense_tracker::config::{resolve_database_config, HttpSecretStore, Settings};
use expense_tracker::error::{ExpenseError, ExpenseResult};

#[derive(Parser)]
#[command(
    name = "expense-tracker",
    version,
    about = "Track expenses from the command line",
    long_about = "A command line expense tracker. Database configuration is read \
                  from local settings, falling back to a remote secret store when \
                  the local values are incomplete."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new expense
    Add(AddArgs),

    /// List expenses with optional filters
    List(ListArgs),

    /// Show a single expense with its category
    Show(ShowArgs),

    /// Delete an expense by id
    Delete(DeleteArgs),

    /// Show expense totals with optional filters
    Summary(SummaryArgs),

    /// Manage expense categories
    Categories(CategoriesArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    if let Err(e) = run().await {
        // Aborted means the user declined a confirmation; already reported
        if !matches!(e, ExpenseError::Aborted) {
            error!("{e}");
        }
        std::process::exit(1);
    }
}

async fn run() -> ExpenseResult<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load_or_default(&Settings::default_path()?)?;
    settings.apply_env_overrides();

    let secret_store = HttpSecretStore::from_settings(&settings.secret_store);
    let database = resolve_database_config(&settings, &secret_store).await?;
    debug!(provider = %database.provider, "database configuration resolved");

    match cli.command {
        Commands::Add(args) => handle_add_command(args),
        Commands::List(args) => handle_list_command(args),
        Commands::Show(args) => handle_show_command(args),
        Commands::Delete(args) => {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            handle_delete_command(args, &mut input)
        }
        Commands::Summary(args) => handle_summary_command(args),
        Commands::Categories(args) => handle_categories_command(args),
    }
}
