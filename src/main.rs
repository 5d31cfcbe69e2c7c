use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_tracker::cli::{
    handle_categories_command, handle_config_command, handle_expense_command,
    handle_import_command, handle_report_command, ExpenseCommands,
};
use expense_tracker::config::{ExpensePaths, Settings};
use expense_tracker::logging::init_tracing;
use expense_tracker::services::ExpenseStore;
use expense_tracker::storage::ExpenseRepository;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Command-line personal expense tracker",
    long_about = "Record what you spend, list it by date, import batches from \
                  JSON or CSV files and see totals per category. Expenses are \
                  kept in a single JSON file."
)]
struct Cli {
    /// Expenses file to use instead of the configured one
    #[arg(long, global = true, env = "EXPENSE_TRACKER_FILE")]
    file: Option<PathBuf>,

    /// Print debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    /// Show totals per category
    Report {
        /// Include categories without expenses
        #[arg(short, long)]
        all: bool,
    },

    /// Import expenses from a .json or .csv file
    Import {
        /// Path to the file
        file: PathBuf,
        /// Validate and preview without importing
        #[arg(long)]
        dry_run: bool,
    },

    /// List the expense categories
    Categories,

    /// Show current configuration and paths
    Config {
        /// Write a default settings file if none exists
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = ExpensePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let expenses_file = settings.resolve_expenses_file(&paths, cli.file.as_deref());

    let open_store = || ExpenseStore::open(ExpenseRepository::new(&expenses_file));

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            let mut store = open_store();
            handle_expense_command(&mut store, &settings, cmd)?;
        }
        Some(Commands::Report { all }) => {
            let store = open_store();
            handle_report_command(&store, &settings, all)?;
        }
        Some(Commands::Import { file, dry_run }) => {
            let mut store = open_store();
            handle_import_command(&mut store, &settings, &file, dry_run)?;
        }
        Some(Commands::Categories) => handle_categories_command()?,
        Some(Commands::Config { init }) => {
            handle_config_command(&paths, &settings, &expenses_file, init)?;
        }
        None => {
            println!("Expense Tracker - personal expense tracking");
            println!();
            println!("Run 'expense --help' for usage information.");
            println!("Run 'expense categories' to see the category numbers.");
        }
    }

    Ok(())
}
