//! CLI entry point for the nanofolio rebalancer.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use nanofolio::Category;

use nanofolio_rebalancer::commands::{self, RecordFields};
use nanofolio_rebalancer::config::Config;
use nanofolio_rebalancer::error::Error;

#[derive(Parser)]
#[command(name = "rebalancer")]
#[command(about = "Three-bucket portfolio rebalancer: holdings → target allocation → trades")]
#[command(version)]
struct Cli {
    /// Path to config file (defaults apply if it does not exist)
    #[arg(long, default_value = "nanofolio.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// Holding fields; omitted flags keep the current value.
#[derive(Args)]
struct FieldArgs {
    /// stock | commodity | bond (or a | b | c)
    #[arg(long)]
    category: Option<Category>,

    /// Ticker or free-text label
    #[arg(long)]
    label: Option<String>,

    /// Amount (negative for liabilities)
    #[arg(long, allow_hyphen_values = true)]
    amount: Option<String>,
}

impl From<FieldArgs> for RecordFields {
    fn from(args: FieldArgs) -> Self {
        RecordFields {
            category: args.category,
            label: args.label,
            amount: args.amount,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Show ideal allocation, operations, and breakdown
    Show {
        /// Print a JSON report instead of the table
        #[arg(long)]
        json: bool,
    },

    /// List holdings with their index
    List,

    /// Append a holding (stock, empty label, 0 unless given)
    Add {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Change fields of the holding at INDEX
    Edit {
        index: usize,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete the holding at INDEX
    Remove {
        index: usize,

        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    let config = match Config::load_or_default(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Show { json } => commands::show(&config, json),
        Command::List => commands::list(&config),
        Command::Add { fields } => commands::add(&config, &fields.into()),
        Command::Edit { index, fields } => commands::edit(&config, index, &fields.into()),
        Command::Remove { index, force } => commands::remove(&config, index, force),
    };

    if let Err(e) = result {
        match &e {
            Error::Aborted(msg) => {
                eprintln!("Aborted: {msg}");
                process::exit(0);
            }
            e if e.is_rejected_input() => {
                eprintln!("Rejected: {e}");
                process::exit(2);
            }
            _ => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
    }
}
