//! CLI smoke entry point.
//!
//! # Responsibility
//! - Open an item store and print the items matching optional filters.
//! - Keep output line-oriented for quick local checks.

use clap::Parser;
use itemstore_core::db::{open_db, open_db_in_memory};
use itemstore_core::{
    core_version, default_log_level, init_logging, ItemRepository, ItemSearchCond,
    SqliteItemRepository,
};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "itemstore", version, about = "List items stored in an item database")]
struct Cli {
    /// Database file; an empty in-memory store is used when omitted.
    db_path: Option<PathBuf>,

    /// Substring the item name must contain.
    #[arg(long)]
    name: Option<String>,

    /// Inclusive upper bound on price.
    #[arg(long)]
    max_price: Option<i64>,

    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, env = "ITEMSTORE_LOG_DIR")]
    log_dir: Option<String>,

    /// Log level (trace|debug|info|warn|error); defaults by build mode.
    #[arg(long, env = "ITEMSTORE_LOG_LEVEL")]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("itemstore: {err}");
            return ExitCode::FAILURE;
        }
    }

    println!("itemstore_core version={}", core_version());
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("itemstore: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let conn = match &cli.db_path {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let repo = SqliteItemRepository::try_new(&conn)?;

    let cond = ItemSearchCond::new(cli.name.clone(), cli.max_price);
    for item in repo.find_all(&cond)? {
        println!(
            "id={} name={} price={} quantity={}",
            item.id.unwrap_or_default(),
            item.item_name,
            item.price,
            item.quantity
        );
    }
    Ok(())
}
