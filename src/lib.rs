//! rInvoicer library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod errors;
pub mod invoice;
pub mod models;
pub mod notify;
pub mod timesheet;
pub mod tools;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use tracing_subscriber::{EnvFilter, fmt};

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Profile { .. } => cli::commands::profile::handle(&cli.command),
        Commands::Show { .. } => cli::commands::show::handle(&cli.command, cfg),
        Commands::Mark { .. } => cli::commands::mark::handle(&cli.command, cfg),
        Commands::Invoice { .. } => cli::commands::invoice::handle(&cli.command, cfg),
        Commands::Send { .. } => cli::commands::send::handle(&cli.command, cfg),
        Commands::Tool { .. } => cli::commands::tool::handle(&cli.command, cfg),
        Commands::Tools => cli::commands::tool::list(),
    }
}

/// `RUST_LOG` wins; otherwise warnings only, raised by each `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rinvoicer={level}")));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // .env is optional (TELEGRAM_BOT_TOKEN, TELEGRAM_CHAT_ID)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut cfg = Config::load()?;

    if let Some(dir) = &cli.dir {
        cfg.work_dir = dir.clone();
    }

    dispatch(&cli, &cfg)
}
