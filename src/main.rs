//! aciextract CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use aciextract::cli::{Cli, Commands, ConfigCommands};

/// Environment variable overriding the log filter.
const LOG_ENV: &str = "ACIEXTRACT_LOG";

/// Default filter for a `-v` count.
fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the stderr log subscriber. `ACIEXTRACT_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Extract {
            backup,
            section,
            write,
            output,
            indent,
        } => commands::extract::handle(&backup, section.as_deref(), write, output, indent),
        Commands::Sections { backup } => commands::sections::handle(&backup),
        Commands::Keys { backup } => commands::keys::handle(&backup),
        Commands::Query {
            backup,
            root,
            path,
            indent,
        } => commands::query::handle(&backup, &root, &path, indent),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Path => commands::config::handle_path(),
        },
        Commands::Completions { shell } => commands::completions::handle::<Cli>(shell),
    }
}
