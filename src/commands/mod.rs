//! Command handlers for the aciextract CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod completions;
pub mod config;
pub mod extract;
pub mod keys;
pub mod query;
pub mod sections;

use anyhow::{anyhow, Result};

use aciextract::cli::BackupArgs;
use aciextract::{harvest, BackupArchive, Config, RawConfig};

/// Load the config file and apply per-run overrides from the command line.
pub fn effective_config(backup: &BackupArgs, indent: Option<usize>) -> Result<Config> {
    let mut config = Config::load()?;
    if backup.strict {
        config.harvest.strict = true;
    }
    if let Some(indent) = indent {
        config.output.indent = indent;
    }
    config
        .validate()
        .map_err(|e| anyhow!("Invalid option: {}", e))?;
    Ok(config)
}

/// Open a backup and harvest its root keys without running the extractors.
pub fn harvest_backup(backup: &BackupArgs, config: &Config) -> Result<RawConfig> {
    let archive = BackupArchive::open_with(&backup.backup, &config.archive.options())?;
    Ok(harvest(archive.documents(), config.harvest.mode())?)
}
