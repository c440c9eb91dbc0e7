//! CLI definitions for aciextract
//!
//! This module contains the clap CLI structure definitions, separated from main.rs
//! so they can be accessed by xtask for documentation generation (man pages).

use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

/// Version shown by `--version`; dev builds carry the git commit.
#[cfg(not(feature = "release"))]
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ")"
);

/// Version shown by `--version`.
#[cfg(feature = "release")]
pub const LONG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build clap styles.
///
/// - Green: headers, usage, command names (accent color)
/// - White: descriptions, placeholders (renders as light gray on dark terminals)
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "aciextract")]
#[command(about = "[ ACI Extract ] - reshape ACI configuration backups into readable JSON")]
#[command(
    long_about = "aciextract - Extract structured configuration from Cisco ACI backups.

Reads a configuration export (tar or tar.gz of JSON documents) taken on an
APIC and reshapes it into fabric details, system settings, fabric policies,
access policies, tenants and virtual networking.

QUICK START:
    aciextract extract backup.tar.gz                 Print the whole configuration
    aciextract extract backup.tar.gz --write         Write it to config.json
    aciextract sections backup.tar.gz                List the extracted sections
    aciextract keys backup.tar.gz                    Show which root keys were found

Logging goes to stderr. Use -v / -vv or set ACIEXTRACT_LOG (e.g. ACIEXTRACT_LOG=debug)."
)]
#[command(version, long_version = LONG_VERSION)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by commands that open a backup.
#[derive(Args, Debug, Clone)]
pub struct BackupArgs {
    /// Path to the backup archive (.tar or .tar.gz)
    #[arg(help = "Path to the backup archive (.tar or .tar.gz)")]
    pub backup: PathBuf,

    /// Fail if a root key is missing from every document
    #[arg(long, help = "Fail if any root key is missing from every document")]
    pub strict: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract the configuration of a backup
    #[command(long_about = "Extract the configuration of a backup as indented JSON.

Prints the assembled configuration to stdout, or writes it to a file with
--write. A single section can be selected with a dotted path; array
elements are selected by index. A path starting with '/' is read as a
JSON Pointer, for keys that contain dots.

EXAMPLES:
    aciextract extract backup.tar.gz
    aciextract extract backup.tar.gz --section fabric_details.fabric_inventory
    aciextract extract backup.tar.gz --section tenants.0
    aciextract extract backup.tar.gz --section /fabric_details/fabric_inventory/leaf.101
    aciextract extract backup.tar.gz --write                 Write config.json
    aciextract extract backup.tar.gz --output fabric.json    Write fabric.json
    aciextract extract backup.tar.gz --indent 2")]
    Extract {
        #[command(flatten)]
        backup: BackupArgs,
        /// Dotted path of the section to print
        #[arg(long, short, help = "Dotted section path or JSON Pointer (e.g. system_settings.bgp)")]
        section: Option<String>,
        /// Write to the configured output file instead of stdout
        #[arg(long, short, help = "Write to the configured output file (default: config.json)")]
        write: bool,
        /// Write to this file instead of stdout
        #[arg(long, short, help = "Write to this file", conflicts_with = "write")]
        output: Option<PathBuf>,
        /// Spaces per indentation level
        #[arg(long, help = "Spaces per indentation level (default: 4)")]
        indent: Option<usize>,
    },

    /// List the extracted sections
    #[command(long_about = "List the top-level sections and their sub-sections.

Each sub-section is shown with its number of entries, which makes it easy
to see which policies a backup contains before extracting them.

EXAMPLE:
    aciextract sections backup.tar.gz")]
    Sections {
        #[command(flatten)]
        backup: BackupArgs,
    },

    /// Show which root keys were found in the backup
    #[command(long_about = "Show the harvest summary of a backup.

Lists every root key with the number of subtrees found and the archive
member that supplied them. Keys that are missing are marked with '-'.

EXAMPLES:
    aciextract keys backup.tar.gz
    aciextract keys backup.tar.gz --strict      Fail on the first missing key")]
    Keys {
        #[command(flatten)]
        backup: BackupArgs,
    },

    /// Walk a key path below one root key
    #[command(long_about = "Walk a key path below one harvested root key.

Each KEY descends one level of 'children' lists. Unlike the extractors,
a path that cannot be walked is reported as an error instead of an empty
list.

EXAMPLES:
    aciextract query backup.tar.gz fabricInst datetimePol
    aciextract query backup.tar.gz infraInfra infraFuncP infraAccBndlGrp")]
    Query {
        #[command(flatten)]
        backup: BackupArgs,
        /// Root key to start from (e.g. fabricInst)
        #[arg(help = "Root key to start from (e.g. fabricInst, infraInfra)")]
        root: String,
        /// Keys to descend through
        #[arg(required = true, help = "Keys to descend through, one per level")]
        path: Vec<String>,
        /// Spaces per indentation level
        #[arg(long, help = "Spaces per indentation level (default: 4)")]
        indent: Option<usize>,
    },

    /// Configuration management
    #[command(subcommand)]
    #[command(long_about = "Manage aciextract configuration.

Configuration is stored in ~/.config/aciextract/config.toml

EXAMPLES:
    aciextract config show      Show the effective configuration
    aciextract config path      Print the config file location")]
    Config(ConfigCommands),

    /// Generate shell completions (internal use)
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration as TOML
    #[command(long_about = "Display the effective configuration in TOML format.

Values not set in the config file are shown with their defaults.

EXAMPLE:
    aciextract config show")]
    Show,
    /// Print the configuration file location
    #[command(long_about = "Print the location of the configuration file.

EXAMPLE:
    aciextract config path")]
    Path,
}
