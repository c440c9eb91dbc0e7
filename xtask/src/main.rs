//! xtask - Build tasks for aciextract
//!
//! Run with: cargo xtask <command>
//!
//! Commands:
//! - gen-docs: Generate man pages from the CLI definitions

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Command, CommandFactory, Parser, Subcommand};

use aciextract::cli::Cli;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build tasks for aciextract")]
struct Xtask {
    #[command(subcommand)]
    command: XtaskCommand,
}

#[derive(Subcommand)]
enum XtaskCommand {
    /// Generate man pages from CLI definitions
    #[command(name = "gen-docs")]
    GenDocs {
        /// Output directory (default: docs/)
        #[arg(long, short, default_value = "docs")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Xtask::parse();

    match args.command {
        XtaskCommand::GenDocs { output } => generate_man_pages(&output)?,
    }

    Ok(())
}

fn render_man(cmd: &Command, path: &Path) -> Result<()> {
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut buffer)?;
    fs::write(path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Generated: {}", path.display());
    Ok(())
}

/// Generate man pages using clap_mangen
fn generate_man_pages(output: &Path) -> Result<()> {
    let man_dir = output.join("man");
    fs::create_dir_all(&man_dir).context("Failed to create man directory")?;

    let cmd = Cli::command();
    render_man(&cmd, &man_dir.join("aciextract.1"))?;

    for subcommand in cmd.get_subcommands() {
        if subcommand.is_hide_set() {
            continue;
        }
        let name = subcommand.get_name();
        render_man(subcommand, &man_dir.join(format!("aciextract-{}.1", name)))?;

        for nested in subcommand.get_subcommands() {
            if nested.is_hide_set() {
                continue;
            }
            render_man(
                nested,
                &man_dir.join(format!("aciextract-{}-{}.1", name, nested.get_name())),
            )?;
        }
    }

    println!("Man pages generated in {}", man_dir.display());
    Ok(())
}
