//! Extract command handler

use anyhow::Result;
use std::path::PathBuf;

use aciextract::cli::BackupArgs;
use aciextract::{output, AciConfig};

use super::effective_config;

/// Print or write the extracted configuration (or one section of it).
#[cfg(not(tarpaulin_include))]
pub fn handle(
    backup: &BackupArgs,
    section: Option<&str>,
    write: bool,
    output_path: Option<PathBuf>,
    indent: Option<usize>,
) -> Result<()> {
    let config = effective_config(backup, indent)?;
    let aci = AciConfig::load(&backup.backup, &config)?;

    let value = match section {
        Some(path) => aci.section(path)?,
        None => aci.to_value()?,
    };

    let target = if write {
        Some(PathBuf::from(&config.output.file))
    } else {
        output_path
    };

    match target {
        Some(path) => {
            output::write_json_file(&value, &path, config.output.indent)?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", output::to_pretty_string(&value, config.output.indent)?),
    }
    Ok(())
}
