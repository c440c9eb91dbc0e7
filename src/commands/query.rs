//! Query command handler

use anyhow::{Context, Result};
use serde_json::Value;

use aciextract::cli::BackupArgs;
use aciextract::{output, RootKey};

use super::{effective_config, harvest_backup};

/// Walk a key path below one root key, failing when it cannot be walked.
#[cfg(not(tarpaulin_include))]
pub fn handle(backup: &BackupArgs, root: &str, path: &[String], indent: Option<usize>) -> Result<()> {
    let root: RootKey = root.parse()?;
    let config = effective_config(backup, indent)?;
    let raw = harvest_backup(backup, &config)?;

    let keys: Vec<&str> = path.iter().map(String::as_str).collect();
    let found = raw
        .lookup(root, &keys)
        .with_context(|| format!("Cannot walk {}/{}", root, keys.join("/")))?;

    let list = Value::Array(found.into_iter().cloned().collect());
    println!("{}", output::to_pretty_string(&list, config.output.indent)?);
    Ok(())
}
