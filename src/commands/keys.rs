//! Keys command handler

use anyhow::Result;

use aciextract::cli::BackupArgs;
use aciextract::RawConfig;

use super::{effective_config, harvest_backup};

/// Show each root key with its match count and source document.
#[cfg(not(tarpaulin_include))]
pub fn handle(backup: &BackupArgs) -> Result<()> {
    let config = effective_config(backup, None)?;
    let raw = harvest_backup(backup, &config)?;
    print!("{}", render_keys(&raw));
    Ok(())
}

/// One line per root key: name, number of subtrees, supplying document.
pub fn render_keys(raw: &RawConfig) -> String {
    let mut out = String::new();
    for (key, values) in raw.iter() {
        out.push_str(&format!(
            "{:<20} {:>5}  {}\n",
            key.as_str(),
            values.len(),
            raw.source(key).unwrap_or("-")
        ));
    }
    out
}
