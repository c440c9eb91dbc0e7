//! Sections command handler

use anyhow::Result;
use serde_json::Value;

use aciextract::cli::BackupArgs;
use aciextract::AciConfig;

use super::effective_config;

/// List the top-level sections with entry counts per sub-section.
#[cfg(not(tarpaulin_include))]
pub fn handle(backup: &BackupArgs) -> Result<()> {
    let config = effective_config(backup, None)?;
    let aci = AciConfig::load(&backup.backup, &config)?;
    print!("{}", render_sections(&aci.sections()?));
    Ok(())
}

fn entry_count(value: &Value) -> String {
    match value {
        Value::Array(items) => items.len().to_string(),
        Value::Object(map) => map.len().to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render sections as an indented listing.
pub fn render_sections(sections: &[(&str, Value)]) -> String {
    let mut out = String::new();
    for (name, value) in sections {
        match value {
            Value::Object(children) => {
                out.push_str(&format!("{}\n", name));
                for (child, child_value) in children {
                    out.push_str(&format!("  {:<28} {}\n", child, entry_count(child_value)));
                }
            }
            other => out.push_str(&format!("{:<30} {}\n", name, entry_count(other))),
        }
    }
    out
}
