//! Rendering extracted configuration as indented JSON.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Render `value` with `indent` spaces per level.
pub fn to_pretty_string<T: Serialize + ?Sized>(value: &T, indent: usize) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    write_pretty(&mut buf, value, indent)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn write_pretty<W: Write, T: Serialize + ?Sized>(
    writer: W,
    value: &T,
    indent: usize,
) -> serde_json::Result<()> {
    let spaces = vec![b' '; indent];
    let mut ser = Serializer::with_formatter(writer, PrettyFormatter::with_indent(&spaces));
    value.serialize(&mut ser)
}

/// Write `value` to `path`, replacing any existing file.
pub fn write_json_file<T: Serialize + ?Sized>(value: &T, path: &Path, indent: usize) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {:?}", path))?;
    let mut writer = BufWriter::new(file);
    write_pretty(&mut writer, value, indent)
        .with_context(|| format!("Failed to serialize output to {:?}", path))?;
    writer.write_all(b"\n")?;
    writer
        .flush()
        .with_context(|| format!("Failed to write output file: {:?}", path))?;
    Ok(())
}
