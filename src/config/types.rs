//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};

use crate::archive::ArchiveOptions;
use crate::harvest::HarvestMode;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub harvest: HarvestConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
}

/// Root key harvesting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Fail when a root key is missing from every document
    #[serde(default)]
    pub strict: bool,
}

impl HarvestConfig {
    pub fn mode(&self) -> HarvestMode {
        if self.strict {
            HarvestMode::Strict
        } else {
            HarvestMode::Lenient
        }
    }
}

/// Rendering and persisting the extracted configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// File written by `extract --write`
    #[serde(default = "default_output_file")]
    pub file: String,
    /// Spaces per indentation level
    #[serde(default = "default_indent")]
    pub indent: usize,
}

pub fn default_output_file() -> String {
    "config.json".to_string()
}

pub fn default_indent() -> usize {
    4
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: default_output_file(),
            indent: default_indent(),
        }
    }
}

/// Archive decoding limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Largest single member that will be decoded, in MiB
    #[serde(default = "default_max_document_mb")]
    pub max_document_mb: u64,
}

pub fn default_max_document_mb() -> u64 {
    512
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            max_document_mb: default_max_document_mb(),
        }
    }
}

impl ArchiveConfig {
    pub fn options(&self) -> ArchiveOptions {
        ArchiveOptions {
            max_document_bytes: self.max_document_mb.saturating_mul(1024 * 1024),
        }
    }
}

/// Largest accepted `output.indent`.
pub const MAX_INDENT: usize = 16;

impl Config {
    /// Validate configuration values.
    ///
    /// Returns `Ok(())` if all values are within acceptable bounds,
    /// or an error describing the first invalid value found.
    pub fn validate(&self) -> Result<(), String> {
        if self.output.indent == 0 {
            return Err("output.indent must be > 0".to_string());
        }
        if self.output.indent > MAX_INDENT {
            return Err(format!(
                "output.indent must be <= {} (got {})",
                MAX_INDENT, self.output.indent
            ));
        }
        if self.output.file.trim().is_empty() {
            return Err("output.file must not be empty".to_string());
        }
        if self.archive.max_document_mb == 0 {
            return Err("archive.max_document_mb must be > 0".to_string());
        }
        Ok(())
    }
}
