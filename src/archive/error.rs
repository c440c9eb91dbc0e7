//! Archive format errors.

use std::path::PathBuf;

/// Errors that can occur while opening a backup archive.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("Backup file not found: {path}")]
    NotFound { path: PathBuf },

    #[error(
        "Unable to locate JSON or XML files in the archive. {path} doesn't appear to be a valid ACI config backup."
    )]
    NoDataFiles { path: PathBuf },

    #[error("{path} is {format}-compressed; only tar and tar.gz backups are supported. Recompress it with gzip.")]
    UnsupportedCompression { path: PathBuf, format: &'static str },

    #[error("{path} is an XML backup; XML backup parsing is not supported. Export the configuration as JSON instead.")]
    LegacyXml { path: PathBuf },

    #[error("Archive member {member} is too large ({size_mb:.1} MB). Maximum is {max_mb} MB.")]
    MemberTooLarge {
        member: String,
        size_mb: f64,
        max_mb: u64,
    },

    #[error("Failed to parse archive member {member} as JSON: {source}")]
    InvalidJson {
        member: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read archive: {0}")]
    Io(#[from] std::io::Error),
}
