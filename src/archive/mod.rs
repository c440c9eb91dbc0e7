//! Controller backup archives.
//!
//! A configuration export is a tar archive (usually gzip-compressed) whose
//! members are JSON documents. Older exports use XML members instead, which
//! are detected and rejected up front.
//!
//! # Structure
//!
//! - `reader` - Opening archives and decoding their JSON members
//! - `error` - Archive format errors

mod error;
mod reader;

pub use error::ArchiveError;
pub use reader::{ArchiveOptions, BackupArchive};

use serde_json::Value;

/// File extension of JSON backup members.
pub const JSON_EXTENSION: &str = ".json";

/// File extension of legacy XML backup members.
pub const XML_EXTENSION: &str = ".xml";

/// One decoded JSON member of a backup archive.
#[derive(Debug, Clone)]
pub struct Document {
    /// Member path inside the archive
    pub name: String,
    /// Parsed content
    pub root: Value,
}
