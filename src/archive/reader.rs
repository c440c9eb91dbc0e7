//! Backup archive reader.
//!
//! Archives are read in a single streaming pass: gzip compression is
//! detected from the magic bytes, every `.json` member is decoded, and
//! `.xml` members are only counted so that XML-only backups can be rejected
//! with a clear message.
//!
//! # Example
//!
//! ```no_run
//! use aciextract::archive::BackupArchive;
//!
//! let archive = BackupArchive::open("ce2_defaultOneTime-2024-01-01.tar.gz")?;
//! for document in archive.documents() {
//!     println!("{}", document.name);
//! }
//! # Ok::<(), aciextract::archive::ArchiveError>(())
//! ```

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use humansize::{format_size, BINARY};
use tracing::{debug, info};

use super::error::ArchiveError;
use super::{Document, JSON_EXTENSION, XML_EXTENSION};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Compressions recognised by their magic bytes but not decoded.
const UNSUPPORTED_MAGIC: [(&[u8], &str); 2] = [
    (b"BZh", "bzip2"),
    (&[0xfd, b'7', b'z', b'X', b'Z', 0x00], "xz"),
];

/// Limits applied while reading an archive.
#[derive(Debug, Clone)]
pub struct ArchiveOptions {
    /// Largest member that will be decoded, in bytes
    pub max_document_bytes: u64,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            max_document_bytes: 512 * 1024 * 1024,
        }
    }
}

/// The decoded JSON documents of one backup archive.
#[derive(Debug, Clone)]
pub struct BackupArchive {
    path: PathBuf,
    size: u64,
    documents: Vec<Document>,
}

impl BackupArchive {
    /// Open and decode an archive with default limits.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ArchiveError> {
        Self::open_with(path, &ArchiveOptions::default())
    }

    /// Open and decode an archive.
    ///
    /// # Errors
    ///
    /// - [`ArchiveError::NotFound`] if the file does not exist
    /// - [`ArchiveError::UnsupportedCompression`] for bzip2 or xz archives
    /// - [`ArchiveError::LegacyXml`] if the archive only holds XML members
    /// - [`ArchiveError::NoDataFiles`] if it holds neither JSON nor XML
    /// - [`ArchiveError::MemberTooLarge`] / [`ArchiveError::InvalidJson`]
    ///   if a JSON member cannot be decoded
    pub fn open_with<P: AsRef<Path>>(
        path: P,
        options: &ArchiveOptions,
    ) -> Result<Self, ArchiveError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ArchiveError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let size = fs::metadata(path)?.len();

        let mut reader = BufReader::new(File::open(path)?);
        let head = reader.fill_buf()?;
        if let Some((_, format)) = UNSUPPORTED_MAGIC
            .iter()
            .find(|(magic, _)| head.starts_with(magic))
        {
            return Err(ArchiveError::UnsupportedCompression {
                path: path.to_path_buf(),
                format: *format,
            });
        }
        let input: Box<dyn Read> = if head.starts_with(&GZIP_MAGIC) {
            debug!(path = %path.display(), "gzip-compressed archive");
            Box::new(GzDecoder::new(reader))
        } else {
            Box::new(reader)
        };

        let (documents, xml_members) = read_members(input, options)?;

        if documents.is_empty() {
            return Err(if xml_members > 0 {
                ArchiveError::LegacyXml {
                    path: path.to_path_buf(),
                }
            } else {
                ArchiveError::NoDataFiles {
                    path: path.to_path_buf(),
                }
            });
        }

        info!(
            path = %path.display(),
            size = %format_size(size, BINARY),
            documents = documents.len(),
            "loaded backup archive"
        );

        Ok(Self {
            path: path.to_path_buf(),
            size,
            documents,
        })
    }

    /// Path of the archive on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Human-readable archive size.
    pub fn size_human(&self) -> String {
        format_size(self.size, BINARY)
    }

    /// Decoded JSON members in archive order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Consume the archive, keeping only its documents.
    pub fn into_documents(self) -> Vec<Document> {
        self.documents
    }
}

/// Decode the JSON members of a tar stream and count the XML ones.
fn read_members<R: Read>(
    input: R,
    options: &ArchiveOptions,
) -> Result<(Vec<Document>, usize), ArchiveError> {
    let mut archive = tar::Archive::new(input);
    let mut documents = Vec::new();
    let mut xml_members = 0;

    for entry in archive.entries()? {
        let mut entry = entry?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let name = entry.path()?.to_string_lossy().into_owned();

        if name.ends_with(JSON_EXTENSION) {
            let size = entry.size();
            if size > options.max_document_bytes {
                return Err(ArchiveError::MemberTooLarge {
                    member: name,
                    size_mb: size as f64 / (1024.0 * 1024.0),
                    max_mb: options.max_document_bytes / (1024 * 1024),
                });
            }

            let mut bytes = Vec::with_capacity(size as usize);
            entry.read_to_end(&mut bytes)?;
            let root = serde_json::from_slice(&bytes).map_err(|source| {
                ArchiveError::InvalidJson {
                    member: name.clone(),
                    source,
                }
            })?;
            debug!(member = %name, bytes = size, "decoded archive member");
            documents.push(Document { name, root });
        } else if name.ends_with(XML_EXTENSION) {
            xml_members += 1;
        }
    }

    Ok((documents, xml_members))
}
