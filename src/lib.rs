//! aciextract Library
//!
//! Extracts structured configuration from Cisco ACI configuration backups:
//! a tar archive of large nested JSON documents is harvested for a fixed
//! set of root keys and reshaped into fabric details, system settings,
//! fabric policies and access policies.

pub mod aci;
pub mod archive;
pub mod cli;
pub mod config;
pub mod extract;
pub mod harvest;
pub mod output;
pub mod tree;

pub use aci::{AciConfig, AciError};
pub use archive::{ArchiveError, BackupArchive, Document};
pub use config::Config;
pub use harvest::{harvest, HarvestMode, RawConfig, RootKey};
