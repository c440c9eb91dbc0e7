//! The assembled configuration of one backup.
//!
//! [`AciConfig`] runs the whole pipeline (archive, harvest, extractors) and
//! exposes the result as named top-level sections:
//!
//! | Section              | Content                                     |
//! |----------------------|---------------------------------------------|
//! | `backup_file`        | path of the archive                         |
//! | `fabric_details`     | cluster identity, inventories, TEP pools    |
//! | `system_settings`    | fabric-wide singleton policies              |
//! | `fabric_policies`    | Fabric > Fabric Policies catalog            |
//! | `access_policies`    | Fabric > Access Policies catalog            |
//! | `tenants`            | raw `fvTenant` subtrees                     |
//! | `virtual_networking` | raw `vmmProvP` subtrees                     |
//!
//! The parsed documents and the harvested root keys are kept for
//! inspection but are never part of the sections.
//!
//! # Example
//!
//! ```no_run
//! use aciextract::{AciConfig, Config};
//!
//! let aci = AciConfig::load("backup.tar.gz", &Config::default())?;
//! let inventory = aci.section("fabric_details.fabric_inventory")?;
//! println!("{}", inventory);
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::archive::{ArchiveError, BackupArchive, Document};
use crate::config::Config;
use crate::extract::{AccessPolicies, FabricDetails, FabricPolicies, ShapeError, SystemSettings};
use crate::harvest::{harvest, HarvestError, HarvestMode, RawConfig, RootKey};
use crate::output;

/// Top-level section names in output order.
pub const SECTION_NAMES: [&str; 7] = [
    "backup_file",
    "fabric_details",
    "system_settings",
    "fabric_policies",
    "access_policies",
    "tenants",
    "virtual_networking",
];

/// Errors from assembling or querying an [`AciConfig`].
#[derive(Debug, thiserror::Error)]
pub enum AciError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Harvest(#[from] HarvestError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("No section '{path}' (stopped at '{segment}')")]
    UnknownSection { path: String, segment: String },

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Extracted configuration of one backup archive.
#[derive(Debug, Clone, Serialize)]
pub struct AciConfig {
    backup_file: String,
    #[serde(skip)]
    documents: Vec<Document>,
    #[serde(skip)]
    raw_configs: RawConfig,
    fabric_details: FabricDetails,
    system_settings: SystemSettings,
    fabric_policies: FabricPolicies,
    access_policies: AccessPolicies,
    tenants: Vec<Value>,
    virtual_networking: Vec<Value>,
}

impl AciConfig {
    /// Open `path` and extract its configuration using the archive and
    /// harvest settings of `config`.
    pub fn load<P: AsRef<Path>>(path: P, config: &Config) -> Result<Self> {
        let path = path.as_ref();
        let archive = BackupArchive::open_with(path, &config.archive.options())?;
        tracing::debug!(size = %archive.size_human(), "archive decoded");
        Self::from_documents(
            path.display().to_string(),
            archive.into_documents(),
            config.harvest.mode(),
        )
        .with_context(|| format!("Failed to extract configuration from {}", path.display()))
    }

    /// Extract the configuration of already decoded documents.
    pub fn from_documents(
        backup_file: String,
        documents: Vec<Document>,
        mode: HarvestMode,
    ) -> Result<Self, AciError> {
        let raw_configs = harvest(&documents, mode)?;

        Ok(Self {
            backup_file,
            fabric_details: FabricDetails::extract(&raw_configs)?,
            system_settings: SystemSettings::extract(&raw_configs),
            fabric_policies: FabricPolicies::extract(&raw_configs),
            access_policies: AccessPolicies::extract(&raw_configs),
            tenants: raw_configs.get(RootKey::FvTenant).to_vec(),
            virtual_networking: raw_configs.get(RootKey::VmmProvP).to_vec(),
            documents,
            raw_configs,
        })
    }

    pub fn backup_file(&self) -> &str {
        &self.backup_file
    }

    /// The parsed archive members.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// The harvested root keys.
    pub fn raw_configs(&self) -> &RawConfig {
        &self.raw_configs
    }

    pub fn fabric_details(&self) -> &FabricDetails {
        &self.fabric_details
    }

    pub fn system_settings(&self) -> &SystemSettings {
        &self.system_settings
    }

    pub fn fabric_policies(&self) -> &FabricPolicies {
        &self.fabric_policies
    }

    pub fn access_policies(&self) -> &AccessPolicies {
        &self.access_policies
    }

    /// `(name, value)` for every top-level section, in output order.
    pub fn sections(&self) -> Result<Vec<(&'static str, Value)>, AciError> {
        let Value::Object(mut map) = self.to_value()? else {
            return Ok(Vec::new());
        };
        Ok(SECTION_NAMES
            .iter()
            .filter_map(|name| map.remove(*name).map(|value| (*name, value)))
            .collect())
    }

    /// All sections collapsed into one mapping.
    pub fn to_value(&self) -> Result<Value, AciError> {
        Ok(serde_json::to_value(self)?)
    }

    /// One section selected by a dotted path such as
    /// `fabric_details.fabric_inventory`. Array elements are selected by
    /// index.
    ///
    /// A path starting with `/` is a JSON Pointer instead
    /// (`/fabric_details/fabric_inventory/leaf.101`), which reaches keys
    /// that contain dots.
    pub fn section(&self, path: &str) -> Result<Value, AciError> {
        let mut current = self.to_value()?;
        if path.starts_with('/') {
            if let Some(found) = current.pointer_mut(path) {
                return Ok(found.take());
            }
            return Err(AciError::UnknownSection {
                path: path.to_string(),
                segment: first_missing_token(&current, path),
            });
        }
        for segment in path.split('.').filter(|s| !s.is_empty()) {
            let next = match &mut current {
                Value::Object(map) => map.remove(segment),
                Value::Array(items) => match segment.parse::<usize>() {
                    Ok(i) if i < items.len() => Some(items.swap_remove(i)),
                    _ => None,
                },
                _ => None,
            };
            current = next.ok_or_else(|| AciError::UnknownSection {
                path: path.to_string(),
                segment: segment.to_string(),
            })?;
        }
        Ok(current)
    }

    /// The whole configuration as indented JSON.
    pub fn to_pretty_string(&self, indent: usize) -> Result<String, AciError> {
        Ok(output::to_pretty_string(self, indent)?)
    }

    /// Write the whole configuration to `path`, replacing the file.
    pub fn write(&self, path: &Path, indent: usize) -> Result<()> {
        output::write_json_file(self, path, indent)
    }
}

/// The first token of a JSON Pointer that does not resolve in `root`.
fn first_missing_token(root: &Value, pointer: &str) -> String {
    let mut prefix = String::new();
    for token in pointer.split('/').skip(1) {
        prefix.push('/');
        prefix.push_str(token);
        if root.pointer(&prefix).is_none() {
            return token.replace("~1", "/").replace("~0", "~");
        }
    }
    String::new()
}
