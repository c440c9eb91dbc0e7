//! Root key harvesting.
//!
//! Every configuration domain of the backup lives under one well-known
//! object class (the "root key"). Harvesting searches the parsed documents
//! once per root key and keeps the matching subtrees, producing the
//! [`RawConfig`] mapping that all extractors read from.
//!
//! # Archive precondition
//!
//! The controller writes each root key's data into a single member of the
//! archive. The harvester therefore binds a root key to the matches of the
//! *first* document that has any and ignores later documents. If an archive
//! ever split one root key across several members, everything after the
//! first member would be silently dropped: this policy is not merge-safe.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::archive::Document;
use crate::tree::{extract_path, find_key, lookup_path, PathError};

/// The object classes harvested from a backup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RootKey {
    /// TEP pools
    FabricSetupP,
    /// Switch hostname, node id, serial number
    FabricNodeIdentPol,
    /// Switch model, firmware version, node role
    DhcpClient,
    /// Out-of-band management addresses
    MgmtMgmtP,
    /// Tenant configuration
    FvTenant,
    /// Fabric policies (BGP route reflectors, pod policies, vPC)
    FabricInst,
    /// Access policies (switch profiles, VLAN pools, interface policies)
    InfraInfra,
    /// VMM domains
    VmmProvP,
    /// Physical domains
    PhysDomP,
    /// L2 bridged domains
    L2extDomP,
    /// Fibre Channel domains
    FcDomP,
    /// L3 routed domains
    L3extDomP,
    /// Attachable access entity profiles
    InfraAttEntityP,
    /// Interface policy groups
    InfraFuncP,
    /// Fabric security (FIPS mode)
    AaaUserEp,
    /// APIC controller cluster
    CtrlrInst,
}

impl RootKey {
    /// All root keys, in harvesting order.
    pub const ALL: [RootKey; 16] = [
        RootKey::FabricSetupP,
        RootKey::FabricNodeIdentPol,
        RootKey::DhcpClient,
        RootKey::MgmtMgmtP,
        RootKey::FvTenant,
        RootKey::FabricInst,
        RootKey::InfraInfra,
        RootKey::VmmProvP,
        RootKey::PhysDomP,
        RootKey::L2extDomP,
        RootKey::FcDomP,
        RootKey::L3extDomP,
        RootKey::InfraAttEntityP,
        RootKey::InfraFuncP,
        RootKey::AaaUserEp,
        RootKey::CtrlrInst,
    ];

    /// The object class name as it appears in the export.
    pub fn as_str(&self) -> &'static str {
        match self {
            RootKey::FabricSetupP => "fabricSetupP",
            RootKey::FabricNodeIdentPol => "fabricNodeIdentPol",
            RootKey::DhcpClient => "dhcpClient",
            RootKey::MgmtMgmtP => "mgmtMgmtP",
            RootKey::FvTenant => "fvTenant",
            RootKey::FabricInst => "fabricInst",
            RootKey::InfraInfra => "infraInfra",
            RootKey::VmmProvP => "vmmProvP",
            RootKey::PhysDomP => "physDomP",
            RootKey::L2extDomP => "l2extDomP",
            RootKey::FcDomP => "fcDomP",
            RootKey::L3extDomP => "l3extDomP",
            RootKey::InfraAttEntityP => "infraAttEntityP",
            RootKey::InfraFuncP => "infraFuncP",
            RootKey::AaaUserEp => "aaaUserEp",
            RootKey::CtrlrInst => "ctrlrInst",
        }
    }
}

impl fmt::Display for RootKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RootKey {
    type Err = HarvestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RootKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| HarvestError::UnknownRootKey(s.to_string()))
    }
}

/// What to do when a root key is not found in any document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HarvestMode {
    /// Keep the empty list; older controller versions simply lack some keys.
    #[default]
    Lenient,
    /// Fail the harvest.
    Strict,
}

/// Harvesting errors.
#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    #[error(
        "Could not locate key '{0}' in any of the configuration files. \
         Either the archive was unpacked incorrectly or this controller version \
         changed the expected structure."
    )]
    KeyNotFound(RootKey),

    #[error("Unknown root key: '{0}'")]
    UnknownRootKey(String),
}

/// Harvested subtrees for every [`RootKey`].
///
/// Every root key is always present; an empty list means no document
/// contained it.
#[derive(Debug, Clone)]
pub struct RawConfig {
    values: IndexMap<RootKey, Vec<Value>>,
    sources: IndexMap<RootKey, String>,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RawConfig {
    /// Create a mapping with every root key bound to an empty list.
    pub fn new() -> Self {
        Self {
            values: RootKey::ALL.iter().map(|key| (*key, Vec::new())).collect(),
            sources: IndexMap::new(),
        }
    }

    /// Bind a root key to its subtrees, replacing any previous binding.
    pub fn insert(&mut self, key: RootKey, values: Vec<Value>) {
        self.values.insert(key, values);
    }

    /// Subtrees harvested for `key` (empty if none were found).
    pub fn get(&self, key: RootKey) -> &[Value] {
        self.values.get(&key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Name of the document that supplied `key`, if any did.
    pub fn source(&self, key: RootKey) -> Option<&str> {
        self.sources.get(&key).map(String::as_str)
    }

    /// Iterate `(root key, subtrees)` in harvesting order.
    pub fn iter(&self) -> impl Iterator<Item = (RootKey, &[Value])> {
        self.values.iter().map(|(key, values)| (*key, values.as_slice()))
    }

    /// Walk a key path below `root`; see [`lookup_path`].
    pub fn lookup(&self, root: RootKey, path: &[&str]) -> Result<Vec<&Value>, PathError> {
        lookup_path(self.get(root), path)
    }

    /// Walk a key path below `root`, treating structural absence as no
    /// matches; see [`extract_path`].
    pub fn extract(&self, root: RootKey, path: &[&str]) -> Vec<Value> {
        extract_path(self.get(root), path)
    }

    /// Bodies of the direct children of the first `root` subtree that are
    /// tagged `tag`.
    ///
    /// Singleton policies (`infraSetPol`, `coopPol`, ...) live directly
    /// below the first root node; this is the lookup they all share.
    pub fn first_root_children(&self, root: RootKey, tag: &str) -> Vec<&Value> {
        self.get(root)
            .first()
            .and_then(|node| node.get("children"))
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|child| child.get(tag))
            .collect()
    }
}

/// Build the [`RawConfig`] for a set of parsed documents.
///
/// For each root key the documents are searched in order, and the first
/// document with at least one match supplies all of that key's subtrees.
pub fn harvest(documents: &[Document], mode: HarvestMode) -> Result<RawConfig, HarvestError> {
    let mut raw = RawConfig::new();

    for key in RootKey::ALL {
        let found = documents.iter().find_map(|doc| {
            let matches: Vec<Value> = find_key(key.as_str(), &doc.root).cloned().collect();
            (!matches.is_empty()).then_some((doc, matches))
        });

        match found {
            Some((doc, matches)) => {
                debug!(key = %key, document = %doc.name, count = matches.len(), "harvested root key");
                raw.sources.insert(key, doc.name.clone());
                raw.insert(key, matches);
            }
            None if mode == HarvestMode::Strict => return Err(HarvestError::KeyNotFound(key)),
            None => debug!(key = %key, "root key not found in any document"),
        }
    }

    Ok(raw)
}
