//! Switch inventory reconciliation.
//!
//! No single object in the export describes a switch completely. The
//! inventory joins three independently rooted trees:
//!
//! | Tree                 | Supplies                      | Joined on |
//! |----------------------|-------------------------------|-----------|
//! | `fabricNodeIdentPol` | hostname, node id, serial     | (primary) |
//! | `dhcpClient`         | role, model, firmware version | hostname  |
//! | `mgmtMgmtP`          | OOB management IP, pod        | node id   |
//!
//! Only the primary tree creates records. The other two enrich them when
//! present and are skipped entirely when a controller version lacks them.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use super::{attr_string, compare_node_ids};
use crate::harvest::{RawConfig, RootKey};

/// Placeholder for enrichment fields nothing reported.
pub const UNKNOWN: &str = "unknown";

/// Placeholder for a switch without an OOB management address.
pub const NO_ADDRESS: &str = "NA";

/// Roles that carry model and firmware information.
const SWITCH_ROLES: [&str; 2] = ["leaf", "spine"];

/// One switch, keyed by hostname in [`Inventory`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryRecord {
    pub id: String,
    pub serial: String,
    pub role: String,
    pub model: String,
    pub version: String,
    pub ip: String,
    pub pod: String,
}

impl InventoryRecord {
    fn new(id: String, serial: String) -> Self {
        Self {
            id,
            serial,
            role: UNKNOWN.to_string(),
            model: UNKNOWN.to_string(),
            version: UNKNOWN.to_string(),
            ip: NO_ADDRESS.to_string(),
            pod: UNKNOWN.to_string(),
        }
    }
}

/// Switch records by hostname, ordered by node id.
pub type Inventory = IndexMap<String, InventoryRecord>;

/// Pod and node parsed from a distinguished name such as
/// `topology/pod-1/node-201`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDn {
    pub pod: String,
    pub node: String,
}

impl NodeDn {
    /// Parse a node DN. The node must be the last segment; the pod is the
    /// first segment carrying a `pod-` prefix.
    pub fn parse(dn: &str) -> Option<Self> {
        let node = dn.rsplit('/').next()?.strip_prefix("node-")?;
        let pod = dn.split('/').find_map(|seg| seg.strip_prefix("pod-"))?;
        if node.is_empty() || pod.is_empty() {
            return None;
        }
        Some(Self {
            pod: pod.to_string(),
            node: node.to_string(),
        })
    }
}

/// Out-of-band address assignment for one node.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OobAddress {
    pod: String,
    addr: String,
}

/// Build the switch inventory.
pub fn reconcile_inventory(raw: &RawConfig) -> Inventory {
    let mut inventory = identity_pass(raw);
    role_pass(raw, &mut inventory);
    address_pass(raw, &mut inventory);
    inventory
}

/// Seed one record per `fabricNodeIdentP`, sorted by node id.
fn identity_pass(raw: &RawConfig) -> Inventory {
    let mut nodes: Vec<(String, String, String)> = raw
        .extract(RootKey::FabricNodeIdentPol, &["fabricNodeIdentP"])
        .iter()
        .filter_map(|node| {
            let name = attr_string(node, "name")?;
            let id = attr_string(node, "nodeId")?;
            let serial = attr_string(node, "serial").unwrap_or_else(|| UNKNOWN.to_string());
            Some((name, id, serial))
        })
        .collect();
    nodes.sort_by(|a, b| compare_node_ids(&a.1, &b.1));

    let mut inventory = Inventory::new();
    for (name, id, serial) in nodes {
        inventory.insert(name, InventoryRecord::new(id, serial));
    }
    inventory
}

/// Copy role, model and version from `dhcpClient` entries.
fn role_pass(raw: &RawConfig, inventory: &mut Inventory) {
    for client in raw.get(RootKey::DhcpClient) {
        let Some(role) = attr_string(client, "nodeRole") else {
            continue;
        };
        if !SWITCH_ROLES.contains(&role.as_str()) {
            continue;
        }
        let name = attr_string(client, "name").unwrap_or_default();
        if name.is_empty() {
            continue;
        }
        let Some(record) = inventory.get_mut(&name) else {
            debug!(name = %name, "dhcp client has no matching fabric node");
            continue;
        };
        if let Some(model) = attr_string(client, "model") {
            record.model = model;
        }
        if let Some(version) = attr_string(client, "runningVer") {
            record.version = version;
        }
        record.role = role;
    }
}

/// Copy OOB addresses and pod placement from `mgmtMgmtP`.
fn address_pass(raw: &RawConfig, inventory: &mut Inventory) {
    let index = oob_index(raw);
    for record in inventory.values_mut() {
        if let Some(oob) = index.get(&record.id) {
            record.ip = oob.addr.clone();
            record.pod = oob.pod.clone();
        }
    }
}

/// Static OOB node addresses by node id. A later entry for the same node
/// replaces an earlier one.
fn oob_index(raw: &RawConfig) -> IndexMap<String, OobAddress> {
    let mut index = IndexMap::new();
    for node in raw.extract(RootKey::MgmtMgmtP, &["mgmtOoB", "mgmtRsOoBStNode"]) {
        let (Some(dn), Some(addr)) = (attr_string(&node, "tDn"), attr_string(&node, "addr")) else {
            continue;
        };
        match NodeDn::parse(&dn) {
            Some(NodeDn { pod, node }) => {
                index.insert(node, OobAddress { pod, addr });
            }
            None => debug!(dn = %dn, "unrecognised OOB node DN"),
        }
    }
    index
}
