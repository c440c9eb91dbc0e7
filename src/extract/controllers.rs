//! APIC controller reconciliation.
//!
//! Controllers are described by `ctrlrInst` in two unrelated places: the
//! controller identity policy lists their serial numbers, while per-node
//! `tagAnnotation` children carry a JSON document with name, node id, pod
//! and OOB address. A second annotation keyed `<key>.cimc` holds the CIMC
//! address. Records are joined on the serial number.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use super::inventory::{NO_ADDRESS, UNKNOWN};
use super::{attr_string, compare_node_ids};
use crate::harvest::{RawConfig, RootKey};

/// One APIC, keyed by node name in [`Controllers`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControllerRecord {
    pub id: Value,
    pub serial: Value,
    pub oob_ip: Value,
    pub cimc_ip: Value,
    pub pod: Value,
}

/// Controller records by node name, ordered by node id.
pub type Controllers = IndexMap<String, ControllerRecord>;

/// A `tagAnnotation` with its decoded value.
struct Annotation {
    key: String,
    value: Map<String, Value>,
}

impl Annotation {
    fn field(&self, name: &str) -> Value {
        self.value
            .get(name)
            .cloned()
            .unwrap_or_else(|| Value::from(UNKNOWN))
    }

    fn field_string(&self, name: &str) -> String {
        match self.value.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }
}

/// Decode an annotation value; anything that is not a JSON object counts as
/// an empty one.
fn decode_annotation(raw: &str) -> Map<String, Value> {
    match serde_json::from_str(raw) {
        Ok(Value::Object(obj)) => obj,
        _ => Map::new(),
    }
}

/// Build the APIC controller records.
pub fn reconcile_controllers(raw: &RawConfig) -> Controllers {
    let serials: Vec<String> = raw
        .first_root_children(RootKey::CtrlrInst, "fabricNodeIdentPol")
        .into_iter()
        .filter_map(|policy| policy.get("children").and_then(Value::as_array))
        .flatten()
        .filter_map(|child| child.get("fabricCtrlrIdentP"))
        .filter_map(|ident| attr_string(ident, "serial"))
        .collect();

    let annotations: Vec<Annotation> = raw
        .first_root_children(RootKey::CtrlrInst, "tagAnnotation")
        .into_iter()
        .map(|body| Annotation {
            key: attr_string(body, "key").unwrap_or_default(),
            value: attr_string(body, "value")
                .map(|v| decode_annotation(&v))
                .unwrap_or_default(),
        })
        .collect();

    let mut members: Vec<&Annotation> = annotations
        .iter()
        .filter(|a| {
            let serial = a.field_string("serialNumber");
            !serial.is_empty() && serials.contains(&serial)
        })
        .collect();
    members.sort_by(|a, b| compare_node_ids(&a.field_string("nodeId"), &b.field_string("nodeId")));

    let mut controllers = Controllers::new();
    for member in members {
        let cimc_key = format!("{}.cimc", member.key);
        let cimc_ip = annotations
            .iter()
            .find(|a| a.key == cimc_key)
            .and_then(|a| a.value.get("address4").cloned())
            .unwrap_or_else(|| Value::from(NO_ADDRESS));

        controllers.insert(
            member.field_string("nodeName"),
            ControllerRecord {
                id: member.field("nodeId"),
                serial: member.field("serialNumber"),
                oob_ip: member.field("activeNodeAddr"),
                cimc_ip,
                pod: member.field("podId"),
            },
        );
    }
    controllers
}
