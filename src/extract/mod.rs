//! Domain extractors.
//!
//! Each extractor reshapes the harvested [`RawConfig`] into one area of the
//! controller's configuration, mirroring the sections of the APIC GUI:
//!
//! - `fabric_details` - cluster identity, switch and APIC inventory, TEP pools
//! - `system_settings` - BGP, endpoint controls, fabric-wide settings, ...
//! - `fabric_policies` - pod, interface and global fabric policies
//! - `access_policies` - interface, switch and global access policies
//!
//! Most sections are a single key-path lookup. They are declared as
//! [`PathSpec`] tables and evaluated with [`collect_sections`]; a path
//! that does not exist in this controller version yields an empty list.

pub mod access_policies;
pub mod controllers;
pub mod fabric_details;
pub mod fabric_policies;
pub mod inventory;
pub mod system_settings;

pub use access_policies::AccessPolicies;
pub use fabric_details::FabricDetails;
pub use fabric_policies::FabricPolicies;
pub use system_settings::SystemSettings;

use serde_json::{Map, Value};

use crate::harvest::{RawConfig, RootKey};

/// Ordered mapping of section name to extracted value.
pub type Sections = Map<String, Value>;

/// Reported for attributes that this controller version does not have.
pub const UNSUPPORTED_ATTRIBUTE: &str = "unsupported attribute";

/// Errors for configuration that does not have the shape every backup is
/// expected to have. These abort the extraction.
#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    #[error("No APIC controller cluster (ctrlrInst) found in the backup")]
    MissingControllerCluster,

    #[error("The controller cluster has no 'bootx.cluster' annotation")]
    MissingClusterAnnotation,

    #[error("The 'bootx.cluster' annotation could not be decoded: {0}")]
    InvalidClusterAnnotation(#[from] serde_json::Error),

    #[error("The 'bootx.cluster' annotation lists no pods")]
    NoPods,
}

/// One named section: a key path below a root key.
#[derive(Debug, Clone, Copy)]
pub struct PathSpec {
    pub name: &'static str,
    pub root: RootKey,
    pub path: &'static [&'static str],
}

impl PathSpec {
    pub const fn new(name: &'static str, root: RootKey, path: &'static [&'static str]) -> Self {
        Self { name, root, path }
    }
}

/// Evaluate a table of sections. Every section is present in the result,
/// with an empty list when nothing matched.
pub fn collect_sections(raw: &RawConfig, specs: &[PathSpec]) -> Sections {
    specs
        .iter()
        .map(|spec| {
            (
                spec.name.to_string(),
                Value::Array(raw.extract(spec.root, spec.path)),
            )
        })
        .collect()
}

/// The `attributes` object of a node body.
pub fn attributes(body: &Value) -> Option<&Map<String, Value>> {
    body.get("attributes").and_then(Value::as_object)
}

/// A scalar attribute of a node body, rendered as a string.
pub fn attr_string(body: &Value, name: &str) -> Option<String> {
    match attributes(body)?.get(name)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Copy selected attributes under new names.
///
/// `fields` pairs an output name with the source attribute. Attributes the
/// object lacks are reported as [`UNSUPPORTED_ATTRIBUTE`]; a missing object
/// yields an empty mapping.
pub fn pick_attributes(body: Option<&Value>, fields: &[(&str, &str)]) -> Sections {
    let Some(attrs) = body.and_then(attributes) else {
        return Sections::new();
    };
    fields
        .iter()
        .map(|(output, source)| {
            let value = attrs
                .get(*source)
                .cloned()
                .unwrap_or_else(|| Value::from(UNSUPPORTED_ATTRIBUTE));
            (output.to_string(), value)
        })
        .collect()
}

/// Order node identifiers numerically when both are integers, otherwise
/// lexicographically.
pub fn compare_node_ids(a: &str, b: &str) -> std::cmp::Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}
