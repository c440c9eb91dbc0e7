//! Fabric details: cluster identity, inventories and TEP pools.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::controllers::{reconcile_controllers, Controllers};
use super::inventory::{reconcile_inventory, Inventory};
use super::{attr_string, ShapeError};
use crate::harvest::{RawConfig, RootKey};

/// Annotation key holding the cluster bootstrap document.
const CLUSTER_ANNOTATION: &str = "bootx.cluster";

/// Values entered when the fabric was first initialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FabricInitialization {
    pub fabric_name: Value,
    pub fabric_id: Value,
    pub cluster_size: Value,
    pub pod_id: Value,
    pub tep_pool: Value,
    pub infra_vlan: Value,
    pub gipo_pool: Value,
}

#[derive(Debug, Deserialize)]
struct ClusterAnnotation {
    cluster: ClusterSection,
    pods: Vec<PodSection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClusterSection {
    fabric_name: Value,
    fabric_id: Value,
    cluster_size: Value,
    infra_vlan: Value,
    gipo_pool: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PodSection {
    pod_id: Value,
    tep_pool: Value,
}

impl FabricInitialization {
    /// Decode the cluster bootstrap annotation of the controller cluster.
    ///
    /// Every backup has exactly one controller cluster with one bootstrap
    /// annotation. Duplicates are logged and the first one is used; a
    /// missing or undecodable annotation is an error.
    pub fn extract(raw: &RawConfig) -> Result<Self, ShapeError> {
        let clusters = raw.get(RootKey::CtrlrInst);
        if clusters.is_empty() {
            return Err(ShapeError::MissingControllerCluster);
        }
        if clusters.len() > 1 {
            warn!(
                count = clusters.len(),
                "ctrlrInst has more than one entry for APIC controllers. This is unexpected and should be investigated!"
            );
        }

        let annotations: Vec<String> = raw
            .first_root_children(RootKey::CtrlrInst, "tagAnnotation")
            .into_iter()
            .filter(|body| attr_string(body, "key").as_deref() == Some(CLUSTER_ANNOTATION))
            .filter_map(|body| attr_string(body, "value"))
            .collect();
        if annotations.len() > 1 {
            warn!(
                count = annotations.len(),
                "cluster data has more than one entry for APIC clusters (bootx.cluster). This is unexpected and should be investigated!"
            );
        }
        let first = annotations
            .first()
            .ok_or(ShapeError::MissingClusterAnnotation)?;

        let annotation: ClusterAnnotation = serde_json::from_str(first)?;
        let pod = annotation.pods.into_iter().next().ok_or(ShapeError::NoPods)?;
        let cluster = annotation.cluster;

        Ok(Self {
            fabric_name: cluster.fabric_name,
            fabric_id: cluster.fabric_id,
            cluster_size: cluster.cluster_size,
            pod_id: pod.pod_id,
            tep_pool: pod.tep_pool,
            infra_vlan: cluster.infra_vlan,
            gipo_pool: cluster.gipo_pool,
        })
    }
}

/// Physical TEP pools.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TepPools {
    pub phys_tep_pools: Vec<Value>,
}

impl TepPools {
    /// Keep the pools of physical pods. Older controller versions do not
    /// tag pools with a pod type; then every pool is physical.
    pub fn extract(raw: &RawConfig) -> Self {
        let pools = raw.get(RootKey::FabricSetupP);
        let pod_type = |pool: &Value| attr_string(pool, "podType");

        let phys_tep_pools = if pools.iter().all(|pool| pod_type(pool).is_some()) {
            pools
                .iter()
                .filter(|pool| pod_type(*pool).as_deref() == Some("physical"))
                .cloned()
                .collect()
        } else {
            pools.to_vec()
        };

        Self { phys_tep_pools }
    }
}

/// The `fabric_details` section.
#[derive(Debug, Clone, Serialize)]
pub struct FabricDetails {
    pub fabric_initialization: FabricInitialization,
    pub fabric_inventory: Inventory,
    pub controllers: Controllers,
    pub tep_pools: TepPools,
}

impl FabricDetails {
    pub fn extract(raw: &RawConfig) -> Result<Self, ShapeError> {
        Ok(Self {
            fabric_initialization: FabricInitialization::extract(raw)?,
            fabric_inventory: reconcile_inventory(raw),
            controllers: reconcile_controllers(raw),
            tep_pools: TepPools::extract(raw),
        })
    }
}
