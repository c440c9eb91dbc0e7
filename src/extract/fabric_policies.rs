//! Fabric policies: the Fabric > Fabric Policies tree under `fabricInst`.

use serde::Serialize;

use super::{collect_sections, PathSpec, Sections};
use crate::harvest::{RawConfig, RootKey::FabricInst};

const POLICIES_POD: &[PathSpec] = &[
    PathSpec::new("date_time", FabricInst, &["datetimePol"]),
    PathSpec::new("snmp", FabricInst, &["snmpPol"]),
];

const POLICIES_INTERFACE: &[PathSpec] = &[
    PathSpec::new("l3_interface", FabricInst, &["l3IfPol"]),
    PathSpec::new("link_level", FabricInst, &["fabricFIfPol"]),
    PathSpec::new("dwdm", FabricInst, &["dwdmFabIfPol"]),
    PathSpec::new("link_flap", FabricInst, &["fabricFLinkFlapPol"]),
    PathSpec::new("zr_transceiver", FabricInst, &["xcvrZRFabIfPol"]),
    PathSpec::new("zrp_transceiver", FabricInst, &["xcvrZRPFabIfPol"]),
];

const POLICIES_GLOBAL: &[PathSpec] = &[
    PathSpec::new("dns_profile", FabricInst, &["dnsProfile"]),
    PathSpec::new("fabric_l2_mtu", FabricInst, &["l2InstPol"]),
];

const POLICIES_MONITORING: &[PathSpec] = &[PathSpec::new(
    "fabric_node_control",
    FabricInst,
    &["fabricNodeControl"],
)];

const POLICIES_MACSEC: &[PathSpec] = &[
    PathSpec::new("interface", FabricInst, &["macsecFabIfPol"]),
    PathSpec::new("parameter", FabricInst, &["macsecFabPolCont", "macsecFabParamPol"]),
    PathSpec::new("keychain", FabricInst, &["macsecFabPolCont", "macsecKeyChainPol"]),
];

const PODS_POLICY_GROUPS: &[PathSpec] =
    &[PathSpec::new("groups", FabricInst, &["fabricFuncP", "fabricPodPGrp"])];

const PODS_PROFILES: &[PathSpec] = &[PathSpec::new("profile", FabricInst, &["fabricPodP"])];

const INTERFACES: &[PathSpec] = &[
    PathSpec::new("spine_policy_group", FabricInst, &["fabricFuncP", "fabricSpPortPGrp"]),
    PathSpec::new("spine_profile", FabricInst, &["fabricSpPortP"]),
    PathSpec::new("leaf_policy_group", FabricInst, &["fabricFuncP", "fabricLePortPGrp"]),
    PathSpec::new("leaf_profile", FabricInst, &["fabricLePortP"]),
];

/// The `fabric_policies` section.
#[derive(Debug, Clone, Serialize)]
pub struct FabricPolicies {
    pub policies_pod: Sections,
    pub policies_interface: Sections,
    pub policies_global: Sections,
    pub policies_monitoring: Sections,
    pub policies_macsec: Sections,
    pub pods_policy_groups: Sections,
    pub pods_profiles: Sections,
    pub interfaces: Sections,
}

impl FabricPolicies {
    pub fn extract(raw: &RawConfig) -> Self {
        Self {
            policies_pod: collect_sections(raw, POLICIES_POD),
            policies_interface: collect_sections(raw, POLICIES_INTERFACE),
            policies_global: collect_sections(raw, POLICIES_GLOBAL),
            policies_monitoring: collect_sections(raw, POLICIES_MONITORING),
            policies_macsec: collect_sections(raw, POLICIES_MACSEC),
            pods_policy_groups: collect_sections(raw, PODS_POLICY_GROUPS),
            pods_profiles: collect_sections(raw, PODS_PROFILES),
            interfaces: collect_sections(raw, INTERFACES),
        }
    }
}
