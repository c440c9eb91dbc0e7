//! Access policies: the Fabric > Access Policies tree, mostly under
//! `infraInfra`.

use serde::Serialize;
use serde_json::Value;

use super::{attr_string, collect_sections, PathSpec, Sections};
use crate::harvest::{
    RawConfig,
    RootKey::{self, FabricInst, InfraInfra},
};

const POLICIES_INTERFACE: &[PathSpec] = &[
    PathSpec::new("dot1x_auth", InfraInfra, &["l2PortAuthPol"]),
    PathSpec::new("cdp", InfraInfra, &["cdpIfPol"]),
    PathSpec::new("copp", InfraInfra, &["coppIfPol"]),
    PathSpec::new("data_plane_policing", InfraInfra, &["qosDppPol"]),
    PathSpec::new("dwdm", InfraInfra, &["dwdmIfPol"]),
    PathSpec::new("fiberchannel_interface", InfraInfra, &["fcIfPol"]),
    PathSpec::new("firewall", InfraInfra, &["nwsFwPol"]),
    PathSpec::new("l2_interface", InfraInfra, &["l2IfPol"]),
    PathSpec::new("link_flap", InfraInfra, &["fabricLinkFlapPol"]),
    PathSpec::new("link_level", InfraInfra, &["fabricHIfPol"]),
    PathSpec::new("link_level_flow_control", InfraInfra, &["qosLlfcIfPol"]),
    PathSpec::new("lldp", InfraInfra, &["lldpIfPol"]),
    PathSpec::new("mcp", InfraInfra, &["mcpIfPol"]),
    PathSpec::new("poe", InfraInfra, &["poeIfPol"]),
    PathSpec::new("port_channel", InfraInfra, &["lacpLagPol"]),
    PathSpec::new("port_channel_member", InfraInfra, &["lacpIfPol"]),
    PathSpec::new("port_security", InfraInfra, &["l2PortSecurityPol"]),
    PathSpec::new("priority_flow_control", InfraInfra, &["qosPfcIfPol"]),
    PathSpec::new("slow_drain", InfraInfra, &["qosSdIfPol"]),
    PathSpec::new("spanning_tree", InfraInfra, &["stpIfPol"]),
    PathSpec::new("storm_control", InfraInfra, &["stormctrlIfPol"]),
    PathSpec::new("sync_eth_interface", InfraInfra, &["synceEthIfPol"]),
    PathSpec::new("zr_transceiver", InfraInfra, &["xcvrZRIfPol"]),
    PathSpec::new("zrp_transceiver", InfraInfra, &["xcvrZRPIfPol"]),
];

const MACSEC: &[PathSpec] = &[
    PathSpec::new("parameters", InfraInfra, &["macsecPolCont", "macsecParamPol"]),
    PathSpec::new("keychain", InfraInfra, &["macsecPolCont", "macsecKeyChainPol"]),
    PathSpec::new("interfaces", InfraInfra, &["macsecIfPol"]),
];

const NETFLOW: &[PathSpec] = &[
    PathSpec::new("record", InfraInfra, &["netflowRecordPol"]),
    PathSpec::new("exporter", InfraInfra, &["netflowExporterPol"]),
    PathSpec::new("vm_exporter", InfraInfra, &["netflowVmmExporterPol"]),
    PathSpec::new("monitor", InfraInfra, &["netflowMonitorPol"]),
];

const POLICIES_GLOBAL: &[PathSpec] = &[
    PathSpec::new("dhcp", InfraInfra, &["dhcpRelayP"]),
    PathSpec::new("mcp", InfraInfra, &["mcpInstPol"]),
    PathSpec::new("aaep", InfraInfra, &["infraAttEntityP"]),
    PathSpec::new("err_disable_recovery", InfraInfra, &["edrErrDisRecoverPol"]),
    PathSpec::new("qos", InfraInfra, &["qosInstPol", "qosClass"]),
];

const POLICIES_SWITCH: &[PathSpec] = &[
    PathSpec::new("dot1x_node_auth", InfraInfra, &["l2NodeAuthPol"]),
    PathSpec::new("bfd_ipv4", InfraInfra, &["bfdIpv4InstPol"]),
    PathSpec::new("bfd_ipv6", InfraInfra, &["bfdIpv6InstPol"]),
    PathSpec::new("bfd_multihop_ipv4", InfraInfra, &["bfdMhIpv4InstPol"]),
    PathSpec::new("bfd_multihop_ipv6", InfraInfra, &["bfdMhIpv6InstPol"]),
    PathSpec::new("leaf_copp", InfraInfra, &["coppLeafProfile"]),
    PathSpec::new("leaf_copp_prefilter", InfraInfra, &["iaclLeafProfile"]),
    PathSpec::new("spine_copp", InfraInfra, &["coppSpineProfile"]),
    PathSpec::new("spine_copp_prefilter", InfraInfra, &["iaclSpineProfile"]),
    PathSpec::new("equipment_flash_conf", InfraInfra, &["equipmentFlashConfigPol"]),
    PathSpec::new("fast_link_failover", InfraInfra, &["topoctrlFastLinkFailoverInstPol"]),
    PathSpec::new("fibre_channel_node", InfraInfra, &["fcInstPol"]),
    PathSpec::new("fibre_channel_san", InfraInfra, &["fcFabricPol"]),
    PathSpec::new("forwarding_scale_profile", InfraInfra, &["topoctrlFwdScaleProfilePol"]),
    PathSpec::new("netflow_node", InfraInfra, &["netflowNodePol"]),
    PathSpec::new("poe_node", InfraInfra, &["poeInstPol"]),
    PathSpec::new("ptp_node_profile", InfraInfra, &["ptpInstPol"]),
    PathSpec::new("stp", InfraInfra, &["stpInstPol"]),
    PathSpec::new("sync_eth_node", InfraInfra, &["synceInstPol"]),
    PathSpec::new("usb_config", InfraInfra, &["topoctrlUsbConfigProfilePol"]),
    PathSpec::new("vpc_protection_group", FabricInst, &["fabricProtPol"]),
    PathSpec::new("vpc_domain", FabricInst, &["vpcInstPol"]),
];

const BUNDLE_GROUPS: PathSpec =
    PathSpec::new("bundle_groups", InfraInfra, &["infraFuncP", "infraAccBndlGrp"]);

const INTERFACES_HEAD: &[PathSpec] = &[PathSpec::new(
    "leaf_access_polgrp",
    InfraInfra,
    &["infraFuncP", "infraAccPortGrp"],
)];

const INTERFACES_TAIL: &[PathSpec] = &[
    PathSpec::new("leaf_intpro", InfraInfra, &["infraAccPortP"]),
    PathSpec::new("fex_intpro", InfraInfra, &["infraFexP"]),
    PathSpec::new("spine_access_polgrp", InfraInfra, &["infraFuncP", "infraSpAccPortGrp"]),
    PathSpec::new("spine_intpro", InfraInfra, &["infraSpAccPortP"]),
];

const SWITCHES: &[PathSpec] = &[
    PathSpec::new("leaf_polgrp", InfraInfra, &["infraFuncP", "infraAccNodePGrp"]),
    PathSpec::new("leaf_swpro", InfraInfra, &["infraNodeP"]),
    PathSpec::new("spine_polgrp", InfraInfra, &["infraFuncP", "infraSpineAccNodePGrp"]),
    PathSpec::new("spine_swpro", InfraInfra, &["infraSpineP"]),
];

const PHYS_EXT_DOMAINS: &[(&str, RootKey)] = &[
    ("ext_l2", RootKey::L2extDomP),
    ("fibre_channel", RootKey::FcDomP),
    ("ext_l3", RootKey::L3extDomP),
    ("physical", RootKey::PhysDomP),
];

const POOLS: &[PathSpec] = &[
    PathSpec::new("vlan", InfraInfra, &["fvnsVlanInstP"]),
    PathSpec::new("vsan", InfraInfra, &["fvnsVsanInstP"]),
    PathSpec::new("vsan_attributes", InfraInfra, &["fcVsanAttrP"]),
    PathSpec::new("vxlan", InfraInfra, &["fvnsVxlanInstP"]),
];

/// Port-channel (`lagT = link`) and virtual port-channel (`lagT = node`)
/// bundle groups share one object class.
fn partition_bundles(groups: Vec<Value>) -> (Vec<Value>, Vec<Value>) {
    let mut port_channels = Vec::new();
    let mut virtual_port_channels = Vec::new();
    for group in groups {
        match attr_string(&group, "lagT").as_deref() {
            Some("link") => port_channels.push(group),
            Some("node") => virtual_port_channels.push(group),
            _ => {}
        }
    }
    (port_channels, virtual_port_channels)
}

fn policies_interface(raw: &RawConfig) -> Sections {
    let mut sections = collect_sections(raw, POLICIES_INTERFACE);
    sections.insert(
        "macsec".to_string(),
        Value::Object(collect_sections(raw, MACSEC)),
    );
    sections.insert(
        "netflow".to_string(),
        Value::Object(collect_sections(raw, NETFLOW)),
    );
    sections
}

fn interfaces(raw: &RawConfig) -> Sections {
    let (pc, vpc) = partition_bundles(raw.extract(BUNDLE_GROUPS.root, BUNDLE_GROUPS.path));

    let mut sections = collect_sections(raw, INTERFACES_HEAD);
    sections.insert("leaf_pc_polgrp".to_string(), Value::Array(pc));
    sections.insert("leaf_vpc_polgrp".to_string(), Value::Array(vpc));
    sections.extend(collect_sections(raw, INTERFACES_TAIL));
    sections
}

/// The `access_policies` section.
#[derive(Debug, Clone, Serialize)]
pub struct AccessPolicies {
    pub policies_interface: Sections,
    pub policies_global: Sections,
    pub policies_switch: Sections,
    pub interfaces: Sections,
    pub switches: Sections,
    pub phys_ext_domains: Sections,
    pub pools: Sections,
}

impl AccessPolicies {
    pub fn extract(raw: &RawConfig) -> Self {
        Self {
            policies_interface: policies_interface(raw),
            policies_global: collect_sections(raw, POLICIES_GLOBAL),
            policies_switch: collect_sections(raw, POLICIES_SWITCH),
            interfaces: interfaces(raw),
            switches: collect_sections(raw, SWITCHES),
            phys_ext_domains: PHYS_EXT_DOMAINS
                .iter()
                .map(|(name, root)| (name.to_string(), Value::Array(raw.get(*root).to_vec())))
                .collect(),
            pools: collect_sections(raw, POOLS),
        }
    }
}
