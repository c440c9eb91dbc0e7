//! System settings: fabric-wide singleton policies.
//!
//! Unlike the policy catalogs, these are single objects whose individual
//! attributes are reported. Attributes that older controller versions do
//! not have are reported as `"unsupported attribute"`.

use serde::Serialize;
use serde_json::Value;

use super::{attr_string, attributes, pick_attributes, Sections, UNSUPPORTED_ATTRIBUTE};
use crate::harvest::{RawConfig, RootKey};

/// Reported when no BGP autonomous system is configured.
pub const NO_BGP_ASN: &str = "No BGP ASN Configured";

/// Reported when the route reflector policy has no children at all.
pub const NO_ROUTE_REFLECTORS: &str = "No Route Reflectors Configured";

/// BGP route reflector policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BgpConfig {
    pub bgp_policy_name: String,
    pub bgp_asn: Value,
    pub bgp_route_reflectors: Vec<String>,
}

impl BgpConfig {
    pub fn extract(raw: &RawConfig) -> Self {
        let bgp_policy_name = raw
            .extract(RootKey::FabricInst, &["bgpInstPol"])
            .first()
            .and_then(|policy| attr_string(policy, "name"))
            .unwrap_or_default();

        let bgp_asn = raw
            .extract(RootKey::FabricInst, &["bgpInstPol", "bgpAsP"])
            .first()
            .and_then(|asp| attributes(asp)?.get("asn").cloned())
            .unwrap_or_else(|| Value::from(NO_BGP_ASN));

        let bgp_route_reflectors =
            match raw.lookup(RootKey::FabricInst, &["bgpInstPol", "bgpRRP", "bgpRRNodePEp"]) {
                Ok(nodes) => {
                    let mut reflectors: Vec<String> = nodes
                        .into_iter()
                        .filter_map(|node| {
                            let pod = attr_string(node, "podId")?;
                            let id = attr_string(node, "id")?;
                            Some(format!("pod-{}/spine-{}", pod, id))
                        })
                        .collect();
                    reflectors.sort();
                    reflectors
                }
                Err(_) => vec![NO_ROUTE_REFLECTORS.to_string()],
            };

        Self {
            bgp_policy_name,
            bgp_asn,
            bgp_route_reflectors,
        }
    }
}

/// Endpoint loop protection, rogue endpoint control and IP aging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointControls {
    pub ep_loop_protection: Sections,
    pub rogue_ep_control: Sections,
    pub ip_aging: Sections,
}

impl EndpointControls {
    pub fn extract(raw: &RawConfig) -> Self {
        let infra = |tag: &str| raw.first_root_children(RootKey::InfraInfra, tag).first().copied();
        Self {
            ep_loop_protection: pick_attributes(
                infra("epLoopProtectP"),
                &[
                    ("adminSt", "adminSt"),
                    ("loopDetectIntvl", "loopDetectIntvl"),
                    ("loopDetectMult", "loopDetectMult"),
                    ("action", "action"),
                ],
            ),
            rogue_ep_control: pick_attributes(
                infra("epControlP"),
                &[
                    ("adminSt", "adminSt"),
                    ("rogueEpDetectIntvl", "rogueEpDetectIntvl"),
                    ("rogueEpDetectMult", "rogueEpDetectMult"),
                    ("holdIntvl", "holdIntvl"),
                ],
            ),
            ip_aging: pick_attributes(infra("epIpAgingP"), &[("adminSt", "adminSt")]),
        }
    }
}

const FABRIC_WIDE_FIELDS: &[(&str, &str)] = &[
    ("disable_remote_ep_learning", "unicastXrEpLearnDisable"),
    ("enforce_subnet_check", "enforceSubnetCheck"),
    ("enforce_epg_vlan_validation", "validateOverlappingVlans"),
    ("enforce_domain_validation", "domainValidation"),
    ("spine_opflex_client_auth", "opflexpAuthenticateClients"),
    ("leaf_opflex_client_auth", "leafOpflexpAuthenticateClients"),
    ("spine_ssl_opflex", "opflexpUseSsl"),
    ("leaf_ssl_opflex", "leafOpflexpUseSsl"),
    ("ssl_opflex_versions", "opflexpSslProtocols"),
    ("reallocate_gipo", "reallocateGipo"),
    ("restrict_infra_vlan_traffic", "restrictInfraVLANTraffic"),
];

const ISIS_LEVEL_FIELDS: &[&str] = &[
    "lspFastFlood",
    "lspGenInitIntvl",
    "lspGenMaxIntvl",
    "lspGenSecIntvl",
    "spfCompInitIntvl",
    "spfCompMaxIntvl",
    "spfCompSecIntvl",
];

fn isis_policy(raw: &RawConfig) -> Sections {
    let Some(policy) = raw
        .first_root_children(RootKey::FabricInst, "isisDomPol")
        .first()
        .copied()
    else {
        return Sections::new();
    };

    let mut config = pick_attributes(
        Some(policy),
        &[("mtu", "mtu"), ("redistribMetric", "redistribMetric")],
    );
    // Level timers live on the first child, an isisLvlComp.
    let level = policy
        .get("children")
        .and_then(Value::as_array)
        .and_then(|children| children.first())
        .and_then(|child| child.get("isisLvlComp"));
    let level_attrs = level.and_then(attributes);
    for field in ISIS_LEVEL_FIELDS {
        let value = level_attrs
            .and_then(|attrs| attrs.get(*field))
            .cloned()
            .unwrap_or_else(|| Value::from(UNSUPPORTED_ATTRIBUTE));
        config.insert(field.to_string(), value);
    }
    config
}

fn misc_config(raw: &RawConfig) -> Sections {
    const MISC: &[(&str, RootKey, &str, &str)] = &[
        ("apic_conn_pref", RootKey::FabricInst, "mgmtConnectivityPrefs", "interfacePref"),
        ("control_plane_mtu", RootKey::InfraInfra, "infraCPMtuPol", "CPMtu"),
        ("coop_group_type", RootKey::FabricInst, "coopPol", "type"),
        ("fips_mode", RootKey::AaaUserEp, "aaaFabricSec", "fipsMode"),
        (
            "useConfiguredSystemGIPo",
            RootKey::InfraInfra,
            "fmcastSystemGIPoPol",
            "useConfiguredSystemGIPo",
        ),
    ];

    MISC.iter()
        .map(|(output, root, tag, attr)| {
            let value = raw
                .first_root_children(*root, tag)
                .first()
                .and_then(|body| attributes(body)?.get(*attr).cloned())
                .unwrap_or_else(|| Value::from(UNSUPPORTED_ATTRIBUTE));
            (output.to_string(), value)
        })
        .collect()
}

/// The `system_settings` section.
#[derive(Debug, Clone, Serialize)]
pub struct SystemSettings {
    pub bgp: BgpConfig,
    pub endpoint_controls: EndpointControls,
    pub fabric_wide_settings: Sections,
    pub isis_policy: Sections,
    pub port_tracking: Sections,
    pub misc: Sections,
}

impl SystemSettings {
    pub fn extract(raw: &RawConfig) -> Self {
        let infra = |tag: &str| raw.first_root_children(RootKey::InfraInfra, tag).first().copied();
        Self {
            bgp: BgpConfig::extract(raw),
            endpoint_controls: EndpointControls::extract(raw),
            fabric_wide_settings: pick_attributes(infra("infraSetPol"), FABRIC_WIDE_FIELDS),
            isis_policy: isis_policy(raw),
            port_tracking: pick_attributes(
                infra("infraPortTrackPol"),
                &[
                    ("adminSt", "adminSt"),
                    ("delay", "delay"),
                    ("minlinks", "minlinks"),
                    ("includeApicPorts", "includeApicPorts"),
                ],
            ),
            misc: misc_config(raw),
        }
    }
}
