//! Unit tests for inventory reconciliation and the assembled result

use aciextract::extract::inventory::{reconcile_inventory, NO_ADDRESS, UNKNOWN};
use aciextract::{harvest, AciConfig, HarvestMode, RawConfig};
use serde_json::{json, Value};

use crate::helpers::*;

fn raw_from(root: Value) -> RawConfig {
    harvest(&[document("backup.json", root)], HarvestMode::Lenient).unwrap()
}

#[test]
fn oob_address_joins_on_node_id() {
    let raw = raw_from(pol_uni(vec![
        fabric_node_ident_pol(vec![node_ident("Spine201", "201", "S201")]),
        mgmt_mgmt_p(vec![
            oob_node("topology/pod-2/node-202", "10.0.2.202/24"),
            oob_node("topology/pod-1/node-201", "10.0.1.201/24"),
            oob_node("topology/pod-3/node-2010", "10.0.3.210/24"),
        ]),
    ]));
    let inventory = reconcile_inventory(&raw);
    let record = &inventory["Spine201"];
    assert_eq!(record.ip, "10.0.1.201/24");
    assert_eq!(record.pod, "1");
}

#[test]
fn removing_enrichment_sources_keeps_every_record() {
    let full = raw_from(sample_backup());
    let identity_only = raw_from(pol_uni(vec![fabric_node_ident_pol(vec![
        node_ident("Spine201", "201", "FDO201"),
        node_ident("Leaf102", "102", "FDO102"),
        node_ident("Leaf101", "101", "FDO101"),
    ])]));

    let enriched = reconcile_inventory(&full);
    let bare = reconcile_inventory(&identity_only);
    let enriched_names: Vec<_> = enriched.keys().collect();
    let bare_names: Vec<_> = bare.keys().collect();
    assert_eq!(enriched_names, bare_names);
    assert_eq!(enriched_names, vec!["Leaf101", "Leaf102", "Spine201"]);

    for record in bare.values() {
        assert_eq!(record.role, UNKNOWN);
        assert_eq!(record.model, UNKNOWN);
        assert_eq!(record.version, UNKNOWN);
        assert_eq!(record.ip, NO_ADDRESS);
        assert_eq!(record.pod, UNKNOWN);
    }
    assert_eq!(enriched["Leaf101"].model, "N9K-C93180YC-FX");
    assert_eq!(enriched["Spine201"].role, "spine");
    assert_eq!(enriched["Leaf102"].role, UNKNOWN);
}

#[test]
fn end_to_end_minimal_backup() {
    let aci = AciConfig::from_documents(
        "backup.tar.gz".to_string(),
        vec![document("backup.json", minimal_backup())],
        HarvestMode::Lenient,
    )
    .unwrap();

    let init = aci.section("fabric_details.fabric_initialization").unwrap();
    assert_eq!(init["fabric_name"], json!("Fab1"));
    assert_eq!(init["fabric_id"], json!(1));
    assert_eq!(init["cluster_size"], json!(3));

    let inventory = aci.section("fabric_details.fabric_inventory").unwrap();
    assert_eq!(
        inventory,
        json!({"Leaf101": {
            "id": "101",
            "serial": "FDO101",
            "role": "unknown",
            "model": "unknown",
            "version": "unknown",
            "ip": "NA",
            "pod": "unknown"
        }})
    );
}

#[test]
fn bundle_groups_land_in_exactly_one_section() {
    let aci = AciConfig::from_documents(
        "backup.tar.gz".to_string(),
        vec![document("backup.json", sample_backup())],
        HarvestMode::Lenient,
    )
    .unwrap();
    let interfaces = &aci.access_policies().interfaces;
    let names = |section: &str| -> Vec<String> {
        interfaces[section]
            .as_array()
            .unwrap()
            .iter()
            .map(|body| body["attributes"]["name"].as_str().unwrap().to_string())
            .collect()
    };
    assert_eq!(names("leaf_pc_polgrp"), vec!["pc-1"]);
    assert_eq!(names("leaf_vpc_polgrp"), vec!["vpc-1"]);
}

#[test]
fn sample_backup_populates_every_area() {
    let aci = AciConfig::from_documents(
        "backup.tar.gz".to_string(),
        vec![document("backup.json", sample_backup())],
        HarvestMode::Lenient,
    )
    .unwrap();

    let bgp = &aci.system_settings().bgp;
    assert_eq!(bgp.bgp_asn, json!("65001"));
    assert_eq!(bgp.bgp_route_reflectors, vec!["pod-1/spine-201"]);

    let fabric_wide = &aci.system_settings().fabric_wide_settings;
    assert_eq!(fabric_wide["enforce_subnet_check"], json!("yes"));
    assert_eq!(fabric_wide["reallocate_gipo"], json!("unsupported attribute"));

    let controllers = &aci.fabric_details().controllers;
    assert_eq!(controllers["apic1"].oob_ip, json!("192.168.1.1"));

    assert_eq!(aci.fabric_policies().policies_pod["date_time"].as_array().unwrap().len(), 1);
    assert_eq!(
        aci.section("access_policies.policies_switch.vpc_protection_group.0.attributes.pairT")
            .unwrap(),
        json!("explicit")
    );
    assert_eq!(aci.section("access_policies.pools.vlan").unwrap().as_array().unwrap().len(), 1);
    assert_eq!(aci.section("access_policies.phys_ext_domains.physical.0.attributes.name").unwrap(), json!("phys"));
    assert_eq!(aci.section("tenants.0.attributes.name").unwrap(), json!("common"));
    assert_eq!(aci.section("virtual_networking").unwrap(), json!([]));
}
