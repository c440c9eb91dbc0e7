//! Test helper utilities: builders for controller backup documents

#![allow(dead_code)]

use aciextract::Document;
use serde_json::{json, Value};

/// `{tag: {"attributes": attrs, "children": children}}`
pub fn node(tag: &str, attributes: Value, children: Vec<Value>) -> Value {
    json!({ tag: {"attributes": attributes, "children": children} })
}

/// `{tag: {"attributes": attrs}}` without a children list
pub fn leaf(tag: &str, attributes: Value) -> Value {
    json!({ tag: {"attributes": attributes} })
}

/// Top-level wrapper of an exported document.
pub fn pol_uni(children: Vec<Value>) -> Value {
    node("polUni", json!({"dn": "uni"}), children)
}

pub fn document(name: &str, root: Value) -> Document {
    Document {
        name: name.to_string(),
        root,
    }
}

/// The `bootx.cluster` annotation value.
pub fn cluster_json(fabric_name: &str, fabric_id: u32, cluster_size: u32) -> String {
    json!({
        "cluster": {
            "fabricName": fabric_name,
            "fabricId": fabric_id,
            "clusterSize": cluster_size,
            "infraVlan": 3967,
            "gipoPool": "225.0.0.0/15"
        },
        "pods": [{"podId": 1, "tepPool": "10.0.0.0/16"}]
    })
    .to_string()
}

/// A `ctrlrInst` holding the cluster annotation plus `children`.
pub fn ctrlr_inst(fabric_name: &str, fabric_id: u32, cluster_size: u32, mut children: Vec<Value>) -> Value {
    children.insert(
        0,
        leaf(
            "tagAnnotation",
            json!({"key": "bootx.cluster", "value": cluster_json(fabric_name, fabric_id, cluster_size)}),
        ),
    );
    node("ctrlrInst", json!({}), children)
}

pub fn node_ident(name: &str, node_id: &str, serial: &str) -> Value {
    leaf(
        "fabricNodeIdentP",
        json!({"name": name, "nodeId": node_id, "serial": serial}),
    )
}

pub fn fabric_node_ident_pol(nodes: Vec<Value>) -> Value {
    node("fabricNodeIdentPol", json!({"name": "default"}), nodes)
}

pub fn dhcp_client(name: &str, role: &str, model: &str, version: &str) -> Value {
    leaf(
        "dhcpClient",
        json!({"name": name, "nodeRole": role, "model": model, "runningVer": version}),
    )
}

pub fn oob_node(dn: &str, addr: &str) -> Value {
    leaf("mgmtRsOoBStNode", json!({"tDn": dn, "addr": addr}))
}

pub fn mgmt_mgmt_p(nodes: Vec<Value>) -> Value {
    node(
        "mgmtMgmtP",
        json!({"name": "default"}),
        vec![node("mgmtOoB", json!({"name": "default"}), nodes)],
    )
}

pub fn bundle_group(name: &str, lag_type: &str) -> Value {
    leaf("infraAccBndlGrp", json!({"name": name, "lagT": lag_type}))
}

pub fn infra_infra(children: Vec<Value>) -> Value {
    node("infraInfra", json!({}), children)
}

pub fn fabric_inst(children: Vec<Value>) -> Value {
    node("fabricInst", json!({}), children)
}

/// The smallest backup the extractors accept: cluster "Fab1" with one leaf
/// and nothing else.
pub fn minimal_backup() -> Value {
    pol_uni(vec![
        ctrlr_inst("Fab1", 1, 3, vec![]),
        fabric_node_ident_pol(vec![node_ident("Leaf101", "101", "FDO101")]),
    ])
}

/// A fuller backup: two leaves and a spine with all three inventory
/// sources, some fabric and access policies, and one tenant.
pub fn sample_backup() -> Value {
    pol_uni(vec![
        ctrlr_inst(
            "Fab1",
            1,
            3,
            vec![
                node(
                    "fabricNodeIdentPol",
                    json!({}),
                    vec![leaf("fabricCtrlrIdentP", json!({"serial": "FCH1"}))],
                ),
                leaf(
                    "tagAnnotation",
                    json!({
                        "key": "node-1",
                        "value": json!({"nodeName": "apic1", "nodeId": 1, "serialNumber": "FCH1",
                                        "activeNodeAddr": "192.168.1.1", "podId": 1}).to_string()
                    }),
                ),
            ],
        ),
        fabric_node_ident_pol(vec![
            node_ident("Spine201", "201", "FDO201"),
            node_ident("Leaf102", "102", "FDO102"),
            node_ident("Leaf101", "101", "FDO101"),
        ]),
        node(
            "topSystem",
            json!({}),
            vec![
                dhcp_client("Leaf101", "leaf", "N9K-C93180YC-FX", "n9000-15.2(7f)"),
                dhcp_client("Spine201", "spine", "N9K-C9336PQ", "n9000-15.2(7f)"),
                dhcp_client("apic1", "controller", "APIC-SERVER-M3", "5.2(7f)"),
            ],
        ),
        mgmt_mgmt_p(vec![
            oob_node("topology/pod-1/node-101", "192.168.1.101/24"),
            oob_node("topology/pod-1/node-201", "192.168.1.201/24"),
        ]),
        fabric_inst(vec![
            node(
                "bgpInstPol",
                json!({"name": "default"}),
                vec![
                    leaf("bgpAsP", json!({"asn": "65001"})),
                    node(
                        "bgpRRP",
                        json!({}),
                        vec![leaf("bgpRRNodePEp", json!({"id": "201", "podId": "1"}))],
                    ),
                ],
            ),
            leaf("datetimePol", json!({"name": "default", "adminSt": "enabled"})),
            leaf("fabricProtPol", json!({"name": "default", "pairT": "explicit"})),
        ]),
        infra_infra(vec![
            leaf("infraSetPol", json!({"enforceSubnetCheck": "yes", "domainValidation": "no"})),
            node(
                "infraFuncP",
                json!({}),
                vec![
                    leaf("infraAccPortGrp", json!({"name": "access-1"})),
                    bundle_group("pc-1", "link"),
                    bundle_group("vpc-1", "node"),
                ],
            ),
            leaf("fvnsVlanInstP", json!({"name": "vlans", "allocMode": "static"})),
        ]),
        leaf("physDomP", json!({"name": "phys"})),
        node("fvTenant", json!({"name": "common"}), vec![]),
    ])
}
