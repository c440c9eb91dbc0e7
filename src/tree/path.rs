//! Key-path extraction through nested `children` lists.
//!
//! Controller objects are encoded as single-key wrappers around a node body:
//!
//! ```text
//! {"fabricInst": {"attributes": {...}, "children": [
//!     {"datetimePol": {"attributes": {...}, "children": [...]}},
//!     {"snmpPol": {...}}
//! ]}}
//! ```
//!
//! A key path such as `["fabricFuncP", "fabricPodPGrp"]` walks one level of
//! `children` per key, keeping only the wrappers that carry that key.

use serde_json::Value;

/// Why a key path could not be walked.
///
/// These describe structural absence: the data simply does not have the
/// shape the path expects. Callers that do not care use [`extract_path`],
/// which reports every one of them as "nothing matched".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("key path is empty")]
    EmptyPath,

    #[error("node at depth {depth} has no children list (looking for '{key}')")]
    MissingChildren { depth: usize, key: String },

    #[error("children at depth {depth} is not a list (looking for '{key}')")]
    ChildrenNotAList { depth: usize, key: String },

    #[error("node at depth {depth} is not an object (looking for '{key}')")]
    NotAnObject { depth: usize, key: String },
}

/// Walk `path` from the given root node bodies.
///
/// At each depth, every node's `children` list is scanned for wrappers that
/// contain the next key (presence test, the value is not compared), and the
/// wrapped bodies become the nodes of the next depth. The bodies bound to the
/// last key are returned in document order.
///
/// Any node on the way that lacks a `children` list fails the whole lookup,
/// even when other branches would have matched.
pub fn lookup_path<'a>(roots: &'a [Value], path: &[&str]) -> Result<Vec<&'a Value>, PathError> {
    if path.is_empty() {
        return Err(PathError::EmptyPath);
    }

    let mut level: Vec<&'a Value> = roots.iter().collect();
    for (depth, key) in path.iter().enumerate() {
        let mut next = Vec::new();
        for node in level {
            for child in children_of(node, depth, key)? {
                if let Some(body) = child.as_object().and_then(|wrapper| wrapper.get(*key)) {
                    next.push(body);
                }
            }
        }
        level = next;
    }

    Ok(level)
}

/// Permissive form of [`lookup_path`]: structural absence yields an empty
/// list, and the matches are cloned out of the source tree.
pub fn extract_path(roots: &[Value], path: &[&str]) -> Vec<Value> {
    match lookup_path(roots, path) {
        Ok(found) => found.into_iter().cloned().collect(),
        Err(e) => {
            tracing::debug!(path = %path.join("/"), "key path not present: {}", e);
            Vec::new()
        }
    }
}

fn children_of<'a>(node: &'a Value, depth: usize, key: &str) -> Result<&'a [Value], PathError> {
    let obj = node.as_object().ok_or_else(|| PathError::NotAnObject {
        depth,
        key: key.to_string(),
    })?;
    let children = obj
        .get("children")
        .ok_or_else(|| PathError::MissingChildren {
            depth,
            key: key.to_string(),
        })?;
    children
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| PathError::ChildrenNotAList {
            depth,
            key: key.to_string(),
        })
}
