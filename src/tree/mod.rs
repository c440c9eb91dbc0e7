//! Generic traversal over the controller's JSON object trees.
//!
//! - `search` - find a key at any depth of a document
//! - `path` - walk an ordered key path through `children` lists

mod path;
mod search;

pub use path::{extract_path, lookup_path, PathError};
pub use search::{find_key, FindKey};
