//! Depth-first key search over arbitrary JSON trees.
//!
//! The controller export nests the same object classes at unpredictable
//! depths, so the harvester locates each root key by searching the whole
//! document rather than following a fixed path.

use serde_json::{map, Value};

/// Pending work for the search: the remaining entries of an object or the
/// remaining elements of an array.
enum Frame<'a> {
    Object(map::Iter<'a>),
    Array(std::slice::Iter<'a, Value>),
}

/// Lazy iterator over every value bound to a key, see [`find_key`].
pub struct FindKey<'a> {
    key: &'a str,
    stack: Vec<Frame<'a>>,
}

impl<'a> Iterator for FindKey<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let descend = match frame {
                Frame::Object(entries) => match entries.next() {
                    Some((k, v)) if k == self.key => return Some(v),
                    Some((_, v)) => frame_for(v),
                    None => {
                        self.stack.pop();
                        None
                    }
                },
                Frame::Array(elements) => match elements.next() {
                    // Only objects inside arrays are searched; nested arrays
                    // and scalars are skipped.
                    Some(Value::Object(obj)) => Some(Frame::Object(obj.iter())),
                    Some(_) => None,
                    None => {
                        self.stack.pop();
                        None
                    }
                },
            };
            if let Some(frame) = descend {
                self.stack.push(frame);
            }
        }
    }
}

fn frame_for(value: &Value) -> Option<Frame<'_>> {
    match value {
        Value::Object(obj) => Some(Frame::Object(obj.iter())),
        Value::Array(arr) => Some(Frame::Array(arr.iter())),
        _ => None,
    }
}

/// Find every value bound to `key` anywhere inside `root`.
///
/// Matches are produced depth-first in document order: a parent's match
/// comes before anything nested below it, and siblings follow the order in
/// which they appear. A matched value is yielded as a whole and not searched
/// any further. Scalars (and empty containers) produce no matches.
///
/// The search keeps an explicit stack, so nesting depth is bounded only by
/// memory.
pub fn find_key<'a>(key: &'a str, root: &'a Value) -> FindKey<'a> {
    FindKey {
        key,
        stack: frame_for(root).into_iter().collect(),
    }
}
