//! Nested-path projection into JSON trees
//!
//! Writes a value into a nested object structure addressed by a delimited
//! path string, creating intermediate objects along the way. Used to
//! materialize flat store keys (`folders/log`, `folders/data`) into a
//! nested export structure.

use serde_json::{Map, Value as Json};

/// Default path delimiter.
pub const DELIMITER: char = '/';

/// Set `value` at `path` inside `tree`, splitting `path` on `delimiter`.
///
/// Intermediate containers are created as needed; an intermediate that
/// exists but is not an object is replaced by a fresh object, as is a
/// non-object root. Returns the value previously at the final location,
/// or `None` when there was none.
pub fn set_nested(tree: &mut Json, path: &str, value: Json, delimiter: char) -> Option<Json> {
    let segments: Vec<&str> = path.split(delimiter).collect();
    // split always yields at least one segment
    let (last, parents) = segments.split_last()?;

    let mut node = tree;
    for segment in parents {
        let map = ensure_object(node);
        node = map
            .entry(segment.to_string())
            .or_insert_with(|| Json::Object(Map::new()));
    }
    ensure_object(node).insert(last.to_string(), value)
}

/// Coerce `node` into an object, replacing any other kind in place.
fn ensure_object(node: &mut Json) -> &mut Map<String, Json> {
    if !node.is_object() {
        *node = Json::Object(Map::new());
    }
    match node {
        Json::Object(map) => map,
        _ => unreachable!(), // just coerced above
    }
}
