//! Change detection against the load-time snapshot
//!
//! Stateless comparisons over the store's live mapping and its snapshot.
//! Invoked on demand only; nothing in the store calls these automatically.

use crate::store::EntryMap;

/// Whether `live` differs from `snapshot`: order-independent, deep
/// equality over the value trees.
pub fn is_changed(live: &EntryMap, snapshot: &EntryMap) -> bool {
    // IndexMap equality compares entries regardless of order
    live != snapshot
}

/// Whether the value under `key` differs between `live` and `snapshot`.
///
/// Returns false when the key is absent on either side, or when the two
/// values have different kinds. The kind short-circuit is deliberate
/// historical behavior: a type change (Integer 5 replaced by String "5")
/// is not reported as a value change. Callers wanting to catch type
/// changes must compare kinds themselves.
pub fn is_value_changed(live: &EntryMap, snapshot: &EntryMap, key: &str) -> bool {
    match (live.get(key), snapshot.get(key)) {
        (Some(a), Some(b)) if a.kind() == b.kind() => a != b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use serde_json::json;

    fn map(entries: &[(&str, Value)]) -> EntryMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_identical_maps_are_unchanged() {
        let a = map(&[("x", Value::Integer(1)), ("y", Value::from("s"))]);
        let b = a.clone();
        assert!(!is_changed(&a, &b));
    }

    #[test]
    fn test_equality_ignores_entry_order() {
        let a = map(&[("x", Value::Integer(1)), ("y", Value::Integer(2))]);
        let b = map(&[("y", Value::Integer(2)), ("x", Value::Integer(1))]);
        assert!(!is_changed(&a, &b));
    }

    #[test]
    fn test_deep_structural_difference_is_detected() {
        let a = map(&[("t", Value::Structured(json!({"a": [1, 2]})))]);
        let b = map(&[("t", Value::Structured(json!({"a": [1, 3]})))]);
        assert!(is_changed(&a, &b));
    }

    #[test]
    fn test_added_and_removed_keys_are_changes() {
        let a = map(&[("x", Value::Integer(1))]);
        let b = map(&[]);
        assert!(is_changed(&a, &b));
        assert!(is_changed(&b, &a));
    }

    #[test]
    fn test_value_changed_same_kind() {
        let live = map(&[("k", Value::Integer(2))]);
        let snap = map(&[("k", Value::Integer(1))]);
        assert!(is_value_changed(&live, &snap, "k"));

        let same = map(&[("k", Value::Integer(2))]);
        assert!(!is_value_changed(&live, &same, "k"));
    }

    #[test]
    fn test_value_changed_kind_mismatch_reports_false() {
        // Integer 5 vs String "5": different kinds, so *not* a value
        // change. This pins the historical short-circuit.
        let live = map(&[("k", Value::Integer(5))]);
        let snap = map(&[("k", Value::from("5"))]);
        assert!(!is_value_changed(&live, &snap, "k"));
    }

    #[test]
    fn test_value_changed_absent_key_reports_false() {
        let live = map(&[("k", Value::Integer(1))]);
        let empty = map(&[]);
        assert!(!is_value_changed(&live, &empty, "k"));
        assert!(!is_value_changed(&empty, &live, "k"));
        assert!(!is_value_changed(&empty, &empty, "k"));
    }
}
