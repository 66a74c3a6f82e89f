//! Shallow merge of state patches into a job's free-form state map.

use crate::types::StateMap;

/// Merge `patch` into `current`, key by key.
///
/// Every key present in `patch` overwrites the value in `current` wholesale.
/// Nested objects are replaced, never merged recursively. Keys absent from
/// `patch` are left as they are.
pub fn merge_state(current: &mut StateMap, patch: StateMap) {
    for (key, value) in patch {
        current.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn map(value: serde_json::Value) -> StateMap {
        match value {
            serde_json::Value::Object(m) => m,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn disjoint_patches_accumulate() {
        let mut state = StateMap::new();
        merge_state(&mut state, map(json!({"a": 1})));
        merge_state(&mut state, map(json!({"b": 2})));
        assert_eq!(serde_json::Value::Object(state), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn nested_objects_are_replaced_not_merged() {
        let mut state = StateMap::new();
        merge_state(&mut state, map(json!({"a": {"x": 1}})));
        merge_state(&mut state, map(json!({"a": {"y": 2}})));
        assert_eq!(serde_json::Value::Object(state), json!({"a": {"y": 2}}));
    }

    #[test]
    fn untouched_keys_survive() {
        let mut state = map(json!({"keep": "me", "swap": [1, 2]}));
        merge_state(&mut state, map(json!({"swap": null})));
        assert_eq!(
            serde_json::Value::Object(state),
            json!({"keep": "me", "swap": null})
        );
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut state = map(json!({"a": true}));
        merge_state(&mut state, StateMap::new());
        assert_eq!(serde_json::Value::Object(state), json!({"a": true}));
    }
}
