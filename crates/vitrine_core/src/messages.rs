use crate::format::convert_message;
use std::collections::BTreeMap;

/// Message key to message template.
pub type MessageBundle = BTreeMap<String, String>;

/// Overlays `overrides` onto `base`. An override replaces the whole value of its key.
pub fn merge_overrides(mut base: MessageBundle, overrides: MessageBundle) -> MessageBundle {
    base.extend(overrides);
    base
}

/// Converts every value with [`convert_message`], keeping the key set intact.
pub fn convert_bundle(bundle: &MessageBundle) -> MessageBundle {
    bundle
        .iter()
        .map(|(key, value)| (key.clone(), convert_message(value)))
        .collect()
}

/// Serializes a converted bundle as a flat JSON object.
///
/// An empty bundle serializes to the empty string rather than `{}`.
pub fn bundle_to_json(bundle: &MessageBundle) -> String {
    if bundle.is_empty() {
        return String::new();
    }
    serde_json::to_string(bundle).expect("a map of strings always serializes to JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(entries: &[(&str, &str)]) -> MessageBundle {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn overrides_replace_whole_values() {
        let merged = merge_overrides(
            bundle(&[("a", "X"), ("b", "Y")]),
            bundle(&[("a", "Z")]),
        );
        assert_eq!(merged, bundle(&[("a", "Z"), ("b", "Y")]));
    }

    #[test]
    fn overrides_may_add_keys() {
        let merged = merge_overrides(bundle(&[("a", "X")]), bundle(&[("c", "W")]));
        assert_eq!(merged, bundle(&[("a", "X"), ("c", "W")]));
    }

    #[test]
    fn conversion_keeps_the_key_set() {
        let raw = bundle(&[("greeting", "Hi {0}"), ("plain", "ok"), ("quote", "Don''t")]);
        let converted = convert_bundle(&raw);

        assert!(converted.keys().eq(raw.keys()));
        assert_eq!(converted["greeting"], "Hi {{param_0}}");
        assert_eq!(converted["quote"], "Don't");
    }

    #[test]
    fn empty_bundle_serializes_to_empty_string() {
        assert_eq!(bundle_to_json(&MessageBundle::new()), "");
    }

    #[test]
    fn serializes_flat_object() {
        let json = bundle_to_json(&bundle(&[("a", "Z"), ("b", "{{param_0}}")]));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, serde_json::json!({ "a": "Z", "b": "{{param_0}}" }));
    }
}
