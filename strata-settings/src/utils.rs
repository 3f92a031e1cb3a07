//! Serde helpers for settings documents

use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use std::collections::BTreeMap;

/// Render a YAML value as setting text.
///
/// Strings are kept verbatim, numbers and booleans use their plain text form,
/// null becomes the empty string, and sequences or mappings are written as
/// compact JSON (so `[[1, 200], [2, 210]]` becomes `[[1,200],[2,210]]`).
pub fn value_to_setting_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => value_to_setting_text(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => {
            serde_json::to_string(value).unwrap_or_default()
        }
    }
}

/// Serde helper for a `key → text` map accepting any scalar YAML values
pub mod serde_setting_map {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .map(|(key, value)| (key, value_to_setting_text(&value)))
            .collect())
    }
}

/// Serde helper for a list of `key → text` maps
pub mod serde_setting_map_list {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<BTreeMap<String, String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Vec::<BTreeMap<String, Value>>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .map(|scope| {
                scope
                    .into_iter()
                    .map(|(key, value)| (key, value_to_setting_text(&value)))
                    .collect()
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars_to_text() {
        let value: Value = serde_yaml::from_str("0.1").unwrap();
        assert_eq!(value_to_setting_text(&value), "0.1");
        let value: Value = serde_yaml::from_str("true").unwrap();
        assert_eq!(value_to_setting_text(&value), "true");
        let value: Value = serde_yaml::from_str("~").unwrap();
        assert_eq!(value_to_setting_text(&value), "");
        let value: Value = serde_yaml::from_str("'limited'").unwrap();
        assert_eq!(value_to_setting_text(&value), "limited");
    }

    #[test]
    fn test_sequences_become_compact_json() {
        let value: Value = serde_yaml::from_str("[[1, 200], [2.5, 210]]").unwrap();
        assert_eq!(value_to_setting_text(&value), "[[1,200],[2.5,210]]");
    }
}
