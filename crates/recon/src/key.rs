//! Answer-key loading: JSON list of entries → per-item accepted values/labels.

use std::collections::BTreeSet;
use std::path::Path;

use serde_json::Value;

use crate::error::CheckError;
use crate::model::{Acceptance, AnswerKey};

/// Read and parse the answer key at `path`, keeping only `scale` entries.
pub fn load_answer_key(path: &Path, scale: &str) -> Result<AnswerKey, CheckError> {
    if !path.exists() {
        return Err(CheckError::KeyMissing { path: path.to_path_buf() });
    }
    let data = std::fs::read_to_string(path)
        .map_err(|e| CheckError::Io(format!("{}: {e}", path.display())))?;
    parse_answer_key(&data, scale)
}

/// Parse a JSON array of key entries. Only entries whose `scale` equals
/// `scale` are inspected; every other field of the rest is ignored.
pub fn parse_answer_key(json: &str, scale: &str) -> Result<AnswerKey, CheckError> {
    let entries: Vec<Value> =
        serde_json::from_str(json).map_err(|e| CheckError::KeyParse(e.to_string()))?;

    let mut key = AnswerKey::default();
    for (idx, entry) in entries.iter().enumerate() {
        if entry.get("scale").and_then(Value::as_str) != Some(scale) {
            continue;
        }
        let item = match entry.get("item") {
            Some(Value::String(s)) => s.clone(),
            None | Some(Value::Null) => {
                tracing::debug!(entry = idx, "answer key entry has no item; skipped");
                continue;
            }
            Some(other) => {
                return Err(CheckError::KeyParse(format!(
                    "entry {idx}: item must be a string, got {other}"
                )));
            }
        };

        let values = scalar_set(entry.get("accept_value"), &item, "accept_value")?;
        let labels = scalar_set(entry.get("accept_label"), &item, "accept_label")?
            .into_iter()
            .map(|l| l.to_lowercase())
            .collect();

        if key.insert(item.clone(), Acceptance::new(values, labels)).is_some() {
            tracing::warn!(item = %item, "duplicate answer key item; later entry wins");
        }
    }

    tracing::debug!(scale, items = key.len(), "answer key loaded");
    tracing::trace!(items = ?key.items().collect::<Vec<_>>(), "answer key items");
    Ok(key)
}

/// Stringify a list of scalars, dropping nulls and empty strings. An absent
/// or null list reads as empty.
fn scalar_set(
    field_value: Option<&Value>,
    item: &str,
    field: &str,
) -> Result<BTreeSet<String>, CheckError> {
    let values = match field_value {
        None | Some(Value::Null) => return Ok(BTreeSet::new()),
        Some(Value::Array(values)) => values,
        Some(_) => {
            return Err(CheckError::KeyParse(format!("item '{item}': {field} must be a list")));
        }
    };

    let mut out = BTreeSet::new();
    for value in values {
        let text = match value {
            // Dropped rather than stringified, so no "none" label appears
            Value::Null => continue,
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(CheckError::KeyParse(format!(
                    "item '{item}': non-scalar value in {field}"
                )));
            }
        };
        if !text.is_empty() {
            out.insert(text);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = r#"[
        {"scale": "CRT", "item": "CRT_1_1", "accept_value": [5, "0.05", ""], "accept_label": ["Five cents", ""]},
        {"scale": "CRT", "item": "CRT_2", "accept_value": [4.0]},
        {"scale": "NFC", "item": "NFC_1", "accept_value": [1]},
        {"item": "CRT_9", "accept_value": [9]},
        {"scale": "CRT", "accept_value": [3]},
        {"scale": "CRT", "item": "CRT_3", "accept_label": ["Emily", null, true]}
    ]"#;

    #[test]
    fn filters_by_scale() {
        let key = parse_answer_key(KEY, "CRT").unwrap();
        let items: Vec<&str> = key.items().collect();
        assert_eq!(items, vec!["CRT_1_1", "CRT_2", "CRT_3"]);
        assert!(key.get("NFC_1").is_none());
        // Entries without a scale tag never match
        assert!(key.get("CRT_9").is_none());
    }

    #[test]
    fn values_are_stringified_and_empties_dropped() {
        let key = parse_answer_key(KEY, "CRT").unwrap();
        let acc = key.get("CRT_1_1").unwrap();
        let values: Vec<&str> = acc.values.iter().map(String::as_str).collect();
        assert_eq!(values, vec!["0.05", "5"]);
        assert_eq!(key.get("CRT_2").unwrap().values.iter().next().unwrap(), "4.0");
    }

    #[test]
    fn labels_are_lowercased() {
        let key = parse_answer_key(KEY, "CRT").unwrap();
        let acc = key.get("CRT_1_1").unwrap();
        assert!(acc.labels.contains("five cents"));
        assert_eq!(acc.labels.len(), 1);
        assert!(!acc.values.is_empty());

        let acc = key.get("CRT_3").unwrap();
        let labels: Vec<&str> = acc.labels.iter().map(String::as_str).collect();
        assert_eq!(labels, vec!["emily", "true"]);
    }

    #[test]
    fn other_scale_entries_are_not_inspected() {
        let json = r#"[
            {"scale": "CRT", "item": "CRT_1", "accept_value": [4]},
            {"scale": 7, "item": "X_1", "accept_value": [1]},
            {"scale": "NFC", "item": 12, "accept_value": null, "accept_label": "oops"},
            {"scale": "NFC", "item": "NFC_2", "accept_value": [[1, 2]]},
            "not an object"
        ]"#;
        let key = parse_answer_key(json, "CRT").unwrap();
        let items: Vec<&str> = key.items().collect();
        assert_eq!(items, vec!["CRT_1"]);
    }

    #[test]
    fn null_accept_lists_read_as_empty() {
        let json = r#"[{"scale": "CRT", "item": "CRT_1", "accept_value": null, "accept_label": ["Yes"]}]"#;
        let key = parse_answer_key(json, "CRT").unwrap();
        let acc = key.get("CRT_1").unwrap();
        assert!(acc.values.is_empty());
        assert!(acc.labels.contains("yes"));
    }

    #[test]
    fn null_scalar_is_not_a_none_label() {
        let json = r#"[{"scale": "CRT", "item": "CRT_1", "accept_label": [null, "Yes"]}]"#;
        let key = parse_answer_key(json, "CRT").unwrap();
        let labels: Vec<&str> = key.get("CRT_1").unwrap().labels.iter().map(String::as_str).collect();
        assert_eq!(labels, vec!["yes"]);
    }

    #[test]
    fn reject_malformed_target_entry() {
        let json = r#"[{"scale": "CRT", "item": "CRT_1", "accept_value": 4}]"#;
        let err = parse_answer_key(json, "CRT").unwrap_err();
        assert!(err.to_string().contains("accept_value must be a list"));

        let json = r#"[{"scale": "CRT", "item": 3, "accept_value": [4]}]"#;
        let err = parse_answer_key(json, "CRT").unwrap_err();
        assert!(matches!(err, CheckError::KeyParse(_)));
    }

    #[test]
    fn other_scale_selects_other_entries() {
        let key = parse_answer_key(KEY, "NFC").unwrap();
        assert_eq!(key.len(), 1);
        assert!(key.get("NFC_1").is_some());
    }

    #[test]
    fn later_duplicate_wins() {
        let json = r#"[
            {"scale": "CRT", "item": "CRT_1", "accept_value": [1]},
            {"scale": "CRT", "item": "CRT_1", "accept_value": [2]}
        ]"#;
        let key = parse_answer_key(json, "CRT").unwrap();
        assert_eq!(key.len(), 1);
        let values: Vec<&str> = key.get("CRT_1").unwrap().values.iter().map(String::as_str).collect();
        assert_eq!(values, vec!["2"]);
    }

    #[test]
    fn reject_non_scalar_value() {
        let json = r#"[{"scale": "CRT", "item": "CRT_1", "accept_value": [[1, 2]]}]"#;
        let err = parse_answer_key(json, "CRT").unwrap_err();
        assert!(err.to_string().contains("non-scalar"));
    }

    #[test]
    fn reject_non_array_document() {
        let err = parse_answer_key(r#"{"scale": "CRT"}"#, "CRT").unwrap_err();
        assert!(matches!(err, CheckError::KeyParse(_)));
    }

    #[test]
    fn missing_file_is_key_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data/hb_crt_answer_key.json");
        let err = load_answer_key(&path, "CRT").unwrap_err();
        match err {
            CheckError::KeyMissing { path: p } => assert_eq!(p, path),
            other => panic!("expected KeyMissing, got {other:?}"),
        }
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.json");
        std::fs::write(&path, KEY).unwrap();
        let key = load_answer_key(&path, "CRT").unwrap();
        assert_eq!(key.len(), 3);
    }
}
