//! Field-level diffing of JSON snapshots, used to compare page revisions.
//!
//! Both sides are flattened into `path -> leaf value` maps (`content.items[0].question`)
//! and compared key by key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The status of an item in a diff comparison.
///
/// - `Added`     -- present only in the new side.
/// - `Removed`   -- present only in the old side.
/// - `Changed`   -- present in both sides with different values.
/// - `Unchanged` -- present in both sides with identical values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStatus {
    Added,
    Removed,
    Changed,
    Unchanged,
}

impl DiffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Changed => "changed",
            Self::Unchanged => "unchanged",
        }
    }
}

impl std::fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One leaf path in a diff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDiff {
    pub path: String,
    pub status: DiffStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new: Option<Value>,
}

/// Flatten a JSON value into leaf paths.
///
/// Objects contribute `parent.key`, arrays `parent[i]`. Empty objects and
/// arrays are kept as leaves so that clearing a list shows up in a diff.
pub fn flatten_json(value: &Value) -> BTreeMap<String, Value> {
    let mut out = BTreeMap::new();
    flatten_into(value, String::new(), &mut out);
    out
}

fn flatten_into(value: &Value, path: String, out: &mut BTreeMap<String, Value>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                flatten_into(child, child_path, out);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (i, child) in items.iter().enumerate() {
                flatten_into(child, format!("{path}[{i}]"), out);
            }
        }
        leaf => {
            out.insert(path, leaf.clone());
        }
    }
}

/// Compare two JSON snapshots field by field.
///
/// Entries are ordered by path. `Unchanged` entries are included only when
/// `include_unchanged` is set.
pub fn compute_field_diff(old: &Value, new: &Value, include_unchanged: bool) -> Vec<FieldDiff> {
    let old_flat = flatten_json(old);
    let mut new_flat = flatten_json(new);
    let mut result = Vec::new();

    for (path, old_value) in old_flat {
        match new_flat.remove(&path) {
            Some(new_value) if new_value == old_value => {
                if include_unchanged {
                    result.push(FieldDiff {
                        path,
                        status: DiffStatus::Unchanged,
                        old: Some(old_value),
                        new: Some(new_value),
                    });
                }
            }
            Some(new_value) => result.push(FieldDiff {
                path,
                status: DiffStatus::Changed,
                old: Some(old_value),
                new: Some(new_value),
            }),
            None => result.push(FieldDiff {
                path,
                status: DiffStatus::Removed,
                old: Some(old_value),
                new: None,
            }),
        }
    }

    result.extend(new_flat.into_iter().map(|(path, new_value)| FieldDiff {
        path,
        status: DiffStatus::Added,
        old: None,
        new: Some(new_value),
    }));
    result.sort_by(|a, b| a.path.cmp(&b.path));
    result
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn flatten_uses_dotted_and_indexed_paths() {
        let flat = flatten_json(&json!({
            "title": "About",
            "content": { "items": [{ "q": "a" }, { "q": "b" }] },
            "tags": []
        }));
        assert_eq!(flat["title"], json!("About"));
        assert_eq!(flat["content.items[1].q"], json!("b"));
        assert_eq!(flat["tags"], json!([]));
        assert_eq!(flat.len(), 4);
    }

    #[test]
    fn diff_reports_each_status() {
        let old = json!({ "title": "Old", "meta": "same", "gone": 1 });
        let new = json!({ "title": "New", "meta": "same", "fresh": true });

        let diff = compute_field_diff(&old, &new, true);
        let statuses: Vec<_> = diff.iter().map(|d| (d.path.as_str(), d.status)).collect();
        assert_eq!(
            statuses,
            vec![
                ("fresh", DiffStatus::Added),
                ("gone", DiffStatus::Removed),
                ("meta", DiffStatus::Unchanged),
                ("title", DiffStatus::Changed),
            ]
        );
    }

    #[test]
    fn unchanged_entries_are_omitted_by_default() {
        let value = json!({ "a": 1, "b": [1, 2] });
        assert!(compute_field_diff(&value, &value, false).is_empty());
    }

    #[test]
    fn shrinking_an_array_removes_trailing_paths() {
        let old = json!({ "items": ["a", "b", "c"] });
        let new = json!({ "items": ["a"] });
        let diff = compute_field_diff(&old, &new, false);
        assert_eq!(diff.len(), 2);
        assert!(diff.iter().all(|d| d.status == DiffStatus::Removed));
    }

    #[test]
    fn status_display_matches_serde() {
        assert_eq!(DiffStatus::Changed.to_string(), "changed");
        assert_eq!(
            serde_json::to_string(&DiffStatus::Added).unwrap(),
            "\"added\""
        );
    }
}
