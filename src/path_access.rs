//! Safe navigation over untyped page state
//!
//! The embedded application state is deeply nested and its shape shifts
//! between locales and site redesigns. Every other module reaches into it
//! through this accessor, so an unexpected shape degrades a single field to
//! its default instead of aborting the run.

use serde_json::Value;

/// A single navigation step into a JSON-like structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step<'a> {
    /// Descend into a mapping by key
    Key(&'a str),
    /// Descend into a sequence by position
    Index(usize),
    /// Scan a sequence for the first mapping whose `field` equals `value`
    /// and descend into it
    Filter { field: &'a str, value: &'a str },
}

/// Walks `steps` from `root` and returns the nested value.
///
/// Any mismatch along the way (missing key, wrong node type, out-of-range
/// index, or a filter without a matching element) short-circuits to `None`;
/// callers substitute their own default.
pub(crate) fn lookup<'v>(root: &'v Value, steps: &[Step<'_>]) -> Option<&'v Value> {
    let mut current = root;
    for step in steps {
        current = match step {
            Step::Key(key) => current.as_object()?.get(*key)?,
            Step::Index(index) => current.as_array()?.get(*index)?,
            Step::Filter { field, value } => current
                .as_array()?
                .iter()
                .find(|item| item.get(*field).and_then(Value::as_str) == Some(*value))?,
        };
    }
    Some(current)
}

/// Looks up a string value, falling back to `default` when the path does not
/// resolve or resolves to a non-string node.
pub(crate) fn lookup_str<'v>(root: &'v Value, steps: &[Step<'_>], default: &'v str) -> &'v str {
    lookup(root, steps)
        .and_then(Value::as_str)
        .unwrap_or(default)
}

/// Looks up a sequence, falling back to an empty slice when the path does
/// not resolve or resolves to a non-sequence node.
pub(crate) fn lookup_array<'v>(root: &'v Value, steps: &[Step<'_>]) -> &'v [Value] {
    lookup(root, steps)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_well_formed_path() {
        let root = json!({
            "children": [
                {"type": "Header", "props": {}},
                {"type": "MainContainer", "props": {"title": "seasons"}}
            ]
        });

        let steps = [
            Step::Key("children"),
            Step::Filter {
                field: "type",
                value: "MainContainer",
            },
            Step::Key("props"),
            Step::Key("title"),
        ];
        assert_eq!(lookup(&root, &steps), Some(&json!("seasons")));
    }

    #[test]
    fn test_lookup_index_step() {
        let root = json!({"items": ["a", "b", "c"]});
        let steps = [Step::Key("items"), Step::Index(1)];
        assert_eq!(lookup(&root, &steps), Some(&json!("b")));
    }

    #[test]
    fn test_lookup_missing_key_returns_none() {
        let root = json!({"meta": {"date": "2021-01-01"}});
        assert_eq!(
            lookup(&root, &[Step::Key("meta"), Step::Key("title")]),
            None
        );
    }

    #[test]
    fn test_lookup_wrong_node_type_returns_none() {
        let root = json!({"meta": {"date": "2021-01-01"}});
        // Index step applied to a mapping
        assert_eq!(lookup(&root, &[Step::Key("meta"), Step::Index(0)]), None);
        // Key step applied to a scalar
        assert_eq!(
            lookup(
                &root,
                &[Step::Key("meta"), Step::Key("date"), Step::Key("year")]
            ),
            None
        );
    }

    #[test]
    fn test_lookup_out_of_range_index_returns_none() {
        let root = json!({"items": ["only"]});
        assert_eq!(lookup(&root, &[Step::Key("items"), Step::Index(5)]), None);
    }

    #[test]
    fn test_filter_returns_first_of_multiple_matches() {
        let root = json!([
            {"type": "LineList", "id": 1},
            {"type": "LineList", "id": 2}
        ]);
        let steps = [
            Step::Filter {
                field: "type",
                value: "LineList",
            },
            Step::Key("id"),
        ];
        assert_eq!(lookup(&root, &steps), Some(&json!(1)));
    }

    #[test]
    fn test_filter_without_match_returns_none() {
        let root = json!([{"type": "Header"}, {"type": "Footer"}]);
        let steps = [Step::Filter {
            field: "type",
            value: "MainContainer",
        }];
        assert_eq!(lookup(&root, &steps), None);
    }

    #[test]
    fn test_filter_on_mapping_returns_none() {
        let root = json!({"type": "MainContainer"});
        let steps = [Step::Filter {
            field: "type",
            value: "MainContainer",
        }];
        assert_eq!(lookup(&root, &steps), None);
    }

    #[test]
    fn test_lookup_str_defaults() {
        let root = json!({"meta": {"subHeader": "Cartman Gets an Anal Probe"}});
        assert_eq!(
            lookup_str(&root, &[Step::Key("meta"), Step::Key("subHeader")], ""),
            "Cartman Gets an Anal Probe"
        );
        assert_eq!(
            lookup_str(&root, &[Step::Key("meta"), Step::Key("header")], ""),
            ""
        );
        // Non-string node degrades to the default as well
        assert_eq!(lookup_str(&root, &[Step::Key("meta")], "fallback"), "fallback");
    }

    #[test]
    fn test_lookup_array_defaults_to_empty() {
        let root = json!({"feed": {"items": [1, 2]}});
        assert_eq!(
            lookup_array(&root, &[Step::Key("feed"), Step::Key("items")]).len(),
            2
        );
        assert!(lookup_array(&root, &[Step::Key("feed"), Step::Key("entries")]).is_empty());
    }
}
