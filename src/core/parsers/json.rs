use std::{collections::HashSet, fs, path::Path};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

use crate::core::OrderedEntry;

/// Read a message file and flatten it into ordered entries.
pub fn load_messages(path: &Path) -> Result<Vec<OrderedEntry>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {:?}", path))?;

    let json: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file: {:?}", path))?;

    flatten(&json).with_context(|| format!("Invalid message file: {:?}", path))
}

/// Flatten a nested message document into dot-joined leaf entries.
///
/// Object members are visited depth-first in their textual order (serde_json is
/// built with `preserve_order`), so the output order equals the declaration
/// order of the leaves. Only objects nest; arrays and other scalars are leaves
/// and are stored as their JSON text. Empty objects contribute nothing.
///
/// Fails if the root is not an object, if two leaves flatten to the same
/// path (e.g. a literal `"a.b"` member beside `"a": {"b": ...}`), or if one
/// leaf path is a parent of another (`"a"` beside `"a.b"`): neither could be
/// rebuilt into a nested document without losing a leaf.
pub fn flatten(doc: &Value) -> Result<Vec<OrderedEntry>> {
    if !doc.is_object() {
        bail!("Expected a JSON object at the root of the message file");
    }

    let mut entries = Vec::new();
    let mut seen = HashSet::new();
    flatten_json(doc, String::new(), &mut seen, &mut entries)?;
    check_nested_leaves(&entries, &seen)?;
    Ok(entries)
}

fn check_nested_leaves(entries: &[OrderedEntry], leaves: &HashSet<String>) -> Result<()> {
    for entry in entries {
        for (i, _) in entry.path.match_indices('.') {
            let parent = &entry.path[..i];
            if leaves.contains(parent) {
                bail!(
                    "Key path \"{}\" is both a message and the parent of \"{}\"",
                    parent,
                    entry.path
                );
            }
        }
    }
    Ok(())
}

fn flatten_json(
    value: &Value,
    prefix: String,
    seen: &mut HashSet<String>,
    result: &mut Vec<OrderedEntry>,
) -> Result<()> {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let new_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_json(val, new_prefix, seen, result)?;
            }
        }
        leaf => {
            if !seen.insert(prefix.clone()) {
                bail!("Duplicate key path after flattening: \"{}\"", prefix);
            }
            let text = match leaf {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            result.push(OrderedEntry::new(prefix, text));
        }
    }
    Ok(())
}

/// Rebuild a nested document from `(path, value)` pairs.
///
/// Each path is split on `.`; intermediate objects are created on first use
/// and members keep the order in which paths are first seen. A later path that
/// needs an object where a leaf already sits replaces that leaf.
pub fn unflatten<'a, I>(entries: I) -> Value
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut root = Map::new();
    for (path, value) in entries {
        insert_path(&mut root, path, value);
    }
    Value::Object(root)
}

fn insert_path(map: &mut Map<String, Value>, path: &str, value: &str) {
    match path.split_once('.') {
        None => {
            map.insert(path.to_string(), Value::String(value.to_string()));
        }
        Some((head, rest)) => {
            let child = map
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            if let Value::Object(child_map) = child {
                insert_path(child_map, rest, value);
            }
        }
    }
}
