//! Result aggregation and output files.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::core::{TranslationRecord, parsers::json::unflatten};

/// Pick one translation per key.
///
/// Each record decides for itself (final > contextual > simple); records
/// without any translation are omitted. Output follows record order, which
/// the engine keeps equal to flattening order, so completion order never
/// matters.
pub fn aggregate(records: &[TranslationRecord]) -> Vec<(&str, &str)> {
    records
        .iter()
        .filter_map(|record| {
            record
                .preferred_translation()
                .map(|text| (record.key.as_str(), text))
        })
        .collect()
}

/// Aggregate and rebuild the nested dictionary.
pub fn to_nested_json(records: &[TranslationRecord]) -> Value {
    unflatten(aggregate(records))
}

/// Write the translated dictionary.
pub fn write_translations(path: &Path, records: &[TranslationRecord]) -> Result<()> {
    write_pretty(path, &to_nested_json(records))
}

/// Write the per-key audit trail: evidence plus every tier's output.
pub fn write_evidence(path: &Path, records: &[TranslationRecord]) -> Result<()> {
    write_pretty(path, records)
}

/// Save with 2-space indentation and a trailing newline.
fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let content = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;

    fs::write(path, format!("{}\n", content))
        .with_context(|| format!("Failed to write file: {}", path.display()))
}
