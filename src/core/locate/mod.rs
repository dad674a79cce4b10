//! Key usage location.
//!
//! Parses every scanned source file, finds `t("literal")` calls, qualifies
//! each literal with its enclosing function's name and matches the result
//! exactly against the flattened message paths.

pub mod naming;
pub mod snippet;
pub mod visitor;

use std::{collections::HashMap, fs};

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::{
    OrderedEntry, UsageEvidence, locate::visitor::collect_call_sites,
    parsers::source::SourceParser,
};

pub use snippet::build_snippet;
pub use visitor::CallSite;

/// Resolve usage evidence for every entry.
///
/// The result is aligned with `entries`: `result[i]` is the evidence for
/// `entries[i]`, `found = false` unless a call site matched. Files are read
/// in the order given and a later match overwrites an earlier one for the
/// same key. Any unreadable or unparsable file aborts the whole scan.
pub fn locate(
    entries: &[OrderedEntry],
    files: &[String],
    callee: &str,
) -> Result<Vec<UsageEvidence>> {
    let index: HashMap<&str, usize> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| (entry.path.as_str(), i))
        .collect();

    let mut evidence: Vec<UsageEvidence> = entries
        .iter()
        .map(|entry| UsageEvidence::not_found(&entry.path))
        .collect();

    let parser = SourceParser::new();
    for file_path in files {
        let code = fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read source file: {}", file_path))?;
        let parsed = parser.parse(file_path, code)?;

        for site in collect_call_sites(&parsed, callee) {
            let full_key = site.full_key();
            let Some(&i) = index.get(full_key.as_str()) else {
                debug!(key = %full_key, file = %file_path, "no message entry for call site");
                continue;
            };
            let snippet = build_snippet(&site.function_text, &site.literal, &entries[i].value);
            evidence[i] = UsageEvidence::found(full_key, file_path.clone(), snippet);
        }
    }

    Ok(evidence)
}
