//! Report formatting and printing utilities.
//!
//! Per-key output follows the order keys complete in; the summary comes last.

use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;

use crate::{
    config::CONFIG_FILE_NAME,
    core::TranslationRecord,
    utils::{single_line, truncate_to_width},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Display width of a context snippet preview.
const SNIPPET_PREVIEW_WIDTH: usize = 72;

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

// ============================================================
// translate
// ============================================================

pub fn print_translate_start(total: usize, found: usize, locale: &str) {
    let _ = writeln!(
        io::stdout().lock(),
        "{} {} {} into {} ({} with usage context)\n",
        "Translating".bold().green(),
        total,
        plural(total, "key", "keys"),
        locale.bold(),
        found
    );
}

/// Print one finished record: every tier's output, then the failure if any.
pub fn print_record(record: &TranslationRecord) {
    print_record_to(record, &mut io::stdout().lock());
}

pub fn print_record_to<W: Write>(record: &TranslationRecord, writer: &mut W) {
    let mark = if record.failure.is_some() {
        FAILURE_MARK.red()
    } else {
        SUCCESS_MARK.green()
    };
    let _ = writeln!(writer, "{} {}", mark, record.key.bold());

    print_field(writer, "text", Some(&record.source_text));
    print_field(writer, "simple", record.simple_translation.as_deref());
    let usage = if record.evidence.found {
        record.evidence.source_file.as_deref().unwrap_or_default()
    } else {
        "not found"
    };
    print_field(writer, "usage", Some(usage));
    if record.evidence.found {
        print_field(writer, "function", record.contextual_translation.as_deref());
        print_field(writer, "context", record.ai_context.as_deref());
        print_field(writer, "final", record.final_translation.as_deref());
    }

    if let Some(failure) = &record.failure {
        let _ = writeln!(
            writer,
            "    {} {}",
            "= error:".bold().red(),
            failure.to_string().red()
        );
    }
    let _ = writeln!(writer);
}

fn print_field<W: Write>(writer: &mut W, label: &str, value: Option<&str>) {
    let Some(value) = value else {
        return;
    };
    let _ = writeln!(writer, "    {} {}", format!("{:<8}", label).dimmed(), value);
}

pub fn print_translate_summary(total: usize, written: usize, failed: usize, output: &Path) {
    print_translate_summary_to(total, written, failed, output, &mut io::stdout().lock());
}

/// `written` counts keys present in the output file, `failed` keys that
/// lost at least one tier.
pub fn print_translate_summary_to<W: Write>(
    total: usize,
    written: usize,
    failed: usize,
    output: &Path,
    writer: &mut W,
) {
    if failed > 0 {
        let _ = writeln!(
            writer,
            "{} {} of {} {} lost a tier to a generation error",
            "warning:".bold().yellow(),
            failed,
            total,
            plural(total, "key", "keys")
        );
    }
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Wrote {} of {} {} to {}",
            written,
            total,
            plural(total, "translation", "translations"),
            output.display()
        )
        .green()
    );
}

// ============================================================
// scan
// ============================================================

/// Print where each key is used, with a one-line snippet preview.
pub fn print_scan(records: &[TranslationRecord]) {
    print_scan_to(records, &mut io::stdout().lock());
}

pub fn print_scan_to<W: Write>(records: &[TranslationRecord], writer: &mut W) {
    for record in records {
        let evidence = &record.evidence;
        if evidence.found {
            let _ = writeln!(
                writer,
                "{} {}  {}",
                SUCCESS_MARK.green(),
                record.key.bold(),
                evidence.source_file.as_deref().unwrap_or_default().cyan()
            );
            let preview = truncate_to_width(
                &single_line(&evidence.context_snippet),
                SNIPPET_PREVIEW_WIDTH,
            );
            let _ = writeln!(writer, "    {}", preview.dimmed());
        } else {
            let _ = writeln!(
                writer,
                "{} {}  {}",
                FAILURE_MARK.yellow(),
                record.key.bold(),
                "not found".dimmed()
            );
        }
    }
}

pub fn print_scan_summary(found: usize, total: usize, files: usize) {
    print_scan_summary_to(found, total, files, &mut io::stdout().lock());
}

pub fn print_scan_summary_to<W: Write>(found: usize, total: usize, files: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "\n{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Found usage for {} of {} {} in {} source {}",
            found,
            total,
            plural(total, "key", "keys"),
            files,
            plural(files, "file", "files")
        )
        .green()
    );
}

// ============================================================
// init
// ============================================================

pub fn print_init_created() {
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );
}
