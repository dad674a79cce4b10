use anyhow::Result;

use super::super::{
    args::ScanCommand,
    exit_status::ExitStatus,
    report::{print_scan, print_scan_summary},
};
use crate::core::{TranslateContext, aggregate::write_evidence};

/// Locate every key's usage and report it, without calling the service.
pub fn scan(cmd: ScanCommand) -> Result<ExitStatus> {
    let ctx = TranslateContext::new(&cmd.common)?;

    print_scan(&ctx.records);
    if let Some(path) = ctx.evidence_path() {
        write_evidence(&path, &ctx.records)?;
    }
    print_scan_summary(ctx.found_count(), ctx.records.len(), ctx.files.len());

    Ok(ExitStatus::Success)
}
