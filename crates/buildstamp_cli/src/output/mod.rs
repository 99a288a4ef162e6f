//! Output formatting module

mod json;
mod text;

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use buildstamp_core::{ArchiveDiagnostic, ArchiveIndex, StampStats};
use miette::Result;

use crate::cli::OutputFormat;

/// The resolved time of one queried target.
pub struct StampResult {
    pub target: String,
    pub modified: Option<SystemTime>,
}

pub fn output_stamps(
    results: &[StampResult],
    diagnostics: &[ArchiveDiagnostic],
    stats: Option<StampStats>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => json::output_stamps_json(results, diagnostics, stats)?,
        OutputFormat::Text => text::output_stamps_text(results, stats),
    }
    Ok(())
}

pub fn output_members(archive: &Path, index: &ArchiveIndex, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => json::output_members_json(archive, index)?,
        OutputFormat::Text => text::output_members_text(index),
    }
    Ok(())
}

/// Whole seconds relative to the Unix epoch; negative before it.
pub(crate) fn epoch_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => after.as_secs() as i64,
        Err(before) => -(before.duration().as_secs() as i64),
    }
}
