//! JSON output formatter

use std::path::Path;

use buildstamp_core::{ArchiveDiagnostic, ArchiveIndex, StampStats};
use miette::{IntoDiagnostic, Result};

use super::{StampResult, epoch_seconds};

pub fn output_stamps_json(
    results: &[StampResult],
    diagnostics: &[ArchiveDiagnostic],
    stats: Option<StampStats>,
) -> Result<()> {
    let targets: Vec<_> = results
        .iter()
        .map(|r| {
            serde_json::json!({
                "target": r.target,
                "mtime": r.modified.map(epoch_seconds),
            })
        })
        .collect();

    let diagnostics: Vec<_> = diagnostics
        .iter()
        .map(|d| {
            serde_json::json!({
                "archive": d.archive,
                "error": d.error.to_string(),
            })
        })
        .collect();

    let mut output = serde_json::json!({
        "targets": targets,
        "diagnostics": diagnostics,
    });
    if let Some(stats) = stats {
        output["stats"] = serde_json::to_value(stats).into_diagnostic()?;
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&output).into_diagnostic()?
    );
    Ok(())
}

pub fn output_members_json(archive: &Path, index: &ArchiveIndex) -> Result<()> {
    let members: Vec<_> = index
        .members()
        .iter()
        .map(|m| {
            serde_json::json!({
                "name": m.name,
                "mtime": epoch_seconds(m.modified),
                "size": m.size,
                "offset": m.offset,
            })
        })
        .collect();

    let output = serde_json::json!({
        "archive": archive.display().to_string(),
        "thin": index.is_thin(),
        "members": members,
    });

    println!(
        "{}",
        serde_json::to_string_pretty(&output).into_diagnostic()?
    );
    Ok(())
}
