//! Query command implementation

use buildstamp_core::{StampCache, StampConfig};
use miette::Result;
use tracing::debug;

use crate::cli::OutputFormat;
use crate::output::{StampResult, output_stamps};

pub fn run_query(
    config: StampConfig,
    targets: &[String],
    format: OutputFormat,
    stats: bool,
    fail_on_unknown: bool,
) -> Result<bool> {
    let mut stamps = StampCache::new(config);

    let results: Vec<StampResult> = targets
        .iter()
        .map(|target| StampResult {
            target: target.clone(),
            modified: stamps.timestamp(target),
        })
        .collect();

    let diagnostics = stamps.take_diagnostics();
    let cache_stats = stats.then(|| stamps.stats());
    let summary = stamps.stamps_done();
    debug!("Cache released: {:?}", summary);

    output_stamps(&results, &diagnostics, cache_stats, format)?;

    let has_unknown = results.iter().any(|r| r.modified.is_none());
    Ok(fail_on_unknown && has_unknown)
}
