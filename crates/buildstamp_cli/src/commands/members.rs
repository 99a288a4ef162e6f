//! Members command implementation

use std::path::Path;

use buildstamp_core::{HostFileSystem, StampConfig, StampError, load_archive};
use miette::{IntoDiagnostic, Result};
use tracing::error;

use crate::cli::OutputFormat;
use crate::output::output_members;

pub fn run_members(config: &StampConfig, archive: &Path, format: OutputFormat) -> Result<bool> {
    match load_archive(&HostFileSystem, archive, config) {
        Ok(index) => {
            output_members(archive, &index, format)?;
            Ok(false)
        }
        Err(StampError::Archive(e)) => {
            error!("{}: {}", archive.display(), e);
            Ok(true)
        }
        Err(e) => Err(e).into_diagnostic(),
    }
}
