//! # buildstamp_core
//!
//! Modification-time resolution for build targets.
//!
//! This crate provides:
//! - Target name classification (`path` vs `archive(member)`)
//! - The `StampCache` memoizing resolver and its invalidation lifecycle
//! - A `FileSystem` seam over the host disk
//! - Configuration loading
//!
//! A target without a resolvable time is reported as `None`, which callers
//! treat as "always rebuild". Malformed archives are additionally recorded
//! as diagnostics.
//!
//! ## Example
//!
//! ```rust,ignore
//! use buildstamp_core::{StampCache, StampConfig};
//!
//! let mut stamps = StampCache::new(StampConfig::default());
//!
//! let built = stamps.timestamp("libutil.a(strings.o)");
//! // ... rebuild libutil.a ...
//! stamps.time_free("libutil.a(strings.o)");
//!
//! // next evaluation pass
//! stamps.time_free_all();
//!
//! let summary = stamps.stamps_done();
//! ```

mod config;
mod error;
pub mod fs;
mod stamps;
pub mod target;

pub use config::StampConfig;
pub use error::StampError;
pub use fs::{FileSystem, HostFileSystem};
pub use stamps::{ArchiveDiagnostic, StampCache, StampStats, TeardownSummary, load_archive};
pub use target::{Target, strip_grist};

pub use buildstamp_archive::{ArchiveError, ArchiveIndex, ArchiveMember};

#[cfg(test)]
pub mod test_utils;
