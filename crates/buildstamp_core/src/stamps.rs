//! Timestamp cache for build targets.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use buildstamp_archive::{ArchiveError, ArchiveIndex, parse_with};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::StampError;
use crate::config::StampConfig;
use crate::fs::{FileSystem, HostFileSystem};
use crate::target::{Target, strip_grist};

/// A malformed or unreadable archive seen while resolving members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveDiagnostic {
    /// Archive path as written in the target name.
    pub archive: String,
    /// Why the archive yielded no members.
    pub error: ArchiveError,
}

impl fmt::Display for ArchiveDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.archive, self.error)
    }
}

/// Counters describing how queries were served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StampStats {
    /// Queries answered from the cache.
    pub hits: u64,
    /// Queries that had to be resolved.
    pub misses: u64,
    /// Plain-file stats issued.
    pub stat_calls: u64,
    /// Archive reads issued.
    pub archive_scans: u64,
}

/// What [`StampCache::stamps_done`] released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TeardownSummary {
    /// Memoized target entries.
    pub entries: usize,
    /// Archive indexes.
    pub archives: usize,
    /// Member records held by those indexes.
    pub members: usize,
}

/// An archive index plus the member targets answered from it.
#[derive(Debug)]
struct CachedArchive {
    index: ArchiveIndex,
    served: Vec<String>,
}

/// Memoizing resolver from target names to modification times.
///
/// One cache is created per build engine, passed by `&mut` to whatever
/// evaluates targets, and consumed by [`StampCache::stamps_done`] at
/// shutdown. It is not synchronized; hosts evaluating targets on several
/// threads must serialize access.
///
/// # Example
///
/// ```rust,ignore
/// use buildstamp_core::{StampCache, StampConfig};
///
/// let mut stamps = StampCache::new(StampConfig::default());
/// let object = stamps.timestamp("libfoo.a(foo.o)");
/// let source = stamps.timestamp("foo.c");
/// let stale = match (object, source) {
///     (Some(object), Some(source)) => object < source,
///     _ => true,
/// };
/// ```
pub struct StampCache<F: FileSystem = HostFileSystem> {
    fs: F,
    config: StampConfig,
    /// Resolved times keyed by the exact target name.
    entries: HashMap<String, Option<SystemTime>>,
    /// Member directories keyed by archive path.
    archives: HashMap<String, CachedArchive>,
    diagnostics: Vec<ArchiveDiagnostic>,
    stats: StampStats,
}

impl StampCache<HostFileSystem> {
    /// Creates a cache that reads the local disk.
    pub fn new(config: StampConfig) -> Self {
        Self::with_file_system(HostFileSystem, config)
    }
}

impl Default for StampCache<HostFileSystem> {
    fn default() -> Self {
        Self::new(StampConfig::default())
    }
}

impl<F: FileSystem> StampCache<F> {
    /// Creates a cache over a custom filesystem.
    pub fn with_file_system(fs: F, config: StampConfig) -> Self {
        Self {
            fs,
            config,
            entries: HashMap::new(),
            archives: HashMap::new(),
            diagnostics: Vec::new(),
            stats: StampStats::default(),
        }
    }

    /// Returns the modification time of a target, or `None` when it has none.
    ///
    /// `None` means missing, inaccessible, or a member of an archive that
    /// does not contain it or could not be parsed. Callers treat it as
    /// "always rebuild". Both outcomes are memoized until invalidated.
    pub fn timestamp(&mut self, target: &str) -> Option<SystemTime> {
        if let Some(stamp) = self.entries.get(target) {
            self.stats.hits += 1;
            return *stamp;
        }
        self.stats.misses += 1;

        let stamp = match Target::parse(self.resolvable_name(target)) {
            Target::PlainFile { path } => self.stat(path),
            Target::ArchiveMember { archive, member } => {
                self.member_time(archive, member, target)
            }
        };

        debug!("Resolved {} -> {:?}", target, stamp);
        self.entries.insert(target.to_string(), stamp);
        stamp
    }

    /// Forgets what is known about one target.
    ///
    /// Call after rebuilding it so the next query sees the new time. Freeing
    /// an archive member, or an archive itself, also drops that archive's
    /// index along with every member entry answered from it.
    pub fn time_free(&mut self, target: &str) {
        if self.entries.remove(target).is_some() {
            debug!("Freed timestamp for {}", target);
        }

        let file = Target::parse(self.resolvable_name(target)).file();
        if let Some(cached) = self.archives.remove(file) {
            for served in &cached.served {
                self.entries.remove(served);
            }
            debug!(
                "Freed archive index for {} ({} members, {} served)",
                file,
                cached.index.len(),
                cached.served.len()
            );
        }
    }

    /// Forgets every cached timestamp and archive index.
    pub fn time_free_all(&mut self) {
        debug!(
            "Freeing {} timestamps and {} archive indexes",
            self.entries.len(),
            self.archives.len()
        );
        self.entries.clear();
        self.archives.clear();
    }

    /// Releases the cache and everything it retains.
    ///
    /// Consumes the cache, so no query can follow it.
    pub fn stamps_done(self) -> TeardownSummary {
        let summary = TeardownSummary {
            entries: self.entries.len(),
            archives: self.archives.len(),
            members: self.archives.values().map(|a| a.index.len()).sum(),
        };

        info!(
            "Released {} timestamps and {} archive indexes ({} members); {} hits, {} misses",
            summary.entries, summary.archives, summary.members, self.stats.hits, self.stats.misses
        );

        drop(self);
        summary
    }

    /// Returns query counters accumulated since creation.
    pub fn stats(&self) -> StampStats {
        self.stats
    }

    /// Returns archives that produced no members because they were malformed.
    ///
    /// Each distinct archive and error pair is recorded once until taken with
    /// [`StampCache::take_diagnostics`].
    pub fn diagnostics(&self) -> &[ArchiveDiagnostic] {
        &self.diagnostics
    }

    /// Removes and returns the recorded archive diagnostics.
    pub fn take_diagnostics(&mut self) -> Vec<ArchiveDiagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Returns the filesystem this cache reads through.
    pub fn file_system(&self) -> &F {
        &self.fs
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &StampConfig {
        &self.config
    }

    /// Returns the number of memoized targets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is memoized.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of archive indexes held.
    pub fn archive_count(&self) -> usize {
        self.archives.len()
    }

    fn resolvable_name<'t>(&self, target: &'t str) -> &'t str {
        if self.config.strip_grist {
            strip_grist(target)
        } else {
            target
        }
    }

    fn stat(&mut self, path: &str) -> Option<SystemTime> {
        if path.is_empty() {
            return None;
        }

        self.stats.stat_calls += 1;
        match self.fs.modified(Path::new(path)) {
            Ok(time) => Some(time),
            Err(e) => {
                log_io_failure(path, &e);
                None
            }
        }
    }

    fn member_time(&mut self, archive: &str, member: &str, target: &str) -> Option<SystemTime> {
        if !self.archives.contains_key(archive) {
            let index = self.scan_archive(archive);
            self.archives.insert(
                archive.to_string(),
                CachedArchive {
                    index,
                    served: Vec::new(),
                },
            );
        }

        let cached = self.archives.get_mut(archive)?;
        cached.served.push(target.to_string());
        cached.index.modified(member)
    }

    /// Reads and parses an archive. Failures yield an empty index.
    fn scan_archive(&mut self, archive: &str) -> ArchiveIndex {
        self.stats.archive_scans += 1;

        match load_archive(&self.fs, Path::new(archive), &self.config) {
            Ok(index) => {
                debug!("Scanned {}: {} members", archive, index.len());
                index
            }
            Err(StampError::Archive(error)) => {
                self.report(archive, error);
                ArchiveIndex::empty()
            }
            Err(StampError::Io(e)) => {
                log_io_failure(archive, &e);
                ArchiveIndex::empty()
            }
            Err(e) => {
                warn!("Ignoring members of {}: {}", archive, e);
                ArchiveIndex::empty()
            }
        }
    }

    fn report(&mut self, archive: &str, error: ArchiveError) {
        warn!("Ignoring members of {}: {}", archive, error);
        let diagnostic = ArchiveDiagnostic {
            archive: archive.to_string(),
            error,
        };
        // Rescans of an unchanged broken archive must not grow the list.
        if !self.diagnostics.contains(&diagnostic) {
            self.diagnostics.push(diagnostic);
        }
    }
}

impl<F: FileSystem> fmt::Debug for StampCache<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StampCache")
            .field("entries", &self.entries.len())
            .field("archives", &self.archives.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

/// Reads and parses one archive's member directory without caching it.
pub fn load_archive<F: FileSystem>(
    fs: &F,
    path: &Path,
    config: &StampConfig,
) -> Result<ArchiveIndex, StampError> {
    let limit = config.max_archive_size;
    let bytes = fs.read_archive(path, limit).map_err(|e| {
        if e.kind() == io::ErrorKind::FileTooLarge {
            StampError::Archive(ArchiveError::TooLarge { limit })
        } else {
            StampError::Io(e)
        }
    })?;

    Ok(parse_with(&bytes, &config.parse_options())?)
}

fn log_io_failure(path: &str, error: &io::Error) {
    if error.kind() == io::ErrorKind::NotFound {
        debug!("{} does not exist", path);
    } else {
        warn!("Unable to read timestamp of {}: {}", path, error);
    }
}
