//! Test utilities for buildstamp_core.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::fs::FileSystem;

pub fn at(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}

/// Builds a GNU-style archive whose members each hold three bytes.
pub fn archive(members: &[(&str, u64)]) -> Vec<u8> {
    let mut bytes = buildstamp_archive::MAGIC.to_vec();
    for (name, secs) in members {
        let header = format!(
            "{:<16}{:<12}{:<6}{:<6}{:<8}{:<10}`\n",
            format!("{}/", name),
            secs,
            0,
            0,
            644,
            3
        );
        bytes.extend_from_slice(header.as_bytes());
        bytes.extend_from_slice(b"obj\n");
    }
    bytes
}

struct Node {
    modified: SystemTime,
    bytes: Vec<u8>,
}

/// In-memory [`FileSystem`] that counts how often it is touched.
#[derive(Default)]
pub struct MemoryFileSystem {
    nodes: RefCell<HashMap<PathBuf, Node>>,
    denied: RefCell<HashSet<PathBuf>>,
    stats: Cell<usize>,
    reads: Cell<usize>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or replaces a file with the given modification time.
    pub fn add_file(&self, path: &str, modified: SystemTime) {
        self.nodes.borrow_mut().insert(
            PathBuf::from(path),
            Node {
                modified,
                bytes: Vec::new(),
            },
        );
    }

    /// Creates or replaces a file holding archive bytes.
    pub fn add_archive(&self, path: &str, bytes: Vec<u8>) {
        self.nodes.borrow_mut().insert(
            PathBuf::from(path),
            Node {
                modified: SystemTime::now(),
                bytes,
            },
        );
    }

    /// Makes every access to `path` fail with `PermissionDenied`.
    pub fn deny(&self, path: &str) {
        self.denied.borrow_mut().insert(PathBuf::from(path));
    }

    fn check_access(&self, path: &Path) -> io::Result<()> {
        if self.denied.borrow().contains(path) {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        Ok(())
    }

    pub fn stat_count(&self) -> usize {
        self.stats.get()
    }

    pub fn read_count(&self) -> usize {
        self.reads.get()
    }
}

impl FileSystem for MemoryFileSystem {
    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        self.stats.set(self.stats.get() + 1);
        self.check_access(path)?;
        self.nodes
            .borrow()
            .get(path)
            .map(|node| node.modified)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn read_archive(&self, path: &Path, limit: u64) -> io::Result<Vec<u8>> {
        self.reads.set(self.reads.get() + 1);
        self.check_access(path)?;
        let nodes = self.nodes.borrow();
        let node = nodes
            .get(path)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;
        if node.bytes.len() as u64 > limit {
            return Err(io::Error::from(io::ErrorKind::FileTooLarge));
        }
        Ok(node.bytes.clone())
    }
}
