//! Host filesystem access.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::time::SystemTime;

/// The filesystem operations timestamp resolution needs.
///
/// The cache owns one implementation for its whole lifetime and drops it at
/// teardown, so anything an implementation retains is released with it.
pub trait FileSystem {
    /// Returns the modification time of `path`.
    fn modified(&self, path: &Path) -> io::Result<SystemTime>;

    /// Reads a whole archive, refusing files larger than `limit` bytes with
    /// [`io::ErrorKind::FileTooLarge`].
    fn read_archive(&self, path: &Path, limit: u64) -> io::Result<Vec<u8>>;
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        (**self).modified(path)
    }

    fn read_archive(&self, path: &Path, limit: u64) -> io::Result<Vec<u8>> {
        (**self).read_archive(path, limit)
    }
}

/// [`FileSystem`] backed by the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFileSystem;

impl FileSystem for HostFileSystem {
    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        std::fs::metadata(path)?.modified()
    }

    fn read_archive(&self, path: &Path, limit: u64) -> io::Result<Vec<u8>> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        if len > limit {
            return Err(io::Error::new(
                io::ErrorKind::FileTooLarge,
                format!("{} is {} bytes, limit is {}", path.display(), len, limit),
            ));
        }

        let mut bytes = Vec::with_capacity(usize::try_from(len).unwrap_or(0));
        // The file may grow between the size check and the read.
        file.take(limit).read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}
