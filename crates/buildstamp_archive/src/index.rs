//! Parsed member directory.

use std::time::SystemTime;

/// A single member entry from an archive's directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveMember {
    /// Member name with archive-specific decoration removed.
    pub name: String,

    /// Stored modification time.
    pub modified: SystemTime,

    /// Size of the member contents in bytes.
    pub size: u64,

    /// Byte offset of the member contents within the archive.
    ///
    /// For thin archives this points just past the header, since the
    /// contents live in an external file.
    pub offset: usize,
}

/// The ordered member directory of one archive.
///
/// An index is always complete: the reader either produces every member or
/// fails without producing an index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveIndex {
    members: Vec<ArchiveMember>,
    thin: bool,
}

impl ArchiveIndex {
    pub(crate) fn new(members: Vec<ArchiveMember>, thin: bool) -> Self {
        Self { members, thin }
    }

    /// Creates an index with no members.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the members in archive order.
    pub fn members(&self) -> &[ArchiveMember] {
        &self.members
    }

    /// Finds the first member whose name matches exactly.
    pub fn find(&self, name: &str) -> Option<&ArchiveMember> {
        self.members.iter().find(|member| member.name == name)
    }

    /// Returns the stored modification time of the named member.
    pub fn modified(&self, name: &str) -> Option<SystemTime> {
        self.find(name).map(|member| member.modified)
    }

    /// Returns whether this index came from a thin archive.
    pub fn is_thin(&self) -> bool {
        self.thin
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the archive has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    fn member(name: &str, secs: u64) -> ArchiveMember {
        ArchiveMember {
            name: name.to_string(),
            modified: UNIX_EPOCH + Duration::from_secs(secs),
            size: 0,
            offset: 0,
        }
    }

    #[test]
    fn test_find_is_case_sensitive() {
        let index = ArchiveIndex::new(vec![member("Foo.o", 1)], false);
        assert!(index.find("Foo.o").is_some());
        assert!(index.find("foo.o").is_none());
    }

    #[test]
    fn test_first_duplicate_wins() {
        let index = ArchiveIndex::new(vec![member("a.o", 1), member("a.o", 2)], false);
        assert_eq!(
            index.modified("a.o"),
            Some(UNIX_EPOCH + Duration::from_secs(1))
        );
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_empty() {
        let index = ArchiveIndex::empty();
        assert!(index.is_empty());
        assert!(!index.is_thin());
        assert_eq!(index.modified("a.o"), None);
    }
}
