//! Target name classification.

/// What a target name refers to on disk.
///
/// Produced once per lookup by [`Target::parse`]; everything downstream
/// matches on it instead of re-inspecting the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// A path resolved with a direct stat.
    PlainFile {
        /// Filesystem path.
        path: &'a str,
    },

    /// A member of a static archive, written `archive(member)`.
    ArchiveMember {
        /// Path of the archive file.
        archive: &'a str,
        /// Member name inside the archive.
        member: &'a str,
    },
}

impl<'a> Target<'a> {
    /// Classifies a target name.
    ///
    /// A name is an archive member when it ends in `)` and its first `(` is
    /// preceded by a non-empty archive path and followed by a non-empty
    /// member name. Any other name is a plain path.
    pub fn parse(name: &'a str) -> Self {
        if let Some(inner) = name.strip_suffix(')')
            && let Some(open) = inner.find('(')
        {
            let archive = &inner[..open];
            let member = &inner[open + 1..];
            if !archive.is_empty() && !member.is_empty() {
                return Target::ArchiveMember { archive, member };
            }
        }

        Target::PlainFile { path: name }
    }

    /// The file that has to be touched to resolve this target.
    pub fn file(&self) -> &'a str {
        match self {
            Target::PlainFile { path } => path,
            Target::ArchiveMember { archive, .. } => archive,
        }
    }
}

/// Removes a leading `<grist>` qualifier from a target name.
///
/// Grist distinguishes targets that share a file name; it never names part
/// of the path.
pub fn strip_grist(name: &str) -> &str {
    if name.starts_with('<')
        && let Some(close) = name.find('>')
    {
        return &name[close + 1..];
    }
    name
}
