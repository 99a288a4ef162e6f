//! Sequential member directory walk.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::header::{HEADER_LEN, RawHeader, parse_decimal};
use crate::{ArchiveError, ArchiveIndex, ArchiveMember};

/// Magic string opening a regular archive.
pub const MAGIC: &[u8; 8] = b"!<arch>\n";

/// Magic string opening a GNU thin archive.
pub const THIN_MAGIC: &[u8; 8] = b"!<thin>\n";

/// Options controlling which archive variants are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Accept GNU thin archives.
    pub allow_thin: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { allow_thin: true }
    }
}

/// What a header's name field says about the member.
#[derive(Debug, PartialEq, Eq)]
enum NameField<'a> {
    /// GNU `/` or `/SYM64/` symbol table.
    SymbolTable,
    /// GNU `//` long-name table.
    LongNames,
    /// GNU `/N` reference into the long-name table.
    GnuLong(usize),
    /// BSD `#1/N`, the name occupies the first N data bytes.
    BsdLong(usize),
    /// Name stored directly in the header.
    Short(&'a [u8]),
}

/// Parses an archive's member directory with default options.
pub fn parse(bytes: &[u8]) -> Result<ArchiveIndex, ArchiveError> {
    parse_with(bytes, &ParseOptions::default())
}

/// Parses an archive's member directory.
///
/// # Arguments
///
/// * `bytes` - The complete archive contents
/// * `options` - Accepted archive variants
///
/// # Returns
///
/// The complete ordered member list, or the first structural error found.
/// Symbol tables and name tables are not reported as members.
pub fn parse_with(bytes: &[u8], options: &ParseOptions) -> Result<ArchiveIndex, ArchiveError> {
    let thin = if bytes.starts_with(MAGIC) {
        false
    } else if bytes.starts_with(THIN_MAGIC) {
        if !options.allow_thin {
            return Err(ArchiveError::ThinArchive);
        }
        true
    } else {
        return Err(ArchiveError::BadMagic);
    };

    let mut members = Vec::new();
    let mut long_names: Option<&[u8]> = None;
    let mut offset = MAGIC.len();

    while offset < bytes.len() {
        let header = RawHeader::parse(&bytes[offset..], offset)?;
        let name_field = classify(header.name(), offset)?;

        let data_start = offset + HEADER_LEN;
        // Thin archives only store their index tables inline.
        let inline = !thin
            || matches!(name_field, NameField::SymbolTable | NameField::LongNames);
        let data_end = if inline {
            usize::try_from(header.size())
                .ok()
                .and_then(|size| data_start.checked_add(size))
                .filter(|end| *end <= bytes.len())
                .ok_or(ArchiveError::TruncatedData {
                    offset,
                    size: header.size(),
                })?
        } else {
            data_start
        };
        let data = &bytes[data_start..data_end];

        let (name, content_start) = match name_field {
            NameField::SymbolTable => (None, data_start),
            NameField::LongNames => {
                long_names = Some(data);
                (None, data_start)
            }
            NameField::GnuLong(index) => {
                let table = long_names.ok_or_else(|| {
                    ArchiveError::malformed("long name reference before name table", offset)
                })?;
                (Some(gnu_long_name(table, index, offset)?), data_start)
            }
            NameField::BsdLong(len) => {
                if len > data.len() {
                    return Err(ArchiveError::malformed(
                        "BSD long name longer than member data",
                        offset,
                    ));
                }
                let raw = &data[..len];
                let end = raw.iter().rposition(|&b| b != 0).map_or(0, |last| last + 1);
                (Some(&raw[..end]), data_start + len)
            }
            NameField::Short(raw) => (Some(strip_gnu_terminator(raw)), data_start),
        };

        if let Some(name) = name {
            let name = String::from_utf8_lossy(name);
            if name.is_empty() {
                return Err(ArchiveError::malformed("empty member name", offset));
            }

            if matches!(&*name, "__.SYMDEF" | "__.SYMDEF SORTED") {
                debug!("Skipping BSD symbol table at offset {}", offset);
            } else {
                let size = if thin {
                    header.size()
                } else {
                    (data_end - content_start) as u64
                };
                members.push(ArchiveMember {
                    name: name.into_owned(),
                    modified: epoch_seconds(header.date()?, offset)?,
                    size,
                    offset: content_start,
                });
            }
        }

        // Member data is padded to an even offset. The final pad byte may be
        // missing, which simply ends the walk.
        offset = data_end + (data_end % 2);
    }

    debug!(
        "Parsed {} archive members ({} bytes, thin: {})",
        members.len(),
        bytes.len(),
        thin
    );

    Ok(ArchiveIndex::new(members, thin))
}

fn classify(name: &[u8], offset: usize) -> Result<NameField<'_>, ArchiveError> {
    match name {
        b"/" | b"/SYM64/" => return Ok(NameField::SymbolTable),
        b"//" => return Ok(NameField::LongNames),
        _ => {}
    }

    if let Some(digits) = name.strip_prefix(b"#1/") {
        let len = parse_decimal(digits, "BSD name length", offset)?;
        return Ok(NameField::BsdLong(to_usize(len, offset)?));
    }

    if let Some(digits) = name.strip_prefix(b"/")
        && !digits.is_empty()
        && digits.iter().all(u8::is_ascii_digit)
    {
        let index = parse_decimal(digits, "long name offset", offset)?;
        return Ok(NameField::GnuLong(to_usize(index, offset)?));
    }

    Ok(NameField::Short(name))
}

/// Looks up a `/N` name; entries end with `/\n` (GNU) or `\n`.
fn gnu_long_name(table: &[u8], index: usize, offset: usize) -> Result<&[u8], ArchiveError> {
    let rest = table.get(index..).filter(|rest| !rest.is_empty()).ok_or_else(|| {
        ArchiveError::malformed(
            format!("long name offset {} outside name table", index),
            offset,
        )
    })?;

    let end = rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len());
    Ok(strip_gnu_terminator(&rest[..end]))
}

fn strip_gnu_terminator(name: &[u8]) -> &[u8] {
    name.strip_suffix(b"/").unwrap_or(name)
}

fn epoch_seconds(secs: u64, offset: usize) -> Result<SystemTime, ArchiveError> {
    UNIX_EPOCH
        .checked_add(Duration::from_secs(secs))
        .ok_or_else(|| ArchiveError::malformed("date out of range", offset))
}

fn to_usize(value: u64, offset: usize) -> Result<usize, ArchiveError> {
    usize::try_from(value).map_err(|_| ArchiveError::malformed("value out of range", offset))
}
