//! Fixed-width member header fields.

use crate::ArchiveError;

/// Size of a member header in bytes.
pub const HEADER_LEN: usize = 60;

/// The two bytes closing every member header.
pub const HEADER_TERMINATOR: &[u8; 2] = b"`\n";

const NAME: std::ops::Range<usize> = 0..16;
const DATE: std::ops::Range<usize> = 16..28;
const SIZE: std::ops::Range<usize> = 48..58;
const TERMINATOR: std::ops::Range<usize> = 58..60;

/// A member header borrowed from the archive buffer.
///
/// Only the fields the member directory needs are exposed. The date field
/// is parsed lazily because GNU name tables leave it blank.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawHeader<'a> {
    name: &'a [u8],
    date: &'a [u8],
    size: u64,
    offset: usize,
}

impl<'a> RawHeader<'a> {
    /// Reads the header at the start of `bytes`, which sits at `offset` in the archive.
    pub(crate) fn parse(bytes: &'a [u8], offset: usize) -> Result<Self, ArchiveError> {
        if bytes.len() < HEADER_LEN {
            return Err(ArchiveError::TruncatedHeader { offset });
        }

        if &bytes[TERMINATOR] != HEADER_TERMINATOR {
            return Err(ArchiveError::malformed("bad header terminator", offset));
        }

        let size = parse_decimal(&bytes[SIZE], "size", offset)?;

        Ok(Self {
            name: &bytes[NAME],
            date: &bytes[DATE],
            size,
            offset,
        })
    }

    /// The raw name field with trailing padding removed.
    pub(crate) fn name(&self) -> &'a [u8] {
        trim_padding(self.name)
    }

    /// The modification time in seconds since the Unix epoch.
    pub(crate) fn date(&self) -> Result<u64, ArchiveError> {
        parse_decimal(self.date, "date", self.offset)
    }

    /// Declared size of the member data.
    pub(crate) fn size(&self) -> u64 {
        self.size
    }
}

/// Parses a space-padded decimal field.
pub(crate) fn parse_decimal(field: &[u8], what: &str, offset: usize) -> Result<u64, ArchiveError> {
    let digits = trim_padding(field);
    let digits = &digits[digits.iter().take_while(|&&b| b == b' ').count()..];
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err(ArchiveError::malformed(
            format!("unparsable {} field {:?}", what, String::from_utf8_lossy(field)),
            offset,
        ));
    }

    // At most 12 ASCII digits, so this cannot overflow a u64.
    Ok(digits
        .iter()
        .fold(0u64, |acc, digit| acc * 10 + u64::from(digit - b'0')))
}

fn trim_padding(field: &[u8]) -> &[u8] {
    let end = field
        .iter()
        .rposition(|&b| b != b' ')
        .map_or(0, |last| last + 1);
    &field[..end]
}
