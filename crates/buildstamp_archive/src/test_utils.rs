//! Test utilities for buildstamp_archive.

use crate::header::HEADER_LEN;
use crate::reader::MAGIC;

/// Formats a 60-byte member header.
pub fn header(name: &str, date: &str, size: u64) -> Vec<u8> {
    let text = format!(
        "{:<16}{:<12}{:<6}{:<6}{:<8}{:<10}`\n",
        name, date, "0", "0", "644", size
    );
    assert_eq!(text.len(), HEADER_LEN, "header fields overflowed: {:?}", text);
    text.into_bytes()
}

/// Assembles archive bytes in memory.
pub struct ArchiveBuilder {
    bytes: Vec<u8>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self {
            bytes: MAGIC.to_vec(),
        }
    }

    /// Appends a member with a numeric date.
    pub fn member(self, name: &str, date: u64, data: &[u8]) -> Self {
        self.raw_member(name, &date.to_string(), data)
    }

    /// Appends a member with the date field written verbatim.
    pub fn raw_member(mut self, name: &str, date: &str, data: &[u8]) -> Self {
        self.bytes.extend(header(name, date, data.len() as u64));
        self.bytes.extend_from_slice(data);
        if self.bytes.len() % 2 == 1 {
            self.bytes.push(b'\n');
        }
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}
