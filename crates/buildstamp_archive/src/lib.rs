//! # buildstamp_archive
//!
//! Reader for the member directory of static archives (`ar` format).
//!
//! This crate provides:
//! - System V / GNU archives, including the `//` long-name table
//! - BSD archives with `#1/N` inline long names
//! - GNU thin archives
//!
//! Only member names and stored modification times are extracted. Member
//! contents are never decoded and archives are never written.
//!
//! ## Example
//!
//! ```rust,ignore
//! use buildstamp_archive::parse;
//!
//! let bytes = std::fs::read("libfoo.a")?;
//! let index = parse(&bytes)?;
//! if let Some(time) = index.modified("foo.o") {
//!     println!("foo.o: {:?}", time);
//! }
//! ```

mod error;
mod header;
mod index;
mod reader;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::ArchiveError;
pub use header::{HEADER_LEN, HEADER_TERMINATOR};
pub use index::{ArchiveIndex, ArchiveMember};
pub use reader::{MAGIC, ParseOptions, THIN_MAGIC, parse, parse_with};
