//! Subcommand implementations

pub mod init;
pub mod members;
pub mod query;
