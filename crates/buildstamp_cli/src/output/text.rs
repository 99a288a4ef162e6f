//! Text output formatter

use buildstamp_core::{ArchiveIndex, StampStats};

use super::{StampResult, epoch_seconds};

pub fn output_stamps_text(results: &[StampResult], stats: Option<StampStats>) {
    for result in results {
        match result.modified {
            Some(time) => println!("{}: {}", result.target, epoch_seconds(time)),
            None => println!("{}: unknown", result.target),
        }
    }

    if let Some(stats) = stats {
        println!();
        println!(
            "Cache: {} hits, {} misses, {} stat calls, {} archive scans",
            stats.hits, stats.misses, stats.stat_calls, stats.archive_scans
        );
    }
}

pub fn output_members_text(index: &ArchiveIndex) {
    if !index.is_empty() {
        println!("{:<32} | {:<12} | {:<10}", "Member", "Modified", "Size");
        println!("{:-<32}-+-{:-<12}-+-{:-<10}", "", "", "");
        for member in index.members() {
            println!(
                "{:<32} | {:<12} | {:<10}",
                member.name,
                epoch_seconds(member.modified),
                member.size
            );
        }
        println!();
    }

    let kind = if index.is_thin() { "thin archive" } else { "archive" };
    println!("{} members ({})", index.len(), kind);
}
