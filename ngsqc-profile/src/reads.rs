//! Read pass: BED alignments to wiggle bins.
//!
//! Each alignment is optionally extended to the fragment length, classified as
//! unique or duplicate against the record right before it, and counted over
//! every wiggle bin it touches. Records are processed strictly in file order:
//! duplicate detection only looks one record back.

use std::io::BufRead;

use ngsqc_core::utils::is_bed_header;
use ngsqc_core::{NgsQcError, Result};

use crate::config::ProfileConfig;
use crate::consts::READ_COLUMNS;
use crate::progress::LineProgress;
use crate::store::ProfileStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    /// Only the first character counts: `+` is forward, anything else reverse.
    pub fn from_column(column: &str) -> Self {
        if column.starts_with('+') {
            Strand::Forward
        } else {
            Strand::Reverse
        }
    }
}

/// One alignment as found in the BED file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRecord {
    pub start: i64,
    pub end: i64,
    pub strand: Strand,
}

impl ReadRecord {
    ///
    /// Parse `chrom start end name score strand` columns.
    ///
    /// # Arguments
    /// - fields: tab separated columns of the line
    /// - label: file name used in errors
    /// - line: 1-based line number used in errors
    pub fn from_fields(fields: &[&str], label: &str, line: usize) -> Result<Self> {
        if fields.len() < READ_COLUMNS {
            return Err(NgsQcError::ColumnCount {
                path: label.to_string(),
                expected: READ_COLUMNS,
                line,
            });
        }

        let invalid = || NgsQcError::InvalidNumber {
            path: label.to_string(),
            line,
        };
        // 32-bit coordinates, widened so extension arithmetic cannot overflow
        let start = fields[1].parse::<i32>().map_err(|_| invalid())?;
        let end = fields[2].parse::<i32>().map_err(|_| invalid())?;

        Ok(ReadRecord {
            start: i64::from(start),
            end: i64::from(end),
            strand: Strand::from_column(fields[5]),
        })
    }

    ///
    /// Extend the read to `extension` bp from its 5' end.
    ///
    /// Forward reads keep their start, reverse reads keep their end. An extension
    /// of 0 leaves the coordinates untouched.
    pub fn extended(&self, extension: u32) -> (i64, i64) {
        if extension == 0 {
            return (self.start, self.end);
        }
        let extension = extension as i64;
        match self.strand {
            Strand::Forward => (self.start, self.start + extension),
            Strand::Reverse => (self.end - extension, self.end),
        }
    }
}

///
/// One-record lookback duplicate detector.
///
/// A read is a duplicate when the read right before it sits on the same
/// chromosome and (extended) start, and a read of the same strand was already
/// seen at that position. Duplicates further apart in the file are not detected.
///
#[derive(Debug, Default)]
pub struct DuplicateTracker {
    prev_chrom: String,
    prev_start: Option<i64>,
    saw_forward: bool,
    saw_reverse: bool,
}

impl DuplicateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify the next read in file order, true when it is unique.
    pub fn classify(&mut self, chrom: &str, start: i64, strand: Strand) -> bool {
        let same_position = self.prev_start == Some(start) && self.prev_chrom == chrom;

        let is_unique = if same_position {
            let seen = match strand {
                Strand::Forward => &mut self.saw_forward,
                Strand::Reverse => &mut self.saw_reverse,
            };
            !std::mem::replace(seen, true)
        } else {
            self.saw_forward = strand == Strand::Forward;
            self.saw_reverse = strand == Strand::Reverse;
            true
        };

        self.prev_start = Some(start);
        if self.prev_chrom != chrom {
            self.prev_chrom.clear();
            self.prev_chrom.push_str(chrom);
        }

        is_unique
    }
}

/// Counters collected over one read pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReadStats {
    pub lines: usize,
    pub reads: usize,
    pub unique: usize,
    pub skipped: usize,
}

///
/// Stream BED alignments from `reader` into the wiggle bins of `store`.
///
/// # Arguments
/// - store: profiles to fill
/// - reader: BED6 input, already decompressed
/// - label: name of the input reported in errors
/// - config: extension, unknown chromosome policy and progress settings
pub fn load_wiggles<R: BufRead>(
    store: &mut ProfileStore,
    mut reader: R,
    label: &str,
    config: &ProfileConfig,
) -> Result<ReadStats> {
    let progress = LineProgress::new(config.quiet, "reads");
    let mut tracker = DuplicateTracker::new();
    let mut stats = ReadStats::default();

    let mut line_buf = String::with_capacity(256);
    loop {
        line_buf.clear();
        let bytes_read = reader
            .read_line(&mut line_buf)
            .map_err(|e| NgsQcError::io(label, e))?;
        if bytes_read == 0 {
            break;
        }
        stats.lines += 1;
        progress.tick(stats.lines);

        let trimmed = line_buf.trim();
        if trimmed.is_empty() || is_bed_header(trimmed) {
            continue;
        }

        // chr2L	995	1068	ERR393678.1060596	1	+
        let fields: Vec<&str> = trimmed.split('\t').collect();
        let chrom = fields[0];

        let Some(profile) = store.profile_mut(chrom) else {
            if config.skip_unknown {
                stats.skipped += 1;
                continue;
            }
            return Err(NgsQcError::UnknownChromosome {
                path: label.to_string(),
                chrom: chrom.to_string(),
                line: stats.lines,
            });
        };

        let record = ReadRecord::from_fields(&fields, label, stats.lines)?;
        let (start, end) = record.extended(config.extension);
        let is_unique = tracker.classify(chrom, start, record.strand);

        profile.add_read(start, end, is_unique);

        stats.reads += 1;
        if is_unique {
            stats.unique += 1;
        }
    }

    progress.finish();
    log::debug!(
        "{}: {} reads binned ({} unique), {} skipped",
        label,
        stats.reads,
        stats.unique,
        stats.skipped
    );

    Ok(stats)
}
