//! Local QC pass: intensity tables to 500 bp QC windows.
//!
//! Every line of the table carries the intensity of one window and the
//! intensities observed in random samplings of 90%, 70% and 50% of the reads.
//! A sampling is consistent when each observed share stays within
//! [DISPERSION_THRESHOLD] percentage points of the expected one.

use std::io::BufRead;

use ngsqc_core::{NgsQcError, Result};

use crate::bins::{LocalQc, LocalQc5, QcMode};
use crate::config::ProfileConfig;
use crate::consts::{DISPERSION_THRESHOLD, LOCAL_QC5_COLUMNS, LOCAL_QC_COLUMNS, REPLICATES};
use crate::progress::LineProgress;
use crate::store::ProfileStore;

/// Absolute deviation, in percentage points, of `sampled / intensity` from `expected`.
pub fn dispersion(expected: f64, sampled: i32, intensity: i32) -> f64 {
    (expected - 100.0 * sampled as f64 / intensity as f64).abs()
}

/// Intensities observed in one random sampling of a window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sampling {
    pub i90: i32,
    pub i70: i32,
    pub i50: i32,
}

impl Sampling {
    ///
    /// The 50% dispersion when all three samplings are within the threshold.
    ///
    /// A zero `intensity` gives non-finite deviations and never passes.
    pub fn dispersion50(&self, intensity: i32) -> Option<f64> {
        let disp90 = dispersion(90.0, self.i90, intensity);
        let disp70 = dispersion(70.0, self.i70, intensity);
        let disp50 = dispersion(50.0, self.i50, intensity);

        (disp90 < DISPERSION_THRESHOLD
            && disp70 < DISPERSION_THRESHOLD
            && disp50 < DISPERSION_THRESHOLD)
            .then_some(disp50)
    }
}

/// Single sampling QC: `None` when the sampling is inconsistent.
pub fn single_qc(intensity: i32, sampling: &Sampling) -> Option<LocalQc> {
    sampling
        .dispersion50(intensity)
        .map(|dispersion| LocalQc {
            intensity,
            dispersion,
        })
}

/// Cumulative flag: bit `k` is set iff at least `k + 1` replicates are valid.
pub fn replicate_flag(n_valid: usize) -> u8 {
    ((1u32 << n_valid.min(REPLICATES)) - 1) as u8
}

///
/// Five replicate QC. Always produces a window.
///
/// The dispersion is the mean 50% dispersion over valid replicates, 0 when
/// none is valid.
pub fn replicate_qc(intensity: i32, samplings: &[Sampling; REPLICATES]) -> LocalQc5 {
    let valid: Vec<f64> = samplings
        .iter()
        .filter_map(|sampling| sampling.dispersion50(intensity))
        .collect();

    let dispersion = if valid.is_empty() {
        0.0
    } else {
        valid.iter().sum::<f64>() / valid.len() as f64
    };

    LocalQc5 {
        intensity,
        dispersion,
        flag: replicate_flag(valid.len()),
    }
}

/// Counters collected over one local QC pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LocalQcStats {
    pub lines: usize,
    pub written: usize,
    pub background: usize,
    pub rejected: usize,
    pub skipped: usize,
}

fn expected_columns(mode: QcMode) -> usize {
    match mode {
        QcMode::Single => LOCAL_QC_COLUMNS,
        QcMode::FiveReplicates => LOCAL_QC5_COLUMNS,
    }
}

///
/// Stream an intensity table from `reader` into the QC windows of `store`.
///
/// Single mode expects `chrom pos1 pos2 intensity i90 i70 i50`, five replicate
/// mode `chrom pos1 pos2 intensity i90[0..5] i70[0..5] i50[0..5]`.
///
/// # Arguments
/// - store: profiles to fill
/// - reader: intensity table, already decompressed
/// - label: name of the input reported in errors
/// - config: QC mode, background threshold, unknown chromosome policy
pub fn load_local_qcs<R: BufRead>(
    store: &mut ProfileStore,
    mut reader: R,
    label: &str,
    config: &ProfileConfig,
) -> Result<LocalQcStats> {
    let progress = LineProgress::new(config.quiet, "lines");
    let n_columns = expected_columns(config.mode);
    let mut stats = LocalQcStats::default();

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
        let line = stats.lines;

        let trimmed = line_buf.trim();
        if trimmed.is_empty() {
            continue;
        }

        // chr2L	500	1000	1	1	1	0
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
                line,
            });
        };

        if fields.len() < n_columns {
            return Err(NgsQcError::ColumnCount {
                path: label.to_string(),
                expected: n_columns,
                line,
            });
        }

        let parse = |i: usize| {
            fields[i]
                .parse::<i32>()
                .map_err(|_| NgsQcError::InvalidNumber {
                    path: label.to_string(),
                    line,
                })
        };
        let position = i64::from(parse(1)?);
        let intensity = parse(3)?;

        if intensity < config.background {
            stats.background += 1;
            continue;
        }

        match config.mode {
            QcMode::Single => {
                let sampling = Sampling {
                    i90: parse(4)?,
                    i70: parse(5)?,
                    i50: parse(6)?,
                };
                match single_qc(intensity, &sampling) {
                    Some(qc) => {
                        profile.add_local_qc(position, qc.intensity, qc.dispersion);
                        stats.written += 1;
                    }
                    None => stats.rejected += 1,
                }
            }
            QcMode::FiveReplicates => {
                // chr1	3000500	3001000	4	3	3	2	4	3	4	3	2	3	3	0	0	2	1	1
                let mut samplings = [Sampling::default(); REPLICATES];
                for (i, sampling) in samplings.iter_mut().enumerate() {
                    *sampling = Sampling {
                        i90: parse(4 + i)?,
                        i70: parse(4 + REPLICATES + i)?,
                        i50: parse(4 + 2 * REPLICATES + i)?,
                    };
                }
                let qc = replicate_qc(intensity, &samplings);
                profile.add_local_qc5(position, qc.intensity, qc.dispersion, qc.flag);
                stats.written += 1;
            }
        }
    }

    progress.finish();
    log::debug!(
        "{}: {} windows written, {} rejected, {} below background, {} skipped",
        label,
        stats.written,
        stats.rejected,
        stats.background,
        stats.skipped
    );

    Ok(stats)
}
