use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;

use ngsqc_core::ChromSizes;
use ngsqc_core::utils::ensure_file_exists;
use ngsqc_io::ProfileWrite;
use ngsqc_profile::{ProfileConfig, ProfileStore, QcMode};

fn config_from_matches(matches: &ArgMatches) -> ProfileConfig {
    let defaults = ProfileConfig::default();
    ProfileConfig {
        span: matches.get_one::<u32>("span").copied().unwrap_or(defaults.span),
        extension: matches
            .get_one::<u32>("ext")
            .copied()
            .unwrap_or(defaults.extension),
        background: matches
            .get_one::<i32>("bg")
            .copied()
            .unwrap_or(defaults.background),
        mode: if matches.get_flag("five-replicates") {
            QcMode::FiveReplicates
        } else {
            QcMode::Single
        },
        skip_unknown: matches.get_flag("skip"),
        quiet: matches.get_flag("quiet"),
    }
}

pub fn run_profile(matches: &ArgMatches) -> Result<()> {
    let bed = matches
        .get_one::<String>("bed")
        .map(PathBuf::from)
        .context("Missing BED file")?;
    let table = matches
        .get_one::<String>("table")
        .map(PathBuf::from)
        .context("Missing intensity table")?;
    let chromsizes = matches
        .get_one::<String>("chromsizes")
        .map(PathBuf::from)
        .context("Missing chrom sizes file")?;
    let output = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .context("Missing output directory")?;

    for path in [&bed, &table, &chromsizes] {
        ensure_file_exists(path)?;
    }

    let config = config_from_matches(matches);

    let chrom_sizes = ChromSizes::from_path(&chromsizes)?;
    let mut store = ProfileStore::new(&chrom_sizes, &config)?;

    log::info!("Loading LocalQCs");
    let qc_stats = store.load_local_qcs_from_path(&table, &config)?;
    log::info!(
        "{} local QCs written, {} below background, {} rejected",
        qc_stats.written,
        qc_stats.background,
        qc_stats.rejected
    );

    log::info!("Loading Wiggles");
    let read_stats = store.load_wiggles_from_path(&bed, &config)?;
    log::info!(
        "{} reads binned, {} unique",
        read_stats.reads,
        read_stats.unique
    );

    log::info!("Writing output");
    store
        .write_npy(&output)
        .with_context(|| format!("Failed to write profiles to {}", output.display()))?;

    Ok(())
}
