//! Binned read-depth profiles and local QC windows for sequencing quality control.
//!
//! A [ProfileStore] holds one [ChromosomeProfile] per chromosome of an assembly
//! and is filled by two independent streaming passes:
//!
//! - the read pass turns BED alignments into `(total, unique)` read counts per
//!   `span` bp wiggle bin, after read extension and one-record lookback
//!   duplicate detection,
//! - the local QC pass turns an intensity table into per-500 bp windows holding
//!   an intensity and a dispersion score (plus a replicate flag in five
//!   replicate mode).
//!
//! # Example
//!
//! ```no_run
//! use ngsqc_core::ChromSizes;
//! use ngsqc_profile::{ProfileConfig, ProfileStore};
//!
//! let config = ProfileConfig::default();
//! let chrom_sizes = ChromSizes::from_path("dm6.chrom.sizes").unwrap();
//! let mut store = ProfileStore::new(&chrom_sizes, &config).unwrap();
//!
//! store.load_local_qcs_from_path("intensities.tsv.gz", &config).unwrap();
//! store.load_wiggles_from_path("reads.bed.gz", &config).unwrap();
//!
//! store
//!     .export_with(|chrom| {
//!         println!("{}: {} bins", chrom.chrom, chrom.wiggles.len());
//!         Ok::<(), std::io::Error>(())
//!     })
//!     .unwrap();
//! ```

pub mod bins;
pub mod chromosome;
pub mod config;
pub mod consts;
pub mod localqc;
mod progress;
pub mod reads;
pub mod store;

// re-exports
pub use bins::{LocalQc, LocalQc5, LocalQcs, QcMode, WiggleBin};
pub use chromosome::ChromosomeProfile;
pub use config::ProfileConfig;
pub use localqc::LocalQcStats;
pub use reads::ReadStats;
pub use store::{ChromosomeExport, ProfileStore};
