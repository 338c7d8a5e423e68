use std::io::BufRead;
use std::path::Path;

use fxhash::FxHashMap;

use ngsqc_core::utils::get_dynamic_reader;
use ngsqc_core::{ChromSizes, Result};

use crate::bins::{LocalQcs, QcMode, WiggleBin};
use crate::chromosome::ChromosomeProfile;
use crate::config::ProfileConfig;
use crate::localqc::{self, LocalQcStats};
use crate::reads::{self, ReadStats};

/// Everything an exporter needs to persist one chromosome.
#[derive(Debug, Clone)]
pub struct ChromosomeExport {
    pub chrom: String,
    pub size: u32,
    pub span: u32,
    pub wiggles: Vec<WiggleBin>,
    pub local_qcs: LocalQcs,
}

///
/// One [ChromosomeProfile] per chromosome of the assembly.
///
/// Profiles are kept in chrom sizes file order, which is also the export order.
///
#[derive(Debug, Clone)]
pub struct ProfileStore {
    chroms: Vec<String>,
    profiles: Vec<ChromosomeProfile>,
    index: FxHashMap<String, usize>,
    span: u32,
    mode: QcMode,
}

impl ProfileStore {
    ///
    /// Create empty profiles for every chromosome in `chrom_sizes`.
    ///
    /// Only bin counts are computed here, arrays are allocated on first write.
    pub fn new(chrom_sizes: &ChromSizes, config: &ProfileConfig) -> Result<Self> {
        config.validate()?;

        let mut store = ProfileStore {
            chroms: Vec::with_capacity(chrom_sizes.len()),
            profiles: Vec::with_capacity(chrom_sizes.len()),
            index: FxHashMap::default(),
            span: config.span,
            mode: config.mode,
        };

        for (chrom, size) in chrom_sizes.iter() {
            store.index.insert(chrom.to_string(), store.profiles.len());
            store.chroms.push(chrom.to_string());
            store
                .profiles
                .push(ChromosomeProfile::new(size, config.span, config.mode)?);
        }

        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn span(&self) -> u32 {
        self.span
    }

    pub fn mode(&self) -> QcMode {
        self.mode
    }

    pub fn chroms(&self) -> impl Iterator<Item = &str> {
        self.chroms.iter().map(String::as_str)
    }

    pub fn profile(&self, chrom: &str) -> Option<&ChromosomeProfile> {
        self.index.get(chrom).map(|&i| &self.profiles[i])
    }

    pub fn profile_mut(&mut self, chrom: &str) -> Option<&mut ChromosomeProfile> {
        self.index.get(chrom).map(|&i| &mut self.profiles[i])
    }

    /// Run the read pass over an open BED stream. See [reads::load_wiggles].
    pub fn load_wiggles<R: BufRead>(
        &mut self,
        reader: R,
        label: &str,
        config: &ProfileConfig,
    ) -> Result<ReadStats> {
        reads::load_wiggles(self, reader, label, config)
    }

    /// Run the read pass over a plain or gzipped BED file.
    pub fn load_wiggles_from_path<P: AsRef<Path>>(
        &mut self,
        path: P,
        config: &ProfileConfig,
    ) -> Result<ReadStats> {
        let path = path.as_ref();
        let reader = get_dynamic_reader(path)?;
        self.load_wiggles(reader, &path.display().to_string(), config)
    }

    /// Run the local QC pass over an open intensity table. See [localqc::load_local_qcs].
    pub fn load_local_qcs<R: BufRead>(
        &mut self,
        reader: R,
        label: &str,
        config: &ProfileConfig,
    ) -> Result<LocalQcStats> {
        localqc::load_local_qcs(self, reader, label, config)
    }

    /// Run the local QC pass over a plain or gzipped intensity table.
    pub fn load_local_qcs_from_path<P: AsRef<Path>>(
        &mut self,
        path: P,
        config: &ProfileConfig,
    ) -> Result<LocalQcStats> {
        let path = path.as_ref();
        let reader = get_dynamic_reader(path)?;
        self.load_local_qcs(reader, &path.display().to_string(), config)
    }

    ///
    /// Hand every chromosome to `export`, in file order, releasing its arrays.
    ///
    /// Only one chromosome's arrays are alive outside the store at any time.
    /// Stops at the first error returned by `export`.
    pub fn export_with<F, E>(&mut self, mut export: F) -> std::result::Result<(), E>
    where
        F: FnMut(ChromosomeExport) -> std::result::Result<(), E>,
    {
        for (chrom, profile) in self.chroms.iter().zip(self.profiles.iter_mut()) {
            let (wiggles, local_qcs) = profile.take_arrays();
            export(ChromosomeExport {
                chrom: chrom.clone(),
                size: profile.size(),
                span: profile.span(),
                wiggles,
                local_qcs,
            })?;
        }
        Ok(())
    }
}
