use std::fs::create_dir_all;
use std::path::Path;

use ndarray::{Array, Array2, ArrayBase, Data, Dimension};
use ndarray_npy::{WritableElement, write_npy};

use ngsqc_profile::consts::LOCAL_QC_SPAN;
use ngsqc_profile::{ChromosomeExport, ProfileStore};

use crate::consts::*;
use crate::error::{ExportError, Result};
use crate::meta::{ChromMeta, ExportMeta};

pub trait ProfileWrite {
    ///
    /// Write every chromosome as `.npy` arrays plus a `meta.json` under `path`.
    ///
    /// Profiles are released as soon as they are written.
    ///
    /// # Arguments
    /// - path: output directory, created if missing
    fn write_npy<T: AsRef<Path>>(&mut self, path: T) -> Result<ExportMeta>;
}

impl ProfileWrite for ProfileStore {
    fn write_npy<T: AsRef<Path>>(&mut self, path: T) -> Result<ExportMeta> {
        let path = path.as_ref();
        create_dir_all(path)?;

        let mut meta = ExportMeta::new(self.mode(), self.span(), LOCAL_QC_SPAN);
        self.export_with(|chrom| {
            let chrom_meta = write_chromosome(path, &chrom)?;
            meta.chromosomes.push(chrom_meta);
            Ok::<(), ExportError>(())
        })?;

        meta.write(path.join(META_FILE))?;
        log::info!(
            "Wrote {} chromosomes to {}",
            meta.chromosomes.len(),
            path.display()
        );

        Ok(meta)
    }
}

///
/// Write the arrays of one chromosome to `<path>/<chrom>/`.
///
pub fn write_chromosome(path: &Path, chrom: &ChromosomeExport) -> Result<ChromMeta> {
    let chrom_dir = path.join(&chrom.chrom);
    create_dir_all(&chrom_dir)?;

    let flat: Vec<u32> = chrom
        .wiggles
        .iter()
        .flat_map(|w| [w.total, w.unique])
        .collect();
    let wiggles: Array2<u32> = Array2::from_shape_vec((chrom.wiggles.len(), 2), flat)?;
    write_array(&chrom_dir.join(WIGGLES_FILE), &wiggles)?;

    let local_qcs = &chrom.local_qcs;
    write_array(
        &chrom_dir.join(LOCAL_QC_INTENSITY_FILE),
        &Array::from_vec(local_qcs.intensities()),
    )?;
    write_array(
        &chrom_dir.join(LOCAL_QC_DISPERSION_FILE),
        &Array::from_vec(local_qcs.dispersions()),
    )?;
    if let Some(flags) = local_qcs.flags() {
        write_array(&chrom_dir.join(LOCAL_QC_FLAG_FILE), &Array::from_vec(flags))?;
    }

    log::debug!(
        "{}: {} wiggles, {} local QCs",
        chrom.chrom,
        chrom.wiggles.len(),
        local_qcs.len()
    );

    Ok(ChromMeta {
        chrom: chrom.chrom.clone(),
        size: chrom.size,
        span: chrom.span,
        n_wiggles: chrom.wiggles.len(),
        n_localqcs: local_qcs.len(),
    })
}

fn write_array<A, S, D>(path: &Path, array: &ArrayBase<S, D>) -> Result<()>
where
    A: WritableElement,
    S: Data<Elem = A>,
    D: Dimension,
{
    write_npy(path, array).map_err(|source| ExportError::Npy {
        path: path.display().to_string(),
        source,
    })
}
