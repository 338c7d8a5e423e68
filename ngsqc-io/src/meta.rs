use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use ngsqc_profile::QcMode;

use crate::error::Result;

/// Per chromosome attributes stored next to the arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChromMeta {
    pub chrom: String,
    pub size: u32,
    pub span: u32,
    pub n_wiggles: usize,
    pub n_localqcs: usize,
}

/// Content of `meta.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportMeta {
    pub qc_mode: String,
    pub span: u32,
    pub local_qc_span: u32,
    pub chromosomes: Vec<ChromMeta>,
}

impl ExportMeta {
    pub fn new(mode: QcMode, span: u32, local_qc_span: u32) -> Self {
        ExportMeta {
            qc_mode: mode.as_str().to_string(),
            span,
            local_qc_span,
            chromosomes: Vec::new(),
        }
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        Ok(serde_json::from_reader(reader)?)
    }
}
