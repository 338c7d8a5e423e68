use std::io::BufRead;
use std::path::Path;

use fxhash::FxHashMap;

use crate::errors::{NgsQcError, Result};
use crate::utils::get_dynamic_reader;

///
/// Chromosome name to length table, e.g. parsed from a `hg38.chrom.sizes` file.
///
/// Iteration follows the order of the source file, lookups by name are O(1).
///
#[derive(Debug, Clone, Default)]
pub struct ChromSizes {
    names: Vec<String>,
    sizes: Vec<u32>,
    index: FxHashMap<String, usize>,
}

impl ChromSizes {
    ///
    /// Read a tab-separated `<chrom>\t<length>` file.
    ///
    /// # Arguments
    /// - path: path to the chrom sizes file (may be gzipped)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = get_dynamic_reader(path)?;
        Self::from_reader(reader, &path.display().to_string())
    }

    ///
    /// Parse chrom sizes from any buffered reader. `label` names the source in errors.
    ///
    pub fn from_reader<R: BufRead>(reader: R, label: &str) -> Result<Self> {
        let mut chrom_sizes = ChromSizes::default();

        for (i, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| NgsQcError::io(label, e))?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let invalid = || NgsQcError::InvalidChromSizes {
                path: label.to_string(),
                line: i + 1,
            };

            let mut fields = trimmed.split('\t');
            let chrom = fields.next().ok_or_else(invalid)?;
            let size = fields
                .next()
                .and_then(|s| s.trim().parse::<u32>().ok())
                .ok_or_else(invalid)?;

            chrom_sizes.insert(chrom, size);
        }

        Ok(chrom_sizes)
    }

    /// Add a chromosome, or overwrite the length of a known one in place.
    pub fn insert(&mut self, chrom: &str, size: u32) {
        match self.index.get(chrom) {
            Some(&i) => self.sizes[i] = size,
            None => {
                self.index.insert(chrom.to_string(), self.names.len());
                self.names.push(chrom.to_string());
                self.sizes.push(size);
            }
        }
    }

    pub fn get(&self, chrom: &str) -> Option<u32> {
        self.index.get(chrom).map(|&i| self.sizes[i])
    }

    pub fn contains(&self, chrom: &str) -> bool {
        self.index.contains_key(chrom)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// (name, length) pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.sizes.iter().copied())
    }
}

impl<S: AsRef<str>> FromIterator<(S, u32)> for ChromSizes {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut chrom_sizes = ChromSizes::default();
        for (chrom, size) in iter {
            chrom_sizes.insert(chrom.as_ref(), size);
        }
        chrom_sizes
    }
}
