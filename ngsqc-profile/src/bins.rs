//! Fixed-width aggregation cells: read-depth bins and local QC windows.

/// Read counts over one wiggle bin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WiggleBin {
    pub total: u32,
    pub unique: u32,
}

impl WiggleBin {
    pub fn add(&mut self, is_unique: bool) {
        self.total += 1;
        if is_unique {
            self.unique += 1;
        }
    }
}

/// Local QC for one 500 bp window, single sampling.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocalQc {
    pub intensity: i32,
    pub dispersion: f64,
}

/// Local QC for one 500 bp window, five replicate samplings.
///
/// Bit `k` of `flag` is set iff at least `k + 1` replicates passed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocalQc5 {
    pub intensity: i32,
    pub dispersion: f64,
    pub flag: u8,
}

/// Which local QC variant a run produces. Chosen once per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QcMode {
    #[default]
    Single,
    FiveReplicates,
}

impl QcMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            QcMode::Single => "single",
            QcMode::FiveReplicates => "five_replicates",
        }
    }
}

/// The local QC windows of one chromosome.
#[derive(Debug, Clone, PartialEq)]
pub enum LocalQcs {
    Single(Vec<LocalQc>),
    FiveReplicates(Vec<LocalQc5>),
}

impl LocalQcs {
    /// Zero-filled windows of the given variant.
    pub fn zeroed(mode: QcMode, n_windows: usize) -> Self {
        match mode {
            QcMode::Single => LocalQcs::Single(vec![LocalQc::default(); n_windows]),
            QcMode::FiveReplicates => {
                LocalQcs::FiveReplicates(vec![LocalQc5::default(); n_windows])
            }
        }
    }

    pub fn mode(&self) -> QcMode {
        match self {
            LocalQcs::Single(_) => QcMode::Single,
            LocalQcs::FiveReplicates(_) => QcMode::FiveReplicates,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            LocalQcs::Single(windows) => windows.len(),
            LocalQcs::FiveReplicates(windows) => windows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn intensities(&self) -> Vec<i32> {
        match self {
            LocalQcs::Single(windows) => windows.iter().map(|w| w.intensity).collect(),
            LocalQcs::FiveReplicates(windows) => windows.iter().map(|w| w.intensity).collect(),
        }
    }

    pub fn dispersions(&self) -> Vec<f64> {
        match self {
            LocalQcs::Single(windows) => windows.iter().map(|w| w.dispersion).collect(),
            LocalQcs::FiveReplicates(windows) => windows.iter().map(|w| w.dispersion).collect(),
        }
    }

    /// Replicate flags, `None` for single-sampling windows.
    pub fn flags(&self) -> Option<Vec<u8>> {
        match self {
            LocalQcs::Single(_) => None,
            LocalQcs::FiveReplicates(windows) => Some(windows.iter().map(|w| w.flag).collect()),
        }
    }

    /// Overwrite window `idx`. Returns false, writing nothing, when out of range.
    ///
    /// A `flag` given for single-sampling windows is dropped; a missing `flag`
    /// leaves the stored flag of five-replicate windows untouched.
    pub(crate) fn set(
        &mut self,
        idx: usize,
        intensity: i32,
        dispersion: f64,
        flag: Option<u8>,
    ) -> bool {
        match self {
            LocalQcs::Single(windows) => match windows.get_mut(idx) {
                Some(window) => {
                    window.intensity = intensity;
                    window.dispersion = dispersion;
                    true
                }
                None => false,
            },
            LocalQcs::FiveReplicates(windows) => match windows.get_mut(idx) {
                Some(window) => {
                    window.intensity = intensity;
                    window.dispersion = dispersion;
                    if let Some(flag) = flag {
                        window.flag = flag;
                    }
                    true
                }
                None => false,
            },
        }
    }
}
