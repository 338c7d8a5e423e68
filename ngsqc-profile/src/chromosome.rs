use ngsqc_core::{NgsQcError, Result};

use crate::bins::{LocalQcs, QcMode, WiggleBin};
use crate::consts::LOCAL_QC_SPAN;

///
/// Binned read depth and local QC windows for a single chromosome.
///
/// Both arrays are allocated on first write and never resized. An array that
/// was never allocated reads back as all zeros. Writes whose bin index falls
/// outside the array are dropped without error: extended reads and windows
/// may run past the chromosome end.
///
#[derive(Debug, Clone)]
pub struct ChromosomeProfile {
    size: u32,
    span: u32,
    mode: QcMode,
    n_wiggles: usize,
    n_local_qcs: usize,
    wiggles: Option<Vec<WiggleBin>>,
    local_qcs: Option<LocalQcs>,
}

/// Number of `width` sized bins needed to cover `size` bases.
pub fn bin_count(size: u32, width: u32) -> usize {
    size.div_ceil(width) as usize
}

impl ChromosomeProfile {
    ///
    /// Create an empty profile. Nothing is allocated until the first write.
    ///
    /// # Arguments
    /// - size: chromosome length in bp
    /// - span: wiggle bin width in bp, [NgsQcError::InvalidSpan] when 0
    /// - mode: local QC variant stored for this chromosome
    pub fn new(size: u32, span: u32, mode: QcMode) -> Result<Self> {
        if span == 0 {
            return Err(NgsQcError::InvalidSpan(span));
        }
        Ok(ChromosomeProfile {
            size,
            span,
            mode,
            n_wiggles: bin_count(size, span),
            n_local_qcs: bin_count(size, LOCAL_QC_SPAN),
            wiggles: None,
            local_qcs: None,
        })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn span(&self) -> u32 {
        self.span
    }

    pub fn mode(&self) -> QcMode {
        self.mode
    }

    pub fn n_wiggles(&self) -> usize {
        self.n_wiggles
    }

    pub fn n_local_qcs(&self) -> usize {
        self.n_local_qcs
    }

    /// True once either array holds data.
    pub fn is_allocated(&self) -> bool {
        self.wiggles.is_some() || self.local_qcs.is_some()
    }

    ///
    /// Count a read over every bin in `[start / span, end / span]`.
    ///
    /// Negative starts are clamped to 0, bins past the chromosome end are ignored.
    pub fn add_read(&mut self, start: i64, end: i64, is_unique: bool) {
        let n_wiggles = self.n_wiggles;
        let wiggles = self
            .wiggles
            .get_or_insert_with(|| vec![WiggleBin::default(); n_wiggles]);

        if n_wiggles == 0 {
            return;
        }

        let span = self.span as i64;
        let first = start.max(0) / span;
        let last = (end / span).min(n_wiggles as i64 - 1);

        for i in first..=last {
            wiggles[i as usize].add(is_unique);
        }
    }

    /// Overwrite the single-sampling QC of the window holding `position`.
    pub fn add_local_qc(&mut self, position: i64, intensity: i32, dispersion: f64) {
        self.set_local_qc(position, intensity, dispersion, None);
    }

    /// Overwrite the five-replicate QC of the window holding `position`.
    pub fn add_local_qc5(&mut self, position: i64, intensity: i32, dispersion: f64, flag: u8) {
        self.set_local_qc(position, intensity, dispersion, Some(flag));
    }

    fn set_local_qc(&mut self, position: i64, intensity: i32, dispersion: f64, flag: Option<u8>) {
        let (mode, n_local_qcs) = (self.mode, self.n_local_qcs);
        let windows = self
            .local_qcs
            .get_or_insert_with(|| LocalQcs::zeroed(mode, n_local_qcs));

        // truncating division: positions in (-500, 0) land in window 0
        if let Ok(idx) = usize::try_from(position / LOCAL_QC_SPAN as i64) {
            windows.set(idx, intensity, dispersion, flag);
        }
    }

    ///
    /// `(total, unique)` read counts for every bin, zeros if no read was added.
    ///
    pub fn export_wiggles(&self) -> Vec<WiggleBin> {
        match &self.wiggles {
            Some(wiggles) => wiggles.clone(),
            None => vec![WiggleBin::default(); self.n_wiggles],
        }
    }

    ///
    /// One record per QC window, zeros if no window was written.
    ///
    pub fn export_local_qcs(&self) -> LocalQcs {
        match &self.local_qcs {
            Some(windows) => windows.clone(),
            None => LocalQcs::zeroed(self.mode, self.n_local_qcs),
        }
    }

    /// Move both arrays out, zero-filled if absent, leaving the profile released.
    pub fn take_arrays(&mut self) -> (Vec<WiggleBin>, LocalQcs) {
        let wiggles = self
            .wiggles
            .take()
            .unwrap_or_else(|| vec![WiggleBin::default(); self.n_wiggles]);
        let local_qcs = self
            .local_qcs
            .take()
            .unwrap_or_else(|| LocalQcs::zeroed(self.mode, self.n_local_qcs));
        (wiggles, local_qcs)
    }

    /// Drop both arrays. Metadata stays, later exports read back as zeros.
    pub fn release(&mut self) {
        self.wiggles = None;
        self.local_qcs = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn bin(total: u32, unique: u32) -> WiggleBin {
        WiggleBin { total, unique }
    }

    fn totals(profile: &ChromosomeProfile) -> Vec<u32> {
        profile.export_wiggles().iter().map(|w| w.total).collect()
    }

    #[rstest]
    #[case(1000, 500, 2)]
    #[case(1000, 50, 20)]
    #[case(1001, 50, 21)]
    #[case(49, 50, 1)]
    #[case(0, 50, 0)]
    fn test_wiggle_count(#[case] size: u32, #[case] span: u32, #[case] expected: usize) {
        let profile = ChromosomeProfile::new(size, span, QcMode::Single).unwrap();
        assert_eq!(profile.n_wiggles(), expected);
        assert_eq!(profile.export_wiggles().len(), expected);
    }

    #[rstest]
    fn test_zero_span_is_an_error() {
        assert!(matches!(
            ChromosomeProfile::new(1000, 0, QcMode::Single),
            Err(NgsQcError::InvalidSpan(0))
        ));
    }

    #[rstest]
    #[case(1000, 2)]
    #[case(1001, 3)]
    #[case(500, 1)]
    #[case(499, 1)]
    #[case(1, 1)]
    fn test_local_qc_count_follows_500bp_grid(#[case] size: u32, #[case] expected: usize) {
        let profile = ChromosomeProfile::new(size, 50, QcMode::Single).unwrap();
        assert_eq!(profile.n_local_qcs(), expected);
    }

    #[rstest]
    fn test_single_read_scenario() {
        let mut profile = ChromosomeProfile::new(1000, 500, QcMode::Single).unwrap();
        profile.add_read(100, 200, true);

        let wiggles = profile.export_wiggles();
        assert_eq!(wiggles[0], bin(1, 1));
        assert_eq!(wiggles[1], WiggleBin::default());
        assert_eq!(profile.n_local_qcs(), 2);
    }

    #[rstest]
    fn test_read_touches_inclusive_bin_range() {
        let mut profile = ChromosomeProfile::new(500, 50, QcMode::Single).unwrap();
        // end == 150 lands on the first base of bin 3, which is counted
        profile.add_read(40, 150, false);
        assert_eq!(totals(&profile)[..5].to_vec(), vec![1, 1, 1, 1, 0]);
        assert!(profile.export_wiggles().iter().all(|w| w.unique == 0));
    }

    #[rstest]
    fn test_negative_start_is_clamped() {
        let mut profile = ChromosomeProfile::new(500, 50, QcMode::Single).unwrap();
        profile.add_read(-120, 60, true);
        assert_eq!(totals(&profile)[..3].to_vec(), vec![1, 1, 0]);
    }

    #[rstest]
    fn test_read_past_chromosome_end_is_truncated() {
        let mut profile = ChromosomeProfile::new(120, 50, QcMode::Single).unwrap();
        profile.add_read(90, 400, true);
        assert_eq!(totals(&profile), vec![0, 1, 1]);

        // entirely out of range: dropped without touching valid bins
        profile.add_read(1000, 1100, true);
        assert_eq!(totals(&profile), vec![0, 1, 1]);
    }

    #[rstest]
    fn test_local_qc_last_write_wins() {
        let mut profile = ChromosomeProfile::new(1000, 50, QcMode::Single).unwrap();
        profile.add_local_qc(500, 30, 4.0);
        profile.add_local_qc(999, 12, 1.5);

        match profile.export_local_qcs() {
            LocalQcs::Single(windows) => {
                assert_eq!(windows.len(), 2);
                assert_eq!(windows[0].intensity, 0);
                assert_eq!(windows[1].intensity, 12);
                assert_eq!(windows[1].dispersion, 1.5);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[rstest]
    fn test_local_qc_out_of_range_is_dropped() {
        let mut profile = ChromosomeProfile::new(1000, 50, QcMode::FiveReplicates).unwrap();
        // 1000 / 500 == 2, one past the last window
        profile.add_local_qc5(1000, 8, 2.0, 31);
        profile.add_local_qc5(-600, 8, 2.0, 31);

        let windows = profile.export_local_qcs();
        assert_eq!(windows.intensities(), vec![0, 0]);
        assert_eq!(windows.flags(), Some(vec![0, 0]));
    }

    #[rstest]
    fn test_never_populated_profile_exports_zeros() {
        let profile = ChromosomeProfile::new(2345, 100, QcMode::FiveReplicates).unwrap();
        assert!(!profile.is_allocated());

        let wiggles = profile.export_wiggles();
        assert_eq!(wiggles.len(), 24);
        assert!(wiggles.iter().all(|w| *w == WiggleBin::default()));

        let windows = profile.export_local_qcs();
        assert_eq!(windows.len(), 5);
        assert_eq!(windows.mode(), QcMode::FiveReplicates);
        assert!(windows.dispersions().iter().all(|d| *d == 0.0));
    }

    #[rstest]
    fn test_release_and_take() {
        let mut profile = ChromosomeProfile::new(100, 50, QcMode::Single).unwrap();
        profile.add_read(0, 10, true);
        profile.add_local_qc(0, 5, 0.5);
        assert!(profile.is_allocated());

        let (wiggles, windows) = profile.take_arrays();
        assert_eq!(wiggles[0].total, 1);
        assert_eq!(windows.intensities(), vec![5]);
        assert!(!profile.is_allocated());

        profile.add_read(0, 10, true);
        profile.release();
        assert!(!profile.is_allocated());
        assert_eq!(totals(&profile), vec![0, 0]);
        assert_eq!(profile.size(), 100);
    }
}
