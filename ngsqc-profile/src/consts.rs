/// Default wiggle bin width in bp.
pub const DEFAULT_SPAN: u32 = 50;
/// Default read extension in bp.
pub const DEFAULT_EXTENSION: u32 = 150;
pub const DEFAULT_BACKGROUND: i32 = 0;

/// Width in bp of a local QC window. Fixed, independent of the wiggle span.
///
/// NOTE: window counts follow the indexing grid, `ceil(size / 500)`. Sizing
/// the array with `(size + 499) / 499` over-allocates for some lengths, e.g.
/// 1000 bp would give 3 windows instead of 2.
pub const LOCAL_QC_SPAN: u32 = 500;

pub const READ_COLUMNS: usize = 6;
pub const LOCAL_QC_COLUMNS: usize = 7;
pub const LOCAL_QC5_COLUMNS: usize = 19;

/// Number of random samplings per window in five-replicate mode.
pub const REPLICATES: usize = 5;

/// Maximum deviation (percentage points) from 90/70/50 for a sampling to pass.
pub const DISPERSION_THRESHOLD: f64 = 10.0;

/// Lines between two progress updates.
pub const PROGRESS_INTERVAL: usize = 1_000_000;
