use ngsqc_core::{NgsQcError, Result};

use crate::bins::QcMode;
use crate::consts::{DEFAULT_BACKGROUND, DEFAULT_EXTENSION, DEFAULT_SPAN};

/// Knobs for one conversion run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileConfig {
    /// Wiggle bin width in bp.
    pub span: u32,
    /// Reads are extended to this length in bp, 0 keeps them as aligned.
    pub extension: u32,
    /// Local QC lines with a lower intensity are ignored.
    pub background: i32,
    pub mode: QcMode,
    /// Skip records on chromosomes missing from the chrom sizes instead of failing.
    pub skip_unknown: bool,
    /// Hide progress output.
    pub quiet: bool,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        ProfileConfig {
            span: DEFAULT_SPAN,
            extension: DEFAULT_EXTENSION,
            background: DEFAULT_BACKGROUND,
            mode: QcMode::Single,
            skip_unknown: false,
            quiet: false,
        }
    }
}

impl ProfileConfig {
    pub fn validate(&self) -> Result<()> {
        if self.span == 0 {
            return Err(NgsQcError::InvalidSpan(self.span));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProfileConfig::default();
        assert_eq!(config.span, 50);
        assert_eq!(config.extension, 150);
        assert_eq!(config.background, 0);
        assert!(!config.skip_unknown);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_span_is_rejected() {
        let config = ProfileConfig {
            span: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(NgsQcError::InvalidSpan(0))));
    }
}
