pub mod chrom_sizes;

// re-export for cleaner imports
pub use self::chrom_sizes::ChromSizes;
