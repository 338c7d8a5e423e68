//! # Core types shared by the ngsqc crates.
//!
//! Holds the error taxonomy every pass reports through, the chromosome size
//! table that drives profile allocation, and small reader helpers that make
//! gzip input transparent.
//!
pub mod errors;
pub mod models;
pub mod utils;

// re-export for cleaner imports
pub use errors::{NgsQcError, Result};
pub use models::ChromSizes;
