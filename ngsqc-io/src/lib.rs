//! # Output for binned profiles.
//!
//! Persists a filled [ngsqc_profile::ProfileStore] to disk. Every chromosome
//! gets its own directory of NumPy `.npy` arrays, and a single `meta.json`
//! describes the run:
//!
//! ```text
//! out/
//! ├── meta.json
//! └── chr1/
//!     ├── wigs.npy                  (n_wiggles, 2) u32: total, unique
//!     ├── localqcs_intensity.npy    (n_localqcs,)  i32
//!     ├── localqcs_dispersion.npy   (n_localqcs,)  f64
//!     └── localqcs_flag.npy         (n_localqcs,)  u8, five replicate mode only
//! ```
//!
pub mod consts;
pub mod error;
pub mod meta;
pub mod npy;

// re-expose core functions
pub use consts::*;
pub use error::*;
pub use meta::*;
pub use npy::*;
