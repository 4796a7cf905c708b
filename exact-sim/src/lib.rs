//! Exact partition function of the periodic 2D Ising model by exhaustive
//! enumeration of all `2^(n_rows * n_cols)` spin configurations.
//!
//! Intended as a reference for small lattices: Monte Carlo, transfer-matrix
//! and mean-field results can be checked against [`compute_partition_function`]
//! and [`exact_observables`].

pub mod config;
pub mod error;
pub mod geometry;
pub mod partition;
pub mod spins;
pub mod statistics;

pub use config::{beta_from_temperature, EnumerationConfig, ModelParams, DEFAULT_MAX_SITES};
pub use error::EnumerationError;
pub use geometry::Lattice;
pub use partition::{compute_partition_function, exact_observables, partition_function, Enumeration};
pub use statistics::ExactResult;
