//! Error types for exact-sim.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnumerationError {
    #[error("invalid enumeration request: {0}")]
    InvalidConfig(#[from] validator::ValidationErrors),

    #[error("{n_sites} sites exceed the enumeration ceiling of {max_sites} (2^{n_sites} configurations)")]
    TooManySites { n_sites: usize, max_sites: usize },

    #[error("temperature ladder is empty")]
    EmptyTemperatureLadder,

    #[error("interrupted")]
    Interrupted,
}

pub type Result<T> = std::result::Result<T, EnumerationError>;
