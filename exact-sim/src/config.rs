use std::borrow::Cow;

use validator::{Validate, ValidationError};

/// Default ceiling on the number of lattice sites (2^30 configurations).
pub const DEFAULT_MAX_SITES: usize = 30;

/// Hard limit imposed by the `u64` configuration counter.
pub const MAX_ENUMERABLE_SITES: usize = 63;

/// Coupling `J` and uniform external field `h` of the Hamiltonian
/// `E = -J Σ s_a s_b - h Σ s_i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParams {
    pub coupling: f64,
    pub field: f64,
}

impl ModelParams {
    pub fn new(coupling: f64, field: f64) -> Self {
        Self { coupling, field }
    }
}

/// Inverse temperature with `k_B = 1`.
pub fn beta_from_temperature(temperature: f64) -> f64 {
    1.0 / temperature
}

fn error_with_message(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Owned(message));
    err
}

fn validate_enumeration_config(cfg: &EnumerationConfig) -> Result<(), ValidationError> {
    if cfg.n_rows < 1 || cfg.n_cols < 1 {
        return Err(error_with_message(
            "lattice_shape",
            format!(
                "lattice dimensions must be >= 1, got {}x{}",
                cfg.n_rows, cfg.n_cols
            ),
        ));
    }
    if cfg.n_rows.checked_mul(cfg.n_cols).is_none() {
        return Err(error_with_message(
            "lattice_shape",
            format!("{}x{} lattice overflows the site count", cfg.n_rows, cfg.n_cols),
        ));
    }
    if cfg.max_sites < 1 || cfg.max_sites > MAX_ENUMERABLE_SITES {
        return Err(error_with_message(
            "max_sites",
            format!(
                "max_sites must be in 1..={MAX_ENUMERABLE_SITES}, got {}",
                cfg.max_sites
            ),
        ));
    }
    Ok(())
}

/// Shape of the lattice to enumerate and the enumeration ceiling.
///
/// The site-count ceiling is checked separately by
/// [`ConfigurationSpace::new`](crate::spins::ConfigurationSpace::new), so a
/// valid config may still describe a lattice too large to enumerate.
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_enumeration_config"))]
pub struct EnumerationConfig {
    pub n_rows: usize,
    pub n_cols: usize,
    pub max_sites: usize,
}

impl EnumerationConfig {
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            max_sites: DEFAULT_MAX_SITES,
        }
    }

    pub fn with_max_sites(mut self, max_sites: usize) -> Self {
        self.max_sites = max_sites;
        self
    }

    pub fn n_sites(&self) -> usize {
        self.n_rows * self.n_cols
    }
}
