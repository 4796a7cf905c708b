//! Front end for `exact_sim`: shared driver helpers for the `ising-exact`
//! binary and, with the `python` feature, the `_core` extension module.

pub mod driver;

#[cfg(feature = "python")]
mod python;
