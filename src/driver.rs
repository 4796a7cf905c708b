use std::fmt::Write as _;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

use exact_sim::{exact_observables, EnumerationConfig, EnumerationError, ExactResult, ModelParams};
use indicatif::{ProgressBar, ProgressStyle};

/// Lattice sizes evaluated when none are requested.
pub const REFERENCE_SHAPES: [LatticeShape; 4] = [
    LatticeShape::new(2, 2),
    LatticeShape::new(2, 3),
    LatticeShape::new(3, 2),
    LatticeShape::new(3, 3),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatticeShape {
    pub n_rows: usize,
    pub n_cols: usize,
}

impl LatticeShape {
    pub const fn new(n_rows: usize, n_cols: usize) -> Self {
        Self { n_rows, n_cols }
    }

    pub fn config(&self, max_sites: usize) -> EnumerationConfig {
        EnumerationConfig::new(self.n_rows, self.n_cols).with_max_sites(max_sites)
    }
}

impl TryFrom<&str> for LatticeShape {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let (rows, cols) = s
            .split_once(|c: char| c == 'x' || c == 'X')
            .ok_or_else(|| format!("invalid lattice '{s}', expected 'NxM' (e.g. '3x4')"))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<usize>()
                .map_err(|_| format!("invalid lattice dimension '{v}' in '{s}'"))
        };
        Ok(Self::new(parse(rows)?, parse(cols)?))
    }
}

impl FromStr for LatticeShape {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

/// Temperature must be positive and finite to map to a finite beta.
pub fn checked_beta(temperature: f64) -> Result<f64, String> {
    if !(temperature.is_finite() && temperature > 0.0) {
        return Err(format!("temperature must be positive and finite, got {temperature}"));
    }
    Ok(exact_sim::beta_from_temperature(temperature))
}

/// Map a temperature ladder to betas, rejecting the first bad temperature.
pub fn betas_from_temperatures(temperatures: &[f64]) -> Result<Vec<f64>, String> {
    temperatures.iter().map(|&t| checked_beta(t)).collect()
}

pub fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::with_template(
        "{msg} [{bar:40}] {pos}/{len} [{elapsed_precise} < {eta_precise}, {per_sec}]",
    )
    .map(|s| s.progress_chars("=> "))
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message("configurations");
    pb
}

/// Run [`exact_observables`] behind a progress bar.
///
/// `should_stop` is polled after every chunk; once it returns true the
/// enumeration stops with [`EnumerationError::Interrupted`].
pub fn run_with_progress(
    config: &EnumerationConfig,
    params: &ModelParams,
    betas: &[f64],
    should_stop: &dyn Fn() -> bool,
) -> Result<ExactResult, EnumerationError> {
    let n_configs = config
        .n_rows
        .checked_mul(config.n_cols)
        .and_then(|n| u32::try_from(n).ok())
        .and_then(|n| 1u64.checked_shl(n))
        .unwrap_or(0);

    let pb = progress_bar(n_configs);
    let interrupted = AtomicBool::new(false);
    let on_chunk = |n: u64| {
        pb.inc(n);
        if should_stop() {
            interrupted.store(true, Ordering::Relaxed);
        }
    };

    let result = exact_observables(config, params, betas, &interrupted, &on_chunk);
    match result {
        Ok(_) => pb.finish(),
        Err(_) => pb.abandon(),
    }
    result
}

/// One row per temperature: T, Z, e, C, |m|, chi, Binder cumulant.
pub fn format_observables(
    shape: LatticeShape,
    temperatures: &[f64],
    result: &ExactResult,
) -> String {
    let specific_heat = result.specific_heat();
    let susceptibility = result.susceptibility();
    let binder = result.binder_cumulant();

    let mut out = String::new();
    let _ = writeln!(out, "{}x{} lattice", shape.n_rows, shape.n_cols);
    let _ = writeln!(
        out,
        "{:>10} {:>16} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "T", "Z", "e", "C", "|m|", "chi", "U4"
    );
    for (t, &temp) in temperatures.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>10.4} {:>16.6e} {:>12.6} {:>12.6} {:>12.6} {:>12.6} {:>12.6}",
            temp,
            result.partition_functions[t],
            result.energies[t],
            specific_heat[t],
            result.mags_abs[t],
            susceptibility[t],
            binder[t],
        );
    }
    out
}
