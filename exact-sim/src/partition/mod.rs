use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};
use validator::Validate;

use crate::config::{EnumerationConfig, ModelParams};
use crate::error::{EnumerationError, Result};
use crate::geometry::Lattice;
use crate::spins::energy::total_energy;
use crate::spins::{bond_sum, decode, magnetization, ConfigurationSpace};
use crate::statistics::{BoltzmannMoments, ExactResult};

/// Configurations processed between interrupt checks and progress callbacks.
pub const CHUNK_SIZE: u64 = 1 << 16;

/// A validated lattice together with its configuration space.
pub struct Enumeration {
    lattice: Lattice,
    space: ConfigurationSpace,
}

impl Enumeration {
    /// Validate `config` and check the site ceiling before anything is
    /// allocated or enumerated.
    pub fn new(config: &EnumerationConfig) -> Result<Self> {
        config.validate()?;
        let space = ConfigurationSpace::new(config.n_sites(), config.max_sites)?;
        let lattice = Lattice::new(config.n_rows, config.n_cols);
        Ok(Self { lattice, space })
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn space(&self) -> &ConfigurationSpace {
        &self.space
    }

    /// Visit every configuration once, in counter order.
    ///
    /// `visit(energy, magnetization)` is called per configuration.
    /// `interrupted` is checked before each chunk of [`CHUNK_SIZE`]
    /// configurations, and `on_chunk(n)` is called after each chunk with the
    /// number of configurations it held (useful for progress bars).
    pub fn run(
        &self,
        params: &ModelParams,
        interrupted: &AtomicBool,
        on_chunk: &dyn Fn(u64),
        mut visit: impl FnMut(f64, i64),
    ) -> Result<()> {
        debug!(
            n_rows = self.lattice.n_rows,
            n_cols = self.lattice.n_cols,
            n_configurations = self.space.len(),
            "enumerating configurations"
        );

        let mut spins = vec![0i8; self.lattice.n_sites];
        for chunk in self.space.chunks(CHUNK_SIZE) {
            if interrupted.load(Ordering::Relaxed) {
                return Err(EnumerationError::Interrupted);
            }
            let n_in_chunk = chunk.end - chunk.start;
            for code in chunk {
                decode(code, &mut spins);
                let mag = magnetization(&spins);
                let e = total_energy(bond_sum(&self.lattice, &spins), mag, params);
                visit(e, mag);
            }
            on_chunk(n_in_chunk);
        }
        Ok(())
    }
}

/// Exact partition function `Z = Σ exp(-beta E)` of the periodic
/// `n_rows x n_cols` Ising model, with the default site ceiling.
///
/// The sum is accumulated directly in `f64`. Extreme `beta * E` overflows to
/// infinity, which is returned as-is.
pub fn compute_partition_function(
    coupling: f64,
    field: f64,
    beta: f64,
    n_rows: usize,
    n_cols: usize,
) -> Result<f64> {
    partition_function(
        &EnumerationConfig::new(n_rows, n_cols),
        &ModelParams::new(coupling, field),
        beta,
    )
}

/// [`compute_partition_function`] with an explicit enumeration config.
pub fn partition_function(
    config: &EnumerationConfig,
    params: &ModelParams,
    beta: f64,
) -> Result<f64> {
    let enumeration = Enumeration::new(config)?;
    let never = AtomicBool::new(false);

    let mut z = 0.0f64;
    enumeration.run(params, &never, &|_| {}, |e, _| {
        z += (-beta * e).exp();
    })?;

    if !z.is_finite() {
        warn!(z, beta, "partition function is not finite");
    }
    info!(
        n_rows = config.n_rows,
        n_cols = config.n_cols,
        beta,
        z,
        "partition function computed"
    );
    Ok(z)
}

/// Exact Z and Boltzmann-weighted observables for every inverse temperature
/// in `betas`, from a single enumeration pass.
pub fn exact_observables(
    config: &EnumerationConfig,
    params: &ModelParams,
    betas: &[f64],
    interrupted: &AtomicBool,
    on_chunk: &dyn Fn(u64),
) -> Result<ExactResult> {
    if betas.is_empty() {
        return Err(EnumerationError::EmptyTemperatureLadder);
    }
    let enumeration = Enumeration::new(config)?;

    let mut moments = BoltzmannMoments::new(betas, enumeration.space().n_sites());
    enumeration.run(params, interrupted, on_chunk, |e, mag| moments.push(e, mag))?;
    let result = moments.finish();

    let n_non_finite = result
        .partition_functions
        .iter()
        .filter(|z| !z.is_finite())
        .count();
    if n_non_finite > 0 {
        warn!(n_non_finite, "partition function is not finite at some temperatures");
    }
    info!(
        n_rows = config.n_rows,
        n_cols = config.n_cols,
        n_temps = betas.len(),
        "exact observables computed"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256StarStar;
    use std::sync::atomic::AtomicU64;

    fn z(coupling: f64, field: f64, beta: f64, n_rows: usize, n_cols: usize) -> f64 {
        compute_partition_function(coupling, field, beta, n_rows, n_cols).unwrap()
    }

    /// Transfer-matrix result for a 1xL ring, including the L vertical self-bonds.
    fn ring_closed_form(coupling: f64, field: f64, beta: f64, len: usize) -> f64 {
        let (k, b) = (beta * coupling, beta * field);
        let root = ((2.0 * k).exp() * b.sinh().powi(2) + (-2.0 * k).exp()).sqrt();
        let lp = k.exp() * b.cosh() + root;
        let lm = k.exp() * b.cosh() - root;
        (k * len as f64).exp() * (lp.powi(len as i32) + lm.powi(len as i32))
    }

    #[test]
    fn test_2x2_closed_form() {
        // Each neighboring pair is bonded twice on a 2x2 torus.
        let expected = 2.0 * 8.0f64.exp() + 12.0 + 2.0 * (-8.0f64).exp();
        assert_relative_eq!(z(1.0, 0.0, 1.0, 2, 2), expected, max_relative = 1e-9);
    }

    #[test]
    fn test_1x1_self_bond() {
        // Two self-bonds: E = -2J - h s.
        for &(coupling, field, beta) in &[(1.0f64, 0.0f64, 1.0f64), (0.3, 0.0, 2.0), (-1.2, 0.7, 0.5)] {
            let expected = 2.0 * (2.0 * beta * coupling).exp() * (beta * field).cosh();
            assert_relative_eq!(z(coupling, field, beta, 1, 1), expected, max_relative = 1e-12);
        }
        assert_eq!(z(0.0, 0.0, 1.0, 1, 1), 2.0);
    }

    #[test]
    fn test_1xl_ring_transfer_matrix() {
        for len in 1..=8 {
            let expected = ring_closed_form(0.7, 0.3, 0.9, len);
            assert_relative_eq!(z(0.7, 0.3, 0.9, 1, len), expected, max_relative = 1e-10);
            assert_relative_eq!(z(0.7, 0.3, 0.9, len, 1), expected, max_relative = 1e-10);
        }
    }

    #[test]
    fn test_free_spins_count_configurations() {
        for &(n_rows, n_cols) in &[(1, 1), (2, 2), (2, 3), (3, 3), (4, 4)] {
            let expected = (1u64 << (n_rows * n_cols)) as f64;
            assert_eq!(z(0.0, 0.0, 1.3, n_rows, n_cols), expected);
        }
    }

    #[test]
    fn test_transpose_symmetry() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(42);
        for &(n_rows, n_cols) in &[(2, 3), (2, 4), (1, 5), (3, 4)] {
            for _ in 0..3 {
                let coupling = rng.gen_range(-1.5..1.5);
                let field = rng.gen_range(-1.0..1.0);
                let beta = rng.gen_range(0.05..1.0);
                let a = z(coupling, field, beta, n_rows, n_cols);
                let b = z(coupling, field, beta, n_cols, n_rows);
                assert!(a > 0.0);
                assert_relative_eq!(a, b, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_field_reversal_symmetry() {
        let a = z(0.8, 0.4, 0.7, 3, 3);
        let b = z(0.8, -0.4, 0.7, 3, 3);
        assert_relative_eq!(a, b, max_relative = 1e-12);
    }

    #[test]
    fn test_high_temperature_limit() {
        let n_states = 512.0;
        let mut prev_gap = f64::INFINITY;
        for &beta in &[1e-1, 1e-2, 1e-3, 1e-4, 1e-6] {
            let gap = (z(1.0, 0.5, beta, 3, 3) - n_states).abs();
            assert!(gap < prev_gap);
            prev_gap = gap;
        }
        assert_relative_eq!(z(1.0, 0.5, 1e-9, 3, 3), n_states, max_relative = 1e-6);
        assert_eq!(z(1.0, 0.5, 0.0, 3, 3), n_states);
    }

    #[test]
    fn test_overflow_surfaced() {
        let value = z(1.0, 0.0, 1000.0, 2, 2);
        assert!(value.is_infinite() && value > 0.0);
    }

    #[test]
    fn test_preconditions() {
        assert!(matches!(
            compute_partition_function(1.0, 0.0, 1.0, 0, 3),
            Err(EnumerationError::InvalidConfig(_))
        ));
        assert!(matches!(
            compute_partition_function(1.0, 0.0, 1.0, 8, 8),
            Err(EnumerationError::TooManySites {
                n_sites: 64,
                max_sites: 30
            })
        ));

        let cfg = EnumerationConfig::new(3, 3).with_max_sites(8);
        let err = partition_function(&cfg, &ModelParams::new(1.0, 0.0), 1.0).unwrap_err();
        assert!(matches!(err, EnumerationError::TooManySites { n_sites: 9, max_sites: 8 }));
    }

    #[test]
    fn test_ladder_matches_single_temperature() {
        let cfg = EnumerationConfig::new(3, 3);
        let params = ModelParams::new(1.0, 0.2);
        let betas = [0.1, 0.4, 0.44, 1.0];
        let res = exact_observables(&cfg, &params, &betas, &AtomicBool::new(false), &|_| {})
            .unwrap();

        for (t, &beta) in betas.iter().enumerate() {
            assert_eq!(
                res.partition_functions[t],
                partition_function(&cfg, &params, beta).unwrap()
            );
        }
    }

    #[test]
    fn test_zero_field_magnetization_vanishes() {
        let cfg = EnumerationConfig::new(3, 3);
        let res = exact_observables(
            &cfg,
            &ModelParams::new(1.0, 0.0),
            &[0.2, 0.6],
            &AtomicBool::new(false),
            &|_| {},
        )
        .unwrap();
        for t in 0..2 {
            assert!(res.mags[t].abs() < 1e-12);
            assert!(res.mags_abs[t] > 0.0);
            assert!(res.mags2[t] <= res.mags_abs[t]);
        }
        // Ordering increases as temperature drops.
        assert!(res.mags2[1] > res.mags2[0]);
    }

    #[test]
    fn test_mean_energy_is_log_derivative() {
        let cfg = EnumerationConfig::new(3, 3);
        let params = ModelParams::new(1.0, 0.1);
        let beta = 0.4;
        let db = 1e-5;

        let res = exact_observables(&cfg, &params, &[beta], &AtomicBool::new(false), &|_| {})
            .unwrap();
        let ln_z = |b: f64| partition_function(&cfg, &params, b).unwrap().ln();
        let numeric = -(ln_z(beta + db) - ln_z(beta - db)) / (2.0 * db);

        assert_relative_eq!(res.energies[0] * 9.0, numeric, max_relative = 1e-6);
    }

    #[test]
    fn test_progress_and_interrupt() {
        let cfg = EnumerationConfig::new(4, 5);
        let params = ModelParams::new(1.0, 0.0);
        let seen = AtomicU64::new(0);
        let on_chunk = |n: u64| {
            seen.fetch_add(n, Ordering::Relaxed);
        };
        exact_observables(&cfg, &params, &[1.0], &AtomicBool::new(false), &on_chunk).unwrap();
        assert_eq!(seen.load(Ordering::Relaxed), 1 << 20);

        let err =
            exact_observables(&cfg, &params, &[1.0], &AtomicBool::new(true), &|_| {}).unwrap_err();
        assert!(matches!(err, EnumerationError::Interrupted));
    }

    #[test]
    fn test_empty_ladder_rejected() {
        let err = exact_observables(
            &EnumerationConfig::new(2, 2),
            &ModelParams::new(1.0, 0.0),
            &[],
            &AtomicBool::new(false),
            &|_| {},
        )
        .unwrap_err();
        assert!(matches!(err, EnumerationError::EmptyTemperatureLadder));
    }

    #[test]
    fn test_enumeration_visits_every_configuration() {
        let enumeration = Enumeration::new(&EnumerationConfig::new(2, 2)).unwrap();
        assert_eq!(enumeration.space().n_sites(), enumeration.lattice().n_sites);
        assert_eq!(enumeration.space().len(), 16);
        let mut count = 0u64;
        let mut mag_total = 0i64;
        enumeration
            .run(&ModelParams::new(1.0, 0.0), &AtomicBool::new(false), &|_| {}, |_, m| {
                count += 1;
                mag_total += m;
            })
            .unwrap();
        assert_eq!(count, 16);
        assert_eq!(mag_total, 0);
    }
}
