/// Exact per-temperature observables from one full enumeration.
///
/// All vectors are indexed by temperature index and have length `betas.len()`.
/// Energies and magnetizations are per spin, so they line up with the
/// averages a Monte Carlo sweep loop reports.
#[derive(Debug, Clone, PartialEq)]
pub struct ExactResult {
    /// Number of lattice sites `N`.
    pub n_sites: usize,
    /// Inverse temperatures the sums were evaluated at.
    pub betas: Vec<f64>,
    /// Z(beta).
    pub partition_functions: Vec<f64>,
    /// ⟨e⟩, mean energy per spin.
    pub energies: Vec<f64>,
    /// ⟨e²⟩.
    pub energies2: Vec<f64>,
    /// ⟨m⟩, mean magnetization per spin.
    pub mags: Vec<f64>,
    /// ⟨|m|⟩.
    pub mags_abs: Vec<f64>,
    /// ⟨m²⟩.
    pub mags2: Vec<f64>,
    /// ⟨m⁴⟩.
    pub mags4: Vec<f64>,
}

impl ExactResult {
    /// Free energy per spin, `-ln Z / (beta N)`.
    pub fn free_energy(&self) -> Vec<f64> {
        let n = self.n_sites as f64;
        self.betas
            .iter()
            .zip(self.partition_functions.iter())
            .map(|(&beta, &z)| -z.ln() / (beta * n))
            .collect()
    }

    /// Specific heat per spin, `beta² N (⟨e²⟩ - ⟨e⟩²)`.
    pub fn specific_heat(&self) -> Vec<f64> {
        let n = self.n_sites as f64;
        self.betas
            .iter()
            .zip(self.energies.iter().zip(self.energies2.iter()))
            .map(|(&beta, (&e, &e2))| beta * beta * n * (e2 - e * e))
            .collect()
    }

    /// Finite-size susceptibility, `beta N (⟨m²⟩ - ⟨|m|⟩²)`.
    pub fn susceptibility(&self) -> Vec<f64> {
        let n = self.n_sites as f64;
        self.betas
            .iter()
            .zip(self.mags2.iter().zip(self.mags_abs.iter()))
            .map(|(&beta, (&m2, &m_abs))| beta * n * (m2 - m_abs * m_abs))
            .collect()
    }

    /// Binder cumulant `1 - ⟨m⁴⟩ / (3 ⟨m²⟩²)`.
    pub fn binder_cumulant(&self) -> Vec<f64> {
        self.mags2
            .iter()
            .zip(self.mags4.iter())
            .map(|(&m2, &m4)| 1.0 - m4 / (3.0 * m2 * m2))
            .collect()
    }
}
