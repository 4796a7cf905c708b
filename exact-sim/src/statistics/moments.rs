use super::results::ExactResult;

/// Boltzmann-weighted running sums over a ladder of inverse temperatures.
///
/// Each configuration contributes `w = exp(-beta * E)` to the partition sum
/// and `w * x` to every observable sum, in the order it is pushed. Nothing is
/// rescaled, so sums overflow to infinity exactly like the bare partition
/// function does.
pub struct BoltzmannMoments {
    n_sites: usize,
    betas: Vec<f64>,
    weight: Vec<f64>,
    energy: Vec<f64>,
    energy2: Vec<f64>,
    mag: Vec<f64>,
    mag_abs: Vec<f64>,
    mag2: Vec<f64>,
    mag4: Vec<f64>,
}

impl BoltzmannMoments {
    pub fn new(betas: &[f64], n_sites: usize) -> Self {
        let n_temps = betas.len();
        Self {
            n_sites,
            betas: betas.to_vec(),
            weight: vec![0.0; n_temps],
            energy: vec![0.0; n_temps],
            energy2: vec![0.0; n_temps],
            mag: vec![0.0; n_temps],
            mag_abs: vec![0.0; n_temps],
            mag2: vec![0.0; n_temps],
            mag4: vec![0.0; n_temps],
        }
    }

    /// Fold in one configuration with total `energy` and total magnetization `mag`.
    #[inline]
    pub fn push(&mut self, energy: f64, mag: i64) {
        let n = self.n_sites as f64;
        let e = energy / n;
        let e2 = e * e;
        let m = mag as f64 / n;
        let m2 = m * m;
        let m4 = m2 * m2;

        for (t, &beta) in self.betas.iter().enumerate() {
            let w = (-beta * energy).exp();
            self.weight[t] += w;
            self.energy[t] += w * e;
            self.energy2[t] += w * e2;
            self.mag[t] += w * m;
            self.mag_abs[t] += w * m.abs();
            self.mag2[t] += w * m2;
            self.mag4[t] += w * m4;
        }
    }

    /// Normalize the weighted sums by the partition function.
    pub fn finish(self) -> ExactResult {
        let average = |sums: &[f64]| -> Vec<f64> {
            sums.iter()
                .zip(self.weight.iter())
                .map(|(&s, &z)| s / z)
                .collect()
        };

        ExactResult {
            n_sites: self.n_sites,
            energies: average(&self.energy),
            energies2: average(&self.energy2),
            mags: average(&self.mag),
            mags_abs: average(&self.mag_abs),
            mags2: average(&self.mag2),
            mags4: average(&self.mag4),
            partition_functions: self.weight,
            betas: self.betas,
        }
    }
}
