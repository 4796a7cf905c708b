use crate::config::ModelParams;
use crate::geometry::{Direction, Lattice};

/// Sum of `s_i * s_j` over every forward bond of the lattice.
///
/// `spins`: flat row-major configuration of length `lattice.n_sites`, values +1/-1.
/// Self-bonds on a length-1 axis contribute +1 each.
pub fn bond_sum(lattice: &Lattice, spins: &[i8]) -> i64 {
    debug_assert_eq!(spins.len(), lattice.n_sites);
    let mut total = 0i64;
    for (i, &si) in spins.iter().enumerate() {
        for dir in Direction::ALL {
            let sj = spins[lattice.neighbor(i, dir)];
            total += (si * sj) as i64;
        }
    }
    total
}

/// Total magnetization `Σ s_i`.
pub fn magnetization(spins: &[i8]) -> i64 {
    spins.iter().map(|&s| s as i64).sum()
}

/// Total energy `-J * bond_sum - h * magnetization`.
pub fn energy(lattice: &Lattice, spins: &[i8], params: &ModelParams) -> f64 {
    total_energy(bond_sum(lattice, spins), magnetization(spins), params)
}

#[inline]
pub(crate) fn total_energy(bonds: i64, mag: i64, params: &ModelParams) -> f64 {
    -params.coupling * bonds as f64 - params.field * mag as f64
}
