/// Forward bond directions on the square lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `(i, j) -> ((i + 1) mod n_rows, j)`
    Down = 0,
    /// `(i, j) -> (i, (j + 1) mod n_cols)`
    Right = 1,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Down, Direction::Right];
}

/// Periodic `n_rows x n_cols` square lattice with precomputed neighbor table.
///
/// Sites are indexed in row-major order: site `k` sits at row `k / n_cols`,
/// column `k % n_cols`. Each site owns one forward bond per [`Direction`], so
/// iterating over all sites and both directions visits every periodic bond
/// exactly once.
///
/// On an axis of length 1 the forward neighbor wraps back onto the site
/// itself, giving a self-bond whose product `s_i * s_i` is always 1. On an
/// axis of length 2 the two sites are joined by two distinct bonds (the
/// direct one and the wraparound one).
#[derive(Debug, Clone)]
pub struct Lattice {
    /// Number of rows (`Nx`).
    pub n_rows: usize,
    /// Number of columns (`Ny`).
    pub n_cols: usize,
    /// Total number of sites (`n_rows * n_cols`).
    pub n_sites: usize,
    /// Forward neighbor table, length `n_sites * 2`.
    /// Layout: `neighbors[i * 2 + dir]` with `dir` a [`Direction`].
    neighbors: Vec<u32>,
}

impl Lattice {
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        let n_sites = n_rows * n_cols;
        let mut neighbors = vec![0u32; n_sites * 2];

        for i in 0..n_sites {
            let (row, col) = (i / n_cols, i % n_cols);
            let down = ((row + 1) % n_rows) * n_cols + col;
            let right = row * n_cols + (col + 1) % n_cols;
            neighbors[i * 2 + Direction::Down as usize] = down as u32;
            neighbors[i * 2 + Direction::Right as usize] = right as u32;
        }

        Self {
            n_rows,
            n_cols,
            n_sites,
            neighbors,
        }
    }

    /// Number of bonds, counting self-bonds and doubled bonds individually.
    pub fn n_bonds(&self) -> usize {
        self.n_sites * Direction::ALL.len()
    }

    #[inline]
    pub fn site(&self, row: usize, col: usize) -> usize {
        row * self.n_cols + col
    }

    #[inline]
    pub fn coords(&self, site: usize) -> (usize, usize) {
        (site / self.n_cols, site % self.n_cols)
    }

    /// Return the forward neighbor of `site` in direction `dir`.
    #[inline]
    pub fn neighbor(&self, site: usize, dir: Direction) -> usize {
        self.neighbors[site * 2 + dir as usize] as usize
    }

    /// The lattice with rows and columns swapped.
    pub fn transposed(&self) -> Self {
        Self::new(self.n_cols, self.n_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_2d_neighbors() {
        // 3x4 lattice
        let lat = Lattice::new(3, 4);
        assert_eq!(lat.n_sites, 12);
        assert_eq!(lat.n_bonds(), 24);

        // Site 0 = (0,0): down -> (1,0)=4, right -> (0,1)=1
        assert_eq!(lat.neighbor(0, Direction::Down), 4);
        assert_eq!(lat.neighbor(0, Direction::Right), 1);

        // Site 11 = (2,3): down -> (0,3)=3 (wrap), right -> (2,0)=8 (wrap)
        assert_eq!(lat.neighbor(11, Direction::Down), 3);
        assert_eq!(lat.neighbor(11, Direction::Right), 8);
    }

    #[test]
    fn test_row_major_indexing() {
        let lat = Lattice::new(2, 3);
        for k in 0..lat.n_sites {
            let (row, col) = lat.coords(k);
            assert_eq!(row, k / 3);
            assert_eq!(col, k % 3);
            assert_eq!(lat.site(row, col), k);
        }
    }

    #[test]
    fn test_length_one_axis_self_bond() {
        let lat = Lattice::new(1, 1);
        assert_eq!(lat.neighbor(0, Direction::Down), 0);
        assert_eq!(lat.neighbor(0, Direction::Right), 0);

        // 1x3 ring: vertical bonds are all self-bonds
        let ring = Lattice::new(1, 3);
        for k in 0..3 {
            assert_eq!(ring.neighbor(k, Direction::Down), k);
            assert_eq!(ring.neighbor(k, Direction::Right), (k + 1) % 3);
        }
    }

    #[test]
    fn test_every_bond_visited_once() {
        // Each site appears exactly once as a forward neighbor per direction,
        // so the forward table is a permutation in each direction.
        let lat = Lattice::new(3, 5);
        for dir in Direction::ALL {
            let mut hits = vec![0usize; lat.n_sites];
            for k in 0..lat.n_sites {
                hits[lat.neighbor(k, dir)] += 1;
            }
            assert!(hits.iter().all(|&h| h == 1));
        }
    }

    #[test]
    fn test_transposed() {
        let lat = Lattice::new(2, 5).transposed();
        assert_eq!((lat.n_rows, lat.n_cols), (5, 2));
        assert_eq!(lat.neighbor(0, Direction::Down), 2);
        assert_eq!(lat.neighbor(0, Direction::Right), 1);
    }
}
