use std::ops::Range;

use crate::error::{EnumerationError, Result};

/// Decode counter value `code` into a flat row-major spin configuration.
///
/// Bit `k` of `code` sets site `k`: 0 maps to -1, 1 maps to +1.
#[inline]
pub fn decode(code: u64, spins: &mut [i8]) {
    debug_assert!(spins.len() <= 64, "{} sites exceed the counter width", spins.len());
    for (k, s) in spins.iter_mut().enumerate() {
        *s = if (code >> k) & 1 == 1 { 1 } else { -1 };
    }
}

/// The set `{-1, +1}^n_sites`, enumerated as an `n_sites`-bit binary counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigurationSpace {
    n_sites: usize,
    len: u64,
}

impl ConfigurationSpace {
    /// Fails with [`EnumerationError::TooManySites`] when `n_sites` exceeds
    /// `max_sites` or the width of the counter.
    pub fn new(n_sites: usize, max_sites: usize) -> Result<Self> {
        let ceiling = max_sites.min(crate::config::MAX_ENUMERABLE_SITES);
        if n_sites > ceiling {
            return Err(EnumerationError::TooManySites {
                n_sites,
                max_sites: ceiling,
            });
        }
        Ok(Self {
            n_sites,
            len: 1u64 << n_sites,
        })
    }

    pub fn n_sites(&self) -> usize {
        self.n_sites
    }

    /// Number of configurations, `2^n_sites`.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Never true: the empty lattice still has one (empty) configuration.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Raw counter values `0..2^n_sites`.
    pub fn codes(&self) -> Range<u64> {
        0..self.len
    }

    /// Disjoint counter ranges of at most `chunk_size` values that together
    /// cover [`codes`](Self::codes) in order.
    pub fn chunks(&self, chunk_size: u64) -> impl Iterator<Item = Range<u64>> {
        let chunk_size = chunk_size.max(1);
        let len = self.len;
        (0..len.div_ceil(chunk_size)).map(move |c| {
            let start = c * chunk_size;
            start..(start + chunk_size).min(len)
        })
    }

    /// Lazily iterate every configuration. Each call starts from scratch.
    pub fn iter(&self) -> Configurations {
        self.range(self.codes())
    }

    /// Lazily iterate the configurations whose counter values lie in `codes`.
    pub fn range(&self, codes: Range<u64>) -> Configurations {
        Configurations {
            n_sites: self.n_sites,
            codes: codes.start..codes.end.min(self.len),
        }
    }
}

impl IntoIterator for &ConfigurationSpace {
    type Item = Vec<i8>;
    type IntoIter = Configurations;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over decoded configurations.
///
/// Allocates one `Vec` per item. The hot loop in
/// [`partition`](crate::partition) decodes into a reused buffer instead.
#[derive(Debug, Clone)]
pub struct Configurations {
    n_sites: usize,
    codes: Range<u64>,
}

impl Iterator for Configurations {
    type Item = Vec<i8>;

    fn next(&mut self) -> Option<Vec<i8>> {
        let code = self.codes.next()?;
        let mut spins = vec![0i8; self.n_sites];
        decode(code, &mut spins);
        Some(spins)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.codes.size_hint()
    }
}
