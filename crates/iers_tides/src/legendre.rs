//! Fully normalized associated Legendre functions up to degree 4.
//!
//! Forward-column recursion, equations 11 and 13 of Holmes & Featherstone
//! (2002), Journal of Geodesy 76, 279–299.

use std::ops::{Index, IndexMut};

/// Highest degree handled.
pub const MAX_DEGREE: usize = 4;

const TRIANGLE_LEN: usize = (MAX_DEGREE + 1) * (MAX_DEGREE + 2) / 2;

/// Degree/order table holding only orders `m ≤ n`, indexed by `(n, m)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangularTable {
    values: [f64; TRIANGLE_LEN],
}

impl TriangularTable {
    pub const fn zeros() -> Self {
        Self {
            values: [0.0; TRIANGLE_LEN],
        }
    }

    fn filled(value: f64) -> Self {
        Self {
            values: [value; TRIANGLE_LEN],
        }
    }

    /// `Some` when `m ≤ n ≤ MAX_DEGREE`.
    pub fn get(&self, n: usize, m: usize) -> Option<f64> {
        (m <= n && n <= MAX_DEGREE).then(|| self.values[slot(n, m)])
    }

    pub fn reset(&mut self) {
        self.values = [0.0; TRIANGLE_LEN];
    }

    /// `(n, m, value)` row by row.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..=MAX_DEGREE).flat_map(move |n| (0..=n).map(move |m| (n, m, self.values[slot(n, m)])))
    }
}

impl Default for TriangularTable {
    fn default() -> Self {
        Self::zeros()
    }
}

fn slot(n: usize, m: usize) -> usize {
    debug_assert!(m <= n && n <= MAX_DEGREE, "({n}, {m}) outside triangle");
    n * (n + 1) / 2 + m
}

impl Index<(usize, usize)> for TriangularTable {
    type Output = f64;

    fn index(&self, (n, m): (usize, usize)) -> &f64 {
        &self.values[slot(n, m)]
    }
}

impl IndexMut<(usize, usize)> for TriangularTable {
    fn index_mut(&mut self, (n, m): (usize, usize)) -> &mut f64 {
        &mut self.values[slot(n, m)]
    }
}

/// Recursion coefficients plus the table of the last evaluation.
#[derive(Debug, Clone)]
pub struct LegendreRecursion {
    anm: TriangularTable,
    bnm: TriangularTable,
    dmm: [f64; MAX_DEGREE + 1],
    pnm: TriangularTable,
}

impl LegendreRecursion {
    pub fn new() -> Self {
        // Diagonal a(n, n) and b(n, n) are never read.
        let mut anm = TriangularTable::filled(f64::NAN);
        let mut bnm = TriangularTable::filled(f64::NAN);
        for n in 1..=MAX_DEGREE {
            let nf = n as f64;
            for m in 0..n {
                let mf = m as f64;
                anm[(n, m)] =
                    ((2.0 * nf - 1.0) * (2.0 * nf + 1.0) / ((nf - mf) * (nf + mf))).sqrt();
                if n >= m + 2 {
                    bnm[(n, m)] = ((2.0 * nf + 1.0) * (nf + mf - 1.0) * (nf - mf - 1.0)
                        / ((nf - mf) * (nf + mf) * (2.0 * nf - 3.0)))
                        .sqrt();
                }
            }
        }

        let mut dmm = [f64::NAN; MAX_DEGREE + 1];
        for (m, d) in dmm.iter_mut().enumerate().skip(2) {
            let mf = m as f64;
            *d = ((2.0 * mf + 1.0) / (2.0 * mf)).sqrt();
        }

        Self {
            anm,
            bnm,
            dmm,
            pnm: TriangularTable::zeros(),
        }
    }

    /// Fill P(n, m) for `t = cos θ`, `u = sin θ`.
    pub fn evaluate(&mut self, t: f64, u: f64) -> &TriangularTable {
        let p = &mut self.pnm;
        p[(0, 0)] = 1.0;
        p[(1, 0)] = self.anm[(1, 0)] * t;
        p[(1, 1)] = 3.0_f64.sqrt() * u;
        for m in 2..=MAX_DEGREE {
            p[(m, m - 1)] = self.anm[(m, m - 1)] * t * p[(m - 1, m - 1)];
            p[(m, m)] = self.dmm[m] * u * p[(m - 1, m - 1)];
        }
        for m in 0..=MAX_DEGREE {
            for n in m + 2..=MAX_DEGREE {
                p[(n, m)] = self.anm[(n, m)] * t * p[(n - 1, m)] - self.bnm[(n, m)] * p[(n - 2, m)];
            }
        }
        &self.pnm
    }

    /// Table from the last [`evaluate`](Self::evaluate) call.
    pub fn values(&self) -> &TriangularTable {
        &self.pnm
    }
}

impl Default for LegendreRecursion {
    fn default() -> Self {
        Self::new()
    }
}
