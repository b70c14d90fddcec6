//! Snapshot of the fundamental nutation arguments at one epoch.

use iers_time::Epoch;

/// Number of luni-solar (Delaunay) arguments.
pub const DELAUNAY_COUNT: usize = 5;

/// Number of planetary arguments, general precession included.
pub const PLANETARY_COUNT: usize = 9;

/// Fundamental arguments evaluated at one epoch, in radians.
///
/// Delaunay order: `[l, l', F, D, Ω]`.
/// Planetary order: `[L_Me, L_Ve, L_E, L_Ma, L_J, L_Sa, L_U, L_Ne, p_A]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodiesElements {
    epoch: Epoch,
    tc: f64,
    delaunay: [f64; DELAUNAY_COUNT],
    planetary: [f64; PLANETARY_COUNT],
}

impl BodiesElements {
    pub fn new(
        epoch: Epoch,
        delaunay: [f64; DELAUNAY_COUNT],
        planetary: [f64; PLANETARY_COUNT],
    ) -> Self {
        Self {
            epoch,
            tc: epoch.julian_centuries(),
            delaunay,
            planetary,
        }
    }

    /// Epoch at which the arguments were evaluated.
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Julian centuries of TT since J2000.0.
    pub fn tc(&self) -> f64 {
        self.tc
    }

    /// Mean anomaly of the Moon.
    pub fn l(&self) -> f64 {
        self.delaunay[0]
    }

    /// Mean anomaly of the Sun.
    pub fn l_prime(&self) -> f64 {
        self.delaunay[1]
    }

    /// Mean argument of latitude of the Moon.
    pub fn f(&self) -> f64 {
        self.delaunay[2]
    }

    /// Mean elongation of the Moon from the Sun.
    pub fn d(&self) -> f64 {
        self.delaunay[3]
    }

    /// Mean longitude of the ascending node of the Moon.
    pub fn omega(&self) -> f64 {
        self.delaunay[4]
    }

    pub fn l_me(&self) -> f64 {
        self.planetary[0]
    }

    pub fn l_ve(&self) -> f64 {
        self.planetary[1]
    }

    pub fn l_e(&self) -> f64 {
        self.planetary[2]
    }

    pub fn l_ma(&self) -> f64 {
        self.planetary[3]
    }

    pub fn l_ju(&self) -> f64 {
        self.planetary[4]
    }

    pub fn l_sa(&self) -> f64 {
        self.planetary[5]
    }

    pub fn l_u(&self) -> f64 {
        self.planetary[6]
    }

    pub fn l_ne(&self) -> f64 {
        self.planetary[7]
    }

    /// General accumulated precession in longitude.
    pub fn pa(&self) -> f64 {
        self.planetary[8]
    }

    pub fn delaunay(&self) -> &[f64; DELAUNAY_COUNT] {
        &self.delaunay
    }

    pub fn planetary(&self) -> &[f64; PLANETARY_COUNT] {
        &self.planetary
    }

    /// Σ multipliers[i] · argument[i], Delaunay arguments first.
    ///
    /// Shorter multiplier slices leave the remaining arguments out.
    pub fn linear_combination(&self, multipliers: &[i32]) -> f64 {
        self.delaunay
            .iter()
            .chain(self.planetary.iter())
            .zip(multipliers)
            .map(|(arg, &n)| n as f64 * arg)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BodiesElements {
        BodiesElements::new(
            Epoch::J2000,
            [1.0, 2.0, 3.0, 4.0, 5.0],
            [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0],
        )
    }

    #[test]
    fn named_accessors() {
        let e = sample();
        assert_eq!(e.l(), 1.0);
        assert_eq!(e.omega(), 5.0);
        assert_eq!(e.l_me(), 10.0);
        assert_eq!(e.pa(), 90.0);
        assert_eq!(e.tc(), 0.0);
    }

    #[test]
    fn delaunay_only_combination() {
        let e = sample();
        // 2F − 2D + 2Ω
        let arg = e.linear_combination(&[0, 0, 2, -2, 2]);
        assert_eq!(arg, 2.0 * 3.0 - 2.0 * 4.0 + 2.0 * 5.0);
    }

    #[test]
    fn full_combination_reaches_planetary() {
        let e = sample();
        let mut n = [0; 14];
        n[0] = 1;
        n[13] = -1;
        assert_eq!(e.linear_combination(&n), 1.0 - 90.0);
    }
}
