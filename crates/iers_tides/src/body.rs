//! Tide-generating bodies and the rotating frame of the central body.

use nalgebra::{Rotation3, Vector3};

use iers_time::{Epoch, SECONDS_PER_DAY, gmst_rad};

use crate::error::TidesError;

/// A body raising tides on the central body.
pub trait CelestialBody: Send + Sync {
    fn name(&self) -> &str;

    /// Gravitational parameter, m³/s².
    fn gm(&self) -> f64;

    /// Position in the inertial frame, metres, relative to the central body.
    fn position(&self, epoch: Epoch) -> Result<Vector3<f64>, TidesError>;
}

/// Frame attached to the central body.
pub trait BodyFrame: Send + Sync {
    /// Rotation taking inertial coordinates to body-fixed coordinates.
    fn rotation_from_inertial(&self, epoch: Epoch) -> Rotation3<f64>;
}

/// A frame at a fixed orientation.
impl BodyFrame for Rotation3<f64> {
    fn rotation_from_inertial(&self, _epoch: Epoch) -> Rotation3<f64> {
        *self
    }
}

/// Earth spinning about the inertial Z axis at the Greenwich mean sidereal
/// angle. Ignores precession, nutation and polar motion.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EarthRotationFrame {
    ut1_minus_tt: f64,
}

impl EarthRotationFrame {
    /// `ut1_minus_tt` in seconds.
    pub fn new(ut1_minus_tt: f64) -> Self {
        Self { ut1_minus_tt }
    }
}

impl BodyFrame for EarthRotationFrame {
    fn rotation_from_inertial(&self, epoch: Epoch) -> Rotation3<f64> {
        let jd_ut1 = epoch.as_jd_tt() + self.ut1_minus_tt / SECONDS_PER_DAY;
        Rotation3::from_axis_angle(&Vector3::z_axis(), -gmst_rad(jd_ut1))
    }
}

/// A body parked at a constant inertial position.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticBody {
    name: String,
    gm: f64,
    position: Vector3<f64>,
}

impl StaticBody {
    pub fn new(name: impl Into<String>, gm: f64, position: Vector3<f64>) -> Self {
        Self {
            name: name.into(),
            gm,
            position,
        }
    }
}

impl CelestialBody for StaticBody {
    fn name(&self) -> &str {
        &self.name
    }

    fn gm(&self) -> f64 {
        self.gm
    }

    fn position(&self, _epoch: Epoch) -> Result<Vector3<f64>, TidesError> {
        Ok(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iers_time::J2000_JD;

    #[test]
    fn fixed_frame_ignores_epoch() {
        let rot = Rotation3::from_axis_angle(&Vector3::x_axis(), 0.3);
        let a = rot.rotation_from_inertial(Epoch::J2000);
        let b = rot.rotation_from_inertial(Epoch::from_tt_seconds(1.0e6));
        assert_eq!(a, b);
    }

    #[test]
    fn earth_frame_rotates_by_gmst() {
        let frame = EarthRotationFrame::default();
        let rot = frame.rotation_from_inertial(Epoch::J2000);
        let gmst = gmst_rad(J2000_JD);
        // Inertial X seen from the rotating frame sits at longitude −GMST.
        let x = rot * Vector3::x();
        let lon = x.y.atan2(x.x);
        let expected = (-gmst).rem_euclid(std::f64::consts::TAU);
        assert!(
            (lon.rem_euclid(std::f64::consts::TAU) - expected).abs() < 1e-12,
            "lon = {lon}, expected {expected}"
        );
        assert!(x.z.abs() < 1e-15);
    }

    #[test]
    fn static_body_reports_its_state() {
        let body = StaticBody::new("Moon", 4.9e12, Vector3::new(3.8e8, 0.0, 0.0));
        assert_eq!(body.name(), "Moon");
        assert_eq!(body.gm(), 4.9e12);
        assert_eq!(body.position(Epoch::J2000).unwrap().x, 3.8e8);
    }
}
