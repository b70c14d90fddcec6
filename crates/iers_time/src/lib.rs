//! Epochs, Julian dates, sidereal angles and Earth orientation history.
//!
//! This crate provides:
//! - Julian Date ↔ calendar conversions
//! - An `Epoch` type holding TT seconds past J2000.0
//! - Earth Rotation Angle and GMST
//! - IERS `finals.all` parsing with null-correction sentinels outside
//!   the covered range

pub mod eop;
pub mod error;
pub mod julian;
pub mod sidereal;

pub use eop::{EopEntry, EopHistory, NutationCorrection, PoleCorrection};
pub use error::TimeError;
pub use julian::{
    DAYS_PER_CENTURY, J2000_JD, MJD_OFFSET, SECONDS_PER_DAY, TT_MINUS_TAI_S, calendar_to_jd,
    j2000_seconds_to_jd, jd_to_calendar, jd_to_j2000_seconds,
};
pub use sidereal::{earth_rotation_angle_rad, gmst_rad};

/// A TT epoch represented as seconds past J2000.0.
///
/// This is the primary time type used throughout the workspace. The
/// tidal field keys its cache on [`Epoch::as_tt_seconds`], so the value
/// is kept as a single `f64` rather than a split day/fraction pair.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Epoch {
    tt_seconds: f64,
}

impl Epoch {
    /// J2000.0 itself.
    pub const J2000: Epoch = Epoch { tt_seconds: 0.0 };

    /// Create an epoch from TT seconds past J2000.0.
    pub fn from_tt_seconds(s: f64) -> Self {
        Self { tt_seconds: s }
    }

    /// Create an epoch from a Julian Date in TT.
    pub fn from_jd_tt(jd: f64) -> Self {
        Self {
            tt_seconds: jd_to_j2000_seconds(jd),
        }
    }

    /// Create an epoch from a TT calendar date.
    ///
    /// The day number is kept apart from the time of day so that whole
    /// seconds stay exact.
    pub fn from_tt_calendar(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        min: u32,
        sec: f64,
    ) -> Self {
        let midnight = calendar_to_jd(year, month, day as f64);
        let tt_seconds = jd_to_j2000_seconds(midnight)
            + hour as f64 * 3600.0
            + min as f64 * 60.0
            + sec;
        Self { tt_seconds }
    }

    /// Create an epoch from a TAI calendar date (TT = TAI + 32.184 s).
    pub fn from_tai_calendar(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        min: u32,
        sec: f64,
    ) -> Self {
        Self::from_tt_calendar(year, month, day, hour, min, sec).shifted_by(TT_MINUS_TAI_S)
    }

    /// TT seconds past J2000.0.
    pub fn as_tt_seconds(self) -> f64 {
        self.tt_seconds
    }

    /// Julian Date in TT.
    pub fn as_jd_tt(self) -> f64 {
        j2000_seconds_to_jd(self.tt_seconds)
    }

    /// Modified Julian Date in TT.
    pub fn as_mjd_tt(self) -> f64 {
        self.as_jd_tt() - MJD_OFFSET
    }

    /// Julian centuries of TT since J2000.0.
    pub fn julian_centuries(self) -> f64 {
        self.tt_seconds / (SECONDS_PER_DAY * DAYS_PER_CENTURY)
    }

    /// Epoch shifted by `dt` seconds.
    pub fn shifted_by(self, dt: f64) -> Self {
        Self {
            tt_seconds: self.tt_seconds + dt,
        }
    }

    /// Signed duration `self − other` in seconds.
    pub fn duration_from(self, other: Epoch) -> f64 {
        self.tt_seconds - other.tt_seconds
    }
}
