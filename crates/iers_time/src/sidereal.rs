//! Earth Rotation Angle and Greenwich Mean Sidereal Time.
//!
//! Both take a UT1 Julian Date. Code that only has TT shifts the date by
//! its own UT1−TT estimate first; the tide model keeps that estimate as a
//! configuration value.
//!
//! ERA follows IERS Conventions 2010 eq. 5.15, the GMST polynomial is
//! Capitaine et al. (2003) table 2.

use std::f64::consts::{PI, TAU};

use crate::julian::{DAYS_PER_CENTURY, J2000_JD};

const ARCSEC_TO_RAD: f64 = PI / (180.0 * 3600.0);

/// ERA at J2000.0 and its excess rate over one turn per day, in turns.
const ERA_AT_J2000: f64 = 0.779_057_273_264_0;
const ERA_EXCESS_RATE: f64 = 0.002_737_811_911_354_48;

/// GMST − ERA in arc-seconds, lowest power of T first.
const GMST_MINUS_ERA: [f64; 6] = [
    0.014_506,
    4_612.156_534,
    1.391_581_7,
    -0.000_000_44,
    -0.000_029_956,
    -0.000_000_036_8,
];

/// Earth Rotation Angle in radians, reduced to [0, 2π).
pub fn earth_rotation_angle_rad(jd_ut1: f64) -> f64 {
    // Whole days contribute whole turns; keep only the day fraction so the
    // sum stays small.
    let turns = jd_ut1.fract() + ERA_AT_J2000 + ERA_EXCESS_RATE * (jd_ut1 - J2000_JD);
    (TAU * turns).rem_euclid(TAU)
}

/// Greenwich Mean Sidereal Time in radians, reduced to [0, 2π).
pub fn gmst_rad(jd_ut1: f64) -> f64 {
    let t = (jd_ut1 - J2000_JD) / DAYS_PER_CENTURY;
    let excess = GMST_MINUS_ERA.iter().rev().fold(0.0, |acc, &c| acc * t + c);
    (earth_rotation_angle_rad(jd_ut1) + excess * ARCSEC_TO_RAD).rem_euclid(TAU)
}
