//! Julian Date ↔ calendar conversions (proleptic Gregorian).
//!
//! Algorithm: Meeus, *Astronomical Algorithms* 2nd ed., Chapter 7.
//! Dates before 1582-Oct-15 are treated as Julian calendar dates on
//! the way back from a Julian Date, matching the book.

/// Julian Date of the J2000.0 epoch (2000-01-01T12:00:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Offset between Julian Date and Modified Julian Date.
pub const MJD_OFFSET: f64 = 2_400_000.5;

/// SI seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Days in one Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// TT − TAI in seconds (exact by definition).
pub const TT_MINUS_TAI_S: f64 = 32.184;

/// Julian Date at the start of the given calendar day plus `day_frac`.
///
/// `day_frac` carries the day of month and its fraction, e.g. `27.5`
/// is noon on the 27th.
pub fn calendar_to_jd(year: i32, month: u32, day_frac: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let a = (y as f64 / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y as f64 + 4716.0)).floor() + (30.6001 * (m as f64 + 1.0)).floor() + day_frac + b
        - 1524.5
}

/// Calendar date `(year, month, day_frac)` for a Julian Date.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let z = (jd + 0.5).floor();
    let f = jd + 0.5 - z;
    let a = if z < 2_299_161.0 {
        z
    } else {
        let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
        z + 1.0 + alpha - (alpha / 4.0).floor()
    };
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = (if e < 14.0 { e - 1.0 } else { e - 13.0 }) as u32;
    let year = (if month > 2 { c - 4716.0 } else { c - 4715.0 }) as i32;
    (year, month, day)
}

/// Seconds past J2000.0 for a Julian Date on the same scale.
pub fn jd_to_j2000_seconds(jd: f64) -> f64 {
    (jd - J2000_JD) * SECONDS_PER_DAY
}

/// Julian Date for seconds past J2000.0 on the same scale.
pub fn j2000_seconds_to_jd(s: f64) -> f64 {
    J2000_JD + s / SECONDS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_noon() {
        assert_eq!(calendar_to_jd(2000, 1, 1.5), J2000_JD);
    }

    #[test]
    fn meeus_example_7a() {
        // 1957 October 4.81 (Sputnik 1 launch)
        let jd = calendar_to_jd(1957, 10, 4.81);
        assert!((jd - 2_436_116.31).abs() < 1e-9, "jd = {jd}");
    }

    #[test]
    fn january_uses_previous_year_branch() {
        let jd = calendar_to_jd(1997, 2, 27.0);
        // 1997-02-27T00:00 = JD 2450506.5
        assert_eq!(jd, 2_450_506.5);
    }

    #[test]
    fn calendar_roundtrip() {
        for &(y, m, d) in &[(2000, 1, 1.5), (1997, 2, 27.0), (2024, 12, 31.75), (1972, 7, 1.0)] {
            let (y2, m2, d2) = jd_to_calendar(calendar_to_jd(y, m, d));
            assert_eq!((y2, m2), (y, m));
            assert!((d2 - d).abs() < 1e-9, "day {d2} vs {d}");
        }
    }

    #[test]
    fn seconds_roundtrip() {
        let jd = 2_460_000.5;
        assert!((j2000_seconds_to_jd(jd_to_j2000_seconds(jd)) - jd).abs() < 1e-9);
        assert_eq!(jd_to_j2000_seconds(J2000_JD), 0.0);
    }
}
