//! IERS Earth Orientation Parameters history.
//!
//! Parses the IERS `finals.all` (IAU 1980) fixed-width format and serves
//! linearly interpolated pole offsets, UT1−UTC, length of day and the
//! celestial pole offsets dψ/dε used to correct nutation.
//!
//! Data file: IERS finals.all, available from <https://datacenter.iers.org/>
//! and <https://maia.usno.navy.mil/ser7/>.
//!
//! File format (relevant columns, 1-indexed):
//! - Col   8-15:  Modified Julian Date (F8.2)
//! - Col  19-27:  PM-x in arcsec (F9.6)
//! - Col  38-46:  PM-y in arcsec (F9.6)
//! - Col  59-68:  UT1−UTC in seconds (F10.7)
//! - Col  80-86:  LOD in milliseconds (F7.4)
//! - Col  98-106: dψ in milliarcseconds (F9.3)
//! - Col 117-125: dε in milliarcseconds (F9.3)
//!
//! Lookups outside the covered range return the null sentinels rather
//! than an error: callers treat "no data" as "no correction".

use std::f64::consts::PI;
use std::path::Path;

use tracing::info;

use crate::Epoch;
use crate::error::TimeError;

const ARCSEC_TO_RAD: f64 = PI / (180.0 * 3600.0);

/// Polar motion offsets (radians).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoleCorrection {
    pub xp: f64,
    pub yp: f64,
}

impl PoleCorrection {
    /// Correction used when no EOP data covers the epoch.
    pub const NULL: PoleCorrection = PoleCorrection { xp: 0.0, yp: 0.0 };
}

/// Celestial pole offsets in longitude and obliquity (radians).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutationCorrection {
    pub ddpsi: f64,
    pub ddeps: f64,
}

impl NutationCorrection {
    /// Correction used when no EOP data covers the epoch.
    pub const NULL: NutationCorrection = NutationCorrection {
        ddpsi: 0.0,
        ddeps: 0.0,
    };
}

/// One daily row of the EOP table, angles already in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EopEntry {
    pub mjd: f64,
    pub pole: PoleCorrection,
    /// UT1−UTC in seconds.
    pub ut1_minus_utc: f64,
    /// Length of day excess in seconds.
    pub lod: f64,
    pub nutation: NutationCorrection,
}

impl EopEntry {
    fn lerp(&self, next: &EopEntry, frac: f64) -> EopEntry {
        let mix = |a: f64, b: f64| a + frac * (b - a);
        EopEntry {
            mjd: mix(self.mjd, next.mjd),
            pole: PoleCorrection {
                xp: mix(self.pole.xp, next.pole.xp),
                yp: mix(self.pole.yp, next.pole.yp),
            },
            ut1_minus_utc: mix(self.ut1_minus_utc, next.ut1_minus_utc),
            lod: mix(self.lod, next.lod),
            nutation: NutationCorrection {
                ddpsi: mix(self.nutation.ddpsi, next.nutation.ddpsi),
                ddeps: mix(self.nutation.ddeps, next.nutation.ddeps),
            },
        }
    }
}

/// Parsed IERS Earth orientation history.
#[derive(Debug, Clone)]
pub struct EopHistory {
    /// Daily rows, sorted ascending by MJD.
    entries: Vec<EopEntry>,
}

/// Parse a fixed-width numeric field given 1-indexed inclusive columns.
///
/// Missing (line too short) or blank fields read as `None`.
fn field(line: &str, first: usize, last: usize) -> Option<f64> {
    let end = last.min(line.len());
    if end < first {
        return None;
    }
    line.get(first - 1..end)?.trim().parse().ok()
}

impl EopHistory {
    /// Load a finals.all file from disk.
    pub fn load(path: &Path) -> Result<Self, TimeError> {
        let content = std::fs::read_to_string(path)?;
        let history = Self::parse(&content)?;
        info!(
            path = %path.display(),
            rows = history.len(),
            "loaded Earth orientation history"
        );
        Ok(history)
    }

    /// Parse finals.all content.
    ///
    /// A row needs a readable MJD and UT1−UTC; the other fields fall back
    /// to zero when blank (predictions often lack LOD and nutation).
    pub fn parse(content: &str) -> Result<Self, TimeError> {
        let mut entries = Vec::new();

        for line in content.lines() {
            let Some(mjd) = field(line, 8, 15) else {
                continue;
            };
            let Some(ut1_minus_utc) = field(line, 59, 68) else {
                continue;
            };

            entries.push(EopEntry {
                mjd,
                pole: PoleCorrection {
                    xp: field(line, 19, 27).unwrap_or(0.0) * ARCSEC_TO_RAD,
                    yp: field(line, 38, 46).unwrap_or(0.0) * ARCSEC_TO_RAD,
                },
                ut1_minus_utc,
                lod: field(line, 80, 86).unwrap_or(0.0) * 1.0e-3,
                nutation: NutationCorrection {
                    ddpsi: field(line, 98, 106).unwrap_or(0.0) * 1.0e-3 * ARCSEC_TO_RAD,
                    ddeps: field(line, 117, 125).unwrap_or(0.0) * 1.0e-3 * ARCSEC_TO_RAD,
                },
            });
        }

        if entries.is_empty() {
            return Err(TimeError::EopParse("no valid EOP rows found".to_string()));
        }

        entries.sort_by(|a, b| a.mjd.total_cmp(&b.mjd));

        Ok(Self { entries })
    }

    /// Number of rows in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parsed rows in ascending MJD order.
    pub fn entries(&self) -> &[EopEntry] {
        &self.entries
    }

    /// MJD range covered by the table: (first, last).
    pub fn range(&self) -> (f64, f64) {
        (self.entries[0].mjd, self.entries[self.entries.len() - 1].mjd)
    }

    /// Interpolated row at an MJD, `None` outside the table.
    pub fn entry_at_mjd(&self, mjd: f64) -> Option<EopEntry> {
        let (start, end) = self.range();
        if !(start..=end).contains(&mjd) {
            return None;
        }

        let idx = self
            .entries
            .partition_point(|e| e.mjd < mjd)
            .saturating_sub(1);

        if idx + 1 >= self.entries.len() {
            return Some(self.entries[idx]);
        }

        let e0 = &self.entries[idx];
        let e1 = &self.entries[idx + 1];
        if (e1.mjd - e0.mjd).abs() < 1e-12 {
            return Some(*e0);
        }

        Some(e0.lerp(e1, (mjd - e0.mjd) / (e1.mjd - e0.mjd)))
    }

    /// Interpolated row at an epoch.
    ///
    /// The table is indexed by UTC days; the epoch's TT MJD is used
    /// directly, a sub-minute shift on daily samples.
    pub fn entry_at(&self, epoch: Epoch) -> Option<EopEntry> {
        self.entry_at_mjd(epoch.as_mjd_tt())
    }

    /// Length of day excess in seconds (0 outside the covered range).
    pub fn lod(&self, epoch: Epoch) -> f64 {
        self.entry_at(epoch).map_or(0.0, |e| e.lod)
    }

    /// Pole correction ([`PoleCorrection::NULL`] outside the covered range).
    pub fn pole_correction(&self, epoch: Epoch) -> PoleCorrection {
        self.entry_at(epoch).map_or(PoleCorrection::NULL, |e| e.pole)
    }

    /// Nutation correction ([`NutationCorrection::NULL`] outside the covered range).
    pub fn nutation_correction(&self, epoch: Epoch) -> NutationCorrection {
        self.entry_at(epoch)
            .map_or(NutationCorrection::NULL, |e| e.nutation)
    }

    /// UT1−UTC in seconds, `None` outside the covered range.
    pub fn ut1_minus_utc(&self, epoch: Epoch) -> Option<f64> {
        self.entry_at(epoch).map(|e| e.ut1_minus_utc)
    }
}
