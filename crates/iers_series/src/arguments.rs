//! Generator for the fundamental nutation arguments.
//!
//! Each argument is a polynomial in Julian centuries of TT. Tables list
//! one argument per line:
//!
//! ```text
//! # name  unit    c0              c1                 c2        c3         c4
//! l       arcsec  485868.249036   1717915923.2178    31.8792   0.051635   -0.00024470
//! LMe     rad     4.402608842     2608.7903141574
//! ```
//!
//! Units are `arcsec`, `deg` or `rad`. Arguments a table does not list
//! evaluate to zero (the 1996 tables only carry the Delaunay arguments).

use iers_time::Epoch;

use crate::ARC_SECONDS_TO_RADIANS;
use crate::elements::{BodiesElements, DELAUNAY_COUNT, PLANETARY_COUNT};
use crate::error::SeriesError;

/// Delaunay plus planetary arguments.
pub const ARGUMENT_COUNT: usize = DELAUNAY_COUNT + PLANETARY_COUNT;

/// Table names of the arguments, in [`BodiesElements`] order.
pub const ARGUMENT_NAMES: [&str; ARGUMENT_COUNT] = [
    "l", "lp", "F", "D", "Om", "LMe", "LVe", "LE", "LMa", "LJ", "LSa", "LU", "LNe", "pA",
];

/// Polynomial definitions of the fundamental arguments for one convention.
#[derive(Debug, Clone, PartialEq)]
pub struct FundamentalArguments {
    /// Coefficients in radians, lowest power first; empty means "not defined".
    polynomials: [Vec<f64>; ARGUMENT_COUNT],
}

impl FundamentalArguments {
    /// Build from explicit polynomials (radians), in [`ARGUMENT_NAMES`] order.
    pub fn from_polynomials(polynomials: [Vec<f64>; ARGUMENT_COUNT]) -> Self {
        Self { polynomials }
    }

    /// Parse an arguments table.
    pub fn parse(content: &str, name: &str) -> Result<Self, SeriesError> {
        let mut polynomials: [Vec<f64>; ARGUMENT_COUNT] = Default::default();
        let mut seen = 0usize;

        for (i, raw) in content.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut tokens = line.split_whitespace();
            let arg_name = tokens.next().unwrap_or_default();
            let index = ARGUMENT_NAMES
                .iter()
                .position(|&n| n == arg_name)
                .ok_or_else(|| {
                    SeriesError::parse(name, line_no, format!("unknown argument '{arg_name}'"))
                })?;

            let factor = match tokens.next() {
                Some("arcsec") => ARC_SECONDS_TO_RADIANS,
                Some("deg") => 1.0_f64.to_radians(),
                Some("rad") => 1.0,
                Some(other) => {
                    return Err(SeriesError::parse(
                        name,
                        line_no,
                        format!("unknown unit '{other}'"),
                    ));
                }
                None => return Err(SeriesError::parse(name, line_no, "missing unit")),
            };

            let coefficients = tokens
                .map(|t| {
                    t.parse::<f64>().map(|c| c * factor).map_err(|_| {
                        SeriesError::parse(name, line_no, format!("bad coefficient '{t}'"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if coefficients.is_empty() {
                return Err(SeriesError::parse(name, line_no, "no coefficients"));
            }
            if !polynomials[index].is_empty() {
                return Err(SeriesError::parse(
                    name,
                    line_no,
                    format!("argument '{arg_name}' defined twice"),
                ));
            }
            polynomials[index] = coefficients;
            seen += 1;
        }

        if seen == 0 {
            return Err(SeriesError::parse(name, 0, "no arguments defined"));
        }
        Ok(Self { polynomials })
    }

    /// Evaluate every argument at `epoch`.
    pub fn evaluate_all(&self, epoch: Epoch) -> BodiesElements {
        let tc = epoch.julian_centuries();
        let mut values = [0.0; ARGUMENT_COUNT];
        for (value, poly) in values.iter_mut().zip(&self.polynomials) {
            *value = horner(poly, tc);
        }

        let mut delaunay = [0.0; DELAUNAY_COUNT];
        let mut planetary = [0.0; PLANETARY_COUNT];
        delaunay.copy_from_slice(&values[..DELAUNAY_COUNT]);
        planetary.copy_from_slice(&values[DELAUNAY_COUNT..]);
        BodiesElements::new(epoch, delaunay, planetary)
    }

    /// Whether the table defines the argument at `index` ([`ARGUMENT_NAMES`] order).
    pub fn defines(&self, index: usize) -> bool {
        self.polynomials.get(index).is_some_and(|p| !p.is_empty())
    }
}

/// Evaluate `Σ c_k t^k`.
pub(crate) fn horner(coefficients: &[f64], t: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * t + c)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
# IERS 2010 Table 5.2e, Delaunay arguments
l   arcsec  485868.249036   1717915923.2178   31.8792   0.051635   -0.00024470
lp  arcsec  1287104.79305   129596581.0481    -0.5532   0.000136   -0.00001149
F   arcsec  335779.526232   1739527262.8478   -12.7512  -0.001037  0.00000417
D   arcsec  1072260.70369   1602961601.2090   -6.3706   0.006593   -0.00003169
Om  arcsec  450160.398036   -6962890.5431     7.4722    0.007702   -0.00005939
LMe rad     4.402608842     2608.7903141574
pA  rad     0.0             0.02438175        0.00000538691
";

    #[test]
    fn j2000_values_are_constant_terms() {
        let args = FundamentalArguments::parse(TABLE, "test").unwrap();
        let e = args.evaluate_all(Epoch::J2000);
        assert!((e.omega() - 450160.398036 * ARC_SECONDS_TO_RADIANS).abs() < 1e-15);
        assert!((e.l_me() - 4.402608842).abs() < 1e-15);
        // Not listed: zero.
        assert_eq!(e.l_ve(), 0.0);
        assert_eq!(e.pa(), 0.0);
    }

    #[test]
    fn node_regresses_about_19_degrees_per_year() {
        let args = FundamentalArguments::parse(TABLE, "test").unwrap();
        let e0 = args.evaluate_all(Epoch::J2000);
        let e1 = args.evaluate_all(Epoch::from_tt_seconds(365.25 * 86_400.0));
        let rate_deg = (e1.omega() - e0.omega()).to_degrees();
        assert!((rate_deg + 19.34).abs() < 0.05, "rate = {rate_deg}");
    }

    #[test]
    fn degree_unit_scaled() {
        let args = FundamentalArguments::parse("Om deg 90.0", "deg").unwrap();
        let e = args.evaluate_all(Epoch::J2000);
        assert!((e.omega() - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
        assert!(args.defines(4));
        assert!(!args.defines(0));
    }

    #[test]
    fn unknown_argument_rejected() {
        let err = FundamentalArguments::parse("Q arcsec 1.0", "bad").unwrap_err();
        assert!(
            matches!(err, SeriesError::Parse { line: 1, .. }),
            "err = {err}"
        );
    }

    #[test]
    fn duplicate_argument_rejected() {
        let err = FundamentalArguments::parse("l rad 1.0\nl rad 2.0", "dup").unwrap_err();
        assert!(matches!(err, SeriesError::Parse { line: 2, .. }));
    }

    #[test]
    fn empty_table_rejected() {
        assert!(FundamentalArguments::parse("# nothing\n", "empty").is_err());
    }

    #[test]
    fn horner_matches_expansion() {
        let c = [1.0, 2.0, 3.0];
        assert_eq!(horner(&c, 2.0), 1.0 + 4.0 + 12.0);
        assert_eq!(horner(&[], 5.0), 0.0);
    }
}
