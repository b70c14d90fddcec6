//! Poisson series: polynomial part plus trigonometric terms whose
//! amplitudes are multiplied by powers of time.
//!
//! ```text
//! polynomial  -16617.0  2004191898.0  -429782.9
//! j = 0
//! # index  sin_amp       cos_amp    l lp F D Om
//!   1      -6844318.44   1328.67    0 0 0 0 1
//! j = 1
//!   1307   -3328.48      205833.15  0 0 0 0 1
//! ```
//!
//! Term rows carry either 5 multipliers (Delaunay arguments only) or 14
//! (Delaunay then planetary).

use crate::arguments::horner;
use crate::elements::BodiesElements;
use crate::error::SeriesError;
use crate::function::NutationFunction;

const DELAUNAY_ONLY: usize = 5;
const FULL: usize = 14;

/// Highest power of time a `j = k` section may carry.
pub const MAX_POWER: usize = 20;

#[derive(Debug, Clone, PartialEq)]
struct Term {
    sin: f64,
    cos: f64,
    multipliers: Vec<i32>,
}

/// A parsed Poisson series, amplitudes already scaled to radians.
#[derive(Debug, Clone, PartialEq)]
pub struct PoissonSeries {
    polynomial: Vec<f64>,
    /// `sections[j]` holds the terms multiplied by t^j.
    sections: Vec<Vec<Term>>,
}

impl PoissonSeries {
    /// Parse `content`, scaling the polynomial coefficients by
    /// `poly_factor` and the term amplitudes by `non_poly_factor`.
    pub fn parse(
        content: &str,
        name: &str,
        poly_factor: f64,
        non_poly_factor: f64,
    ) -> Result<Self, SeriesError> {
        let mut polynomial = Vec::new();
        let mut sections: Vec<Vec<Term>> = Vec::new();
        let mut current: Option<usize> = None;

        for (i, raw) in content.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(rest) = line.strip_prefix("polynomial") {
                if !polynomial.is_empty() {
                    return Err(SeriesError::parse(name, line_no, "polynomial given twice"));
                }
                polynomial = parse_floats(rest, name, line_no)?
                    .into_iter()
                    .map(|c| c * poly_factor)
                    .collect();
                continue;
            }

            if let Some(rest) = line.strip_prefix('j') {
                let power = rest
                    .trim_start()
                    .strip_prefix('=')
                    .and_then(|p| p.trim().parse::<usize>().ok())
                    .ok_or_else(|| SeriesError::parse(name, line_no, "bad section header"))?;
                if power > MAX_POWER {
                    return Err(SeriesError::parse(
                        name,
                        line_no,
                        format!("power {power} exceeds {MAX_POWER}"),
                    ));
                }
                if sections.len() <= power {
                    sections.resize_with(power + 1, Vec::new);
                }
                current = Some(power);
                continue;
            }

            let Some(power) = current else {
                return Err(SeriesError::parse(
                    name,
                    line_no,
                    "term row before any 'j = k' header",
                ));
            };
            let term = parse_term(line, name, line_no, non_poly_factor)?;
            sections[power].push(term);
        }

        if polynomial.is_empty() && sections.iter().all(Vec::is_empty) {
            return Err(SeriesError::parse(name, 0, "empty series"));
        }
        Ok(Self {
            polynomial,
            sections,
        })
    }

    /// Number of trigonometric terms across all sections.
    pub fn term_count(&self) -> usize {
        self.sections.iter().map(Vec::len).sum()
    }

    pub fn polynomial(&self) -> &[f64] {
        &self.polynomial
    }
}

impl NutationFunction for PoissonSeries {
    fn value(&self, elements: &BodiesElements) -> f64 {
        let tc = elements.tc();
        let mut sum = horner(&self.polynomial, tc);

        let mut tj = 1.0;
        for section in &self.sections {
            let mut partial = 0.0;
            for term in section {
                let (s, c) = elements.linear_combination(&term.multipliers).sin_cos();
                partial += term.sin * s + term.cos * c;
            }
            sum += tj * partial;
            tj *= tc;
        }
        sum
    }
}

fn parse_floats(text: &str, name: &str, line: usize) -> Result<Vec<f64>, SeriesError> {
    text.split_whitespace()
        .map(|t| {
            t.parse::<f64>()
                .map_err(|_| SeriesError::parse(name, line, format!("bad number '{t}'")))
        })
        .collect()
}

fn parse_term(line: &str, name: &str, line_no: usize, factor: f64) -> Result<Term, SeriesError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let count = tokens.len().saturating_sub(3);
    if count != DELAUNAY_ONLY && count != FULL {
        return Err(SeriesError::parse(
            name,
            line_no,
            format!("expected {DELAUNAY_ONLY} or {FULL} multipliers, found {count}"),
        ));
    }

    let amplitude = |t: &str| {
        t.parse::<f64>()
            .map(|a| a * factor)
            .map_err(|_| SeriesError::parse(name, line_no, format!("bad amplitude '{t}'")))
    };
    let sin = amplitude(tokens[1])?;
    let cos = amplitude(tokens[2])?;
    let multipliers = tokens[3..]
        .iter()
        .map(|t| {
            t.parse::<i32>()
                .map_err(|_| SeriesError::parse(name, line_no, format!("bad multiplier '{t}'")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Term {
        sin,
        cos,
        multipliers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use iers_time::{DAYS_PER_CENTURY, Epoch, SECONDS_PER_DAY};

    fn elements(tc: f64, omega: f64) -> BodiesElements {
        let epoch = Epoch::from_tt_seconds(tc * DAYS_PER_CENTURY * SECONDS_PER_DAY);
        BodiesElements::new(epoch, [0.0, 0.0, 0.0, 0.0, omega], [0.0; 9])
    }

    const SERIES: &str = "\
# test series
polynomial 1.0 2.0
j = 0
  1   10.0   5.0   0 0 0 0 1
  2    0.0   3.0   0 0 0 0 2
j = 1
  3    4.0   0.0   0 0 0 0 1
";

    #[test]
    fn parse_counts_terms() {
        let s = PoissonSeries::parse(SERIES, "s", 1.0, 1.0).unwrap();
        assert_eq!(s.term_count(), 3);
        assert_eq!(s.polynomial(), &[1.0, 2.0]);
    }

    #[test]
    fn value_combines_all_parts() {
        let s = PoissonSeries::parse(SERIES, "s", 1.0, 1.0).unwrap();
        let (tc, om): (f64, f64) = (0.5, 0.3);
        let expected = 1.0
            + 2.0 * tc
            + (10.0 * om.sin() + 5.0 * om.cos() + 3.0 * (2.0 * om).cos())
            + tc * 4.0 * om.sin();
        let v = s.value(&elements(tc, om));
        assert!((v - expected).abs() < 1e-12, "v = {v}, expected {expected}");
    }

    #[test]
    fn factors_scale_separately() {
        let s = PoissonSeries::parse(SERIES, "s", 2.0, 0.5).unwrap();
        let v = s.value(&elements(0.0, 0.0));
        // 2·1 + 0.5·(5 + 3)
        assert!((v - 6.0).abs() < 1e-12, "v = {v}");
    }

    #[test]
    fn full_multiplier_rows_accepted() {
        let text = "j = 0\n1 1.0 0.0 0 0 0 0 0 0 0 0 0 0 0 0 0 1\n";
        let s = PoissonSeries::parse(text, "full", 1.0, 1.0).unwrap();
        let epoch = Epoch::J2000;
        let mut planetary = [0.0; 9];
        planetary[8] = 0.25;
        let e = BodiesElements::new(epoch, [0.0; 5], planetary);
        assert!((s.value(&e) - 0.25_f64.sin()).abs() < 1e-15);
    }

    #[test]
    fn wrong_multiplier_count_rejected() {
        let err = PoissonSeries::parse("j = 0\n1 1.0 0.0 0 0 1\n", "bad", 1.0, 1.0).unwrap_err();
        assert!(matches!(err, SeriesError::Parse { line: 2, .. }), "err = {err}");
    }

    #[test]
    fn term_before_header_rejected() {
        let err = PoissonSeries::parse("1 1.0 0.0 0 0 0 0 1\n", "bad", 1.0, 1.0).unwrap_err();
        assert!(matches!(err, SeriesError::Parse { line: 1, .. }));
    }

    #[test]
    fn oversized_power_rejected() {
        for header in ["j = 18446744073709551615", "j = 1000000000", "j = 21"] {
            let text = format!("polynomial 1.0\n{header}\n1 1.0 0.0 0 0 0 0 1\n");
            let err = PoissonSeries::parse(&text, "huge", 1.0, 1.0).unwrap_err();
            assert!(matches!(err, SeriesError::Parse { line: 2, .. }), "err = {err}");
        }
        let text = format!("j = {MAX_POWER}\n1 1.0 0.0 0 0 0 0 1\n");
        assert!(PoissonSeries::parse(&text, "edge", 1.0, 1.0).is_ok());
    }

    #[test]
    fn empty_series_rejected() {
        assert!(PoissonSeries::parse("# only comments\n", "e", 1.0, 1.0).is_err());
    }
}
