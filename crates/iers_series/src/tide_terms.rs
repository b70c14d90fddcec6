//! Frequency-dependent tide terms (IERS 2010 tables 6.5a–c layout).
//!
//! Rows: `order m1 m2 m3 m4 m5 amp_ip amp_op`, the multipliers applying to
//! the Delaunay arguments, amplitudes in units of 1e-12.

use crate::error::SeriesError;

/// Scale of the tabulated in-phase / out-of-phase amplitudes.
pub const TIDE_AMPLITUDE_SCALE: f64 = 1.0e-12;

/// One tidal constituent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TideTerm {
    /// Tesseral order (0 long-period, 1 diurnal, 2 semi-diurnal).
    pub order: usize,
    /// Delaunay multipliers `[l, l', F, D, Ω]`.
    pub multipliers: [i32; 5],
    /// In-phase amplitude, already scaled.
    pub in_phase: f64,
    /// Out-of-phase amplitude, already scaled.
    pub out_of_phase: f64,
}

impl TideTerm {
    pub fn parse_table(content: &str, name: &str) -> Result<Vec<Self>, SeriesError> {
        let mut terms = Vec::new();
        for (i, raw) in content.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != 8 {
                return Err(SeriesError::parse(
                    name,
                    line_no,
                    format!("expected 8 fields, found {}", tokens.len()),
                ));
            }

            let order = tokens[0]
                .parse::<usize>()
                .ok()
                .filter(|&o| o <= 2)
                .ok_or_else(|| {
                    SeriesError::parse(name, line_no, format!("bad order '{}'", tokens[0]))
                })?;

            let mut multipliers = [0i32; 5];
            for (slot, t) in multipliers.iter_mut().zip(&tokens[1..6]) {
                *slot = t.parse().map_err(|_| {
                    SeriesError::parse(name, line_no, format!("bad multiplier '{t}'"))
                })?;
            }

            let amplitude = |t: &str| {
                t.parse::<f64>()
                    .map(|a| a * TIDE_AMPLITUDE_SCALE)
                    .map_err(|_| SeriesError::parse(name, line_no, format!("bad amplitude '{t}'")))
            };

            terms.push(TideTerm {
                order,
                multipliers,
                in_phase: amplitude(tokens[6])?,
                out_of_phase: amplitude(tokens[7])?,
            });
        }

        if terms.is_empty() {
            return Err(SeriesError::parse(name, 0, "no tide terms defined"));
        }
        Ok(terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_scales_amplitudes() {
        let text = "\
# order  l lp F D Om   ip     op
0        0 0 0 0 1   16.6   -6.7
1        0 0 0 0 0  -12.9   -3.2
2        0 0 2 0 2   -0.3    0.0
";
        let terms = TideTerm::parse_table(text, "tides").unwrap();
        assert_eq!(terms.len(), 3);
        assert_eq!(terms[0].order, 0);
        assert_eq!(terms[0].multipliers, [0, 0, 0, 0, 1]);
        assert!((terms[0].in_phase - 16.6e-12).abs() < 1e-24);
        assert!((terms[1].out_of_phase + 3.2e-12).abs() < 1e-24);
        assert_eq!(terms[2].multipliers, [0, 0, 2, 0, 2]);
    }

    #[test]
    fn order_above_two_rejected() {
        let err = TideTerm::parse_table("3 0 0 0 0 0 1.0 0.0", "bad").unwrap_err();
        assert!(matches!(err, SeriesError::Parse { line: 1, .. }), "err = {err}");
    }

    #[test]
    fn empty_table_rejected() {
        assert!(TideTerm::parse_table("", "empty").is_err());
    }
}
