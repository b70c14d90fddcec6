//! Love numbers for the solid Earth tides.
//!
//! Table rows are `n m real imaginary plus`; entries not listed are zero.

use crate::error::SeriesError;

/// Highest degree a Love-number table may define.
pub const MAX_LOVE_DEGREE: usize = 8;

/// Triangular Love-number table, indexed by (degree, order).
#[derive(Debug, Clone, PartialEq)]
pub struct LoveNumbers {
    real: Vec<Vec<f64>>,
    imaginary: Vec<Vec<f64>>,
    plus: Vec<Vec<f64>>,
}

impl LoveNumbers {
    /// Build from explicit triangular tables. Row `n` must hold `n + 1` values.
    pub fn new(
        real: Vec<Vec<f64>>,
        imaginary: Vec<Vec<f64>>,
        plus: Vec<Vec<f64>>,
    ) -> Result<Self, SeriesError> {
        let size = real.len();
        let triangular = |t: &Vec<Vec<f64>>| {
            t.len() == size && t.iter().enumerate().all(|(n, row)| row.len() == n + 1)
        };
        if !(triangular(&real) && triangular(&imaginary) && triangular(&plus)) {
            return Err(SeriesError::parse(
                "love numbers",
                0,
                "tables must be triangular and of equal size",
            ));
        }
        Ok(Self {
            real,
            imaginary,
            plus,
        })
    }

    pub fn parse(content: &str, name: &str) -> Result<Self, SeriesError> {
        let mut rows = Vec::new();
        for (i, raw) in content.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != 5 {
                return Err(SeriesError::parse(
                    name,
                    line_no,
                    format!("expected 5 fields, found {}", tokens.len()),
                ));
            }
            let index = |t: &str| {
                t.parse::<usize>()
                    .map_err(|_| SeriesError::parse(name, line_no, format!("bad index '{t}'")))
            };
            let value = |t: &str| {
                t.parse::<f64>()
                    .map_err(|_| SeriesError::parse(name, line_no, format!("bad value '{t}'")))
            };
            let (n, m) = (index(tokens[0])?, index(tokens[1])?);
            if n > MAX_LOVE_DEGREE {
                return Err(SeriesError::parse(
                    name,
                    line_no,
                    format!("degree {n} exceeds {MAX_LOVE_DEGREE}"),
                ));
            }
            if m > n {
                return Err(SeriesError::parse(
                    name,
                    line_no,
                    format!("order {m} exceeds degree {n}"),
                ));
            }
            rows.push((
                line_no,
                n,
                m,
                value(tokens[2])?,
                value(tokens[3])?,
                value(tokens[4])?,
            ));
        }

        let Some(max_degree) = rows.iter().map(|r| r.1).max() else {
            return Err(SeriesError::parse(name, 0, "no Love numbers defined"));
        };
        let size = max_degree + 1;
        let empty = || (0..size).map(|n| vec![0.0; n + 1]).collect::<Vec<_>>();
        let (mut real, mut imaginary, mut plus) = (empty(), empty(), empty());
        let mut seen: Vec<Vec<bool>> = (0..size).map(|n| vec![false; n + 1]).collect();

        for (line_no, n, m, re, im, pl) in rows {
            if seen[n][m] {
                return Err(SeriesError::parse(
                    name,
                    line_no,
                    format!("duplicate entry ({n}, {m})"),
                ));
            }
            seen[n][m] = true;
            real[n][m] = re;
            imaginary[n][m] = im;
            plus[n][m] = pl;
        }

        Ok(Self {
            real,
            imaginary,
            plus,
        })
    }

    /// Max degree + 1.
    pub fn size(&self) -> usize {
        self.real.len()
    }

    pub fn real(&self, n: usize, m: usize) -> f64 {
        self.real[n][m]
    }

    pub fn imaginary(&self, n: usize, m: usize) -> f64 {
        self.imaginary[n][m]
    }

    pub fn plus(&self, n: usize, m: usize) -> f64 {
        self.plus[n][m]
    }
}
