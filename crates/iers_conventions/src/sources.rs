//! Where each convention gets each of its functions.
//!
//! One record per convention. Gaps are explicit `Unsupported` entries.

use iers_series::ARC_SECONDS_TO_RADIANS;

use crate::{IersConventions, Quantity};

const TENTH_MAS: f64 = 1.0e-4 * ARC_SECONDS_TO_RADIANS;
const MICRO_AS: f64 = 1.0e-6 * ARC_SECONDS_TO_RADIANS;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum FunctionSource {
    Unsupported,
    /// Poisson series table with its polynomial and term scale factors.
    Series {
        name: &'static str,
        poly_factor: f64,
        non_poly_factor: f64,
    },
    /// Polynomial in Julian centuries, coefficients in arc-seconds.
    Polynomial(&'static [f64]),
    Zero,
    EquinoxCorrection1996,
}

pub(crate) struct ConventionSources {
    pub arguments: &'static str,
    pub functions: [FunctionSource; Quantity::COUNT],
    pub tide_frequency_dependence: Option<&'static str>,
}

impl ConventionSources {
    pub fn function(&self, quantity: Quantity) -> FunctionSource {
        self.functions[quantity as usize]
    }
}

const fn series(name: &'static str, factor: f64) -> FunctionSource {
    FunctionSource::Series {
        name,
        poly_factor: factor,
        non_poly_factor: factor,
    }
}

use FunctionSource::Unsupported;

// Functions are listed in `Quantity` order.
static IERS_1996: ConventionSources = ConventionSources {
    arguments: "1996/nutation-arguments.txt",
    functions: [
        Unsupported,
        Unsupported,
        Unsupported,
        FunctionSource::Polynomial(&[0.0, 2306.2181, 0.30188, 0.017998]),
        FunctionSource::Polynomial(&[0.0, 2004.3109, -0.42665, -0.041833]),
        FunctionSource::Polynomial(&[0.0, 2306.2181, 1.09468, 0.018203]),
        series("1996/tab5.1-psi.txt", TENTH_MAS),
        series("1996/tab5.1-epsilon.txt", TENTH_MAS),
        FunctionSource::Polynomial(&[84381.448, -46.8150, -0.00059, 0.001813]),
        FunctionSource::EquinoxCorrection1996,
    ],
    tide_frequency_dependence: None,
};

static IERS_2003: ConventionSources = ConventionSources {
    arguments: "2003/nutation-arguments.txt",
    functions: [
        series("2003/tab5.2a.txt", MICRO_AS),
        series("2003/tab5.2b.txt", MICRO_AS),
        series("2003/tab5.2c.txt", MICRO_AS),
        Unsupported,
        Unsupported,
        Unsupported,
        Unsupported,
        Unsupported,
        Unsupported,
        FunctionSource::Zero,
    ],
    tide_frequency_dependence: Some("2003/tab6.3.txt"),
};

static IERS_2010: ConventionSources = ConventionSources {
    arguments: "2010/nutation-arguments.txt",
    functions: [
        series("2010/tab5.2a.txt", MICRO_AS),
        series("2010/tab5.2b.txt", MICRO_AS),
        series("2010/tab5.2d.txt", MICRO_AS),
        Unsupported,
        Unsupported,
        Unsupported,
        Unsupported,
        Unsupported,
        Unsupported,
        FunctionSource::Zero,
    ],
    tide_frequency_dependence: Some("2010/tab6.5.txt"),
};

pub(crate) fn sources(conventions: IersConventions) -> &'static ConventionSources {
    match conventions {
        IersConventions::Iers1996 => &IERS_1996,
        IersConventions::Iers2003 => &IERS_2003,
        IersConventions::Iers2010 => &IERS_2010,
    }
}
