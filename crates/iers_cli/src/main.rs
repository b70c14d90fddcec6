use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use iers_conventions::{ConventionSet, IersConventions};
use iers_frames::{ModProvider, TodProvider};
use iers_series::{ARC_SECONDS_TO_RADIANS, DirectoryLoader, LoveNumbers, SeriesLoader};
use iers_tides::{
    CelestialBody, EarthRotationFrame, LegendreRecursion, MAX_DEGREE,
    NormalizedSphericalHarmonicsProvider, StaticBody, TideSystem, TidesError, TidesField,
    TidesFieldConfig, no_frequency_dependence,
};
use iers_time::{Epoch, EopHistory};
use nalgebra::{Rotation3, Vector3};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

const LOVE_NUMBERS: &str = "love-numbers.txt";
const DEFAULT_DATA_DIR: &str = "data/iers";
const IAU_1980_PSI: &str = "1996/tab5.1-psi.txt";
/// Terms in the complete IAU 1980 nutation series.
const IAU_1980_TERMS: usize = 106;

#[derive(Parser)]
#[command(name = "iers", about = "IERS Earth orientation and tide corrections")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory holding the IERS tables (default: $IERS_DATA_DIR, then data/iers)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Nutation angles and the mean-of-date to true-of-date matrix
    Nutation {
        /// Conventions year: 1996, 2003 or 2010
        #[arg(long, default_value = "1996")]
        conventions: u16,
        /// Julian Date TT
        #[arg(long)]
        jd: f64,
        /// Path to an IERS finals.all file
        #[arg(long)]
        eop: Option<PathBuf>,
    },
    /// Precession angles and the mean-of-J2000 to mean-of-date matrix
    Precession {
        /// Conventions year: 1996, 2003 or 2010
        #[arg(long, default_value = "1996")]
        conventions: u16,
        /// Julian Date TT
        #[arg(long)]
        jd: f64,
    },
    /// Normalized associated Legendre functions up to degree 4
    Legendre {
        /// Colatitude in degrees
        #[arg(long)]
        colatitude_deg: f64,
    },
    /// Solid tide corrections to the normalized gravity coefficients
    Tides {
        /// Julian Date TT
        #[arg(long)]
        jd: f64,
        /// Tide-generating body as gm,x,y,z (m^3/s^2 and inertial metres)
        #[arg(long = "body", required = true)]
        bodies: Vec<String>,
        /// Report the coefficients in the zero-tide system
        #[arg(long)]
        zero_tide: bool,
        /// Add the frequency-dependent corrections of these conventions
        #[arg(long)]
        conventions: Option<u16>,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let data_dir = resolve_data_dir(
        cli.data_dir,
        std::env::var_os("IERS_DATA_DIR").map(PathBuf::from),
    );
    debug!(data_dir = %data_dir.display(), "using IERS tables");
    let loader = Arc::new(DirectoryLoader::new(&data_dir));

    match cli.command {
        Commands::Nutation {
            conventions,
            jd,
            eop,
        } => {
            let set = ConventionSet::new(require_conventions(conventions), loader.clone());
            let history = eop.as_deref().map(|p| Arc::new(load_eop(p)));
            let tod = TodProvider::new(&set, history).unwrap_or_else(|e| fail(&e));
            let epoch = Epoch::from_jd_tt(jd);
            let a = tod.angles(epoch);
            println!("Conventions: {}", set.conventions());
            if set.conventions() == IersConventions::Iers1996 {
                let terms = loader
                    .load_poisson_series(IAU_1980_PSI, 1.0, 1.0)
                    .map_or(0, |s| s.term_count());
                if let Some(note) = truncation_note(terms) {
                    println!("{note}");
                }
            }
            println!("Delta psi:            {:+.6} arcsec", arcsec(a.delta_psi));
            println!("Delta epsilon:        {:+.6} arcsec", arcsec(a.delta_epsilon));
            println!("Mean obliquity:       {:.6} arcsec", arcsec(a.mean_obliquity));
            println!(
                "Equation of equinoxes: {:+.6} arcsec",
                arcsec(a.equation_of_equinoxes)
            );
            if let Some(history) = tod.eop_history() {
                let pole = tod.pole_correction(epoch);
                println!("LOD:                  {:.7} s", tod.lod(epoch));
                println!(
                    "Pole:                 x {:+.6} y {:+.6} arcsec",
                    arcsec(pole.xp),
                    arcsec(pole.yp)
                );
                debug!(rows = history.len(), "EOP corrections applied");
            }
            print_rotation("MOD -> TOD", &tod.transform(epoch));
        }

        Commands::Precession { conventions, jd } => {
            let set = ConventionSet::new(require_conventions(conventions), loader);
            let mod_provider = ModProvider::new(&set).unwrap_or_else(|e| fail(&e));
            let epoch = Epoch::from_jd_tt(jd);
            let a = mod_provider.angles(epoch);
            println!("Conventions: {}", set.conventions());
            println!("zeta:  {:.6} arcsec", arcsec(a.zeta));
            println!("theta: {:.6} arcsec", arcsec(a.theta));
            println!("z:     {:.6} arcsec", arcsec(a.z));
            print_rotation("J2000 -> MOD", &mod_provider.transform(epoch));
        }

        Commands::Legendre { colatitude_deg } => {
            let (u, t) = colatitude_deg.to_radians().sin_cos();
            let mut recursion = LegendreRecursion::new();
            for (n, m, value) in recursion.evaluate(t, u).iter() {
                println!("P({n},{m}) = {value:+.15e}");
            }
        }

        Commands::Tides {
            jd,
            bodies,
            zero_tide,
            conventions,
        } => {
            let bodies: Vec<Box<dyn CelestialBody>> = bodies
                .iter()
                .enumerate()
                .map(|(i, arg)| {
                    parse_body(&format!("body{}", i + 1), arg)
                        .map(|b| Box::new(b) as Box<dyn CelestialBody>)
                        .unwrap_or_else(|e| {
                            eprintln!("Invalid body '{arg}': {e}");
                            std::process::exit(1);
                        })
                })
                .collect();
            let love = loader
                .load_love_numbers(LOVE_NUMBERS)
                .unwrap_or_else(|e| fail(&e));
            let k20 = nominal_k20(&love).unwrap_or_else(|e| fail(&e));
            let system = if zero_tide {
                TideSystem::ZeroTide
            } else {
                TideSystem::TideFree
            };
            let delta_cs = match conventions {
                Some(year) => ConventionSet::new(require_conventions(year), loader)
                    .tide_frequency_dependence_function()
                    .unwrap_or_else(|e| fail(&e)),
                None => no_frequency_dependence(),
            };
            let mut field = TidesField::new(
                TidesFieldConfig::earth(system, k20),
                love,
                delta_cs,
                Box::new(EarthRotationFrame::default()),
                bodies,
            )
            .unwrap_or_else(|e| fail(&e));
            let offset = field.offset(Epoch::from_jd_tt(jd));
            let (cnm, snm) = field.coefficients(offset).unwrap_or_else(|e| fail(&e));
            println!("Tide system: {system:?}");
            for n in 2..=MAX_DEGREE {
                for m in 0..=n {
                    println!(
                        "dC({n},{m}) = {:+.6e}  dS({n},{m}) = {:+.6e}",
                        cnm[(n, m)],
                        snm[(n, m)]
                    );
                }
            }
        }
    }
}

fn resolve_data_dir(flag: Option<PathBuf>, env: Option<PathBuf>) -> PathBuf {
    flag.or(env).unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

fn require_conventions(year: u16) -> IersConventions {
    IersConventions::from_year(year).unwrap_or_else(|| {
        eprintln!("Invalid conventions: {year} (1996, 2003 or 2010)");
        std::process::exit(1);
    })
}

fn load_eop(path: &Path) -> EopHistory {
    EopHistory::load(path).unwrap_or_else(|e| {
        eprintln!("Failed to load EOP: {e}");
        std::process::exit(1);
    })
}

fn fail(e: &dyn std::error::Error) -> ! {
    eprintln!("Error: {e}");
    let mut source = e.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
    std::process::exit(1);
}

/// Nominal k20 used for the permanent tide.
fn nominal_k20(love: &LoveNumbers) -> Result<f64, TidesError> {
    if love.size() <= 2 {
        return Err(TidesError::InvalidConfig(
            "Love numbers must define degree 2",
        ));
    }
    Ok(love.real(2, 0))
}

fn truncation_note(terms: usize) -> Option<String> {
    (terms < IAU_1980_TERMS).then(|| {
        format!(
            "Note: IAU 1980 series truncated to {terms} of {IAU_1980_TERMS} terms \
             (errors up to tens of mas)"
        )
    })
}

/// Parse `gm,x,y,z` into a body fixed in the inertial frame.
fn parse_body(name: &str, text: &str) -> Result<StaticBody, String> {
    let values = text
        .split(',')
        .map(|s| s.trim().parse::<f64>().map_err(|e| format!("{s:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    let [gm, x, y, z] = values[..] else {
        return Err(format!(
            "expected 4 comma-separated values, got {}",
            values.len()
        ));
    };
    if gm.is_nan() || gm < 0.0 {
        return Err(format!("gm must be non-negative, got {gm}"));
    }
    Ok(StaticBody::new(name, gm, Vector3::new(x, y, z)))
}

fn arcsec(rad: f64) -> f64 {
    rad / ARC_SECONDS_TO_RADIANS
}

fn print_rotation(label: &str, r: &Rotation3<f64>) {
    println!("{label}:");
    let m = r.matrix();
    for i in 0..3 {
        println!(
            "  [{:+.15} {:+.15} {:+.15}]",
            m[(i, 0)],
            m[(i, 1)],
            m[(i, 2)]
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_precedence() {
        let flag = Some(PathBuf::from("/flag"));
        let env = Some(PathBuf::from("/env"));
        assert_eq!(resolve_data_dir(flag, env.clone()), PathBuf::from("/flag"));
        assert_eq!(resolve_data_dir(None, env), PathBuf::from("/env"));
        assert_eq!(resolve_data_dir(None, None), PathBuf::from(DEFAULT_DATA_DIR));
    }

    #[test]
    fn body_argument() {
        let body = parse_body("moon", "4.9e12, 3.8e8, 0, 0").unwrap();
        assert_eq!(body.gm(), 4.9e12);
        assert_eq!(body.name(), "moon");
        assert_eq!(body.position(Epoch::J2000).unwrap(), Vector3::new(3.8e8, 0.0, 0.0));
    }

    #[test]
    fn bad_body_specs() {
        assert!(parse_body("b", "1,2,3").is_err());
        assert!(parse_body("b", "1,2,3,x").is_err());
        assert!(parse_body("b", "-1,2,3,4").is_err());
    }

    #[test]
    fn k20_needs_degree_two() {
        let love = LoveNumbers::parse("2 0 0.30190 0.0 -0.00089", "love").unwrap();
        assert_eq!(nominal_k20(&love).unwrap(), 0.30190);
        let short = LoveNumbers::parse("1 0 0.1 0.0 0.0", "short").unwrap();
        assert!(matches!(
            nominal_k20(&short),
            Err(TidesError::InvalidConfig(_))
        ));
    }

    #[test]
    fn truncated_series_noted() {
        let note = truncation_note(10).unwrap();
        assert!(note.contains("10 of 106"), "{note}");
        assert!(truncation_note(IAU_1980_TERMS).is_none());
    }

    #[test]
    fn shipped_1996_series_is_flagged() {
        let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/iers");
        let series = DirectoryLoader::new(&data)
            .load_poisson_series(IAU_1980_PSI, 1.0, 1.0)
            .unwrap();
        assert!(truncation_note(series.term_count()).is_some());
    }

    #[test]
    fn cli_parses_tides() {
        let cli = Cli::try_parse_from([
            "iers", "-vv", "tides", "--jd", "2451545.0", "--body", "1,2,3,4", "--body",
            "5,6,7,8", "--zero-tide",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Tides {
                bodies, zero_tide, ..
            } => {
                assert_eq!(bodies.len(), 2);
                assert!(zero_tide);
            }
            _ => panic!("expected tides"),
        }
    }
}
