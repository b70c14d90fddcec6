//! Transforms built from the tables shipped under `data/iers`.

use std::path::PathBuf;
use std::sync::Arc;

use iers_conventions::{ConventionSet, IersConventions, IersError};
use iers_frames::{ModProvider, TodProvider};
use iers_series::{ARC_SECONDS_TO_RADIANS, DirectoryLoader};
use iers_time::{Epoch, EopHistory};
use nalgebra::Vector3;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/iers")
}

fn conventions(c: IersConventions) -> ConventionSet {
    ConventionSet::new(c, Arc::new(DirectoryLoader::new(data_dir())))
}

fn arcsec(rad: f64) -> f64 {
    rad / ARC_SECONDS_TO_RADIANS
}

fn eop_row(mjd: f64, dpsi_mas: f64, deps_mas: f64) -> String {
    let mut line = vec![b' '; 125];
    let mut put = |first: usize, text: String| {
        line[first - 1..first - 1 + text.len()].copy_from_slice(text.as_bytes());
    };
    put(8, format!("{mjd:8.2}"));
    put(59, format!("{:10.7}", 0.3));
    put(98, format!("{dpsi_mas:9.3}"));
    put(117, format!("{deps_mas:9.3}"));
    String::from_utf8(line).unwrap()
}

#[test]
fn nutation_1996_at_j2000() {
    let tod = TodProvider::new(&conventions(IersConventions::Iers1996), None).unwrap();
    let a = tod.angles(Epoch::J2000);
    // Leading IAU 1980 terms only; the full series gives −13.93″ and −5.77″.
    assert!((arcsec(a.delta_psi) + 13.928_764).abs() < 1e-4, "Δψ = {}", arcsec(a.delta_psi));
    assert!(
        (arcsec(a.delta_epsilon) + 5.771_224).abs() < 1e-4,
        "Δε = {}",
        arcsec(a.delta_epsilon)
    );
    assert!((arcsec(a.mean_obliquity) - 84_381.448).abs() < 1e-9);
}

#[test]
fn nutation_1996_in_2024() {
    let tod = TodProvider::new(&conventions(IersConventions::Iers1996), None).unwrap();
    let a = tod.angles(Epoch::from_jd_tt(2_460_310.5));
    assert!((arcsec(a.delta_psi) + 5.351_356).abs() < 1e-4, "Δψ = {}", arcsec(a.delta_psi));
    assert!((arcsec(a.delta_epsilon) - 8.051_908).abs() < 1e-4);
    assert!((arcsec(a.mean_obliquity) - 84_370.213_032).abs() < 1e-5);
    // Includes the post-1997 correction terms of about 1 mas.
    assert!(
        (arcsec(a.equation_of_equinoxes) + 4.908_906).abs() < 1e-4,
        "eqe = {}",
        arcsec(a.equation_of_equinoxes)
    );
}

#[test]
fn tod_matrix_moves_pole_by_nutation() {
    let tod = TodProvider::new(&conventions(IersConventions::Iers1996), None).unwrap();
    let epoch = Epoch::from_jd_tt(2_460_310.5);
    let a = tod.angles(epoch);
    let true_pole = tod.transform(epoch).inverse() * Vector3::z();
    let expected_x = a.true_obliquity().sin() * a.delta_psi.sin();
    assert!((true_pole.x - expected_x).abs() < 1e-14, "{true_pole}");
    assert!((true_pole.y - a.delta_epsilon).abs() < 1e-9, "{true_pole}");
}

#[test]
fn eop_offsets_correct_the_pole_not_the_equinox() {
    let rows: String = [51_544.0, 51_545.0]
        .iter()
        .map(|&mjd| eop_row(mjd, -40.0, 12.0) + "\n")
        .collect();
    let eop = Arc::new(EopHistory::parse(&rows).unwrap());
    let set = conventions(IersConventions::Iers1996);
    let plain = TodProvider::new(&set, None).unwrap();
    let corrected = TodProvider::new(&set, Some(eop)).unwrap();

    let epoch = Epoch::J2000;
    let a = plain.angles(epoch);
    let b = corrected.angles(epoch);
    assert!((arcsec(b.delta_psi - a.delta_psi) + 0.040).abs() < 1e-9);
    assert!((arcsec(b.delta_epsilon - a.delta_epsilon) - 0.012).abs() < 1e-9);
    assert_eq!(a.equation_of_equinoxes, b.equation_of_equinoxes);
    assert_eq!(a.mean_obliquity, b.mean_obliquity);

    // Outside the covered days the history contributes nothing.
    let later = Epoch::from_jd_tt(2_460_310.5);
    assert_eq!(plain.angles(later), corrected.angles(later));
    assert_eq!(corrected.lod(later), 0.0);
}

#[test]
fn tod_needs_1996_series() {
    for c in [IersConventions::Iers2003, IersConventions::Iers2010] {
        let err = TodProvider::new(&conventions(c), None).unwrap_err();
        assert!(matches!(err, IersError::UnsupportedModel { .. }), "{c}: {err}");
    }
}

#[test]
fn precession_1996_in_2024() {
    let p = ModProvider::new(&conventions(IersConventions::Iers1996)).unwrap();
    let a = p.angles(Epoch::from_jd_tt(2_460_310.5));
    assert!((arcsec(a.zeta) - 553.478_409).abs() < 1e-5, "ζ = {}", arcsec(a.zeta));
    assert!((arcsec(a.theta) - 480.982_028).abs() < 1e-5);
    assert!((arcsec(a.z) - 553.524_072).abs() < 1e-5);

    let at_j2000 = p.transform(Epoch::J2000);
    assert!((at_j2000.matrix() - nalgebra::Matrix3::identity()).abs().max() < 1e-15);
}

#[test]
fn precession_unsupported_after_1996() {
    let err = ModProvider::new(&conventions(IersConventions::Iers2003)).unwrap_err();
    assert!(matches!(err, IersError::UnsupportedModel { .. }), "{err}");
}
