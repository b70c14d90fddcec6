//! Convention sets backed by the tables under `data/iers`.

use std::path::PathBuf;
use std::sync::Arc;

use iers_conventions::{ConventionSet, IersConventions, IersError, Quantity};
use iers_series::{ARGUMENT_NAMES, DirectoryLoader, SeriesError, SeriesLoader};
use iers_time::Epoch;

fn loader() -> Arc<DirectoryLoader> {
    Arc::new(DirectoryLoader::new(
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/iers"),
    ))
}

#[test]
fn iers_1996_loads_eagerly() {
    let set = ConventionSet::eager(IersConventions::Iers1996, loader()).unwrap();
    for q in Quantity::ALL {
        assert_eq!(set.function(q).is_ok(), set.supports(q), "{}", q.name());
    }
    assert!(!set.supports_tide_frequency_dependence());
}

#[test]
fn planetary_arguments_only_after_1996() {
    let lne = ARGUMENT_NAMES.iter().position(|&n| n == "LNe").unwrap();
    let old = ConventionSet::new(IersConventions::Iers1996, loader());
    let new = ConventionSet::new(IersConventions::Iers2010, loader());
    assert!(!old.nutation_arguments().unwrap().defines(lne));
    assert!(new.nutation_arguments().unwrap().defines(lne));

    // Ω at J2000 is the same in every convention.
    let om_old = old.nutation_arguments().unwrap().evaluate_all(Epoch::J2000).omega();
    let om_new = new.nutation_arguments().unwrap().evaluate_all(Epoch::J2000).omega();
    assert!((om_old - om_new).abs() < 1e-15);
}

#[test]
fn unshipped_tables_fail_with_resource_load() {
    let set = ConventionSet::new(IersConventions::Iers2010, loader());
    match set.x_function() {
        Err(IersError::ResourceLoad { name, source }) => {
            assert_eq!(name, "2010/tab5.2a.txt");
            assert!(matches!(source, SeriesError::MissingResource(_)), "{source}");
        }
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("2010 X table is not shipped"),
    }
    assert!(matches!(
        set.tide_frequency_dependence_function(),
        Err(IersError::ResourceLoad { .. })
    ));
    assert!(ConventionSet::eager(IersConventions::Iers2010, loader()).is_err());
}

#[test]
fn shipped_love_numbers() {
    let love = loader().load_love_numbers("love-numbers.txt").unwrap();
    assert_eq!(love.size(), 4);
    assert_eq!(love.real(2, 0), 0.30190);
    assert_eq!(love.imaginary(2, 1), -0.00144);
    assert_eq!(love.plus(2, 2), -0.00057);
    assert_eq!(love.real(3, 3), 0.094);
}
