use std::{io::Write, path::PathBuf};

use housing::{
    predict, AppContext, Column, CsvFile, DatasetCache, DatasetSource, FeatureDefaults,
    FeatureVector, Histogram, HousingError, RiverBoundary, HISTOGRAM_BINS,
};

const SEED: u64 = 2024;

fn bundled_dataset() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("data")
        .join("housing.csv")
}

fn is_price(s: &str) -> bool {
    let Some(num) = s.strip_prefix("US $ ") else {
        return false;
    };
    match num.split_once('.') {
        Some((int, frac)) => {
            !int.is_empty()
                && int.chars().all(|c| c.is_ascii_digit())
                && frac.len() == 2
                && frac.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

/// Every feature at its column mean, except the river flag off and the room placeholder.
fn mean_probe(ctx: &AppContext) -> FeatureVector {
    FeatureVector {
        chas: RiverBoundary::No,
        ..FeatureDefaults::from_dataset(ctx.dataset()).vector()
    }
}

#[test]
fn bundled_dataset_loads_and_trains() {
    let cache = DatasetCache::new(CsvFile::new(bundled_dataset()));
    let ctx = AppContext::bootstrap(&cache, Some(SEED)).unwrap();

    assert!(ctx.dataset().len() >= 40);
    assert_eq!(ctx.model().rows(), ctx.dataset().len());

    let probe = mean_probe(&ctx);
    assert_eq!(probe.rm, 1.0);
    assert_eq!(probe.chas.as_value(), 0.0);

    let price = predict(ctx.model(), &probe);
    assert!(is_price(&price), "{price}");
}

#[test]
fn fixed_seed_predictions_are_stable_across_trainings() {
    let cache = DatasetCache::new(CsvFile::new(bundled_dataset()));
    let first = AppContext::bootstrap(&cache, Some(SEED)).unwrap();
    let second = AppContext::bootstrap(&cache, Some(SEED)).unwrap();

    let probe = mean_probe(&first);
    let a = first.model().predict(&probe);
    let b = second.model().predict(&probe);

    assert!((a - b).abs() < 1e-9, "a={a} b={b}");
    assert_eq!(predict(first.model(), &probe), predict(second.model(), &probe));
}

#[test]
fn predictions_stay_within_observed_targets() {
    let cache = DatasetCache::new(CsvFile::new(bundled_dataset()));
    let ctx = AppContext::bootstrap(&cache, Some(SEED)).unwrap();
    let (min, max) = (
        ctx.dataset().target_min().unwrap(),
        ctx.dataset().target_max().unwrap(),
    );

    for record in ctx.dataset().records().iter().take(10) {
        let v = FeatureVector {
            crim: record.crim,
            indus: record.indus,
            chas: if record.chas == 1.0 {
                RiverBoundary::Yes
            } else {
                RiverBoundary::No
            },
            nox: record.nox,
            rm: record.rm,
            ptratio: record.ptratio,
            b: record.b,
            lstat: record.lstat,
        };
        let p = ctx.model().predict(&v);
        assert!(min <= p && p <= max, "p={p}");
    }
}

#[test]
fn missing_resource_is_fatal_before_training() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DatasetCache::new(CsvFile::new(dir.path().join("absent.csv")));

    let err = AppContext::bootstrap(&cache, Some(SEED)).unwrap_err();
    assert!(matches!(err, HousingError::ResourceUnavailable { .. }));
    assert!(err.is_fatal());
    assert!(!cache.is_loaded());
}

#[test]
fn malformed_resource_is_unavailable() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "CRIM,INDUS,CHAS,NOX,RM,PTRATIO,B,LSTAT,MEDV").unwrap();
    writeln!(file, "0.1,2.0,0,0.5,six,15.0,396.9,5.0,24.0").unwrap();

    let err = CsvFile::new(file.path()).read().unwrap_err();
    assert!(matches!(err, HousingError::ResourceUnavailable { .. }));
}

#[test]
fn header_only_resource_fails_to_fit() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "CRIM,INDUS,CHAS,NOX,RM,PTRATIO,B,LSTAT,MEDV").unwrap();

    let cache = DatasetCache::new(CsvFile::new(file.path()));
    let err = AppContext::bootstrap(&cache, Some(SEED)).unwrap_err();
    assert!(matches!(err, HousingError::FitFailure(_)));
}

#[test]
fn three_row_range_scenario() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "CRIM,INDUS,CHAS,NOX,RM,PTRATIO,B,LSTAT,MEDV\n\
         0.1,2.0,0,0.5,6.0,15.0,396.9,5.0,15.0\n\
         0.2,3.0,1,0.6,6.5,16.0,390.0,6.0,22.0\n\
         0.3,4.0,0,0.7,7.0,17.0,380.0,7.0,50.0\n"
    )
    .unwrap();

    let dataset = CsvFile::new(file.path()).read().unwrap();
    let subset = dataset.filter_by_target_range(10.0, 25.0);

    assert_eq!(subset.records(), &dataset.records()[..2]);
    assert_eq!(subset.column_values(Column::Medv), [15.0, 22.0]);

    let histogram = Histogram::of_targets(&subset, HISTOGRAM_BINS);
    assert_eq!(histogram.bins().len(), HISTOGRAM_BINS);
    assert_eq!(histogram.total(), 2);
}
