//! Control-chart run-rule engine.
//!
//! Scans a one-dimensional numeric series against a catalog of Nelson/Western
//! Electric-style run-rules and produces, for every input index, either the
//! id of the highest-priority rule it violates or zero.
//!
//! The crate is purely synchronous, has no I/O, and performs no logging —
//! those are the caller's concerns. See `sqc-cli` for ingestion, stats
//! computation, and reporting built on top of this engine.
//!
//! Pipeline: `analyze` runs [`scanner::scan_one`] once per catalog rule,
//! concatenates the per-rule signal lists in catalog order, then hands them
//! to [`resolver::resolve`] for priority-plus-overlap merging into a flat
//! label vector.

pub mod error;
pub mod resolver;
pub mod rule;
pub mod scanner;
pub mod signal;

pub use error::CoreError;
pub use resolver::resolve;
pub use rule::{default_catalog, Rule};
pub use scanner::scan_one;
pub use signal::Signal;

fn validate_stats(mean: f64, stdev: f64) -> Result<(), CoreError> {
    if !mean.is_finite() || !stdev.is_finite() || stdev <= 0.0 {
        return Err(CoreError::InvalidStats);
    }
    Ok(())
}

fn validate_series(series: &[f64]) -> Result<(), CoreError> {
    if let Some(idx) = series.iter().position(|x| !x.is_finite()) {
        return Err(CoreError::InvalidSeries(idx));
    }
    Ok(())
}

fn validate_catalog(catalog: &[Rule]) -> Result<(), CoreError> {
    if catalog.is_empty() {
        return Err(CoreError::InvariantViolation(
            "catalog must not be empty".to_string(),
        ));
    }
    for (i, a) in catalog.iter().enumerate() {
        for b in &catalog[i + 1..] {
            if a.id == b.id {
                return Err(CoreError::InvariantViolation(format!(
                    "duplicate rule id {} in catalog",
                    a.id
                )));
            }
        }
    }
    Ok(())
}

/// Analyze `series` against `catalog`, returning a label vector the same
/// length as `series`: each entry is `0` or the id of the highest-priority
/// rule whose resolved signal covers that index.
///
/// `mean`/`stdev` are caller-supplied; the engine never recomputes them.
pub fn analyze(
    series: &[f64],
    mean: f64,
    stdev: f64,
    catalog: &[Rule],
) -> Result<Vec<i32>, CoreError> {
    validate_stats(mean, stdev)?;
    validate_series(series)?;
    validate_catalog(catalog)?;

    let mut signals = Vec::new();
    for rule in catalog {
        signals.extend(scanner::scan_one(series, rule, mean, stdev));
    }

    resolver::resolve(signals, catalog, series.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series() {
        let labels = analyze(&[], 0.0, 1.0, &default_catalog()).unwrap();
        assert!(labels.is_empty());
    }

    #[test]
    fn single_three_sigma_spike() {
        let series = [0.0, 0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 0.0];
        let labels = analyze(&series, 0.0, 1.0, &default_catalog()).unwrap();
        assert_eq!(labels, vec![0, 0, 0, 0, 1, 0, 0, 0]);
    }

    #[test]
    fn eight_point_run_above_mean() {
        let series = [1.0; 8];
        let labels = analyze(&series, 0.0, 1.0, &default_catalog()).unwrap();
        assert_eq!(labels, vec![2; 8]);
    }

    #[test]
    fn six_point_strict_ascent_no_run() {
        let series = [-3.0, -2.0, -1.0, 1.0, 2.0, 3.0];
        let labels = analyze(&series, 0.0, 10.0, &default_catalog()).unwrap();
        assert_eq!(labels, vec![3; 6]);
    }

    #[test]
    fn fourteen_point_alternation() {
        let series = [
            1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0,
        ];
        let labels = analyze(&series, 0.0, 10.0, &default_catalog()).unwrap();
        assert_eq!(labels, vec![4; 14]);
    }

    #[test]
    fn rejects_non_positive_stdev() {
        let err = analyze(&[1.0], 0.0, 0.0, &default_catalog()).unwrap_err();
        assert_eq!(err, CoreError::InvalidStats);
    }

    #[test]
    fn rejects_non_finite_series() {
        let err = analyze(&[1.0, f64::NAN, 3.0], 0.0, 1.0, &default_catalog()).unwrap_err();
        assert_eq!(err, CoreError::InvalidSeries(1));
    }

    #[test]
    fn rejects_duplicate_catalog_ids() {
        let mut catalog = default_catalog();
        catalog[1].id = catalog[0].id;
        let err = analyze(&[1.0], 0.0, 1.0, &catalog).unwrap_err();
        assert!(matches!(err, CoreError::InvariantViolation(_)));
    }

    #[test]
    fn expanding_catalog_never_worsens_priority() {
        // A Rule-1 spike inside what would otherwise be a Rule-2 run: with
        // only rule 2 in the catalog, the spike index is labeled 2; adding
        // rule 1 can only raise it to the higher-priority id 1, never drop
        // it back to 0 or to a worse-priority id.
        let mut series = vec![1.0; 20];
        series[10] = 10.0;
        let full = default_catalog();
        let narrow: Vec<Rule> = full.iter().copied().filter(|r| r.id != 1).collect();

        let labels_narrow = analyze(&series, 0.0, 1.0, &narrow).unwrap();
        let labels_full = analyze(&series, 0.0, 1.0, &full).unwrap();

        assert_eq!(labels_narrow[10], 2);
        assert_eq!(labels_full[10], 1);
    }
}
