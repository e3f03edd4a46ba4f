//! CSV ingestion — the engine's external collaborator for reading a
//! measurement series off disk.
//!
//! Explicitly thin: a single-column (or named-column) CSV in, `Vec<f64>`
//! out. No spreadsheet workbooks, no multi-sheet ingestion, no directory
//! traversal — those remain out of scope for this crate.

use std::path::Path;

use anyhow::{bail, Context, Result};

/// Read a single numeric series from `path`.
///
/// If `column` is `Some`, the CSV is treated as headered and the named
/// column is extracted. If `column` is `None`, the first column of every
/// record is used (headered or not).
pub fn read_series(path: &Path, column: Option<&str>) -> Result<Vec<f64>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(column.is_some())
        .from_path(path)
        .with_context(|| format!("opening series CSV {}", path.display()))?;

    let col_index = match column {
        Some(name) => {
            let headers = reader.headers()?.clone();
            headers
                .iter()
                .position(|h| h == name)
                .with_context(|| format!("column '{name}' not found in {}", path.display()))?
        }
        None => 0,
    };

    let mut series = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("reading row {row_idx} of {}", path.display()))?;
        let raw = record
            .get(col_index)
            .with_context(|| format!("row {row_idx} of {} is missing column {col_index}", path.display()))?;
        let value: f64 = raw
            .trim()
            .parse()
            .with_context(|| format!("row {row_idx} of {}: '{raw}' is not a number", path.display()))?;
        series.push(value);
    }

    Ok(series)
}

/// Read every column of a headered, wide-format CSV as its own named
/// series. Used by the `batch` command: each column is one independent
/// measurement series, analyzed on its own.
pub fn read_batch(path: &Path) -> Result<Vec<(String, Vec<f64>)>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening batch CSV {}", path.display()))?;

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if headers.is_empty() {
        bail!("{} has no columns", path.display());
    }

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
    for (row_idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("reading row {row_idx} of {}", path.display()))?;
        for (col_idx, cell) in record.iter().enumerate() {
            let value: f64 = cell
                .trim()
                .parse()
                .with_context(|| format!("row {row_idx} of {}: '{cell}' is not a number", path.display()))?;
            columns[col_idx].push(value);
        }
    }

    Ok(headers.into_iter().zip(columns).collect())
}

/// Sample mean and population standard deviation of `series`.
///
/// A caller-side convenience only — the engine itself never recomputes
/// statistics from the series it analyzes.
pub fn sample_stats(series: &[f64]) -> Result<(f64, f64)> {
    if series.is_empty() {
        bail!("cannot compute mean/stdev of an empty series");
    }
    let n = series.len() as f64;
    let mean = series.iter().sum::<f64>() / n;
    let variance = series.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    Ok((mean, variance.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_first_column_without_header() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1.0\n2.0\n3.0").unwrap();
        let series = read_series(file.path(), None).unwrap();
        assert_eq!(series, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn reads_named_column_with_header() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id,value\n1,10.5\n2,11.5").unwrap();
        let series = read_series(file.path(), Some("value")).unwrap();
        assert_eq!(series, vec![10.5, 11.5]);
    }

    #[test]
    fn missing_column_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id,value\n1,10.5").unwrap();
        assert!(read_series(file.path(), Some("nope")).is_err());
    }

    #[test]
    fn reads_batch_as_independent_columns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "a,b\n1.0,10.0\n2.0,20.0\n3.0,30.0").unwrap();
        let batch = read_batch(file.path()).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], ("a".to_string(), vec![1.0, 2.0, 3.0]));
        assert_eq!(batch[1], ("b".to_string(), vec![10.0, 20.0, 30.0]));
    }

    #[test]
    fn sample_stats_matches_hand_computation() {
        let (mean, stdev) = sample_stats(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((mean - 5.0).abs() < 1e-9);
        assert!((stdev - 2.0).abs() < 1e-9);
    }

    #[test]
    fn sample_stats_rejects_empty_series() {
        assert!(sample_stats(&[]).is_err());
    }
}
