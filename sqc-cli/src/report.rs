//! Output rendering — the engine's external collaborator for writing the
//! label vector back out. No chart rendering, no PDF composition, no HTTP
//! surface; just CSV or JSON.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LabeledPoint {
    pub index: usize,
    pub value: f64,
    pub label: i32,
}

/// Write `index,value,label` rows to `writer`.
pub fn write_csv<W: Write>(writer: W, series: &[f64], labels: &[i32]) -> Result<()> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(["index", "value", "label"])?;
    for (i, (&value, &label)) in series.iter().zip(labels.iter()).enumerate() {
        w.write_record(&[i.to_string(), value.to_string(), label.to_string()])?;
    }
    w.flush()?;
    Ok(())
}

/// Write the label vector as a JSON array of `{index, value, label}` records.
pub fn write_json<W: Write>(mut writer: W, series: &[f64], labels: &[i32]) -> Result<()> {
    let points: Vec<LabeledPoint> = series
        .iter()
        .zip(labels.iter())
        .enumerate()
        .map(|(index, (&value, &label))| LabeledPoint { index, value, label })
        .collect();
    serde_json::to_writer_pretty(&mut writer, &points)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_output_has_expected_rows() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &[1.0, 2.0], &[0, 2]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "index,value,label\n0,1,0\n1,2,2\n");
    }

    #[test]
    fn json_output_round_trips_through_serde() {
        let mut buf = Vec::new();
        write_json(&mut buf, &[1.0, 2.0], &[0, 2]).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1]["label"], 2);
    }
}
