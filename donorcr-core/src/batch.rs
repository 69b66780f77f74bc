//! CSV batch prediction.
//!
//! Input columns: `body_weight_kg,creatinine_mg_dl,non_excised_kidney_volume_ml,sex`.
//! Output repeats the inputs and adds `predicted_creatinine_mg_dl` and `error`.
//! A row that fails to parse or validate gets an `error` and no prediction;
//! it never aborts the batch. Only I/O failures and an unusable header do.

use std::io;

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{PredictionInput, Sex};
use crate::predictor::Predictor;

pub const INPUT_COLUMNS: [&str; 4] = [
    "body_weight_kg",
    "creatinine_mg_dl",
    "non_excised_kidney_volume_ml",
    "sex",
];

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("missing column '{0}' in CSV header")]
    MissingColumn(&'static str),
}

/// One parsed input row. `line` is the 1-based data row number (header excluded).
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRow {
    pub line: usize,
    pub input: Result<PredictionInput, String>,
}

/// One output row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRecord {
    pub row: usize,
    pub body_weight_kg: Option<f64>,
    pub creatinine_mg_dl: Option<f64>,
    pub non_excised_kidney_volume_ml: Option<f64>,
    pub sex: Option<Sex>,
    pub predicted_creatinine_mg_dl: Option<f64>,
    pub error: Option<String>,
}

impl BatchRecord {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub rows: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Parse every data row. Malformed rows become `Err` entries.
pub fn read_rows<R: io::Read>(reader: R) -> Result<Vec<BatchRow>, BatchError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr.headers()?.clone();
    for column in INPUT_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(BatchError::MissingColumn(column));
        }
    }

    let mut rows = Vec::new();
    for (i, record) in rdr.deserialize::<PredictionInput>().enumerate() {
        let input = match record {
            Ok(input) => Ok(input),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => Err(e.to_string()),
        };
        rows.push(BatchRow { line: i + 1, input });
    }
    Ok(rows)
}

/// Predict every row in parallel. Output order matches input order.
pub fn predict_rows(rows: &[BatchRow]) -> Vec<BatchRecord> {
    let predictor = Predictor::new();
    rows.par_iter()
        .map(|row| match &row.input {
            Ok(input) => {
                let (predicted, error) = match predictor.predict(input) {
                    Ok(result) => (Some(result.predicted_creatinine_mg_dl), None),
                    Err(e) => (None, Some(e.to_string())),
                };
                BatchRecord {
                    row: row.line,
                    body_weight_kg: Some(input.body_weight_kg),
                    creatinine_mg_dl: Some(input.creatinine_mg_dl),
                    non_excised_kidney_volume_ml: Some(input.non_excised_kidney_volume_ml),
                    sex: Some(input.sex),
                    predicted_creatinine_mg_dl: predicted,
                    error,
                }
            }
            Err(parse_error) => BatchRecord {
                row: row.line,
                body_weight_kg: None,
                creatinine_mg_dl: None,
                non_excised_kidney_volume_ml: None,
                sex: None,
                predicted_creatinine_mg_dl: None,
                error: Some(parse_error.clone()),
            },
        })
        .collect()
}

pub fn write_records<W: io::Write>(writer: W, records: &[BatchRecord]) -> Result<(), BatchError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Read, predict and write a whole batch.
pub fn run_batch<R: io::Read, W: io::Write>(
    reader: R,
    writer: W,
) -> Result<BatchSummary, BatchError> {
    let rows = read_rows(reader)?;
    let records = predict_rows(&rows);

    let summary = summarize(&records);
    for record in records.iter().filter(|r| !r.is_ok()) {
        warn!(
            row = record.row,
            error = record.error.as_deref().unwrap_or_default(),
            "batch row failed"
        );
    }
    info!(
        rows = summary.rows,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "batch complete"
    );

    write_records(writer, &records)?;
    Ok(summary)
}

pub fn summarize(records: &[BatchRecord]) -> BatchSummary {
    let succeeded = records.iter().filter(|r| r.is_ok()).count();
    BatchSummary {
        rows: records.len(),
        succeeded,
        failed: records.len() - succeeded,
    }
}
