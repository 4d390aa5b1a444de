//! Dataset files.
//!
//! A dataset file is CSV with the header `id,L,W,H,DF,optimal_weight` and one
//! row per [`ItemRecord`].

use std::path::Path;

use ndarray::{Array1, Array2};

use super::error::{DataValidationError, DatasetWriteError};
use super::record::ItemRecord;
use super::schema::{DATASET_COLUMNS, FEATURE_NAMES, N_FEATURES, TARGET_NAME, feature_names};
use super::table::TrainingTable;

/// Write `records` to `path`, replacing any existing file.
pub fn write_records(
    path: impl AsRef<Path>,
    records: &[ItemRecord],
) -> Result<(), DatasetWriteError> {
    let path = path.as_ref();
    let wrap = |source: csv::Error| DatasetWriteError {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(wrap)?;
    for record in records {
        writer.serialize(record).map_err(wrap)?;
    }
    // An empty dataset still carries its header.
    if records.is_empty() {
        writer.write_record(DATASET_COLUMNS).map_err(wrap)?;
    }
    writer.flush().map_err(|e| wrap(e.into()))?;
    Ok(())
}

/// Read a dataset file whose header is exactly the dataset columns.
///
/// Records come back with an ordinary profile.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<ItemRecord>, DataValidationError> {
    let path = path.as_ref();
    let wrap = |source: csv::Error| DataValidationError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(wrap)?;
    let headers = reader.headers().map_err(wrap)?.clone();
    if !headers.iter().eq(DATASET_COLUMNS) {
        return Err(DataValidationError::HeaderMismatch {
            expected: DATASET_COLUMNS.iter().map(|s| s.to_string()).collect(),
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    reader
        .deserialize::<ItemRecord>()
        .map(|row| row.map_err(wrap))
        .collect()
}

/// Read the feature and target columns of a CSV file into a validated table.
///
/// The header must name `L, W, H, DF` in that relative order plus
/// `optimal_weight`. Other columns, such as `id`, are ignored.
pub fn read_training_table(path: impl AsRef<Path>) -> Result<TrainingTable, DataValidationError> {
    let path = path.as_ref();
    let wrap = |source: csv::Error| DataValidationError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(wrap)?;
    let headers = reader.headers().map_err(wrap)?.clone();
    let position = |name: &str| headers.iter().position(|h| h.trim() == name);

    let mut feature_cols = [0usize; N_FEATURES];
    for (slot, name) in feature_cols.iter_mut().zip(FEATURE_NAMES) {
        *slot = position(name).ok_or_else(|| DataValidationError::MissingColumn(name.to_string()))?;
    }
    if feature_cols.windows(2).any(|w| w[0] > w[1]) {
        let mut found: Vec<(usize, String)> = feature_cols
            .iter()
            .zip(FEATURE_NAMES)
            .map(|(&col, name)| (col, name.to_string()))
            .collect();
        found.sort_by_key(|(col, _)| *col);
        return Err(DataValidationError::ColumnOrder {
            expected: feature_names(),
            found: found.into_iter().map(|(_, name)| name).collect(),
        });
    }
    let target_col = position(TARGET_NAME)
        .ok_or_else(|| DataValidationError::MissingColumn(TARGET_NAME.to_string()))?;

    let mut rows: Vec<[f64; N_FEATURES]> = Vec::new();
    let mut targets = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(wrap)?;
        let cell = |col: usize, column: &str| -> Result<f64, DataValidationError> {
            let raw = record.get(col).unwrap_or_default();
            raw.trim()
                .parse::<f64>()
                .map_err(|_| DataValidationError::InvalidValue {
                    row,
                    column: column.to_string(),
                    value: raw.to_string(),
                })
        };
        let mut sample = [0.0; N_FEATURES];
        for ((value, &col), name) in sample.iter_mut().zip(&feature_cols).zip(FEATURE_NAMES) {
            *value = cell(col, name)?;
        }
        rows.push(sample);
        targets.push(cell(target_col, TARGET_NAME)?);
    }

    let features = Array2::from(rows);
    TrainingTable::new(feature_names(), features, TARGET_NAME, Array1::from(targets))
}
