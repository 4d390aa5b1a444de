//! Errors raised while validating or loading training data.

use std::path::PathBuf;

use thiserror::Error;

/// The dataset cannot be used for training as given.
#[derive(Debug, Error)]
pub enum DataValidationError {
    /// No rows.
    #[error("dataset is empty")]
    Empty,

    /// A required feature or target column is absent.
    #[error("missing required column `{0}`")]
    MissingColumn(String),

    /// All feature columns are present but not in schema order.
    #[error("feature columns out of order: expected {expected:?}, found {found:?}")]
    ColumnOrder {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// A feature column beyond the schema.
    #[error("unexpected feature column `{0}`")]
    UnexpectedColumn(String),

    /// A dataset file header differs from the dataset columns.
    #[error("dataset header mismatch: expected {expected:?}, found {found:?}")]
    HeaderMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// The target column name is not the expected one.
    #[error("target column must be `{expected}`, found `{found}`")]
    TargetName { expected: String, found: String },

    /// Feature rows and target values disagree in count.
    #[error("{features} feature rows but {targets} target values")]
    LengthMismatch { features: usize, targets: usize },

    /// Feature matrix width differs from the schema.
    #[error("feature matrix has {found} columns, expected {expected}")]
    WidthMismatch { expected: usize, found: usize },

    /// NaN or infinite value.
    #[error("non-finite value in column `{column}` at row {row}")]
    NonFinite { row: usize, column: String },

    /// A cell that does not parse as a number.
    #[error("invalid value {value:?} in column `{column}` at row {row}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    /// The dataset file could not be read or decoded.
    #[error("failed to read dataset {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// A dataset file could not be written.
#[derive(Debug, Error)]
#[error("failed to write dataset {}: {source}", path.display())]
pub struct DatasetWriteError {
    pub path: PathBuf,
    #[source]
    pub source: csv::Error,
}
