//! Crate-level error type.

use thiserror::Error;

use crate::data::{DataValidationError, DatasetWriteError};
use crate::inference::PredictError;
use crate::model::TrainError;
use crate::persist::{PersistError, ReadError};
use crate::synthetic::GenerationError;
use crate::training::ConfigError;

/// Category of an [`Error`], for callers that branch on failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Generation,
    DataValidation,
    ModelNotFound,
    SchemaMismatch,
    Config,
    Io,
}

/// Any error this crate returns.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    DataValidation(#[from] DataValidationError),

    #[error(transparent)]
    DatasetWrite(#[from] DatasetWriteError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Predict(#[from] PredictError),
}

impl From<TrainError> for Error {
    fn from(err: TrainError) -> Self {
        match err {
            TrainError::Data(e) => Self::DataValidation(e),
            TrainError::Config(e) => Self::Config(e),
            TrainError::Persist(e) => Self::Persist(e),
        }
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Generation(_) => ErrorKind::Generation,
            Self::DataValidation(_) => ErrorKind::DataValidation,
            Self::DatasetWrite(_) | Self::Persist(_) => ErrorKind::Io,
            Self::Config(_) => ErrorKind::Config,
            Self::Read(e) if e.is_schema_mismatch() => ErrorKind::SchemaMismatch,
            Self::Read(_) => ErrorKind::ModelNotFound,
            Self::Predict(e) if e.is_schema_mismatch() => ErrorKind::SchemaMismatch,
            Self::Predict(_) => ErrorKind::ModelNotFound,
        }
    }
}

/// Result alias using [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn kinds() {
        let err: Error = GenerationError::NegativeCount(-1).into();
        assert_eq!(err.kind(), ErrorKind::Generation);

        let err: Error = DataValidationError::Empty.into();
        assert_eq!(err.kind(), ErrorKind::DataValidation);

        let err: Error = TrainError::Config(ConfigError::InvalidNTrees).into();
        assert_eq!(err.kind(), ErrorKind::Config);

        let err: Error = PersistError::AlreadyExists(PathBuf::from("m.json")).into();
        assert_eq!(err.kind(), ErrorKind::Io);

        let err: Error = PredictError::ArityMismatch {
            expected: 4,
            found: 3,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::SchemaMismatch);

        let err: Error = PredictError::ModelNotFound {
            path: PathBuf::from("m.json"),
            source: ReadError::Validation("bad".into()),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::ModelNotFound);

        let err: Error = ReadError::FeatureSchema { found: vec![] }.into();
        assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
    }

    #[test]
    fn messages_pass_through() {
        let err: Error = DataValidationError::Empty.into();
        assert_eq!(err.to_string(), "dataset is empty");
    }
}
