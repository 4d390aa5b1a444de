//! Model artifact files.
//!
//! An artifact is a pretty-printed JSON document:
//!
//! ```text
//! {
//!   "format_version": 1,
//!   "model": {
//!     "meta":     { "feature_names": ["L","W","H","DF"], "target_name",
//!                   "num_features", "objective" },
//!     "forest":   { "base_score", "trees": [ { "num_nodes", "split_indices", ... } ] },
//!     "training": { "n_trees", "learning_rate", "max_depth", "seed", "n_rows" }
//!   }
//! }
//! ```
//!
//! Writes go to a temporary file in the target directory which is then
//! renamed into place without replacing an existing file. Reads validate the
//! whole document before a [`WeightModel`] is handed out.

mod convert;
mod error;
pub mod schema;

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::model::WeightModel;

pub use error::{PersistError, ReadError};
pub use schema::{ArtifactEnvelope, FORMAT_VERSION};

/// Serialize `model` to the artifact JSON.
///
/// # Errors
///
/// [`PersistError::InvalidModel`] if the forest does not validate against
/// the model's feature count.
pub fn to_json(model: &WeightModel) -> Result<String, PersistError> {
    model.forest().validate(model.meta().n_features())?;
    let envelope = ArtifactEnvelope {
        format_version: FORMAT_VERSION,
        model: model.into(),
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Parse and validate artifact JSON.
pub fn from_json(json: &str) -> Result<WeightModel, ReadError> {
    let envelope: ArtifactEnvelope = serde_json::from_str(json)?;
    if envelope.format_version != FORMAT_VERSION {
        return Err(ReadError::UnsupportedVersion {
            found: envelope.format_version,
            supported: FORMAT_VERSION,
        });
    }
    WeightModel::try_from(envelope.model)
}

/// Write `model` to a new artifact at `path`.
///
/// The artifact appears whole or not at all, and an existing file at `path`
/// is left untouched.
pub fn write_model(model: &WeightModel, path: impl AsRef<Path>) -> Result<(), PersistError> {
    let path = path.as_ref();
    if path.exists() {
        return Err(PersistError::AlreadyExists(path.to_path_buf()));
    }
    let json = to_json(model)?;

    let io_err = |source: std::io::Error| PersistError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(io_err)?;
    file.write_all(json.as_bytes()).map_err(io_err)?;
    file.as_file().sync_all().map_err(io_err)?;
    file.persist_noclobber(path).map_err(|e| {
        if e.error.kind() == std::io::ErrorKind::AlreadyExists {
            PersistError::AlreadyExists(path.to_path_buf())
        } else {
            io_err(e.error)
        }
    })?;

    debug!(path = %path.display(), bytes = json.len(), "artifact written");
    Ok(())
}

/// Read and validate the artifact at `path`.
pub fn read_model(path: impl AsRef<Path>) -> Result<WeightModel, ReadError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let model = from_json(&json)?;
    debug!(path = %path.display(), n_trees = model.n_trees(), "artifact loaded");
    Ok(model)
}
