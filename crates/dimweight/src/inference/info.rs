//! Artifact inspection without predicting.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::persist;

/// File and model details for an artifact path.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    pub path: PathBuf,
    pub exists: bool,
    pub size_bytes: Option<u64>,
    pub modified: Option<SystemTime>,
    /// Present when the artifact loads.
    pub n_trees: Option<usize>,
    pub feature_names: Option<Vec<String>>,
    /// Why the artifact did not load, if it exists.
    pub load_error: Option<String>,
}

impl ModelInfo {
    pub fn is_loadable(&self) -> bool {
        self.n_trees.is_some()
    }
}

impl fmt::Display for ModelInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())?;
        if !self.exists {
            return write!(f, ": missing");
        }
        if let Some(size) = self.size_bytes {
            write!(f, ", {size} bytes")?;
        }
        match (&self.n_trees, &self.load_error) {
            (Some(n_trees), _) => write!(f, ", {n_trees} trees"),
            (None, Some(error)) => write!(f, ", not loadable: {error}"),
            (None, None) => Ok(()),
        }
    }
}

/// Describe the artifact at `path`. Never fails; problems are reported in
/// the returned fields.
pub fn model_info(path: impl AsRef<Path>) -> ModelInfo {
    let path = path.as_ref();
    let metadata = fs::metadata(path).ok();
    let mut info = ModelInfo {
        path: path.to_path_buf(),
        exists: metadata.is_some(),
        size_bytes: metadata.as_ref().map(fs::Metadata::len),
        modified: metadata.as_ref().and_then(|m| m.modified().ok()),
        n_trees: None,
        feature_names: None,
        load_error: None,
    };
    if !info.exists {
        return info;
    }

    match persist::read_model(path) {
        Ok(model) => {
            info.n_trees = Some(model.n_trees());
            info.feature_names = Some(model.meta().feature_names.clone());
        }
        Err(e) => info.load_error = Some(e.to_string()),
    }
    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TrainingTable;
    use crate::synthetic::generate;
    use tempfile::TempDir;

    #[test]
    fn missing_file() {
        let dir = TempDir::new().unwrap();
        let info = model_info(dir.path().join("absent.json"));
        assert!(!info.exists);
        assert!(info.size_bytes.is_none());
        assert!(!info.is_loadable());
        assert!(info.to_string().ends_with(": missing"));
    }

    #[test]
    fn loadable_artifact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        let table = TrainingTable::from_records(&generate(50, 1).unwrap()).unwrap();
        crate::model::train(&table, 3, 1).unwrap().save(&path).unwrap();

        let info = model_info(&path);
        assert!(info.exists);
        assert!(info.size_bytes.unwrap() > 0);
        assert!(info.modified.is_some());
        assert_eq!(info.n_trees, Some(3));
        assert_eq!(info.feature_names.unwrap(), ["L", "W", "H", "DF"]);
    }

    #[test]
    fn corrupt_artifact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, "[]").unwrap();

        let info = model_info(&path);
        assert!(info.exists);
        assert!(!info.is_loadable());
        assert!(info.load_error.is_some());
        assert!(info.to_string().contains("not loadable"));
    }
}
