//! Lazily opened model shared between callers.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock};

use tracing::info;

use super::predictor::{ModelHandle, PredictError, open_model};

/// A model artifact opened on first use and then reused.
///
/// The first successful [`handle`](Self::handle) call stores the model.
/// Concurrent first callers wait on one open instead of each reading the
/// file. Failures are not cached, so a later call retries the open.
/// Once loaded, predictions take no lock.
#[derive(Debug)]
pub struct SharedModel {
    path: PathBuf,
    handle: OnceLock<ModelHandle>,
    /// Serializes opening; never held once `handle` is set.
    init: Mutex<()>,
    loads: AtomicUsize,
}

impl SharedModel {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            handle: OnceLock::new(),
            init: Mutex::new(()),
            loads: AtomicUsize::new(0),
        }
    }

    /// Share an already loaded model.
    pub fn with_handle(path: impl Into<PathBuf>, handle: ModelHandle) -> Self {
        let shared = Self::new(path);
        let _ = shared.handle.set(handle);
        shared
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.handle.get().is_some()
    }

    /// Number of times the artifact was read successfully.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    /// The shared handle, opening the artifact if needed.
    pub fn handle(&self) -> Result<&ModelHandle, PredictError> {
        if let Some(handle) = self.handle.get() {
            return Ok(handle);
        }

        // The lock guards no data; poisoning is ignored.
        let _guard = self.init.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = self.handle.get() {
            return Ok(handle);
        }
        let opened = open_model(&self.path)?;
        self.loads.fetch_add(1, Ordering::Relaxed);
        info!(
            path = %self.path.display(),
            n_trees = opened.model().n_trees(),
            "model loaded"
        );
        Ok(self.handle.get_or_init(|| opened))
    }

    /// Predict from values in schema order `[L, W, H, DF]`.
    pub fn predict(&self, features: &[f64]) -> Result<f64, PredictError> {
        self.handle()?.predict(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModelMeta, TrainingSummary, WeightModel};
    use crate::repr::Forest;
    use std::sync::{Arc, Barrier};
    use std::thread;
    use tempfile::TempDir;

    fn constant_model(value: f64) -> WeightModel {
        WeightModel::from_parts(
            Forest::new(value),
            ModelMeta::for_items("reg:squarederror"),
            TrainingSummary {
                n_trees: 0,
                learning_rate: 0.3,
                max_depth: 6,
                seed: 0,
                n_rows: 1,
            },
        )
    }

    #[test]
    fn loads_once_and_reuses() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        constant_model(42.0).save(&path).unwrap();

        let shared = SharedModel::new(&path);
        assert!(!shared.is_loaded());
        assert_eq!(shared.predict(&[1.0, 2.0, 3.0, 0.8]).unwrap(), 42.0);
        assert!(shared.is_loaded());
        assert_eq!(shared.load_count(), 1);

        // Served from memory after the file is gone.
        std::fs::remove_file(&path).unwrap();
        assert_eq!(shared.predict(&[1.0, 2.0, 3.0, 0.8]).unwrap(), 42.0);
    }

    #[test]
    fn failed_open_is_retried() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        let shared = SharedModel::new(&path);

        assert!(matches!(
            shared.predict(&[1.0, 1.0, 1.0, 1.0]),
            Err(PredictError::ModelNotFound { .. })
        ));
        assert!(!shared.is_loaded());

        constant_model(7.0).save(&path).unwrap();
        assert_eq!(shared.predict(&[1.0, 1.0, 1.0, 1.0]).unwrap(), 7.0);
        assert_eq!(shared.load_count(), 1);
    }

    #[test]
    fn concurrent_callers_share_one_model() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        constant_model(3.5).save(&path).unwrap();

        let shared = Arc::new(SharedModel::new(&path));
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || shared.predict(&[1.0, 1.0, 1.0, 1.0]).unwrap())
            })
            .collect();
        for worker in workers {
            assert_eq!(worker.join().unwrap(), 3.5);
        }
    }

    #[test]
    fn simultaneous_first_calls_open_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        constant_model(9.0).save(&path).unwrap();

        let n_threads = 8;
        let shared = Arc::new(SharedModel::new(&path));
        let barrier = Arc::new(Barrier::new(n_threads));
        let workers: Vec<_> = (0..n_threads)
            .map(|_| {
                let shared = Arc::clone(&shared);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    shared.predict(&[1.0, 1.0, 1.0, 1.0]).unwrap()
                })
            })
            .collect();
        for worker in workers {
            assert_eq!(worker.join().unwrap(), 9.0);
        }
        assert_eq!(shared.load_count(), 1);
    }

    #[test]
    fn preloaded_handle() {
        let handle = ModelHandle::new(constant_model(1.0)).unwrap();
        let shared = SharedModel::with_handle("unused.json", handle);
        assert!(shared.is_loaded());
        assert_eq!(shared.predict(&[0.0; 4]).unwrap(), 1.0);
    }
}
