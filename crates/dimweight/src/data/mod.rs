//! Item records, the feature schema and dataset files.
//!
//! - [`ItemRecord`]: one generated warehouse item
//! - [`TrainingTable`]: validated `[L, W, H, DF]` features plus target
//! - [`write_records`] / [`read_records`] / [`read_training_table`]: CSV files

mod error;
mod io;
mod record;
pub mod schema;
mod summary;
mod table;

pub use error::{DataValidationError, DatasetWriteError};
pub use io::{read_records, read_training_table, write_records};
pub use record::{
    ItemRecord, MATERIAL_DENSITY, MAX_DENSITY, MIN_DENSITY, RecordProfile, SizeProfile,
    base_weight, clamp_weight, round_to, volume_liters, weight_bounds,
};
pub use schema::{FEATURE_NAMES, N_FEATURES, TARGET_NAME};
pub use summary::{ColumnRange, DatasetSummary};
pub use table::TrainingTable;
