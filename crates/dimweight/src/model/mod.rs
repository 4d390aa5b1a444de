//! Trained weight models.
//!
//! [`WeightModel`] bundles a [`Forest`](crate::repr::Forest) with the
//! feature schema it binds and a summary of how it was trained. The free
//! functions [`train`] and [`train_to_path`] are the pipeline entry points.

mod meta;
mod weight_model;

pub use meta::{ModelMeta, TrainingSummary};
pub use weight_model::{TrainError, WeightModel, train, train_to_path};
