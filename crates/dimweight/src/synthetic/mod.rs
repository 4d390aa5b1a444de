//! Synthetic warehouse-item datasets.
//!
//! Ordinary records draw correlated dimensions around a shared base size and
//! a density-clamped noisy weight. A fixed share of records is then
//! overwritten with extreme dimensions (outliers) and another share with
//! extreme density factors. Both overwrites recompute the weight from the
//! base formula without noise or clamp, so those records may leave the
//! ordinary density band.
//!
//! # Example
//!
//! ```
//! use dimweight::synthetic::{GeneratorParams, ItemGenerator};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let generator = ItemGenerator::new(GeneratorParams::default()).unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//! let records = generator.generate(200, &mut rng);
//! assert_eq!(records.iter().filter(|r| r.profile.is_outlier()).count(), 10);
//! ```

mod generator;
mod params;

pub use generator::{ItemGenerator, generate};
pub use params::{
    DimensionRanges, ExtremeDensityParams, GenerationError, GeneratorParams, Interval,
    OutlierParams,
};
