//! Seeded item generator.

use rand::rngs::StdRng;
use rand::seq::{SliceRandom, index};
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::params::{GenerationError, GeneratorParams, subset_size};
use crate::data::{DatasetSummary, ItemRecord, RecordProfile, SizeProfile, round_to};

/// Generates item datasets from a validated [`GeneratorParams`].
///
/// All randomness comes from the stream passed to [`generate`](Self::generate),
/// consumed in a fixed order:
///
/// 1. per record: base size, L, W, H multipliers, DF, weight noise
/// 2. outlier indices, then per outlier: profile choice, L, W, H
/// 3. extreme-density indices, then per record: DF choice
/// 4. the final shuffle
///
/// The same stream state therefore always yields the same dataset.
#[derive(Debug, Clone)]
pub struct ItemGenerator {
    params: GeneratorParams,
}

impl ItemGenerator {
    /// # Errors
    ///
    /// [`GenerationError::InvalidParams`] if `params` fail validation.
    pub fn new(params: GeneratorParams) -> Result<Self, GenerationError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &GeneratorParams {
        &self.params
    }

    /// Generate `n` records from the caller's random stream.
    pub fn generate<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<ItemRecord> {
        let mut records: Vec<ItemRecord> = (0..n).map(|_| self.ordinary(rng)).collect();

        let n_outliers = subset_size(n, self.params.outliers.fraction);
        for idx in index::sample(rng, n, n_outliers).iter() {
            self.make_outlier(&mut records[idx], rng);
        }

        let n_extreme = subset_size(n, self.params.extreme_density.fraction);
        for idx in index::sample(rng, n, n_extreme).iter() {
            self.make_extreme_density(&mut records[idx], rng);
        }
        debug!(n, n_outliers, n_extreme, "injected special records");

        records.shuffle(rng);
        for (id, record) in records.iter_mut().enumerate() {
            record.id = id as u64;
        }

        info!(summary = %DatasetSummary::from_records(&records), "generated dataset");
        records
    }

    /// Generate `n` records from a fresh `StdRng` seeded with `seed`.
    pub fn generate_seeded(&self, n: usize, seed: u64) -> Vec<ItemRecord> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate(n, &mut rng)
    }

    fn ordinary<R: Rng + ?Sized>(&self, rng: &mut R) -> ItemRecord {
        let p = &self.params;

        let base_size = p.base_size.sample(rng);
        let length = p.bounds.length.clip(base_size * p.aspect.length.sample(rng));
        let width = p.bounds.width.clip(base_size * p.aspect.width.sample(rng));
        let height = p.bounds.height.clip(base_size * p.aspect.height.sample(rng));
        let density_factor = p.density_factor.sample(rng);

        // Noise and clamp see the unrounded dimensions.
        let noisy =
            p.base_weight(length, width, height, density_factor) * p.weight_noise.sample(rng);
        let weight = p.clamp_weight(noisy, length, width, height);

        ItemRecord {
            id: 0,
            length: round_to(length, 1),
            width: round_to(width, 1),
            height: round_to(height, 1),
            density_factor: round_to(density_factor, 2),
            optimal_weight: round_to(weight, 1),
            profile: RecordProfile::default(),
        }
    }

    fn make_outlier<R: Rng + ?Sized>(&self, record: &mut ItemRecord, rng: &mut R) {
        let (profile, ranges) = if rng.gen_bool(0.5) {
            (SizeProfile::Large, &self.params.outliers.large)
        } else {
            (SizeProfile::Small, &self.params.outliers.small)
        };
        let (length, width, height) = ranges.sample(rng);

        record.length = round_to(length, 1);
        record.width = round_to(width, 1);
        record.height = round_to(height, 1);
        record.profile.outlier = Some(profile);
        self.recompute_unclamped(record);
    }

    fn make_extreme_density<R: Rng + ?Sized>(&self, record: &mut ItemRecord, rng: &mut R) {
        let values = &self.params.extreme_density.values;
        let density_factor = values[rng.gen_range(0..values.len())];

        record.density_factor = round_to(density_factor, 2);
        record.profile.extreme_density = true;
        self.recompute_unclamped(record);
    }

    /// Special records skip both noise and the density clamp.
    fn recompute_unclamped(&self, record: &mut ItemRecord) {
        let weight = self.params.base_weight(
            record.length,
            record.width,
            record.height,
            record.density_factor,
        );
        record.optimal_weight = round_to(weight, 1);
    }
}

/// Generate `n` records with the default distribution and a `StdRng` seeded
/// from `seed`.
///
/// # Errors
///
/// [`GenerationError::NegativeCount`] if `n < 0`.
///
/// # Example
///
/// ```
/// let records = dimweight::synthetic::generate(100, 42).unwrap();
/// assert_eq!(records.len(), 100);
/// assert_eq!(records[99].id, 99);
/// ```
pub fn generate(n: i64, seed: u64) -> Result<Vec<ItemRecord>, GenerationError> {
    let n = usize::try_from(n).map_err(|_| GenerationError::NegativeCount(n))?;
    let generator = ItemGenerator::new(GeneratorParams::default())?;
    Ok(generator.generate_seeded(n, seed))
}
