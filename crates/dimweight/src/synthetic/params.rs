//! Parameter groups for the item generator.
//!
//! [`GeneratorParams::default`] reproduces the reference warehouse
//! distribution. Every group validates itself; [`GeneratorParams::validate`]
//! runs them all.

use rand::Rng;
use thiserror::Error;

use crate::data::{MATERIAL_DENSITY, MAX_DENSITY, MIN_DENSITY, volume_liters};

// =============================================================================
// GenerationError
// =============================================================================

/// Errors raised before any record is drawn.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    /// Record count below zero.
    #[error("record count must be non-negative, got {0}")]
    NegativeCount(i64),

    /// A parameter group is unusable.
    #[error("invalid generator parameter `{field}`: {reason}")]
    InvalidParams { field: &'static str, reason: String },
}

impl GenerationError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            field,
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Interval
// =============================================================================

/// Half-open interval `[low, high)` used both for uniform draws and clipping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub low: f64,
    pub high: f64,
}

impl Interval {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Draw uniformly from `[low, high)`.
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.low..self.high)
    }

    /// Clip `value` into `[low, high]`.
    #[inline]
    pub fn clip(&self, value: f64) -> f64 {
        self.low.max(self.high.min(value))
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    fn validate(&self, field: &'static str) -> Result<(), GenerationError> {
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(GenerationError::invalid(field, "bounds must be finite"));
        }
        if self.low >= self.high {
            return Err(GenerationError::invalid(
                field,
                format!("empty or inverted range [{}, {})", self.low, self.high),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// DimensionRanges
// =============================================================================

/// One interval per dimension, in centimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionRanges {
    pub length: Interval,
    pub width: Interval,
    pub height: Interval,
}

impl DimensionRanges {
    /// Draw `(L, W, H)` in that order.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> (f64, f64, f64) {
        let length = self.length.sample(rng);
        let width = self.width.sample(rng);
        let height = self.height.sample(rng);
        (length, width, height)
    }

    pub fn contains(&self, length: f64, width: f64, height: f64) -> bool {
        self.length.contains(length) && self.width.contains(width) && self.height.contains(height)
    }

    fn validate(&self, field: &'static str) -> Result<(), GenerationError> {
        self.length.validate(field)?;
        self.width.validate(field)?;
        self.height.validate(field)
    }
}

// =============================================================================
// OutlierParams
// =============================================================================

/// Dimension overwrite applied to a fraction of the records.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierParams {
    /// Share of records overwritten, `floor(fraction · n)`. Default: 0.05.
    pub fraction: f64,
    /// Oversized profile.
    pub large: DimensionRanges,
    /// Undersized profile.
    pub small: DimensionRanges,
}

impl Default for OutlierParams {
    fn default() -> Self {
        Self {
            fraction: 0.05,
            large: DimensionRanges {
                length: Interval::new(60.0, 100.0),
                width: Interval::new(40.0, 80.0),
                height: Interval::new(50.0, 90.0),
            },
            small: DimensionRanges {
                length: Interval::new(1.0, 4.0),
                width: Interval::new(1.0, 3.0),
                height: Interval::new(1.0, 3.0),
            },
        }
    }
}

// =============================================================================
// ExtremeDensityParams
// =============================================================================

/// Density factor overwrite applied to a fraction of the records.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtremeDensityParams {
    /// Share of records overwritten. Default: 0.03.
    pub fraction: f64,
    /// Replacement density factors, one chosen uniformly per record.
    pub values: Vec<f64>,
}

impl Default for ExtremeDensityParams {
    fn default() -> Self {
        Self {
            fraction: 0.03,
            values: vec![0.5, 1.2],
        }
    }
}

// =============================================================================
// GeneratorParams
// =============================================================================

/// Full description of the item distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorParams {
    /// Shared size driving all three dimensions. Default: `[5, 40)`.
    pub base_size: Interval,
    /// Multipliers on `base_size` per dimension.
    pub aspect: DimensionRanges,
    /// Domain of ordinary dimensions; draws are clipped into it.
    pub bounds: DimensionRanges,
    /// Ordinary density factor. Default: `[0.7, 1.0)`.
    pub density_factor: Interval,
    /// Multiplicative weight noise. Default: `[0.85, 1.15)`.
    pub weight_noise: Interval,
    /// Grams per liter bounds of an ordinary record's weight.
    pub density_bounds: Interval,
    /// Material density in the base weight formula.
    pub material_density: f64,
    pub outliers: OutlierParams,
    pub extreme_density: ExtremeDensityParams,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            base_size: Interval::new(5.0, 40.0),
            aspect: DimensionRanges {
                length: Interval::new(0.8, 1.4),
                width: Interval::new(0.4, 1.2),
                height: Interval::new(0.3, 1.1),
            },
            bounds: DimensionRanges {
                length: Interval::new(5.0, 50.0),
                width: Interval::new(3.0, 30.0),
                height: Interval::new(2.0, 40.0),
            },
            density_factor: Interval::new(0.7, 1.0),
            weight_noise: Interval::new(0.85, 1.15),
            density_bounds: Interval::new(MIN_DENSITY, MAX_DENSITY),
            material_density: MATERIAL_DENSITY,
            outliers: OutlierParams::default(),
            extreme_density: ExtremeDensityParams::default(),
        }
    }
}

impl GeneratorParams {
    /// Validate every group.
    ///
    /// # Errors
    ///
    /// [`GenerationError::InvalidParams`] naming the first offending field.
    pub fn validate(&self) -> Result<(), GenerationError> {
        self.base_size.validate("base_size")?;
        self.aspect.validate("aspect")?;
        self.bounds.validate("bounds")?;
        self.density_factor.validate("density_factor")?;
        self.weight_noise.validate("weight_noise")?;
        self.density_bounds.validate("density_bounds")?;
        self.outliers.large.validate("outliers.large")?;
        self.outliers.small.validate("outliers.small")?;

        if !(self.material_density.is_finite() && self.material_density > 0.0) {
            return Err(GenerationError::invalid(
                "material_density",
                format!("must be positive, got {}", self.material_density),
            ));
        }
        validate_fraction("outliers.fraction", self.outliers.fraction)?;
        validate_fraction("extreme_density.fraction", self.extreme_density.fraction)?;

        let values = &self.extreme_density.values;
        if values.is_empty() {
            return Err(GenerationError::invalid(
                "extreme_density.values",
                "at least one value required",
            ));
        }
        if let Some(bad) = values.iter().find(|v| !(v.is_finite() && **v > 0.0)) {
            return Err(GenerationError::invalid(
                "extreme_density.values",
                format!("values must be positive, got {bad}"),
            ));
        }
        Ok(())
    }

    /// Unclamped weight in grams: `volume · DF · material_density · 1000`.
    #[inline]
    pub fn base_weight(&self, length: f64, width: f64, height: f64, density_factor: f64) -> f64 {
        volume_liters(length, width, height) * density_factor * self.material_density * 1000.0
    }

    /// Clamp `weight` so the implied density lies within `density_bounds`.
    #[inline]
    pub fn clamp_weight(&self, weight: f64, length: f64, width: f64, height: f64) -> f64 {
        let cubic_cm = length * width * height;
        let min_weight = cubic_cm * self.density_bounds.low / 1000.0;
        let max_weight = cubic_cm * self.density_bounds.high / 1000.0;
        min_weight.max(max_weight.min(weight))
    }
}

fn validate_fraction(field: &'static str, value: f64) -> Result<(), GenerationError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(GenerationError::invalid(
            field,
            format!("must be in [0, 1], got {value}"),
        ));
    }
    Ok(())
}

/// `floor(fraction · n)`.
#[inline]
pub(crate) fn subset_size(n: usize, fraction: f64) -> usize {
    ((n as f64) * fraction).floor() as usize
}
