//! Item records and the physical weight formulas.
//!
//! Volumes are expressed in liters (`L·W·H / 1000` with dimensions in cm),
//! weights in grams. The density clamp bounds an ordinary record's weight to
//! `[0.5, 2.0]` grams per liter of volume.

use serde::{Deserialize, Serialize};

use super::schema::N_FEATURES;

/// Average material density applied by the base weight formula.
pub const MATERIAL_DENSITY: f64 = 0.85;

/// Lower density bound for ordinary records, in grams per liter.
pub const MIN_DENSITY: f64 = 0.5;

/// Upper density bound for ordinary records, in grams per liter.
pub const MAX_DENSITY: f64 = 2.0;

// =============================================================================
// Formulas
// =============================================================================

/// Volume in liters of an item with dimensions in centimeters.
#[inline]
pub fn volume_liters(length: f64, width: f64, height: f64) -> f64 {
    (length * width * height) / 1000.0
}

/// Weight in grams before noise and clamping.
///
/// `volume · DF · 0.85 · 1000`
#[inline]
pub fn base_weight(length: f64, width: f64, height: f64, density_factor: f64) -> f64 {
    volume_liters(length, width, height) * density_factor * MATERIAL_DENSITY * 1000.0
}

/// Weight interval `(min, max)` in grams admitted for an ordinary record.
#[inline]
pub fn weight_bounds(length: f64, width: f64, height: f64) -> (f64, f64) {
    let cubic_cm = length * width * height;
    (cubic_cm / 2000.0, cubic_cm / 500.0)
}

/// Clamp `weight` into [`weight_bounds`], snapping to the nearer bound.
#[inline]
pub fn clamp_weight(weight: f64, length: f64, width: f64, height: f64) -> f64 {
    let (min_weight, max_weight) = weight_bounds(length, width, height);
    min_weight.max(max_weight.min(weight))
}

/// Round half away from zero to `decimals` places.
///
/// Exact ties on the scaled value round away from zero, not to even. Ties
/// need a draw that lands on a representable `.x5`, so generated records
/// practically never hit them.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

// =============================================================================
// Provenance
// =============================================================================

/// Dimension profile written over an outlier record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeProfile {
    /// Oversized item (`L∈[60,100], W∈[40,80], H∈[50,90]`).
    Large,
    /// Undersized item (`L∈[1,4], W∈[1,3], H∈[1,3]`).
    Small,
}

/// Which special treatments a generated record received.
///
/// Not part of the dataset file; records read from disk are ordinary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordProfile {
    /// Set when the dimensions were overwritten with an outlier profile.
    pub outlier: Option<SizeProfile>,
    /// Set when the density factor was overwritten with an extreme value.
    pub extreme_density: bool,
}

impl RecordProfile {
    /// Neither an outlier nor density-extreme.
    #[inline]
    pub fn is_ordinary(&self) -> bool {
        self.outlier.is_none() && !self.extreme_density
    }

    #[inline]
    pub fn is_outlier(&self) -> bool {
        self.outlier.is_some()
    }
}

// =============================================================================
// ItemRecord
// =============================================================================

/// One warehouse item: dimensions in cm, dimensionless density factor and the
/// target weight in grams.
///
/// Serializes to the dataset columns `id, L, W, H, DF, optimal_weight`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: u64,
    #[serde(rename = "L")]
    pub length: f64,
    #[serde(rename = "W")]
    pub width: f64,
    #[serde(rename = "H")]
    pub height: f64,
    #[serde(rename = "DF")]
    pub density_factor: f64,
    pub optimal_weight: f64,
    #[serde(skip)]
    pub profile: RecordProfile,
}

impl ItemRecord {
    /// Feature vector in schema order `[L, W, H, DF]`.
    #[inline]
    pub fn features(&self) -> [f64; N_FEATURES] {
        [self.length, self.width, self.height, self.density_factor]
    }

    /// Volume in liters.
    #[inline]
    pub fn volume_liters(&self) -> f64 {
        volume_liters(self.length, self.width, self.height)
    }

    /// Weight per liter of volume.
    #[inline]
    pub fn implied_density(&self) -> f64 {
        self.optimal_weight / self.volume_liters()
    }
}
