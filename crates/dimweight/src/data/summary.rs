//! Per-column statistics of a dataset.

use std::fmt;

use super::record::ItemRecord;

/// Closed range of observed values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnRange {
    pub min: f64,
    pub max: f64,
}

impl ColumnRange {
    fn of(values: impl Iterator<Item = f64>) -> Option<Self> {
        values.fold(None, |acc, v| match acc {
            None => Some(Self { min: v, max: v }),
            Some(r) => Some(Self {
                min: r.min.min(v),
                max: r.max.max(v),
            }),
        })
    }
}

impl fmt::Display for ColumnRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}..{:.2}", self.min, self.max)
    }
}

/// Ranges of every numeric column plus the number of special records.
///
/// Ranges are `None` for an empty dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub n_records: usize,
    pub length: Option<ColumnRange>,
    pub width: Option<ColumnRange>,
    pub height: Option<ColumnRange>,
    pub density_factor: Option<ColumnRange>,
    pub optimal_weight: Option<ColumnRange>,
    /// Records carrying the outlier tag.
    pub n_outliers: usize,
    /// Records carrying the extreme-density tag.
    pub n_extreme_density: usize,
}

impl DatasetSummary {
    pub fn from_records(records: &[ItemRecord]) -> Self {
        Self {
            n_records: records.len(),
            length: ColumnRange::of(records.iter().map(|r| r.length)),
            width: ColumnRange::of(records.iter().map(|r| r.width)),
            height: ColumnRange::of(records.iter().map(|r| r.height)),
            density_factor: ColumnRange::of(records.iter().map(|r| r.density_factor)),
            optimal_weight: ColumnRange::of(records.iter().map(|r| r.optimal_weight)),
            n_outliers: records.iter().filter(|r| r.profile.is_outlier()).count(),
            n_extreme_density: records.iter().filter(|r| r.profile.extreme_density).count(),
        }
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} records", self.n_records)?;
        let columns = [
            ("L", self.length),
            ("W", self.width),
            ("H", self.height),
            ("DF", self.density_factor),
            ("optimal_weight", self.optimal_weight),
        ];
        for (name, range) in columns {
            if let Some(range) = range {
                write!(f, ", {name}={range}")?;
            }
        }
        write!(
            f,
            ", outliers={}, extreme_density={}",
            self.n_outliers, self.n_extreme_density
        )
    }
}
