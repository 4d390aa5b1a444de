//! Column names shared by the dataset file, the training table and the model
//! artifact.

/// Feature columns in model order.
pub const FEATURE_NAMES: [&str; N_FEATURES] = ["L", "W", "H", "DF"];

/// Number of model features.
pub const N_FEATURES: usize = 4;

/// Regression target column.
pub const TARGET_NAME: &str = "optimal_weight";

/// Record identifier column (dataset file only, never a feature).
pub const ID_COLUMN: &str = "id";

/// Exact header of a dataset file.
pub const DATASET_COLUMNS: [&str; 6] = [ID_COLUMN, "L", "W", "H", "DF", TARGET_NAME];

/// Owned copy of [`FEATURE_NAMES`].
pub fn feature_names() -> Vec<String> {
    FEATURE_NAMES.iter().map(|s| s.to_string()).collect()
}

/// Whether `names` is exactly the item feature schema, in order.
pub fn is_item_schema(names: &[String]) -> bool {
    names.len() == N_FEATURES && names.iter().zip(FEATURE_NAMES).all(|(a, b)| a == b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_schema_is_order_sensitive() {
        assert!(is_item_schema(&feature_names()));

        let swapped: Vec<String> = ["W", "L", "H", "DF"].iter().map(|s| s.to_string()).collect();
        assert!(!is_item_schema(&swapped));
        assert!(!is_item_schema(&feature_names()[..3]));
    }

    #[test]
    fn dataset_header_wraps_features() {
        assert_eq!(DATASET_COLUMNS[0], ID_COLUMN);
        assert_eq!(&DATASET_COLUMNS[1..5], &FEATURE_NAMES);
        assert_eq!(DATASET_COLUMNS[5], TARGET_NAME);
    }
}
