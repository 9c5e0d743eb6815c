//! Per-feature rules (F001–F004, F007).

use super::{ValidationOptions, Violation};
use crate::schema::{DataType, Feature, RAGGED_DIM};

/// Validate one feature descriptor. `path` locates the feature itself,
/// e.g. `node_sets["paper"].features["year"]`.
pub fn validate_feature(
    feature: &Feature,
    path: &str,
    options: &ValidationOptions,
) -> Vec<Violation> {
    let mut errors = Vec::new();

    f001_supported_dtype(feature, path, &mut errors);
    f002_f003_shape(feature, path, &mut errors);
    if options.lint_scalar_shape {
        f004_scalar_not_rank_one(feature, path, &mut errors);
    }
    f007_example_values_match_dtype(feature, path, &mut errors);

    errors
}

fn f001_supported_dtype(feature: &Feature, path: &str, errors: &mut Vec<Violation>) {
    match feature.data_type() {
        Some(dtype) if dtype.is_supported() => {}
        Some(DataType::Invalid) => errors.push(Violation::error(
            "F001",
            format!("{}.dtype", path),
            "Feature dtype is not set",
        )),
        Some(dtype) => errors.push(Violation::error(
            "F001",
            format!("{}.dtype", path),
            format!("Unsupported feature dtype {}", dtype),
        )),
        None => errors.push(Violation::error(
            "F001",
            format!("{}.dtype", path),
            format!("Unknown feature dtype tag {}", feature.dtype),
        )),
    }
}

fn f002_f003_shape(feature: &Feature, path: &str, errors: &mut Vec<Violation>) {
    let Some(shape) = &feature.shape else { return };

    if shape.unknown_rank {
        errors.push(Violation::error(
            "F002",
            format!("{}.shape", path),
            "Feature shape must have a known rank",
        ));
    }

    for (i, dim) in shape.dim.iter().enumerate() {
        if dim.size <= 0 && dim.size != RAGGED_DIM {
            errors.push(Violation::error(
                "F003",
                format!("{}.shape.dim[{}]", path, i),
                format!(
                    "Dimension size {} is invalid (expected a positive size or {} for ragged)",
                    dim.size, RAGGED_DIM
                ),
            ));
        }
    }
}

fn f004_scalar_not_rank_one(feature: &Feature, path: &str, errors: &mut Vec<Violation>) {
    let Some(shape) = &feature.shape else { return };
    if !shape.unknown_rank && shape.dim.len() == 1 && shape.dim[0].size == 1 {
        errors.push(Violation::warning(
            "F004",
            format!("{}.shape", path),
            "Shape [1] adds a redundant dimension; use an empty shape for one value per item",
        ));
    }
}

fn f007_example_values_match_dtype(feature: &Feature, path: &str, errors: &mut Vec<Violation>) {
    let Some(values) = &feature.example_values else { return };
    // Unknown or unsupported dtypes are reported by F001.
    let Some(dtype) = feature.data_type() else { return };
    let Some(expected) = dtype.value_kind() else { return };
    if let Some(actual) = values.value_kind() {
        if actual != expected {
            errors.push(Violation::error(
                "F007",
                format!("{}.example_values", path),
                format!(
                    "Example values are a {} but dtype {} expects a {}",
                    actual, dtype, expected
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TensorShape;
    use crate::values::FeatureValues;

    fn check(feature: &Feature) -> Vec<Violation> {
        validate_feature(feature, "f", &ValidationOptions::default())
    }

    #[test]
    fn well_formed_feature_passes() {
        let feature = Feature::with_shape(DataType::Float, &[RAGGED_DIM, 16]);
        assert!(check(&feature).is_empty());
    }

    #[test]
    fn unsupported_dtype() {
        let errors = check(&Feature::scalar(DataType::Complex64));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, "F001");
        assert_eq!(errors[0].path, "f.dtype");
    }

    #[test]
    fn unknown_rank() {
        let feature = Feature {
            dtype: DataType::Float.into(),
            shape: Some(TensorShape {
                dim: vec![],
                unknown_rank: true,
            }),
            ..Default::default()
        };
        let errors = check(&feature);
        assert!(errors.iter().any(|e| e.code == "F002" && e.is_error()));
    }

    #[test]
    fn zero_sized_dimension() {
        let errors = check(&Feature::with_shape(DataType::Int64, &[3, 0]));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "f.shape.dim[1]");
    }

    #[test]
    fn rank_one_size_one_is_a_warning() {
        let errors = check(&Feature::with_shape(DataType::Float, &[1]));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, "F004");
        assert!(!errors[0].is_error());
    }

    #[test]
    fn scalar_lint_can_be_disabled() {
        let options = ValidationOptions {
            lint_scalar_shape: false,
            ..Default::default()
        };
        let feature = Feature::with_shape(DataType::Float, &[1]);
        assert!(validate_feature(&feature, "f", &options).is_empty());
    }

    #[test]
    fn example_values_must_match_dtype() {
        let mut feature = Feature::scalar(DataType::String);
        feature.example_values = Some(FeatureValues::floats([1.0]));
        let errors = check(&feature);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, "F007");

        feature.example_values = Some(FeatureValues::bytes(["x"]));
        assert!(check(&feature).is_empty());
    }
}
