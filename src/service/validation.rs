//! Schema validation for submitted patient records
//!
//! Checks a [`RawRecord`] against [`FIELD_SPECS`] and normalizes it into a
//! [`ValidatedRecord`]. Checks run in a fixed order and stop at the first
//! failure:
//! 1. Missing fields
//! 2. Unexpected fields
//! 3. Per-field type and value checks, in declared field order

use serde_json::Value;

use crate::model::record::{FieldValue, RawRecord, ValidatedRecord};
use crate::model::schema::{
    Category, Constraint, FIELD_SPECS, FieldSpec, field_spec, join_categories,
};

/// Reason a record was rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("Missing keys in payload: {}", quoted_list(.0))]
    MissingFields(Vec<String>),

    #[error("Unexpected keys in payload: {}", quoted_list(.0))]
    UnexpectedFields(Vec<String>),

    #[error("{field} must be numeric within {expected}, got {got}")]
    Type {
        field: String,
        expected: String,
        got: String,
    },

    #[error("{field}={value} outside plausible range [{low}, {high}]")]
    Range {
        field: String,
        value: f64,
        low: f64,
        high: f64,
    },

    #[error("{field} must be one of [{allowed}], got {got}")]
    Value {
        field: String,
        allowed: String,
        got: String,
    },
}

impl ValidationError {
    /// Stable machine-readable tag of the failed rule
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingFields(_) => "missing_fields",
            ValidationError::UnexpectedFields(_) => "unexpected_fields",
            ValidationError::Type { .. } => "type_error",
            ValidationError::Range { .. } => "range_error",
            ValidationError::Value { .. } => "value_error",
        }
    }
}

/// Validate a raw record and normalize its values
///
/// Numeric-range fields are coerced to `f64`; categorical fields keep their
/// submitted value. The result contains every schema field and nothing else.
pub fn validate(record: &RawRecord) -> Result<ValidatedRecord, ValidationError> {
    let missing: Vec<String> = FIELD_SPECS
        .iter()
        .filter(|spec| !record.contains_key(spec.name))
        .map(|spec| spec.name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    let extras: Vec<String> = record
        .keys()
        .filter(|key| field_spec(key).is_none())
        .cloned()
        .collect();
    if !extras.is_empty() {
        return Err(ValidationError::UnexpectedFields(extras));
    }

    let mut fields = Vec::with_capacity(FIELD_SPECS.len());
    for spec in &FIELD_SPECS {
        // Presence was checked above
        let value = &record[spec.name];
        fields.push((spec.name, validate_field(spec, value)?));
    }

    Ok(ValidatedRecord::from_fields(fields))
}

fn validate_field(spec: &FieldSpec, value: &Value) -> Result<FieldValue, ValidationError> {
    match spec.constraint {
        Constraint::NumericRange { low, high } => {
            let Some(number) = value.as_f64() else {
                return Err(ValidationError::Type {
                    field: spec.name.to_string(),
                    expected: spec.constraint.to_string(),
                    got: describe_typed(value),
                });
            };
            if !spec.constraint.contains_number(number) {
                return Err(ValidationError::Range {
                    field: spec.name.to_string(),
                    value: number,
                    low,
                    high,
                });
            }
            Ok(FieldValue::Number(number))
        }
        Constraint::Categorical(allowed) => {
            match_category(allowed, value).ok_or_else(|| ValidationError::Value {
                field: spec.name.to_string(),
                allowed: join_categories(allowed),
                got: describe(value),
            })
        }
    }
}

/// Find the category `value` belongs to, returning the normalized value
fn match_category(allowed: &[Category], value: &Value) -> Option<FieldValue> {
    allowed.iter().find_map(|category| match (category, value) {
        (Category::Text(label), Value::String(s)) if s.as_str() == *label => {
            Some(FieldValue::Text(s.clone()))
        }
        // Booleans are not numbers in JSON, so `true` never matches code 1
        (Category::Code(code), Value::Number(n)) if n.as_f64() == Some(*code as f64) => {
            Some(FieldValue::Code(*code))
        }
        _ => None,
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}'", s),
        other => other.to_string(),
    }
}

/// Type name followed by the value, e.g. `string 'high'`
fn describe_typed(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        other => format!("{} {}", json_type_name(other), describe(other)),
    }
}

fn quoted_list(names: &[String]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("'{}'", n)).collect();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_record() -> RawRecord {
        match json!({
            "gender": "Male",
            "age": 67,
            "ever_married": "Yes",
            "work_type": "Private",
            "Residence_type": "Urban",
            "avg_glucose_level": 228.69,
            "bmi": 36.6,
            "smoking_status": "formerly smoked",
            "hypertension": 0,
            "heart_disease": 1
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn with(field: &str, value: Value) -> RawRecord {
        let mut record = sample_record();
        record.insert(field.to_string(), value);
        record
    }

    #[test]
    fn test_valid_record() {
        let validated = validate(&sample_record()).unwrap();

        assert_eq!(validated.iter().count(), FIELD_SPECS.len());
        assert_eq!(validated.get("age"), Some(&FieldValue::Number(67.0)));
        assert_eq!(
            validated.get("avg_glucose_level"),
            Some(&FieldValue::Number(228.69))
        );
        assert_eq!(validated.get("bmi"), Some(&FieldValue::Number(36.6)));
        assert_eq!(
            validated.get("smoking_status"),
            Some(&FieldValue::Text("formerly smoked".to_string()))
        );
        assert_eq!(validated.get("hypertension"), Some(&FieldValue::Code(0)));
        assert_eq!(validated.get("heart_disease"), Some(&FieldValue::Code(1)));
    }

    #[test]
    fn test_output_follows_declared_order() {
        let validated = validate(&sample_record()).unwrap();
        let names: Vec<_> = validated.iter().map(|(name, _)| name).collect();
        let declared: Vec<_> = FIELD_SPECS.iter().map(|s| s.name).collect();
        assert_eq!(names, declared);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let record = sample_record();
        let first = validate(&record).unwrap();
        let second = validate(&record).unwrap();
        assert_eq!(first, second);
        assert_eq!(record, sample_record());
    }

    #[test]
    fn test_missing_single_field() {
        let mut record = sample_record();
        record.remove("smoking_status");

        let err = validate(&record).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields(vec!["smoking_status".to_string()])
        );
        assert_eq!(err.kind(), "missing_fields");
        assert_eq!(err.to_string(), "Missing keys in payload: ['smoking_status']");
    }

    #[test]
    fn test_missing_each_field() {
        for spec in &FIELD_SPECS {
            let mut record = sample_record();
            record.remove(spec.name);
            assert_eq!(
                validate(&record).unwrap_err(),
                ValidationError::MissingFields(vec![spec.name.to_string()])
            );
        }
    }

    #[test]
    fn test_missing_reported_before_unexpected() {
        let mut record = sample_record();
        record.remove("bmi");
        record.remove("gender");
        record.insert("foo".to_string(), json!(1));

        assert_eq!(
            validate(&record).unwrap_err(),
            ValidationError::MissingFields(vec!["gender".to_string(), "bmi".to_string()])
        );
    }

    #[test]
    fn test_empty_record_lists_every_field() {
        let err = validate(&RawRecord::new()).unwrap_err();
        let ValidationError::MissingFields(missing) = err else {
            panic!("expected missing fields, got {err:?}");
        };
        assert_eq!(missing.len(), FIELD_SPECS.len());
    }

    #[test]
    fn test_unexpected_field() {
        let err = validate(&with("foo", json!(1))).unwrap_err();
        assert_eq!(err, ValidationError::UnexpectedFields(vec!["foo".to_string()]));
        assert_eq!(err.kind(), "unexpected_fields");
        assert_eq!(err.to_string(), "Unexpected keys in payload: ['foo']");
    }

    #[test]
    fn test_unexpected_fields_are_all_listed() {
        let mut record = with("foo", json!(1));
        record.insert("id".to_string(), json!("abc"));
        // Field names are case sensitive
        record.insert("residence_type".to_string(), json!("Urban"));

        let ValidationError::UnexpectedFields(mut extras) = validate(&record).unwrap_err() else {
            panic!("expected unexpected fields");
        };
        extras.sort();
        assert_eq!(extras, vec!["foo", "id", "residence_type"]);
    }

    #[test]
    fn test_non_numeric_range_field() {
        let err = validate(&with("bmi", json!("high"))).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Type {
                field: "bmi".to_string(),
                expected: "[10, 100]".to_string(),
                got: "string 'high'".to_string()
            }
        );
        assert_eq!(err.kind(), "type_error");
        assert_eq!(
            err.to_string(),
            "bmi must be numeric within [10, 100], got string 'high'"
        );
    }

    #[test]
    fn test_type_error_names_value_and_bound() {
        let err = validate(&with("age", json!(true))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "age must be numeric within [0, 120], got boolean true"
        );

        let err = validate(&with("avg_glucose_level", json!(null))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "avg_glucose_level must be numeric within [0, 400], got null"
        );
    }

    #[test]
    fn test_type_errors_for_every_numeric_field() {
        for spec in FIELD_SPECS
            .iter()
            .filter(|s| matches!(s.constraint, Constraint::NumericRange { .. }))
        {
            for bad in [json!("12"), json!(null), json!(true), json!([1]), json!({"v": 1})] {
                let err = validate(&with(spec.name, bad.clone())).unwrap_err();
                assert!(
                    matches!(&err, ValidationError::Type { field, .. } if field == spec.name),
                    "{} with {} gave {:?}",
                    spec.name,
                    bad,
                    err
                );
            }
        }
    }

    #[test]
    fn test_out_of_range_age() {
        let err = validate(&with("age", json!(150))).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Range {
                field: "age".to_string(),
                value: 150.0,
                low: 0.0,
                high: 120.0
            }
        );
        assert_eq!(err.kind(), "range_error");
        assert_eq!(err.to_string(), "age=150 outside plausible range [0, 120]");
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        for spec in &FIELD_SPECS {
            let Constraint::NumericRange { low, high } = spec.constraint else {
                continue;
            };

            for boundary in [low, high] {
                let validated = validate(&with(spec.name, json!(boundary))).unwrap();
                assert_eq!(validated.get(spec.name), Some(&FieldValue::Number(boundary)));
            }

            for outside in [low - 0.5, high + 0.5] {
                let err = validate(&with(spec.name, json!(outside))).unwrap_err();
                assert_eq!(err.kind(), "range_error", "{} = {}", spec.name, outside);
            }
        }
    }

    #[test]
    fn test_integer_input_is_coerced_to_float() {
        let validated = validate(&with("bmi", json!(25))).unwrap();
        assert_eq!(validated.get("bmi"), Some(&FieldValue::Number(25.0)));
    }

    #[test]
    fn test_every_allowed_category_passes() {
        for spec in &FIELD_SPECS {
            let Constraint::Categorical(allowed) = spec.constraint else {
                continue;
            };
            for category in allowed {
                let (value, expected) = match category {
                    Category::Text(label) => (json!(label), FieldValue::Text(label.to_string())),
                    Category::Code(code) => (json!(code), FieldValue::Code(*code)),
                };
                let validated = validate(&with(spec.name, value)).unwrap();
                assert_eq!(validated.get(spec.name), Some(&expected));
            }
        }
    }

    #[test]
    fn test_unknown_category_fails() {
        for spec in FIELD_SPECS
            .iter()
            .filter(|s| matches!(s.constraint, Constraint::Categorical(_)))
        {
            for bad in [json!("Unknown"), json!(7), json!(null)] {
                let err = validate(&with(spec.name, bad)).unwrap_err();
                assert!(
                    matches!(&err, ValidationError::Value { field, .. } if field == spec.name),
                    "{}: {:?}",
                    spec.name,
                    err
                );
            }
        }
    }

    #[test]
    fn test_category_match_is_case_sensitive() {
        let err = validate(&with("gender", json!("male"))).unwrap_err();
        assert_eq!(err.kind(), "value_error");
        assert_eq!(
            err.to_string(),
            "gender must be one of ['Male', 'Female', 'Other'], got 'male'"
        );
    }

    #[test]
    fn test_binary_codes_are_strict() {
        let err = validate(&with("hypertension", json!(0.5))).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Value {
                field: "hypertension".to_string(),
                allowed: "0, 1".to_string(),
                got: "0.5".to_string()
            }
        );
        assert_eq!(err.to_string(), "hypertension must be one of [0, 1], got 0.5");

        assert_eq!(
            validate(&with("heart_disease", json!("1"))).unwrap_err().kind(),
            "value_error"
        );
        assert_eq!(
            validate(&with("heart_disease", json!(true))).unwrap_err().kind(),
            "value_error"
        );
    }

    #[test]
    fn test_integral_float_code_is_normalized() {
        let validated = validate(&with("heart_disease", json!(1.0))).unwrap();
        assert_eq!(validated.get("heart_disease"), Some(&FieldValue::Code(1)));
    }

    #[test]
    fn test_first_failing_field_in_declared_order_wins() {
        let mut record = with("bmi", json!("high"));
        record.insert("age".to_string(), json!(150));

        // age is declared before bmi
        assert_eq!(validate(&record).unwrap_err().kind(), "range_error");
    }
}
