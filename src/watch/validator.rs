use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("response is not a mapping")]
    NotAMapping,

    #[error("response is missing required keys")]
    MissingKeys,

    #[error("`homeworks` is not a sequence")]
    WrongType,
}

/// A response whose top-level shape has been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedResponse {
    /// Most recent first.
    pub homeworks: Vec<Value>,
    pub current_date: Value,
}

/// Check the raw API body against the expected shape.
///
/// Checks run in a fixed order: mapping shape, required keys, then the
/// `homeworks` type. The first failing check is reported.
pub fn validate(raw: &Value) -> Result<ValidatedResponse, ValidationError> {
    let map: &Map<String, Value> = raw.as_object().ok_or(ValidationError::NotAMapping)?;

    let (Some(homeworks), Some(current_date)) = (map.get("homeworks"), map.get("current_date"))
    else {
        return Err(ValidationError::MissingKeys);
    };

    let homeworks = homeworks.as_array().ok_or(ValidationError::WrongType)?;

    Ok(ValidatedResponse {
        homeworks: homeworks.clone(),
        current_date: current_date.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_mapping_reported_first() {
        for raw in [json!([]), json!("homeworks"), json!(null), json!(1000)] {
            assert_eq!(validate(&raw), Err(ValidationError::NotAMapping));
        }
    }

    #[test]
    fn test_missing_keys() {
        assert_eq!(
            validate(&json!({"homeworks": []})),
            Err(ValidationError::MissingKeys)
        );
        assert_eq!(
            validate(&json!({"current_date": 1000})),
            Err(ValidationError::MissingKeys)
        );
        // Key check precedes the type check
        assert_eq!(
            validate(&json!({"homeworks": "nope"})),
            Err(ValidationError::MissingKeys)
        );
    }

    #[test]
    fn test_homeworks_must_be_sequence() {
        assert_eq!(
            validate(&json!({"homeworks": {"a": 1}, "current_date": 1000})),
            Err(ValidationError::WrongType)
        );
    }

    #[test]
    fn test_valid_response() {
        let validated = validate(&json!({
            "homeworks": [{"homework_name": "hw1", "status": "approved"}],
            "current_date": 1000
        }))
        .unwrap();
        assert_eq!(validated.homeworks.len(), 1);
        assert_eq!(validated.current_date, json!(1000));
    }
}
