//! One module per calculator, grouped by medical specialty.
//!
//! Every calculator follows the same shape: a serde request struct with the
//! exact wire field names and enum literals, a pure `evaluate` function
//! (validate, score components from tables, aggregate, bucket), and a thin
//! `apply` adapter from raw JSON used by the registry.

pub mod cardiology;
pub mod emergency;
pub mod gastroenterology;
pub mod geriatrics;
pub mod hematology;
pub mod nephrology;
pub mod neurology;
pub mod oncology;
pub mod pulmonology;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ScoreError, ScoreResult};

/// Deserializes a raw request body into a calculator's request type.
///
/// Bad enum literals and type mismatches surface as
/// `ScoreError::InvalidValue` naming the offending field and the permitted
/// set; structural failures (missing or unknown fields) surface as
/// `ScoreError::Malformed` carrying serde's message.
pub(crate) fn parse_request<T: DeserializeOwned>(input: serde_json::Value) -> ScoreResult<T> {
    serde_path_to_error::deserialize(input).map_err(|e| {
        let field = e.path().to_string();
        let msg = e.inner().to_string();
        let value_error = msg.starts_with("unknown variant")
            || msg.starts_with("invalid type")
            || msg.starts_with("invalid value");
        if field != "." && value_error {
            if let Some((_, allowed)) = msg.rsplit_once("expected ") {
                return ScoreError::InvalidValue {
                    field,
                    allowed: allowed.to_string(),
                };
            }
        }
        ScoreError::Malformed(msg)
    })
}

/// Binary clinical finding, serialized as `"yes"` / `"no"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn is_yes(self) -> bool {
        matches!(self, YesNo::Yes)
    }

    /// `value` if present, zero otherwise.
    pub fn points(self, value: i32) -> i32 {
        if self.is_yes() {
            value
        } else {
            0
        }
    }
}

/// Patient sex as recorded for calculators that are sex-specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Sample {
        flag: YesNo,
    }

    #[test]
    fn test_yes_no_wire_literals() {
        let req: Sample = parse_request(serde_json::json!({"flag": "yes"})).unwrap();
        assert!(req.flag.is_yes());
        let req: Sample = parse_request(serde_json::json!({"flag": "no"})).unwrap();
        assert!(!req.flag.is_yes());
    }

    #[test]
    fn test_unknown_literal_names_field_and_set() {
        let err = parse_request::<Sample>(serde_json::json!({"flag": "maybe"})).unwrap_err();
        assert_eq!(err.field(), Some("flag"));
        match err {
            ScoreError::InvalidValue { field, allowed } => {
                assert_eq!(field, "flag");
                assert!(allowed.contains("`yes`"), "allowed was {allowed:?}");
                assert!(allowed.contains("`no`"), "allowed was {allowed:?}");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_type_mismatch_names_field() {
        #[derive(Debug, Deserialize)]
        struct Numeric {
            count: i64,
        }
        let err = parse_request::<Numeric>(serde_json::json!({"count": "three"})).unwrap_err();
        assert_eq!(err.field(), Some("count"));
        assert!(matches!(err, ScoreError::InvalidValue { .. }));
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let err = parse_request::<Sample>(serde_json::json!({})).unwrap_err();
        assert!(err.field().is_none());
        assert!(matches!(err, ScoreError::Malformed(ref msg) if msg.contains("flag")));
    }

    #[test]
    fn test_rejects_unknown_field() {
        let err =
            parse_request::<Sample>(serde_json::json!({"flag": "yes", "extra": 1})).unwrap_err();
        assert!(matches!(err, ScoreError::Malformed(ref msg) if msg.contains("extra")));
    }
}
