//! # Custom Extractors & Validation
//!
//! Provides the [`Validate`] trait for request DTOs and helpers to extract
//! and validate JSON bodies in handlers. Malformed JSON is rejected with
//! 400 before any field rule runs. Body fields are declared as [`BodyField`]
//! so that a value of the wrong JSON type becomes a field issue rather than
//! a deserialization failure.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::error::{AppError, FieldIssue};

/// Trait for request types that check their field rules beyond what serde
/// deserialization enforces.
pub trait Validate {
    /// Collect every field-level issue. An empty list means the input is valid.
    fn issues(&self) -> Vec<FieldIssue>;
}

/// Message for a field present with the wrong JSON type.
pub const WRONG_TYPE_MESSAGE: &str = "Expected a string";

/// One optional field of a JSON request body.
///
/// Absent and `null` both read as [`BodyField::Missing`]. Declare with
/// `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BodyField<T> {
    #[default]
    Missing,
    Present(T),
    /// Present, but not deserializable as `T`.
    WrongType,
}

impl<T> BodyField<T> {
    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Missing | Self::WrongType => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Missing | Self::WrongType => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// A [`WRONG_TYPE_MESSAGE`] issue for `field` when the value had the wrong type.
    pub fn type_issue(&self, field: &str) -> Option<FieldIssue> {
        matches!(self, Self::WrongType).then(|| FieldIssue::new(field, WRONG_TYPE_MESSAGE))
    }
}

impl BodyField<String> {
    pub fn as_deref(&self) -> Option<&str> {
        self.as_ref().map(String::as_str)
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for BodyField<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(Self::Missing);
        }
        Ok(serde_json::from_value(value).map_or(Self::WrongType, Self::Present))
    }
}

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract a JSON body and validate it using the [`Validate`] trait.
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let value = extract_json(result)?;
    let issues = value.issues();
    if issues.is_empty() {
        Ok(value)
    } else {
        Err(AppError::Validation(issues))
    }
}

/// Whether `email` looks like `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((name, tld)) => !name.is_empty() && !tld.is_empty() && !name.ends_with('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        for ok in ["a@x.com", "first.last@sub.example.org", "  A@X.COM  "] {
            assert!(is_valid_email(ok), "{ok}");
        }
        for bad in ["", "a", "a@", "@x.com", "a@x", "a@.com", "a@x.", "a b@x.com", "a@@x.com"] {
            assert!(!is_valid_email(bad), "{bad}");
        }
    }

    #[derive(Debug, Deserialize)]
    struct Named {
        #[serde(default)]
        name: BodyField<String>,
    }

    fn read(json: &str) -> BodyField<String> {
        serde_json::from_str::<Named>(json).unwrap().name
    }

    #[test]
    fn body_field_states() {
        assert_eq!(read("{}"), BodyField::Missing);
        assert_eq!(read(r#"{"name":null}"#), BodyField::Missing);
        assert_eq!(read(r#"{"name":"ada"}"#), BodyField::Present("ada".into()));
        assert_eq!(read(r#"{"name":5}"#), BodyField::WrongType);
        assert_eq!(read(r#"{"name":["a"]}"#), BodyField::WrongType);
    }

    #[test]
    fn wrong_type_names_the_field() {
        let issue = read(r#"{"name":true}"#).type_issue("name").unwrap();
        assert_eq!(issue, FieldIssue::new("name", WRONG_TYPE_MESSAGE));
        assert!(read(r#"{"name":"x"}"#).type_issue("name").is_none());
    }

    #[derive(Debug)]
    struct AlwaysBad;

    impl Validate for AlwaysBad {
        fn issues(&self) -> Vec<FieldIssue> {
            vec![FieldIssue::new("field", "is bad")]
        }
    }

    #[test]
    fn validation_issues_become_errors() {
        let err = extract_validated_json(Ok(Json(AlwaysBad))).unwrap_err();
        assert!(matches!(err, AppError::Validation(issues) if issues.len() == 1));
    }
}
