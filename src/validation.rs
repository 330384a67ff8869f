//! Request payload validation
//!
//! Every rule failure becomes one [`FieldError`] entry; handlers only run
//! once the whole payload has passed.

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::OnceLock;

use crate::error::{Error, Result};

/// One failed rule on one field
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub value: Value,
    pub tag: String,
    pub message: String,
}

/// A single rule a field can break
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    Email,
    ObjectId,
    Min(usize),
    Max(usize),
    Gte(i64),
}

impl Rule {
    fn tag(&self) -> String {
        match self {
            Rule::Required => "required".to_string(),
            Rule::Email => "email".to_string(),
            Rule::ObjectId => "mongodb".to_string(),
            Rule::Min(_) => "min".to_string(),
            Rule::Max(_) => "max".to_string(),
            Rule::Gte(_) => "gte".to_string(),
        }
    }

    fn reason(&self) -> String {
        match self {
            Rule::Required => "is required".to_string(),
            Rule::Email => "is invalid email".to_string(),
            Rule::ObjectId => "is invalid ID".to_string(),
            Rule::Min(n) => format!("must be longer than {}", n),
            Rule::Max(n) => format!("must be shorter than {}", n),
            Rule::Gte(_) => "is invalid".to_string(),
        }
    }
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Compile-time constant pattern; a failure here is a bug in the codebase
    RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Invalid email regex")
    })
}

/// Whether `id` has the 24 hex character shape of a document id
pub fn is_object_id(id: &str) -> bool {
    id.len() == 24 && id.chars().all(|c| c.is_ascii_hexdigit())
}

/// Collects rule failures across the fields of one payload
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(&mut self, field: &str, value: Value, rule: Rule) {
        self.errors.push(FieldError {
            field: field.to_string(),
            value,
            tag: rule.tag(),
            message: format!("{} {}", field, rule.reason()),
        });
    }

    /// Check a string field; stops at the first rule it breaks
    pub fn check_str(&mut self, field: &str, value: &str, rules: &[Rule]) -> &mut Self {
        for rule in rules {
            let ok = match rule {
                Rule::Required => !value.is_empty(),
                Rule::Email => email_regex().is_match(value),
                Rule::ObjectId => is_object_id(value),
                Rule::Min(n) => value.chars().count() >= *n,
                Rule::Max(n) => value.chars().count() <= *n,
                Rule::Gte(_) => true,
            };
            if !ok {
                self.fail(field, Value::String(value.to_string()), *rule);
                break;
            }
        }
        self
    }

    pub fn check_int(&mut self, field: &str, value: i64, rules: &[Rule]) -> &mut Self {
        for rule in rules {
            if let Rule::Gte(min) = rule {
                if value < *min {
                    self.fail(field, Value::from(value), *rule);
                    break;
                }
            }
        }
        self
    }

    pub fn finish(&mut self) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(std::mem::take(&mut self.errors)))
        }
    }
}

/// Implemented by every request payload the API accepts
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors_of(result: Result<()>) -> Vec<FieldError> {
        match result {
            Err(Error::Validation(errors)) => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_required_and_email() {
        let errors = errors_of(
            Validator::new()
                .check_str("Email", "", &[Rule::Required, Rule::Email])
                .check_str("Name", "Alice", &[Rule::Required])
                .finish(),
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "Email");
        assert_eq!(errors[0].tag, "required");
        assert_eq!(errors[0].message, "Email is required");
    }

    #[test]
    fn test_invalid_email() {
        let errors = errors_of(
            Validator::new()
                .check_str("Email", "not-an-email", &[Rule::Required, Rule::Email])
                .finish(),
        );
        assert_eq!(errors[0].message, "Email is invalid email");
    }

    #[test]
    fn test_length_bounds() {
        let errors = errors_of(
            Validator::new()
                .check_str("Password", "abc", &[Rule::Min(6), Rule::Max(32)])
                .check_str("Title", &"x".repeat(40), &[Rule::Max(32)])
                .finish(),
        );
        assert_eq!(errors[0].message, "Password must be longer than 6");
        assert_eq!(errors[1].message, "Title must be shorter than 32");
    }

    #[test]
    fn test_object_id() {
        assert!(is_object_id("65a1b2c3d4e5f60718293a4b"));
        assert!(!is_object_id("65a1b2c3d4e5f60718293a4"));
        assert!(!is_object_id("zza1b2c3d4e5f60718293a4b"));
    }

    #[test]
    fn test_gte() {
        let errors = errors_of(Validator::new().check_int("From", -1, &[Rule::Gte(0)]).finish());
        assert_eq!(errors[0].tag, "gte");
        assert!(Validator::new().check_int("From", 0, &[Rule::Gte(0)]).finish().is_ok());
    }
}
