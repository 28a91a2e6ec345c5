//! Field validation rules.
//!
//! Rules are attached to text and date items and evaluated, in declaration
//! order, when the content builder validates the form. The first failing
//! rule determines the message shown under the field.

use super::component::FieldValue;
use chrono::{Datelike, NaiveDate};
use regex::Regex;

/// Pattern used for fields declared with the `email` kind.
///
pub const EMAIL_PATTERN: &str = r"^[A-Z0-9a-z._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,64}$";

/// Pattern used for the name fields of the built-in signup form.
///
pub const NAME_PATTERN: &str = r"^[A-Za-z][A-Za-z' -]*$";

/// Failure of a single rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    fn new(message: &str) -> Self {
        ValidationError {
            message: message.to_string(),
        }
    }
}

/// A single validation rule.
///
#[derive(Debug, Clone)]
pub enum ValidationRule {
    /// Text must contain something other than whitespace.
    Required { message: String },
    /// Text (or the ISO form of a date) must match the expression.
    Pattern { regex: Regex, message: String },
    /// Date must lie at least `years` full years in the past.
    MinAge { years: u32, message: String },
}

impl ValidationRule {
    pub fn required(message: impl Into<String>) -> Self {
        ValidationRule::Required {
            message: message.into(),
        }
    }

    pub fn pattern(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(ValidationRule::Pattern {
            regex: Regex::new(pattern)?,
            message: message.into(),
        })
    }

    pub fn min_age(years: u32, message: impl Into<String>) -> Self {
        ValidationRule::MinAge {
            years,
            message: message.into(),
        }
    }

    /// Check a value against this rule. `today` anchors age rules.
    ///
    pub fn check(&self, value: &FieldValue, today: NaiveDate) -> Result<(), ValidationError> {
        match (self, value) {
            (ValidationRule::Required { message }, FieldValue::Text(text)) => {
                if text.trim().is_empty() {
                    return Err(ValidationError::new(message));
                }
            }
            (ValidationRule::Required { .. }, FieldValue::Date(_)) => {}
            (ValidationRule::Pattern { .. }, FieldValue::Text(text)) if text.trim().is_empty() => {}
            (ValidationRule::Pattern { regex, message }, value) => {
                let subject = match value {
                    FieldValue::Text(text) => text.clone(),
                    FieldValue::Date(date) => date.format("%Y-%m-%d").to_string(),
                };
                if !regex.is_match(&subject) {
                    return Err(ValidationError::new(message));
                }
            }
            (ValidationRule::MinAge { years, message }, FieldValue::Date(date)) => {
                if age_on(*date, today) < i64::from(*years) {
                    return Err(ValidationError::new(message));
                }
            }
            (ValidationRule::MinAge { message, .. }, FieldValue::Text(_)) => {
                return Err(ValidationError::new(message));
            }
        }
        Ok(())
    }
}

impl PartialEq for ValidationRule {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ValidationRule::Required { message: a }, ValidationRule::Required { message: b }) => {
                a == b
            }
            (
                ValidationRule::Pattern {
                    regex: a,
                    message: am,
                },
                ValidationRule::Pattern {
                    regex: b,
                    message: bm,
                },
            ) => a.as_str() == b.as_str() && am == bm,
            (
                ValidationRule::MinAge {
                    years: a,
                    message: am,
                },
                ValidationRule::MinAge {
                    years: b,
                    message: bm,
                },
            ) => a == b && am == bm,
            _ => false,
        }
    }
}

/// Full years between `born` and `today`; negative for future dates.
///
fn age_on(born: NaiveDate, today: NaiveDate) -> i64 {
    let mut age = i64::from(today.year()) - i64::from(born.year());
    if (today.month(), today.day()) < (born.month(), born.day()) {
        age -= 1;
    }
    age
}

/// Run rules in order and return the first failure.
///
pub fn first_failure(
    rules: &[ValidationRule],
    value: &FieldValue,
    today: NaiveDate,
) -> Option<ValidationError> {
    rules.iter().find_map(|rule| rule.check(value, today).err())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn text(value: &str) -> FieldValue {
        FieldValue::Text(value.to_string())
    }

    #[test]
    fn required_rejects_blank_text() {
        let rule = ValidationRule::required("Required");
        assert!(rule.check(&text("   "), today()).is_err());
        assert!(rule.check(&text("Ada"), today()).is_ok());
    }

    #[test]
    fn required_accepts_any_date() {
        let rule = ValidationRule::required("Required");
        assert!(rule.check(&FieldValue::Date(today()), today()).is_ok());
    }

    #[test]
    fn email_pattern() {
        let rule = ValidationRule::pattern(EMAIL_PATTERN, "Invalid email").unwrap();
        for email in ["ada@example.com", "first.last+tag@mail.co.uk", "x_1@host.io"] {
            assert!(rule.check(&text(email), today()).is_ok(), "{}", email);
        }
        let err = rule.check(&text("not-an-email"), today()).unwrap_err();
        assert_eq!(err.message, "Invalid email");
    }

    #[test]
    fn name_pattern() {
        let rule = ValidationRule::pattern(NAME_PATTERN, "Invalid name").unwrap();
        assert!(rule.check(&text("Mary-Jane O'Neil"), today()).is_ok());
        assert!(rule.check(&text("R2D2"), today()).is_err());
    }

    #[test]
    fn pattern_leaves_blank_text_to_required() {
        let rule = ValidationRule::pattern(EMAIL_PATTERN, "Invalid email").unwrap();
        assert!(rule.check(&text(""), today()).is_ok());
        assert!(rule.check(&text("  "), today()).is_ok());

        let rules = vec![ValidationRule::required("Required"), rule];
        let err = first_failure(&rules, &text(""), today()).unwrap();
        assert_eq!(err.message, "Required");
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(ValidationRule::pattern("[", "never").is_err());
    }

    #[test]
    fn min_age_boundaries() {
        let rule = ValidationRule::min_age(18, "Too young");
        let exactly = NaiveDate::from_ymd_opt(2006, 6, 15).unwrap();
        let day_short = NaiveDate::from_ymd_opt(2006, 6, 16).unwrap();
        let future = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert!(rule.check(&FieldValue::Date(exactly), today()).is_ok());
        assert!(rule.check(&FieldValue::Date(day_short), today()).is_err());
        assert!(rule.check(&FieldValue::Date(future), today()).is_err());
    }

    #[test]
    fn min_age_rejects_text() {
        let rule = ValidationRule::min_age(18, "Too young");
        assert!(rule.check(&text("2000-01-01"), today()).is_err());
    }

    #[test]
    fn first_failure_respects_order() {
        let rules = vec![
            ValidationRule::required("Required"),
            ValidationRule::pattern(NAME_PATTERN, "Invalid name").unwrap(),
        ];
        let failure = first_failure(&rules, &text(""), today()).unwrap();
        assert_eq!(failure.message, "Required");
        let failure = first_failure(&rules, &text("4"), today()).unwrap();
        assert_eq!(failure.message, "Invalid name");
        assert!(first_failure(&rules, &text("Ada"), today()).is_none());
    }

    #[test]
    fn rules_compare_by_pattern_text() {
        let a = ValidationRule::pattern(NAME_PATTERN, "m").unwrap();
        let b = ValidationRule::pattern(NAME_PATTERN, "m").unwrap();
        let c = ValidationRule::pattern(EMAIL_PATTERN, "m").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, ValidationRule::required("m"));
    }
}
