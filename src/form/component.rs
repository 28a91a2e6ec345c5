//! Form item variants.

use super::validation::{first_failure, ValidationRule};
use crate::ui::diffable::Identifiable;
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

/// Value produced by an input cell and consumed by the content builder.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(text) => write!(f, "{}", text),
            FieldValue::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// Input hint for text fields.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Keyboard {
    Default,
    Email,
}

/// Reuse identifier of the cell that renders an item.
///
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ComponentKind {
    Text,
    Date,
    Button,
    Unsupported,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextData {
    pub id: Uuid,
    pub field: String,
    pub label: String,
    pub placeholder: String,
    pub keyboard: Keyboard,
    pub value: String,
    pub rules: Vec<ValidationRule>,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DateData {
    pub id: Uuid,
    pub field: String,
    pub label: String,
    pub value: NaiveDate,
    pub rules: Vec<ValidationRule>,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ButtonData {
    pub id: Uuid,
    pub field: String,
    pub title: String,
}

/// Item of a kind no cell knows how to render.
///
#[derive(Clone, Debug, PartialEq)]
pub struct UnsupportedData {
    pub id: Uuid,
    pub field: String,
    pub kind: String,
}

/// A single item of the form.
///
#[derive(Clone, Debug, PartialEq)]
pub enum FormComponent {
    Text(TextData),
    Date(DateData),
    Button(ButtonData),
    Unsupported(UnsupportedData),
}

impl FormComponent {
    pub fn id(&self) -> Uuid {
        match self {
            FormComponent::Text(data) => data.id,
            FormComponent::Date(data) => data.id,
            FormComponent::Button(data) => data.id,
            FormComponent::Unsupported(data) => data.id,
        }
    }

    pub fn field(&self) -> &str {
        match self {
            FormComponent::Text(data) => &data.field,
            FormComponent::Date(data) => &data.field,
            FormComponent::Button(data) => &data.field,
            FormComponent::Unsupported(data) => &data.field,
        }
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            FormComponent::Text(_) => ComponentKind::Text,
            FormComponent::Date(_) => ComponentKind::Date,
            FormComponent::Button(_) => ComponentKind::Button,
            FormComponent::Unsupported(_) => ComponentKind::Unsupported,
        }
    }

    /// Current value for items that hold one.
    ///
    pub fn value(&self) -> Option<FieldValue> {
        match self {
            FormComponent::Text(data) => Some(FieldValue::Text(data.value.clone())),
            FormComponent::Date(data) => Some(FieldValue::Date(data.value)),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FormComponent::Text(data) => data.error.as_deref(),
            FormComponent::Date(data) => data.error.as_deref(),
            _ => None,
        }
    }

    /// Whether the item can take keyboard focus.
    ///
    pub fn is_interactive(&self) -> bool {
        !matches!(self, FormComponent::Unsupported(_))
    }

    /// Store a new value if its variant matches the item. Returns whether the
    /// value was taken. A stored value clears the previous validation error.
    ///
    pub(crate) fn accept(&mut self, value: FieldValue) -> bool {
        match (self, value) {
            (FormComponent::Text(data), FieldValue::Text(text)) => {
                data.value = text;
                data.error = None;
                true
            }
            (FormComponent::Date(data), FieldValue::Date(date)) => {
                data.value = date;
                data.error = None;
                true
            }
            _ => false,
        }
    }

    /// Run the item's rules and record the outcome. Returns whether the item
    /// is valid.
    ///
    pub(crate) fn check(&mut self, today: NaiveDate) -> bool {
        let value = self.value();
        let (rules, error) = match self {
            FormComponent::Text(data) => (&data.rules, &mut data.error),
            FormComponent::Date(data) => (&data.rules, &mut data.error),
            _ => return true,
        };
        *error = value
            .and_then(|value| first_failure(rules, &value, today))
            .map(|failure| failure.message);
        error.is_none()
    }
}

impl Identifiable for FormComponent {
    type Id = Uuid;

    fn identity(&self) -> Uuid {
        self.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};

    fn text_item(rules: Vec<ValidationRule>) -> FormComponent {
        FormComponent::Text(TextData {
            id: Uuid::new_v4(),
            field: "first_name".to_string(),
            label: "First name".to_string(),
            placeholder: String::new(),
            keyboard: Keyboard::Default,
            value: String::new(),
            rules,
            error: None,
        })
    }

    #[test]
    fn test_kind_and_interactivity() {
        let item = text_item(vec![]);
        assert_eq!(item.kind(), ComponentKind::Text);
        assert!(item.is_interactive());

        let item = FormComponent::Unsupported(UnsupportedData {
            id: Uuid::new_v4(),
            field: "avatar".to_string(),
            kind: "image".to_string(),
        });
        assert_eq!(item.kind(), ComponentKind::Unsupported);
        assert!(!item.is_interactive());
        assert_eq!(item.value(), None);
    }

    #[test]
    fn test_accept_matching_value() {
        let mut item = text_item(vec![]);
        let value: String = Faker.fake();
        assert!(item.accept(FieldValue::Text(value.clone())));
        assert_eq!(item.value(), Some(FieldValue::Text(value)));
    }

    #[test]
    fn test_accept_rejects_mismatched_value() {
        let mut item = text_item(vec![]);
        let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        assert!(!item.accept(FieldValue::Date(date)));
        assert_eq!(item.value(), Some(FieldValue::Text(String::new())));
    }

    #[test]
    fn test_check_records_and_clears_error() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut item = text_item(vec![ValidationRule::required("Required")]);
        assert!(!item.check(today));
        assert_eq!(item.error(), Some("Required"));
        item.accept(FieldValue::Text("Ada".to_string()));
        assert_eq!(item.error(), None);
        assert!(item.check(today));
    }

    #[test]
    fn test_identity_is_id() {
        let item = text_item(vec![]);
        assert_eq!(item.identity(), item.id());
    }

    #[test]
    fn test_field_value_display() {
        let date = NaiveDate::from_ymd_opt(1990, 2, 3).unwrap();
        assert_eq!(FieldValue::Date(date).to_string(), "1990-02-03");
        assert_eq!(FieldValue::Text("x".to_string()).to_string(), "x");
    }
}
