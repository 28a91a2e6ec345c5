//! Loadable form definitions.
//!
//! A definition is the serde-friendly description of a form: its sections
//! and the fields in each. It can come from the configuration file; when it
//! does not, the built-in signup form is used.

use super::component::{
    ButtonData, DateData, FormComponent, Keyboard, TextData, UnsupportedData,
};
use super::error::FormError;
use super::section::FormSectionComponent;
use super::validation::{ValidationRule, EMAIL_PATTERN, NAME_PATTERN};
use chrono::NaiveDate;
use log::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Define specification for a whole form.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    pub sections: Vec<SectionSpec>,
}

/// Define specification for a form section.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectionSpec {
    #[serde(default)]
    pub title: Option<String>,
    pub fields: Vec<FieldSpec>,
}

/// Define specification for a single field.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub key: String,
    pub kind: String, // text | email | date | button
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub min_age: Option<u32>,
}

impl FieldSpec {
    fn new(key: &str, kind: &str, label: &str) -> Self {
        FieldSpec {
            key: key.to_string(),
            kind: kind.to_string(),
            label: label.to_string(),
            placeholder: None,
            required: false,
            pattern: None,
            message: None,
            min_age: None,
        }
    }

    fn failure_message(&self, fallback: &str) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| format!("{} {}", self.label, fallback))
    }

    /// Compile the declared rules in evaluation order.
    ///
    fn rules(&self) -> Result<Vec<ValidationRule>, FormError> {
        let mut rules = vec![];
        if self.required {
            rules.push(ValidationRule::required(format!("{} is required", self.label)));
        }
        let pattern = match (self.kind.as_str(), &self.pattern) {
            (_, Some(pattern)) => Some(pattern.as_str()),
            ("email", None) => Some(EMAIL_PATTERN),
            _ => None,
        };
        if let Some(pattern) = pattern {
            let rule = ValidationRule::pattern(pattern, self.failure_message("is invalid"))
                .map_err(|source| FormError::InvalidPattern {
                    key: self.key.clone(),
                    source,
                })?;
            rules.push(rule);
        }
        if let Some(years) = self.min_age {
            rules.push(ValidationRule::min_age(
                years,
                self.message
                    .clone()
                    .unwrap_or_else(|| format!("You must be at least {} years old", years)),
            ));
        }
        Ok(rules)
    }

    fn build(&self, today: NaiveDate) -> Result<FormComponent, FormError> {
        let id = Uuid::new_v4();
        let component = match self.kind.as_str() {
            "text" | "email" => FormComponent::Text(TextData {
                id,
                field: self.key.clone(),
                label: self.label.clone(),
                placeholder: self.placeholder.clone().unwrap_or_default(),
                keyboard: if self.kind == "email" {
                    Keyboard::Email
                } else {
                    Keyboard::Default
                },
                value: String::new(),
                rules: self.rules()?,
                error: None,
            }),
            "date" => FormComponent::Date(DateData {
                id,
                field: self.key.clone(),
                label: self.label.clone(),
                value: today,
                rules: self.rules()?,
                error: None,
            }),
            "button" => FormComponent::Button(ButtonData {
                id,
                field: self.key.clone(),
                title: self.label.clone(),
            }),
            other => {
                warn!("Field '{}' has unsupported kind '{}'", self.key, other);
                FormComponent::Unsupported(UnsupportedData {
                    id,
                    field: self.key.clone(),
                    kind: other.to_string(),
                })
            }
        };
        Ok(component)
    }
}

impl FormDefinition {
    /// The built-in "new user" form.
    ///
    pub fn signup() -> Self {
        let name = |key: &str, label: &str, placeholder: &str| FieldSpec {
            placeholder: Some(placeholder.to_string()),
            required: true,
            pattern: Some(NAME_PATTERN.to_string()),
            ..FieldSpec::new(key, "text", label)
        };
        FormDefinition {
            sections: vec![
                SectionSpec {
                    title: Some("New user".to_string()),
                    fields: vec![
                        name("first_name", "First name", "Ada"),
                        name("last_name", "Last name", "Lovelace"),
                        FieldSpec {
                            placeholder: Some("ada@example.com".to_string()),
                            required: true,
                            message: Some("Email address is invalid".to_string()),
                            ..FieldSpec::new("email", "email", "Email")
                        },
                        FieldSpec {
                            min_age: Some(18),
                            ..FieldSpec::new("dob", "date", "Date of birth")
                        },
                    ],
                },
                SectionSpec {
                    title: None,
                    fields: vec![FieldSpec::new("submit", "button", "Confirm")],
                },
            ],
        }
    }

    /// Build the form sections. Every item and section receives a fresh
    /// identity; date fields start at `today`.
    ///
    pub fn build(&self, today: NaiveDate) -> Result<Vec<FormSectionComponent>, FormError> {
        let mut keys = HashSet::new();
        let mut sections = Vec::with_capacity(self.sections.len());
        for section in &self.sections {
            let mut items = Vec::with_capacity(section.fields.len());
            for field in &section.fields {
                if !keys.insert(field.key.as_str()) {
                    return Err(FormError::DuplicateField {
                        key: field.key.clone(),
                    });
                }
                items.push(field.build(today)?);
            }
            sections.push(FormSectionComponent::new(section.title.clone(), items));
        }
        if keys.is_empty() {
            return Err(FormError::EmptyDefinition);
        }
        Ok(sections)
    }
}

impl Default for FormDefinition {
    fn default() -> Self {
        FormDefinition::signup()
    }
}
