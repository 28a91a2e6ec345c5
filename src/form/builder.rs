//! Content builder: the owner of form state.
//!
//! The screen only reads `current_content()` and forwards edits through
//! `update()` and `validate()`. A successful validation is published on the
//! submission stream as a map of field keys to values.

use super::component::{FieldValue, FormComponent};
use super::definition::FormDefinition;
use super::error::FormError;
use super::section::FormSectionComponent;
use super::Position;
use crate::reactive::{Observable, Subject};
use chrono::{Local, NaiveDate};
use log::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// Values of a validated form, keyed by field.
///
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Submission(pub BTreeMap<String, FieldValue>);

impl Submission {
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Contract between the screen and whatever owns the form model.
///
pub trait ContentBuilder: Send + 'static {
    /// Sections with their items, as they should currently be displayed.
    fn current_content(&self) -> Vec<FormSectionComponent>;

    /// Store a value emitted by the cell at `at`.
    fn update(&mut self, value: FieldValue, at: Position);

    /// Validate every field; publish a submission when all pass.
    fn validate(&mut self);

    /// Stream of successful submissions.
    fn submissions(&self) -> Observable<Submission>;
}

/// Default content builder, backed by a `FormDefinition`.
///
pub struct FormContentBuilder {
    sections: Vec<FormSectionComponent>,
    submissions: Subject<Submission>,
    clock: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl FormContentBuilder {
    /// Build the form described by the definition.
    ///
    pub fn new(definition: &FormDefinition) -> Result<Self, FormError> {
        FormContentBuilder::with_clock(definition, local_today)
    }

    /// Build with a custom source of "today", used for date defaults and age
    /// rules.
    ///
    pub fn with_clock(
        definition: &FormDefinition,
        clock: fn() -> NaiveDate,
    ) -> Result<Self, FormError> {
        let sections = definition.build(clock())?;
        debug!(
            "Built form with {} sections and {} items",
            sections.len(),
            sections.iter().map(|s| s.items.len()).sum::<usize>()
        );
        Ok(FormContentBuilder {
            sections,
            submissions: Subject::new(),
            clock,
        })
    }

    fn item_mut(&mut self, at: Position) -> Option<&mut FormComponent> {
        self.sections
            .get_mut(at.section)
            .and_then(|section| section.items.get_mut(at.index))
    }

    fn collect_submission(&self) -> Submission {
        let values = self
            .sections
            .iter()
            .flat_map(|section| section.items.iter())
            .filter_map(|item| item.value().map(|value| (item.field().to_string(), value)))
            .collect();
        Submission(values)
    }
}

impl ContentBuilder for FormContentBuilder {
    fn current_content(&self) -> Vec<FormSectionComponent> {
        self.sections.clone()
    }

    fn update(&mut self, value: FieldValue, at: Position) {
        match self.item_mut(at) {
            Some(item) => {
                let field = item.field().to_string();
                if item.accept(value) {
                    trace!("Updated field '{}' at {}", field, at);
                } else {
                    warn!("Ignoring value of wrong kind for field '{}' at {}", field, at);
                }
            }
            None => warn!("Ignoring update for unknown position {}", at),
        }
    }

    fn validate(&mut self) {
        let today = (self.clock)();
        let mut invalid = 0;
        for item in self
            .sections
            .iter_mut()
            .flat_map(|section| section.items.iter_mut())
        {
            if !item.check(today) {
                invalid += 1;
            }
        }
        if invalid > 0 {
            info!("Form has {} invalid field(s)", invalid);
            return;
        }
        let submission = self.collect_submission();
        info!("Form valid, submitting {} field(s)", submission.len());
        self.submissions.send(submission);
    }

    fn submissions(&self) -> Observable<Submission> {
        self.submissions.observable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn builder() -> FormContentBuilder {
        FormContentBuilder::with_clock(&FormDefinition::signup(), fixed_today).unwrap()
    }

    fn record(builder: &FormContentBuilder) -> (Arc<Mutex<Vec<Submission>>>, crate::reactive::Subscription) {
        let seen = Arc::new(Mutex::new(vec![]));
        let sink = Arc::clone(&seen);
        let subscription = builder
            .submissions()
            .subscribe(move |submission: &Submission| sink.lock().unwrap().push(submission.clone()));
        (seen, subscription)
    }

    fn fill_valid(builder: &mut FormContentBuilder) {
        builder.update(FieldValue::Text("Ada".to_string()), Position::new(0, 0));
        builder.update(FieldValue::Text("Lovelace".to_string()), Position::new(0, 1));
        builder.update(
            FieldValue::Text("ada@example.com".to_string()),
            Position::new(0, 2),
        );
        builder.update(
            FieldValue::Date(NaiveDate::from_ymd_opt(1990, 12, 10).unwrap()),
            Position::new(0, 3),
        );
    }

    #[test]
    fn update_writes_value_at_position() {
        let mut builder = builder();
        builder.update(FieldValue::Text("Ada".to_string()), Position::new(0, 0));
        let content = builder.current_content();
        assert_eq!(
            content[0].items[0].value(),
            Some(FieldValue::Text("Ada".to_string()))
        );
    }

    #[test]
    fn update_out_of_range_is_ignored() {
        let mut builder = builder();
        let before = builder.current_content();
        builder.update(FieldValue::Text("x".to_string()), Position::new(9, 9));
        assert_eq!(before, builder.current_content());
    }

    #[test]
    fn content_is_a_fresh_copy() {
        let builder = builder();
        let mut content = builder.current_content();
        content[0].items.clear();
        assert_eq!(builder.current_content()[0].items.len(), 4);
    }

    #[test]
    fn validate_invalid_form_sets_errors_and_does_not_submit() {
        let mut builder = builder();
        let (seen, _subscription) = record(&builder);
        builder.validate();
        assert!(seen.lock().unwrap().is_empty());
        let content = builder.current_content();
        assert_eq!(content[0].items[0].error(), Some("First name is required"));
        assert_eq!(
            content[0].items[3].error(),
            Some("You must be at least 18 years old")
        );
    }

    #[test]
    fn validate_valid_form_submits_once() {
        let mut builder = builder();
        let (seen, _subscription) = record(&builder);
        fill_valid(&mut builder);
        builder.validate();
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0].get("email"),
            Some(&FieldValue::Text("ada@example.com".to_string()))
        );
        assert_eq!(
            seen[0].get("dob"),
            Some(&FieldValue::Date(NaiveDate::from_ymd_opt(1990, 12, 10).unwrap()))
        );
        assert!(seen[0].get("submit").is_none());
    }

    #[test]
    fn update_clears_stale_error() {
        let mut builder = builder();
        builder.validate();
        builder.update(FieldValue::Text("Ada".to_string()), Position::new(0, 0));
        assert_eq!(builder.current_content()[0].items[0].error(), None);
    }

    #[test]
    fn optional_email_left_blank_still_submits() {
        let definition: FormDefinition = serde_yaml::from_str(
            r#"
sections:
  - title: Contact
    fields:
      - { key: name, kind: text, label: Name, required: true }
      - { key: email, kind: email, label: Email }
      - { key: send, kind: button, label: Send }
"#,
        )
        .unwrap();
        let mut builder = FormContentBuilder::with_clock(&definition, fixed_today).unwrap();
        let (seen, _subscription) = record(&builder);

        builder.update(FieldValue::Text("nope".to_string()), Position::new(0, 1));
        builder.validate();
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(
            builder.current_content()[0].items[1].error(),
            Some("Email is invalid")
        );

        builder.update(FieldValue::Text("Ada".to_string()), Position::new(0, 0));
        builder.update(FieldValue::Text(String::new()), Position::new(0, 1));
        builder.validate();
        assert_eq!(seen.lock().unwrap().len(), 1);
        assert_eq!(builder.current_content()[0].items[1].error(), None);
    }

    #[test]
    fn submission_serializes_as_flat_map() {
        let mut builder = builder();
        let (seen, _subscription) = record(&builder);
        fill_valid(&mut builder);
        builder.validate();
        let json = serde_json::to_string(&seen.lock().unwrap()[0]).unwrap();
        assert_eq!(
            json,
            r#"{"dob":"1990-12-10","email":"ada@example.com","first_name":"Ada","last_name":"Lovelace"}"#
        );
    }
}
