//! Form model module.
//!
//! This module contains everything the screen renders but does not own:
//! - The item/section model (`FormComponent`, `FormSectionComponent`)
//! - Loadable form definitions and the built-in signup form
//! - Field validation rules
//! - The content builder that owns form state and emits submissions

mod builder;
mod component;
mod definition;
mod error;
mod section;
mod validation;

pub use builder::{ContentBuilder, FormContentBuilder, Submission};
pub use component::{
    ButtonData, ComponentKind, DateData, FieldValue, FormComponent, Keyboard, TextData,
    UnsupportedData,
};
pub use definition::{FieldSpec, FormDefinition, SectionSpec};
pub use error::FormError;
pub use section::{FormSectionComponent, SectionHeader};
pub use validation::{ValidationError, ValidationRule};

use serde::{Deserialize, Serialize};

/// Locator of an item within the form: section index, then item index
/// within that section.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub section: usize,
    pub index: usize,
}

impl Position {
    pub fn new(section: usize, index: usize) -> Self {
        Position { section, index }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.section, self.index)
    }
}
