use super::component::FormComponent;
use crate::ui::diffable::Identifiable;
use uuid::Uuid;

/// Ordered group of form items.
///
#[derive(Clone, Debug, PartialEq)]
pub struct FormSectionComponent {
    pub id: Uuid,
    pub title: Option<String>,
    pub items: Vec<FormComponent>,
}

/// Item-less description of a section, as placed in a snapshot.
///
#[derive(Clone, Debug, PartialEq)]
pub struct SectionHeader {
    pub id: Uuid,
    pub title: Option<String>,
}

impl FormSectionComponent {
    pub fn new(title: Option<String>, items: Vec<FormComponent>) -> Self {
        FormSectionComponent {
            id: Uuid::new_v4(),
            title,
            items,
        }
    }

    pub fn header(&self) -> SectionHeader {
        SectionHeader {
            id: self.id,
            title: self.title.clone(),
        }
    }
}

impl Identifiable for FormSectionComponent {
    type Id = Uuid;

    fn identity(&self) -> Uuid {
        self.id
    }
}

impl Identifiable for SectionHeader {
    type Id = Uuid;

    fn identity(&self) -> Uuid {
        self.id
    }
}
