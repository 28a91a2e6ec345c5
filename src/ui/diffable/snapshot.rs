use super::Identifiable;
use crate::form::Position;
use std::collections::HashMap;

/// Errors raised while assembling a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// Section identity already present
    #[error("Duplicate section identity: {0}")]
    DuplicateSection(String),

    /// Item identity already present
    #[error("Duplicate item identity: {0}")]
    DuplicateItem(String),

    /// Items appended to a section that is not in the snapshot
    #[error("Unknown section identity: {0}")]
    UnknownSection(String),
}

/// Ordered sections with their ordered items. Identities are unique across
/// the whole snapshot.
///
#[derive(Clone, Debug)]
pub struct Snapshot<S: Identifiable, I: Identifiable> {
    sections: Vec<S>,
    items: Vec<Vec<I>>,
    section_index: HashMap<S::Id, usize>,
    item_index: HashMap<I::Id, Position>,
}

impl<S: Identifiable, I: Identifiable> Default for Snapshot<S, I> {
    fn default() -> Self {
        Snapshot {
            sections: vec![],
            items: vec![],
            section_index: HashMap::new(),
            item_index: HashMap::new(),
        }
    }
}

impl<S: Identifiable, I: Identifiable> Snapshot<S, I> {
    pub fn new() -> Self {
        Snapshot::default()
    }

    /// Append sections after the existing ones.
    ///
    pub fn append_sections(
        &mut self,
        sections: impl IntoIterator<Item = S>,
    ) -> Result<(), SnapshotError> {
        for section in sections {
            let id = section.identity();
            if self.section_index.contains_key(&id) {
                return Err(SnapshotError::DuplicateSection(format!("{:?}", id)));
            }
            self.section_index.insert(id, self.sections.len());
            self.sections.push(section);
            self.items.push(vec![]);
        }
        Ok(())
    }

    /// Append items to the end of the given section.
    ///
    pub fn append_items(
        &mut self,
        items: impl IntoIterator<Item = I>,
        to_section: &S::Id,
    ) -> Result<(), SnapshotError> {
        let section = *self
            .section_index
            .get(to_section)
            .ok_or_else(|| SnapshotError::UnknownSection(format!("{:?}", to_section)))?;
        for item in items {
            let id = item.identity();
            if self.item_index.contains_key(&id) {
                return Err(SnapshotError::DuplicateItem(format!("{:?}", id)));
            }
            let list = &mut self.items[section];
            self.item_index
                .insert(id, Position::new(section, list.len()));
            list.push(item);
        }
        Ok(())
    }

    pub fn sections(&self) -> &[S] {
        &self.sections
    }

    pub fn items(&self, section: usize) -> &[I] {
        self.items.get(section).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn section_of(&self, id: &S::Id) -> Option<usize> {
        self.section_index.get(id).copied()
    }

    pub fn position_of(&self, id: &I::Id) -> Option<Position> {
        self.item_index.get(id).copied()
    }

    pub fn item(&self, id: &I::Id) -> Option<&I> {
        self.position_of(id).and_then(|at| self.item_at(at))
    }

    pub fn item_at(&self, at: Position) -> Option<&I> {
        self.items.get(at.section).and_then(|list| list.get(at.index))
    }

    /// Items in display order with their positions.
    ///
    pub fn iter_items(&self) -> impl Iterator<Item = (Position, &I)> {
        self.items.iter().enumerate().flat_map(|(section, list)| {
            list.iter()
                .enumerate()
                .map(move |(index, item)| (Position::new(section, index), item))
        })
    }

    pub fn item_count(&self) -> usize {
        self.item_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    pub(crate) struct Row(pub u32, pub &'static str);

    impl Identifiable for Row {
        type Id = u32;
        fn identity(&self) -> u32 {
            self.0
        }
    }

    #[test]
    fn positions_follow_append_order() {
        let mut snapshot: Snapshot<Row, Row> = Snapshot::new();
        snapshot
            .append_sections(vec![Row(100, "a"), Row(200, "b")])
            .unwrap();
        snapshot.append_items(vec![Row(1, ""), Row(2, "")], &100).unwrap();
        snapshot.append_items(vec![Row(3, "")], &200).unwrap();
        assert_eq!(snapshot.position_of(&2), Some(Position::new(0, 1)));
        assert_eq!(snapshot.position_of(&3), Some(Position::new(1, 0)));
        assert_eq!(snapshot.item_count(), 3);
        let order: Vec<u32> = snapshot.iter_items().map(|(_, row)| row.0).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn duplicate_identities_are_rejected() {
        let mut snapshot: Snapshot<Row, Row> = Snapshot::new();
        snapshot.append_sections(vec![Row(100, "")]).unwrap();
        assert_eq!(
            snapshot.append_sections(vec![Row(100, "")]),
            Err(SnapshotError::DuplicateSection("100".to_string()))
        );
        snapshot.append_items(vec![Row(1, "")], &100).unwrap();
        assert_eq!(
            snapshot.append_items(vec![Row(1, "")], &100),
            Err(SnapshotError::DuplicateItem("1".to_string()))
        );
    }

    #[test]
    fn unknown_section_is_rejected() {
        let mut snapshot: Snapshot<Row, Row> = Snapshot::new();
        assert!(matches!(
            snapshot.append_items(vec![Row(1, "")], &7),
            Err(SnapshotError::UnknownSection(_))
        ));
    }

    #[test]
    fn lookups_on_empty_snapshot() {
        let snapshot: Snapshot<Row, Row> = Snapshot::new();
        assert!(snapshot.is_empty());
        assert!(snapshot.items(3).is_empty());
        assert_eq!(snapshot.item(&1), None);
    }
}
