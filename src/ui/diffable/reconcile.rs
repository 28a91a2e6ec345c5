//! Snapshot reconciliation.
//!
//! Computes the changes between two snapshots by identity. Survivors whose
//! relative order is kept are those on a longest increasing subsequence of
//! their old offsets; every other survivor is reported as a move. Survivors
//! whose content differs are reported as reloads.

use super::{Identifiable, Snapshot};
use crate::form::Position;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionChange<Id> {
    Delete { id: Id, from: usize },
    Insert { id: Id, at: usize },
    Move { id: Id, from: usize, to: usize },
    Reload { id: Id, at: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemChange<Id> {
    Delete { id: Id, from: Position },
    Insert { id: Id, at: Position },
    Move { id: Id, from: Position, to: Position },
    Reload { id: Id, at: Position },
}

/// Changes turning one snapshot into another.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch<SId, IId> {
    pub sections: Vec<SectionChange<SId>>,
    pub items: Vec<ItemChange<IId>>,
}

impl<SId, IId> Default for Patch<SId, IId> {
    fn default() -> Self {
        Patch {
            sections: vec![],
            items: vec![],
        }
    }
}

impl<SId, IId> Patch<SId, IId> {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sections.len() + self.items.len()
    }

    /// Identities of inserted items.
    ///
    pub fn inserted_items(&self) -> impl Iterator<Item = &IId> {
        self.items.iter().filter_map(|change| match change {
            ItemChange::Insert { id, .. } => Some(id),
            _ => None,
        })
    }
}

/// Compute the patch from `old` to `new`.
///
pub fn reconcile<S, I>(old: &Snapshot<S, I>, new: &Snapshot<S, I>) -> Patch<S::Id, I::Id>
where
    S: Identifiable + PartialEq,
    I: Identifiable + PartialEq,
{
    let mut patch = Patch::default();
    reconcile_sections(old, new, &mut patch.sections);
    reconcile_items(old, new, &mut patch.items);
    patch
}

fn reconcile_sections<S, I>(
    old: &Snapshot<S, I>,
    new: &Snapshot<S, I>,
    changes: &mut Vec<SectionChange<S::Id>>,
) where
    S: Identifiable + PartialEq,
    I: Identifiable,
{
    for (from, section) in old.sections().iter().enumerate() {
        let id = section.identity();
        if new.section_of(&id).is_none() {
            changes.push(SectionChange::Delete { id, from });
        }
    }

    let mut survivors = vec![];
    for (at, section) in new.sections().iter().enumerate() {
        let id = section.identity();
        match old.section_of(&id) {
            None => changes.push(SectionChange::Insert { id, at }),
            Some(from) => survivors.push((id, from, at)),
        }
    }

    let offsets: Vec<usize> = survivors.iter().map(|(_, from, _)| *from).collect();
    let kept = longest_increasing_subsequence(&offsets);
    for ((id, from, to), kept) in survivors.into_iter().zip(kept) {
        if !kept {
            changes.push(SectionChange::Move {
                id: id.clone(),
                from,
                to,
            });
        }
        if old.sections()[from] != new.sections()[to] {
            changes.push(SectionChange::Reload { id, at: to });
        }
    }
}

fn reconcile_items<S, I>(
    old: &Snapshot<S, I>,
    new: &Snapshot<S, I>,
    changes: &mut Vec<ItemChange<I::Id>>,
) where
    S: Identifiable,
    I: Identifiable + PartialEq,
{
    // Flat offset of each old item, for order comparison across sections.
    let old_offsets: HashMap<I::Id, usize> = old
        .iter_items()
        .enumerate()
        .map(|(offset, (_, item))| (item.identity(), offset))
        .collect();

    for (from, item) in old.iter_items() {
        let id = item.identity();
        if new.position_of(&id).is_none() {
            changes.push(ItemChange::Delete { id, from });
        }
    }

    let mut survivors = vec![];
    for (at, item) in new.iter_items() {
        let id = item.identity();
        match old.position_of(&id) {
            None => changes.push(ItemChange::Insert { id, at }),
            Some(from) => {
                let offset = old_offsets.get(&id).copied().unwrap_or_default();
                survivors.push((id, item, from, at, offset));
            }
        }
    }

    let offsets: Vec<usize> = survivors.iter().map(|survivor| survivor.4).collect();
    let kept = longest_increasing_subsequence(&offsets);
    for ((id, item, from, to, _), kept) in survivors.into_iter().zip(kept) {
        let old_section = old.sections().get(from.section).map(Identifiable::identity);
        let new_section = new.sections().get(to.section).map(Identifiable::identity);
        if !kept || old_section != new_section {
            changes.push(ItemChange::Move {
                id: id.clone(),
                from,
                to,
            });
        }
        if old.item_at(from) != Some(item) {
            changes.push(ItemChange::Reload { id, at: to });
        }
    }
}

/// Mark the members of one longest strictly increasing subsequence.
///
fn longest_increasing_subsequence(values: &[usize]) -> Vec<bool> {
    let mut tails: Vec<usize> = vec![];
    let mut previous: Vec<Option<usize>> = vec![None; values.len()];
    for (i, value) in values.iter().enumerate() {
        let slot = tails.partition_point(|&tail| values[tail] < *value);
        if slot > 0 {
            previous[i] = Some(tails[slot - 1]);
        }
        if slot == tails.len() {
            tails.push(i);
        } else {
            tails[slot] = i;
        }
    }
    let mut keep = vec![false; values.len()];
    let mut cursor = tails.last().copied();
    while let Some(i) = cursor {
        keep[i] = true;
        cursor = previous[i];
    }
    keep
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row(u32, &'static str);

    impl Identifiable for Row {
        type Id = u32;
        fn identity(&self) -> u32 {
            self.0
        }
    }

    fn snapshot(sections: &[(u32, &[Row])]) -> Snapshot<Row, Row> {
        let mut snapshot = Snapshot::new();
        for (section, items) in sections {
            snapshot.append_sections(vec![Row(*section, "")]).unwrap();
            snapshot.append_items(items.to_vec(), section).unwrap();
        }
        snapshot
    }

    #[test]
    fn identical_snapshots_produce_empty_patch() {
        let a = snapshot(&[(100, &[Row(1, "a"), Row(2, "b")]), (200, &[Row(3, "c")])]);
        let b = a.clone();
        assert!(reconcile(&a, &b).is_empty());
    }

    #[test]
    fn insert_and_delete() {
        let old = snapshot(&[(100, &[Row(1, ""), Row(2, "")])]);
        let new = snapshot(&[(100, &[Row(2, ""), Row(3, "")])]);
        let patch = reconcile(&old, &new);
        assert_eq!(
            patch.items,
            vec![
                ItemChange::Delete {
                    id: 1,
                    from: Position::new(0, 0)
                },
                ItemChange::Insert {
                    id: 3,
                    at: Position::new(0, 1)
                },
            ]
        );
        assert!(patch.sections.is_empty());
    }

    #[test]
    fn swap_is_a_single_move() {
        let old = snapshot(&[(100, &[Row(1, ""), Row(2, ""), Row(3, "")])]);
        let new = snapshot(&[(100, &[Row(1, ""), Row(3, ""), Row(2, "")])]);
        let patch = reconcile(&old, &new);
        assert_eq!(patch.items.len(), 1);
        assert!(matches!(patch.items[0], ItemChange::Move { .. }));
    }

    #[test]
    fn content_change_is_a_reload() {
        let old = snapshot(&[(100, &[Row(1, "before")])]);
        let new = snapshot(&[(100, &[Row(1, "after")])]);
        assert_eq!(
            reconcile(&old, &new).items,
            vec![ItemChange::Reload {
                id: 1,
                at: Position::new(0, 0)
            }]
        );
    }

    #[test]
    fn item_changing_section_is_a_move() {
        let old = snapshot(&[(100, &[Row(1, "")]), (200, &[])]);
        let new = snapshot(&[(100, &[]), (200, &[Row(1, "")])]);
        assert_eq!(
            reconcile(&old, &new).items,
            vec![ItemChange::Move {
                id: 1,
                from: Position::new(0, 0),
                to: Position::new(1, 0)
            }]
        );
    }

    #[test]
    fn section_changes() {
        let old = snapshot(&[(100, &[]), (200, &[]), (300, &[])]);
        let new = snapshot(&[(300, &[]), (100, &[]), (400, &[])]);
        let patch = reconcile(&old, &new);
        assert!(patch
            .sections
            .contains(&SectionChange::Delete { id: 200, from: 1 }));
        assert!(patch
            .sections
            .contains(&SectionChange::Insert { id: 400, at: 2 }));
        let moves = patch
            .sections
            .iter()
            .filter(|change| matches!(change, SectionChange::Move { .. }))
            .count();
        assert_eq!(moves, 1);
    }

    #[test]
    fn lis_marks_kept_elements() {
        assert_eq!(
            longest_increasing_subsequence(&[0, 2, 1, 3]),
            vec![true, false, true, true]
        );
        assert!(longest_increasing_subsequence(&[]).is_empty());
        assert_eq!(
            longest_increasing_subsequence(&[3, 2, 1]).iter().filter(|k| **k).count(),
            1
        );
    }

    #[test]
    fn inserted_items_skips_reloads() {
        let old = snapshot(&[(100, &[Row(1, "a"), Row(2, "b")])]);
        let new = snapshot(&[(100, &[Row(1, "a"), Row(2, "changed"), Row(3, "")])]);
        let patch = reconcile(&old, &new);
        let inserted: Vec<u32> = patch.inserted_items().copied().collect();
        assert_eq!(inserted, vec![3]);
    }
}
