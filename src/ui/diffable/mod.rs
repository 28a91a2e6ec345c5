//! Diffable list rendering.
//!
//! Toolkit-independent pieces of the list engine:
//! - `Snapshot`: immutable sections-and-items description keyed by identity
//! - `reconcile`: the patch turning one snapshot into the next
//! - `DataSource`: applies patches to live, reusable cell slots

mod data_source;
mod reconcile;
mod snapshot;

pub use data_source::{CellProvider, CellSlot, DataSource, ReusableCell};
pub use reconcile::{reconcile, ItemChange, Patch, SectionChange};
pub use snapshot::{Snapshot, SnapshotError};

use std::fmt::Debug;
use std::hash::Hash;

/// Types with a stable identity that survives content changes.
///
pub trait Identifiable {
    type Id: Clone + Eq + Hash + Debug;

    fn identity(&self) -> Self::Id;
}
