use super::{reconcile, Identifiable, ItemChange, Patch, Snapshot};
use crate::form::Position;
use crate::reactive::Subscription;
use log::*;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Cells that can be recycled for another item.
///
pub trait ReusableCell {
    /// Clear everything bound by the previous configuration.
    fn prepare_for_reuse(&mut self);
}

/// Creates and configures cells for items.
///
pub trait CellProvider<I: Identifiable> {
    type Cell: ReusableCell;
    type ReuseId: Clone + Eq + Hash;

    fn reuse_identifier(&self, item: &I) -> Self::ReuseId;

    fn make_cell(&self, reuse_id: &Self::ReuseId) -> Self::Cell;

    /// Bind `item` at `at` into the slot's cell and install the slot's
    /// subscription. The slot holds no subscription when this is called.
    fn configure(&mut self, slot: &mut CellSlot<Self::Cell>, item: &I, at: Position);
}

/// A live cell and the single subscription wired to it.
///
pub struct CellSlot<C> {
    cell: C,
    subscription: Option<Subscription>,
    bound_at: Option<Position>,
}

impl<C: ReusableCell> CellSlot<C> {
    pub fn new(cell: C) -> Self {
        CellSlot {
            cell,
            subscription: None,
            bound_at: None,
        }
    }

    pub fn cell(&self) -> &C {
        &self.cell
    }

    pub fn cell_mut(&mut self) -> &mut C {
        &mut self.cell
    }

    /// Position the cell is currently bound to.
    ///
    pub fn bound_at(&self) -> Option<Position> {
        self.bound_at
    }

    /// Replace the active subscription, cancelling the previous one first.
    ///
    pub fn install(&mut self, subscription: Subscription) {
        self.cancel_subscription();
        self.subscription = Some(subscription);
    }

    pub fn has_subscription(&self) -> bool {
        self.subscription
            .as_ref()
            .map(Subscription::is_active)
            .unwrap_or(false)
    }

    pub fn cancel_subscription(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.cancel();
        }
    }

    fn recycle(&mut self) {
        self.cancel_subscription();
        self.cell.prepare_for_reuse();
        self.bound_at = None;
    }
}

/// Applies snapshots to live cells, recycling cells of removed items.
///
pub struct DataSource<S, I, P>
where
    S: Identifiable,
    I: Identifiable,
    P: CellProvider<I>,
{
    snapshot: Snapshot<S, I>,
    slots: HashMap<I::Id, (P::ReuseId, CellSlot<P::Cell>)>,
    pool: HashMap<P::ReuseId, Vec<CellSlot<P::Cell>>>,
    provider: P,
}

impl<S, I, P> DataSource<S, I, P>
where
    S: Identifiable + PartialEq,
    I: Identifiable + PartialEq,
    P: CellProvider<I>,
{
    pub fn new(provider: P) -> Self {
        DataSource {
            snapshot: Snapshot::new(),
            slots: HashMap::new(),
            pool: HashMap::new(),
            provider,
        }
    }

    pub fn snapshot(&self) -> &Snapshot<S, I> {
        &self.snapshot
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Make `snapshot` current. Only cells touched by the patch, or whose
    /// position shifted, are reconfigured. Returns the applied patch.
    ///
    pub fn apply(&mut self, snapshot: Snapshot<S, I>) -> Patch<S::Id, I::Id> {
        let patch = reconcile(&self.snapshot, &snapshot);
        if patch.is_empty() {
            self.snapshot = snapshot;
            return patch;
        }
        debug!(
            "Applying patch: {} section change(s), {} item change(s)",
            patch.sections.len(),
            patch.items.len()
        );

        let DataSource {
            slots,
            pool,
            provider,
            ..
        } = self;

        let mut reconfigure = HashSet::new();
        for change in &patch.items {
            match change {
                ItemChange::Delete { id, .. } => {
                    if let Some((reuse_id, mut slot)) = slots.remove(id) {
                        slot.recycle();
                        pool.entry(reuse_id).or_default().push(slot);
                    }
                }
                ItemChange::Move { id, .. } | ItemChange::Reload { id, .. } => {
                    reconfigure.insert(id.clone());
                }
                ItemChange::Insert { .. } => {}
            }
        }

        for (at, item) in snapshot.iter_items() {
            let id = item.identity();
            let reuse_id = provider.reuse_identifier(item);
            let live = slots
                .get_mut(&id)
                .filter(|(live_reuse_id, _)| *live_reuse_id == reuse_id);
            if let Some((_, slot)) = live {
                if reconfigure.contains(&id) || slot.bound_at != Some(at) {
                    slot.cancel_subscription();
                    provider.configure(slot, item, at);
                    slot.bound_at = Some(at);
                }
                continue;
            }

            // New item, or its kind changed and it needs another cell type.
            if let Some((old_reuse_id, mut slot)) = slots.remove(&id) {
                slot.recycle();
                pool.entry(old_reuse_id).or_default().push(slot);
            }
            let mut slot = match pool.get_mut(&reuse_id).and_then(Vec::pop) {
                Some(slot) => slot,
                None => CellSlot::new(provider.make_cell(&reuse_id)),
            };
            provider.configure(&mut slot, item, at);
            slot.bound_at = Some(at);
            slots.insert(id, (reuse_id, slot));
        }

        self.snapshot = snapshot;
        patch
    }

    pub fn slot(&self, id: &I::Id) -> Option<&CellSlot<P::Cell>> {
        self.slots.get(id).map(|(_, slot)| slot)
    }

    pub fn slot_mut(&mut self, id: &I::Id) -> Option<&mut CellSlot<P::Cell>> {
        self.slots.get_mut(id).map(|(_, slot)| slot)
    }

    /// Number of cells waiting in the reuse pool.
    ///
    pub fn pooled(&self) -> usize {
        self.pool.values().map(Vec::len).sum()
    }

    /// Cancel every cell subscription and drop all cells.
    ///
    pub fn teardown(&mut self) {
        for (_, (_, mut slot)) in self.slots.drain() {
            slot.recycle();
        }
        self.pool.clear();
        self.snapshot = Snapshot::new();
    }
}
