//! Benchmarks for snapshot reconciliation.
//!
//! These benchmarks measure diffing of large snapshots: identical input,
//! content-only changes, and shuffled order with inserts and deletes.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use form_tui::ui::diffable::{reconcile, Identifiable, Snapshot};

#[derive(Clone, Debug, PartialEq)]
struct Row {
    id: u32,
    value: u32,
}

impl Identifiable for Row {
    type Id = u32;

    fn identity(&self) -> u32 {
        self.id
    }
}

fn snapshot(sections: u32, per_section: u32, map: impl Fn(u32) -> Option<Row>) -> Snapshot<Row, Row> {
    let mut snapshot = Snapshot::new();
    for section in 0..sections {
        let section_id = u32::MAX - section;
        snapshot
            .append_sections(vec![Row {
                id: section_id,
                value: 0,
            }])
            .unwrap();
        let items: Vec<Row> = (0..per_section)
            .filter_map(|idx| map(section * per_section + idx))
            .collect();
        snapshot.append_items(items, &section_id).unwrap();
    }
    snapshot
}

fn bench_identical(c: &mut Criterion) {
    let old = snapshot(10, 1_000, |id| Some(Row { id, value: 0 }));
    let new = old.clone();
    c.bench_function("reconcile_identical_10k", |b| {
        b.iter(|| reconcile(black_box(&old), black_box(&new)))
    });
}

fn bench_reloads(c: &mut Criterion) {
    let old = snapshot(10, 1_000, |id| Some(Row { id, value: 0 }));
    let new = snapshot(10, 1_000, |id| Some(Row { id, value: id % 7 }));
    c.bench_function("reconcile_reloads_10k", |b| {
        b.iter(|| reconcile(black_box(&old), black_box(&new)))
    });
}

fn bench_moves(c: &mut Criterion) {
    let old = snapshot(1, 10_000, |id| Some(Row { id, value: 0 }));
    // Reverse blocks of 16, drop every 10th item and add fresh ones.
    let new = snapshot(1, 10_000, |idx| {
        let id = (idx / 16) * 16 + (15 - idx % 16);
        if id % 10 == 0 {
            Some(Row { id: id + 100_000, value: 0 })
        } else {
            Some(Row { id, value: 0 })
        }
    });
    c.bench_function("reconcile_moves_10k", |b| {
        b.iter(|| reconcile(black_box(&old), black_box(&new)))
    });
}

criterion_group!(benches, bench_identical, bench_reloads, bench_moves);
criterion_main!(benches);
