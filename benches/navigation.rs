//! Benchmarks for navigation performance.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used, clippy::cast_possible_truncation)]

use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use xlnav::layout::{SheetLayout, Viewport, ViewportRectangle};
use xlnav::navigation::{
    move_cell, move_cell_pixels, sparse_cells, Direction, Navigation, RangeTraversalOrder,
};
use xlnav::{CellRange, CellReference, RowMajorCell};

/// Every 37th row populated over the first 20 columns
fn sparse_store() -> BTreeMap<RowMajorCell, u32> {
    let mut cells = BTreeMap::new();
    for row in (0..1_000_000).step_by(37) {
        for column in 0..20 {
            let cell = CellReference::from_values(column, row).expect("cell in domain");
            cells.insert(RowMajorCell(cell), row);
        }
    }
    cells
}

/// Benchmark sparse iteration over ranges of growing height
fn bench_sparse_cells(c: &mut Criterion) {
    let cells = sparse_store();
    let mut group = c.benchmark_group("sparse_cells");

    for height in [1_000u32, 100_000, 1_000_000] {
        let range: CellRange = format!("B1:K{height}").parse().expect("range");
        let visited = sparse_cells(&cells, range).count();
        group.throughput(Throughput::Elements(visited as u64));
        group.bench_with_input(BenchmarkId::new("rows", height), &range, |b, range| {
            b.iter(|| sparse_cells(black_box(&cells), *range).count())
        });
    }

    group.finish();
}

/// Benchmark all eight traversal orders over a 100x100 range
fn bench_traversal(c: &mut Criterion) {
    let range: CellRange = "A1:CV100".parse().expect("range");
    let mut group = c.benchmark_group("traversal");
    group.throughput(Throughput::Elements(u64::from(range.count())));

    for order in RangeTraversalOrder::all() {
        group.bench_with_input(
            BenchmarkId::new("order", order.kebab_name()),
            &order,
            |b, order| b.iter(|| order.cells(black_box(range)).count()),
        );
    }

    group.finish();
}

/// Benchmark movement across long runs of hidden rows
fn bench_hidden_skip(c: &mut Criterion) {
    let mut layout = SheetLayout::default();
    for row in 1..50_000 {
        layout.hide_row(xlnav::RowReference::new(row).expect("row in domain"));
    }
    let start: CellReference = "C1".parse().expect("cell");

    c.bench_function("move_past_50k_hidden_rows", |b| {
        b.iter(|| move_cell(black_box(start), Direction::Down, &layout))
    });

    c.bench_function("scroll_past_50k_hidden_rows", |b| {
        b.iter(|| move_cell_pixels(black_box(start), Direction::Down, 2_000.0, &layout))
    });
}

/// Benchmark a keyboard session through the viewport state machine
fn bench_viewport_apply(c: &mut Criterion) {
    let mut layout = SheetLayout::default();
    layout.set_frozen(1, 1);
    for column in ["D", "E", "F"] {
        layout.hide_column(column.parse().expect("column"));
    }
    let commands: Vec<Navigation> = [
        "select-cell B2",
        "right-column",
        "extend-down-row",
        "extend-right-pixel 300",
        "down-pixel 600",
        "down-row",
        "extend-cell Z200",
    ]
    .iter()
    .map(|text| text.parse().expect("command"))
    .cycle()
    .take(700)
    .collect();
    let start = Viewport::new(ViewportRectangle::default(), None);

    c.bench_function("viewport_apply_700", |b| {
        b.iter(|| {
            commands.iter().fold(start.clone(), |viewport, command| {
                viewport.apply(command, &layout).expect("apply")
            })
        })
    });
}

criterion_group!(
    benches,
    bench_sparse_cells,
    bench_traversal,
    bench_hidden_skip,
    bench_viewport_apply,
);

criterion_main!(benches);
