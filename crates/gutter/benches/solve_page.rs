use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use gutter::{Layout, Rect, SolveOptions, solve_page};
use std::hint::black_box;

fn build_grid(rows: usize, cols: usize, opts: &SolveOptions) -> Layout<usize> {
    let mut layout = Layout::new();
    let cell_h = opts.page_height / rows as f64;
    let cell_w = opts.page_width / cols as f64;
    for r in 0..rows {
        for c in 0..cols {
            let rect = Rect::new(
                r as f64 * cell_h + cell_h * 0.1,
                c as f64 * cell_w + cell_w * 0.1,
                cell_h * 0.8,
                cell_w * 0.8,
            );
            layout.add(1, rect, Some(r * cols + c));
        }
    }
    layout
}

fn bench_solve_page(c: &mut Criterion) {
    let opts = SolveOptions::default();
    let mut group = c.benchmark_group("solve_page");
    for (rows, cols) in [(2, 3), (4, 6), (8, 12)] {
        let layout = build_grid(rows, cols, &opts);
        let page = layout.page(1).expect("page 1");
        group.bench_with_input(
            BenchmarkId::from_parameter(rows * cols),
            page,
            |b, page| b.iter(|| solve_page(black_box(page), black_box(&opts))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_solve_page);
criterion_main!(benches);
