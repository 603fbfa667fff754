// benches/merge.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use frota162_export::{merge, Table, Value};

fn notifications(start: usize, n: usize) -> Table {
    let cols = ["AIT", "Placa", "Data", "Valor", "Situacao"].iter().map(|s| s.to_string()).collect();
    let rows = (start..start + n).map(|i| {
        vec![
            Value::from(format!("A{i:08}")),
            Value::from(format!("ABC{:04}", i % 10_000)),
            Value::DateTime(45_000.0 + (i % 365) as f64),
            Value::Number(88.38 + (i % 7) as f64),
            Value::from(if i % 3 == 0 { "Paga" } else { "Em aberto" }),
        ]
    });
    Table::from_rows(cols, rows)
}

fn bench_merge(c: &mut Criterion) {
    frota162_export::log::set_log_path(std::env::temp_dir().join("frota162_export-bench.log"));
    let archive = notifications(0, 50_000);
    // Typical re-export: mostly known notifications, a few new ones
    let batch = notifications(48_000, 2_500);

    c.bench_function("merge_50k_archive_2500_batch", |b| {
        b.iter(|| {
            let out = merge(black_box(&archive), black_box(&batch)).unwrap();
            black_box(out.new_entries.len())
        })
    });

    c.bench_function("merge_first_import", |b| {
        let empty = Table::empty();
        b.iter(|| {
            let out = merge(black_box(&empty), black_box(&batch)).unwrap();
            black_box(out.unique.len())
        })
    });
}

criterion_group!(benches, bench_merge);
criterion_main!(benches);
