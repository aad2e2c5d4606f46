use std::fs;

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use nexus_manager::{
    core::services::SummaryService,
    domain::{Expense, ExpenseCategory, PaymentMethod, Receipt, ServiceType},
    storage::{CsvRecordStore, DatasetKind},
};
use tempfile::tempdir;

fn build_receipts(count: usize) -> Vec<Receipt> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    (0..count)
        .map(|idx| {
            let service = ServiceType::ALL[idx % ServiceType::ALL.len()];
            let total = 75_000 + (idx % 5) as i64 * 25_000;
            Receipt::new(
                start + Duration::days((idx % 365) as i64),
                format!("Client {}", idx % 250),
                service,
                total,
                total / 2 + (idx % 3) as i64 * 10_000,
                PaymentMethod::ALL[idx % PaymentMethod::ALL.len()],
            )
        })
        .collect()
}

fn build_expenses(count: usize) -> Vec<Expense> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    (0..count)
        .map(|idx| {
            Expense::new(
                start + Duration::days((idx % 365) as i64),
                ExpenseCategory::ALL[idx % ExpenseCategory::ALL.len()],
                format!("Expense {idx}"),
                5_000 + (idx % 40) as i64 * 1_000,
            )
        })
        .collect()
}

fn bench_aggregation(c: &mut Criterion) {
    let receipts = build_receipts(10_000);
    let expenses = build_expenses(10_000);

    c.bench_function("financial_summary_10k", |b| {
        b.iter(|| {
            SummaryService::financial_summary(
                black_box(&receipts),
                black_box(&expenses),
                15_125_000,
                2_139_500,
            )
            .expect("non-zero targets")
        })
    });

    c.bench_function("revenue_by_service_10k", |b| {
        b.iter(|| SummaryService::revenue_by_service(black_box(&receipts)).expect("in range"))
    });

    c.bench_function("outstanding_10k", |b| {
        b.iter(|| SummaryService::outstanding(black_box(&receipts)))
    });
}

fn bench_store_append(c: &mut Criterion) {
    let receipts = build_receipts(1_000);
    let seed_dir = tempdir().expect("tempdir");
    let seed = CsvRecordStore::new(seed_dir.path().to_path_buf()).expect("store");
    for receipt in &receipts {
        seed.append(receipt.clone()).expect("seed");
    }
    let seed_file = seed.path_for(DatasetKind::Receipts);

    c.bench_function("csv_append_onto_1k", |b| {
        b.iter_batched(
            || {
                let dir = tempdir().expect("tempdir");
                let store = CsvRecordStore::new(dir.path().to_path_buf()).expect("store");
                fs::copy(&seed_file, store.path_for(DatasetKind::Receipts)).expect("copy seed");
                (dir, store)
            },
            |(_dir, store)| {
                store.append(receipts[0].clone()).expect("append");
            },
            BatchSize::PerIteration,
        )
    });
}

criterion_group!(benches, bench_aggregation, bench_store_append);
criterion_main!(benches);
