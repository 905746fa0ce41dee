use criterion::{black_box, criterion_group, criterion_main, Criterion};
use settlement_reports::core::instruction::InstructionBatch;
use settlement_reports::ingest::{read_instructions, INPUT_DATE_FORMAT};
use settlement_reports::report::SettlementReport;
use settlement_reports::simulation::sample::{generate_instructions, write_csv, SampleConfig};

fn sample_batch(entity_count: usize, instruction_count: usize) -> InstructionBatch {
    let config = SampleConfig {
        entity_count,
        instruction_count,
        span_days: 90,
        ..Default::default()
    };
    generate_instructions(&config).into_iter().collect()
}

fn bench_report_1k_instructions(c: &mut Criterion) {
    let batch = sample_batch(20, 1_000);

    c.bench_function("report_1k_instructions", |b| {
        b.iter(|| SettlementReport::from_batch(black_box(&batch)))
    });
}

fn bench_report_100k_instructions(c: &mut Criterion) {
    let batch = sample_batch(500, 100_000);

    c.bench_function("report_100k_instructions", |b| {
        b.iter(|| SettlementReport::from_batch(black_box(&batch)))
    });
}

fn bench_ingest_10k_rows(c: &mut Criterion) {
    let config = SampleConfig {
        entity_count: 50,
        instruction_count: 10_000,
        ..Default::default()
    };
    let mut csv = Vec::new();
    write_csv(&mut csv, &generate_instructions(&config), INPUT_DATE_FORMAT).unwrap();

    c.bench_function("ingest_10k_rows", |b| {
        b.iter(|| read_instructions(black_box(csv.as_slice()), INPUT_DATE_FORMAT).unwrap())
    });
}

criterion_group!(
    benches,
    bench_report_1k_instructions,
    bench_report_100k_instructions,
    bench_ingest_10k_rows
);
criterion_main!(benches);
