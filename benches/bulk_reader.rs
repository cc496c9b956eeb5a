use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use scryfall_client::domain::models::{Card, Ruling};
use scryfall_client::{BlockingBulkReader, BulkReader};
use std::hint::black_box;
use std::io::Cursor;

const FIXTURE_CARDS: &str = include_str!("../tests/fixtures/cards.json");
const FIXTURE_RULINGS: &str = include_str!("../tests/fixtures/rulings.json");

/// Repeat the elements of a fixture array `times` times
fn inflate(fixture: &str, times: usize) -> Vec<u8> {
    let elements: Vec<serde_json::Value> =
        serde_json::from_str(fixture).expect("fixture should be a JSON array");
    let repeated: Vec<&serde_json::Value> = elements.iter().cycle().take(elements.len() * times).collect();
    serde_json::to_vec(&repeated).expect("fixture should serialize")
}

fn bench_async_reader(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("runtime");
    let mut group = c.benchmark_group("bulk_reader_async");

    for times in [10, 100] {
        let cards = inflate(FIXTURE_CARDS, times);
        group.throughput(Throughput::Bytes(cards.len() as u64));
        group.bench_with_input(BenchmarkId::new("cards", cards.len()), &cards, |b, data| {
            b.to_async(&runtime).iter(|| async move {
                let mut reader = BulkReader::<Card, _>::new(data.as_slice()).await.unwrap();
                let mut count = 0;
                while let Some(card) = reader.next().await.unwrap() {
                    black_box(card);
                    count += 1;
                }
                count
            });
        });
    }

    let rulings = inflate(FIXTURE_RULINGS, 1_000);
    group.throughput(Throughput::Bytes(rulings.len() as u64));
    group.bench_with_input(BenchmarkId::new("rulings", rulings.len()), &rulings, |b, data| {
        b.to_async(&runtime).iter(|| async move {
            let mut reader = BulkReader::<Ruling, _>::new(data.as_slice()).await.unwrap();
            while let Some(ruling) = reader.next().await.unwrap() {
                black_box(ruling);
            }
        });
    });

    group.finish();
}

fn bench_blocking_reader(c: &mut Criterion) {
    let cards = inflate(FIXTURE_CARDS, 100);
    let mut group = c.benchmark_group("bulk_reader_blocking");
    group.throughput(Throughput::Bytes(cards.len() as u64));

    group.bench_function("cards", |b| {
        b.iter(|| {
            let reader = BlockingBulkReader::<Card, _>::new(Cursor::new(cards.as_slice())).unwrap();
            black_box(reader.map(Result::unwrap).count())
        });
    });

    // Whole-document parse for comparison
    group.bench_function("cards_from_slice", |b| {
        b.iter(|| black_box(serde_json::from_slice::<Vec<Card>>(&cards).unwrap().len()));
    });

    group.finish();
}

criterion_group!(benches, bench_async_reader, bench_blocking_reader);
criterion_main!(benches);
