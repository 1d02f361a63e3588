use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use market_book::{MarketEvent, MockDataFeed, OrderBook};
use parking_lot::RwLock;
use std::sync::Arc;

/// Builds a book holding `live_orders` adds spread across many instruments,
/// alternating sides.
fn populate_book(live_orders: usize) -> OrderBook {
    let mut book = OrderBook::new();
    for i in 0..live_orders {
        let ticker = i % 2025;
        let side = if i % 2 == 0 { 'B' } else { 'S' };
        let price = 100.0 + (i as f64 * 0.00001);
        let line = format!("{i}|ord{i}|a|{ticker}|{side}|{price:.5}|100");
        book.process_event(line.parse::<MarketEvent>().unwrap());
    }
    book
}

/// Benchmark the performance of parsing and applying a single Add event.
fn benchmark_single_event_application(criterion: &mut Criterion) {
    let mut benchmark_group = criterion.benchmark_group("event_application");

    benchmark_group.bench_function("parse_and_apply_add", |bencher| {
        let mut book = OrderBook::new();
        let mut order_counter: u64 = 0;

        bencher.iter(|| {
            let line = format!("1568390243|ord{order_counter}|a|AAPL|B|209.00000|100");
            let event: MarketEvent = line.parse().unwrap();
            book.process_event(black_box(event));
            order_counter += 1; // ensure unique order ids
        });
    });

    benchmark_group.bench_function("parse_and_apply_update", |bencher| {
        let mut book = OrderBook::new();
        book.process_event(
            "1568390243|abbb11|a|AAPL|B|209.00000|100"
                .parse::<MarketEvent>()
                .unwrap(),
        );
        let mut size_counter: u32 = 1;

        bencher.iter(|| {
            let line = format!("1568390244|abbb11|u|{size_counter}");
            let event: MarketEvent = line.parse().unwrap();
            book.process_event(black_box(event));
            size_counter = size_counter % 10_000 + 1;
        });
    });

    benchmark_group.finish();
}

/// Benchmark a realistic add/update/cancel mix from the synthetic feed.
fn benchmark_mixed_event_stream(criterion: &mut Criterion) {
    let mut benchmark_group = criterion.benchmark_group("mixed_event_stream");

    for event_count in [1_000, 10_000, 100_000] {
        benchmark_group.throughput(Throughput::Elements(event_count as u64));

        // Pre-generate the stream so only parse+apply is measured
        let mut feed = MockDataFeed::with_seed(7);
        let lines: Vec<String> = (0..event_count).map(|i| feed.generate(i as u64)).collect();

        benchmark_group.bench_with_input(
            BenchmarkId::new("process_events", event_count),
            &lines,
            |bencher, lines| {
                bencher.iter(|| {
                    let mut book = OrderBook::new();
                    for line in lines {
                        book.process_event(line.parse::<MarketEvent>().unwrap());
                    }
                    black_box(book);
                });
            },
        );
    }

    benchmark_group.finish();
}

/// Benchmark the best-price query at various book sizes. The range-bound
/// lookup should keep latency close to flat as the book grows.
fn benchmark_best_price_query(criterion: &mut Criterion) {
    let mut benchmark_group = criterion.benchmark_group("best_price_query");

    for book_size in [100, 1_000, 10_000, 100_000] {
        benchmark_group.throughput(Throughput::Elements(1));
        let book = populate_book(book_size);

        benchmark_group.bench_with_input(
            BenchmarkId::new("best_ask_and_bid", book_size),
            &book,
            |bencher, book| {
                bencher.iter(|| {
                    let best = book.best_ask_and_bid("1024");
                    black_box(best);
                });
            },
        );
    }

    benchmark_group.finish();
}

/// Benchmark event processing interleaved with a query sweep over every
/// ticker each `period` events, mimicking a consumer polling the book.
fn benchmark_replay_with_query_sweep(criterion: &mut Criterion) {
    let mut benchmark_group = criterion.benchmark_group("replay_with_query_sweep");

    let mut feed = MockDataFeed::with_seed(11);
    let lines: Vec<String> = (0..10_000).map(|i| feed.generate(i as u64)).collect();
    let tickers: Vec<String> = (0..2025).map(|t| t.to_string()).collect();

    for period in [10usize, 100, 1_000] {
        benchmark_group.bench_with_input(
            BenchmarkId::new("sweep_every", period),
            &period,
            |bencher, &period| {
                bencher.iter(|| {
                    let mut book = OrderBook::new();
                    for (i, line) in lines.iter().enumerate() {
                        book.process_event(line.parse::<MarketEvent>().unwrap());
                        if (i + 1) % period == 0 {
                            for ticker in &tickers {
                                black_box(book.best_ask_and_bid(ticker));
                            }
                        }
                    }
                    black_box(book);
                });
            },
        );
    }

    benchmark_group.finish();
}

/// Benchmark concurrent best-price reads under the RwLock deployment shape.
fn benchmark_concurrent_best_price_reads(criterion: &mut Criterion) {
    let mut benchmark_group = criterion.benchmark_group("concurrent_best_price_reads");

    let book_arc = Arc::new(RwLock::new(populate_book(10_000)));

    for threads_count in [1, 2, 4, 8] {
        benchmark_group.bench_with_input(
            BenchmarkId::new("concurrent_reads", threads_count),
            &threads_count,
            |bencher, &thread_count| {
                bencher.iter(|| {
                    let mut thread_handles = vec![];

                    for _ in 0..thread_count {
                        let book_clone = Arc::clone(&book_arc);
                        thread_handles.push(std::thread::spawn(move || {
                            for ticker in 0..100 {
                                let best =
                                    book_clone.read().best_ask_and_bid(&ticker.to_string());
                                black_box(best);
                            }
                        }));
                    }

                    for handle in thread_handles {
                        handle.join().unwrap();
                    }
                });
            },
        );
    }

    benchmark_group.finish();
}

// Define the benchmarks group to generate the reports automatically
criterion_group!(
    benches,
    benchmark_single_event_application,
    benchmark_mixed_event_stream,
    benchmark_best_price_query,
    benchmark_replay_with_query_sweep,
    benchmark_concurrent_best_price_reads,
);

criterion_main!(benches);
