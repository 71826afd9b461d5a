//! Criterion benchmarks comparing the Fibonacci queue with `std::collections::BinaryHeap`
//!
//! ```bash
//! cargo bench --bench queue_bench
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fibonacci_queue::graph::Graph;
use fibonacci_queue::FibonacciQueue;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::hint::black_box;

const SIZES: [u64; 4] = [100, 1_000, 10_000, 100_000];

fn build_queue(size: u64) -> FibonacciQueue<u64> {
    let mut queue = FibonacciQueue::with_capacity(size as usize);
    for i in 0..size {
        queue.insert(i).unwrap();
    }
    queue
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &size in &SIZES {
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("FibonacciQueue", size), &size, |b, &size| {
            b.iter(|| {
                let mut queue = FibonacciQueue::new();
                (0..size).for_each(|i| queue.insert(black_box(i)).unwrap());
                queue
            });
        });
        group.bench_with_input(BenchmarkId::new("BinaryHeap", size), &size, |b, &size| {
            b.iter(|| {
                let mut heap = BinaryHeap::new();
                (0..size).for_each(|i| heap.push(Reverse(black_box(i))));
                heap
            });
        });
    }
    group.finish();
}

fn bench_extract_min(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_min");
    for &size in &SIZES {
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("FibonacciQueue", size), &size, |b, &size| {
            b.iter(|| {
                let mut queue = build_queue(size);
                while let Some(item) = queue.extract_min() {
                    black_box(item);
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("BinaryHeap", size), &size, |b, &size| {
            b.iter(|| {
                let mut heap: BinaryHeap<_> = (0..size).map(Reverse).collect();
                while let Some(item) = heap.pop() {
                    black_box(item);
                }
            });
        });
    }
    group.finish();
}

fn bench_decrease_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("decrease_key");
    for &size in &SIZES {
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("FibonacciQueue", size), &size, |b, &size| {
            b.iter(|| {
                let mut queue = FibonacciQueue::new();
                for i in 0..=size {
                    queue.insert(2 * size + i).unwrap();
                }
                queue.extract_min();
                for i in (1..=size).rev() {
                    queue.decrease_key(&(2 * size + i), Some(black_box(i))).unwrap();
                }
                queue
            });
        });
    }
    group.finish();
}

fn bench_spanning_forest(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimum_spanning_forest");
    for &side in &[10u64, 30, 60] {
        let mut graph = Graph::new();
        for v in 0..side * side {
            graph.insert_vertex(v);
        }
        for row in 0..side {
            for col in 0..side {
                let v = row * side + col;
                let weight = (v * 7919) % 97;
                if col + 1 < side {
                    graph.insert_edge(v, v + 1, weight).unwrap();
                    graph.insert_edge(v + 1, v, weight).unwrap();
                }
                if row + 1 < side {
                    graph.insert_edge(v, v + side, weight + 1).unwrap();
                    graph.insert_edge(v + side, v, weight + 1).unwrap();
                }
            }
        }
        group.bench_with_input(BenchmarkId::new("grid", side * side), &graph, |b, graph| {
            b.iter(|| graph.minimum_spanning_forest::<FibonacciQueue<_>>().unwrap());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_extract_min,
    bench_decrease_key,
    bench_spanning_forest
);
criterion_main!(benches);
