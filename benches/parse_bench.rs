use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use gputop::gpu::parse::{parse_metrics, parse_power_limits, parse_processes};
use std::hint::black_box;

fn make_process_output(n: usize) -> String {
    (0..n)
        .map(|i| format!("{}, proc_{i}, {}\n", 1000 + i, (i % 64) * 128))
        .collect()
}

fn make_power_output() -> String {
    let mut out = String::from("GPU 00000000:01:00.0\n    GPU Power Readings\n");
    for _ in 0..40 {
        out.push_str("        Power Management                  : Supported\n");
    }
    out.push_str("        Power Draw                        : 168.42 W\n");
    out.push_str("        Power Limit                       : 180.00 W\n");
    out.push_str("        Min Power Limit                   : 90.00 W\n");
    out.push_str("        Max Power Limit                   : 217.00 W\n");
    out
}

fn bench_parse_metrics(c: &mut Criterion) {
    let line = "87, 6144, 8192, 72, 168.42, 180.00\n";
    c.bench_function("parse_metrics", |b| {
        b.iter(|| {
            let metrics = parse_metrics(black_box(line));
            black_box(metrics);
        })
    });
}

fn bench_parse_processes(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_processes_16_64_256");

    for size in [16usize, 64, 256] {
        let output = make_process_output(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &output, |b, output| {
            b.iter(|| {
                let procs = parse_processes(black_box(output));
                black_box(procs);
            })
        });
    }

    group.finish();
}

fn bench_parse_power_limits(c: &mut Criterion) {
    let output = make_power_output();
    c.bench_function("parse_power_limits", |b| {
        b.iter(|| {
            let limits = parse_power_limits(black_box(&output));
            black_box(limits);
        })
    });
}

criterion_group!(
    benches,
    bench_parse_metrics,
    bench_parse_processes,
    bench_parse_power_limits
);
criterion_main!(benches);
