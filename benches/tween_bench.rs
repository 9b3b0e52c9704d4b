//! Easing and scheduler hot paths.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use sortviz::animation::TweenScheduler;
use sortviz::sinks::{SinkRegistry, SinkTarget};
use sortviz::sort::ElementId;
use sortviz::util::easing::EasingFunction;
use web_time::{Duration, Instant};

fn easing_benchmark(c: &mut Criterion) {
    let f = EasingFunction::CubicHermite { c1: 0.33, c2: 1.0 };
    let _ = c.bench_function("cubic_hermite_easing", |b| {
        b.iter(|| black_box(f.evaluate(black_box(0.5))));
    });
}

fn scheduler_frame_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("scheduler_frame");

    for count in [10, 100, 1000, 4096] {
        let start = Instant::now();
        let mut sinks = SinkRegistry::new();
        let mut scheduler = TweenScheduler::new(start);
        for id in 0..count {
            sinks.register_element(ElementId(id), |x| {
                let _ = black_box(x);
            });
            // Long enough that nothing finishes while benchmarking.
            let _ = scheduler.animate(
                SinkTarget::Element(ElementId(id)),
                0.0,
                100.0,
                Duration::from_secs(3600),
            );
        }
        let now = start + Duration::from_millis(16);

        let _ = group.bench_function(format!("{count}_tweens"), |b| {
            b.iter(|| black_box(scheduler.advance(now, &mut sinks)));
        });
    }
    group.finish();
}

criterion_group!(benches, easing_benchmark, scheduler_frame_benchmark);
criterion_main!(benches);
