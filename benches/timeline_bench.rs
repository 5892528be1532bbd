use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use timeline_rs::core::{RangeController, TimeRange, Viewport};
use timeline_rs::ticks::{
    CharWidthMeasure, EnglishLabels, TickPlanConfig, TickPlanInput, plan_ticks,
};

const DAY_MS: f64 = 86_400_000.0;
const BASE: f64 = 1_672_531_200_000.0;

fn bench_plan_ticks_daily(c: &mut Criterion) {
    let input = TickPlanInput {
        range: TimeRange::new(BASE, BASE + 45.0 * DAY_MS).expect("range"),
        now: BASE + 20.0 * DAY_MS,
        viewport: Viewport::with_width(1_920.0).expect("viewport"),
        config: TickPlanConfig::default(),
    };
    let measure = CharWidthMeasure::default();

    c.bench_function("plan_ticks_45_days", |b| {
        b.iter(|| {
            let _ = plan_ticks(black_box(input), &measure, &EnglishLabels)
                .expect("planning should succeed");
        })
    });
}

fn bench_plan_ticks_decade(c: &mut Criterion) {
    let input = TickPlanInput {
        range: TimeRange::new(BASE, BASE + 3_650.0 * DAY_MS).expect("range"),
        now: BASE + 1_000.0 * DAY_MS,
        viewport: Viewport::with_width(1_920.0).expect("viewport"),
        config: TickPlanConfig::default(),
    };
    let measure = CharWidthMeasure::default();

    c.bench_function("plan_ticks_10_years", |b| {
        b.iter(|| {
            let _ = plan_ticks(black_box(input), &measure, &EnglishLabels)
                .expect("planning should succeed");
        })
    });
}

fn bench_zoom_pan_cycle(c: &mut Criterion) {
    let total = TimeRange::new(BASE, BASE + 730.0 * DAY_MS).expect("total");

    c.bench_function("zoom_pan_cycle", |b| {
        b.iter(|| {
            let mut controller = RangeController::new(total);
            for step in 0..64 {
                let factor = if step % 2 == 0 { 0.95 } else { 1.05 };
                let _ = controller.zoom_visible(black_box(factor));
                let _ = controller.pan_by(black_box(DAY_MS));
            }
            controller.filtered_range()
        })
    });
}

criterion_group!(
    benches,
    bench_plan_ticks_daily,
    bench_plan_ticks_decade,
    bench_zoom_pan_cycle
);
criterion_main!(benches);
