#![forbid(unsafe_code)]

use criterion::{Criterion, criterion_group, criterion_main};
use dragpan_core::{
    ContainerMetrics, GestureConfig, GestureCoordinator, LayoutProbe, PointerInput, Rect,
    RouteTarget, Size,
};
use std::hint::black_box;

struct Probe;

impl LayoutProbe<u32> for Probe {
    fn container(&self) -> ContainerMetrics {
        ContainerMetrics {
            scroll_size: Size::new(2400.0, 300.0),
            ..ContainerMetrics::from_rect(Rect::new(16.0, 64.0, 800.0, 300.0))
        }
    }

    fn item_rect(&self, item: &u32) -> Rect {
        Rect::new(40.0 + f64::from(*item) * 60.0, 90.0, 48.0, 48.0)
    }
}

fn bench_gesture_lifecycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture/coordinator/lifecycle");

    group.bench_function("pan_down_move_120_up", |b| {
        b.iter(|| {
            let mut gestures = GestureCoordinator::<u32>::new(GestureConfig::default())
                .expect("default config should be valid");
            let down =
                gestures.pointer_down(&PointerInput::mouse(400.0, 120.0), RouteTarget::Background, &Probe);
            black_box(down.log.sequence);
            for step in 0..120 {
                let x = 400.0 - f64::from(step) * 3.0;
                let dispatch = gestures.pointer_move(&PointerInput::mouse(x, 120.0), &Probe);
                black_box(dispatch.commands.len());
            }
            let up = gestures.pointer_up(&PointerInput::mouse(40.0, 120.0));
            black_box(up.log.outcome);
        });
    });

    group.bench_function("item_down_move_120_up", |b| {
        b.iter(|| {
            let mut gestures = GestureCoordinator::<u32>::new(GestureConfig::default())
                .expect("default config should be valid");
            let down = gestures.pointer_down(
                &PointerInput::touch(7, 120.0, 170.0),
                RouteTarget::Item(1),
                &Probe,
            );
            black_box(down.log.sequence);
            for step in 0..120 {
                let x = 120.0 + f64::from(step) * 2.5;
                let y = 170.0 + f64::from(step % 5);
                let dispatch = gestures.pointer_move(&PointerInput::touch(7, x, y), &Probe);
                black_box(dispatch.commands.last().cloned());
            }
            let up = gestures.pointer_up(&PointerInput::touch(7, 420.0, 174.0));
            black_box(up.commands);
        });
    });

    group.bench_function("contended_down_then_blur", |b| {
        b.iter(|| {
            let mut gestures = GestureCoordinator::<u32>::new(GestureConfig::default())
                .expect("default config should be valid");
            gestures.pointer_down(&PointerInput::mouse(120.0, 170.0), RouteTarget::Item(1), &Probe);
            let rejected =
                gestures.pointer_down(&PointerInput::touch(3, 500.0, 170.0), RouteTarget::Background, &Probe);
            black_box(rejected.log.outcome);
            let blur = gestures.blur();
            black_box(blur.commands);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_gesture_lifecycle);
criterion_main!(benches);
