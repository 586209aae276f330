#![no_main]

use arbitrary::Arbitrary;
use dragpan_core::{
    ActiveSession, ClampBounds, ContainerMetrics, GestureConfig, GestureCoordinator,
    GestureDispatch, HostCommand, LayoutProbe, PanAxes, Point, PointerChannel, PointerInput,
    PointerSource, Rect, RouteTarget, Size,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Down { pointer: u8, x: f32, y: f32, target: u8 },
    Move { pointer: u8, x: f32, y: f32 },
    Up { pointer: u8, x: f32, y: f32 },
    Cancel(Option<u8>),
    Blur,
    Hidden,
    Reset,
    Scroll(f32),
}

#[derive(Debug, Arbitrary)]
struct Input {
    vertical: bool,
    visible_bounds: bool,
    ops: Vec<Op>,
}

/// Fixed 400x200 viewport over 1200x600 of content, three 40x30 items.
struct Stage {
    scroll_left: f64,
    scroll_top: f64,
    items: [Rect; 3],
}

impl LayoutProbe<u8> for Stage {
    fn container(&self) -> ContainerMetrics {
        ContainerMetrics {
            scroll: Point::new(self.scroll_left, self.scroll_top),
            client_size: Size::new(400.0, 200.0),
            scroll_size: Size::new(1200.0, 600.0),
            ..ContainerMetrics::from_rect(Rect::new(10.0, 10.0, 400.0, 200.0))
        }
    }

    fn item_rect(&self, item: &u8) -> Rect {
        self.items[usize::from(*item) % 3]
    }
}

fn channel(pointer: u8) -> PointerChannel {
    match pointer % 3 {
        0 => PointerChannel::mouse(),
        1 => PointerChannel::new(PointerSource::Touch, 7),
        _ => PointerChannel::new(PointerSource::Touch, 8),
    }
}

fn sample(pointer: u8, x: f32, y: f32) -> PointerInput {
    PointerInput::at(channel(pointer), f64::from(x), f64::from(y))
}

fn check(coordinator: &GestureCoordinator<u8>, dispatch: &GestureDispatch<u8>) {
    assert_eq!(
        coordinator.session().kind(),
        coordinator.arbiter().held(),
        "session and arbiter disagree"
    );
    assert_eq!(
        coordinator.is_item_drag_active(),
        matches!(coordinator.session(), ActiveSession::ItemDrag(_)),
        "item-drag flag out of sync"
    );
    if dispatch.is_ignored() {
        assert!(dispatch.commands.is_empty(), "ignored dispatch emitted commands");
        assert!(dispatch.log.sequence.is_none(), "ignored dispatch was sequenced");
    }
    for command in &dispatch.commands {
        match command {
            HostCommand::ScrollTo { left, top } => {
                for offset in [left, top].into_iter().flatten() {
                    assert!(offset.is_finite() && *offset >= 0.0, "bad scroll {offset}");
                }
            }
            HostCommand::MoveItem { left, top, .. } => {
                assert!(left.is_finite() && *left >= 0.0, "bad left {left}");
                assert!(top.is_finite() && *top >= 0.0, "bad top {top}");
                assert!(*left <= 1200.0 && *top <= 600.0, "item escaped bounds");
            }
            _ => {}
        }
    }
}

fuzz_target!(|input: Input| {
    let mut config = GestureConfig::default();
    if input.vertical {
        config.pan_axes = PanAxes::all();
    }
    if input.visible_bounds {
        config.clamp_bounds = ClampBounds::Viewport;
    }
    let Ok(mut coordinator) = GestureCoordinator::<u8>::new(config) else {
        return;
    };
    let mut stage = Stage {
        scroll_left: 0.0,
        scroll_top: 0.0,
        items: [
            Rect::new(60.0, 40.0, 40.0, 30.0),
            Rect::new(200.0, 90.0, 40.0, 30.0),
            Rect::new(330.0, 150.0, 40.0, 30.0),
        ],
    };
    let mut last_sequence = 0;

    for op in input.ops.into_iter().take(256) {
        let dispatch = match op {
            Op::Down { pointer, x, y, target } => {
                let target = match target % 5 {
                    0 | 1 => RouteTarget::Background,
                    2 => RouteTarget::Outside,
                    n => RouteTarget::Item(n),
                };
                coordinator.pointer_down(&sample(pointer, x, y), target, &stage)
            }
            Op::Move { pointer, x, y } => {
                coordinator.pointer_move(&sample(pointer, x, y), &stage)
            }
            Op::Up { pointer, x, y } => coordinator.pointer_up(&sample(pointer, x, y)),
            Op::Cancel(pointer) => {
                coordinator.pointer_cancel(pointer.map(|p| channel(p).pointer_id))
            }
            Op::Blur => coordinator.blur(),
            Op::Hidden => coordinator.visibility_hidden(),
            Op::Reset => coordinator.reset(),
            Op::Scroll(delta) => {
                stage.scroll_left = (stage.scroll_left + f64::from(delta)).clamp(0.0, 800.0);
                continue;
            }
        };
        check(&coordinator, &dispatch);
        if let Some(sequence) = dispatch.log.sequence {
            assert!(sequence > last_sequence, "sequence went backwards");
            last_sequence = sequence;
        }
        for command in &dispatch.commands {
            if let HostCommand::ScrollTo { left, top } = command {
                if let Some(left) = left {
                    stage.scroll_left = *left;
                }
                if let Some(top) = top {
                    stage.scroll_top = *top;
                }
            }
        }
    }

    coordinator.blur();
    assert!(coordinator.session().is_idle(), "blur left a session open");
    assert!(!coordinator.is_item_drag_active());
});
