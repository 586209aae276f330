#![cfg(feature = "tracing")]

//! Structured log events emitted by the coordinator.
//!
//! Run with `cargo test -p dragpan-core --features tracing`.

use std::sync::{Arc, Mutex};

use dragpan_core::{
    ContainerMetrics, GestureConfig, GestureCoordinator, LayoutProbe, PointerInput, Rect,
    RouteTarget,
};
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

#[derive(Debug, Default)]
struct GestureTraceState {
    messages: Vec<(tracing::Level, String)>,
    end_reasons: Vec<String>,
    ignored_reasons: Vec<String>,
}

struct GestureTraceCapture {
    state: Arc<Mutex<GestureTraceState>>,
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    reason: Option<String>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "reason" {
            self.reason = Some(value.to_owned());
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }
}

impl<S> Layer<S> for GestureTraceCapture
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let Some(message) = visitor.message else {
            return;
        };
        let mut state = self.state.lock().expect("gesture trace state lock");
        if let Some(reason) = visitor.reason {
            match message.as_str() {
                "gesture.end" => state.end_reasons.push(reason),
                "gesture.ignored" => state.ignored_reasons.push(reason),
                _ => {}
            }
        }
        state.messages.push((*event.metadata().level(), message));
    }
}

struct Fixed;

impl LayoutProbe<u32> for Fixed {
    fn container(&self) -> ContainerMetrics {
        ContainerMetrics::from_rect(Rect::new(0.0, 0.0, 400.0, 200.0))
    }

    fn item_rect(&self, _item: &u32) -> Rect {
        Rect::new(50.0, 20.0, 40.0, 30.0)
    }
}

fn capture() -> (Arc<Mutex<GestureTraceState>>, tracing::subscriber::DefaultGuard) {
    let state = Arc::new(Mutex::new(GestureTraceState::default()));
    let subscriber = tracing_subscriber::registry().with(GestureTraceCapture {
        state: Arc::clone(&state),
    });
    let guard = tracing::subscriber::set_default(subscriber);
    tracing::callsite::rebuild_interest_cache();
    (state, guard)
}

#[test]
fn session_lifecycle_events_are_emitted() {
    let (state, _guard) = capture();
    let mut gestures =
        GestureCoordinator::<u32>::new(GestureConfig::default()).expect("default config is valid");

    gestures.pointer_down(&PointerInput::mouse(100.0, 50.0), RouteTarget::Background, &Fixed);
    gestures.pointer_move(&PointerInput::mouse(80.0, 50.0), &Fixed);
    gestures.pointer_up(&PointerInput::mouse(80.0, 50.0));
    gestures.pointer_down(&PointerInput::mouse(60.0, 30.0), RouteTarget::Item(1), &Fixed);
    gestures.pointer_move(&PointerInput::mouse(70.0, 30.0), &Fixed);
    gestures.blur();

    tracing::callsite::rebuild_interest_cache();
    let snapshot = state.lock().expect("gesture trace state lock");
    let names: Vec<&str> = snapshot
        .messages
        .iter()
        .map(|(_, message)| message.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "gesture.pan.start",
            "gesture.pan.update",
            "gesture.end",
            "gesture.item_drag.start",
            "gesture.item_drag.update",
            "gesture.end",
        ]
    );
    assert_eq!(snapshot.end_reasons, vec!["released", "focus_lost"]);
    assert!(
        snapshot
            .messages
            .iter()
            .filter(|(_, message)| message.ends_with(".update"))
            .all(|(level, _)| *level == tracing::Level::TRACE)
    );
    assert!(
        snapshot
            .messages
            .iter()
            .filter(|(_, message)| message.ends_with(".start"))
            .all(|(level, _)| *level == tracing::Level::DEBUG)
    );
}

#[test]
fn ignored_inputs_record_their_reason() {
    let (state, _guard) = capture();
    let mut gestures =
        GestureCoordinator::<u32>::new(GestureConfig::default()).expect("default config is valid");

    gestures.pointer_up(&PointerInput::mouse(0.0, 0.0));
    gestures.pointer_down(&PointerInput::mouse(60.0, 30.0), RouteTarget::Item(1), &Fixed);
    gestures.pointer_down(&PointerInput::touch(4, 0.0, 0.0), RouteTarget::Background, &Fixed);

    tracing::callsite::rebuild_interest_cache();
    let snapshot = state.lock().expect("gesture trace state lock");
    assert_eq!(
        snapshot.ignored_reasons,
        vec!["no_active_session", "item_drag_active"]
    );
}
