#![forbid(unsafe_code)]

//! `wasm-bindgen` DOM adapter.
//!
//! One listener set is registered at attach time: `pointerdown` on the
//! container, `pointermove` / `pointerup` / `pointercancel` and
//! `visibilitychange` on the document, `blur` on the window. Every handler
//! normalizes its event and forwards it to the core, then applies the
//! returned commands. Listeners stay registered until [`DragPan::detach`].

use std::cell::RefCell;
use std::rc::Rc;

use dragpan_core::{
    ContainerMetrics, GestureCoordinator, GestureDispatch, GestureKind, Insets, LayoutProbe,
    NodeRole, Point, PointerButton, PointerChannel, PointerInput, PointerSource, Rect,
    RouteTarget, Size, resolve_target,
};
use js_sys::Reflect;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, PointerEvent,
    VisibilityState, Window,
};

use crate::config::BindingConfig;
use crate::style::{ClassTarget, DomOp, render_command, scroll_offset, stylesheet};
use crate::trace::{GestureRecorder, TraceItem};

/// An item element plus its trace id.
#[derive(Debug, Clone)]
pub struct DomItem {
    element: HtmlElement,
    id: u32,
}

impl PartialEq for DomItem {
    fn eq(&self, other: &Self) -> bool {
        self.element == other.element
    }
}

impl TraceItem for DomItem {
    fn trace_id(&self) -> u32 {
        self.id
    }
}

/// Live geometry reads against the container.
struct DomLayout<'a> {
    container: &'a HtmlElement,
}

impl LayoutProbe<DomItem> for DomLayout<'_> {
    fn container(&self) -> ContainerMetrics {
        let el = self.container;
        let bounds = el.get_bounding_client_rect();
        ContainerMetrics {
            rect: Rect::new(bounds.x(), bounds.y(), bounds.width(), bounds.height()),
            border: Insets::new(f64::from(el.client_top()), 0.0, 0.0, f64::from(el.client_left())),
            scroll: Point::new(f64::from(el.scroll_left()), f64::from(el.scroll_top())),
            client_size: Size::new(f64::from(el.client_width()), f64::from(el.client_height())),
            scroll_size: Size::new(f64::from(el.scroll_width()), f64::from(el.scroll_height())),
        }
    }

    fn item_rect(&self, item: &DomItem) -> Rect {
        let bounds = item.element.get_bounding_client_rect();
        Rect::new(bounds.x(), bounds.y(), bounds.width(), bounds.height())
    }
}

/// Coordinator, optionally behind a trace recorder.
enum Engine {
    Live(GestureCoordinator<DomItem>),
    Recording(GestureRecorder<DomItem>),
}

impl Engine {
    fn coordinator(&self) -> &GestureCoordinator<DomItem> {
        match self {
            Self::Live(coordinator) => coordinator,
            Self::Recording(recorder) => recorder.coordinator(),
        }
    }

    fn pointer_down(
        &mut self,
        input: &PointerInput,
        target: RouteTarget<DomItem>,
        layout: &DomLayout<'_>,
    ) -> GestureDispatch<DomItem> {
        match self {
            Self::Live(c) => c.pointer_down(input, target, layout),
            Self::Recording(r) => r.pointer_down(input, target, layout),
        }
    }

    fn pointer_move(&mut self, input: &PointerInput, layout: &DomLayout<'_>) -> GestureDispatch<DomItem> {
        match self {
            Self::Live(c) => c.pointer_move(input, layout),
            Self::Recording(r) => r.pointer_move(input, layout),
        }
    }

    fn pointer_up(&mut self, input: &PointerInput) -> GestureDispatch<DomItem> {
        match self {
            Self::Live(c) => c.pointer_up(input),
            Self::Recording(r) => r.pointer_up(input),
        }
    }

    fn pointer_cancel(&mut self, pointer_id: Option<i32>) -> GestureDispatch<DomItem> {
        match self {
            Self::Live(c) => c.pointer_cancel(pointer_id),
            Self::Recording(r) => r.pointer_cancel(pointer_id),
        }
    }

    fn blur(&mut self) -> GestureDispatch<DomItem> {
        match self {
            Self::Live(c) => c.blur(),
            Self::Recording(r) => r.blur(),
        }
    }

    fn visibility_hidden(&mut self) -> GestureDispatch<DomItem> {
        match self {
            Self::Live(c) => c.visibility_hidden(),
            Self::Recording(r) => r.visibility_hidden(),
        }
    }

    fn reset(&mut self) -> GestureDispatch<DomItem> {
        match self {
            Self::Live(c) => c.reset(),
            Self::Recording(r) => r.reset(),
        }
    }
}

struct Shared {
    config: BindingConfig,
    window: Window,
    document: Document,
    container: HtmlElement,
    engine: Engine,
    /// Items seen so far; the index is the trace id.
    items: Vec<HtmlElement>,
}

impl Shared {
    fn dom_item(&mut self, element: HtmlElement) -> DomItem {
        let id = match self.items.iter().position(|known| *known == element) {
            Some(idx) => idx,
            None => {
                self.items.push(element.clone());
                self.items.len() - 1
            }
        };
        DomItem {
            element,
            id: u32::try_from(id).unwrap_or(u32::MAX),
        }
    }

    fn resolve(&mut self, event: &Event) -> RouteTarget<DomItem> {
        let start = event.target().and_then(|t| t.dyn_into::<Element>().ok());
        let container: &Element = self.container.as_ref();
        let selector = self.config.item_selector.clone();
        let mut roles = Vec::new();
        let mut node = start;
        while let Some(element) = node {
            if element == *container {
                roles.push(NodeRole::Container);
                break;
            }
            let is_item = element.matches(&selector).unwrap_or(false);
            roles.push(match element.clone().dyn_into::<HtmlElement>() {
                Ok(html) if is_item => NodeRole::Item(html),
                _ => NodeRole::Other,
            });
            node = element.parent_element();
        }
        let target = resolve_target(roles);
        match target {
            RouteTarget::Item(element) => RouteTarget::Item(self.dom_item(element)),
            RouteTarget::Background => RouteTarget::Background,
            RouteTarget::Outside => RouteTarget::Outside,
        }
    }

    /// Apply every op of every command. A failed op does not stop the rest.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn apply(&self, dispatch: &GestureDispatch<DomItem>, event: Option<&Event>) {
        for command in &dispatch.commands {
            for op in render_command(command, &self.config) {
                if let Err(err) = self.apply_op(op, event) {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(error = ?err, "dragpan.dom_op_failed");
                }
            }
        }
    }

    fn apply_op(&self, op: DomOp<DomItem>, event: Option<&Event>) -> Result<(), JsValue> {
        match op {
            DomOp::PreventDefault => {
                if let Some(event) = event
                    && event.cancelable()
                {
                    event.prevent_default();
                }
            }
            DomOp::AddClass(target, class) => {
                if let Some(el) = self.class_target(target) {
                    el.class_list().add_1(&class)?;
                }
            }
            DomOp::RemoveClass(target, class) => {
                if let Some(el) = self.class_target(target) {
                    el.class_list().remove_1(&class)?;
                }
            }
            DomOp::ScrollContainer { left, top } => {
                if let Some(left) = left {
                    self.container.set_scroll_left(scroll_offset(left));
                }
                if let Some(top) = top {
                    self.container.set_scroll_top(scroll_offset(top));
                }
            }
            DomOp::SetItemStyle {
                item,
                property,
                value,
            } => item.element.style().set_property(property, &value)?,
            DomOp::RemoveItemStyle { item, property } => {
                item.element.style().remove_property(property)?;
            }
            DomOp::SetWindowFlag { name, value } => {
                Reflect::set(
                    self.window.as_ref(),
                    &JsValue::from_str(&name),
                    &JsValue::from_bool(value),
                )?;
            }
        }
        Ok(())
    }

    fn class_target(&self, target: ClassTarget) -> Option<Element> {
        match target {
            ClassTarget::Container => Some(self.container.clone().into()),
            ClassTarget::Body => self.document.body().map(Into::into),
        }
    }
}

fn pointer_input(event: &PointerEvent) -> PointerInput {
    let channel = PointerChannel::new(
        PointerSource::from_pointer_type(&event.pointer_type()),
        event.pointer_id(),
    );
    PointerInput {
        channel,
        button: PointerButton::from_dom_button(event.button()),
        page: Point::new(f64::from(event.page_x()), f64::from(event.page_y())),
        client: Point::new(f64::from(event.client_x()), f64::from(event.client_y())),
    }
}

/// Which lifecycle call a registered listener forwards to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hook {
    Down,
    Move,
    Up,
    Cancel,
    Blur,
    Visibility,
}

fn handle(shared: &Rc<RefCell<Shared>>, hook: Hook, event: &Event) {
    // A handler that fires while another is running (nested dispatch) is
    // dropped rather than panicking on the borrow.
    let Ok(mut guard) = shared.try_borrow_mut() else {
        return;
    };
    let state = &mut *guard;
    let pointer = event.dyn_ref::<PointerEvent>();
    if let Some(pointer) = pointer
        && !pointer.is_primary()
    {
        return;
    }
    let dispatch = match (hook, pointer) {
        (Hook::Down, Some(pointer)) => {
            let input = pointer_input(pointer);
            let target = state.resolve(event);
            let layout = DomLayout {
                container: &state.container,
            };
            state.engine.pointer_down(&input, target, &layout)
        }
        (Hook::Move, Some(pointer)) => {
            let layout = DomLayout {
                container: &state.container,
            };
            state.engine.pointer_move(&pointer_input(pointer), &layout)
        }
        (Hook::Up, Some(pointer)) => state.engine.pointer_up(&pointer_input(pointer)),
        (Hook::Cancel, Some(pointer)) => state.engine.pointer_cancel(Some(pointer.pointer_id())),
        (Hook::Blur, _) => state.engine.blur(),
        (Hook::Visibility, _) => {
            if state.document.visibility_state() != VisibilityState::Hidden {
                return;
            }
            state.engine.visibility_hidden()
        }
        _ => return,
    };
    state.apply(&dispatch, Some(event));
}

struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn register(
        target: EventTarget,
        kind: &'static str,
        hook: Hook,
        shared: &Rc<RefCell<Shared>>,
    ) -> Result<Self, JsValue> {
        let shared = Rc::clone(shared);
        let closure = Closure::wrap(Box::new(move |event: Event| {
            handle(&shared, hook, &event);
        }) as Box<dyn FnMut(Event)>);
        // Non-passive so touch moves can be prevented.
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self {
            target,
            kind,
            closure,
        })
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn unregister(&self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref())
        {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = ?err, kind = self.kind, "dragpan.unregister_failed");
        }
    }
}

/// Grab-to-scroll panning and free item dragging for one container.
#[wasm_bindgen]
pub struct DragPan {
    shared: Rc<RefCell<Shared>>,
    listeners: Vec<Listener>,
    style: Option<Element>,
}

#[wasm_bindgen]
impl DragPan {
    /// Attach to the container matched by `options.containerSelector`.
    ///
    /// Returns `undefined` when no container matches.
    pub fn attach(options: JsValue) -> Result<Option<DragPan>, JsValue> {
        let json = if options.is_undefined() || options.is_null() {
            String::new()
        } else {
            String::from(js_sys::JSON::stringify(&options)?)
        };
        let config = BindingConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let Some(container) = document.query_selector(&config.container_selector)? else {
            #[cfg(feature = "tracing")]
            tracing::info!(selector = %config.container_selector, "dragpan.attach.no_container");
            return Ok(None);
        };
        let container: HtmlElement = container
            .dyn_into()
            .map_err(|_| JsValue::from_str("container is not an HTML element"))?;

        // Pinned items are positioned against the container.
        if let Some(computed) = window.get_computed_style(&container)?
            && computed.get_property_value("position")? == "static"
        {
            container.style().set_property("position", "relative")?;
        }

        let style = if config.inject_styles {
            let element = document.create_element("style")?;
            element.set_text_content(Some(&stylesheet(&config)));
            if let Some(head) = document.head() {
                head.append_child(&element)?;
            }
            Some(element)
        } else {
            None
        };

        let gesture_config = config.gesture_config();
        let engine = if config.record_trace {
            Engine::Recording(
                GestureRecorder::new(gesture_config).map_err(|e| JsValue::from_str(&e.to_string()))?,
            )
        } else {
            Engine::Live(
                GestureCoordinator::new(gesture_config).map_err(|e| JsValue::from_str(&e.to_string()))?,
            )
        };

        if let Some(flag) = &config.global_flag {
            Reflect::set(window.as_ref(), &JsValue::from_str(flag), &JsValue::FALSE)?;
        }

        #[cfg(feature = "tracing")]
        tracing::info!(
            selector = %config.container_selector,
            record_trace = config.record_trace,
            "dragpan.attach"
        );

        let container_target: EventTarget = container.clone().into();
        let document_target: EventTarget = document.clone().into();
        let window_target: EventTarget = window.clone().into();
        let shared = Rc::new(RefCell::new(Shared {
            config,
            window,
            document,
            container,
            engine,
            items: Vec::new(),
        }));

        let bindings = [
            (container_target, "pointerdown", Hook::Down),
            (document_target.clone(), "pointermove", Hook::Move),
            (document_target.clone(), "pointerup", Hook::Up),
            (document_target.clone(), "pointercancel", Hook::Cancel),
            (document_target, "visibilitychange", Hook::Visibility),
            (window_target, "blur", Hook::Blur),
        ];
        let mut listeners = Vec::with_capacity(bindings.len());
        for (target, kind, hook) in bindings {
            match Listener::register(target, kind, hook, &shared) {
                Ok(listener) => listeners.push(listener),
                Err(err) => {
                    listeners.iter().for_each(Listener::unregister);
                    if let Some(style) = &style {
                        style.remove();
                    }
                    return Err(err);
                }
            }
        }

        Ok(Some(Self {
            shared,
            listeners,
            style,
        }))
    }

    /// Whether an item drag is in progress.
    #[wasm_bindgen(js_name = isItemDragActive)]
    pub fn is_item_drag_active(&self) -> bool {
        self.shared
            .try_borrow()
            .is_ok_and(|state| state.engine.coordinator().is_item_drag_active())
    }

    /// Whether a container pan is in progress.
    #[wasm_bindgen(js_name = isPanActive)]
    pub fn is_pan_active(&self) -> bool {
        self.shared.try_borrow().is_ok_and(|state| {
            state.engine.coordinator().arbiter().held() == Some(GestureKind::Pan)
        })
    }

    /// End any active gesture, remove every listener and the injected style.
    /// Calling it twice is harmless.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn detach(&mut self) {
        if let Ok(mut state) = self.shared.try_borrow_mut() {
            let dispatch = state.engine.reset();
            state.apply(&dispatch, None);
            if let Some(flag) = state.config.global_flag.clone()
                && let Err(err) =
                    Reflect::set(state.window.as_ref(), &JsValue::from_str(&flag), &JsValue::FALSE)
            {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = ?err, flag = %flag, "dragpan.flag_reset_failed");
            }
        }
        for listener in self.listeners.drain(..) {
            listener.unregister();
        }
        if let Some(style) = self.style.take() {
            style.remove();
        }
        #[cfg(feature = "tracing")]
        tracing::info!("dragpan.detach");
    }

    /// Drain the recorded gesture trace as JSON Lines.
    ///
    /// Each call returns a segment that replays on its own. Fails unless the
    /// instance was attached with `recordTrace: true`.
    #[wasm_bindgen(js_name = drainTraceJsonl)]
    pub fn drain_trace_jsonl(&mut self) -> Result<String, JsValue> {
        let mut state = self
            .shared
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("gesture handler is running"))?;
        match &mut state.engine {
            Engine::Recording(recorder) => recorder
                .drain_jsonl()
                .map_err(|e| JsValue::from_str(&e.to_string())),
            Engine::Live(_) => Err(JsValue::from_str("trace recording is disabled")),
        }
    }
}
