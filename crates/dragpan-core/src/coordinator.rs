#![forbid(unsafe_code)]

//! Gesture coordinator: one handler set, one session slot.
//!
//! [`GestureCoordinator`] receives every pointer lifecycle signal the host
//! observes (pointer-down on the container, document-scoped move / up /
//! cancel, window blur, document hidden) and dispatches internally on the
//! tagged [`ActiveSession`]. Each call returns a [`GestureDispatch`] carrying
//! the ordered [`HostCommand`]s the host must apply plus a structured
//! [`GestureLogEntry`].
//!
//! # Invariants
//!
//! 1. At most one session exists; the arbiter slot and the session variant
//!    always agree.
//! 2. Ignored inputs emit no commands and mutate nothing.
//! 3. Ending a session (release, cancel, blur, hidden) always emits the
//!    commands that undo its visual state and clears the item-drag flag.
//! 4. A release after the session ended is ignored (`NoActiveSession`).
//! 5. Moves never push an item outside `[0, extent - size]` and never set a
//!    negative scroll offset.
//!
//! # Failure Modes
//!
//! Geometry reads are sanitized; unreadable values degrade to zero instead of
//! failing the gesture.

use crate::arbiter::{GestureKind, SessionArbiter};
use crate::config::{GestureConfig, GestureConfigError};
use crate::geometry::Point;
use crate::item_drag::{ItemDragController, ItemDragState};
use crate::layout::{ContainerMetrics, LayoutProbe};
use crate::pan::{PanController, PanState};
use crate::pointer::{PointerChannel, PointerInput};
use crate::router::{GestureRouter, IgnoredReason, RouteDecision, RouteTarget};

/// The session slot.
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveSession<I> {
    Idle,
    Pan(PanState),
    ItemDrag(ItemDragState<I>),
}

impl<I> Default for ActiveSession<I> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<I> ActiveSession<I> {
    /// Kind of the active session, if any.
    #[must_use]
    pub fn kind(&self) -> Option<GestureKind> {
        match self {
            Self::Idle => None,
            Self::Pan(_) => Some(GestureKind::Pan),
            Self::ItemDrag(_) => Some(GestureKind::ItemDrag),
        }
    }

    #[must_use]
    pub fn channel(&self) -> Option<PointerChannel> {
        match self {
            Self::Idle => None,
            Self::Pan(state) => Some(state.channel),
            Self::ItemDrag(state) => Some(state.channel),
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Side effect the host must apply, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand<I> {
    /// Call `preventDefault()` on the event being handled.
    PreventDefault,
    /// Toggle the container's active/grabbing class.
    SetPanActive(bool),
    /// Toggle the document's no-selection class.
    SetSelectionSuppressed(bool),
    /// Set the container scroll offset on the given axes.
    ScrollTo { left: Option<f64>, top: Option<f64> },
    /// Switch the item to absolute positioning at `(left, top)`, clear its
    /// transform, raise it to `z_index` and disable native touch handling.
    PinItem {
        item: I,
        left: f64,
        top: f64,
        z_index: i32,
    },
    /// Update an absolutely positioned item.
    MoveItem { item: I, left: f64, top: f64 },
    /// Restore the item's default stacking order and touch handling. Its
    /// position stays as-is.
    UnpinItem { item: I },
    /// Publish the item-drag flag to the host page.
    SetDragFlag(bool),
}

/// Lifecycle phase recorded for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerCancel,
    Blur,
    VisibilityHidden,
    Reset,
}

impl GesturePhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PointerDown => "pointer_down",
            Self::PointerMove => "pointer_move",
            Self::PointerUp => "pointer_up",
            Self::PointerCancel => "pointer_cancel",
            Self::Blur => "blur",
            Self::VisibilityHidden => "visibility_hidden",
            Self::Reset => "reset",
        }
    }
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// Pointer released.
    Released,
    /// Host cancelled the pointer stream.
    Cancelled,
    /// Window blur or document hidden.
    FocusLost,
    /// Forced by [`GestureCoordinator::reset`].
    Reset,
}

impl EndReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Released => "released",
            Self::Cancelled => "cancelled",
            Self::FocusLost => "focus_lost",
            Self::Reset => "reset",
        }
    }
}

/// Outcome category for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureOutcome {
    Started(GestureKind),
    Updated(GestureKind),
    Ended(GestureKind, EndReason),
    Ignored(IgnoredReason),
}

/// Structured log record for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureLogEntry {
    pub phase: GesturePhase,
    /// Sequence number; present only when the dispatch changed state.
    pub sequence: Option<u64>,
    pub pointer_id: Option<i32>,
    pub outcome: GestureOutcome,
}

/// Result of one lifecycle call.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureDispatch<I> {
    pub commands: Vec<HostCommand<I>>,
    pub log: GestureLogEntry,
}

impl<I> GestureDispatch<I> {
    fn ignored(phase: GesturePhase, reason: IgnoredReason, pointer_id: Option<i32>) -> Self {
        Self {
            commands: Vec::new(),
            log: GestureLogEntry {
                phase,
                sequence: None,
                pointer_id,
                outcome: GestureOutcome::Ignored(reason),
            },
        }
    }

    /// Whether the dispatch was ignored.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self.log.outcome, GestureOutcome::Ignored(_))
    }

    /// Whether the host should call `preventDefault()`.
    #[must_use]
    pub fn prevents_default(&self) -> bool {
        self.commands
            .iter()
            .any(|command| matches!(command, HostCommand::PreventDefault))
    }
}

/// Deterministic gesture coordinator over item handles `I`.
#[derive(Debug, Clone)]
pub struct GestureCoordinator<I> {
    config: GestureConfig,
    router: GestureRouter,
    pan: PanController,
    item_drag: ItemDragController,
    arbiter: SessionArbiter,
    session: ActiveSession<I>,
    next_sequence: u64,
}

impl<I: Clone + PartialEq + core::fmt::Debug> GestureCoordinator<I> {
    /// Construct a coordinator with a validated configuration.
    pub fn new(config: GestureConfig) -> Result<Self, GestureConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            router: GestureRouter::new(config.pan_enabled, config.item_drag_enabled),
            pan: PanController::new(config.pan_axes),
            item_drag: ItemDragController::new(config.clamp_bounds, config.front_z_index),
            arbiter: SessionArbiter::new(),
            session: ActiveSession::Idle,
            next_sequence: 1,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Current session slot.
    #[must_use]
    pub const fn session(&self) -> &ActiveSession<I> {
        &self.session
    }

    #[must_use]
    pub const fn arbiter(&self) -> &SessionArbiter {
        &self.arbiter
    }

    /// The shared "an item drag is active" flag.
    #[must_use]
    pub const fn is_item_drag_active(&self) -> bool {
        self.arbiter.is_item_drag_active()
    }

    /// Handle a pointer-down on the container.
    ///
    /// `target` is the resolved target (see
    /// [`resolve_target`](crate::router::resolve_target)).
    pub fn pointer_down(
        &mut self,
        input: &PointerInput,
        target: RouteTarget<I>,
        layout: &impl LayoutProbe<I>,
    ) -> GestureDispatch<I> {
        let phase = GesturePhase::PointerDown;
        let pointer_id = Some(input.pointer_id());
        if input.button != self.config.activation_button {
            return self.ignore(phase, IgnoredReason::ButtonNotAllowed, pointer_id);
        }

        match self.router.route(&self.arbiter, target) {
            RouteDecision::Ignore(reason) => self.ignore(phase, reason, pointer_id),
            RouteDecision::Pan => {
                if !self.arbiter.try_acquire(GestureKind::Pan) {
                    return self.ignore(phase, IgnoredReason::SessionInProgress, pointer_id);
                }
                let container = layout.container().sanitized();
                let state = self.pan.begin(input, &container);
                self.session = ActiveSession::Pan(state);
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    pointer_id = input.pointer_id(),
                    source = input.channel.source.as_str(),
                    origin_x = state.pointer_origin.x,
                    baseline_scroll = state.baseline_scroll.x,
                    "gesture.pan.start"
                );
                self.forward(
                    phase,
                    pointer_id,
                    GestureOutcome::Started(GestureKind::Pan),
                    vec![
                        HostCommand::PreventDefault,
                        HostCommand::SetPanActive(true),
                        HostCommand::SetSelectionSuppressed(true),
                    ],
                )
            }
            RouteDecision::ItemDrag(item) => {
                if !self.arbiter.try_acquire(GestureKind::ItemDrag) {
                    return self.ignore(phase, IgnoredReason::SessionInProgress, pointer_id);
                }
                let container = layout.container().sanitized();
                let item_rect = layout.item_rect(&item);
                let (state, pin) = self.item_drag.begin(item, input, &container, item_rect);
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    pointer_id = input.pointer_id(),
                    source = input.channel.source.as_str(),
                    left = pin.position.x,
                    top = pin.position.y,
                    "gesture.item_drag.start"
                );
                let commands = vec![
                    HostCommand::PreventDefault,
                    HostCommand::PinItem {
                        item: state.item.clone(),
                        left: pin.position.x,
                        top: pin.position.y,
                        z_index: pin.z_index,
                    },
                    HostCommand::SetSelectionSuppressed(true),
                    HostCommand::SetDragFlag(true),
                ];
                self.session = ActiveSession::ItemDrag(state);
                self.forward(
                    phase,
                    pointer_id,
                    GestureOutcome::Started(GestureKind::ItemDrag),
                    commands,
                )
            }
        }
    }

    /// Handle a document-scoped pointer-move.
    pub fn pointer_move(
        &mut self,
        input: &PointerInput,
        layout: &impl LayoutProbe<I>,
    ) -> GestureDispatch<I> {
        let phase = GesturePhase::PointerMove;
        let pointer_id = Some(input.pointer_id());
        if let Some(reason) = self.reject_foreign(input.channel) {
            return self.ignore(phase, reason, pointer_id);
        }

        let (kind, commands) = match &mut self.session {
            ActiveSession::Idle => {
                return self.ignore(phase, IgnoredReason::NoActiveSession, pointer_id);
            }
            ActiveSession::Pan(state) => {
                let request = self.pan.update(state, input);
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    left = ?request.left,
                    top = ?request.top,
                    "gesture.pan.update"
                );
                (
                    GestureKind::Pan,
                    vec![
                        HostCommand::PreventDefault,
                        HostCommand::ScrollTo {
                            left: request.left,
                            top: request.top,
                        },
                    ],
                )
            }
            ActiveSession::ItemDrag(state) => {
                let container: ContainerMetrics = layout.container().sanitized();
                let position: Point = self.item_drag.update(state, input, &container);
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    left = position.x,
                    top = position.y,
                    "gesture.item_drag.update"
                );
                (
                    GestureKind::ItemDrag,
                    vec![
                        HostCommand::PreventDefault,
                        HostCommand::MoveItem {
                            item: state.item.clone(),
                            left: position.x,
                            top: position.y,
                        },
                    ],
                )
            }
        };
        self.forward(phase, pointer_id, GestureOutcome::Updated(kind), commands)
    }

    /// Handle a document-scoped pointer-up.
    pub fn pointer_up(&mut self, input: &PointerInput) -> GestureDispatch<I> {
        let phase = GesturePhase::PointerUp;
        if let Some(reason) = self.reject_foreign(input.channel) {
            return self.ignore(phase, reason, Some(input.pointer_id()));
        }
        self.end_session(phase, EndReason::Released)
    }

    /// Handle a pointer-cancel. `None` cancels whatever pointer is active.
    pub fn pointer_cancel(&mut self, pointer_id: Option<i32>) -> GestureDispatch<I> {
        let phase = GesturePhase::PointerCancel;
        let Some(active) = self.session.channel() else {
            return self.ignore(phase, IgnoredReason::NoActiveSession, pointer_id);
        };
        match pointer_id {
            Some(id) if id != active.pointer_id => {
                return self.ignore(phase, IgnoredReason::PointerMismatch, Some(id));
            }
            _ => {}
        }
        self.end_session(phase, EndReason::Cancelled)
    }

    /// Handle window blur: an implicit release of any active session.
    pub fn blur(&mut self) -> GestureDispatch<I> {
        self.end_session(GesturePhase::Blur, EndReason::FocusLost)
    }

    /// Handle the document becoming hidden (tab switch, minimize).
    pub fn visibility_hidden(&mut self) -> GestureDispatch<I> {
        self.end_session(GesturePhase::VisibilityHidden, EndReason::FocusLost)
    }

    /// Force a clean termination of any active session.
    pub fn reset(&mut self) -> GestureDispatch<I> {
        self.end_session(GesturePhase::Reset, EndReason::Reset)
    }

    fn reject_foreign(&self, channel: PointerChannel) -> Option<IgnoredReason> {
        match self.session.channel() {
            None => Some(IgnoredReason::NoActiveSession),
            Some(active) if active != channel => Some(IgnoredReason::PointerMismatch),
            Some(_) => None,
        }
    }

    fn end_session(&mut self, phase: GesturePhase, reason: EndReason) -> GestureDispatch<I> {
        let session = core::mem::replace(&mut self.session, ActiveSession::Idle);
        let pointer_id = session.channel().map(|channel| channel.pointer_id);
        let (kind, commands) = match session {
            ActiveSession::Idle => {
                return self.ignore(phase, IgnoredReason::NoActiveSession, None);
            }
            ActiveSession::Pan(_) => (
                GestureKind::Pan,
                vec![
                    HostCommand::SetPanActive(false),
                    HostCommand::SetSelectionSuppressed(false),
                ],
            ),
            ActiveSession::ItemDrag(state) => (
                GestureKind::ItemDrag,
                vec![
                    HostCommand::UnpinItem { item: state.item },
                    HostCommand::SetSelectionSuppressed(false),
                    HostCommand::SetDragFlag(false),
                ],
            ),
        };
        let released = self.arbiter.release();
        debug_assert_eq!(released, Some(kind), "arbiter slot out of sync with session");
        #[cfg(feature = "tracing")]
        tracing::debug!(
            kind = kind.as_str(),
            reason = reason.as_str(),
            phase = phase.as_str(),
            "gesture.end"
        );
        self.forward(
            phase,
            pointer_id,
            GestureOutcome::Ended(kind, reason),
            commands,
        )
    }

    fn ignore(
        &self,
        phase: GesturePhase,
        reason: IgnoredReason,
        pointer_id: Option<i32>,
    ) -> GestureDispatch<I> {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            phase = phase.as_str(),
            reason = reason.as_str(),
            pointer_id = ?pointer_id,
            "gesture.ignored"
        );
        GestureDispatch::ignored(phase, reason, pointer_id)
    }

    fn forward(
        &mut self,
        phase: GesturePhase,
        pointer_id: Option<i32>,
        outcome: GestureOutcome,
        commands: Vec<HostCommand<I>>,
    ) -> GestureDispatch<I> {
        GestureDispatch {
            commands,
            log: GestureLogEntry {
                phase,
                sequence: Some(self.next_sequence()),
                pointer_id,
                outcome,
            },
        }
    }

    fn next_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);
        sequence
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ActiveSession, EndReason, GestureCoordinator, GestureOutcome, GesturePhase, HostCommand,
    };
    use crate::arbiter::GestureKind;
    use crate::config::GestureConfig;
    use crate::geometry::{Rect, Size};
    use crate::layout::{ContainerMetrics, LayoutProbe};
    use crate::pointer::{PointerButton, PointerInput};
    use crate::router::{IgnoredReason, RouteTarget};

    struct Fixed {
        container: ContainerMetrics,
        item: Rect,
    }

    impl LayoutProbe<u32> for Fixed {
        fn container(&self) -> ContainerMetrics {
            self.container
        }

        fn item_rect(&self, _item: &u32) -> Rect {
            self.item
        }
    }

    fn layout() -> Fixed {
        Fixed {
            container: ContainerMetrics {
                scroll_size: Size::new(1200.0, 200.0),
                ..ContainerMetrics::from_rect(Rect::new(0.0, 0.0, 400.0, 200.0))
            },
            item: Rect::new(50.0, 20.0, 40.0, 30.0),
        }
    }

    fn coordinator() -> GestureCoordinator<u32> {
        GestureCoordinator::new(GestureConfig::default()).expect("default config is valid")
    }

    #[test]
    fn background_press_starts_pan() {
        let mut gestures = coordinator();
        let dispatch =
            gestures.pointer_down(&PointerInput::mouse(100.0, 50.0), RouteTarget::Background, &layout());
        assert_eq!(
            dispatch.commands,
            vec![
                HostCommand::PreventDefault,
                HostCommand::SetPanActive(true),
                HostCommand::SetSelectionSuppressed(true),
            ]
        );
        assert_eq!(dispatch.log.outcome, GestureOutcome::Started(GestureKind::Pan));
        assert_eq!(dispatch.log.sequence, Some(1));
        assert!(matches!(gestures.session(), ActiveSession::Pan(_)));
        assert!(!gestures.is_item_drag_active());
    }

    #[test]
    fn item_press_pins_and_raises_flag() {
        let mut gestures = coordinator();
        let dispatch = gestures.pointer_down(
            &PointerInput::mouse(60.0, 30.0),
            RouteTarget::Item(7),
            &layout(),
        );
        assert_eq!(
            dispatch.commands,
            vec![
                HostCommand::PreventDefault,
                HostCommand::PinItem {
                    item: 7,
                    left: 50.0,
                    top: 20.0,
                    z_index: 1000,
                },
                HostCommand::SetSelectionSuppressed(true),
                HostCommand::SetDragFlag(true),
            ]
        );
        assert!(gestures.is_item_drag_active());
    }

    #[test]
    fn second_press_during_session_is_ignored() {
        let mut gestures = coordinator();
        gestures.pointer_down(&PointerInput::mouse(60.0, 30.0), RouteTarget::Item(1), &layout());
        let dispatch =
            gestures.pointer_down(&PointerInput::touch(9, 10.0, 10.0), RouteTarget::Background, &layout());
        assert!(dispatch.is_ignored());
        assert!(dispatch.commands.is_empty());
        assert_eq!(
            dispatch.log.outcome,
            GestureOutcome::Ignored(IgnoredReason::ItemDragActive)
        );
        assert_eq!(dispatch.log.sequence, None);
    }

    #[test]
    fn non_primary_button_is_ignored() {
        let mut gestures = coordinator();
        let input = PointerInput::mouse(10.0, 10.0).with_button(PointerButton::Secondary);
        let dispatch = gestures.pointer_down(&input, RouteTarget::Background, &layout());
        assert_eq!(
            dispatch.log.outcome,
            GestureOutcome::Ignored(IgnoredReason::ButtonNotAllowed)
        );
        assert!(gestures.session().is_idle());
    }

    #[test]
    fn pan_move_scrolls_and_release_restores() {
        let mut gestures = coordinator();
        gestures.pointer_down(&PointerInput::mouse(100.0, 50.0), RouteTarget::Background, &layout());
        let moved = gestures.pointer_move(&PointerInput::mouse(60.0, 50.0), &layout());
        assert!(moved.prevents_default());
        assert!(moved.commands.contains(&HostCommand::ScrollTo {
            left: Some(40.0),
            top: None,
        }));
        assert_eq!(moved.log.outcome, GestureOutcome::Updated(GestureKind::Pan));

        let up = gestures.pointer_up(&PointerInput::mouse(60.0, 50.0));
        assert_eq!(
            up.commands,
            vec![
                HostCommand::SetPanActive(false),
                HostCommand::SetSelectionSuppressed(false),
            ]
        );
        assert_eq!(
            up.log.outcome,
            GestureOutcome::Ended(GestureKind::Pan, EndReason::Released)
        );
        assert!(gestures.arbiter().is_idle());
    }

    #[test]
    fn item_move_and_release() {
        let mut gestures = coordinator();
        gestures.pointer_down(&PointerInput::mouse(60.0, 30.0), RouteTarget::Item(3), &layout());
        let moved = gestures.pointer_move(&PointerInput::mouse(110.0, 40.0), &layout());
        assert_eq!(
            moved.commands[1],
            HostCommand::MoveItem {
                item: 3,
                left: 100.0,
                top: 30.0,
            }
        );
        let up = gestures.pointer_up(&PointerInput::mouse(110.0, 40.0));
        assert_eq!(
            up.commands,
            vec![
                HostCommand::UnpinItem { item: 3 },
                HostCommand::SetSelectionSuppressed(false),
                HostCommand::SetDragFlag(false),
            ]
        );
        assert!(!gestures.is_item_drag_active());
        match gestures.session() {
            ActiveSession::Idle => {}
            other => panic!("expected idle, got {other:?}"),
        }
    }

    #[test]
    fn release_is_idempotent() {
        let mut gestures = coordinator();
        gestures.pointer_down(&PointerInput::mouse(60.0, 30.0), RouteTarget::Item(3), &layout());
        gestures.pointer_up(&PointerInput::mouse(60.0, 30.0));
        let again = gestures.pointer_up(&PointerInput::mouse(60.0, 30.0));
        assert!(again.commands.is_empty());
        assert_eq!(
            again.log.outcome,
            GestureOutcome::Ignored(IgnoredReason::NoActiveSession)
        );
        assert!(gestures.blur().is_ignored());
    }

    #[test]
    fn foreign_pointer_cannot_drive_session() {
        let mut gestures = coordinator();
        gestures.pointer_down(&PointerInput::touch(4, 100.0, 50.0), RouteTarget::Background, &layout());
        let moved = gestures.pointer_move(&PointerInput::touch(5, 0.0, 50.0), &layout());
        assert_eq!(
            moved.log.outcome,
            GestureOutcome::Ignored(IgnoredReason::PointerMismatch)
        );
        assert!(gestures.pointer_cancel(Some(5)).is_ignored());
        let cancelled = gestures.pointer_cancel(Some(4));
        assert_eq!(
            cancelled.log.outcome,
            GestureOutcome::Ended(GestureKind::Pan, EndReason::Cancelled)
        );
    }

    #[test]
    fn blur_and_hidden_end_sessions() {
        let mut gestures = coordinator();
        gestures.pointer_down(&PointerInput::mouse(60.0, 30.0), RouteTarget::Item(3), &layout());
        let blurred = gestures.blur();
        assert_eq!(blurred.log.phase, GesturePhase::Blur);
        assert_eq!(
            blurred.log.outcome,
            GestureOutcome::Ended(GestureKind::ItemDrag, EndReason::FocusLost)
        );
        assert!(!gestures.is_item_drag_active());

        gestures.pointer_down(&PointerInput::mouse(100.0, 50.0), RouteTarget::Background, &layout());
        let hidden = gestures.visibility_hidden();
        assert_eq!(hidden.log.phase, GesturePhase::VisibilityHidden);
        assert!(hidden.commands.contains(&HostCommand::SetPanActive(false)));
        assert!(gestures.session().is_idle());
    }

    #[test]
    fn reset_forces_idle() {
        let mut gestures = coordinator();
        gestures.pointer_down(&PointerInput::mouse(60.0, 30.0), RouteTarget::Item(3), &layout());
        let reset = gestures.reset();
        assert_eq!(
            reset.log.outcome,
            GestureOutcome::Ended(GestureKind::ItemDrag, EndReason::Reset)
        );
        assert!(gestures.reset().is_ignored());
    }

    #[test]
    fn sequence_advances_only_on_state_changes() {
        let mut gestures = coordinator();
        gestures.pointer_up(&PointerInput::mouse(0.0, 0.0));
        let down =
            gestures.pointer_down(&PointerInput::mouse(100.0, 50.0), RouteTarget::Background, &layout());
        let moved = gestures.pointer_move(&PointerInput::mouse(90.0, 50.0), &layout());
        let up = gestures.pointer_up(&PointerInput::mouse(90.0, 50.0));
        assert_eq!(down.log.sequence, Some(1));
        assert_eq!(moved.log.sequence, Some(2));
        assert_eq!(up.log.sequence, Some(3));
    }

    #[test]
    fn outside_and_disabled_targets_are_ignored() {
        let mut gestures = GestureCoordinator::<u32>::new(GestureConfig {
            item_drag_enabled: false,
            ..GestureConfig::default()
        })
        .expect("pan-only config is valid");
        let outside =
            gestures.pointer_down(&PointerInput::mouse(0.0, 0.0), RouteTarget::Outside, &layout());
        assert_eq!(
            outside.log.outcome,
            GestureOutcome::Ignored(IgnoredReason::TargetOutsideContainer)
        );
        let item = gestures.pointer_down(&PointerInput::mouse(0.0, 0.0), RouteTarget::Item(1), &layout());
        assert_eq!(
            item.log.outcome,
            GestureOutcome::Ignored(IgnoredReason::ItemDragDisabled)
        );
        assert!(gestures.pointer_move(&PointerInput::mouse(5.0, 5.0), &layout()).is_ignored());
    }
}
