#![forbid(unsafe_code)]

//! Deterministic gesture recording and replay.
//!
//! [`GestureRecorder`] wraps a [`GestureCoordinator`] and records every
//! lifecycle call together with the geometry the coordinator read while
//! handling it, plus the outcome it produced. [`replay`] feeds the recorded
//! calls through a fresh coordinator and reports the first outcome that
//! diverges.
//!
//! Traces are JSON Lines, one [`TraceRecord`] per line:
//!
//! - **header**: schema and the gesture configuration (must be first).
//!   Segments cut by [`GestureRecorder::drain_jsonl`] after the first also
//!   carry a [`TraceResume`]: the dispatch count and checksum chain so far,
//!   and the pointer-down that opened any session still active at the cut.
//!   Every segment therefore replays on its own.
//! - **down / move / up / cancel / blur / hidden / reset**: one per call.
//! - **outcome**: the dispatch log that call produced.
//! - **summary**: dispatch count and the outcome checksum chain.
//!
//! Items are recorded by a stable numeric id ([`TraceItem::trace_id`]) so a
//! replay can run against `u32` handles with no DOM.

use std::cell::Cell;

use dragpan_core::{
    ContainerMetrics, GestureConfig, GestureConfigError, GestureCoordinator,
    GestureDispatch, GestureLogEntry, GestureOutcome, Insets, LayoutProbe, PanAxes, Point,
    PointerButton, PointerChannel, PointerInput, PointerSource, Rect, RouteTarget, Size,
};
use serde::{Deserialize, Serialize};

use crate::config::ClampBoundsOption;

/// Schema version for gesture traces.
pub const SCHEMA_VERSION: &str = "dragpan-trace-v1";

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

fn fnv1a64_bytes(mut hash: u64, bytes: &[u8]) -> u64 {
    for &b in bytes {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

fn chain(prev: u64, label: &str) -> u64 {
    let hash = fnv1a64_bytes(FNV_OFFSET_BASIS, &prev.to_le_bytes());
    fnv1a64_bytes(hash, label.as_bytes())
}

/// Item handle that can be written to a trace.
pub trait TraceItem: Clone + PartialEq + core::fmt::Debug {
    fn trace_id(&self) -> u32;
}

impl TraceItem for u32 {
    fn trace_id(&self) -> u32 {
        *self
    }
}

/// Stable label for a dispatch outcome, e.g. `pointer_down:started:pan`.
#[must_use]
pub fn outcome_label(log: &GestureLogEntry) -> String {
    let outcome = match log.outcome {
        GestureOutcome::Started(kind) => format!("started:{}", kind.as_str()),
        GestureOutcome::Updated(kind) => format!("updated:{}", kind.as_str()),
        GestureOutcome::Ended(kind, reason) => {
            format!("ended:{}:{}", kind.as_str(), reason.as_str())
        }
        GestureOutcome::Ignored(reason) => format!("ignored:{}", reason.as_str()),
    };
    format!("{}:{outcome}", log.phase.as_str())
}

// ── Wire types ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TracePointer {
    pub source: String,
    pub id: i32,
    pub button: u16,
    pub page_x: f64,
    pub page_y: f64,
    pub client_x: f64,
    pub client_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Container geometry, sanitized before it is written.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceContainer {
    pub rect: TraceRect,
    pub border_left: f64,
    pub border_top: f64,
    pub scroll_left: f64,
    pub scroll_top: f64,
    pub client_width: f64,
    pub client_height: f64,
    pub scroll_width: f64,
    pub scroll_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "item", rename_all = "snake_case")]
pub enum TraceTarget {
    Background,
    Item(u32),
    Outside,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceConfig {
    pub pan_horizontal: bool,
    pub pan_vertical: bool,
    pub clamp_bounds: ClampBoundsOption,
    pub front_z_index: i32,
    pub pan_enabled: bool,
    pub item_drag_enabled: bool,
}

/// Pointer-down that opened a session, as read at the time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStart {
    pub pointer: TracePointer,
    pub target: TraceTarget,
    pub container: Option<TraceContainer>,
    pub item_rect: Option<TraceRect>,
}

/// State carried across a segment boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceResume {
    /// Dispatches recorded in earlier segments.
    pub dispatches: u64,
    /// Checksum chain at the end of the previous segment.
    pub checksum_chain: u64,
    /// Set when a session was active at the cut.
    pub session: Option<SessionStart>,
}

/// A single record in a gesture trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceRecord {
    Header {
        schema: String,
        config: TraceConfig,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        resume: Option<TraceResume>,
    },
    Down {
        pointer: TracePointer,
        target: TraceTarget,
        container: Option<TraceContainer>,
        /// `None` when the item's bounding box was unreadable.
        item_rect: Option<TraceRect>,
    },
    Move {
        pointer: TracePointer,
        container: Option<TraceContainer>,
    },
    Up {
        pointer: TracePointer,
    },
    Cancel {
        pointer_id: Option<i32>,
    },
    Blur,
    Hidden,
    Reset,
    Outcome {
        sequence: Option<u64>,
        label: String,
    },
    Summary {
        dispatches: u64,
        checksum_chain: u64,
    },
}

/// A complete gesture trace.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureTrace {
    pub records: Vec<TraceRecord>,
}

impl GestureTrace {
    /// Serialize as JSON Lines.
    pub fn to_jsonl(&self) -> Result<String, TraceError> {
        records_to_jsonl(&self.records)
    }

    /// Parse JSON Lines. Blank lines are skipped.
    pub fn from_jsonl(input: &str) -> Result<Self, TraceError> {
        let mut records = Vec::new();
        for (idx, line) in input.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(line).map_err(|err| TraceError::Json {
                line: idx + 1,
                message: err.to_string(),
            })?;
            records.push(record);
        }
        Ok(Self { records })
    }

    /// Number of outcome records.
    pub fn dispatch_count(&self) -> u64 {
        self.records
            .iter()
            .filter(|r| matches!(r, TraceRecord::Outcome { .. }))
            .count() as u64
    }

    /// Checksum chain from the summary record.
    pub fn final_checksum_chain(&self) -> Option<u64> {
        self.records.iter().rev().find_map(|r| match r {
            TraceRecord::Summary { checksum_chain, .. } => Some(*checksum_chain),
            _ => None,
        })
    }
}

fn records_to_jsonl(records: &[TraceRecord]) -> Result<String, TraceError> {
    let mut out = String::new();
    for record in records {
        let line = serde_json::to_string(record).map_err(|err| TraceError::Json {
            line: 0,
            message: err.to_string(),
        })?;
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

// ── Conversions ─────────────────────────────────────────────────────────

fn pointer_record(input: &PointerInput) -> TracePointer {
    let page = input.page.sanitized();
    let client = input.client.sanitized();
    TracePointer {
        source: input.channel.source.as_str().to_owned(),
        id: input.channel.pointer_id,
        button: button_code(input.button),
        page_x: page.x,
        page_y: page.y,
        client_x: client.x,
        client_y: client.y,
    }
}

fn button_code(button: PointerButton) -> u16 {
    match button {
        PointerButton::Primary => 0,
        PointerButton::Auxiliary => 1,
        PointerButton::Secondary => 2,
        PointerButton::Other(code) => code,
    }
}

fn pointer_input(record: &TracePointer) -> PointerInput {
    let channel = PointerChannel::new(PointerSource::from_pointer_type(&record.source), record.id);
    PointerInput::at(channel, record.client_x, record.client_y)
        .with_page(record.page_x, record.page_y)
        .with_button(PointerButton::from_dom_button(i16::try_from(record.button).unwrap_or(i16::MAX)))
}

fn rect_record(rect: Rect) -> Option<TraceRect> {
    rect.is_finite().then_some(TraceRect {
        x: rect.x,
        y: rect.y,
        width: rect.width,
        height: rect.height,
    })
}

fn rect_from(record: Option<TraceRect>) -> Rect {
    match record {
        Some(r) => Rect::new(r.x, r.y, r.width, r.height),
        None => Rect::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN),
    }
}

fn container_record(metrics: ContainerMetrics) -> TraceContainer {
    let m = metrics.sanitized();
    TraceContainer {
        rect: TraceRect {
            x: m.rect.x,
            y: m.rect.y,
            width: m.rect.width,
            height: m.rect.height,
        },
        border_left: m.border.left,
        border_top: m.border.top,
        scroll_left: m.scroll.x,
        scroll_top: m.scroll.y,
        client_width: m.client_size.width,
        client_height: m.client_size.height,
        scroll_width: m.scroll_size.width,
        scroll_height: m.scroll_size.height,
    }
}

fn container_from(record: &TraceContainer) -> ContainerMetrics {
    ContainerMetrics {
        rect: rect_from(Some(record.rect)),
        border: Insets::new(record.border_top, 0.0, 0.0, record.border_left),
        scroll: Point::new(record.scroll_left, record.scroll_top),
        client_size: Size::new(record.client_width, record.client_height),
        scroll_size: Size::new(record.scroll_width, record.scroll_height),
    }
}

fn config_record(config: &GestureConfig) -> TraceConfig {
    TraceConfig {
        pan_horizontal: config.pan_axes.contains(PanAxes::HORIZONTAL),
        pan_vertical: config.pan_axes.contains(PanAxes::VERTICAL),
        clamp_bounds: config.clamp_bounds.into(),
        front_z_index: config.front_z_index,
        pan_enabled: config.pan_enabled,
        item_drag_enabled: config.item_drag_enabled,
    }
}

fn config_from(record: &TraceConfig) -> GestureConfig {
    let mut pan_axes = PanAxes::empty();
    pan_axes.set(PanAxes::HORIZONTAL, record.pan_horizontal);
    pan_axes.set(PanAxes::VERTICAL, record.pan_vertical);
    GestureConfig {
        pan_axes,
        clamp_bounds: record.clamp_bounds.into(),
        front_z_index: record.front_z_index,
        pan_enabled: record.pan_enabled,
        item_drag_enabled: record.item_drag_enabled,
        ..GestureConfig::default()
    }
}

fn target_from(record: TraceTarget) -> RouteTarget<u32> {
    match record {
        TraceTarget::Background => RouteTarget::Background,
        TraceTarget::Item(id) => RouteTarget::Item(id),
        TraceTarget::Outside => RouteTarget::Outside,
    }
}

fn target_record<I: TraceItem>(target: &RouteTarget<I>) -> TraceTarget {
    match target {
        RouteTarget::Background => TraceTarget::Background,
        RouteTarget::Item(item) => TraceTarget::Item(item.trace_id()),
        RouteTarget::Outside => TraceTarget::Outside,
    }
}

// ── Recording ───────────────────────────────────────────────────────────

/// Layout probe wrapper that remembers what the coordinator read.
struct Observed<'a, P> {
    inner: &'a P,
    container: Cell<Option<ContainerMetrics>>,
    item_rect: Cell<Option<Rect>>,
}

impl<'a, P> Observed<'a, P> {
    fn new(inner: &'a P) -> Self {
        Self {
            inner,
            container: Cell::new(None),
            item_rect: Cell::new(None),
        }
    }
}

impl<I, P: LayoutProbe<I>> LayoutProbe<I> for Observed<'_, P> {
    fn container(&self) -> ContainerMetrics {
        let metrics = self.inner.container();
        self.container.set(Some(metrics));
        metrics
    }

    fn item_rect(&self, item: &I) -> Rect {
        let rect = self.inner.item_rect(item);
        self.item_rect.set(Some(rect));
        rect
    }
}

/// Records a gesture session for deterministic replay.
#[derive(Debug)]
pub struct GestureRecorder<I> {
    coordinator: GestureCoordinator<I>,
    config: TraceConfig,
    records: Vec<TraceRecord>,
    checksum_chain: u64,
    dispatches: u64,
    session_start: Option<SessionStart>,
}

impl<I: TraceItem> GestureRecorder<I> {
    /// Create a recorder around a fresh coordinator.
    pub fn new(config: GestureConfig) -> Result<Self, GestureConfigError> {
        let coordinator = GestureCoordinator::new(config)?;
        let config = config_record(&config);
        let records = vec![TraceRecord::Header {
            schema: SCHEMA_VERSION.to_owned(),
            config: config.clone(),
            resume: None,
        }];
        Ok(Self {
            coordinator,
            config,
            records,
            checksum_chain: 0,
            dispatches: 0,
            session_start: None,
        })
    }

    /// The wrapped coordinator.
    pub fn coordinator(&self) -> &GestureCoordinator<I> {
        &self.coordinator
    }

    pub fn pointer_down(
        &mut self,
        input: &PointerInput,
        target: RouteTarget<I>,
        layout: &impl LayoutProbe<I>,
    ) -> GestureDispatch<I> {
        let target_rec = target_record(&target);
        let observed = Observed::new(layout);
        let dispatch = self.coordinator.pointer_down(input, target, &observed);
        let start = SessionStart {
            pointer: pointer_record(input),
            target: target_rec,
            container: observed.container.get().map(container_record),
            item_rect: observed.item_rect.get().and_then(rect_record),
        };
        if matches!(dispatch.log.outcome, GestureOutcome::Started(_)) {
            self.session_start = Some(start.clone());
        }
        self.records.push(TraceRecord::Down {
            pointer: start.pointer,
            target: start.target,
            container: start.container,
            item_rect: start.item_rect,
        });
        self.record_outcome(&dispatch);
        dispatch
    }

    pub fn pointer_move(
        &mut self,
        input: &PointerInput,
        layout: &impl LayoutProbe<I>,
    ) -> GestureDispatch<I> {
        let observed = Observed::new(layout);
        let dispatch = self.coordinator.pointer_move(input, &observed);
        self.records.push(TraceRecord::Move {
            pointer: pointer_record(input),
            container: observed.container.get().map(container_record),
        });
        self.record_outcome(&dispatch);
        dispatch
    }

    pub fn pointer_up(&mut self, input: &PointerInput) -> GestureDispatch<I> {
        self.records.push(TraceRecord::Up {
            pointer: pointer_record(input),
        });
        let dispatch = self.coordinator.pointer_up(input);
        self.record_outcome(&dispatch);
        dispatch
    }

    pub fn pointer_cancel(&mut self, pointer_id: Option<i32>) -> GestureDispatch<I> {
        self.records.push(TraceRecord::Cancel { pointer_id });
        let dispatch = self.coordinator.pointer_cancel(pointer_id);
        self.record_outcome(&dispatch);
        dispatch
    }

    pub fn blur(&mut self) -> GestureDispatch<I> {
        self.records.push(TraceRecord::Blur);
        let dispatch = self.coordinator.blur();
        self.record_outcome(&dispatch);
        dispatch
    }

    pub fn visibility_hidden(&mut self) -> GestureDispatch<I> {
        self.records.push(TraceRecord::Hidden);
        let dispatch = self.coordinator.visibility_hidden();
        self.record_outcome(&dispatch);
        dispatch
    }

    pub fn reset(&mut self) -> GestureDispatch<I> {
        self.records.push(TraceRecord::Reset);
        let dispatch = self.coordinator.reset();
        self.record_outcome(&dispatch);
        dispatch
    }

    /// Serialize everything recorded so far, followed by a summary line,
    /// and start a new segment. The coordinator keeps its state; the new
    /// segment's header carries what replay needs to pick it up.
    pub fn drain_jsonl(&mut self) -> Result<String, TraceError> {
        let next = vec![TraceRecord::Header {
            schema: SCHEMA_VERSION.to_owned(),
            config: self.config.clone(),
            resume: Some(TraceResume {
                dispatches: self.dispatches,
                checksum_chain: self.checksum_chain,
                session: self.session_start.clone(),
            }),
        }];
        let mut records = core::mem::replace(&mut self.records, next);
        records.push(self.summary());
        records_to_jsonl(&records)
    }

    /// Finish recording and return the completed trace.
    pub fn finish(mut self) -> GestureTrace {
        let summary = self.summary();
        self.records.push(summary);
        GestureTrace {
            records: self.records,
        }
    }

    fn summary(&self) -> TraceRecord {
        TraceRecord::Summary {
            dispatches: self.dispatches,
            checksum_chain: self.checksum_chain,
        }
    }

    fn record_outcome(&mut self, dispatch: &GestureDispatch<I>) {
        let label = outcome_label(&dispatch.log);
        self.checksum_chain = chain(self.checksum_chain, &label);
        self.dispatches += 1;
        self.records.push(TraceRecord::Outcome {
            sequence: dispatch.log.sequence,
            label,
        });
        if self.coordinator.session().is_idle() {
            self.session_start = None;
        }
    }
}

// ── Replay ──────────────────────────────────────────────────────────────

/// Result of replaying a gesture trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayResult {
    pub dispatches: u64,
    pub checksum_chain: u64,
    pub first_mismatch: Option<ReplayMismatch>,
}

impl ReplayResult {
    /// Whether every outcome matched.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.first_mismatch.is_none()
    }
}

/// First outcome that diverged during replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayMismatch {
    /// Zero-based dispatch index.
    pub index: u64,
    pub expected: String,
    pub actual: String,
}

/// Trace parsing and replay errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    /// A line is not a valid record (`line` is 1-based; 0 when writing).
    Json { line: usize, message: String },
    /// The trace does not start with a header record.
    MissingHeader,
    /// The header's schema is not [`SCHEMA_VERSION`].
    UnsupportedSchema(String),
    /// The header's configuration is invalid.
    Config(GestureConfigError),
    /// The session recorded in the header's resume state did not reopen.
    ResumeFailed(String),
}

impl core::fmt::Display for TraceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json { line, message } => write!(f, "trace line {line}: {message}"),
            Self::MissingHeader => write!(f, "trace missing header record"),
            Self::UnsupportedSchema(schema) => write!(f, "unsupported trace schema: {schema}"),
            Self::Config(err) => write!(f, "trace configuration: {err}"),
            Self::ResumeFailed(label) => write!(f, "trace resume did not reopen the session: {label}"),
        }
    }
}

impl std::error::Error for TraceError {}

impl From<GestureConfigError> for TraceError {
    fn from(err: GestureConfigError) -> Self {
        Self::Config(err)
    }
}

#[derive(Default)]
struct ReplayProbe {
    container: ContainerMetrics,
    item_rect: Option<TraceRect>,
}

impl LayoutProbe<u32> for ReplayProbe {
    fn container(&self) -> ContainerMetrics {
        self.container
    }

    fn item_rect(&self, _item: &u32) -> Rect {
        rect_from(self.item_rect)
    }
}

/// Replay a trace through a fresh coordinator and compare outcomes.
pub fn replay(trace: &GestureTrace) -> Result<ReplayResult, TraceError> {
    let (config, resume) = match trace.records.first() {
        Some(TraceRecord::Header {
            schema,
            config,
            resume,
        }) => {
            if schema != SCHEMA_VERSION {
                return Err(TraceError::UnsupportedSchema(schema.clone()));
            }
            (config_from(config), resume.as_ref())
        }
        _ => return Err(TraceError::MissingHeader),
    };
    let mut coordinator = GestureCoordinator::<u32>::new(config)?;
    let mut probe = ReplayProbe::default();
    let mut pending: Option<String> = None;
    let mut dispatches = resume.map_or(0, |r| r.dispatches);
    let mut checksum_chain = resume.map_or(0, |r| r.checksum_chain);
    let mut first_mismatch = None;

    // Reopen the session that was active at the cut. Its outcome belongs to
    // an earlier segment and is not counted again.
    if let Some(start) = resume.and_then(|r| r.session.as_ref()) {
        if let Some(container) = &start.container {
            probe.container = container_from(container);
        }
        probe.item_rect = start.item_rect;
        let reopened =
            coordinator.pointer_down(&pointer_input(&start.pointer), target_from(start.target), &probe);
        if !matches!(reopened.log.outcome, GestureOutcome::Started(_)) {
            return Err(TraceError::ResumeFailed(outcome_label(&reopened.log)));
        }
    }

    for record in &trace.records {
        let dispatch = match record {
            TraceRecord::Down {
                pointer,
                target,
                container,
                item_rect,
            } => {
                if let Some(container) = container {
                    probe.container = container_from(container);
                }
                probe.item_rect = *item_rect;
                Some(coordinator.pointer_down(&pointer_input(pointer), target_from(*target), &probe))
            }
            TraceRecord::Move { pointer, container } => {
                if let Some(container) = container {
                    probe.container = container_from(container);
                }
                Some(coordinator.pointer_move(&pointer_input(pointer), &probe))
            }
            TraceRecord::Up { pointer } => Some(coordinator.pointer_up(&pointer_input(pointer))),
            TraceRecord::Cancel { pointer_id } => Some(coordinator.pointer_cancel(*pointer_id)),
            TraceRecord::Blur => Some(coordinator.blur()),
            TraceRecord::Hidden => Some(coordinator.visibility_hidden()),
            TraceRecord::Reset => Some(coordinator.reset()),
            TraceRecord::Outcome { label, .. } => {
                if let Some(actual) = pending.take()
                    && actual != *label
                    && first_mismatch.is_none()
                {
                    first_mismatch = Some(ReplayMismatch {
                        index: dispatches.saturating_sub(1),
                        expected: label.clone(),
                        actual,
                    });
                }
                None
            }
            TraceRecord::Header { .. } | TraceRecord::Summary { .. } => None,
        };
        if let Some(dispatch) = dispatch {
            let label = outcome_label(&dispatch.log);
            checksum_chain = chain(checksum_chain, &label);
            dispatches += 1;
            pending = Some(label);
        }
    }

    Ok(ReplayResult {
        dispatches,
        checksum_chain,
        first_mismatch,
    })
}
