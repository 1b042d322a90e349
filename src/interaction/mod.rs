//! The drag/move session controller and its collaborators.
//!
//! One [`InteractionController`] coordinates every pointer-driven interaction
//! in a widget tree: reorderable lists and trees, resizable panels, draggable
//! tabs and columns. At most one [`Session`] is active at a time; while it
//! is, the controller resolves the drop target under the pointer, dispatches
//! lifecycle events to it, runs registered tickers, and guarantees teardown
//! on every exit path.

use std::any::Any;
use std::collections::VecDeque;

use egui::{Modifiers, Pos2};

mod cues;
mod event;
mod options;
mod registry;
mod session;
mod viewport;

#[cfg(test)]
mod registry_tests;

pub use cues::{BorderCue, CueSet, GlyphCue, LineCue, ShadeCue};
pub use event::{Decision, DragEvent, DropPosition, EventKind, Glyph, PointerSnapshot};
pub use options::InteractionOptions;
pub use registry::{DropTarget, TargetRegistry};
pub use session::{AltMoveListener, ContextSlot, Session, StartOptions, TickerFn};
pub use viewport::Viewport;

use session::Ticker;

/// The four raw notification categories the host must feed the controller
/// (spatial/modifier normalization happens in the host adapter, once).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    PointerMoved { pos: Pos2, modifiers: Modifiers },
    PointerReleased { pos: Pos2, modifiers: Modifiers },
    FocusLost,
    CancelKey,
}

#[derive(Clone, Copy, Debug)]
enum Terminal {
    Drop,
    Cancel,
}

/// Owns the single drag/move session and the shared visual cues.
///
/// Construct one per widget tree and hand it (by reference) to every
/// interactive widget; there is deliberately no global instance. Widgets
/// register drop handlers in the [`TargetRegistry`], call [`start`] from a
/// drag gesture, and the host forwards raw input through [`handle`].
///
/// [`start`]: InteractionController::start
/// [`handle`]: InteractionController::handle
pub struct InteractionController {
    pub options: InteractionOptions,

    registry: TargetRegistry,
    cues: CueSet,
    session: Option<Session>,
    next_session_serial: u64,

    debug_log: VecDeque<String>,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self::new_with_options(InteractionOptions::default())
    }

    pub fn new_with_options(options: InteractionOptions) -> Self {
        let mut registry = TargetRegistry::default();
        for id in CueSet::element_ids() {
            registry.register_cue(id);
        }
        Self {
            options,
            registry,
            cues: CueSet::new(),
            session: None,
            next_session_serial: 1,
            debug_log: VecDeque::new(),
        }
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TargetRegistry {
        &mut self.registry
    }

    pub fn cues(&self) -> &CueSet {
        &self.cues
    }

    /// Consumers may reposition cues between dispatches; the controller
    /// resets them on target changes and at teardown.
    pub fn cues_mut(&mut self) -> &mut CueSet {
        &mut self.cues
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    /// True while the active session asked the host to suppress native
    /// text-selection/drag-image behavior.
    pub fn native_capture_suppressed(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(Session::suppress_native_capture)
    }

    /// Begins a session at `pointer`.
    ///
    /// Returns the session so the caller can seed per-consumer context
    /// before the first move arrives.
    ///
    /// # Panics
    /// If a session is already active. Starting over a live session is a
    /// caller bug, not a recoverable condition.
    pub fn start(&mut self, pointer: Pos2, modifiers: Modifiers, opts: StartOptions) -> &mut Session {
        assert!(
            self.session.is_none(),
            "InteractionController::start called while a session is active"
        );

        let id = self.next_session_serial.max(1);
        self.next_session_serial = id.saturating_add(1);

        let session = Session::new(id, pointer, modifiers, opts);
        if session.current_glyph.is_some() {
            self.cues.glyph.set(session.current_glyph);
            self.cues.glyph.follow(pointer + self.options.glyph_offset);
        }

        log::debug!("interaction session {id} started");
        Self::debug_push(
            &self.options,
            &mut self.debug_log,
            format!(
                "session START id={id} alt={} payload={}",
                session.move_listener.is_some(),
                session.payload.is_some()
            ),
        );

        self.session.insert(session)
    }

    /// Routes one raw host notification.
    pub fn handle(&mut self, event: HostEvent, viewport: &dyn Viewport) {
        match event {
            HostEvent::PointerMoved { pos, modifiers } => {
                self.on_pointer_moved(pos, modifiers, viewport);
            }
            HostEvent::PointerReleased { pos, modifiers } => {
                self.on_pointer_released(pos, modifiers);
            }
            HostEvent::FocusLost => self.on_focus_lost(),
            HostEvent::CancelKey => self.on_cancel_key(),
        }
    }

    /// Pointer-moved notification. Ignored while idle.
    pub fn on_pointer_moved(&mut self, pos: Pos2, modifiers: Modifiers, viewport: &dyn Viewport) {
        let glyph_offset = self.options.glyph_offset;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.pointer = pos;
        session.modifiers = modifiers;

        if session.move_listener.is_some() {
            // Alt-listener mode bypasses spatial dispatch entirely.
            Self::notify_listener(session, EventKind::Move);
            return;
        }

        if session.current_glyph.is_some() {
            self.cues.glyph.follow(pos + glyph_offset);
        }

        let raw = viewport.element_at(pos);
        if raw == session.previous_element {
            // Same raw element as last move: the target cannot have changed,
            // skip the upward walk.
            if let Some(target) = session.current_target {
                let decision = Self::dispatch(&mut self.registry, session, target, EventKind::Over);
                Self::apply_decision(&mut self.cues, session, target, decision, viewport);
            }
            return;
        }
        session.previous_element = raw;

        let resolved = raw.and_then(|element| self.registry.resolve_target(element));
        if resolved == session.current_target {
            if let Some(target) = session.current_target {
                let decision = Self::dispatch(&mut self.registry, session, target, EventKind::Over);
                Self::apply_decision(&mut self.cues, session, target, decision, viewport);
            }
            return;
        }

        // Target change: the old target is released before the new one is
        // entered, so at most one target is ever "current".
        if let Some(old) = session.current_target.take() {
            Self::dispatch(&mut self.registry, session, old, EventKind::Out);
        }
        self.cues.hide_highlights();
        session.current_glyph = session.start_glyph;
        self.cues.glyph.set(session.start_glyph);
        if session.start_glyph.is_some() {
            self.cues.glyph.follow(pos + glyph_offset);
        }
        session.vetoed = false;
        session.accepted = None;
        session.current_target = resolved;

        log::trace!("interaction session {} target={resolved:?}", session.id);

        if let Some(new) = resolved {
            let decision = Self::dispatch(&mut self.registry, session, new, EventKind::Enter);
            Self::apply_decision(&mut self.cues, session, new, decision, viewport);
        }
    }

    /// Pointer-released notification: drop on the current target, then tear
    /// down. Ignored while idle.
    pub fn on_pointer_released(&mut self, pos: Pos2, modifiers: Modifiers) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        session.pointer = pos;
        session.modifiers = modifiers;
        self.finish(&mut session, Terminal::Drop);
    }

    /// Aborts the active session. Safe to call while idle, so focus-lost and
    /// cancel-key handlers can forward here unconditionally.
    pub fn cancel(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        self.finish(&mut session, Terminal::Cancel);
    }

    pub fn on_focus_lost(&mut self) {
        self.cancel();
    }

    pub fn on_cancel_key(&mut self) {
        self.cancel();
    }

    /// Registers a periodic callback for the rest of the session; the first
    /// registration arms the interval. No-op while idle.
    ///
    /// Tickers receive a [`EventKind::Timer`] event with the session's live
    /// coordinates plus their registered `arg`; the cadence is
    /// [`InteractionOptions::ticker_interval`], but callers must only assume
    /// "periodic and bounded".
    pub fn add_ticker(
        &mut self,
        callback: impl FnMut(&DragEvent<'_>, &mut dyn Any) + 'static,
        arg: impl Any,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.tickers.push(Ticker {
            callback: Box::new(callback),
            arg: Box::new(arg),
        });
    }

    /// Drives the ticker interval. The host calls this with its current
    /// clock (seconds, any epoch) at least as often as it wants tickers to
    /// fire; missed intervals are replayed up to
    /// [`InteractionOptions::ticker_max_catch_up`].
    pub fn pump_tickers(&mut self, now: f64) {
        let interval = self.options.ticker_interval.max(0.001);
        let max_catch_up = self.options.ticker_max_catch_up.max(1);
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.tickers.is_empty() {
            return;
        }

        let next = *session.next_tick.get_or_insert(now + interval);
        if now < next {
            return;
        }

        let mut deadline = next;
        let mut fired = 0;
        while now >= deadline && fired < max_catch_up {
            Self::fire_tickers(session);
            deadline += interval;
            fired += 1;
        }
        session.next_tick = Some(deadline);
    }

    /// Updates the cursor glyph, or hides it entirely with `None`. The start
    /// glyph is restored automatically whenever the target changes.
    pub fn set_cursor_glyph(&mut self, glyph: Option<Glyph>) {
        let glyph_offset = self.options.glyph_offset;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.current_glyph = glyph;
        self.cues.glyph.set(glyph);
        match glyph {
            Some(_) => self.cues.glyph.follow(session.pointer + glyph_offset),
            None => self.cues.glyph.hide(),
        }
    }

    /// Paints the cue overlays. Call after the widgets, so cues draw on top.
    pub fn paint(&self, painter: &egui::Painter, visuals: &egui::Visuals) {
        self.cues.paint(painter, visuals);
    }

    // ------------------------------------------------------------------
    // Dispatch internals

    fn dispatch(
        registry: &mut TargetRegistry,
        session: &mut Session,
        target: egui::Id,
        kind: EventKind,
    ) -> Decision {
        let accepted = if kind == EventKind::Drop {
            session.accepted_position()
        } else {
            None
        };
        let Some(handler) = registry.handler_mut(target) else {
            return Decision::Proceed;
        };
        let event = DragEvent {
            kind,
            payload: session.payload.as_deref(),
            aux: session.aux.as_deref(),
            pointer: session.pointer,
            modifiers: session.modifiers,
            initial: session.initial,
            accepted,
        };
        let mut slot = ContextSlot {
            slot: session.context.entry(target).or_default(),
        };
        handler.on_drag_event(&event, &mut slot)
    }

    fn apply_decision(
        cues: &mut CueSet,
        session: &mut Session,
        target: egui::Id,
        decision: Decision,
        viewport: &dyn Viewport,
    ) {
        match decision {
            Decision::Proceed => {}
            Decision::Cancel => {
                session.vetoed = true;
                session.accepted = None;
                cues.hide_highlights();
            }
            Decision::AcceptAt(position) => {
                session.vetoed = false;
                session.accepted = Some(position);
                let Some(bounds) = viewport.bounds_of(target) else {
                    return;
                };
                match position {
                    DropPosition::Over => {
                        cues.line.hide();
                        cues.border.show_over(bounds);
                    }
                    DropPosition::Before => {
                        cues.border.hide();
                        cues.line.set_orientation(false, bounds.width());
                        cues.line.show_at(bounds.left(), bounds.top());
                    }
                    DropPosition::After => {
                        cues.border.hide();
                        cues.line.set_orientation(false, bounds.width());
                        cues.line.show_at(bounds.left(), bounds.bottom());
                    }
                }
            }
        }
    }

    fn notify_listener(session: &mut Session, kind: EventKind) {
        let event = DragEvent {
            kind,
            payload: session.payload.as_deref(),
            aux: session.aux.as_deref(),
            pointer: session.pointer,
            modifiers: session.modifiers,
            initial: session.initial,
            accepted: None,
        };
        if let Some(listener) = session.move_listener.as_mut() {
            listener(&event);
        }
    }

    fn fire_tickers(session: &mut Session) {
        let event = DragEvent {
            kind: EventKind::Timer,
            payload: session.payload.as_deref(),
            aux: session.aux.as_deref(),
            pointer: session.pointer,
            modifiers: session.modifiers,
            initial: session.initial,
            accepted: None,
        };
        for ticker in &mut session.tickers {
            (ticker.callback)(&event, ticker.arg.as_mut());
        }
    }

    /// Shared terminal path for drop and cancel. The session is already
    /// detached from the controller: listeners and the ticker interval are
    /// dead before any consumer code runs, so a panicking handler cannot
    /// leave a half-torn-down engine behind.
    fn finish(&mut self, session: &mut Session, terminal: Terminal) {
        session.tickers.clear();
        session.next_tick = None;
        self.cues.hide_all();

        let id = session.id;
        let kind_str;
        if session.move_listener.is_some() {
            let first = match terminal {
                Terminal::Drop => EventKind::Up,
                Terminal::Cancel => EventKind::Cancel,
            };
            kind_str = first.as_str();
            Self::notify_listener(session, first);
            Self::notify_listener(session, EventKind::End);
        } else {
            let kind = match terminal {
                Terminal::Drop => EventKind::Drop,
                Terminal::Cancel => EventKind::Cancel,
            };
            kind_str = kind.as_str();
            if let Some(target) = session.current_target {
                Self::dispatch(&mut self.registry, session, target, kind);
            }
        }

        log::debug!("interaction session {id} ended ({kind_str})");
        Self::debug_push(
            &self.options,
            &mut self.debug_log,
            format!("session END id={id} terminal={kind_str}"),
        );
    }

    // ------------------------------------------------------------------
    // Debug event log (in-memory, opt-in)

    fn debug_push(options: &InteractionOptions, log: &mut VecDeque<String>, message: String) {
        if !options.debug_event_log {
            return;
        }
        let cap = options.debug_event_log_capacity.clamp(1, 10_000);
        while log.len() >= cap {
            log.pop_front();
        }
        log.push_back(message);
    }

    pub fn debug_log_text(&self) -> String {
        self.debug_log
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn debug_log_clear(&mut self) {
        self.debug_log.clear();
    }
}

impl std::fmt::Debug for InteractionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractionController")
            .field("options", &self.options)
            .field("registry", &self.registry)
            .field("session", &self.session)
            .field("cues", &self.cues)
            .finish()
    }
}
