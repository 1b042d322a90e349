use std::any::Any;
use std::fmt;

use ahash::HashMap;
use egui::{Modifiers, Pos2};

use super::event::{DragEvent, DropPosition, Glyph, PointerSnapshot};

/// Callback invoked instead of spatial dispatch when a session runs in
/// alt-listener mode (splitter drags, dialog move/resize, column resize).
pub type AltMoveListener = Box<dyn FnMut(&DragEvent<'_>)>;

/// Periodic callback registered through
/// [`InteractionController::add_ticker`](super::InteractionController::add_ticker).
/// The second argument is the value registered alongside the callback.
pub type TickerFn = Box<dyn FnMut(&DragEvent<'_>, &mut dyn Any)>;

pub(super) struct Ticker {
    pub(super) callback: TickerFn,
    pub(super) arg: Box<dyn Any>,
}

/// Configuration for [`InteractionController::start`](super::InteractionController::start).
#[derive(Default)]
pub struct StartOptions {
    /// The value being dragged. `None` for pure pointer-tracking sessions.
    pub payload: Option<Box<dyn Any>>,
    /// Consumer metadata, read-only for the session's duration.
    pub aux: Option<Box<dyn Any>>,
    /// If set, the session bypasses spatial dispatch entirely and this
    /// listener receives raw move/up/cancel/end notifications.
    pub move_listener: Option<AltMoveListener>,
    /// Cursor glyph shown at session start; also the glyph restored whenever
    /// the target changes.
    pub glyph: Option<Glyph>,
    /// Ask the host to suppress its native text-selection/drag-image
    /// behavior for the gesture's duration (see
    /// [`InteractionController::native_capture_suppressed`](super::InteractionController::native_capture_suppressed)).
    pub suppress_native_capture: bool,
}

impl StartOptions {
    pub fn payload(mut self, payload: impl Any) -> Self {
        self.payload = Some(Box::new(payload));
        self
    }

    pub fn aux(mut self, aux: impl Any) -> Self {
        self.aux = Some(Box::new(aux));
        self
    }

    pub fn move_listener(mut self, listener: impl FnMut(&DragEvent<'_>) + 'static) -> Self {
        self.move_listener = Some(Box::new(listener));
        self
    }

    pub fn glyph(mut self, glyph: Glyph) -> Self {
        self.glyph = Some(glyph);
        self
    }

    pub fn suppress_native_capture(mut self) -> Self {
        self.suppress_native_capture = true;
        self
    }
}

/// One pointer-driven interaction, from `start` to teardown.
///
/// At most one session exists per controller at any instant. All top-level
/// fields are controller-owned; consumers only mutate their own
/// [`ContextSlot`].
pub struct Session {
    pub(super) id: u64,
    pub(super) payload: Option<Box<dyn Any>>,
    pub(super) aux: Option<Box<dyn Any>>,
    pub(super) context: HashMap<egui::Id, Option<Box<dyn Any>>>,
    pub(super) current_target: Option<egui::Id>,
    /// Last raw element seen by the resolver; identity-checked before the
    /// upward walk is repeated.
    pub(super) previous_element: Option<egui::Id>,
    pub(super) tickers: Vec<Ticker>,
    /// Absolute time (seconds) of the next ticker fire; armed lazily on the
    /// first pump after a ticker is registered.
    pub(super) next_tick: Option<f64>,
    pub(super) start_glyph: Option<Glyph>,
    pub(super) current_glyph: Option<Glyph>,
    pub(super) move_listener: Option<AltMoveListener>,
    pub(super) pointer: Pos2,
    pub(super) modifiers: Modifiers,
    pub(super) initial: PointerSnapshot,
    pub(super) vetoed: bool,
    pub(super) accepted: Option<DropPosition>,
    pub(super) suppress_native_capture: bool,
}

impl Session {
    pub(super) fn new(id: u64, pointer: Pos2, modifiers: Modifiers, opts: StartOptions) -> Self {
        Self {
            id,
            payload: opts.payload,
            aux: opts.aux,
            context: HashMap::default(),
            current_target: None,
            previous_element: None,
            tickers: Vec::new(),
            next_tick: None,
            start_glyph: opts.glyph,
            current_glyph: opts.glyph,
            move_listener: opts.move_listener,
            pointer,
            modifiers,
            initial: PointerSnapshot { pointer, modifiers },
            vetoed: false,
            accepted: None,
            suppress_native_capture: opts.suppress_native_capture,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Live pointer position in global coordinates.
    pub fn pointer(&self) -> Pos2 {
        self.pointer
    }

    /// Live modifier-key state.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Pointer/modifier snapshot taken at `start`.
    pub fn initial(&self) -> PointerSnapshot {
        self.initial
    }

    pub fn payload_as<T: 'static>(&self) -> Option<&T> {
        self.payload.as_deref()?.downcast_ref()
    }

    pub fn aux_as<T: 'static>(&self) -> Option<&T> {
        self.aux.as_deref()?.downcast_ref()
    }

    /// The consumer currently considered "under the pointer".
    pub fn current_target(&self) -> Option<egui::Id> {
        self.current_target
    }

    pub fn current_glyph(&self) -> Option<Glyph> {
        self.current_glyph
    }

    /// True once the target vetoed the pending drop.
    pub fn is_vetoed(&self) -> bool {
        self.vetoed
    }

    /// Drop position accepted by the current target, unless vetoed.
    pub fn accepted_position(&self) -> Option<DropPosition> {
        if self.vetoed { None } else { self.accepted }
    }

    pub fn suppress_native_capture(&self) -> bool {
        self.suppress_native_capture
    }

    pub fn ticker_count(&self) -> usize {
        self.tickers.len()
    }

    /// The private per-session slot for `consumer`, created on first access.
    /// A consumer must only ever touch its own slot.
    pub fn context_slot(&mut self, consumer: egui::Id) -> ContextSlot<'_> {
        ContextSlot {
            slot: self.context.entry(consumer).or_default(),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("has_payload", &self.payload.is_some())
            .field("current_target", &self.current_target)
            .field("tickers", &self.tickers.len())
            .field("alt_listener", &self.move_listener.is_some())
            .field("pointer", &self.pointer)
            .finish()
    }
}

/// A consumer's private, session-scoped storage cell.
///
/// Typed access over an opaque slot: the slot holds at most one value, and a
/// type-mismatched [`ContextSlot::get_or_insert_with`] replaces it.
pub struct ContextSlot<'a> {
    pub(super) slot: &'a mut Option<Box<dyn Any>>,
}

impl ContextSlot<'_> {
    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn get<T: Any>(&self) -> Option<&T> {
        self.slot.as_deref()?.downcast_ref()
    }

    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.slot.as_deref_mut()?.downcast_mut()
    }

    pub fn set<T: Any>(&mut self, value: T) {
        *self.slot = Some(Box::new(value));
    }

    pub fn clear(&mut self) {
        *self.slot = None;
    }

    pub fn get_or_insert_with<T: Any>(&mut self, init: impl FnOnce() -> T) -> &mut T {
        let compatible = self.slot.as_deref().is_some_and(|v| v.is::<T>());
        if !compatible {
            *self.slot = Some(Box::new(init()));
        }
        match self.slot.as_deref_mut().and_then(|v| v.downcast_mut()) {
            Some(value) => value,
            None => unreachable!("slot was initialized with this type above"),
        }
    }
}

impl fmt::Debug for ContextSlot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextSlot")
            .field("occupied", &self.slot.is_some())
            .finish()
    }
}
