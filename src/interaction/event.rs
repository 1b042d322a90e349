use std::any::Any;
use std::fmt;

use egui::{Modifiers, Pos2};

/// Lifecycle stage of a dispatched interaction event.
///
/// Spatial sessions see `Enter`/`Over`/`Out` plus exactly one of
/// `Drop`/`Cancel`. Alt-listener sessions see `Move`/`Up`/`Cancel`/`End`
/// instead. `Timer` is only delivered to registered tickers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    Enter,
    Over,
    Out,
    Drop,
    Cancel,
    Move,
    Up,
    End,
    Timer,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enter => "enter",
            Self::Over => "over",
            Self::Out => "out",
            Self::Drop => "drop",
            Self::Cancel => "cancel",
            Self::Move => "move",
            Self::Up => "up",
            Self::End => "end",
            Self::Timer => "timer",
        }
    }
}

/// Where a payload lands relative to the drop target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DropPosition {
    Before,
    Over,
    After,
}

/// Result of a [`DropTarget`](super::DropTarget) callback.
///
/// The event stays immutable; the handler states its intent through the
/// return value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Nothing to report; previous veto/accept state is kept.
    Proceed,
    /// Veto the default effect and drop any previously accepted position.
    Cancel,
    /// Confirm (or override) the drop position and request the default
    /// highlight for it.
    AcceptAt(DropPosition),
}

/// Symbol shown by the cursor-follow glyph cue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Glyph {
    Move,
    Copy,
    Link,
    Deny,
}

/// Pointer position and modifier keys captured at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerSnapshot {
    pub pointer: Pos2,
    pub modifiers: Modifiers,
}

/// One interaction notification, dispatched to a drop target, an alt move
/// listener, or a ticker.
///
/// Payload and aux data are borrowed from the live session; use
/// [`DragEvent::payload_as`] / [`DragEvent::aux_as`] for typed access.
pub struct DragEvent<'a> {
    pub kind: EventKind,
    /// The value being dragged, if any.
    pub payload: Option<&'a dyn Any>,
    /// Consumer-supplied metadata, fixed for the session's duration.
    pub aux: Option<&'a dyn Any>,
    /// Live pointer position in global coordinates.
    pub pointer: Pos2,
    /// Live modifier-key state.
    pub modifiers: Modifiers,
    /// Pointer/modifier snapshot taken when the session started.
    pub initial: PointerSnapshot,
    /// For [`EventKind::Drop`]: the accepted position, or `None` when the
    /// target vetoed (or never accepted) the drop.
    pub accepted: Option<DropPosition>,
}

impl DragEvent<'_> {
    pub fn payload_as<T: 'static>(&self) -> Option<&T> {
        self.payload?.downcast_ref()
    }

    pub fn aux_as<T: 'static>(&self) -> Option<&T> {
        self.aux?.downcast_ref()
    }
}

impl fmt::Debug for DragEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragEvent")
            .field("kind", &self.kind)
            .field("has_payload", &self.payload.is_some())
            .field("has_aux", &self.aux.is_some())
            .field("pointer", &self.pointer)
            .field("modifiers", &self.modifiers)
            .field("initial", &self.initial)
            .field("accepted", &self.accepted)
            .finish()
    }
}
