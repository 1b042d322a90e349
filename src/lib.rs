#![forbid(unsafe_code)]

//! Pointer interaction engine for [`egui`] widget trees: drag/move sessions,
//! spatial drop-target resolution, and the shared visual cue overlays.
//!
//! The entry point is [`InteractionController`]. Widgets register
//! [`DropTarget`] handlers in its [`TargetRegistry`], start a [`Session`]
//! from a drag gesture, and the host forwards raw pointer input through
//! [`InteractionController::handle`] together with a [`Viewport`]
//! implementation for hit testing.

pub mod geometry;
pub mod interaction;

pub use interaction::{
    BorderCue, ContextSlot, CueSet, Decision, DragEvent, DropPosition, DropTarget, EventKind,
    Glyph, GlyphCue, HostEvent, InteractionController, InteractionOptions, LineCue,
    PointerSnapshot, Session, ShadeCue, StartOptions, TargetRegistry, Viewport,
};
