use std::fmt;

use ahash::HashMap;

use super::event::{Decision, DragEvent};
use super::session::ContextSlot;

/// Capability interface for interaction consumers.
///
/// A widget registers one handler per droppable element; the controller calls
/// it with lifecycle events while a session is active. `context` is the
/// handler's private per-session slot: session-scoped state belongs there,
/// never on the widget itself, so a widget cannot leak state between
/// sequential sessions.
///
/// Handlers must not panic: dispatch is not wrapped, and an unwinding handler
/// aborts the remainder of the current notification.
pub trait DropTarget {
    fn on_drag_event(&mut self, event: &DragEvent<'_>, context: &mut ContextSlot<'_>) -> Decision;
}

#[derive(Clone, Copy, Debug, Default)]
struct Node {
    parent: Option<egui::Id>,
    is_cue: bool,
}

/// Arena mapping element identity to its containment parent and (optionally)
/// a registered [`DropTarget`].
///
/// The spatial resolver walks this structure upward instead of a live widget
/// graph, so removed/never-registered elements degrade to "no target" rather
/// than failing.
#[derive(Default)]
pub struct TargetRegistry {
    nodes: HashMap<egui::Id, Node>,
    handlers: HashMap<egui::Id, Box<dyn DropTarget>>,
}

/// Upper bound on the upward walk; a malformed parent cycle terminates as
/// "no target" instead of hanging.
const MAX_WALK: usize = 4096;

impl TargetRegistry {
    /// Registers (or re-parents) a plain element with no handler of its own.
    /// Elements only need registering if they participate in containment
    /// chains or can be returned by [`Viewport::element_at`].
    ///
    /// [`Viewport::element_at`]: super::Viewport::element_at
    pub fn register_element(&mut self, element: egui::Id, parent: Option<egui::Id>) {
        let node = self.nodes.entry(element).or_default();
        node.parent = parent;
    }

    /// Registers an element together with its drop handler.
    pub fn register_target(
        &mut self,
        element: egui::Id,
        parent: Option<egui::Id>,
        handler: Box<dyn DropTarget>,
    ) {
        self.register_element(element, parent);
        self.handlers.insert(element, handler);
    }

    /// Replaces or installs the handler for an already registered element.
    pub fn set_handler(&mut self, element: egui::Id, handler: Box<dyn DropTarget>) {
        self.nodes.entry(element).or_default();
        self.handlers.insert(element, handler);
    }

    /// Removes the handler, keeping the element in the containment chain.
    pub fn clear_handler(&mut self, element: egui::Id) {
        self.handlers.remove(&element);
    }

    /// Forgets the element entirely. Children that still point at it resolve
    /// through a broken chain, i.e. to "no target".
    pub fn remove_element(&mut self, element: egui::Id) {
        self.nodes.remove(&element);
        self.handlers.remove(&element);
    }

    /// Marks an element as a visual cue overlay. Cues are skipped during
    /// target resolution so an overlay drawn over a target never shadows it.
    pub(super) fn register_cue(&mut self, element: egui::Id) {
        let node = self.nodes.entry(element).or_default();
        node.is_cue = true;
    }

    pub fn has_handler(&self, element: egui::Id) -> bool {
        self.handlers.contains_key(&element)
    }

    pub fn is_registered(&self, element: egui::Id) -> bool {
        self.nodes.contains_key(&element)
    }

    /// Nearest ancestor of `element` (including itself) with a registered
    /// handler, skipping cue overlays. `None` for unknown elements, broken
    /// parent chains, and chains without any handler.
    pub fn resolve_target(&self, element: egui::Id) -> Option<egui::Id> {
        let mut current = element;
        for _ in 0..MAX_WALK {
            let node = self.nodes.get(&current)?;
            if !node.is_cue && self.handlers.contains_key(&current) {
                return Some(current);
            }
            current = node.parent?;
        }
        None
    }

    pub(super) fn handler_mut(&mut self, element: egui::Id) -> Option<&mut (dyn DropTarget + '_)> {
        self.handlers.get_mut(&element).map(|h| &mut **h as &mut dyn DropTarget)
    }
}

impl fmt::Debug for TargetRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetRegistry")
            .field("elements", &self.nodes.len())
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
