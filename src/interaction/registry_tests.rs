use super::cues::CueSet;
use super::event::{Decision, DragEvent};
use super::registry::{DropTarget, TargetRegistry};
use super::session::ContextSlot;

struct NullTarget;

impl DropTarget for NullTarget {
    fn on_drag_event(&mut self, _event: &DragEvent<'_>, _context: &mut ContextSlot<'_>) -> Decision {
        Decision::Proceed
    }
}

fn id(name: &str) -> egui::Id {
    egui::Id::new(name)
}

#[test]
fn resolves_nearest_ancestor_with_handler() {
    let mut registry = TargetRegistry::default();
    registry.register_target(id("list"), None, Box::new(NullTarget));
    registry.register_element(id("row"), Some(id("list")));
    registry.register_element(id("label"), Some(id("row")));

    assert_eq!(registry.resolve_target(id("label")), Some(id("list")));
    assert_eq!(registry.resolve_target(id("row")), Some(id("list")));
    assert_eq!(registry.resolve_target(id("list")), Some(id("list")));
}

#[test]
fn element_with_own_handler_wins_over_ancestor() {
    let mut registry = TargetRegistry::default();
    registry.register_target(id("tree"), None, Box::new(NullTarget));
    registry.register_target(id("tree_item"), Some(id("tree")), Box::new(NullTarget));

    assert_eq!(registry.resolve_target(id("tree_item")), Some(id("tree_item")));
}

#[test]
fn unknown_element_resolves_to_no_target() {
    let registry = TargetRegistry::default();
    assert_eq!(registry.resolve_target(id("never_registered")), None);
}

#[test]
fn broken_parent_chain_resolves_to_no_target() {
    let mut registry = TargetRegistry::default();
    // Parent was removed (widget destroyed mid-session).
    registry.register_element(id("orphan"), Some(id("gone")));
    assert_eq!(registry.resolve_target(id("orphan")), None);
}

#[test]
fn chain_without_any_handler_resolves_to_no_target() {
    let mut registry = TargetRegistry::default();
    registry.register_element(id("a"), None);
    registry.register_element(id("b"), Some(id("a")));
    assert_eq!(registry.resolve_target(id("b")), None);
}

#[test]
fn cue_overlays_never_shadow_the_target_below() {
    let mut registry = TargetRegistry::default();
    registry.register_target(id("panel"), None, Box::new(NullTarget));
    for cue in CueSet::element_ids() {
        // Overlays drawn atop the panel report the panel as their parent.
        registry.register_element(cue, Some(id("panel")));
        registry.register_cue(cue);
        assert_eq!(registry.resolve_target(cue), Some(id("panel")));
    }
}

#[test]
fn cue_with_handler_is_still_skipped() {
    let mut registry = TargetRegistry::default();
    registry.register_target(id("panel"), None, Box::new(NullTarget));
    let cue = CueSet::element_ids()[0];
    registry.register_target(cue, Some(id("panel")), Box::new(NullTarget));
    registry.register_cue(cue);
    assert_eq!(registry.resolve_target(cue), Some(id("panel")));
}

#[test]
fn parent_cycle_terminates_as_no_target() {
    let mut registry = TargetRegistry::default();
    registry.register_element(id("a"), Some(id("b")));
    registry.register_element(id("b"), Some(id("a")));
    assert_eq!(registry.resolve_target(id("a")), None);
}

#[test]
fn clearing_a_handler_falls_back_to_the_ancestor() {
    let mut registry = TargetRegistry::default();
    registry.register_target(id("list"), None, Box::new(NullTarget));
    registry.register_target(id("row"), Some(id("list")), Box::new(NullTarget));

    assert_eq!(registry.resolve_target(id("row")), Some(id("row")));
    registry.clear_handler(id("row"));
    assert_eq!(registry.resolve_target(id("row")), Some(id("list")));
}

#[test]
fn removing_an_element_forgets_it_entirely() {
    let mut registry = TargetRegistry::default();
    registry.register_target(id("row"), None, Box::new(NullTarget));
    registry.remove_element(id("row"));
    assert!(!registry.is_registered(id("row")));
    assert!(!registry.has_handler(id("row")));
    assert_eq!(registry.resolve_target(id("row")), None);
}
