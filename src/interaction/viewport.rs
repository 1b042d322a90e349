use egui::{Pos2, Rect};

/// Host-side view of the scene, queried by the controller during dispatch.
///
/// All platform/backend coordinate quirks stay behind this trait so the rest
/// of the engine (and the helpers in [`crate::geometry`]) remain purely
/// mathematical. Positions are global (screen) coordinates in points.
pub trait Viewport {
    /// The deepest known element under `global`, if any.
    ///
    /// This is the raw hit, not the drop target: the controller resolves the
    /// actual target by walking registered ancestors.
    fn element_at(&self, global: Pos2) -> Option<egui::Id>;

    /// Current on-screen bounds of `element`, or `None` if it is not laid
    /// out right now (hidden, detached, scrolled away).
    fn bounds_of(&self, element: egui::Id) -> Option<Rect>;
}
