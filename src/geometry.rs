//! Pure geometry helpers shared by the interaction engine and its consumers.
//!
//! Everything in this module works on plain [`egui`] math types and never
//! touches a live widget, so it can be unit tested without a rendering
//! surface. Host-specific coordinate quirks belong behind
//! [`Viewport`](crate::interaction::Viewport), not here.

use egui::{Pos2, Rect, Vec2, pos2};

/// Border width (in points) used by [`edge_zone`] when the caller does not
/// supply one.
pub const DEFAULT_EDGE_BORDER: f32 = 5.0;

/// Nine-way classification of a point against an element's border region.
///
/// Corners take priority over edges, edges over [`EdgeZone::Center`].
/// Primarily used to pick a resize cursor for panels, dialogs and columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeZone {
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

/// Three-way classification along a single axis, used for reorder
/// insertion-point detection (drop before, onto, or after an element).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisZone {
    Before,
    Center,
    After,
}

/// Normalizes two arbitrary corner points into a [`Rect`] with non-negative
/// dimensions. The corners may be given in either order.
pub fn rect_from_corners(a: Pos2, b: Pos2) -> Rect {
    let min = pos2(a.x.min(b.x), a.y.min(b.y));
    let size = Vec2::new((a.x - b.x).abs(), (a.y - b.y).abs());
    Rect::from_min_size(min, size)
}

/// Clamps `value` into `[lo, hi]`.
pub fn clip(value: f32, lo: f32, hi: f32) -> f32 {
    value.clamp(lo, hi)
}

/// Classifies `local` (in element-local coordinates) against a box of `size`,
/// treating everything within `border` points of a side as that side's edge
/// region. `None` uses [`DEFAULT_EDGE_BORDER`].
///
/// The comparisons are inclusive, so a point exactly on the border width is
/// classified as the edge, stably across repeated calls.
pub fn edge_zone(local: Pos2, size: Vec2, border: Option<f32>) -> EdgeZone {
    let border = border.unwrap_or(DEFAULT_EDGE_BORDER);
    let near_left = local.x <= border;
    let near_right = local.x >= size.x - border;
    let near_top = local.y <= border;
    let near_bottom = local.y >= size.y - border;

    match (near_left, near_right, near_top, near_bottom) {
        (true, _, true, _) => EdgeZone::TopLeft,
        (_, true, true, _) => EdgeZone::TopRight,
        (true, _, _, true) => EdgeZone::BottomLeft,
        (_, true, _, true) => EdgeZone::BottomRight,
        (true, _, _, _) => EdgeZone::Left,
        (_, true, _, _) => EdgeZone::Right,
        (_, _, true, _) => EdgeZone::Top,
        (_, _, _, true) => EdgeZone::Bottom,
        _ => EdgeZone::Center,
    }
}

/// Horizontal [`AxisZone`] for `x` within an element `width` points wide.
/// `None` uses a border of one third of the width.
pub fn edge_zone_h(x: f32, width: f32, border: Option<f32>) -> AxisZone {
    axis_zone(x, width, border)
}

/// Vertical [`AxisZone`] for `y` within an element `height` points tall.
/// `None` uses a border of one third of the height.
pub fn edge_zone_v(y: f32, height: f32, border: Option<f32>) -> AxisZone {
    axis_zone(y, height, border)
}

fn axis_zone(coord: f32, extent: f32, border: Option<f32>) -> AxisZone {
    let border = border.unwrap_or(extent / 3.0);
    if coord <= border {
        AxisZone::Before
    } else if coord >= extent - border {
        AxisZone::After
    } else {
        AxisZone::Center
    }
}

/// Converts a screen position into coordinates local to `bounds`.
pub fn to_local(global: Pos2, bounds: Rect) -> Pos2 {
    (global - bounds.min).to_pos2()
}

/// Converts an element-local position back into screen coordinates.
pub fn to_global(local: Pos2, bounds: Rect) -> Pos2 {
    bounds.min + local.to_vec2()
}
