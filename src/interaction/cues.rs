use egui::{Painter, Pos2, Rect, Stroke, StrokeKind, Vec2, Visuals, pos2, vec2};

use super::event::Glyph;

// Hidden cues are parked far off-canvas rather than flag-toggled, so a
// half-updated cue can never linger over live widgets or hit-test against
// the pointer.
const OFFSCREEN: f32 = -10_000.0;
const HIDDEN_LIMIT: f32 = -9_000.0;

const LINE_THICKNESS: f32 = 2.0;
const GLYPH_SIZE: f32 = 16.0;

fn offscreen_rect(size: Vec2) -> Rect {
    Rect::from_min_size(pos2(OFFSCREEN, OFFSCREEN), size)
}

fn with_alpha(color: egui::Color32, alpha: u8) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Bordered outline drawn over a prospective drop target.
#[derive(Clone, Copy, Debug)]
pub struct BorderCue {
    rect: Rect,
}

impl BorderCue {
    pub fn element_id() -> egui::Id {
        egui::Id::new("egui_interaction::border_cue")
    }

    fn new() -> Self {
        Self {
            rect: offscreen_rect(Vec2::ZERO),
        }
    }

    pub fn show_at(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.rect = Rect::from_min_size(pos2(x, y), vec2(width, height));
    }

    pub fn show_over(&mut self, bounds: Rect) {
        self.rect = bounds;
    }

    pub fn hide(&mut self) {
        self.rect = offscreen_rect(self.rect.size());
    }

    pub fn is_hidden(&self) -> bool {
        self.rect.min.x <= HIDDEN_LIMIT
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub(super) fn paint(&self, painter: &Painter, visuals: &Visuals) {
        if self.is_hidden() {
            return;
        }
        painter.rect_stroke(self.rect, 1.0, visuals.selection.stroke, StrokeKind::Inside);
    }
}

/// Translucent rectangle shading a prospective drop area.
#[derive(Clone, Copy, Debug)]
pub struct ShadeCue {
    rect: Rect,
}

impl ShadeCue {
    pub fn element_id() -> egui::Id {
        egui::Id::new("egui_interaction::shade_cue")
    }

    fn new() -> Self {
        Self {
            rect: offscreen_rect(Vec2::ZERO),
        }
    }

    pub fn show_at(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.rect = Rect::from_min_size(pos2(x, y), vec2(width, height));
    }

    pub fn show_over(&mut self, bounds: Rect) {
        self.rect = bounds;
    }

    pub fn hide(&mut self) {
        self.rect = offscreen_rect(self.rect.size());
    }

    pub fn is_hidden(&self) -> bool {
        self.rect.min.x <= HIDDEN_LIMIT
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub(super) fn paint(&self, painter: &Painter, visuals: &Visuals) {
        if self.is_hidden() {
            return;
        }
        let base = visuals.selection.bg_fill;
        let fill = with_alpha(base, ((base.a() as f32) * 0.45) as u8);
        painter.rect_filled(self.rect, 1.0, fill);
    }
}

/// Insertion line marking a reorder position between two elements.
#[derive(Clone, Copy, Debug)]
pub struct LineCue {
    anchor: Pos2,
    vertical: bool,
    length: f32,
}

impl LineCue {
    pub fn element_id() -> egui::Id {
        egui::Id::new("egui_interaction::line_cue")
    }

    fn new() -> Self {
        Self {
            anchor: pos2(OFFSCREEN, OFFSCREEN),
            vertical: false,
            length: 0.0,
        }
    }

    /// Sets the line's axis and extent.
    pub fn set_orientation(&mut self, vertical: bool, length: f32) {
        self.vertical = vertical;
        self.length = length.max(0.0);
    }

    /// Shows the line with its current orientation, anchored at `(x, y)`
    /// (top/left end).
    pub fn show_at(&mut self, x: f32, y: f32) {
        self.anchor = pos2(x, y);
    }

    /// Shows the line spanning `bounds` along its longer axis, centered on
    /// the other axis.
    pub fn show_over(&mut self, bounds: Rect) {
        if bounds.height() > bounds.width() {
            self.set_orientation(true, bounds.height());
            self.show_at(bounds.center().x, bounds.top());
        } else {
            self.set_orientation(false, bounds.width());
            self.show_at(bounds.left(), bounds.center().y);
        }
    }

    pub fn hide(&mut self) {
        self.anchor = pos2(OFFSCREEN, OFFSCREEN);
    }

    pub fn is_hidden(&self) -> bool {
        self.anchor.x <= HIDDEN_LIMIT
    }

    pub fn is_vertical(&self) -> bool {
        self.vertical
    }

    pub fn rect(&self) -> Rect {
        let size = if self.vertical {
            vec2(LINE_THICKNESS, self.length)
        } else {
            vec2(self.length, LINE_THICKNESS)
        };
        // Centered on the anchor along the thin axis.
        let min = if self.vertical {
            pos2(self.anchor.x - LINE_THICKNESS * 0.5, self.anchor.y)
        } else {
            pos2(self.anchor.x, self.anchor.y - LINE_THICKNESS * 0.5)
        };
        Rect::from_min_size(min, size)
    }

    pub(super) fn paint(&self, painter: &Painter, visuals: &Visuals) {
        if self.is_hidden() {
            return;
        }
        painter.rect_filled(self.rect(), 0.0, visuals.selection.stroke.color);
    }
}

/// Decorative glyph that follows the pointer during a session.
#[derive(Clone, Copy, Debug)]
pub struct GlyphCue {
    pos: Pos2,
    glyph: Option<Glyph>,
}

impl GlyphCue {
    pub fn element_id() -> egui::Id {
        egui::Id::new("egui_interaction::glyph_cue")
    }

    fn new() -> Self {
        Self {
            pos: pos2(OFFSCREEN, OFFSCREEN),
            glyph: None,
        }
    }

    pub fn set(&mut self, glyph: Option<Glyph>) {
        self.glyph = glyph;
    }

    pub fn glyph(&self) -> Option<Glyph> {
        self.glyph
    }

    /// Repositions the glyph; the controller calls this on every move.
    pub fn follow(&mut self, pos: Pos2) {
        self.pos = pos;
    }

    /// Anchors the glyph at the top-left corner of `bounds`. The symbol set
    /// via [`GlyphCue::set`] is kept; the glyph stays hidden until one is set.
    pub fn show_over(&mut self, bounds: Rect) {
        self.pos = bounds.min;
    }

    pub fn hide(&mut self) {
        self.glyph = None;
        self.pos = pos2(OFFSCREEN, OFFSCREEN);
    }

    pub fn is_hidden(&self) -> bool {
        self.glyph.is_none() || self.pos.x <= HIDDEN_LIMIT
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.pos, Vec2::splat(GLYPH_SIZE))
    }

    pub(super) fn paint(&self, painter: &Painter, visuals: &Visuals) {
        let Some(glyph) = self.glyph else { return };
        if self.is_hidden() {
            return;
        }

        let rect = self.rect();
        let stroke = Stroke::new(1.5, visuals.selection.stroke.color.gamma_multiply(0.9));
        let mid = rect.center();

        match glyph {
            Glyph::Move => {
                painter.line_segment(
                    [pos2(rect.left(), mid.y), pos2(rect.right(), mid.y)],
                    stroke,
                );
                painter.line_segment(
                    [pos2(mid.x, rect.top()), pos2(mid.x, rect.bottom())],
                    stroke,
                );
            }
            Glyph::Copy => {
                let inner = Rect::from_center_size(mid, rect.size() * 0.62);
                painter.rect_stroke(inner, 2.0, stroke, StrokeKind::Inside);
                painter.line_segment(
                    [pos2(inner.left() + 2.0, mid.y), pos2(inner.right() - 2.0, mid.y)],
                    stroke,
                );
                painter.line_segment(
                    [pos2(mid.x, inner.top() + 2.0), pos2(mid.x, inner.bottom() - 2.0)],
                    stroke,
                );
            }
            Glyph::Link => {
                painter.line_segment([rect.left_bottom(), rect.right_top()], stroke);
                painter.line_segment(
                    [pos2(mid.x, rect.top()), rect.right_top()],
                    stroke,
                );
                painter.line_segment(
                    [pos2(rect.right(), mid.y), rect.right_top()],
                    stroke,
                );
            }
            Glyph::Deny => {
                let radius = rect.width() * 0.5 - 1.0;
                painter.circle_stroke(mid, radius, stroke);
                let d = radius * std::f32::consts::FRAC_1_SQRT_2;
                painter.line_segment(
                    [pos2(mid.x - d, mid.y + d), pos2(mid.x + d, mid.y - d)],
                    stroke,
                );
            }
        }
    }
}

/// The four process-wide overlay primitives, driven by the controller (or by
/// consumers between dispatches). They hold no interaction state of their
/// own, and their state does not survive a target change.
#[derive(Clone, Copy, Debug)]
pub struct CueSet {
    pub border: BorderCue,
    pub shade: ShadeCue,
    pub line: LineCue,
    pub glyph: GlyphCue,
}

impl CueSet {
    pub(super) fn new() -> Self {
        Self {
            border: BorderCue::new(),
            shade: ShadeCue::new(),
            line: LineCue::new(),
            glyph: GlyphCue::new(),
        }
    }

    /// Element ids of all four cues, for resolver bookkeeping.
    pub fn element_ids() -> [egui::Id; 4] {
        [
            BorderCue::element_id(),
            ShadeCue::element_id(),
            LineCue::element_id(),
            GlyphCue::element_id(),
        ]
    }

    pub fn hide_all(&mut self) {
        self.border.hide();
        self.shade.hide();
        self.line.hide();
        self.glyph.hide();
    }

    /// Hides the target-highlight cues but leaves the pointer glyph alone.
    pub(super) fn hide_highlights(&mut self) {
        self.border.hide();
        self.shade.hide();
        self.line.hide();
    }

    pub fn all_hidden(&self) -> bool {
        self.border.is_hidden()
            && self.shade.is_hidden()
            && self.line.is_hidden()
            && self.glyph.is_hidden()
    }

    pub(super) fn paint(&self, painter: &Painter, visuals: &Visuals) {
        self.shade.paint(painter, visuals);
        self.border.paint(painter, visuals);
        self.line.paint(painter, visuals);
        self.glyph.paint(painter, visuals);
    }
}
