use egui::{Vec2, vec2};

/// Options for [`InteractionController`](super::InteractionController).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InteractionOptions {
    /// Seconds between ticker invocations while a session is active.
    pub ticker_interval: f64,

    /// Upper bound on missed intervals replayed by a single
    /// [`pump_tickers`](super::InteractionController::pump_tickers) call after a
    /// stall, so a long-blocked host doesn't unleash an unbounded burst.
    pub ticker_max_catch_up: u32,

    /// Offset from the pointer to the cursor glyph overlay, in points.
    pub glyph_offset: Vec2,

    /// If true, session lifecycle events are recorded in an in-memory ring
    /// buffer readable via
    /// [`debug_log_text`](super::InteractionController::debug_log_text).
    pub debug_event_log: bool,

    /// Maximum retained debug event log lines.
    pub debug_event_log_capacity: usize,
}

impl Default for InteractionOptions {
    fn default() -> Self {
        Self {
            ticker_interval: 0.1,
            ticker_max_catch_up: 8,
            glyph_offset: vec2(14.0, 10.0),
            debug_event_log: false,
            debug_event_log_capacity: 256,
        }
    }
}
