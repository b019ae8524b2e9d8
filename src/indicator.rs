//! Pluggable indicator contract and the factory that builds the configured one.

use std::time::Instant;

use serde::Deserialize;
use tiny_skia::Pixmap;

use crate::circle::CircleIndicator;
use crate::config::IndicatorConfig;
use crate::geometry::Rect;

/// Anything the spinner can show as its rotating graphic.
pub trait SpinnerIndicator {
    /// Start the looping rotation. Calling it while already animating keeps
    /// the running rotation rather than stacking a second one.
    fn begin_animation(&mut self, now: Instant);

    /// Stop the rotation. Safe to call when not animating.
    fn end_animation(&mut self);

    fn is_animating(&self) -> bool;

    /// Draw into `frame`, the rect assigned to the indicator by layout.
    fn draw(&self, pixmap: &mut Pixmap, frame: Rect, opacity: f32, now: Instant);
}

/// Built-in indicator variants selectable from the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    #[default]
    Circle,
}

impl IndicatorKind {
    pub fn build(self, config: &IndicatorConfig) -> Box<dyn SpinnerIndicator> {
        match self {
            IndicatorKind::Circle => Box::new(CircleIndicator::new(config.circle.clone())),
        }
    }
}
