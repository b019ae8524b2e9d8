//! Default indicator: a partial circular stroke that spins at a fixed rate.

use std::f32::consts::TAU;
use std::time::Instant;

use tiny_skia::{FillRule, Paint, Path, PathBuilder, Pixmap, Shader, Stroke, Transform};

use crate::animation;
use crate::color::Color;
use crate::config::{CircleStyle, LineCap};
use crate::geometry::{Point, Rect};
use crate::indicator::SpinnerIndicator;

#[derive(Debug, Clone)]
pub struct CircleIndicator {
    style: CircleStyle,
    /// When the current rotation began; `None` while stopped.
    rotation_start: Option<Instant>,
}

impl CircleIndicator {
    pub fn new(style: CircleStyle) -> Self {
        CircleIndicator { style, rotation_start: None }
    }

    pub fn style(&self) -> &CircleStyle {
        &self.style
    }

    /// Current rotation in radians, in `0..TAU`.
    pub fn rotation(&self, now: Instant) -> f32 {
        let Some(start) = self.rotation_start else {
            return 0.0;
        };
        let revolution = animation::seconds(self.style.revolution_duration);
        if revolution.is_zero() || now <= start {
            return 0.0;
        }
        let turns = now.duration_since(start).as_secs_f64() / revolution.as_secs_f64();
        (turns.fract() as f32) * TAU
    }

    /// Center and radius of the stroked circle inside `frame`.
    fn circle_in(&self, frame: Rect) -> (Point, f32) {
        let side = frame.width.min(frame.height);
        let radius = (side - self.style.line_width) / 2.0;
        (frame.center(), radius)
    }
}

impl SpinnerIndicator for CircleIndicator {
    fn begin_animation(&mut self, now: Instant) {
        if self.rotation_start.is_none() {
            self.rotation_start = Some(now);
        }
    }

    fn end_animation(&mut self) {
        self.rotation_start = None;
    }

    fn is_animating(&self) -> bool {
        self.rotation_start.is_some()
    }

    fn draw(&self, pixmap: &mut Pixmap, frame: Rect, opacity: f32, now: Instant) {
        if opacity <= 0.0 || frame.is_empty() {
            return;
        }
        let (center, radius) = self.circle_in(frame);
        if radius <= 0.0 {
            return;
        }
        let transform = Transform::from_rotate_at(self.rotation(now).to_degrees(), center.x, center.y);

        let inner = self.style.inner_color.scale_alpha(opacity);
        if inner.a > 0 {
            if let Some(path) = arc_path(center, radius, 0.0, 1.0) {
                pixmap.fill_path(&path, &solid(inner), FillRule::Winding, transform, None);
            }
        }

        let line = self.style.line_color.scale_alpha(opacity);
        if line.a == 0 {
            return;
        }
        if let Some(path) = arc_path(center, radius, self.style.line_start, self.style.line_end) {
            let stroke = Stroke {
                width: self.style.line_width,
                line_cap: skia_cap(self.style.line_cap),
                ..Stroke::default()
            };
            pixmap.stroke_path(&path, &solid(line), &stroke, transform, None);
        }
    }
}

fn solid(c: Color) -> Paint<'static> {
    Paint {
        shader: Shader::SolidColor(c.to_skia()),
        anti_alias: true,
        ..Paint::default()
    }
}

fn skia_cap(cap: LineCap) -> tiny_skia::LineCap {
    match cap {
        LineCap::Butt => tiny_skia::LineCap::Butt,
        LineCap::Round => tiny_skia::LineCap::Round,
        LineCap::Square => tiny_skia::LineCap::Square,
    }
}

/// Arc between two fractions of a turn, starting at the rightmost point and
/// running clockwise on screen. Built from cubic segments of at most 90°.
fn arc_path(center: Point, radius: f32, start: f32, end: f32) -> Option<Path> {
    let start = start.clamp(0.0, 1.0);
    let end = end.clamp(0.0, 1.0);
    if end <= start || radius <= 0.0 {
        return None;
    }

    let a0 = start * TAU;
    let a1 = end * TAU;
    let segments = ((a1 - a0) / (TAU / 4.0)).ceil().max(1.0) as usize;
    let step = (a1 - a0) / segments as f32;
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    let at = |a: f32| (center.x + radius * a.cos(), center.y + radius * a.sin());

    let mut pb = PathBuilder::new();
    let (x0, y0) = at(a0);
    pb.move_to(x0, y0);
    for i in 0..segments {
        let s = a0 + step * i as f32;
        let e = s + step;
        let (sx, sy) = at(s);
        let (ex, ey) = at(e);
        pb.cubic_to(
            sx - k * radius * s.sin(),
            sy + k * radius * s.cos(),
            ex + k * radius * e.sin(),
            ey - k * radius * e.cos(),
            ex,
            ey,
        );
    }
    if end - start >= 1.0 {
        pb.close();
    }
    pb.finish()
}
