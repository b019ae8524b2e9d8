//! Timing curves and keyframe interpolation for the show/hide animations.

use std::time::{Duration, Instant};

/// Convert a configured duration in seconds to a wall-clock `Duration`.
/// Negative and NaN values collapse to zero; values too large for a
/// `Duration` (including infinity) saturate to `Duration::MAX`.
pub fn seconds(value: f64) -> Duration {
    if value.is_nan() || value <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(value).unwrap_or(Duration::MAX)
}

/// Linear progress (0.0 to 1.0) of an animation that started at `start`.
/// Zero-length animations are complete as soon as they start.
pub fn progress(start: Instant, duration: Duration, now: Instant) -> f32 {
    if now < start {
        return 0.0;
    }
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.duration_since(start).as_secs_f64();
    (elapsed / duration.as_secs_f64()).min(1.0) as f32
}

/// Ease-in-ease-out curve, the cubic bezier (0.42, 0) (0.58, 1).
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t == 0.0 || t == 1.0 {
        return t;
    }
    let s = solve_bezier_x(0.42, 0.58, t);
    bezier(0.0, 1.0, s)
}

/// One-dimensional cubic bezier with endpoints 0 and 1.
fn bezier(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Find the curve parameter whose x coordinate equals `x`.
fn solve_bezier_x(p1: f32, p2: f32, x: f32) -> f32 {
    let mut s = x;
    for _ in 0..8 {
        let err = bezier(p1, p2, s) - x;
        if err.abs() < 1e-5 {
            return s;
        }
        let slope = bezier_slope(p1, p2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= err / slope;
    }

    // Newton stalled; fall back to bisection on the monotonic x curve.
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..32 {
        let v = bezier(p1, p2, s);
        if (v - x).abs() < 1e-5 {
            break;
        }
        if v < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    s
}

/// Paced keyframe interpolation: time is spread over the segments in
/// proportion to how far each one travels, so motion runs at a constant rate.
pub fn paced_keyframes(values: &[f32], t: f32) -> f32 {
    let Some(&last) = values.last() else {
        return 1.0;
    };
    let t = t.clamp(0.0, 1.0);
    let total: f32 = values.windows(2).map(|w| (w[1] - w[0]).abs()).sum();
    if total <= 0.0 || t >= 1.0 {
        return last;
    }

    let mut remaining = t * total;
    for w in values.windows(2) {
        let span = (w[1] - w[0]).abs();
        if remaining <= span && span > 0.0 {
            return w[0] + (w[1] - w[0]) * (remaining / span);
        }
        remaining -= span;
    }
    last
}
