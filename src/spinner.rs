//! The overlay instance and its show/hide state machine.
//!
//! A spinner is attached to a host surface by `show_in*`, animates in (backdrop
//! fade, container scale pulse, indicator reveal), stays up, then fades out on
//! `hide*`. The fade never starts before `minimum_visible_time` has passed since
//! the show began, so very short operations do not flicker.
//!
//! Time is passed in by the host's event loop. `tick` is where continuations
//! run: the pulse-completion step and the hide completion callbacks. Hosts
//! that share the spinner behind a `RefCell` use `advance` instead and run the
//! returned completions once their borrow has ended.
//!
//! Deadlines past the range of `Instant` are never reached.

use std::fmt;
use std::time::Instant;

use log::debug;

use crate::animation::{self, ease_in_out, paced_keyframes};
use crate::color::Color;
use crate::config::{IndicatorReveal, SpinnerConfiguration};
use crate::geometry::{Point, Rect};
use crate::indicator::SpinnerIndicator;
use crate::layout::{self, SpinnerLayout, TextMetrics};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Hidden,
    Showing,
    Visible,
    Hiding,
}

/// Callback run once the hide fade has finished and the spinner is detached.
pub type Completion = Box<dyn FnOnce()>;

pub struct Spinner {
    configuration: SpinnerConfiguration,
    indicator: Box<dyn SpinnerIndicator>,
    phase: Phase,
    attached: bool,
    frame: Rect,
    title: String,
    shown_at: Option<Instant>,
    pulse_finished: bool,
    indicator_revealed_at: Option<Instant>,
    fade_starts_at: Option<Instant>,
    completions: Vec<Completion>,
}

impl fmt::Debug for Spinner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spinner")
            .field("phase", &self.phase)
            .field("attached", &self.attached)
            .field("frame", &self.frame)
            .field("title", &self.title)
            .field("shown_at", &self.shown_at)
            .field("fade_starts_at", &self.fade_starts_at)
            .field("pending_completions", &self.completions.len())
            .finish()
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spinner {
    /// Spinner using a snapshot of the process-wide default configuration.
    pub fn new() -> Self {
        Self::with_configuration(SpinnerConfiguration::default_configuration())
    }

    pub fn with_configuration(configuration: SpinnerConfiguration) -> Self {
        let indicator = configuration.indicator.kind.build(&configuration.indicator);
        Self::with_indicator(configuration, indicator)
    }

    /// Spinner with a caller-supplied indicator instead of the configured kind.
    pub fn with_indicator(configuration: SpinnerConfiguration, indicator: Box<dyn SpinnerIndicator>) -> Self {
        Spinner {
            configuration,
            indicator,
            phase: Phase::Hidden,
            attached: false,
            frame: Rect::ZERO,
            title: String::new(),
            shown_at: None,
            pulse_finished: false,
            indicator_revealed_at: None,
            fade_starts_at: None,
            completions: Vec::new(),
        }
    }

    // ── Visibility ──────────────────────────────────────────

    pub fn show_in(&mut self, host_bounds: Rect, now: Instant) -> bool {
        self.show_in_with_title(host_bounds, None, now)
    }

    /// Attach to a host covering `host_bounds` and start the show animation.
    /// Returns `false` without doing anything when not hidden or when the host
    /// has no area.
    pub fn show_in_with_title(&mut self, host_bounds: Rect, title: Option<&str>, now: Instant) -> bool {
        if self.phase != Phase::Hidden {
            debug!("show ignored: spinner is {:?}", self.phase);
            return false;
        }
        if host_bounds.is_empty() {
            debug!("show ignored: empty host bounds {host_bounds:?}");
            return false;
        }

        self.attached = true;
        self.frame = host_bounds;
        self.title = title.unwrap_or_default().to_string();
        self.shown_at = Some(now);
        self.pulse_finished = false;
        self.fade_starts_at = None;
        self.indicator_revealed_at = None;
        self.phase = Phase::Showing;

        if self.configuration.indicator_reveal == IndicatorReveal::WithPulse {
            self.indicator.begin_animation(now);
            self.indicator_revealed_at = Some(now);
        }

        debug!("Spinner showing in {:?} title={:?}", self.frame, self.title);
        true
    }

    pub fn hide(&mut self, now: Instant) {
        self.request_hide(now, None);
    }

    /// Hide, then run `completion` once the spinner has been detached.
    /// On a hidden spinner the completion runs before this returns.
    pub fn hide_then(&mut self, now: Instant, completion: impl FnOnce() + 'static) {
        self.request_hide(now, Some(Box::new(completion)));
    }

    fn request_hide(&mut self, now: Instant, completion: Option<Completion>) {
        match self.phase {
            Phase::Hidden => {
                debug!("hide on a hidden spinner");
                if let Some(completion) = completion {
                    completion();
                }
            }
            Phase::Hiding => {
                debug!("hide while already hiding; completion queued");
                self.completions.extend(completion);
            }
            Phase::Showing | Phase::Visible => {
                let shown_at = self.shown_at.unwrap_or(now);
                let elapsed = now.saturating_duration_since(shown_at);
                let minimum = animation::seconds(self.configuration.minimum_visible_time);
                let delay = minimum.saturating_sub(elapsed);

                self.fade_starts_at = now.checked_add(delay);
                self.completions.extend(completion);
                self.phase = Phase::Hiding;
                debug!("Spinner hiding after {delay:?} (visible for {elapsed:?})");
            }
        }
    }

    /// Advance the state machine to `now`, running any continuation that has
    /// become due. Returns `true` while the spinner is on screen.
    pub fn tick(&mut self, now: Instant) -> bool {
        for completion in self.advance(now) {
            completion();
        }
        self.phase != Phase::Hidden
    }

    /// Like `tick`, but hands the hide completions back instead of running
    /// them, so they can touch the spinner again.
    #[must_use = "returned completions must be run by the caller"]
    pub fn advance(&mut self, now: Instant) -> Vec<Completion> {
        let pulse_end = self.shown_at.and_then(|at| at.checked_add(self.animation_duration()));
        if let Some(pulse_end) = pulse_end {
            if !self.pulse_finished && now >= pulse_end {
                self.finish_pulse(pulse_end);
            }
        }

        let fade_end = match (self.phase, self.fade_starts_at) {
            (Phase::Hiding, Some(fade_start)) => fade_start.checked_add(self.animation_duration()),
            _ => None,
        };
        match fade_end {
            Some(fade_end) if now >= fade_end => self.finish_hiding(),
            _ => Vec::new(),
        }
    }

    fn finish_pulse(&mut self, pulse_end: Instant) {
        self.pulse_finished = true;
        if self.phase == Phase::Showing {
            self.phase = Phase::Visible;
        }
        if self.configuration.indicator_reveal == IndicatorReveal::AfterPulse {
            self.indicator.begin_animation(pulse_end);
            self.indicator_revealed_at = Some(pulse_end);
        }
        debug!("Spinner pulse finished, now {:?}", self.phase);
    }

    fn finish_hiding(&mut self) -> Vec<Completion> {
        self.phase = Phase::Hidden;
        self.attached = false;
        self.frame = Rect::ZERO;
        self.title.clear();
        self.indicator.end_animation();
        self.shown_at = None;
        self.pulse_finished = false;
        self.indicator_revealed_at = None;
        self.fade_starts_at = None;

        debug!("Spinner hidden, {} completion(s) due", self.completions.len());
        std::mem::take(&mut self.completions)
    }

    /// Follow the host's geometry while attached.
    pub fn resize_host(&mut self, host_bounds: Rect) {
        if self.attached && self.frame != host_bounds {
            debug!("Spinner re-layout: {:?} -> {host_bounds:?}", self.frame);
            self.frame = host_bounds;
        }
    }

    // ── Time-sampled visuals ────────────────────────────────

    /// Opacity of the whole overlay.
    pub fn opacity(&self, now: Instant) -> f32 {
        if !self.attached {
            return 0.0;
        }
        match self.fade_starts_at {
            Some(start) => 1.0 - ease_in_out(animation::progress(start, self.animation_duration(), now)),
            None => 1.0,
        }
    }

    /// Backdrop color, fading in from transparent after the show.
    pub fn background_color(&self, now: Instant) -> Color {
        let Some(shown_at) = self.shown_at.filter(|_| self.attached) else {
            return Color::TRANSPARENT;
        };
        let t = ease_in_out(animation::progress(shown_at, self.animation_duration(), now));
        self.configuration.background.effective_color().scale_alpha(t)
    }

    /// Container scale from the show pulse.
    pub fn container_scale(&self, now: Instant) -> f32 {
        let Some(shown_at) = self.shown_at.filter(|_| self.attached) else {
            return 0.0;
        };
        let t = ease_in_out(animation::progress(shown_at, self.animation_duration(), now));
        paced_keyframes(&self.configuration.pulse_values, t)
    }

    pub fn indicator_opacity(&self, now: Instant) -> f32 {
        let Some(revealed_at) = self.indicator_revealed_at.filter(|_| self.attached) else {
            return 0.0;
        };
        match self.configuration.indicator_reveal {
            IndicatorReveal::WithPulse => 1.0,
            IndicatorReveal::AfterPulse => {
                let fade = animation::seconds(self.configuration.secondary_animation_duration);
                animation::progress(revealed_at, fade, now)
            }
        }
    }

    // ── Layout ──────────────────────────────────────────────

    /// Content frames in overlay-local coordinates.
    pub fn layout(&self, metrics: &dyn TextMetrics) -> SpinnerLayout {
        layout::compute(
            Rect::from_size(self.frame.width, self.frame.height),
            &self.configuration.container,
            self.configuration.indicator.size,
            &self.title,
            metrics,
        )
    }

    /// Hit test against the container card, `point` in overlay-local coordinates.
    pub fn container_contains(&self, point: Point, metrics: &dyn TextMetrics) -> bool {
        self.attached && self.layout(metrics).container.contains(point)
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn configuration(&self) -> &SpinnerConfiguration {
        &self.configuration
    }

    pub fn indicator(&self) -> &dyn SpinnerIndicator {
        self.indicator.as_ref()
    }

    pub fn indicator_mut(&mut self) -> &mut dyn SpinnerIndicator {
        self.indicator.as_mut()
    }

    pub fn shown_at(&self) -> Option<Instant> {
        self.shown_at
    }

    pub fn fade_starts_at(&self) -> Option<Instant> {
        self.fade_starts_at
    }

    fn animation_duration(&self) -> std::time::Duration {
        animation::seconds(self.configuration.animation_duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::tests::Fixed;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    const HOST: Rect = Rect { x: 0.0, y: 0.0, width: 640.0, height: 480.0 };

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn config() -> SpinnerConfiguration {
        SpinnerConfiguration {
            minimum_visible_time: 1.0,
            animation_duration: 0.3,
            ..SpinnerConfiguration::default()
        }
    }

    fn flag() -> (Rc<Cell<bool>>, impl FnOnce() + 'static) {
        let fired = Rc::new(Cell::new(false));
        let f = fired.clone();
        (fired, move || f.set(true))
    }

    #[test]
    fn show_then_immediate_hide_waits_minimum_visible_time() {
        let t0 = Instant::now();
        let mut spinner = Spinner::with_configuration(config());
        assert!(spinner.show_in(HOST, t0));
        spinner.hide(t0);

        assert_eq!(spinner.fade_starts_at(), Some(t0 + Duration::from_secs(1)));
        assert_eq!(spinner.opacity(t0 + ms(999)), 1.0);
        spinner.tick(t0 + ms(999));
        assert_eq!(spinner.phase(), Phase::Hiding);
    }

    #[test]
    fn late_hide_fades_immediately() {
        let t0 = Instant::now();
        let mut spinner = Spinner::with_configuration(config());
        spinner.show_in(HOST, t0);
        spinner.tick(t0 + ms(1000));
        spinner.hide(t0 + ms(1000));
        assert_eq!(spinner.fade_starts_at(), Some(t0 + ms(1000)));
    }

    #[test]
    fn early_hide_scenario() {
        let t0 = Instant::now();
        let mut spinner = Spinner::with_configuration(config());
        let (fired, completion) = flag();

        spinner.show_in_with_title(HOST, Some("Loading"), t0);
        spinner.tick(t0 + ms(200));
        spinner.hide_then(t0 + ms(200), completion);

        assert_eq!(spinner.fade_starts_at(), Some(t0 + ms(1000)));
        assert_eq!(spinner.opacity(t0 + ms(990)), 1.0);
        assert!(spinner.opacity(t0 + ms(1150)) < 1.0);

        assert!(spinner.tick(t0 + ms(1299)));
        assert!(!fired.get());
        assert!(spinner.opacity(t0 + ms(1250)) > 0.0);

        assert!(!spinner.tick(t0 + ms(1300)));
        assert!(fired.get());
        assert_eq!(spinner.opacity(t0 + ms(1300)), 0.0);
    }

    #[test]
    fn late_hide_scenario() {
        let t0 = Instant::now();
        let mut spinner = Spinner::with_configuration(config());
        let (fired, completion) = flag();

        spinner.show_in(HOST, t0);
        spinner.tick(t0 + ms(1500));
        assert_eq!(spinner.phase(), Phase::Visible);
        spinner.hide_then(t0 + ms(1500), completion);

        assert_eq!(spinner.fade_starts_at(), Some(t0 + ms(1500)));
        assert!(spinner.opacity(t0 + ms(1600)) < 1.0);
        spinner.tick(t0 + ms(1799));
        assert!(!fired.get());
        spinner.tick(t0 + ms(1800));
        assert!(fired.get());
    }

    #[test]
    fn completion_sees_detached_spinner() {
        let t0 = Instant::now();
        let mut spinner = Spinner::with_configuration(config());
        spinner.show_in_with_title(HOST, Some("Syncing"), t0);
        assert!(spinner.is_attached());
        assert_eq!(spinner.frame(), HOST);

        let (fired, completion) = flag();
        spinner.hide_then(t0 + ms(2000), completion);
        spinner.tick(t0 + ms(2400));

        assert!(fired.get());
        assert_eq!(spinner.phase(), Phase::Hidden);
        assert!(!spinner.is_attached());
        assert_eq!(spinner.frame(), Rect::ZERO);
        assert_eq!(spinner.title(), "");
        assert!(!spinner.indicator().is_animating());
    }

    #[test]
    fn title_controls_label_spacing() {
        let t0 = Instant::now();
        let mut spinner = Spinner::with_configuration(config());
        spinner.show_in_with_title(HOST, None, t0);
        let layout = spinner.layout(&Fixed);
        assert_eq!(layout.label.y, layout.indicator.max_y());

        let mut titled = Spinner::with_configuration(config());
        titled.show_in_with_title(HOST, Some("Please wait"), t0);
        let layout = titled.layout(&Fixed);
        assert_eq!(layout.label.y, layout.indicator.max_y() + 20.0);
    }

    #[test]
    fn show_requires_hidden_and_a_host() {
        let t0 = Instant::now();
        let mut spinner = Spinner::with_configuration(config());
        assert!(!spinner.show_in(Rect::ZERO, t0));
        assert_eq!(spinner.phase(), Phase::Hidden);
        assert!(!spinner.is_attached());

        assert!(spinner.show_in_with_title(HOST, Some("first"), t0));
        assert!(!spinner.show_in_with_title(HOST, Some("second"), t0 + ms(100)));
        assert_eq!(spinner.title(), "first");
        assert_eq!(spinner.shown_at(), Some(t0));
    }

    #[test]
    fn hide_while_hidden_completes_immediately() {
        let t0 = Instant::now();
        let mut spinner = Spinner::with_configuration(config());
        let (fired, completion) = flag();
        spinner.hide_then(t0, completion);
        assert!(fired.get());
        assert_eq!(spinner.phase(), Phase::Hidden);
    }

    #[test]
    fn second_hide_keeps_schedule_and_queues_completion() {
        let t0 = Instant::now();
        let mut spinner = Spinner::with_configuration(config());
        let order = Rc::new(RefCell::new(Vec::new()));

        spinner.show_in(HOST, t0);
        let o = order.clone();
        spinner.hide_then(t0 + ms(100), move || o.borrow_mut().push(1));
        let o = order.clone();
        spinner.hide_then(t0 + ms(1200), move || o.borrow_mut().push(2));

        assert_eq!(spinner.fade_starts_at(), Some(t0 + ms(1000)));
        spinner.tick(t0 + ms(1300));
        assert_eq!(*order.borrow(), vec![1, 2]);
    }

    #[test]
    fn spinner_can_be_shown_again_after_hiding() {
        let t0 = Instant::now();
        let mut spinner = Spinner::with_configuration(config());
        spinner.show_in(HOST, t0);
        spinner.hide(t0);
        spinner.tick(t0 + ms(1300));
        assert_eq!(spinner.phase(), Phase::Hidden);

        assert!(spinner.show_in(HOST, t0 + ms(2000)));
        assert_eq!(spinner.shown_at(), Some(t0 + ms(2000)));
        assert_eq!(spinner.fade_starts_at(), None);
        assert_eq!(spinner.container_scale(t0 + ms(2000)), 0.0);
    }

    #[test]
    fn two_phase_reveal_waits_for_pulse() {
        let t0 = Instant::now();
        let mut spinner = Spinner::with_configuration(config());
        spinner.show_in(HOST, t0);
        assert_eq!(spinner.phase(), Phase::Showing);

        spinner.tick(t0 + ms(100));
        assert!(!spinner.indicator().is_animating());
        assert_eq!(spinner.indicator_opacity(t0 + ms(100)), 0.0);

        spinner.tick(t0 + ms(300));
        assert_eq!(spinner.phase(), Phase::Visible);
        assert!(spinner.indicator().is_animating());
        assert!(spinner.indicator_opacity(t0 + ms(300)) < 1e-3);
        assert!((spinner.indicator_opacity(t0 + ms(400)) - 0.5).abs() < 1e-3);
        assert_eq!(spinner.indicator_opacity(t0 + ms(600)), 1.0);
    }

    #[test]
    fn parallel_reveal_starts_with_pulse() {
        let t0 = Instant::now();
        let mut spinner = Spinner::with_configuration(SpinnerConfiguration {
            indicator_reveal: IndicatorReveal::WithPulse,
            ..config()
        });
        spinner.show_in(HOST, t0);
        assert!(spinner.indicator().is_animating());
        assert_eq!(spinner.indicator_opacity(t0), 1.0);
    }

    #[test]
    fn repeated_begin_does_not_restart_rotation() {
        let t0 = Instant::now();
        let mut spinner = Spinner::with_configuration(config());
        spinner.show_in(HOST, t0);
        spinner.tick(t0 + ms(300));
        spinner.indicator_mut().begin_animation(t0 + ms(700));
        assert!(spinner.indicator().is_animating());
        spinner.tick(t0 + ms(900));
        assert_eq!(spinner.indicator_opacity(t0 + ms(900)), 1.0);
    }

    #[test]
    fn backdrop_and_pulse_follow_animation_duration() {
        let t0 = Instant::now();
        let mut spinner = Spinner::with_configuration(config());
        assert_eq!(spinner.background_color(t0), Color::TRANSPARENT);

        spinner.show_in(HOST, t0);
        assert_eq!(spinner.background_color(t0).a, 0);
        assert_eq!(spinner.container_scale(t0), 0.0);

        let settled = t0 + ms(300);
        assert_eq!(spinner.background_color(settled), spinner.configuration().background.effective_color());
        assert_eq!(spinner.container_scale(settled), 1.0);

        // The pulse overshoots past 1.0 on its way.
        let peak = (0..300).map(|m| spinner.container_scale(t0 + ms(m))).fold(0.0_f32, f32::max);
        assert!(peak > 1.05 && peak <= 1.1 + 1e-3);
    }

    #[test]
    fn non_positive_durations_collapse_to_immediate() {
        let t0 = Instant::now();
        let mut spinner = Spinner::with_configuration(SpinnerConfiguration {
            animation_duration: -1.0,
            minimum_visible_time: -5.0,
            ..SpinnerConfiguration::default()
        });
        let (fired, completion) = flag();
        spinner.show_in(HOST, t0);
        spinner.hide_then(t0, completion);
        assert_eq!(spinner.fade_starts_at(), Some(t0));
        spinner.tick(t0);
        assert!(fired.get());
    }

    #[test]
    fn huge_minimum_visible_time_never_fades() {
        let t0 = Instant::now();
        let mut spinner = Spinner::with_configuration(SpinnerConfiguration {
            minimum_visible_time: 1e19,
            ..config()
        });
        let (fired, completion) = flag();
        spinner.show_in(HOST, t0);
        spinner.hide_then(t0, completion);

        assert_eq!(spinner.phase(), Phase::Hiding);
        assert_eq!(spinner.fade_starts_at(), None);
        assert!(spinner.tick(t0 + Duration::from_secs(86_400)));
        assert_eq!(spinner.opacity(t0 + Duration::from_secs(86_400)), 1.0);
        assert!(!fired.get());
    }

    #[test]
    fn oversized_minimum_still_delays_fade() {
        let t0 = Instant::now();
        let mut spinner = Spinner::with_configuration(SpinnerConfiguration {
            minimum_visible_time: 1e300,
            ..config()
        });
        spinner.show_in(HOST, t0);
        spinner.hide(t0 + ms(10));
        assert!(spinner.fade_starts_at().map_or(true, |at| at >= t0 + Duration::from_secs(3600)));
        assert!(spinner.tick(t0 + ms(400)));
        assert_eq!(spinner.phase(), Phase::Hiding);
    }

    #[test]
    fn huge_animation_duration_never_completes_pulse() {
        let t0 = Instant::now();
        let mut spinner = Spinner::with_configuration(SpinnerConfiguration {
            animation_duration: 1e19,
            ..config()
        });
        spinner.show_in(HOST, t0);
        assert!(spinner.tick(t0));
        assert!(spinner.tick(t0 + Duration::from_secs(3600)));
        assert_eq!(spinner.phase(), Phase::Showing);
        assert!(!spinner.indicator().is_animating());

        spinner.hide(t0 + Duration::from_secs(3600));
        assert_eq!(spinner.fade_starts_at(), Some(t0 + Duration::from_secs(3600)));
        assert!(spinner.tick(t0 + Duration::from_secs(7200)));
        assert_eq!(spinner.phase(), Phase::Hiding);
    }

    #[test]
    fn completion_can_reshow_a_shared_spinner() {
        let t0 = Instant::now();
        let shared = Rc::new(RefCell::new(Spinner::with_configuration(config())));
        shared.borrow_mut().show_in(HOST, t0);

        let handle = shared.clone();
        shared.borrow_mut().hide_then(t0, move || {
            assert_eq!(handle.borrow().phase(), Phase::Hidden);
            assert!(handle.borrow_mut().show_in_with_title(HOST, Some("again"), t0 + ms(1300)));
        });

        assert!(shared.borrow_mut().advance(t0 + ms(1299)).is_empty());
        let due = shared.borrow_mut().advance(t0 + ms(1300));
        assert_eq!(due.len(), 1);
        for completion in due {
            completion();
        }

        let spinner = shared.borrow();
        assert_eq!(spinner.phase(), Phase::Showing);
        assert_eq!(spinner.title(), "again");
        assert_eq!(spinner.shown_at(), Some(t0 + ms(1300)));
    }

    #[test]
    fn resize_tracks_host_only_while_attached() {
        let t0 = Instant::now();
        let mut spinner = Spinner::with_configuration(config());
        spinner.resize_host(HOST);
        assert_eq!(spinner.frame(), Rect::ZERO);

        spinner.show_in(HOST, t0);
        let rotated = Rect::from_size(480.0, 640.0);
        spinner.resize_host(rotated);
        assert_eq!(spinner.frame(), rotated);
        assert_eq!(spinner.layout(&Fixed).container.center(), Point::new(240.0, 320.0));
    }

    #[test]
    fn hit_test_covers_container_only() {
        let t0 = Instant::now();
        let mut spinner = Spinner::with_configuration(config());
        assert!(!spinner.container_contains(Point::new(320.0, 240.0), &Fixed));

        spinner.show_in(HOST, t0);
        assert!(spinner.container_contains(Point::new(320.0, 240.0), &Fixed));
        assert!(!spinner.container_contains(Point::new(5.0, 5.0), &Fixed));
    }

    #[test]
    fn default_configuration_is_snapshotted() {
        let original = SpinnerConfiguration::default_configuration();
        let before = Spinner::new();

        SpinnerConfiguration::set_default_configuration(SpinnerConfiguration {
            minimum_visible_time: 4.0,
            ..original.clone()
        });
        let after = Spinner::new();
        SpinnerConfiguration::set_default_configuration(original.clone());

        assert_eq!(before.configuration().minimum_visible_time, original.minimum_visible_time);
        assert_eq!(after.configuration().minimum_visible_time, 4.0);
    }
}
