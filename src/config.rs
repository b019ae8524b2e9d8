//! Spinner configuration: visual and timing parameters, TOML loading, and the
//! process-wide default consulted by newly constructed spinners.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::{OnceLock, PoisonError, RwLock};

use log::{info, warn};

use crate::color::Color;
use crate::geometry::{Insets, Size};
use crate::indicator::IndicatorKind;

#[derive(Debug, Clone, Deserialize)]
pub struct SpinnerConfiguration {
    #[serde(default)]
    pub background: BackgroundConfig,
    #[serde(default)]
    pub container: ContainerConfig,
    #[serde(default)]
    pub indicator: IndicatorConfig,
    #[serde(default)]
    pub title: TitleConfig,
    /// Background fade-in, container pulse and hide fade-out, in seconds.
    #[serde(default = "default_animation_duration")]
    pub animation_duration: f64,
    /// Indicator fade-in after the pulse, in seconds.
    #[serde(default = "default_secondary_animation_duration")]
    pub secondary_animation_duration: f64,
    /// The overlay never fades out earlier than this after being shown.
    #[serde(default = "default_minimum_visible_time")]
    pub minimum_visible_time: f64,
    /// Container scale keyframes for the show pulse.
    #[serde(default = "default_pulse_values")]
    pub pulse_values: Vec<f32>,
    #[serde(default)]
    pub indicator_reveal: IndicatorReveal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub color: Color,
    pub opacity: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    pub color: Color,
    pub corner_radius: f32,
    pub shadow_color: Color,
    pub shadow_radius: f32,
    pub shadow_opacity: f32,
    pub shadow_offset: Size,
    pub insets: Insets,
    /// Gap between indicator and title; collapses when the title is empty.
    pub spacing: f32,
    pub preferred_width: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub kind: IndicatorKind,
    pub size: Size,
    pub circle: CircleStyle,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CircleStyle {
    pub line_width: f32,
    pub line_cap: LineCap,
    pub line_color: Color,
    pub inner_color: Color,
    /// Arc start as a fraction of a full turn.
    pub line_start: f32,
    /// Arc end as a fraction of a full turn.
    pub line_end: f32,
    /// Seconds per full rotation.
    pub revolution_duration: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TitleConfig {
    /// TTF/OTF file for the title; system fonts are tried when absent.
    pub font: Option<PathBuf>,
    pub font_size: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

/// When the indicator starts spinning relative to the container pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorReveal {
    /// Start once the pulse has finished, fading in over the secondary duration.
    #[default]
    AfterPulse,
    /// Start together with the pulse, fully opaque.
    WithPulse,
}

impl Default for SpinnerConfiguration {
    fn default() -> Self {
        SpinnerConfiguration {
            background: BackgroundConfig::default(),
            container: ContainerConfig::default(),
            indicator: IndicatorConfig::default(),
            title: TitleConfig::default(),
            animation_duration: default_animation_duration(),
            secondary_animation_duration: default_secondary_animation_duration(),
            minimum_visible_time: default_minimum_visible_time(),
            pulse_values: default_pulse_values(),
            indicator_reveal: IndicatorReveal::default(),
        }
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        BackgroundConfig { color: Color::BLACK, opacity: 0.3 }
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        ContainerConfig {
            color: Color::WHITE,
            corner_radius: 5.0,
            shadow_color: Color::BLACK,
            shadow_radius: 5.0,
            shadow_opacity: 0.5,
            shadow_offset: Size::default(),
            insets: Insets::uniform(20.0),
            spacing: 20.0,
            preferred_width: 200.0,
        }
    }
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        IndicatorConfig {
            kind: IndicatorKind::default(),
            size: Size::new(50.0, 50.0),
            circle: CircleStyle::default(),
        }
    }
}

impl Default for CircleStyle {
    fn default() -> Self {
        CircleStyle {
            line_width: 5.0,
            line_cap: LineCap::Round,
            line_color: Color::MAIN_RED,
            inner_color: Color::TRANSPARENT,
            line_start: 0.1,
            line_end: 0.9,
            revolution_duration: 1.0,
        }
    }
}

impl Default for TitleConfig {
    fn default() -> Self {
        TitleConfig { font: None, font_size: 14.0, color: Color::BLACK }
    }
}

impl BackgroundConfig {
    /// Backdrop color once fully faded in.
    pub fn effective_color(&self) -> Color {
        self.color.scale_alpha(self.opacity)
    }
}

fn default_animation_duration() -> f64 { 0.3 }
fn default_secondary_animation_duration() -> f64 { 0.2 }
fn default_minimum_visible_time() -> f64 { 1.0 }
fn default_pulse_values() -> Vec<f32> { vec![0.0, 1.0, 1.1, 1.0] }

static DEFAULT_CONFIGURATION: OnceLock<RwLock<SpinnerConfiguration>> = OnceLock::new();

fn default_slot() -> &'static RwLock<SpinnerConfiguration> {
    DEFAULT_CONFIGURATION.get_or_init(|| RwLock::new(SpinnerConfiguration::default()))
}

impl SpinnerConfiguration {
    /// Snapshot of the process-wide default used by `Spinner::new`.
    pub fn default_configuration() -> Self {
        default_slot().read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Replace the process-wide default. Spinners already constructed keep
    /// the configuration they were built with.
    pub fn set_default_configuration(configuration: SpinnerConfiguration) {
        *default_slot().write().unwrap_or_else(PoisonError::into_inner) = configuration;
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()))?;
        Self::parse(&content).map_err(|e| format!("parse {}: {e}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// First existing config file in the lookup chain:
    /// 1. $SPINNER_OVERLAY_CONFIG
    /// 2. $XDG_CONFIG_HOME/spinner-overlay/spinner.toml (or ~/.config/...)
    /// 3. ./spinner.toml
    pub fn find() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".config")));

        let candidates: Vec<PathBuf> = vec![
            std::env::var("SPINNER_OVERLAY_CONFIG").ok().map(PathBuf::from),
            config_home.map(|d| d.join("spinner-overlay/spinner.toml")),
            Some(PathBuf::from("spinner.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        candidates.into_iter().find(|p| p.exists())
    }

    /// Load the first config found by [`Self::find`], falling back to the
    /// built-in defaults when none exists or it fails to parse.
    pub fn find_and_load() -> Self {
        if let Some(path) = Self::find() {
            match Self::load(&path) {
                Ok(config) => {
                    info!("Loaded spinner config from {}", path.display());
                    return config;
                }
                Err(e) => warn!("Failed to load {}: {e}", path.display()),
            }
        }

        info!("Using built-in default spinner config");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_toml() {
        let toml_str = r##"
animation_duration = 0.5
secondary_animation_duration = 0.1
minimum_visible_time = 2.0
pulse_values = [0.0, 1.0, 1.05, 1.0]
indicator_reveal = "with_pulse"

[background]
color = "#102030"
opacity = 0.6

[container]
color = "#202020"
corner_radius = 12.0
shadow_offset = { width = 0.0, height = 2.0 }
insets = { top = 16.0, left = 12.0, bottom = 16.0, right = 12.0 }
spacing = 8.0
preferred_width = 240.0

[indicator]
kind = "circle"
size = { width = 40.0, height = 40.0 }

[indicator.circle]
line_width = 3.0
line_cap = "butt"
line_color = "FFFFFF"

[title]
font = "/usr/share/fonts/Inter.otf"
font_size = 16.0
color = "#FFFFFFCC"
"##;
        let config = SpinnerConfiguration::parse(toml_str).unwrap();
        assert_eq!(config.animation_duration, 0.5);
        assert_eq!(config.minimum_visible_time, 2.0);
        assert_eq!(config.pulse_values, vec![0.0, 1.0, 1.05, 1.0]);
        assert_eq!(config.indicator_reveal, IndicatorReveal::WithPulse);
        assert_eq!(config.background.color, Color::rgb(0x10, 0x20, 0x30));
        assert_eq!(config.container.insets.left, 12.0);
        assert_eq!(config.container.shadow_offset.height, 2.0);
        assert_eq!(config.indicator.size, Size::new(40.0, 40.0));
        assert_eq!(config.indicator.circle.line_cap, LineCap::Butt);
        assert_eq!(config.indicator.circle.line_color, Color::WHITE);
        // Unset style keys keep their defaults.
        assert_eq!(config.indicator.circle.line_start, 0.1);
        assert_eq!(config.title.color, Color::rgba(255, 255, 255, 0xCC));
        assert_eq!(config.title.font.as_deref(), Some(Path::new("/usr/share/fonts/Inter.otf")));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config = SpinnerConfiguration::parse("minimum_visible_time = 0.5\n").unwrap();
        assert_eq!(config.minimum_visible_time, 0.5);
        assert_eq!(config.animation_duration, 0.3);
        assert_eq!(config.secondary_animation_duration, 0.2);
        assert_eq!(config.container.preferred_width, 200.0);
        assert_eq!(config.container.spacing, 20.0);
        assert_eq!(config.indicator.circle.line_color, Color::MAIN_RED);
        assert_eq!(config.indicator_reveal, IndicatorReveal::AfterPulse);
        assert_eq!(config.pulse_values, vec![0.0, 1.0, 1.1, 1.0]);
    }

    #[test]
    fn negative_durations_are_accepted() {
        let config = SpinnerConfiguration::parse("animation_duration = -1.0\nminimum_visible_time = -3.0\n").unwrap();
        assert_eq!(config.animation_duration, -1.0);
        assert_eq!(config.minimum_visible_time, -3.0);
    }

    #[test]
    fn invalid_color_is_rejected() {
        let err = SpinnerConfiguration::parse("[background]\ncolor = \"nope\"\n").unwrap_err();
        assert!(err.contains("invalid color"));
    }

    #[test]
    fn effective_background_color() {
        let bg = BackgroundConfig::default();
        assert_eq!(bg.effective_color(), Color::rgba(0, 0, 0, 77));
    }

    #[test]
    fn load_reports_path_on_error() {
        let err = SpinnerConfiguration::load(Path::new("/nonexistent/spinner.toml")).unwrap_err();
        assert!(err.starts_with("read /nonexistent/spinner.toml"));
    }
}
