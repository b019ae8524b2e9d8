//! Modal loading spinner overlay.
//! Used by the X11 daemon binary and the preview binary (cross-platform).

pub mod animation;
pub mod circle;
pub mod color;
pub mod config;
pub mod geometry;
pub mod indicator;
pub mod layout;
pub mod renderer;
pub mod spinner;

pub use config::SpinnerConfiguration;
pub use indicator::{IndicatorKind, SpinnerIndicator};
pub use spinner::{Phase, Spinner};
