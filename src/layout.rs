//! Content layout: container card, indicator and word-wrapped title.

use crate::config::ContainerConfig;
use crate::geometry::{Rect, Size};

/// Text measurement used for wrapping the title.
pub trait TextMetrics {
    fn advance(&self, ch: char) -> f32;
    fn line_height(&self) -> f32;

    fn measure(&self, text: &str) -> f32 {
        text.chars().map(|ch| self.advance(ch)).sum()
    }
}

/// Metrics of a `fontdue` font at a fixed pixel size.
pub struct FontMetrics<'a> {
    pub font: &'a fontdue::Font,
    pub size: f32,
}

impl TextMetrics for FontMetrics<'_> {
    fn advance(&self, ch: char) -> f32 {
        self.font.metrics(ch, self.size).advance_width
    }

    fn line_height(&self) -> f32 {
        self.font
            .horizontal_line_metrics(self.size)
            .map(|lm| lm.new_line_size)
            .unwrap_or(self.size * 1.2)
    }
}

/// Frames of the overlay content, in overlay-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinnerLayout {
    pub container: Rect,
    pub indicator: Rect,
    pub label: Rect,
    pub lines: Vec<String>,
    pub line_height: f32,
}

/// Lay out the card inside `bounds`.
///
/// The container has a fixed width and grows to fit its content. The title gap
/// collapses to zero when there is no title. The indicator keeps its preferred
/// size unless that is wider than the container's inner width, in which case
/// it shrinks with its aspect ratio kept.
pub fn compute(
    bounds: Rect,
    container: &ContainerConfig,
    indicator_size: Size,
    title: &str,
    metrics: &dyn TextMetrics,
) -> SpinnerLayout {
    let insets = container.insets;
    let width = container.preferred_width.max(0.0);
    let inner_width = (width - insets.horizontal()).max(0.0);

    let indicator = fit_width(indicator_size, inner_width);

    let (lines, gap) = if title.is_empty() {
        (Vec::new(), 0.0)
    } else {
        (wrap_words(title, inner_width, metrics), container.spacing)
    };
    let line_height = metrics.line_height();
    let label_height = lines.len() as f32 * line_height;

    let height = insets.top + indicator.height + gap + label_height + insets.bottom;
    let container_rect = bounds.centered(Size::new(width, height));

    let indicator_rect = Rect::new(
        container_rect.x + (width - indicator.width) / 2.0,
        container_rect.y + insets.top,
        indicator.width,
        indicator.height,
    );
    let label_rect = Rect::new(
        container_rect.x + insets.left,
        indicator_rect.max_y() + gap,
        inner_width,
        label_height,
    );

    SpinnerLayout {
        container: container_rect,
        indicator: indicator_rect,
        label: label_rect,
        lines,
        line_height,
    }
}

fn fit_width(size: Size, max_width: f32) -> Size {
    let width = size.width.max(0.0);
    let height = size.height.max(0.0);
    if width <= max_width || width == 0.0 {
        return Size::new(width, height);
    }
    let factor = max_width / width;
    Size::new(max_width, height * factor)
}

/// Greedy word wrap. Explicit newlines are kept; words longer than a line are
/// broken between characters.
pub fn wrap_words(text: &str, max_width: f32, metrics: &dyn TextMetrics) -> Vec<String> {
    let mut lines = Vec::new();
    let space = metrics.advance(' ');

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_w = 0.0;

        for word in paragraph.split_whitespace() {
            let word_w = metrics.measure(word);
            let needed = if line.is_empty() { word_w } else { line_w + space + word_w };

            if needed <= max_width {
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(word);
                line_w = needed;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_w = 0.0;
            }

            if word_w <= max_width {
                line.push_str(word);
                line_w = word_w;
                continue;
            }

            // Word alone overflows: break it by character.
            for ch in word.chars() {
                let cw = metrics.advance(ch);
                if line_w + cw > max_width && !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                    line_w = 0.0;
                }
                line.push(ch);
                line_w += cw;
            }
        }

        if !line.is_empty() || paragraph.trim().is_empty() {
            lines.push(line);
        }
    }
    lines
}
