//! Software renderer for the spinner overlay.
//!
//! Composites one frame into an ARGB buffer the size of the spinner's host:
//! backdrop first, then the card (shadow, rounded container, indicator, title)
//! drawn into its own pixmap and scaled around the container center.

use std::path::{Path as FsPath, PathBuf};
use std::time::Instant;

use log::{debug, warn};
use tiny_skia::*;

use crate::color::Color;
use crate::config::TitleConfig;
use crate::geometry::Rect;
use crate::layout::{FontMetrics, SpinnerLayout, TextMetrics};
use crate::spinner::Spinner;

/// Fonts tried when the configuration does not name one.
const SYSTEM_FONTS: [&str; 4] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
];

// Shadow layers as (fraction of shadow radius, share of shadow opacity).
const SHADOW_LAYERS: [(f32, f32); 3] = [
    (1.0, 0.2),  // ambient
    (0.6, 0.3),  // medium
    (0.3, 0.5),  // tight
];

/// Scale below which the card is not drawn (non-invertible transform).
const MIN_SCALE: f32 = 0.001;

pub struct Renderer {
    font: Option<fontdue::Font>,
    font_size: f32,
    title_color: Color,
}

/// One rendered overlay frame.
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Premultiplied 0xAARRGGBB pixels, row-major.
    pub argb: Vec<u32>,
}

/// Metrics used when no font could be loaded: the title takes no space.
struct NoText;

impl TextMetrics for NoText {
    fn advance(&self, _ch: char) -> f32 {
        0.0
    }

    fn line_height(&self) -> f32 {
        0.0
    }
}

impl Renderer {
    pub fn new(title: &TitleConfig) -> Self {
        let candidates: Vec<PathBuf> = title
            .font
            .iter()
            .cloned()
            .chain(SYSTEM_FONTS.iter().map(PathBuf::from))
            .collect();

        let font = candidates.iter().find_map(|path| match load_font(path) {
            Ok(font) => {
                debug!("Title font: {}", path.display());
                Some(font)
            }
            Err(e) => {
                debug!("{e}");
                None
            }
        });
        if font.is_none() {
            warn!("No usable title font found; titles will not be drawn");
        }

        Self::with_font(font, title)
    }

    pub fn with_font(font: Option<fontdue::Font>, title: &TitleConfig) -> Self {
        Renderer { font, font_size: title.font_size, title_color: title.color }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Metrics matching what `render` uses for the title.
    pub fn metrics(&self) -> Box<dyn TextMetrics + '_> {
        match &self.font {
            Some(font) => Box::new(FontMetrics { font, size: self.font_size }),
            None => Box::new(NoText),
        }
    }

    // ── Main entry point ────────────────────────────────────

    /// Render the spinner as it looks at `now`. `None` while it is detached.
    pub fn render(&self, spinner: &Spinner, now: Instant) -> Option<Frame> {
        if !spinner.is_attached() {
            return None;
        }
        let bounds = spinner.frame();
        let width = bounds.width.round() as u32;
        let height = bounds.height.round() as u32;
        let mut pixmap = Pixmap::new(width, height)?;
        pixmap.fill(tiny_skia::Color::TRANSPARENT);

        let opacity = spinner.opacity(now);
        let backdrop = spinner.background_color(now).scale_alpha(opacity);
        fill_rect(&mut pixmap, Rect::from_size(width as f32, height as f32), backdrop);

        let scale = spinner.container_scale(now);
        if opacity > 0.0 && scale > MIN_SCALE {
            let metrics = self.metrics();
            let layout = spinner.layout(metrics.as_ref());
            if let Some((card, margin)) = self.render_card(spinner, &layout, metrics.as_ref(), now) {
                let center = layout.container.center();
                let card_cx = margin + layout.container.width / 2.0;
                let card_cy = margin + layout.container.height / 2.0;
                let transform = Transform::from_row(
                    scale, 0.0, 0.0, scale,
                    center.x - scale * card_cx,
                    center.y - scale * card_cy,
                );
                let paint = PixmapPaint {
                    opacity,
                    quality: FilterQuality::Bilinear,
                    ..PixmapPaint::default()
                };
                pixmap.draw_pixmap(0, 0, card.as_ref(), &paint, transform, None);
            }
        }

        Some(Frame { width, height, argb: pixmap_to_argb(&pixmap) })
    }

    // ── Card ────────────────────────────────────────────────

    /// Draw shadow, container, indicator and title at unit scale into a pixmap
    /// padded by a margin for the shadow. Returns the pixmap and its margin.
    fn render_card(
        &self,
        spinner: &Spinner,
        layout: &SpinnerLayout,
        metrics: &dyn TextMetrics,
        now: Instant,
    ) -> Option<(Pixmap, f32)> {
        let config = &spinner.configuration().container;
        let offset = config.shadow_offset;
        let margin = (config.shadow_radius.max(0.0) * 2.0 + offset.width.abs().max(offset.height.abs())).ceil();

        let w = layout.container.width;
        let h = layout.container.height;
        let mut card = Pixmap::new((w + margin * 2.0).ceil() as u32, (h + margin * 2.0).ceil() as u32)?;

        // Drop shadow, approximated with stacked translucent rounded rects.
        for &(reach, share) in &SHADOW_LAYERS {
            let color = config.shadow_color.scale_alpha(config.shadow_opacity * share);
            let s = config.shadow_radius.max(0.0) * reach;
            draw_rounded_rect(&mut card,
                Rect::new(margin - s + offset.width, margin - s + offset.height, w + s * 2.0, h + s * 2.0),
                config.corner_radius + s,
                color);
        }

        draw_rounded_rect(&mut card, Rect::new(margin, margin, w, h), config.corner_radius, config.color);

        let dx = margin - layout.container.x;
        let dy = margin - layout.container.y;
        spinner
            .indicator()
            .draw(&mut card, layout.indicator.offset(dx, dy), spinner.indicator_opacity(now), now);

        if let Some(font) = &self.font {
            let label = layout.label.offset(dx, dy);
            for (i, line) in layout.lines.iter().enumerate() {
                let line_w = metrics.measure(line);
                let x = label.x + (label.width - line_w) / 2.0;
                let y = label.y + i as f32 * layout.line_height;
                rasterize_text(&mut card, line, font, self.font_size, x, y, self.title_color);
            }
        }

        Some((card, margin))
    }
}

// ── Drawing helpers ─────────────────────────────────────────

fn fill_rect(pixmap: &mut Pixmap, rect: Rect, c: Color) {
    draw_rounded_rect(pixmap, rect, 0.0, c);
}

fn rounded_rect_path(rect: Rect, radius: f32) -> Option<Path> {
    let Rect { x, y, width: w, height: h } = rect;
    if w <= 0.0 || h <= 0.0 { return None; }
    let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.quad_to(x + w, y, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.quad_to(x + w, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.quad_to(x, y + h, x, y + h - r);
    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);
    pb.close();
    pb.finish()
}

fn draw_rounded_rect(pixmap: &mut Pixmap, rect: Rect, radius: f32, c: Color) {
    if c.a == 0 { return; }
    if let Some(path) = rounded_rect_path(rect, radius) {
        let paint = Paint {
            shader: Shader::SolidColor(c.to_skia()),
            anti_alias: true,
            ..Paint::default()
        };
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }
}

/// Rasterize text with y = top of text em-box (not baseline).
fn rasterize_text(pixmap: &mut Pixmap, text: &str, font: &fontdue::Font, size: f32, x: f32, y: f32, c: Color) {
    if c.a == 0 { return; }
    let pw = pixmap.width() as i32;
    let ph = pixmap.height() as i32;
    let data = pixmap.data_mut();

    let ascent = font.horizontal_line_metrics(size)
        .map(|lm| lm.ascent)
        .unwrap_or(size * 0.8);
    let baseline_y = y + ascent;

    let mut cursor_x = x;
    for ch in text.chars() {
        let (metrics, bitmap) = font.rasterize(ch, size);
        let gx = cursor_x as i32 + metrics.xmin;
        let gy = baseline_y as i32 - metrics.ymin - metrics.height as i32;

        for row in 0..metrics.height {
            for col in 0..metrics.width {
                let px = gx + col as i32;
                let py = gy + row as i32;
                if px < 0 || py < 0 || px >= pw || py >= ph { continue; }
                let coverage = bitmap[row * metrics.width + col];
                if coverage == 0 { continue; }
                let alpha = (coverage as u32 * c.a as u32) / 255;
                let idx = ((py as u32 * pw as u32 + px as u32) * 4) as usize;
                let inv = 255 - alpha;
                data[idx] = ((c.r as u32 * alpha + data[idx] as u32 * inv) / 255) as u8;
                data[idx + 1] = ((c.g as u32 * alpha + data[idx + 1] as u32 * inv) / 255) as u8;
                data[idx + 2] = ((c.b as u32 * alpha + data[idx + 2] as u32 * inv) / 255) as u8;
                data[idx + 3] = (alpha + data[idx + 3] as u32 * inv / 255).min(255) as u8;
            }
        }
        cursor_x += metrics.advance_width;
    }
}

/// Premultiplied RGBA bytes to 0xAARRGGBB words.
pub fn pixmap_to_argb(pixmap: &Pixmap) -> Vec<u32> {
    let data = pixmap.data();
    let mut argb = Vec::with_capacity(data.len() / 4);
    for chunk in data.chunks_exact(4) {
        argb.push((chunk[3] as u32) << 24 | (chunk[0] as u32) << 16 | (chunk[1] as u32) << 8 | chunk[2] as u32);
    }
    argb
}

fn load_font(path: &FsPath) -> Result<fontdue::Font, String> {
    let data = std::fs::read(path).map_err(|e| format!("read font {}: {e}", path.display()))?;
    fontdue::Font::from_bytes(data, fontdue::FontSettings::default())
        .map_err(|e| format!("parse font {}: {e}", path.display()))
}
