//! Local preview tool: renders the spinner's show/hide timeline to PNG files.
//! No X11 needed; runs on macOS/Linux/Windows.
//!
//! Usage: cargo run --bin preview [-- --config PATH] [-- --title TEXT]
//!
//! Outputs:
//!   preview-output/frame-NNNN.png   timeline frames, named by milliseconds
//!   preview-output/atlas.png        single tiled overview

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use spinner_overlay::geometry::Rect;
use spinner_overlay::renderer::Renderer;
use spinner_overlay::{Spinner, SpinnerConfiguration};

const SCREEN_W: u32 = 480;
const SCREEN_H: u32 = 360;

/// Hide is requested this long after show, well inside the minimum visible time.
const HIDE_AT_MS: u64 = 400;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let arg_after = |flag: &str| std::env::args().skip_while(|a| a != flag).nth(1);

    let config = match arg_after("--config").map(PathBuf::from) {
        Some(path) => SpinnerConfiguration::load(&path).unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(1);
        }),
        None => SpinnerConfiguration::find_and_load(),
    };
    let title = arg_after("--title").unwrap_or_else(|| "Loading your library".to_string());

    let rend = Renderer::new(&config.title);
    if !rend.has_font() {
        println!("no font found; frames will have no title");
    }

    let out = PathBuf::from("preview-output");
    std::fs::create_dir_all(&out).expect("create preview-output");

    let t0 = Instant::now();
    let mut spinner = Spinner::with_configuration(config);
    spinner.show_in_with_title(Rect::from_size(SCREEN_W as f32, SCREEN_H as f32), Some(&title), t0);

    let app_bg = generate_app_background(SCREEN_W, SCREEN_H);
    let mut all_frames: Vec<(String, Vec<u32>)> = Vec::new();
    let mut hide_requested = false;
    let mut ms = 0_u64;

    // Sample every 50ms until the spinner detaches.
    loop {
        let now = t0 + Duration::from_millis(ms);
        if !hide_requested && ms >= HIDE_AT_MS {
            spinner.hide(now);
            hide_requested = true;
        }
        let on_screen = spinner.tick(now);

        let Some(frame) = rend.render(&spinner, now) else {
            break;
        };
        let composited = composite_over_bg(&app_bg, &frame.argb);
        let label = format!("frame-{ms:04}");
        save_argb_png(&out.join(format!("{label}.png")), SCREEN_W, SCREEN_H, &composited);
        all_frames.push((label, composited));

        if !on_screen || ms > 10_000 {
            break;
        }
        ms += 50;
    }
    println!("rendered {} timeline frames", all_frames.len());

    // ── Build atlas ─────────────────────────────────────────
    let cols = 6_u32;
    let thumb_w = SCREEN_W / 2;
    let thumb_h = SCREEN_H / 2;
    let pad = 8_u32;
    let rows = ((all_frames.len() as u32) + cols - 1) / cols;

    let atlas_w = cols * (thumb_w + pad) + pad;
    let atlas_h = rows.max(1) * (thumb_h + pad) + pad;

    let mut atlas: Vec<u8> = [30_u8, 30, 46, 255].repeat((atlas_w * atlas_h) as usize);

    for (idx, (_label, argb)) in all_frames.iter().enumerate() {
        let col = idx as u32 % cols;
        let row = idx as u32 / cols;
        let ox = pad + col * (thumb_w + pad);
        let oy = pad + row * (thumb_h + pad);

        // Downsample 2x and blit (frames are opaque after compositing)
        for ty in 0..thumb_h {
            for tx in 0..thumb_w {
                let sx = (tx * 2).min(SCREEN_W - 1);
                let sy = (ty * 2).min(SCREEN_H - 1);
                let pixel = argb[(sy * SCREEN_W + sx) as usize];
                let di = (((oy + ty) * atlas_w + ox + tx) * 4) as usize;
                atlas[di] = ((pixel >> 16) & 0xFF) as u8;
                atlas[di + 1] = ((pixel >> 8) & 0xFF) as u8;
                atlas[di + 2] = (pixel & 0xFF) as u8;
                atlas[di + 3] = 255;
            }
        }
    }

    let atlas_path = out.join("atlas.png");
    save_rgba_png(&atlas_path, atlas_w, atlas_h, &atlas);
    println!("\natlas: {} ({}x{}, {} frames)", atlas_path.display(), atlas_w, atlas_h, all_frames.len());
    println!("individual frames in {}/", out.display());
}

fn save_argb_png(path: &Path, w: u32, h: u32, argb: &[u32]) {
    let mut rgba = Vec::with_capacity(argb.len() * 4);
    for &pixel in argb {
        rgba.push(((pixel >> 16) & 0xFF) as u8);
        rgba.push(((pixel >> 8) & 0xFF) as u8);
        rgba.push((pixel & 0xFF) as u8);
        rgba.push(((pixel >> 24) & 0xFF) as u8);
    }
    save_rgba_png(path, w, h, &rgba);
}

fn save_rgba_png(path: &Path, w: u32, h: u32, rgba: &[u8]) {
    let file = std::fs::File::create(path).expect("create png");
    let buf = std::io::BufWriter::new(file);
    let mut encoder = png::Encoder::new(buf, w, h);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().expect("png header");
    writer.write_image_data(rgba).expect("png data");
}

/// Fake app screen behind the overlay: light gradient with a header bar.
fn generate_app_background(w: u32, h: u32) -> Vec<u32> {
    let mut argb = Vec::with_capacity((w * h) as usize);
    for y in 0..h {
        for x in 0..w {
            let (r, g, b) = if y < 44 {
                (246, 246, 248)
            } else {
                let t = x as f32 / w as f32;
                ((230.0 - 20.0 * t) as u32, (236.0 - 10.0 * t) as u32, 245)
            };
            argb.push(0xFF000000 | r << 16 | g << 8 | b);
        }
    }
    argb
}

/// Composite premultiplied ARGB over an opaque background.
fn composite_over_bg(bg: &[u32], overlay: &[u32]) -> Vec<u32> {
    bg.iter()
        .zip(overlay.iter())
        .map(|(&bg_px, &ov_px)| {
            let oa = (ov_px >> 24) & 0xFF;
            if oa == 0 {
                return bg_px;
            }
            let inv = 255 - oa;
            let channel = |shift: u32| {
                let o = (ov_px >> shift) & 0xFF;
                let b = (bg_px >> shift) & 0xFF;
                (o + b * inv / 255).min(255)
            };
            0xFF000000 | channel(16) << 16 | channel(8) << 8 | channel(0)
        })
        .collect()
}
