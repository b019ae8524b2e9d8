//! X11 host surface for the spinner: an override-redirect, 32-bit ARGB window
//! covering the screen. Follows root window resizes so the spinner can re-layout.

use x11rb::connection::Connection;
use x11rb::protocol::xproto::*;
use x11rb::protocol::Event;
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;

use log::debug;

use spinner_overlay::geometry::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    /// The screen (and with it the window) changed size.
    Resized { width: u16, height: u16 },
    /// Pointer press, in window coordinates.
    Pressed(Point),
}

pub struct OverlayWindow {
    conn: RustConnection,
    root: Window,
    window: Window,
    gc: Gcontext,
    visible: bool,
    width: u16,
    height: u16,
}

impl OverlayWindow {
    /// Create the window at full screen size, unmapped.
    pub fn new() -> Result<Self, String> {
        let (conn, screen_num) = RustConnection::connect(None).map_err(|e| format!("X11 connect: {e}"))?;
        let screen = &conn.setup().roots[screen_num];
        let root = screen.root;
        let width = screen.width_in_pixels;
        let height = screen.height_in_pixels;

        let (visual, depth) = find_argb_visual(screen).unwrap_or((screen.root_visual, screen.root_depth));

        let colormap = conn.generate_id().map_err(|e| e.to_string())?;
        conn.create_colormap(ColormapAlloc::NONE, colormap, root, visual)
            .map_err(|e| e.to_string())?;

        let window = conn.generate_id().map_err(|e| e.to_string())?;
        let values = CreateWindowAux::new()
            .override_redirect(1)
            .background_pixel(0)
            .border_pixel(0)
            .colormap(colormap)
            .event_mask(EventMask::EXPOSURE | EventMask::STRUCTURE_NOTIFY | EventMask::BUTTON_PRESS);

        conn.create_window(depth, window, root, 0, 0, width, height, 0, WindowClass::INPUT_OUTPUT, visual, &values)
            .map_err(|e| format!("create_window: {e}"))?;

        // Root geometry changes (RandR) arrive as ConfigureNotify on the root.
        conn.change_window_attributes(root, &ChangeWindowAttributesAux::new().event_mask(EventMask::STRUCTURE_NOTIFY))
            .map_err(|e| e.to_string())?;

        let atom_state = intern_atom(&conn, "_NET_WM_STATE")?;
        let atom_above = intern_atom(&conn, "_NET_WM_STATE_ABOVE")?;
        conn.change_property32(PropMode::REPLACE, window, atom_state, AtomEnum::ATOM, &[atom_above])
            .map_err(|e| e.to_string())?;

        conn.change_property8(PropMode::REPLACE, window, AtomEnum::WM_NAME, AtomEnum::STRING, b"spinner-overlay")
            .map_err(|e| e.to_string())?;

        let gc = conn.generate_id().map_err(|e| e.to_string())?;
        conn.create_gc(gc, window, &CreateGCAux::new()).map_err(|e| e.to_string())?;
        conn.flush().map_err(|e| e.to_string())?;

        debug!("Window created: {width}x{height} depth={depth}");

        Ok(OverlayWindow { conn, root, window, gc, visible: false, width, height })
    }

    /// Host bounds handed to the spinner.
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width as f32, self.height as f32)
    }

    fn resize(&mut self, width: u16, height: u16) {
        if width == self.width && height == self.height {
            return;
        }
        let values = ConfigureWindowAux::new().width(width as u32).height(height as u32);
        let _ = self.conn.configure_window(self.window, &values);
        let _ = self.conn.flush();
        self.width = width;
        self.height = height;
    }

    pub fn show(&mut self) {
        if !self.visible {
            let _ = self.conn.map_window(self.window);
            let _ = self.conn.flush();
            self.visible = true;
        }
    }

    pub fn hide(&mut self) {
        if self.visible {
            let _ = self.conn.unmap_window(self.window);
            let _ = self.conn.flush();
            self.visible = false;
        }
    }

    pub fn update_pixels(&self, pixels: &[u32], width: u32, height: u32) {
        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            return;
        };
        let mut data = Vec::with_capacity(pixels.len() * 4);
        for &px in pixels {
            data.extend_from_slice(&px.to_le_bytes());
        }

        let _ = self.conn.put_image(ImageFormat::Z_PIXMAP, self.window, self.gc, w, h, 0, 0, 0, 32, &data);
        let _ = self.conn.flush();
    }

    /// Drain pending X11 events without blocking.
    pub fn poll_events(&mut self) -> Vec<WindowEvent> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = self.conn.poll_for_event() {
            match event {
                Event::ConfigureNotify(e) if e.window == self.root => {
                    debug!("Root resized to {}x{}", e.width, e.height);
                    self.resize(e.width, e.height);
                    events.push(WindowEvent::Resized { width: e.width, height: e.height });
                }
                Event::ButtonPress(e) if e.event == self.window => {
                    events.push(WindowEvent::Pressed(Point::new(e.event_x as f32, e.event_y as f32)));
                }
                Event::Expose(_) => debug!("Expose event"),
                _ => {}
            }
        }
        events
    }
}

fn find_argb_visual(screen: &Screen) -> Option<(Visualid, u8)> {
    for depth_info in &screen.allowed_depths {
        if depth_info.depth == 32 {
            for visual in &depth_info.visuals {
                if visual.class == VisualClass::TRUE_COLOR {
                    return Some((visual.visual_id, 32));
                }
            }
        }
    }
    None
}

fn intern_atom(conn: &RustConnection, name: &str) -> Result<Atom, String> {
    conn.intern_atom(false, name.as_bytes())
        .map_err(|e| e.to_string())?
        .reply()
        .map(|r| r.atom)
        .map_err(|e| e.to_string())
}
