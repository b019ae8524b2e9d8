//! spinner-overlay: modal loading spinner for X11.
//!
//! `spinner-overlay [TITLE]` shows the spinner and dismisses it after a few
//! seconds. `spinner-overlay --daemon` keeps running and follows SHOW/HIDE
//! commands from a Unix socket.

mod socket;
mod watcher;
mod window;

use std::cell::Cell;
use std::rc::Rc;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use log::{debug, error, info};

use spinner_overlay::renderer::Renderer;
use spinner_overlay::{Phase, Spinner, SpinnerConfiguration};

const AUTO_HIDE_AFTER: Duration = Duration::from_secs(3);

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let daemon = args.iter().any(|a| a == "--daemon");
    let title = args.iter().find(|a| !a.starts_with("--")).cloned();

    let config_path = SpinnerConfiguration::find();
    SpinnerConfiguration::set_default_configuration(SpinnerConfiguration::find_and_load());

    let mut win = match window::OverlayWindow::new() {
        Ok(w) => w,
        Err(e) => {
            error!("Failed to create X11 window: {e}");
            std::process::exit(1);
        }
    };
    info!("X11 overlay window created");

    // Config reloads only affect spinners created by later SHOW commands.
    let (config_tx, config_rx) = mpsc::channel::<SpinnerConfiguration>();
    if let Some(path) = config_path {
        std::thread::spawn(move || {
            if let Err(e) = watcher::watch_config(&path, config_tx) {
                error!("Config watcher error: {e}");
            }
        });
    }

    let (cmd_tx, cmd_rx) = mpsc::channel::<socket::SocketCommand>();
    if daemon {
        let socket_path = std::env::var("SPINNER_OVERLAY_SOCKET")
            .unwrap_or_else(|_| socket::DEFAULT_SOCKET_PATH.to_string());
        std::thread::spawn(move || {
            if let Err(e) = socket::listen(&socket_path, cmd_tx) {
                error!("Socket listener error: {e}");
            }
        });
    }

    let mut spinner = Spinner::new();
    let mut renderer = Renderer::new(&spinner.configuration().title);
    let mut renderer_stale = false;
    let finished = Rc::new(Cell::new(false));
    let mut auto_hide_at = None;

    if !daemon {
        let now = Instant::now();
        if !spinner.show_in_with_title(win.bounds(), title.as_deref(), now) {
            error!("Nothing to show on: screen reports {:?}", win.bounds());
            std::process::exit(1);
        }
        auto_hide_at = Some(now + AUTO_HIDE_AFTER);
    }

    let frame_duration = Duration::from_millis(16); // ~60fps

    loop {
        let now = Instant::now();

        while let Ok(config) = config_rx.try_recv() {
            SpinnerConfiguration::set_default_configuration(config);
            renderer_stale = true;
        }

        while let Ok(cmd) = cmd_rx.try_recv() {
            match cmd {
                socket::SocketCommand::Show { title } => {
                    if spinner.phase() != Phase::Hidden {
                        debug!("SHOW ignored while {:?}", spinner.phase());
                        continue;
                    }
                    spinner = Spinner::new();
                    if renderer_stale {
                        renderer = Renderer::new(&spinner.configuration().title);
                        renderer_stale = false;
                    }
                    spinner.show_in_with_title(win.bounds(), title.as_deref(), now);
                }
                socket::SocketCommand::Hide => spinner.hide(now),
                socket::SocketCommand::Quit => {
                    let finished = finished.clone();
                    spinner.hide_then(now, move || finished.set(true));
                }
            }
        }

        if auto_hide_at.is_some_and(|at| now >= at) {
            auto_hide_at = None;
            let finished = finished.clone();
            spinner.hide_then(now, move || finished.set(true));
        }

        for event in win.poll_events() {
            match event {
                window::WindowEvent::Resized { .. } => spinner.resize_host(win.bounds()),
                window::WindowEvent::Pressed(point) => {
                    // Tap-to-dismiss is a debugging aid only.
                    if cfg!(debug_assertions) && spinner.container_contains(point, renderer.metrics().as_ref()) {
                        spinner.hide(now);
                    }
                }
            }
        }

        spinner.tick(now);

        match renderer.render(&spinner, now) {
            Some(frame) => {
                win.show();
                win.update_pixels(&frame.argb, frame.width, frame.height);
            }
            None => win.hide(),
        }

        if finished.get() {
            info!("Spinner dismissed, exiting");
            break;
        }

        // Frame timing
        let elapsed = now.elapsed();
        if elapsed < frame_duration {
            std::thread::sleep(frame_duration - elapsed);
        }
    }
}
