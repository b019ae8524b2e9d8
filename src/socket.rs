//! Unix domain socket listener for external show/hide commands.

use std::io::{BufRead, BufReader};
use std::os::unix::net::UnixListener;
use std::path::Path;
use std::sync::mpsc::Sender;

use log::{debug, info, warn};

pub const DEFAULT_SOCKET_PATH: &str = "/tmp/spinner-overlay.sock";

#[derive(Debug, PartialEq)]
pub enum SocketCommand {
    Show { title: Option<String> },
    Hide,
    Quit,
}

/// Listen for commands on a Unix domain socket. Blocks forever.
pub fn listen(path: &str, tx: Sender<SocketCommand>) -> Result<(), String> {
    // Remove stale socket
    if Path::new(path).exists() {
        let _ = std::fs::remove_file(path);
    }

    let listener = UnixListener::bind(path).map_err(|e| format!("bind {path}: {e}"))?;
    info!("Socket listening at {path}");

    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                let reader = BufReader::new(stream);
                for line in reader.lines() {
                    match line {
                        Ok(line) => {
                            if let Some(cmd) = parse_command(&line) {
                                debug!("Socket command: {line}");
                                if tx.send(cmd).is_err() {
                                    return Err("channel closed".into());
                                }
                            }
                        }
                        Err(e) => {
                            warn!("Socket read error: {e}");
                            break;
                        }
                    }
                }
            }
            Err(e) => warn!("Socket accept error: {e}"),
        }
    }

    Ok(())
}

fn parse_command(line: &str) -> Option<SocketCommand> {
    let line = line.trim();
    let (word, rest) = match line.split_once(' ') {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    match word {
        "SHOW" => Some(SocketCommand::Show {
            title: (!rest.is_empty()).then(|| rest.to_string()),
        }),
        "HIDE" if rest.is_empty() => Some(SocketCommand::Hide),
        "QUIT" if rest.is_empty() => Some(SocketCommand::Quit),
        _ => None,
    }
}
