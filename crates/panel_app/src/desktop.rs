//! Browser and clipboard hand-off.

use std::io::Write;
use std::process::{Command, Stdio};

use panel_logging::{panel_debug, panel_warn};

#[cfg(target_os = "macos")]
const CLIPBOARD_PROGRAMS: &[(&str, &[&str])] = &[("pbcopy", &[])];
#[cfg(target_os = "windows")]
const CLIPBOARD_PROGRAMS: &[(&str, &[&str])] = &[("clip", &[])];
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const CLIPBOARD_PROGRAMS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// Where context menu actions end up.
pub trait Desktop {
    fn open_url(&self, url: &str) -> Result<(), String>;

    fn copy_to_clipboard(&self, text: &str) -> Result<(), String>;
}

/// The user's browser and system clipboard.
pub struct SystemDesktop;

impl Desktop for SystemDesktop {
    fn open_url(&self, url: &str) -> Result<(), String> {
        opener::open_browser(url).map_err(|err| err.to_string())
    }

    /// Uses the first clipboard helper that works.
    fn copy_to_clipboard(&self, text: &str) -> Result<(), String> {
        let mut last_error = String::from("no clipboard program available");
        for (program, args) in CLIPBOARD_PROGRAMS {
            match pipe_into(program, args, text) {
                Ok(()) => {
                    panel_debug!("Copied {} bytes via {program}", text.len());
                    return Ok(());
                }
                Err(err) => {
                    panel_debug!("Clipboard helper {program} failed: {err}");
                    last_error = err;
                }
            }
        }
        panel_warn!("Clipboard unavailable: {last_error}");
        Err(last_error)
    }
}

fn pipe_into(program: &str, args: &[&str], text: &str) -> Result<(), String> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|err| format!("{program}: {err}"))?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|err| format!("{program}: {err}"))?;
    }
    let status = child.wait().map_err(|err| format!("{program}: {err}"))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("{program} exited with {status}"))
    }
}
