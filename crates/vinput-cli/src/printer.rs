//! Human-readable renderer for decoded input events.
//!
//! One line per event, wall-clock stamped, with a separator line for each
//! sync marker so the boundary of a physical sample is visible in the
//! stream.

use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use vinput_events::{EventSink, InputEvent};

const COLOR_RESET: &str = "\x1b[0m";
const COLOR_BLUE: &str = "\x1b[1;34m";
const COLOR_GREEN: &str = "\x1b[1;32m";
const COLOR_YELLOW: &str = "\x1b[1;33m";
const COLOR_RED: &str = "\x1b[1;31m";
const COLOR_CYAN: &str = "\x1b[1;36m";

pub struct EventPrinter<W> {
    out: W,
    color: bool,
}

impl<W: Write> EventPrinter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    fn paint(&self, color: &'static str) -> &'static str {
        if self.color {
            color
        } else {
            ""
        }
    }

    /// Wall-clock `HH:MM:SS` (UTC); enough for a human following along.
    fn timestamp() -> String {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        format!(
            "{:02}:{:02}:{:02}",
            (secs / 3600) % 24,
            (secs / 60) % 60,
            secs % 60
        )
    }
}

impl<W: Write> EventSink for EventPrinter<W> {
    fn handle_event(&mut self, event: InputEvent) {
        let stamp = Self::timestamp();
        let cyan = self.paint(COLOR_CYAN);
        let yellow = self.paint(COLOR_YELLOW);
        let reset = self.paint(COLOR_RESET);

        let result = match event {
            InputEvent::Key { key, pressed } => {
                let blue = self.paint(COLOR_BLUE);
                let state = self.paint(if pressed { COLOR_GREEN } else { COLOR_RED });
                writeln!(
                    self.out,
                    "{cyan}[{stamp}]{reset} {blue}KEY{reset}   {:<16} {state}{}{reset}",
                    key.as_str(),
                    if pressed { "PRESSED" } else { "RELEASED" },
                )
            }
            InputEvent::Button { button, pressed } => {
                let state = self.paint(if pressed { COLOR_GREEN } else { COLOR_RED });
                writeln!(
                    self.out,
                    "{cyan}[{stamp}]{reset} {yellow}BTN{reset}   {:<16} {state}{}{reset}",
                    button.as_str(),
                    if pressed { "PRESSED" } else { "RELEASED" },
                )
            }
            InputEvent::Motion { axis, delta } => {
                writeln!(
                    self.out,
                    "{cyan}[{stamp}]{reset} {yellow}MOUSE{reset} {}: {delta:+}",
                    axis.as_str(),
                )
            }
            InputEvent::Sync => {
                writeln!(self.out, "{cyan}[{stamp}]{reset} --- event complete ---")
            }
        };

        // Stdout going away mid-session is not actionable here.
        let _ = result;
        let _ = self.out.flush();
    }
}
