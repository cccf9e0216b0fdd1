//! Terminal output: colored module prefixes and the watch-mode status block.
//!
//! Three pieces:
//! - the `log!` / `debug!` macros, which print one prefixed line
//! - [`WatchStatus`], a timestamped status line that overwrites its
//!   predecessor so watch mode keeps a single readable block
//! - [`clear_console`], used between build cycles
//!
//! # Example
//!
//! ```ignore
//! log!("upload"; "syncing {} files", count);
//! logger::status_success("files uploaded successfully");
//! ```

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::{
    io::{Write, stdout},
    sync::LazyLock,
    sync::atomic::{AtomicBool, Ordering},
};

/// Verbose flag, flipped once at startup from the CLI.
static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

#[allow(dead_code)] // referenced through the debug! expansion
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Macros
// ============================================================================

/// Print one line with a colored `[module]` prefix.
///
/// ```ignore
/// log!("serve"; "http://{}", addr);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Like [`log!`], but only when `--verbose` was given.
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Line output
// ============================================================================

#[inline]
pub fn log(module: &str, message: &str) {
    let prefix = prefix_for(module);

    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Pick the prefix color by pipeline stage.
#[inline]
fn prefix_for(module: &str) -> String {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "serve" => prefix.bright_blue().bold().to_string(),
        "watch" => prefix.bright_green().bold().to_string(),
        "upload" | "deploy" => prefix.bright_cyan().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

/// Wipe the terminal and park the cursor top-left.
///
/// Called on every "invalidated" event so each compile's status replaces the
/// previous one instead of scrolling it away.
pub fn clear_console() {
    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::All), cursor::MoveTo(0, 0)).ok();
    stdout.flush().ok();
    WATCH_STATUS.lock().shown_lines = 0;
}

// ============================================================================
// Watch status block
// ============================================================================

/// Wall-clock HH:MM:SS (UTC), enough for a status timestamp.
fn now() -> String {
    use std::time::SystemTime;
    let secs = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let hours = (secs / 3600) % 24;
    let minutes = (secs / 60) % 60;
    let seconds = secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Timestamped status line that overwrites whatever it printed last.
///
/// Compile, upload, and reload phases all report through the same instance,
/// so a new status replaces a stale one instead of stacking under it.
pub struct WatchStatus {
    /// Height of the previous message, to know how far to move up.
    shown_lines: usize,
}

static WATCH_STATUS: LazyLock<Mutex<WatchStatus>> =
    LazyLock::new(|| Mutex::new(WatchStatus::new()));

impl WatchStatus {
    pub const fn new() -> Self {
        Self { shown_lines: 0 }
    }

    /// Green check line.
    pub fn success(&mut self, message: &str) {
        self.display(format!("{}", "✓".green()), message);
    }

    /// Red cross line, detail on the following lines when present.
    pub fn error(&mut self, summary: &str, detail: &str) {
        let message = if detail.is_empty() {
            summary.to_string()
        } else {
            format!("{summary}\n{detail}")
        };
        self.display(format!("{}", "✗".red()), &message);
    }

    /// Yellow warning line.
    pub fn warning(&mut self, detail: &str) {
        self.display(format!("{}", "⚠".yellow()), detail);
    }

    fn display(&mut self, symbol: String, message: &str) {
        let mut stdout = stdout().lock();

        // Rewind over the previous status before printing the new one
        if self.shown_lines > 0 {
            #[allow(clippy::cast_possible_truncation)]
            let lines = self.shown_lines as u16;
            execute!(stdout, cursor::MoveUp(lines)).ok();
            execute!(stdout, Clear(ClearType::FromCursorDown)).ok();
        }

        let timestamp = format!("[{}]", now()).dimmed().to_string();
        let line = if symbol.is_empty() {
            format!("{timestamp} {message}")
        } else {
            format!("{timestamp} {symbol} {message}")
        };

        writeln!(stdout, "{line}").ok();
        stdout.flush().ok();

        // Multi-line details must be rewound in full next time
        self.shown_lines = message.matches('\n').count() + 1;
    }
}

/// Report a successful phase on the shared status block.
pub fn status_success(message: &str) {
    WATCH_STATUS.lock().success(message);
}

/// Report a failed phase on the shared status block.
pub fn status_error(summary: &str, detail: &str) {
    WATCH_STATUS.lock().error(summary, detail);
}

/// Report a non-fatal issue on the shared status block.
pub fn status_warning(detail: &str) {
    WATCH_STATUS.lock().warning(detail);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_status_new() {
        let status = WatchStatus::new();
        assert_eq!(status.shown_lines, 0);
    }

    #[test]
    fn test_single_line_status_height() {
        let message = "files uploaded successfully";
        assert_eq!(message.matches('\n').count() + 1, 1);
    }

    #[test]
    fn test_error_with_detail_height() {
        let summary = "failed to compile";
        let detail = "scripts/theme.js:\nunexpected token at 5:12";
        let message = format!("{summary}\n{detail}");
        assert_eq!(message.matches('\n').count() + 1, 3);
    }
}
