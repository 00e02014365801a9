//! Progress feedback for the shopctl console
//!
//! # Quiet Mode
//!
//! The connection spinner is suppressed when:
//! - `--quiet` flag is passed
//! - `SHOPCTL_QUIET=1` environment variable is set
//! - stderr is not a TTY (piped output)
//!
//! Status lines are still printed in quiet mode, just without animation.

use std::io::IsTerminal;
use std::sync::OnceLock;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Global quiet mode state
static QUIET_MODE: OnceLock<bool> = OnceLock::new();

/// Initialize quiet mode from the --quiet flag, SHOPCTL_QUIET and TTY status.
pub fn init_quiet_mode(quiet_flag: bool) {
    let is_quiet = quiet_flag
        || std::env::var("SHOPCTL_QUIET").map(|v| v == "1").unwrap_or(false)
        || !std::io::stderr().is_terminal();

    QUIET_MODE.set(is_quiet).ok();
}

pub fn is_quiet() -> bool {
    *QUIET_MODE.get().unwrap_or(&false)
}

/// Create a spinner that respects quiet mode
pub fn spinner(msg: impl Into<String>) -> Option<ProgressBar> {
    if is_quiet() {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
        .template("{spinner:.cyan} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}

fn finish(pb: ProgressBar, msg: String) {
    if let Ok(style) = ProgressStyle::default_spinner().template("{msg}") {
        pb.set_style(style);
    }
    pb.finish_with_message(msg);
}

/// Finish a spinner with a success message
pub fn finish_success(pb: Option<ProgressBar>, msg: impl Into<String>) {
    if let Some(pb) = pb {
        finish(pb, format!("✓ {}", msg.into()));
    }
}

/// Finish a spinner with an error message
pub fn finish_error(pb: Option<ProgressBar>, msg: impl Into<String>) {
    if let Some(pb) = pb {
        finish(pb, format!("✗ {}", msg.into()));
    }
}
