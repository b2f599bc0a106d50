//! Terminal output utilities
//!
//! stdout may carry the generated manifest, so every message goes to stderr.
//! While a spinner is ticking, messages are printed above it.

use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use console::{style, StyledObject, Term};
use indicatif::{ProgressBar, ProgressStyle};

fn active_spinner() -> &'static Mutex<Option<ProgressBar>> {
    static ACTIVE: OnceLock<Mutex<Option<ProgressBar>>> = OnceLock::new();
    ACTIVE.get_or_init(|| Mutex::new(None))
}

fn set_active_spinner(pb: &ProgressBar) {
    if let Ok(mut active) = active_spinner().lock() {
        *active = Some(pb.clone());
    }
}

/// Run `f` with the active spinner, if any, cleared from the terminal
fn suspend_spinner<R>(f: impl FnOnce() -> R) -> R {
    let active = active_spinner()
        .lock()
        .ok()
        .and_then(|active| active.clone())
        .filter(|pb| !pb.is_finished());

    match active {
        Some(pb) => pb.suspend(f),
        None => f(),
    }
}

fn emit(label: StyledObject<&str>, message: &str) {
    suspend_spinner(|| eprintln!("{}: {}", label, message));
}

/// Print an error message to stderr
pub fn print_error(message: &str) {
    emit(style("error").red().bold(), message);
}

/// Print a warning message to stderr
pub fn print_warning(message: &str) {
    emit(style("warning").yellow().bold(), message);
}

/// Print a success message to stderr
pub fn print_success(message: &str) {
    emit(style("success").green().bold(), message);
}

/// Print an info message to stderr
pub fn print_info(message: &str) {
    emit(style("info").blue().bold(), message);
}

/// Create a spinner progress bar, hidden when stderr is not a terminal
pub fn create_spinner(message: &str) -> ProgressBar {
    if !get_term().is_term() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    set_active_spinner(&pb);
    pb
}

/// Get the terminal for interactive output
pub fn get_term() -> Term {
    Term::stderr()
}

/// Disable colors on both streams
pub fn disable_colors() {
    console::set_colors_enabled(false);
    console::set_colors_enabled_stderr(false);
}
