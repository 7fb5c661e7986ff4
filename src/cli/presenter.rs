//! CLI presenter for output formatting
//!
//! Status lines go to stderr; the transcript itself goes to stdout so the
//! output stays pipeable.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Presenter for CLI output formatting
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Countdown bar for the recording phase. The caller owns the bar and
    /// advances it from the controller's tick callback.
    pub fn recording_bar(&self, limit_secs: u64) -> ProgressBar {
        let bar = ProgressBar::new(limit_secs);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.red} Recording [{bar:20.cyan}] {pos}s / {len}s  (Ctrl+C to stop)")
                .unwrap()
                .progress_chars("█▒░"),
        );
        bar
    }

    /// Spinner shown while the request is in flight
    pub fn transcribing_spinner(&self) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        spinner
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout (the actual transcription output)
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Blocking notice for a server-rejected client version, kept visually
    /// distinct from inline errors: this outcome is not retryable.
    pub fn version_mismatch(&self, server_version: &str, client_version: &str) {
        eprintln!();
        eprintln!("{}", "═══ Update required ═══".red().bold());
        eprintln!("Server expects version {}", server_version.bold());
        eprintln!("This client is version {}", client_version.bold());
        eprintln!("Update voicepost and try again.");
        eprintln!();
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_bar_spans_the_limit() {
        let presenter = Presenter::new();
        let bar = presenter.recording_bar(5);
        assert_eq!(bar.length(), Some(5));
        assert_eq!(bar.position(), 0);
    }

    #[test]
    fn transcribing_spinner_has_no_length() {
        let presenter = Presenter::new();
        let spinner = presenter.transcribing_spinner();
        assert_eq!(spinner.length(), None);
    }
}
