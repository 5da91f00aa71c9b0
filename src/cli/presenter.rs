//! CLI presenter for output formatting

use colored::*;

use super::args::WidgetOptions;

/// Presenter for CLI output formatting
#[derive(Debug, Default)]
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
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

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Startup summary of the resolved options
    pub fn format_banner(&self, options: &WidgetOptions) -> String {
        let constraints = options.widget.constraints;
        format!(
            "camrec {} via {} ({}{}). Type help for controls.",
            options.device,
            options.backend,
            constraints.video,
            if constraints.audio { ", with audio" } else { "" }
        )
    }

    pub fn banner(&self, options: &WidgetOptions) {
        self.info(&self.format_banner(options));
    }
}
