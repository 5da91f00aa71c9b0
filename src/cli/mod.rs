//! CLI layer - Command-line interface
//!
//! Contains argument parsing, control input, output formatting,
//! signal handling, and the widget runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod controls;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{run_widget, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, WidgetOptions};
pub use presenter::Presenter;
