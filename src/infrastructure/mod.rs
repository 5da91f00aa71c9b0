//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like FFmpeg, ffprobe and
//! desktop notifications.

pub mod alert;
pub mod capture;
pub mod config;
pub mod display;
pub mod probe;
pub mod urls;
pub mod view;

// Re-export adapters
pub use alert::{create_alerter, ConsoleAlerter, NotifyRustAlerter};
#[cfg(unix)]
pub use capture::FfmpegDevices;
pub use capture::SyntheticDevices;
pub use config::XdgConfigStore;
pub use display::TimelineDisplay;
pub use probe::{FfprobeProber, SyntheticProber};
pub use urls::BlobUrlRegistry;
pub use view::TerminalView;
