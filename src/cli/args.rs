//! CLI argument definitions using Clap

use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};

use crate::application::WidgetConfig;
use crate::domain::config::{AppConfig, CaptureBackend};

/// camrec - webcam recording widget for the terminal
#[derive(Parser, Debug)]
#[command(name = "camrec")]
#[command(version)]
#[command(about = "Record the webcam, play it back and take snapshots from the terminal")]
#[command(long_about = None)]
pub struct Cli {
    /// Record microphone audio too
    #[arg(short = 'a', long)]
    pub audio: bool,

    /// Ideal capture width in pixels
    #[arg(long, value_name = "PX")]
    pub width: Option<u32>,

    /// Ideal capture height in pixels
    #[arg(long, value_name = "PX")]
    pub height: Option<u32>,

    /// Camera device (e.g. /dev/video0, or an avfoundation index)
    #[arg(short = 'd', long, value_name = "DEVICE")]
    pub device: Option<String>,

    /// Capture backend
    #[arg(short = 'b', long, value_name = "BACKEND")]
    pub backend: Option<BackendArg>,

    /// Show capture errors as desktop notifications
    #[arg(short = 'n', long)]
    pub notify: bool,

    /// Log debug output to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Backend argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    Ffmpeg,
    Synthetic,
}

impl From<BackendArg> for CaptureBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Ffmpeg => CaptureBackend::Ffmpeg,
            BackendArg::Synthetic => CaptureBackend::Synthetic,
        }
    }
}

impl Cli {
    /// Config values given on the command line
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            audio: self.audio.then_some(true),
            width: self.width,
            height: self.height,
            device: self.device.clone(),
            backend: self
                .backend
                .map(|b| CaptureBackend::from(b).to_string()),
            notify: self.notify.then_some(true),
            ..Default::default()
        }
    }
}

/// Resolved widget run options
#[derive(Debug, Clone)]
pub struct WidgetOptions {
    pub widget: WidgetConfig,
    pub backend: CaptureBackend,
    pub device: String,
    pub chunk_interval: Duration,
    pub notify: bool,
}

impl From<&AppConfig> for WidgetOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            widget: WidgetConfig::from(config),
            backend: config.backend_or_default(),
            device: config.device_or_default().to_string(),
            chunk_interval: config.chunk_interval(),
            notify: config.notify_or_default(),
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "audio",
    "width",
    "height",
    "device",
    "backend",
    "chunk_interval_ms",
    "throttle_ms",
    "restart_settle_ms",
    "notify",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["camrec"]);
        assert!(!cli.audio);
        assert!(cli.width.is_none());
        assert!(cli.device.is_none());
        assert!(cli.backend.is_none());
        assert!(!cli.notify);
        assert!(!cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_capture_options() {
        let cli = Cli::parse_from([
            "camrec", "-a", "--width", "640", "--height", "480", "-d", "/dev/video2",
        ]);
        assert!(cli.audio);
        assert_eq!(cli.width, Some(640));
        assert_eq!(cli.height, Some(480));
        assert_eq!(cli.device, Some("/dev/video2".to_string()));
    }

    #[test]
    fn cli_parses_backend() {
        let cli = Cli::parse_from(["camrec", "-b", "synthetic"]);
        assert_eq!(cli.backend, Some(BackendArg::Synthetic));
    }

    #[test]
    fn cli_rejects_unknown_backend() {
        assert!(Cli::try_parse_from(["camrec", "--backend", "gstreamer"]).is_err());
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["camrec", "config", "set", "width", "640"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "width");
            assert_eq!(value, "640");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn unset_flags_do_not_override_config() {
        let cli = Cli::parse_from(["camrec"]);
        assert_eq!(cli.to_config(), AppConfig::empty());
    }

    #[test]
    fn flags_become_config_values() {
        let cli = Cli::parse_from(["camrec", "-a", "-n", "-b", "synthetic"]);
        let config = cli.to_config();
        assert_eq!(config.audio, Some(true));
        assert_eq!(config.notify, Some(true));
        assert_eq!(config.backend, Some("synthetic".to_string()));
    }

    #[test]
    fn options_from_defaults() {
        let options = WidgetOptions::from(&AppConfig::defaults());
        assert_eq!(options.backend, CaptureBackend::Ffmpeg);
        assert_eq!(options.chunk_interval, Duration::from_secs(1));
        assert_eq!(options.widget.throttle, Duration::from_millis(100));
        assert_eq!(options.widget.restart_settle, Duration::from_millis(500));
        assert!(!options.notify);
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("audio"));
        assert!(is_valid_config_key("restart_settle_ms"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        // Verify the CLI definition is valid
        Cli::command().debug_assert();
    }
}
