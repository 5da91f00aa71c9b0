//! Application configuration value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::capture::{CaptureConstraints, DEFAULT_IDEAL_HEIGHT, DEFAULT_IDEAL_WIDTH};

/// Slider input is handled at most once per this many milliseconds
pub const DEFAULT_THROTTLE_MS: u64 = 100;

/// Delay between a restart and the UI reset / re-acquisition
pub const DEFAULT_RESTART_SETTLE_MS: u64 = 500;

/// How often the recorder emits a data chunk
pub const DEFAULT_CHUNK_INTERVAL_MS: u64 = 1000;

#[cfg(target_os = "macos")]
const DEFAULT_DEVICE: &str = "0";

#[cfg(not(target_os = "macos"))]
const DEFAULT_DEVICE: &str = "/dev/video0";

/// Which capture adapter drives the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureBackend {
    /// Real camera through ffmpeg
    #[default]
    Ffmpeg,
    /// Generated test pattern, no hardware needed
    Synthetic,
}

impl CaptureBackend {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ffmpeg => "ffmpeg",
            Self::Synthetic => "synthetic",
        }
    }
}

impl fmt::Display for CaptureBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CaptureBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ffmpeg" => Ok(Self::Ffmpeg),
            "synthetic" => Ok(Self::Synthetic),
            other => Err(format!(
                "Invalid backend: \"{}\". Valid backends are: ffmpeg, synthetic",
                other
            )),
        }
    }
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub audio: Option<bool>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub device: Option<String>,
    pub backend: Option<String>,
    pub chunk_interval_ms: Option<u64>,
    pub throttle_ms: Option<u64>,
    pub restart_settle_ms: Option<u64>,
    pub notify: Option<bool>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            audio: Some(false),
            width: Some(DEFAULT_IDEAL_WIDTH),
            height: Some(DEFAULT_IDEAL_HEIGHT),
            device: Some(DEFAULT_DEVICE.to_string()),
            backend: Some(CaptureBackend::default().to_string()),
            chunk_interval_ms: Some(DEFAULT_CHUNK_INTERVAL_MS),
            throttle_ms: Some(DEFAULT_THROTTLE_MS),
            restart_settle_ms: Some(DEFAULT_RESTART_SETTLE_MS),
            notify: Some(false),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            audio: other.audio.or(self.audio),
            width: other.width.or(self.width),
            height: other.height.or(self.height),
            device: other.device.or(self.device),
            backend: other.backend.or(self.backend),
            chunk_interval_ms: other.chunk_interval_ms.or(self.chunk_interval_ms),
            throttle_ms: other.throttle_ms.or(self.throttle_ms),
            restart_settle_ms: other.restart_settle_ms.or(self.restart_settle_ms),
            notify: other.notify.or(self.notify),
        }
    }

    /// Capture constraints built from the audio and resolution settings
    pub fn constraints(&self) -> CaptureConstraints {
        CaptureConstraints::new(
            self.audio.unwrap_or(false),
            self.width.unwrap_or(DEFAULT_IDEAL_WIDTH),
            self.height.unwrap_or(DEFAULT_IDEAL_HEIGHT),
        )
    }

    /// Get the capture device, or the platform default camera
    pub fn device_or_default(&self) -> &str {
        self.device.as_deref().unwrap_or(DEFAULT_DEVICE)
    }

    /// Get backend as parsed CaptureBackend, or default if not set/invalid
    pub fn backend_or_default(&self) -> CaptureBackend {
        self.backend
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn chunk_interval(&self) -> Duration {
        Duration::from_millis(self.chunk_interval_ms.unwrap_or(DEFAULT_CHUNK_INTERVAL_MS))
    }

    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms.unwrap_or(DEFAULT_THROTTLE_MS))
    }

    pub fn restart_settle(&self) -> Duration {
        Duration::from_millis(self.restart_settle_ms.unwrap_or(DEFAULT_RESTART_SETTLE_MS))
    }

    /// Get notify setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }
}
