//! Domain error types

use thiserror::Error;

/// Error when acquiring a capture stream fails.
///
/// Every acquisition failure falls into one of three kinds, each with its
/// own user-facing message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CaptureError {
    #[error("No camera and/or microphone found")]
    NotFound,

    #[error("Camera and/or microphone access denied: {0}")]
    PermissionDenied(String),

    #[error("Failed to open camera and/or microphone: {0}")]
    Other(String),
}

impl CaptureError {
    /// Classify a platform error by its name.
    ///
    /// Accepts the DOMException-style names reported by media capture
    /// APIs (`NotFoundError`, `NotAllowedError`, ...).
    pub fn from_platform(name: &str, message: impl Into<String>) -> Self {
        match name {
            "NotFoundError" | "DevicesNotFoundError" | "OverconstrainedError" => Self::NotFound,
            "SecurityError" | "PermissionDeniedError" | "NotAllowedError" => {
                Self::PermissionDenied(message.into())
            }
            _ => Self::Other(message.into()),
        }
    }

    /// Message shown to the user in a blocking alert
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound => "No camera and/or microphone were found.".to_string(),
            Self::PermissionDenied(detail) => format!(
                "You need to allow camera and or microphone to use program: {}",
                detail
            ),
            Self::Other(detail) => {
                format!("Error opening your camera and/or microphone: {}", detail)
            }
        }
    }
}

/// Error when recorded media cannot be loaded or measured
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MediaLoadError {
    #[error("Failed to load media: {0}")]
    LoadFailed(String),

    #[error("Media duration is still unbounded after seeking to the end")]
    UnresolvedDuration,

    #[error("Unknown media URL: {0}")]
    UnknownSource(String),
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
