//! Capture constraints value object

use std::fmt;

/// Default ideal capture width in pixels
pub const DEFAULT_IDEAL_WIDTH: u32 = 1280;

/// Default ideal capture height in pixels
pub const DEFAULT_IDEAL_HEIGHT: u32 = 720;

/// Ideal video resolution. Devices may deliver the nearest supported size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoConstraints {
    pub ideal_width: u32,
    pub ideal_height: u32,
}

impl Default for VideoConstraints {
    fn default() -> Self {
        Self {
            ideal_width: DEFAULT_IDEAL_WIDTH,
            ideal_height: DEFAULT_IDEAL_HEIGHT,
        }
    }
}

impl fmt::Display for VideoConstraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.ideal_width, self.ideal_height)
    }
}

/// Constraints passed to device acquisition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaptureConstraints {
    /// Capture microphone audio alongside video
    pub audio: bool,
    pub video: VideoConstraints,
}

impl CaptureConstraints {
    pub fn new(audio: bool, ideal_width: u32, ideal_height: u32) -> Self {
        Self {
            audio,
            video: VideoConstraints {
                ideal_width,
                ideal_height,
            },
        }
    }
}
