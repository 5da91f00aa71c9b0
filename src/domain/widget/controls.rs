//! Visible widget elements

use std::fmt;

/// Elements whose visibility the widget toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    StartRecord,
    StopRecord,
    RestartRecord,
    Play,
    Pause,
    /// Play control overlaid on the video once a recording is available
    VideoOverlay,
    ImageContainer,
}

impl Element {
    pub const ALL: [Element; 7] = [
        Self::StartRecord,
        Self::StopRecord,
        Self::RestartRecord,
        Self::Play,
        Self::Pause,
        Self::VideoOverlay,
        Self::ImageContainer,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StartRecord => "start",
            Self::StopRecord => "stop",
            Self::RestartRecord => "restart",
            Self::Play => "play",
            Self::Pause => "pause",
            Self::VideoOverlay => "overlay",
            Self::ImageContainer => "image",
        }
    }

    /// Visibility when the widget is first shown
    pub const fn initially_visible(&self) -> bool {
        matches!(self, Self::StartRecord | Self::Play)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The two timer text outputs beside the slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextOutput {
    /// Record elapsed time, or play position
    Elapsed,
    /// Total duration of the recording
    Duration,
}

impl TextOutput {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Elapsed => "elapsed",
            Self::Duration => "duration",
        }
    }
}

impl fmt::Display for TextOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
