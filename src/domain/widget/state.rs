//! Widget session flags and snapshot

use serde::Serialize;

/// Flags gating which controls are actionable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionFlags {
    pub is_recording: bool,
    pub is_playing: bool,
    /// True only after a recording session has completed
    pub can_play: bool,
}

impl SessionFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Read-only view of the widget state, for status output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub recorder: String,
    pub is_recording: bool,
    pub is_playing: bool,
    pub can_play: bool,
    pub buffered_chunks: usize,
    pub slider_value: f64,
    pub slider_max: f64,
    pub timer: String,
    pub recording_url: Option<String>,
    pub recording_size: Option<String>,
    pub snapshot_url: Option<String>,
}
