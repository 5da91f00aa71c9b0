//! Display binding port interface

use async_trait::async_trait;

use crate::domain::error::MediaLoadError;

/// Port for the visual output that shows the live preview or a recording
#[async_trait]
pub trait MediaDisplay: Send + Sync {
    /// Bind a source URL (a stream or blob URL).
    ///
    /// With `autoplay`, playback begins once metadata has loaded.
    /// Replaces any previous binding.
    async fn bind(&self, url: &str, autoplay: bool) -> Result<(), MediaLoadError>;

    /// Record the length of the bound media once it has been measured.
    ///
    /// Until then the end of a recording is unknown.
    fn set_duration(&self, secs: f64);

    /// Detach the current source
    fn unbind(&self);

    /// Currently bound source URL
    fn source(&self) -> Option<String>;

    async fn play(&self) -> Result<(), MediaLoadError>;

    fn pause(&self);

    /// Move the playback position, in seconds
    fn seek(&self, position: f64);

    /// Playback position in seconds
    fn current_time(&self) -> f64;

    fn is_paused(&self) -> bool;
}
