//! Capture device port interfaces

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::capture::CaptureConstraints;
use crate::domain::error::CaptureError;
use crate::domain::media::Blob;

use super::recorder::{MediaRecorder, RecorderError};

/// Port for acquiring live camera/microphone streams
#[async_trait]
pub trait MediaDevices: Send + Sync {
    /// Request a live stream matching the constraints.
    ///
    /// # Returns
    /// The live stream, or a classified capture error
    async fn get_user_media(
        &self,
        constraints: &CaptureConstraints,
    ) -> Result<Arc<dyn MediaStream>, CaptureError>;
}

/// A live audio/video input
pub trait MediaStream: Send + Sync {
    /// Stable identifier for logging
    fn id(&self) -> &str;

    /// Constraints the stream was opened with
    fn constraints(&self) -> CaptureConstraints;

    /// Create a recorder bound to this stream
    fn create_recorder(&self) -> Result<Box<dyn MediaRecorder>, RecorderError>;

    /// The stream's video track, if it has one
    fn video_track(&self) -> Option<Arc<dyn VideoTrack>>;

    /// Release the underlying devices
    fn stop(&self);

    fn is_active(&self) -> bool;
}

/// Single-frame capture from a live video track
#[async_trait]
pub trait VideoTrack: Send + Sync {
    fn label(&self) -> &str;

    /// Capture one still frame as an image blob
    async fn take_photo(&self) -> Result<Blob, CaptureError>;
}

impl std::fmt::Debug for dyn MediaStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaStream").field("id", &self.id()).finish()
    }
}
