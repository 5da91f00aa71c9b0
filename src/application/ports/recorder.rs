//! Media recorder port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::media::Chunk;
use crate::domain::recording::{InvalidStateTransition, RecorderState};

use super::events::Subscription;

/// Recording errors
#[derive(Debug, Clone, Error)]
pub enum RecorderError {
    #[error(transparent)]
    InvalidState(#[from] InvalidStateTransition),

    #[error("Failed to start recording: {0}")]
    StartFailed(String),

    #[error("Recording failed: {0}")]
    Failed(String),
}

/// Notifications emitted by a recorder over its session lifecycle.
///
/// The final `DataAvailable` of a session is always delivered before `Stop`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecorderEvent {
    Start,
    DataAvailable(Chunk),
    Pause,
    Resume,
    Stop,
    Error(String),
}

/// Port for recording a live stream into chunks
#[async_trait]
pub trait MediaRecorder: Send + Sync {
    /// Register for session events.
    /// The registration lasts until the returned handle is dropped.
    fn subscribe(&self) -> Subscription<RecorderEvent>;

    fn state(&self) -> RecorderState;

    /// Begin producing chunks. Valid only from idle.
    async fn start(&self) -> Result<(), RecorderError>;

    /// Finalize the session. Valid from recording or paused.
    async fn stop(&self) -> Result<(), RecorderError>;

    /// Suspend capture
    async fn pause(&self) -> Result<(), RecorderError>;

    /// Continue a paused capture
    async fn resume(&self) -> Result<(), RecorderError>;
}
