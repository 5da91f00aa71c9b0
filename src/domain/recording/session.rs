//! Recording session state machine

use std::fmt;
use thiserror::Error;

/// Recorder states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecorderState {
    #[default]
    Idle,
    Recording,
    Paused,
    Stopped,
}

impl RecorderState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
        }
    }

    /// Whether the session is capturing or holding captured media
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Recording | Self::Paused)
    }
}

impl fmt::Display for RecorderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid state transition: cannot {action} while {current_state}")]
pub struct InvalidStateTransition {
    pub current_state: RecorderState,
    pub action: String,
}

/// Recording session entity.
///
/// State machine:
///   IDLE -> RECORDING (start)
///   RECORDING -> PAUSED (pause)
///   PAUSED -> RECORDING (resume)
///   RECORDING | PAUSED -> STOPPED (stop)
///
/// A stopped session is final; a new session is needed to record again.
#[derive(Debug, Default)]
pub struct RecordingSession {
    state: RecorderState,
}

impl RecordingSession {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self {
            state: RecorderState::Idle,
        }
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == RecorderState::Recording
    }

    pub fn is_paused(&self) -> bool {
        self.state == RecorderState::Paused
    }

    /// Transition from IDLE to RECORDING
    pub fn start(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition("start recording", &[RecorderState::Idle], RecorderState::Recording)
    }

    /// Check that `start` would succeed, without transitioning
    pub fn check_start(&self) -> Result<(), InvalidStateTransition> {
        self.check("start recording", &[RecorderState::Idle])
    }

    /// Transition from RECORDING to PAUSED
    pub fn pause(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition("pause recording", &[RecorderState::Recording], RecorderState::Paused)
    }

    /// Transition from PAUSED to RECORDING
    pub fn resume(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition("resume recording", &[RecorderState::Paused], RecorderState::Recording)
    }

    pub fn check_pause(&self) -> Result<(), InvalidStateTransition> {
        self.check("pause recording", &[RecorderState::Recording])
    }

    pub fn check_resume(&self) -> Result<(), InvalidStateTransition> {
        self.check("resume recording", &[RecorderState::Paused])
    }

    /// Transition from RECORDING or PAUSED to STOPPED
    pub fn stop(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            "stop recording",
            &[RecorderState::Recording, RecorderState::Paused],
            RecorderState::Stopped,
        )
    }

    fn check(&self, action: &str, from: &[RecorderState]) -> Result<(), InvalidStateTransition> {
        if from.contains(&self.state) {
            Ok(())
        } else {
            Err(InvalidStateTransition {
                current_state: self.state,
                action: action.to_string(),
            })
        }
    }

    fn transition(
        &mut self,
        action: &str,
        from: &[RecorderState],
        to: RecorderState,
    ) -> Result<(), InvalidStateTransition> {
        self.check(action, from)?;
        self.state = to;
        Ok(())
    }
}
