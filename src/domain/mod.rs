//! Domain layer - Core widget logic
//!
//! Contains value objects, state machines, and domain errors.
//! This layer has no dependencies on external systems.

pub mod capture;
pub mod config;
pub mod error;
pub mod media;
pub mod recording;
pub mod timer;
pub mod widget;

// Re-export common types
pub use capture::CaptureConstraints;
pub use config::AppConfig;
pub use error::*;
pub use media::{Blob, Chunk, ChunkBuffer, MediaType};
pub use recording::{InvalidStateTransition, RecorderState, RecordingSession};
pub use timer::format_timer;
pub use widget::{Element, ScrubSlider, SessionFlags, SessionSnapshot, TextOutput};
