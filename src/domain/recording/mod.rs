//! Recording session domain

mod session;

pub use session::{InvalidStateTransition, RecorderState, RecordingSession};
