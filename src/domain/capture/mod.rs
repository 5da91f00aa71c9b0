//! Capture device constraints

mod constraints;

pub use constraints::{CaptureConstraints, VideoConstraints, DEFAULT_IDEAL_HEIGHT, DEFAULT_IDEAL_WIDTH};
