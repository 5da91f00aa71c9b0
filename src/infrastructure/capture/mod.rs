//! Capture device adapters
//!
//! `synthetic` works everywhere and needs no hardware. `ffmpeg` drives a
//! real camera and needs Unix signals for pause and resume.

#[cfg(unix)]
mod ffmpeg;
pub mod segment;
mod synthetic;

#[cfg(unix)]
pub use ffmpeg::{FfmpegDevices, FfmpegFrameGrabber, FfmpegRecorder, FfmpegStream};
pub use synthetic::{SyntheticDevices, SyntheticRecorder, SyntheticStream, SyntheticTrack};
