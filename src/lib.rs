//! camrec - webcam recording widget for the terminal
//!
//! This crate records video (and optionally audio) from a camera, plays the
//! recording back with a scrub slider and takes still snapshots.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects, the recorder state machine, and errors
//! - **Application**: The widget controller, timers, and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (FFmpeg, ffprobe, notifications, etc.)
//! - **CLI**: Command-line interface, control input, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
