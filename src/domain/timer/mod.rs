//! Timer display formatting

mod format;

pub use format::{format_timer, PLACEHOLDER, ZERO};
