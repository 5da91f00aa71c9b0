//! Application layer - Use cases and port interfaces
//!
//! Contains the widget controller and trait definitions
//! for external system interactions.

pub mod duration;
pub mod ports;
pub mod throttle;
pub mod timers;
pub mod widget;

// Re-export use cases
pub use duration::{resolve_duration, SeekToEnd};
pub use throttle::Throttle;
pub use timers::{TimerSlot, TimerTick, TIMER_PERIOD};
pub use widget::{Control, RecorderWidget, WidgetConfig, WidgetError, WidgetEvent};
