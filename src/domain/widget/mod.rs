//! Widget session state

mod controls;
mod slider;
mod state;

pub use controls::{Element, TextOutput};
pub use slider::ScrubSlider;
pub use state::{SessionFlags, SessionSnapshot};
