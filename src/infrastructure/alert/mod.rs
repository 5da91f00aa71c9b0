//! User alert adapters
//!
//! Capture failures are always printed; desktop notifications are opt-in.

mod console;
mod notify_rust;

pub use console::ConsoleAlerter;
pub use notify_rust::NotifyRustAlerter;

use crate::application::ports::Alerter;

/// Create the alerter for the configured notification setting
pub fn create_alerter(notify: bool) -> Box<dyn Alerter> {
    if notify {
        Box::new(NotifyRustAlerter::new())
    } else {
        Box::new(ConsoleAlerter::new())
    }
}
