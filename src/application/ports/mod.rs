//! Port interfaces (traits) for platform capabilities
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod alert;
pub mod capture;
pub mod config;
pub mod display;
pub mod events;
pub mod probe;
pub mod recorder;
pub mod urls;
pub mod view;

// Re-export common types
pub use alert::{AlertError, Alerter};
pub use capture::{MediaDevices, MediaStream, VideoTrack};
pub use config::ConfigStore;
pub use display::MediaDisplay;
pub use events::{EventEmitter, Subscription};
pub use probe::{MediaProber, ProbeElement, ReportedDuration};
pub use recorder::{MediaRecorder, RecorderError, RecorderEvent};
pub use urls::{ObjectSource, ObjectUrls};
pub use view::WidgetView;
