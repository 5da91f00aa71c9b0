//! Media display adapters

mod timeline;

pub use timeline::TimelineDisplay;
