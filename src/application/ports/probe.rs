//! Media probing port interfaces

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::MediaLoadError;
use crate::domain::media::Blob;

/// Duration as reported by a media element
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReportedDuration {
    Finite(f64),
    /// The element could not determine the duration yet
    Unbounded,
}

impl ReportedDuration {
    /// Interpret a raw duration value. Infinite or NaN means unbounded.
    pub fn from_secs(secs: f64) -> Self {
        if secs.is_finite() && secs >= 0.0 {
            Self::Finite(secs)
        } else {
            Self::Unbounded
        }
    }
}

/// A throwaway media element used to measure a blob
#[async_trait]
pub trait ProbeElement: Send {
    /// Load the blob and wait for its metadata
    async fn load_metadata(&mut self, blob: &Blob) -> Result<ReportedDuration, MediaLoadError>;

    /// Set the position and wait for the next time-update notification.
    ///
    /// # Returns
    /// The duration as reported after the update
    async fn seek_and_wait_update(
        &mut self,
        position: f64,
    ) -> Result<ReportedDuration, MediaLoadError>;

    /// Move the position back to the start
    fn reset_position(&mut self);
}

/// Port creating probe elements
pub trait MediaProber: Send + Sync {
    fn create_element(&self) -> Box<dyn ProbeElement>;
}

impl<T: MediaProber + ?Sized> MediaProber for Arc<T> {
    fn create_element(&self) -> Box<dyn ProbeElement> {
        self.as_ref().create_element()
    }
}
