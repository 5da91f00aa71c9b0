//! Prober for synthetic recordings
//!
//! Behaves like a browser element with a freshly recorded WebM: the
//! duration is unknown after metadata loads and becomes known once the
//! element has been seeked past the end.

use async_trait::async_trait;

use crate::application::ports::{MediaProber, ProbeElement, ReportedDuration};
use crate::domain::error::MediaLoadError;
use crate::domain::media::Blob;
use crate::infrastructure::capture::segment::scan_duration;

#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticProber;

impl SyntheticProber {
    pub fn new() -> Self {
        Self
    }
}

impl MediaProber for SyntheticProber {
    fn create_element(&self) -> Box<dyn ProbeElement> {
        Box::new(SyntheticElement::default())
    }
}

#[derive(Debug, Default)]
struct SyntheticElement {
    duration: Option<f64>,
    position: f64,
}

#[async_trait]
impl ProbeElement for SyntheticElement {
    async fn load_metadata(&mut self, blob: &Blob) -> Result<ReportedDuration, MediaLoadError> {
        let duration = scan_duration(blob.data()).ok_or_else(|| {
            MediaLoadError::LoadFailed("not a synthetic recording".to_string())
        })?;
        self.duration = Some(duration);
        self.position = 0.0;
        Ok(ReportedDuration::Unbounded)
    }

    async fn seek_and_wait_update(
        &mut self,
        position: f64,
    ) -> Result<ReportedDuration, MediaLoadError> {
        let duration = self
            .duration
            .ok_or_else(|| MediaLoadError::LoadFailed("no media loaded".to_string()))?;
        self.position = position.clamp(0.0, duration);
        Ok(ReportedDuration::Finite(duration))
    }

    fn reset_position(&mut self) {
        self.position = 0.0;
    }
}
