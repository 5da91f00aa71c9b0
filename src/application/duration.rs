//! Recorded media duration resolution

use tracing::debug;

use crate::domain::error::MediaLoadError;
use crate::domain::media::Blob;

use super::ports::{MediaProber, ProbeElement, ReportedDuration};

/// Largest integer position a media element accepts
pub const SEEK_TO_END_POSITION: f64 = 9_007_199_254_740_991.0;

/// Recovery for elements that report an unbounded duration until the
/// media has been scanned (common for recorder-produced WebM).
///
/// Seeks to the end once, reads the duration after the resulting time
/// update, and moves the element back to the start.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeekToEnd;

impl SeekToEnd {
    pub async fn resolve(&self, element: &mut dyn ProbeElement) -> Result<f64, MediaLoadError> {
        debug!("duration unbounded, seeking to end");
        let reported = element.seek_and_wait_update(SEEK_TO_END_POSITION).await;
        element.reset_position();

        match reported? {
            ReportedDuration::Finite(secs) => Ok(secs),
            ReportedDuration::Unbounded => Err(MediaLoadError::UnresolvedDuration),
        }
    }
}

/// Resolve the playable duration of a blob, in seconds
pub async fn resolve_duration<P>(prober: &P, blob: &Blob) -> Result<f64, MediaLoadError>
where
    P: MediaProber + ?Sized,
{
    let mut element = prober.create_element();

    match element.load_metadata(blob).await? {
        ReportedDuration::Finite(secs) => Ok(secs),
        ReportedDuration::Unbounded => SeekToEnd.resolve(element.as_mut()).await,
    }
}
