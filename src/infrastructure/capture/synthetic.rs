//! Synthetic capture adapter
//!
//! Produces a generated test stream without touching any hardware. The
//! recorder emits one segment per chunk interval while recording, and the
//! track returns a fixed 1x1 PNG for snapshots.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, trace};

use crate::application::ports::{
    EventEmitter, MediaDevices, MediaRecorder, MediaStream, RecorderError, RecorderEvent,
    Subscription, VideoTrack,
};
use crate::domain::capture::CaptureConstraints;
use crate::domain::error::CaptureError;
use crate::domain::media::{Blob, Chunk, MediaType};
use crate::domain::recording::{RecorderState, RecordingSession};

use super::segment::encode_segment;

/// Smallest valid PNG: one transparent pixel
const PIXEL_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

static NEXT_STREAM: AtomicU64 = AtomicU64::new(0);

/// Synthetic device source.
///
/// Can be told to fail every request, to exercise the error path.
#[derive(Debug, Clone)]
pub struct SyntheticDevices {
    chunk_interval: Duration,
    failure: Option<CaptureError>,
}

impl SyntheticDevices {
    pub fn new(chunk_interval: Duration) -> Self {
        Self {
            chunk_interval,
            failure: None,
        }
    }

    /// Fail every request with `error`
    pub fn failing(error: CaptureError) -> Self {
        Self {
            chunk_interval: Duration::from_secs(1),
            failure: Some(error),
        }
    }
}

#[async_trait]
impl MediaDevices for SyntheticDevices {
    async fn get_user_media(
        &self,
        constraints: &CaptureConstraints,
    ) -> Result<Arc<dyn MediaStream>, CaptureError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        let stream = SyntheticStream::new(*constraints, self.chunk_interval);
        debug!(stream = stream.id(), video = %constraints.video, "synthetic stream opened");
        Ok(Arc::new(stream))
    }
}

/// A generated live stream
pub struct SyntheticStream {
    id: String,
    constraints: CaptureConstraints,
    chunk_interval: Duration,
    active: Arc<AtomicBool>,
}

impl SyntheticStream {
    pub fn new(constraints: CaptureConstraints, chunk_interval: Duration) -> Self {
        let n = NEXT_STREAM.fetch_add(1, Ordering::Relaxed);
        Self {
            id: format!("synthetic-{n}"),
            constraints,
            chunk_interval,
            active: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl MediaStream for SyntheticStream {
    fn id(&self) -> &str {
        &self.id
    }

    fn constraints(&self) -> CaptureConstraints {
        self.constraints
    }

    fn create_recorder(&self) -> Result<Box<dyn MediaRecorder>, RecorderError> {
        if !self.is_active() {
            return Err(RecorderError::StartFailed("stream has ended".to_string()));
        }
        Ok(Box::new(SyntheticRecorder::new(
            self.constraints,
            self.chunk_interval,
        )))
    }

    fn video_track(&self) -> Option<Arc<dyn VideoTrack>> {
        Some(Arc::new(SyntheticTrack {
            active: Arc::clone(&self.active),
        }))
    }

    fn stop(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// Still-frame source of a synthetic stream
pub struct SyntheticTrack {
    active: Arc<AtomicBool>,
}

#[async_trait]
impl VideoTrack for SyntheticTrack {
    fn label(&self) -> &str {
        "Synthetic test pattern"
    }

    async fn take_photo(&self) -> Result<Blob, CaptureError> {
        if !self.active.load(Ordering::SeqCst) {
            return Err(CaptureError::Other("track has ended".to_string()));
        }
        Ok(Blob::new(PIXEL_PNG.to_vec(), MediaType::Png))
    }
}

/// Session bookkeeping shared with the chunk pump
struct Recording {
    session: RecordingSession,
    /// Start of the part of the current segment that is still running
    running_since: Option<Instant>,
    /// Time already covered by the current segment before a pause
    carried: Duration,
    frames: u64,
}

impl Recording {
    /// Close the current segment and return its bytes
    fn cut_segment(&mut self, label: &str, now: Instant) -> Vec<u8> {
        let mut covered = std::mem::take(&mut self.carried);
        if let Some(since) = self.running_since.as_mut() {
            covered += now.saturating_duration_since(*since);
            *since = now;
        }
        self.frames += 1;
        let ms = u32::try_from(covered.as_millis()).unwrap_or(u32::MAX);
        let payload = format!("{label} frame {}", self.frames);
        encode_segment(ms, payload.as_bytes())
    }
}

/// Recorder over a synthetic stream
pub struct SyntheticRecorder {
    label: Arc<str>,
    chunk_interval: Duration,
    events: EventEmitter<RecorderEvent>,
    recording: Arc<Mutex<Recording>>,
    pump: Mutex<Option<JoinHandle<()>>>,
}

impl SyntheticRecorder {
    pub fn new(constraints: CaptureConstraints, chunk_interval: Duration) -> Self {
        Self {
            label: Arc::from(constraints.video.to_string()),
            chunk_interval,
            events: EventEmitter::new(),
            recording: Arc::new(Mutex::new(Recording {
                session: RecordingSession::new(),
                running_since: None,
                carried: Duration::ZERO,
                frames: 0,
            })),
            pump: Mutex::new(None),
        }
    }

    fn spawn_pump(&self) -> JoinHandle<()> {
        let events = self.events.clone();
        let recording = Arc::clone(&self.recording);
        let label = Arc::clone(&self.label);
        let period = self.chunk_interval;

        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let mut rec = recording.lock();
                if !rec.session.is_recording() {
                    continue;
                }
                let segment = rec.cut_segment(&label, Instant::now());
                trace!(bytes = segment.len(), "synthetic chunk");
                events.emit(RecorderEvent::DataAvailable(Chunk::from(segment)));
            }
        })
    }
}

impl Drop for SyntheticRecorder {
    fn drop(&mut self) {
        if let Some(pump) = self.pump.lock().take() {
            pump.abort();
        }
    }
}

#[async_trait]
impl MediaRecorder for SyntheticRecorder {
    fn subscribe(&self) -> Subscription<RecorderEvent> {
        self.events.subscribe()
    }

    fn state(&self) -> RecorderState {
        self.recording.lock().session.state()
    }

    async fn start(&self) -> Result<(), RecorderError> {
        {
            let mut rec = self.recording.lock();
            rec.session.start()?;
            rec.running_since = Some(Instant::now());
            rec.carried = Duration::ZERO;
            self.events.emit(RecorderEvent::Start);
        }
        *self.pump.lock() = Some(self.spawn_pump());
        Ok(())
    }

    async fn stop(&self) -> Result<(), RecorderError> {
        {
            let mut rec = self.recording.lock();
            rec.session.stop()?;
            let segment = rec.cut_segment(&self.label, Instant::now());
            rec.running_since = None;
            self.events
                .emit(RecorderEvent::DataAvailable(Chunk::from(segment)));
            self.events.emit(RecorderEvent::Stop);
        }
        if let Some(pump) = self.pump.lock().take() {
            pump.abort();
        }
        Ok(())
    }

    async fn pause(&self) -> Result<(), RecorderError> {
        let mut rec = self.recording.lock();
        rec.session.pause()?;
        if let Some(since) = rec.running_since.take() {
            rec.carried += Instant::now().saturating_duration_since(since);
        }
        self.events.emit(RecorderEvent::Pause);
        Ok(())
    }

    async fn resume(&self) -> Result<(), RecorderError> {
        let mut rec = self.recording.lock();
        rec.session.resume()?;
        rec.running_since = Some(Instant::now());
        self.events.emit(RecorderEvent::Resume);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::infrastructure::capture::segment::scan_duration;

    fn recorder() -> SyntheticRecorder {
        SyntheticRecorder::new(CaptureConstraints::default(), Duration::from_secs(1))
    }

    fn chunks_of(sub: &mut Subscription<RecorderEvent>) -> Vec<u8> {
        let mut data = Vec::new();
        while let Some(event) = sub.try_recv() {
            if let RecorderEvent::DataAvailable(chunk) = event {
                data.extend_from_slice(chunk.data());
            }
        }
        data
    }

    #[tokio::test]
    async fn failing_devices_report_error() {
        let devices = SyntheticDevices::failing(CaptureError::NotFound);
        let result = devices.get_user_media(&CaptureConstraints::default()).await;
        assert!(matches!(result, Err(CaptureError::NotFound)));
    }

    #[tokio::test]
    async fn stopped_stream_cannot_record_or_snap() {
        let stream = SyntheticStream::new(CaptureConstraints::default(), Duration::from_secs(1));
        let track = stream.video_track().unwrap();
        stream.stop();

        assert!(stream.create_recorder().is_err());
        assert!(track.take_photo().await.is_err());
    }

    #[tokio::test]
    async fn photo_is_png() {
        let stream = SyntheticStream::new(CaptureConstraints::default(), Duration::from_secs(1));
        let photo = stream.video_track().unwrap().take_photo().await.unwrap();
        assert_eq!(photo.media_type(), MediaType::Png);
        assert!(photo.data().starts_with(b"\x89PNG"));
    }

    #[tokio::test(start_paused = true)]
    async fn emits_one_chunk_per_interval_then_final_chunk() {
        let recorder = recorder();
        let mut sub = recorder.subscribe();

        recorder.start().await.unwrap();
        assert_eq!(sub.recv().await, Some(RecorderEvent::Start));

        for _ in 0..3 {
            match sub.recv().await {
                Some(RecorderEvent::DataAvailable(chunk)) => assert!(!chunk.is_empty()),
                other => panic!("expected chunk, got {other:?}"),
            }
        }

        tokio::time::advance(Duration::from_millis(400)).await;
        recorder.stop().await.unwrap();

        assert!(matches!(
            sub.try_recv(),
            Some(RecorderEvent::DataAvailable(_))
        ));
        assert_eq!(sub.try_recv(), Some(RecorderEvent::Stop));
        assert_eq!(recorder.state(), RecorderState::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn recording_duration_excludes_paused_time() {
        let recorder = recorder();
        let mut sub = recorder.subscribe();

        recorder.start().await.unwrap();
        tokio::time::advance(Duration::from_millis(1500)).await;
        tokio::task::yield_now().await;
        recorder.pause().await.unwrap();
        tokio::time::advance(Duration::from_secs(5)).await;
        recorder.resume().await.unwrap();
        tokio::time::advance(Duration::from_millis(500)).await;
        recorder.stop().await.unwrap();

        let data = chunks_of(&mut sub);
        let secs = scan_duration(&data).unwrap();
        assert!((secs - 2.0).abs() < 0.01, "got {secs}");
    }

    #[tokio::test]
    async fn invalid_transitions_are_rejected() {
        let recorder = recorder();
        assert!(matches!(
            recorder.stop().await,
            Err(RecorderError::InvalidState(_))
        ));
        assert!(recorder.pause().await.is_err());

        recorder.start().await.unwrap();
        assert!(recorder.start().await.is_err());
        recorder.stop().await.unwrap();
        assert!(recorder.start().await.is_err());
    }
}
