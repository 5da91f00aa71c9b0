//! Recorder widget use case
//!
//! One controller owns the whole session state and reacts to control
//! input, recorder notifications and timer ticks on a single event loop.
//! Each handler runs to completion before the next event is taken.

mod capture;
mod playback;
mod recording;
mod snapshot;

#[cfg(test)]
mod test_support;

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use crate::domain::capture::CaptureConstraints;
use crate::domain::config::AppConfig;
use crate::domain::error::{CaptureError, MediaLoadError};
use crate::domain::media::{Blob, ChunkBuffer};
use crate::domain::timer::{format_timer, PLACEHOLDER};
use crate::domain::widget::{Element, ScrubSlider, SessionFlags, SessionSnapshot, TextOutput};

use super::ports::{
    AlertError, Alerter, MediaDevices, MediaDisplay, MediaProber, MediaRecorder, MediaStream,
    ObjectUrls, RecorderError, RecorderEvent, Subscription, VideoTrack, WidgetView,
};
use super::throttle::Throttle;
use super::timers::{TimerSlot, TimerTick, TIMER_PERIOD};

/// Errors from widget handlers.
///
/// None of these end the event loop.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("Capture failed: {0}")]
    Capture(#[from] CaptureError),

    #[error("Recorder error: {0}")]
    Recorder(#[from] RecorderError),

    #[error("Media error: {0}")]
    Media(#[from] MediaLoadError),

    #[error("Alert failed: {0}")]
    Alert(#[from] AlertError),

    #[error("No active capture stream")]
    NoActiveStream,

    #[error("Recording already finished; restart to record again")]
    RestartRequired,

    #[error("Restart in progress; wait for the camera to reopen")]
    RestartPending,
}

/// Settings fixed at widget construction
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    pub constraints: CaptureConstraints,
    /// Slider input throttle window
    pub throttle: Duration,
    /// Delay between a restart and the UI reset / re-acquisition
    pub restart_settle: Duration,
    /// Period of both timer displays
    pub timer_period: Duration,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::from(&AppConfig::defaults())
    }
}

impl From<&AppConfig> for WidgetConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            constraints: config.constraints(),
            throttle: config.throttle(),
            restart_settle: config.restart_settle(),
            timer_period: TIMER_PERIOD,
        }
    }
}

/// User input on the widget's controls
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    StartRecord,
    StopRecord,
    PauseRecord,
    ResumeRecord,
    Restart,
    /// Play button or the play overlay
    Play,
    Pause,
    /// Scrub slider moved to a position in seconds
    Slider(f64),
    Snap,
    Status,
    Quit,
}

/// Everything the event loop reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    Control(Control),
    Recorder(RecorderEvent),
    Timer(TimerTick),
    SliderSettled(f64),
    RestartSettled,
    ControlsClosed,
}

/// Recorded artifact and the URL it is displayed through
#[derive(Debug, Clone)]
struct Recording {
    url: String,
    blob: Blob,
}

/// The recorder widget controller
pub struct RecorderWidget<D, M, P, V, A>
where
    D: MediaDevices,
    M: MediaDisplay,
    P: MediaProber,
    V: WidgetView,
    A: Alerter,
{
    devices: D,
    display: M,
    prober: P,
    view: V,
    alerter: A,
    urls: Arc<dyn ObjectUrls>,
    config: WidgetConfig,

    stream: Option<Arc<dyn MediaStream>>,
    preview_url: Option<String>,
    recorder: Option<Box<dyn MediaRecorder>>,
    subscription: Option<Subscription<RecorderEvent>>,
    frame_source: Option<Arc<dyn VideoTrack>>,

    chunks: ChunkBuffer,
    flags: SessionFlags,
    slider: ScrubSlider,
    throttle: Throttle<f64>,
    timer: TimerSlot,
    restart_deadline: Option<Instant>,
    recording: Option<Recording>,
    snapshot_url: Option<String>,
    elapsed_text: String,
}

impl<D, M, P, V, A> RecorderWidget<D, M, P, V, A>
where
    D: MediaDevices,
    M: MediaDisplay,
    P: MediaProber,
    V: WidgetView,
    A: Alerter,
{
    /// Create a new widget. Nothing is acquired until [`run`](Self::run)
    /// or [`acquire`](Self::acquire) is called.
    pub fn new(
        devices: D,
        display: M,
        prober: P,
        view: V,
        alerter: A,
        urls: Arc<dyn ObjectUrls>,
        config: WidgetConfig,
    ) -> Self {
        let throttle = Throttle::new(config.throttle);
        Self {
            devices,
            display,
            prober,
            view,
            alerter,
            urls,
            config,
            stream: None,
            preview_url: None,
            recorder: None,
            subscription: None,
            frame_source: None,
            chunks: ChunkBuffer::new(),
            flags: SessionFlags::new(),
            slider: ScrubSlider::new(),
            throttle,
            timer: TimerSlot::default(),
            restart_deadline: None,
            recording: None,
            snapshot_url: None,
            elapsed_text: PLACEHOLDER.to_string(),
        }
    }

    pub fn flags(&self) -> SessionFlags {
        self.flags
    }

    pub fn slider(&self) -> ScrubSlider {
        self.slider
    }

    pub fn timer(&self) -> &TimerSlot {
        &self.timer
    }

    /// Blob of the last completed recording
    pub fn recording(&self) -> Option<&Blob> {
        self.recording.as_ref().map(|r| &r.blob)
    }

    /// Put every control into its initial state
    pub fn initialize_view(&mut self) {
        for element in Element::ALL {
            self.view.set_visible(element, element.initially_visible());
        }
        self.set_elapsed(PLACEHOLDER);
        self.view.set_text(TextOutput::Duration, PLACEHOLDER);
        self.view.set_slider_max(self.slider.max());
        self.view.set_slider_value(self.slider.value());
    }

    /// Acquire the camera and process events until the control channel
    /// closes or `Quit` arrives.
    pub async fn run(&mut self, controls: &mut mpsc::Receiver<Control>) {
        self.initialize_view();

        if let Err(e) = self.acquire().await {
            warn!(error = %e, "initial capture failed; use restart to retry");
        }

        while self.step(controls).await {}

        self.shutdown();
    }

    /// Wait for one event and handle it.
    ///
    /// # Returns
    /// `false` once the loop should end
    pub async fn step(&mut self, controls: &mut mpsc::Receiver<Control>) -> bool {
        match self.next_event(controls).await {
            WidgetEvent::ControlsClosed | WidgetEvent::Control(Control::Quit) => false,
            event => {
                if let Err(e) = self.handle(event).await {
                    warn!(error = %e, "handler failed");
                }
                true
            }
        }
    }

    /// Wait for the next event from any source.
    ///
    /// Recorder notifications are preferred so that a session's events are
    /// handled before control input that follows them.
    pub async fn next_event(&mut self, controls: &mut mpsc::Receiver<Control>) -> WidgetEvent {
        let restart_deadline = self.restart_deadline;

        tokio::select! {
            biased;
            event = next_recorder_event(&mut self.subscription) => WidgetEvent::Recorder(event),
            _ = sleep_until_deadline(restart_deadline) => WidgetEvent::RestartSettled,
            tick = self.timer.tick() => WidgetEvent::Timer(tick),
            value = self.throttle.settled() => WidgetEvent::SliderSettled(value),
            control = controls.recv() => match control {
                Some(control) => WidgetEvent::Control(control),
                None => WidgetEvent::ControlsClosed,
            },
        }
    }

    /// Dispatch one event to its handler
    pub async fn handle(&mut self, event: WidgetEvent) -> Result<(), WidgetError> {
        match event {
            WidgetEvent::Control(control) => self.handle_control(control).await,
            WidgetEvent::Recorder(event) => self.handle_recorder_event(event).await,
            WidgetEvent::Timer(TimerTick::Record(secs)) => {
                self.set_elapsed(&format_timer(secs as f64));
                Ok(())
            }
            WidgetEvent::Timer(TimerTick::Play) => {
                self.on_play_tick();
                Ok(())
            }
            WidgetEvent::SliderSettled(position) => {
                self.on_slider_settled(position);
                Ok(())
            }
            WidgetEvent::RestartSettled => self.on_restart_settled().await,
            WidgetEvent::ControlsClosed => Ok(()),
        }
    }

    async fn handle_control(&mut self, control: Control) -> Result<(), WidgetError> {
        debug!(?control, "control");
        match control {
            Control::StartRecord => self.start_recording().await,
            Control::StopRecord => self.stop_recording().await,
            Control::PauseRecord => self.pause_recording().await,
            Control::ResumeRecord => self.resume_recording().await,
            Control::Restart => {
                self.restart();
                Ok(())
            }
            Control::Play => self.play().await,
            Control::Pause => {
                self.pause_playback();
                Ok(())
            }
            Control::Slider(position) => {
                self.on_slider_input(position);
                Ok(())
            }
            Control::Snap => self.snap().await,
            Control::Status => {
                self.view.show_status(&self.snapshot());
                Ok(())
            }
            Control::Quit => Ok(()),
        }
    }

    /// Current state, for status output
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            recorder: self
                .recorder
                .as_ref()
                .map(|r| r.state().to_string())
                .unwrap_or_else(|| "absent".to_string()),
            is_recording: self.flags.is_recording,
            is_playing: self.flags.is_playing,
            can_play: self.flags.can_play,
            buffered_chunks: self.chunks.len(),
            slider_value: self.slider.value(),
            slider_max: self.slider.max(),
            timer: self.timer.as_str().to_string(),
            recording_url: self.recording.as_ref().map(|r| r.url.clone()),
            recording_size: self.recording.as_ref().map(|r| r.blob.human_readable_size()),
            snapshot_url: self.snapshot_url.clone(),
        }
    }

    /// Release the stream and every URL the widget created
    pub fn shutdown(&mut self) {
        self.release_stream();
        self.timer.clear();
        self.throttle.cancel();
        if let Some(recording) = self.recording.take() {
            self.urls.revoke(&recording.url);
        }
        if let Some(url) = self.snapshot_url.take() {
            self.urls.revoke(&url);
        }
        self.display.unbind();
        info!("widget shut down");
    }

    fn set_elapsed(&mut self, text: &str) {
        self.elapsed_text = text.to_string();
        self.view.set_text(TextOutput::Elapsed, text);
    }

    fn set_slider_value(&mut self, value: f64) {
        self.slider.set_value(value);
        self.view.set_slider_value(self.slider.value());
    }
}

async fn next_recorder_event(
    subscription: &mut Option<Subscription<RecorderEvent>>,
) -> RecorderEvent {
    if let Some(sub) = subscription.as_mut() {
        if let Some(event) = sub.recv().await {
            return event;
        }
        // Recorder is gone
        *subscription = None;
    }
    std::future::pending().await
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use super::test_support::*;

    #[tokio::test]
    async fn initial_view_shows_start_and_play() {
        let h = harness(0.0);

        assert!(h.view.visible(Element::StartRecord));
        assert!(h.view.visible(Element::Play));
        assert!(!h.view.visible(Element::StopRecord));
        assert!(!h.view.visible(Element::RestartRecord));
        assert!(!h.view.visible(Element::Pause));
        assert!(!h.view.visible(Element::VideoOverlay));
        assert!(!h.view.visible(Element::ImageContainer));
        assert_eq!(h.view.text(TextOutput::Elapsed), "-:-");
        assert_eq!(h.view.text(TextOutput::Duration), "-:-");
    }

    #[tokio::test]
    async fn status_reports_snapshot() {
        let mut h = harness(12.0);
        record_session(&mut h).await.unwrap();

        control(&mut h.widget, Control::Status).await.unwrap();
        let statuses = h.view.state.lock().statuses.clone();
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].recorder, "stopped");
        assert!(statuses[0].can_play);
        assert_eq!(statuses[0].slider_max, 12.0);
        assert!(statuses[0].recording_url.is_some());
    }

    #[tokio::test]
    async fn run_ends_on_quit_and_releases_everything() {
        let mut h = harness(0.0);
        let (tx, mut rx) = mpsc::channel(4);
        tx.send(Control::Snap).await.unwrap();
        tx.send(Control::Quit).await.unwrap();

        h.widget.run(&mut rx).await;

        assert!(!h.devices.latest().is_active());
        assert_eq!(h.urls.live_count(), 0);
        assert!(h.display.source().is_none());
    }

    #[tokio::test]
    async fn run_ends_when_controls_close() {
        let mut h = harness(0.0);
        let (tx, mut rx) = mpsc::channel::<Control>(1);
        drop(tx);

        h.widget.run(&mut rx).await;
        assert!(h.widget.recorder.is_none());
    }
}
