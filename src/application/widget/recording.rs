//! Recorder state machine handlers

use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::application::duration::resolve_duration;
use crate::application::ports::{
    Alerter, MediaDevices, MediaDisplay, MediaProber, ObjectSource, RecorderEvent, WidgetView,
};
use crate::domain::media::MediaType;
use crate::domain::recording::RecorderState;
use crate::domain::timer::{format_timer, PLACEHOLDER, ZERO};
use crate::domain::widget::{Element, TextOutput};

use super::{Recording, RecorderWidget, WidgetError};

impl<D, M, P, V, A> RecorderWidget<D, M, P, V, A>
where
    D: MediaDevices,
    M: MediaDisplay,
    P: MediaProber,
    V: WidgetView,
    A: Alerter,
{
    /// Start control
    pub async fn start_recording(&mut self) -> Result<(), WidgetError> {
        self.check_no_restart()?;
        let recorder = self.recorder.as_ref().ok_or(WidgetError::NoActiveStream)?;
        if recorder.state() == RecorderState::Stopped {
            return Err(WidgetError::RestartRequired);
        }
        recorder.start().await?;
        Ok(())
    }

    /// Stop control. Also reveals the restart control.
    pub async fn stop_recording(&mut self) -> Result<(), WidgetError> {
        let recorder = self.recorder.as_ref().ok_or(WidgetError::NoActiveStream)?;
        recorder.stop().await?;
        self.view.set_visible(Element::RestartRecord, true);
        Ok(())
    }

    pub async fn pause_recording(&mut self) -> Result<(), WidgetError> {
        self.check_no_restart()?;
        let recorder = self.recorder.as_ref().ok_or(WidgetError::NoActiveStream)?;
        recorder.pause().await?;
        Ok(())
    }

    pub async fn resume_recording(&mut self) -> Result<(), WidgetError> {
        self.check_no_restart()?;
        let recorder = self.recorder.as_ref().ok_or(WidgetError::NoActiveStream)?;
        recorder.resume().await?;
        Ok(())
    }

    /// The recorder is about to be replaced while a restart settles
    fn check_no_restart(&self) -> Result<(), WidgetError> {
        if self.restart_deadline.is_some() {
            return Err(WidgetError::RestartPending);
        }
        Ok(())
    }

    pub(super) async fn handle_recorder_event(
        &mut self,
        event: RecorderEvent,
    ) -> Result<(), WidgetError> {
        match event {
            RecorderEvent::Start => {
                self.on_record_start();
                Ok(())
            }
            RecorderEvent::DataAvailable(chunk) => {
                debug!(bytes = chunk.size_bytes(), "chunk received");
                self.chunks.push(chunk);
                Ok(())
            }
            RecorderEvent::Pause => {
                self.display.pause();
                self.timer.pause_record();
                info!("recording paused");
                Ok(())
            }
            RecorderEvent::Resume => {
                if let Err(e) = self.display.play().await {
                    warn!(error = %e, "live preview did not resume");
                }
                self.timer.resume_record();
                info!("recording resumed");
                Ok(())
            }
            RecorderEvent::Stop => self.on_record_stop().await,
            RecorderEvent::Error(message) => {
                error!(%message, "recorder error");
                Ok(())
            }
        }
    }

    fn on_record_start(&mut self) {
        info!("recording started");
        self.chunks.clear();
        self.flags.is_recording = true;
        self.toggle_record_controls();

        self.set_elapsed(ZERO);
        self.view.set_text(TextOutput::Duration, PLACEHOLDER);
        self.timer.start_record(self.config.timer_period);
    }

    /// Finalize the session: build the blob, show it, and enable playback
    /// once its duration is known.
    async fn on_record_stop(&mut self) -> Result<(), WidgetError> {
        let blob = self.chunks.finish(MediaType::WebmAv1);
        info!(
            size = %blob.human_readable_size(),
            media_type = %blob.media_type(),
            "recording finished"
        );

        if let Some(previous) = self.recording.take() {
            self.urls.revoke(&previous.url);
        }
        let url = self.urls.create(ObjectSource::Blob(blob.clone()));

        self.release_preview();
        if let Err(e) = self.display.bind(&url, false).await {
            warn!(error = %e, "recording could not be displayed");
        }

        // This session's listeners are done
        self.subscription = None;

        self.flags.is_recording = false;
        self.toggle_record_controls();
        self.timer.clear();
        self.set_elapsed(ZERO);
        self.recording = Some(Recording {
            url,
            blob: blob.clone(),
        });

        let secs = resolve_duration(&self.prober, &blob).await?;
        self.display.set_duration(secs);
        let whole = secs.floor();
        self.view.set_text(TextOutput::Duration, &format_timer(whole));
        self.slider.set_max(whole);
        self.view.set_slider_max(self.slider.max());
        self.flags.can_play = true;
        info!(duration_secs = whole, "recording ready for playback");
        Ok(())
    }

    /// Swap start/stop visibility to match `is_recording`
    fn toggle_record_controls(&mut self) {
        if self.flags.is_recording {
            self.view.set_visible(Element::StartRecord, false);
            self.view.set_visible(Element::StopRecord, true);
        } else {
            self.view.set_visible(Element::StopRecord, false);
            self.view.set_visible(Element::StartRecord, true);
            self.view.set_visible(Element::VideoOverlay, true);
        }
    }

    /// Restart control: reset everything, then after the settle delay
    /// clear the displays and acquire a fresh stream.
    ///
    /// Only a finished session or a failed capture can be restarted.
    pub fn restart(&mut self) {
        if self.flags.is_recording {
            debug!("restart ignored while recording");
            return;
        }
        if self.restart_deadline.is_some() {
            debug!("restart already pending");
            return;
        }
        if let Some(recorder) = self.recorder.as_ref() {
            if recorder.state() != RecorderState::Stopped {
                debug!(state = %recorder.state(), "restart ignored; nothing recorded yet");
                return;
            }
        }

        self.view.set_visible(Element::Play, true);
        self.view.set_visible(Element::Pause, false);
        self.flags.reset();
        self.timer.clear();
        self.throttle.cancel();
        self.display.pause();
        self.set_slider_value(0.0);
        self.view.set_visible(Element::RestartRecord, false);

        self.schedule_restart(self.config.restart_settle);
        info!("restart requested");
    }

    fn schedule_restart(&mut self, delay: Duration) {
        self.restart_deadline = Some(tokio::time::Instant::now() + delay);
    }

    pub(super) async fn on_restart_settled(&mut self) -> Result<(), WidgetError> {
        self.restart_deadline = None;
        self.view.set_visible(Element::VideoOverlay, false);
        self.set_elapsed(PLACEHOLDER);
        self.view.set_text(TextOutput::Duration, PLACEHOLDER);
        self.acquire().await
    }
}
