//! Capture controller: stream acquisition and preview binding

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::ports::{
    Alerter, MediaDevices, MediaDisplay, MediaProber, MediaStream, ObjectSource, WidgetView,
};

use super::{RecorderWidget, WidgetError};

impl<D, M, P, V, A> RecorderWidget<D, M, P, V, A>
where
    D: MediaDevices,
    M: MediaDisplay,
    P: MediaProber,
    V: WidgetView,
    A: Alerter,
{
    /// Acquire a live stream and wire it up.
    ///
    /// On failure the user is alerted with a message for the error kind.
    /// Nothing is retried; a restart triggers a new attempt.
    pub async fn acquire(&mut self) -> Result<(), WidgetError> {
        let constraints = self.config.constraints;
        info!(
            audio = constraints.audio,
            video = %constraints.video,
            "acquiring capture stream"
        );

        match self.devices.get_user_media(&constraints).await {
            Ok(stream) => self.attach_stream(stream).await,
            Err(e) => {
                warn!(error = %e, "capture failed");
                if let Err(alert_err) = self.alerter.alert(&e.user_message()).await {
                    warn!(error = %alert_err, "could not show capture alert");
                }
                Err(e.into())
            }
        }
    }

    /// Bind a fresh stream: preview, recorder, listeners and frame source
    async fn attach_stream(&mut self, stream: Arc<dyn MediaStream>) -> Result<(), WidgetError> {
        self.release_stream();

        let recorder = stream.create_recorder()?;

        let url = self.urls.create(ObjectSource::Stream(Arc::clone(&stream)));
        if let Err(e) = self.display.bind(&url, true).await {
            warn!(error = %e, "live preview unavailable");
        }

        self.subscription = Some(recorder.subscribe());
        self.frame_source = stream.video_track();
        if self.frame_source.is_none() {
            warn!(stream = stream.id(), "stream has no video track; snap disabled");
        }

        info!(stream = stream.id(), preview = %url, "capture stream ready");
        self.recorder = Some(recorder);
        self.preview_url = Some(url);
        self.stream = Some(stream);
        Ok(())
    }

    /// Detach the live preview without stopping the stream
    pub(super) fn release_preview(&mut self) {
        if let Some(url) = self.preview_url.take() {
            self.urls.revoke(&url);
        }
    }

    /// Stop the current stream and drop everything bound to it
    pub(super) fn release_stream(&mut self) {
        self.subscription = None;
        self.recorder = None;
        self.frame_source = None;
        self.release_preview();
        if let Some(stream) = self.stream.take() {
            stream.stop();
            info!(stream = stream.id(), "capture stream released");
        }
    }
}
