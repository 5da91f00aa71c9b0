//! Still-frame capture

use std::sync::Arc;

use tracing::info;

use crate::application::ports::{
    Alerter, MediaDevices, MediaDisplay, MediaProber, ObjectSource, WidgetView,
};
use crate::domain::widget::Element;

use super::{RecorderWidget, WidgetError};

impl<D, M, P, V, A> RecorderWidget<D, M, P, V, A>
where
    D: MediaDevices,
    M: MediaDisplay,
    P: MediaProber,
    V: WidgetView,
    A: Alerter,
{
    /// Snap control: grab one frame from the live track and show it.
    ///
    /// Works in any recorder state as long as a stream is held.
    pub async fn snap(&mut self) -> Result<(), WidgetError> {
        let track = self
            .frame_source
            .as_ref()
            .map(Arc::clone)
            .ok_or(WidgetError::NoActiveStream)?;

        let photo = track.take_photo().await?;
        info!(
            track = track.label(),
            size = %photo.human_readable_size(),
            "frame captured"
        );

        if let Some(previous) = self.snapshot_url.take() {
            self.urls.revoke(&previous);
        }
        let url = self.urls.create(ObjectSource::Blob(photo));

        self.view.set_visible(Element::ImageContainer, true);
        self.view.set_image_source(&url);
        self.snapshot_url = Some(url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::application::ports::ObjectUrls;
    use crate::application::widget::test_support::*;
    use crate::application::widget::Control;
    use crate::domain::media::MediaType;

    #[tokio::test]
    async fn snap_shows_captured_frame() {
        let mut h = harness(0.0);
        h.widget.acquire().await.unwrap();

        control(&mut h.widget, Control::Snap).await.unwrap();
        let first = h.view.state.lock().image.clone().unwrap();
        assert!(h.view.visible(Element::ImageContainer));
        match h.urls.resolve(&first) {
            Some(ObjectSource::Blob(blob)) => assert_eq!(blob.media_type(), MediaType::Png),
            other => panic!("unexpected source: {other:?}"),
        }

        control(&mut h.widget, Control::Snap).await.unwrap();
        let second = h.view.state.lock().image.clone().unwrap();
        assert_ne!(first, second);
        assert!(h.urls.resolve(&first).is_none());
    }

    #[tokio::test]
    async fn snap_works_while_recording() {
        let mut h = harness(0.0);
        h.widget.acquire().await.unwrap();
        control(&mut h.widget, Control::StartRecord).await.unwrap();

        control(&mut h.widget, Control::Snap).await.unwrap();
        assert!(h.widget.flags().is_recording);
        assert!(h.view.visible(Element::ImageContainer));
    }

    #[tokio::test]
    async fn snap_without_stream_fails() {
        let mut h = harness(0.0);
        let result = control(&mut h.widget, Control::Snap).await;
        assert!(matches!(result, Err(WidgetError::NoActiveStream)));
    }
}
