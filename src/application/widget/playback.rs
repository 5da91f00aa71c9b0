//! Playback controller and scrub slider

use tracing::{debug, info, warn};

use crate::application::ports::{Alerter, MediaDevices, MediaDisplay, MediaProber, WidgetView};
use crate::domain::timer::format_timer;
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
    /// Play control: start playback of the finished recording.
    ///
    /// Ignored until the recording's duration is known.
    pub async fn play(&mut self) -> Result<(), WidgetError> {
        if !self.flags.can_play {
            debug!("play ignored; nothing playable yet");
            return Ok(());
        }

        self.view.set_visible(Element::VideoOverlay, false);
        self.display.play().await?;

        self.timer.start_play(self.config.timer_period);
        if self.slider.value() != 0.0 {
            let position = self.display.current_time();
            self.set_slider_value(position);
        }

        self.flags.is_playing = true;
        self.view.set_visible(Element::Play, false);
        self.view.set_visible(Element::Pause, true);
        info!(position = self.slider.value(), "playback started");
        Ok(())
    }

    /// Pause control
    pub fn pause_playback(&mut self) {
        self.view.set_visible(Element::Play, true);
        self.view.set_visible(Element::Pause, false);
        self.flags.is_playing = false;
        self.timer.clear_play();
        self.display.pause();
        debug!(position = self.display.current_time(), "playback paused");
    }

    /// Advance the slider and elapsed text from the display position.
    /// Stops at the end of the recording.
    pub(super) fn on_play_tick(&mut self) {
        let position = self.display.current_time().floor();

        if self.slider.is_complete_at(position) {
            let end = self.slider.max();
            self.set_slider_value(end);
            self.set_elapsed(&format_timer(end));
            self.timer.clear_play();
            self.flags.is_playing = false;
            self.view.set_visible(Element::Play, true);
            self.view.set_visible(Element::Pause, false);
            info!("playback reached the end");
            return;
        }

        self.set_slider_value(position);
        self.set_elapsed(&format_timer(position));
    }

    /// Slider moved by the user. The seek happens once input settles.
    pub fn on_slider_input(&mut self, position: f64) {
        if !self.flags.can_play {
            warn!(position, "slider moved before the recording is playable");
        }
        self.set_slider_value(position);
        let value = self.slider.value();
        if self.throttle.offer(value) {
            debug!(value, "slider throttle armed");
        }
    }

    pub(super) fn on_slider_settled(&mut self, position: f64) {
        self.display.seek(position);
        let current = self.display.current_time().floor();
        self.set_elapsed(&format_timer(current));
        debug!(position, current, "seeked");
    }
}
