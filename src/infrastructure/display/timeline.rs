//! Headless media display
//!
//! Keeps a playback clock for whatever is bound: a live stream runs for
//! as long as it is playing, a recording is clamped to its duration once
//! the widget has measured it.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::application::ports::{MediaDisplay, ObjectSource, ObjectUrls};
use crate::domain::error::MediaLoadError;

#[derive(Debug, Default)]
struct Clock {
    source: Option<String>,
    /// Known end of the bound media; `None` for live streams
    duration: Option<f64>,
    /// Position when the clock last stopped or was moved
    offset: f64,
    /// Set while playing
    running_since: Option<Instant>,
}

impl Clock {
    fn position(&self, now: Instant) -> f64 {
        let running = self
            .running_since
            .map(|since| now.saturating_duration_since(since).as_secs_f64())
            .unwrap_or(0.0);
        let position = self.offset + running;
        match self.duration {
            Some(end) => position.min(end),
            None => position,
        }
    }

    fn at_end(&self, now: Instant) -> bool {
        self.duration
            .is_some_and(|end| self.position(now) >= end)
    }

    fn stop(&mut self, now: Instant) {
        self.offset = self.position(now);
        self.running_since = None;
    }
}

/// Display that tracks playback position without rendering
pub struct TimelineDisplay {
    urls: Arc<dyn ObjectUrls>,
    clock: Mutex<Clock>,
}

impl TimelineDisplay {
    pub fn new(urls: Arc<dyn ObjectUrls>) -> Self {
        Self {
            urls,
            clock: Mutex::new(Clock::default()),
        }
    }

    /// Duration of the bound recording, if known
    pub fn duration(&self) -> Option<f64> {
        self.clock.lock().duration
    }
}

#[async_trait]
impl MediaDisplay for TimelineDisplay {
    async fn bind(&self, url: &str, autoplay: bool) -> Result<(), MediaLoadError> {
        let source = self
            .urls
            .resolve(url)
            .ok_or_else(|| MediaLoadError::UnknownSource(url.to_string()))?;

        match source {
            ObjectSource::Stream(stream) => debug!(stream = stream.id(), "binding live stream"),
            ObjectSource::Blob(blob) => {
                debug!(size = %blob.human_readable_size(), "binding recording")
            }
        }

        let mut clock = self.clock.lock();
        *clock = Clock {
            source: Some(url.to_string()),
            duration: None,
            offset: 0.0,
            running_since: autoplay.then(Instant::now),
        };
        Ok(())
    }

    fn set_duration(&self, secs: f64) {
        let mut clock = self.clock.lock();
        if clock.source.is_some() && secs.is_finite() && secs >= 0.0 {
            clock.duration = Some(secs);
            clock.offset = clock.offset.min(secs);
        }
    }

    fn unbind(&self) {
        *self.clock.lock() = Clock::default();
    }

    fn source(&self) -> Option<String> {
        self.clock.lock().source.clone()
    }

    async fn play(&self) -> Result<(), MediaLoadError> {
        let mut clock = self.clock.lock();
        if clock.source.is_none() {
            return Err(MediaLoadError::LoadFailed("nothing to play".to_string()));
        }
        let now = Instant::now();
        if clock.at_end(now) {
            clock.offset = 0.0;
            clock.running_since = None;
        }
        if clock.running_since.is_none() {
            clock.running_since = Some(now);
        }
        Ok(())
    }

    fn pause(&self) {
        self.clock.lock().stop(Instant::now());
    }

    fn seek(&self, position: f64) {
        let mut clock = self.clock.lock();
        let now = Instant::now();
        let end = clock.duration.unwrap_or(f64::INFINITY);
        clock.offset = if position.is_finite() {
            position.clamp(0.0, end)
        } else {
            0.0
        };
        if clock.running_since.is_some() {
            clock.running_since = Some(now);
        }
    }

    fn current_time(&self) -> f64 {
        self.clock.lock().position(Instant::now())
    }

    fn is_paused(&self) -> bool {
        let clock = self.clock.lock();
        clock.running_since.is_none() || clock.at_end(Instant::now())
    }
}
