//! Scrub slider model

/// Slider mapping a linear range onto playback position in seconds.
///
/// The value is kept within `0..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrubSlider {
    value: f64,
    max: f64,
}

impl ScrubSlider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Set the position, clamped to the slider range
    pub fn set_value(&mut self, value: f64) {
        self.value = if value.is_finite() {
            value.clamp(0.0, self.max)
        } else {
            0.0
        };
    }

    /// Set the maximum position (whole seconds) and re-clamp the value
    pub fn set_max(&mut self, max: f64) {
        self.max = if max.is_finite() { max.max(0.0).floor() } else { 0.0 };
        self.value = self.value.min(self.max);
    }

    /// Whether `position` has reached the end of the range
    pub fn is_complete_at(&self, position: f64) -> bool {
        self.max <= position
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}
