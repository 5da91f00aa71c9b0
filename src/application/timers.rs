//! Record and play timer slot
//!
//! Both timer displays share one slot, so at most one of them can be
//! running at any instant.

use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Period of both timer displays
pub const TIMER_PERIOD: Duration = Duration::from_millis(1000);

/// A completed timer period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// Whole seconds recorded so far
    Record(u64),
    Play,
}

/// The single active timer, if any
#[derive(Debug, Default)]
pub enum TimerSlot {
    #[default]
    Idle,
    Record {
        interval: Interval,
        elapsed_secs: u64,
        paused: bool,
    },
    Play {
        interval: Interval,
    },
}

fn periodic(period: Duration) -> Interval {
    // First tick one full period from now, like a browser interval
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

impl TimerSlot {
    /// Start the record-elapsed timer at zero, replacing any active timer
    pub fn start_record(&mut self, period: Duration) {
        *self = Self::Record {
            interval: periodic(period),
            elapsed_secs: 0,
            paused: false,
        };
    }

    /// Start the play-position timer, replacing any active timer
    pub fn start_play(&mut self, period: Duration) {
        *self = Self::Play {
            interval: periodic(period),
        };
    }

    /// Freeze the record timer. No effect on other timers.
    pub fn pause_record(&mut self) {
        if let Self::Record { paused, .. } = self {
            *paused = true;
        }
    }

    /// Continue a frozen record timer; the next tick is one full period away
    pub fn resume_record(&mut self) {
        if let Self::Record {
            interval, paused, ..
        } = self
        {
            if *paused {
                interval.reset();
                *paused = false;
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Self::Idle;
    }

    /// Clear the slot only if it holds the play timer
    pub fn clear_play(&mut self) {
        if self.is_play() {
            self.clear();
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record { .. })
    }

    pub fn is_play(&self) -> bool {
        matches!(self, Self::Play { .. })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Record { paused: true, .. } => "record (paused)",
            Self::Record { .. } => "record",
            Self::Play { .. } => "play",
        }
    }

    /// Wait for the active timer's next period.
    ///
    /// Never completes while idle or while the record timer is paused.
    /// Cancel-safe.
    pub async fn tick(&mut self) -> TimerTick {
        match self {
            Self::Record {
                interval,
                elapsed_secs,
                paused: false,
            } => {
                interval.tick().await;
                *elapsed_secs += 1;
                TimerTick::Record(*elapsed_secs)
            }
            Self::Play { interval } => {
                interval.tick().await;
                TimerTick::Play
            }
            _ => std::future::pending().await,
        }
    }
}
