use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::application::ports::FrameClock;

/// Fixed-rate stand-in for a display refresh signal.
///
/// Late ticks are delayed rather than bunched, so slow inference never causes
/// a burst of frames afterwards.
pub struct IntervalClock {
    interval: Mutex<Interval>,
}

impl IntervalClock {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval(period.max(Duration::from_millis(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            interval: Mutex::new(interval),
        }
    }
}

#[async_trait]
impl FrameClock for IntervalClock {
    async fn next_frame(&self) {
        self.interval.lock().await.tick().await;
    }
}
