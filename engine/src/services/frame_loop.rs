//! Explicit frame loop for count-up runs.
//!
//! Instead of a tick callback rescheduling itself, the loop awaits the next
//! frame from a [`FrameSource`] and ticks the run until it finishes or is
//! cancelled.

use crate::animation::{AnimationRun, DisplaySink, FrameClock, FrameSource, TickOutcome};
use crate::config::settings::AnimationSettings;
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::debug;

/// Frame source backed by a tokio interval. Late frames are skipped rather
/// than bunched up; progress comes from elapsed time so only smoothness suffers.
pub struct TokioFrames {
    interval: Interval,
    origin: Instant,
}

impl TokioFrames {
    /// Must be called from within a tokio runtime.
    pub fn new(frame_interval: Duration) -> Self {
        let mut interval = tokio::time::interval(frame_interval.max(Duration::from_millis(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            interval,
            origin: Instant::now(),
        }
    }

    pub fn from_settings(settings: &AnimationSettings) -> Self {
        Self::new(settings.frame_interval())
    }
}

impl FrameClock for TokioFrames {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

impl FrameSource for TokioFrames {
    async fn next_frame(&mut self) -> f64 {
        self.interval.tick().await;
        self.now_ms()
    }
}

#[derive(Debug)]
pub struct RunOutcome<S> {
    pub outcome: TickOutcome,
    pub frames: usize,
    pub sink: S,
}

/// Ticks `run` once per frame until it finishes or is cancelled, then hands
/// the sink back.
pub async fn drive<S, F>(mut run: AnimationRun<S>, frames: &mut F) -> RunOutcome<S>
where
    S: DisplaySink,
    F: FrameSource,
{
    let mut count = 0;
    loop {
        let now = frames.next_frame().await;
        count += 1;
        let outcome = run.tick(now);
        if outcome.is_done() {
            debug!(run = %run.id(), frames = count, ?outcome, "Frame loop stopped");
            return RunOutcome {
                outcome,
                frames: count,
                sink: run.into_sink(),
            };
        }
    }
}
