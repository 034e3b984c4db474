//! Frame-driven value animation.
//!
//! The host supplies a [`FrameClock`] (high-resolution time) and, for the
//! async driver, a [`FrameSource`] that resolves once per repaint. Runs write
//! their current value to a [`DisplaySink`] on every tick and never read it
//! back.

pub mod count_up;
pub mod registry;

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub use count_up::{
    yen_value_formatter, AnimationRun, CountUpAnimator, CountUpRequest, ValueFormatter,
    DEFAULT_DURATION_MS,
};
pub use registry::ActiveRuns;

/// Anything that can show a line of text.
pub trait DisplaySink: Send {
    fn set_text(&mut self, text: &str);
}

impl DisplaySink for String {
    fn set_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

// Records every write; handy for hosts that replay values.
impl DisplaySink for Vec<String> {
    fn set_text(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

impl<S: DisplaySink + ?Sized> DisplaySink for &mut S {
    fn set_text(&mut self, text: &str) {
        (**self).set_text(text);
    }
}

impl<S: DisplaySink + ?Sized> DisplaySink for Box<S> {
    fn set_text(&mut self, text: &str) {
        (**self).set_text(text);
    }
}

impl<S: DisplaySink> DisplaySink for Arc<Mutex<S>> {
    fn set_text(&mut self, text: &str) {
        match self.lock() {
            Ok(mut sink) => sink.set_text(text),
            Err(poisoned) => poisoned.into_inner().set_text(text),
        }
    }
}

/// Host high-resolution time, in milliseconds.
pub trait FrameClock {
    fn now_ms(&self) -> f64;
}

/// Resolves once per frame ("before the next repaint") with the frame time.
#[allow(async_fn_in_trait)]
pub trait FrameSource: FrameClock {
    async fn next_frame(&mut self) -> f64;
}

/// Clock advanced by hand. Each `next_frame` moves time forward by the
/// configured frame step.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualClock {
    now_ms: f64,
    frame_step_ms: f64,
}

impl ManualClock {
    pub fn new(frame_step_ms: f64) -> Self {
        Self {
            now_ms: 0.0,
            frame_step_ms,
        }
    }

    pub fn advance(&mut self, ms: f64) -> f64 {
        self.now_ms += ms;
        self.now_ms
    }

    pub fn set(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(16.0)
    }
}

impl FrameClock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

impl FrameSource for ManualClock {
    async fn next_frame(&mut self) -> f64 {
        let step = self.frame_step_ms;
        self.advance(step)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Active,
    Cancelled,
    Finished,
}

const ACTIVE: u8 = 0;
const CANCELLED: u8 = 1;
const FINISHED: u8 = 2;

/// Cancellation handle for one animation run.
///
/// Clones share state. Once the run finishes the handle is inert and
/// `cancel` does nothing.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    id: Uuid,
    state: Arc<AtomicU8>,
}

impl CancelHandle {
    pub(crate) fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: Arc::new(AtomicU8::new(ACTIVE)),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns true if this call stopped an active run.
    pub fn cancel(&self) -> bool {
        let cancelled = self
            .state
            .compare_exchange(ACTIVE, CANCELLED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if cancelled {
            tracing::debug!(run = %self.id, "Count-up run cancelled");
        }
        cancelled
    }

    pub(crate) fn finish(&self) -> bool {
        self.state
            .compare_exchange(ACTIVE, FINISHED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn state(&self) -> RunState {
        match self.state.load(Ordering::Acquire) {
            ACTIVE => RunState::Active,
            CANCELLED => RunState::Cancelled,
            _ => RunState::Finished,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state() == RunState::Active
    }

    pub fn is_cancelled(&self) -> bool {
        self.state() == RunState::Cancelled
    }

    pub fn is_finished(&self) -> bool {
        self.state() == RunState::Finished
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Another frame is needed.
    Continue,
    Finished,
    /// Cancelled before this tick; nothing was written.
    Cancelled,
}

impl TickOutcome {
    pub fn is_done(&self) -> bool {
        !matches!(self, TickOutcome::Continue)
    }
}
