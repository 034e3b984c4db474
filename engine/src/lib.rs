// Display engine library root
// Yen formatting, easing curves and count-up animation for calculator UIs.

pub mod animation;
pub mod config;
pub mod easing;
pub mod error;
pub mod formatters;
pub mod services;

pub use animation::{
    AnimationRun, CancelHandle, CountUpAnimator, CountUpRequest, DisplaySink, FrameClock,
    FrameSource, ManualClock, TickOutcome,
};
pub use config::DisplaySettings;
pub use error::{DisplayError, Result};
pub use formatters::{decompose, format, format_axis_label, YenFormatter};
