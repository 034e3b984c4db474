// Host-side services that drive animations
pub mod frame_loop;

pub use frame_loop::{drive, RunOutcome, TokioFrames};
