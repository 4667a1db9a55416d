//! Deferred execution: polled timers driven by the session tick.
//!
//! Nothing here blocks or reads a clock. The session's external driver
//! calls `tick(now)` with injected time; both runners fire whatever came
//! due and drop entries whose session generation has been superseded.

pub mod delayed;
pub mod flip_back;

pub use delayed::{DelayedAction, DelayedRunner};
pub use flip_back::FlipBackTimer;
