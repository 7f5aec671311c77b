//! Platform abstraction layer
//!
//! Shell-side helpers shared by the browser and native drivers:
//! - Keyboard and touch steering
//! - Frame timestamps to elapsed wall-clock time

pub mod input;
pub mod time;

pub use input::{Keyboard, SwipeTracker};
pub use time::FrameClock;
