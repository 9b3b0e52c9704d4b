//! Shared utilities: easing curves for tweens and frame pacing for hosts.

pub mod easing;
pub mod frame_timing;
