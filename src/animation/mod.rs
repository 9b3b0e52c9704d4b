//! Tween scheduling: frame-driven interpolation with awaitable completions.

mod completion;
mod scheduler;
mod tween;

pub(crate) use completion::Resolver;
pub use completion::{Completion, Join};
pub use scheduler::TweenScheduler;
pub use tween::{Tween, TweenId};
