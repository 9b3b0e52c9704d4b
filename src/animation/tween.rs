//! A single in-flight interpolation.

use web_time::{Duration, Instant};

use super::completion::Resolver;
use crate::sinks::SinkTarget;
use crate::util::easing::EasingFunction;

/// Identifier handed out by the scheduler, unique per scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(pub u64);

/// Interpolates one sink from `from` to `to` over `duration`.
///
/// Lives inside [`super::TweenScheduler`] from the `animate` call until the
/// frame that delivers its terminal value.
#[derive(Debug)]
pub struct Tween {
    id: TweenId,
    target: SinkTarget,
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingFunction,
    start_time: Instant,
    resolver: Resolver,
}

impl Tween {
    pub(crate) fn new(
        id: TweenId,
        target: SinkTarget,
        (from, to): (f64, f64),
        duration: Duration,
        easing: EasingFunction,
        start_time: Instant,
        resolver: Resolver,
    ) -> Self {
        Self {
            id,
            target,
            from,
            to,
            duration,
            easing,
            start_time,
            resolver,
        }
    }

    /// Scheduler-assigned id.
    pub fn id(&self) -> TweenId {
        self.id
    }

    /// Sink this tween drives.
    pub fn target(&self) -> SinkTarget {
        self.target
    }

    /// Start value.
    pub fn from(&self) -> f64 {
        self.from
    }

    /// End value, delivered exactly on the final frame.
    pub fn to(&self) -> f64 {
        self.to
    }

    /// Total duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Time elapsed since the tween started.
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.start_time)
    }

    /// Normalized progress (0.0 to 1.0). Zero-length tweens are always done.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed(now).as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Whether `now` is at or past the end.
    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// Value to show at `now`. The last value is `to` itself, not a lerp
    /// that could round short of it.
    pub fn value_at(&self, now: Instant) -> f64 {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * self.easing.evaluate(t)
    }

    pub(crate) fn into_resolver(self) -> Resolver {
        self.resolver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Completion;
    use crate::sinks::Cursor;

    fn tween(from: f64, to: f64, millis: u64, start: Instant) -> Tween {
        let (resolver, _completion) = Completion::pair();
        Tween::new(
            TweenId(0),
            SinkTarget::Cursor(Cursor::I),
            (from, to),
            Duration::from_millis(millis),
            EasingFunction::Linear,
            start,
            resolver,
        )
    }

    #[test]
    fn progress_is_clamped() {
        let start = Instant::now();
        let t = tween(0.0, 10.0, 100, start);

        assert!((t.progress(start) - 0.0).abs() < 1e-9);
        assert!((t.progress(start + Duration::from_millis(50)) - 0.5).abs() < 1e-9);
        assert!((t.progress(start + Duration::from_millis(500)) - 1.0).abs() < 1e-9);
        assert!(!t.is_finished(start + Duration::from_millis(99)));
        assert!(t.is_finished(start + Duration::from_millis(100)));
    }

    #[test]
    fn descending_range_interpolates_downward() {
        let start = Instant::now();
        let t = tween(44.0, 22.0, 100, start);
        assert_eq!(t.value_at(start), 44.0);
        assert!((t.value_at(start + Duration::from_millis(50)) - 33.0).abs() < 1e-9);
        assert_eq!(t.value_at(start + Duration::from_millis(100)), 22.0);
    }

    #[test]
    fn zero_duration_is_immediately_terminal() {
        let start = Instant::now();
        let t = tween(1.0, 2.0, 0, start);
        assert!(t.is_finished(start));
        assert_eq!(t.value_at(start), 2.0);
    }

    #[test]
    fn terminal_value_is_exact() {
        let start = Instant::now();
        let t = tween(0.1, 0.7, 3, start);
        assert_eq!(t.value_at(start + Duration::from_millis(3)), 0.7);
        assert_eq!(t.from(), 0.1);
        assert_eq!(t.to(), 0.7);
    }
}
