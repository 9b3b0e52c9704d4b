//! Frame-driven scheduler for concurrent tweens.
//!
//! The host calls [`TweenScheduler::advance`] once per frame. Every active
//! tween delivers its current value through the [`SinkRegistry`]; tweens
//! that reached their end deliver exactly their `to` value and only then
//! resolve their [`Completion`]. Resolution happens after the whole frame has
//! been delivered, so anything awaiting a set of tweens sees all of them
//! settled at once.

use web_time::{Duration, Instant};

use super::completion::Completion;
use super::tween::{Tween, TweenId};
use crate::error::VisualizerError;
use crate::sinks::{SinkRegistry, SinkTarget};
use crate::util::easing::EasingFunction;

/// Owns every in-flight [`Tween`].
#[derive(Debug)]
pub struct TweenScheduler {
    /// Currently active tweens, in creation order.
    active: Vec<Tween>,
    /// Time of the most recent frame; new tweens start here.
    clock: Instant,
    /// Curve applied to every tween created from now on.
    easing: EasingFunction,
    next_id: u64,
}

impl TweenScheduler {
    /// Scheduler whose clock starts at `now`.
    pub fn new(now: Instant) -> Self {
        Self {
            active: Vec::with_capacity(4),
            clock: now,
            easing: EasingFunction::default(),
            next_id: 0,
        }
    }

    /// Builder-style easing override.
    #[must_use]
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// Change the curve for tweens created after this call.
    pub fn set_easing(&mut self, easing: EasingFunction) {
        self.easing = easing;
    }

    /// Time of the most recent frame.
    pub fn now(&self) -> Instant {
        self.clock
    }

    /// Move the clock forward to `now` without running a frame, so tweens
    /// created next start at `now` rather than at the last frame. Never moves
    /// the clock backwards.
    pub fn sync_clock(&mut self, now: Instant) {
        self.clock = self.clock.max(now);
    }

    /// Start interpolating `target` from `from` to `to` over `duration`.
    ///
    /// The tween starts at the scheduler's current clock and first delivers
    /// on the next [`Self::advance`]. A zero `duration` delivers exactly one
    /// update, the terminal `to`.
    pub fn animate(
        &mut self,
        target: SinkTarget,
        from: f64,
        to: f64,
        duration: Duration,
    ) -> Completion {
        let (resolver, completion) = Completion::pair();
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.active.push(Tween::new(
            id,
            target,
            (from, to),
            duration,
            self.easing,
            self.clock,
            resolver,
        ));
        completion
    }

    /// Run one frame at `now`.
    ///
    /// Returns how many tweens finished during this frame. Fails with
    /// [`VisualizerError::MissingSink`] if any active tween's target has no
    /// registered sink; nothing is resolved in that case.
    pub fn advance(
        &mut self,
        now: Instant,
        sinks: &mut SinkRegistry,
    ) -> Result<usize, VisualizerError> {
        self.clock = self.clock.max(now);
        let now = self.clock;

        for tween in &self.active {
            sinks.deliver(tween.target(), tween.value_at(now))?;
        }

        let (finished, running): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.active)
                .into_iter()
                .partition(|tween| tween.is_finished(now));
        self.active = running;

        let count = finished.len();
        for tween in finished {
            tween.into_resolver().resolve();
        }
        Ok(count)
    }

    /// Drop every in-flight tween. Their completions never resolve.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.active.len();
        self.active.clear();
        count
    }

    /// Number of tweens still running.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Whether nothing is animating.
    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    /// Active tweens, in creation order.
    pub fn active(&self) -> impl Iterator<Item = &Tween> + '_ {
        self.active.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::sinks::Cursor;
    use crate::sort::ElementId;

    type Log = Rc<RefCell<Vec<(SinkTarget, f64)>>>;

    fn recording_registry(targets: &[SinkTarget]) -> (SinkRegistry, Log) {
        let log: Log = Rc::default();
        let mut registry = SinkRegistry::new();
        for &target in targets {
            let log = Rc::clone(&log);
            let sink = move |x: f64| log.borrow_mut().push((target, x));
            match target {
                SinkTarget::Element(id) => registry.register_element(id, sink),
                SinkTarget::Cursor(c) => registry.register_cursor(c, sink),
            }
        }
        (registry, log)
    }

    const I: SinkTarget = SinkTarget::Cursor(Cursor::I);
    const A: SinkTarget = SinkTarget::Element(ElementId(0));
    const B: SinkTarget = SinkTarget::Element(ElementId(1));

    #[test]
    fn delivers_start_then_lerp_then_exact_end() {
        let start = Instant::now();
        let (mut sinks, log) = recording_registry(&[I]);
        let mut scheduler = TweenScheduler::new(start);
        let done = scheduler.animate(I, 0.0, 10.0, Duration::from_millis(100));

        assert_eq!(scheduler.advance(start, &mut sinks).unwrap(), 0);
        assert!(!done.is_done());
        let _ = scheduler
            .advance(start + Duration::from_millis(50), &mut sinks)
            .unwrap();
        assert!(!done.is_done());
        let finished = scheduler
            .advance(start + Duration::from_millis(130), &mut sinks)
            .unwrap();

        assert_eq!(finished, 1);
        assert!(done.is_done());
        assert!(scheduler.is_idle());
        let values: Vec<f64> = log.borrow().iter().map(|(_, x)| *x).collect();
        assert_eq!(values.len(), 3);
        assert_eq!(values[0], 0.0);
        assert!((values[1] - 5.0).abs() < 1e-9);
        assert_eq!(values[2], 10.0);
    }

    #[test]
    fn zero_duration_delivers_exactly_one_update() {
        let start = Instant::now();
        let (mut sinks, log) = recording_registry(&[I]);
        let mut scheduler = TweenScheduler::new(start);
        let done = scheduler.animate(I, 3.0, 7.0, Duration::ZERO);

        assert!(!done.is_done());
        assert_eq!(scheduler.advance(start, &mut sinks).unwrap(), 1);
        assert_eq!(scheduler.advance(start, &mut sinks).unwrap(), 0);

        assert!(done.is_done());
        assert_eq!(*log.borrow(), vec![(I, 7.0)]);
    }

    #[test]
    fn concurrent_tweens_resolve_after_the_whole_frame() {
        let start = Instant::now();
        let (mut sinks, log) = recording_registry(&[A, B]);
        let mut scheduler = TweenScheduler::new(start);
        let a = scheduler.animate(A, 22.0, 0.0, Duration::from_millis(100));
        let b = scheduler.animate(B, 0.0, 22.0, Duration::from_millis(100));
        let both = Completion::all([a.clone(), b.clone()]);

        let _ = scheduler
            .advance(start + Duration::from_millis(100), &mut sinks)
            .unwrap();

        assert!(a.is_done() && b.is_done());
        assert_eq!(both.remaining(), 0);
        assert_eq!(*log.borrow(), vec![(A, 0.0), (B, 22.0)]);
    }

    #[test]
    fn rebinding_mid_flight_routes_to_new_sink() {
        let start = Instant::now();
        let (mut sinks, old_log) = recording_registry(&[A]);
        let mut scheduler = TweenScheduler::new(start);
        let done = scheduler.animate(A, 0.0, 10.0, Duration::from_millis(100));
        let _ = scheduler.advance(start, &mut sinks).unwrap();

        let new_log: Log = Rc::default();
        let sink_log = Rc::clone(&new_log);
        sinks.register_element(ElementId(0), move |x| {
            sink_log.borrow_mut().push((A, x));
        });
        let _ = scheduler
            .advance(start + Duration::from_millis(100), &mut sinks)
            .unwrap();

        assert!(done.is_done());
        assert_eq!(*old_log.borrow(), vec![(A, 0.0)]);
        assert_eq!(*new_log.borrow(), vec![(A, 10.0)]);
    }

    #[test]
    fn missing_sink_fails_the_frame_without_resolving() {
        let start = Instant::now();
        let mut sinks = SinkRegistry::new();
        let mut scheduler = TweenScheduler::new(start);
        let done = scheduler.animate(B, 0.0, 1.0, Duration::ZERO);

        let err = scheduler.advance(start, &mut sinks).unwrap_err();
        assert!(matches!(err, VisualizerError::MissingSink(t) if t == B));
        assert!(!done.is_done());
        assert_eq!(scheduler.active_count(), 1);
    }

    #[test]
    fn cancelled_tweens_never_resolve() {
        let start = Instant::now();
        let (mut sinks, log) = recording_registry(&[I]);
        let mut scheduler = TweenScheduler::new(start);
        let done = scheduler.animate(I, 0.0, 1.0, Duration::from_millis(10));

        assert_eq!(scheduler.cancel_all(), 1);
        let _ = scheduler
            .advance(start + Duration::from_millis(20), &mut sinks)
            .unwrap();

        assert!(!done.is_done());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn clock_never_runs_backwards() {
        let start = Instant::now();
        let later = start + Duration::from_millis(40);
        let (mut sinks, _log) = recording_registry(&[I]);
        let mut scheduler = TweenScheduler::new(start);
        let _ = scheduler.advance(later, &mut sinks).unwrap();
        let _ = scheduler.advance(start, &mut sinks).unwrap();
        assert_eq!(scheduler.now(), later);

        let _ = scheduler.animate(I, 0.0, 1.0, Duration::from_millis(10));
        let tween = scheduler.active().next().unwrap();
        assert_eq!(tween.elapsed(later), Duration::ZERO);
    }

    #[test]
    fn easing_applies_to_new_tweens() {
        let start = Instant::now();
        let (mut sinks, log) = recording_registry(&[I]);
        let mut scheduler = TweenScheduler::new(start)
            .with_easing(EasingFunction::QuadraticIn);
        let _ = scheduler.animate(I, 0.0, 100.0, Duration::from_millis(100));
        let _ = scheduler
            .advance(start + Duration::from_millis(50), &mut sinks)
            .unwrap();
        assert!((log.borrow()[0].1 - 25.0).abs() < 1e-9);
    }

    #[test]
    fn synced_clock_starts_tweens_late() {
        let start = Instant::now();
        let idle = start + Duration::from_secs(120);
        let (mut sinks, log) = recording_registry(&[I]);
        let mut scheduler = TweenScheduler::new(start);

        scheduler.sync_clock(idle);
        scheduler.sync_clock(start);
        assert_eq!(scheduler.now(), idle);

        let done = scheduler.animate(I, 0.0, 100.0, Duration::from_millis(100));
        let finished = scheduler
            .advance(idle + Duration::from_millis(50), &mut sinks)
            .unwrap();
        assert_eq!(finished, 0);
        assert!(!done.is_done());
        assert!((log.borrow()[0].1 - 50.0).abs() < 1e-9);
    }
}
