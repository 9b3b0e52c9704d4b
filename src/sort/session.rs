//! One board and its runs: shuffle, start, tick, abort.
//!
//! The session owns the logical state, the tween scheduler, the sink table
//! and the in-flight driver future. Hosts register sinks, then call
//! [`SortSession::tick`] once per frame; each tick advances every tween and
//! resumes the driver if one of its awaited completions fired.

use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll, Wake, Waker};

use web_time::Instant;

use super::driver::{run_insertion_sort, DriverContext};
use super::element::{elements_from_values, Element};
use super::state::{CursorPair, SortState, SortStep};
use crate::animation::{Completion, Resolver, TweenScheduler};
use crate::audio::ToneEmitter;
use crate::error::VisualizerError;
use crate::options::VisualizerOptions;
use crate::permutation::{validate_permutation, PermutationSource};
use crate::sinks::{Cursor, SinkRegistry, SinkTarget};

/// Where the session is in its run lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// No run has started since the last shuffle (or the last one was
    /// aborted).
    Idle,
    /// A run is in flight; shuffle and sort are refused.
    Running,
    /// The last run sorted the board.
    Finished,
    /// The last run stopped on an error. Shuffle to start over.
    Failed {
        /// What went wrong.
        reason: String,
    },
}

/// Set when any completion the driver awaits fires.
#[derive(Debug)]
struct RunWake(AtomicBool);

impl RunWake {
    fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

impl Wake for RunWake {
    fn wake(self: Arc<Self>) {
        self.0.store(true, Ordering::Release);
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.0.store(true, Ordering::Release);
    }
}

struct ActiveRun {
    driver: Pin<Box<dyn Future<Output = ()>>>,
    resolver: Resolver,
    wake: Arc<RunWake>,
    started: Instant,
}

impl ActiveRun {
    /// Resume the driver if it was woken. `true` once it has finished.
    fn poll_if_woken(&mut self) -> bool {
        if !self.wake.take() {
            return false;
        }
        let waker = Waker::from(Arc::clone(&self.wake));
        let mut cx = Context::from_waker(&waker);
        matches!(self.driver.as_mut().poll(&mut cx), Poll::Ready(()))
    }
}

/// A board of bars plus everything needed to animate sorting it.
pub struct SortSession {
    options: VisualizerOptions,
    state: Rc<RefCell<SortState>>,
    scheduler: Rc<RefCell<TweenScheduler>>,
    tones: Rc<RefCell<dyn ToneEmitter>>,
    sinks: SinkRegistry,
    permutations: Box<dyn PermutationSource>,
    run: Option<ActiveRun>,
    status: RunStatus,
}

impl SortSession {
    /// Validate `options` and build a session with a freshly shuffled board.
    pub fn new(
        options: VisualizerOptions,
        permutations: impl PermutationSource + 'static,
        tones: impl ToneEmitter + 'static,
        now: Instant,
    ) -> Result<Self, VisualizerError> {
        options.validate()?;
        let scheduler = TweenScheduler::new(now).with_easing(options.easing);
        let tones: Rc<RefCell<dyn ToneEmitter>> = Rc::new(RefCell::new(tones));
        let mut session = Self {
            options,
            state: Rc::new(RefCell::new(SortState::new(Vec::new()))),
            scheduler: Rc::new(RefCell::new(scheduler)),
            tones,
            sinks: SinkRegistry::new(),
            permutations: Box::new(permutations),
            run: None,
            status: RunStatus::Idle,
        };
        session.shuffle()?;
        Ok(session)
    }

    /// Options the session was built with.
    pub fn options(&self) -> &VisualizerOptions {
        &self.options
    }

    /// Sink table, for the rendering layer to register and rebind sinks.
    pub fn sinks_mut(&mut self) -> &mut SinkRegistry {
        &mut self.sinks
    }

    /// Read-only view of the sink table.
    pub fn sinks(&self) -> &SinkRegistry {
        &self.sinks
    }

    /// Current run status.
    pub fn status(&self) -> &RunStatus {
        &self.status
    }

    /// Whether a run is in flight. Hosts hide shuffle/sort controls while
    /// this is true.
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Snapshot of the bars in slot order.
    pub fn elements(&self) -> Vec<Element> {
        self.state.borrow().elements().to_vec()
    }

    /// Snapshot of the values in slot order.
    pub fn values(&self) -> Vec<u32> {
        self.state.borrow().values()
    }

    /// Logical cursor pair.
    pub fn cursors(&self) -> CursorPair {
        self.state.borrow().cursors()
    }

    /// Steps recorded since the last shuffle.
    pub fn trace(&self) -> Vec<SortStep> {
        self.state.borrow().trace().to_vec()
    }

    /// Number of tweens currently animating.
    pub fn active_tweens(&self) -> usize {
        self.scheduler.borrow().active_count()
    }

    /// Replace the board with a new permutation and send every bar and both
    /// cursors back to their home positions.
    ///
    /// Refused while a run is in flight.
    pub fn shuffle(&mut self) -> Result<(), VisualizerError> {
        if self.is_running() {
            return Err(VisualizerError::AlreadyRunning);
        }
        let size = self.options.size;
        let values = self.permutations.permutation(size);
        validate_permutation(&values, size)?;

        *self.state.borrow_mut() = SortState::new(elements_from_values(&values));
        self.snap_to_layout();
        self.status = RunStatus::Idle;
        log::debug!("shuffled board of {size}: {values:?}");
        Ok(())
    }

    /// Begin sorting. The returned completion fires when the run settles,
    /// whether it finished, failed or was aborted; check [`Self::status`].
    ///
    /// `now` is the host's current frame time; the first step starts there
    /// even if no frame has been ticked for a while.
    ///
    /// Fails without side effects if a run is already in flight or if any
    /// bar or cursor has no registered sink. Boards of length 0 or 1 are
    /// finished before this returns.
    pub fn start_sort(
        &mut self,
        now: Instant,
    ) -> Result<Completion, VisualizerError> {
        if self.is_running() {
            return Err(VisualizerError::AlreadyRunning);
        }
        let targets: Vec<SinkTarget> = self
            .state
            .borrow()
            .elements()
            .iter()
            .map(Element::target)
            .chain([Cursor::I, Cursor::J].map(SinkTarget::Cursor))
            .collect();
        if let Some(missing) = self.sinks.first_missing(targets) {
            return Err(VisualizerError::MissingSink(missing));
        }

        let ctx = DriverContext {
            state: Rc::clone(&self.state),
            scheduler: Rc::clone(&self.scheduler),
            tones: self
                .options
                .tones
                .enabled
                .then(|| Rc::clone(&self.tones)),
            layout: self.options.layout.clone(),
            step: self.options.step_duration(),
        };
        let (resolver, completion) = Completion::pair();
        let started = {
            let mut scheduler = self.scheduler.borrow_mut();
            scheduler.sync_clock(now);
            scheduler.now()
        };
        self.run = Some(ActiveRun {
            driver: Box::pin(run_insertion_sort(ctx)),
            resolver,
            wake: Arc::new(RunWake(AtomicBool::new(true))),
            started,
        });
        self.status = RunStatus::Running;
        log::debug!("sort started on {} bars", self.state.borrow().len());

        self.resume(started);
        Ok(completion)
    }

    /// Advance one frame at `now`: deliver every tween's value, then resume
    /// the driver if it is waiting on something that just finished.
    ///
    /// Returns whether a run is still in flight. A sink failure ends the
    /// run: tweens are cancelled, the status becomes
    /// [`RunStatus::Failed`], the run completion fires and the error is
    /// returned.
    pub fn tick(&mut self, now: Instant) -> Result<bool, VisualizerError> {
        let advanced = self
            .scheduler
            .borrow_mut()
            .advance(now, &mut self.sinks);
        if let Err(e) = advanced {
            return Err(self.fail(e));
        }
        self.resume(now);
        Ok(self.is_running())
    }

    /// Stop the in-flight run where it stands. The logical board keeps the
    /// order it had reached; in-flight tweens are dropped and every sink is
    /// snapped to the logical position it stopped at.
    ///
    /// Returns whether there was a run to abort.
    pub fn abort(&mut self) -> bool {
        let Some(run) = self.run.take() else {
            return false;
        };
        let cancelled = self.scheduler.borrow_mut().cancel_all();
        self.snap_to_layout();
        run.resolver.resolve();
        self.status = RunStatus::Idle;
        log::debug!("sort aborted, {cancelled} tweens dropped");
        true
    }

    fn resume(&mut self, now: Instant) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        if !run.poll_if_woken() {
            return;
        }
        if let Some(run) = self.run.take() {
            run.resolver.resolve();
            let state = self.state.borrow();
            log::debug!(
                "sort finished in {:?}: {} swaps",
                now.saturating_duration_since(run.started),
                state.swap_count()
            );
        }
        self.status = RunStatus::Finished;
    }

    /// Deliver every bar's slot and both cursors' logical indices to the
    /// sinks that are registered.
    fn snap_to_layout(&mut self) {
        let state = self.state.borrow();
        let layout = &self.options.layout;
        for (slot, element) in state.elements().iter().enumerate() {
            let _ = self
                .sinks
                .deliver_if_registered(element.target(), layout.slot_x(slot));
        }
        let cursors = state.cursors();
        for cursor in [Cursor::I, Cursor::J] {
            let _ = self.sinks.deliver_if_registered(
                SinkTarget::Cursor(cursor),
                layout.slot_x(cursors.get(cursor)),
            );
        }
    }

    fn fail(&mut self, error: VisualizerError) -> VisualizerError {
        let _ = self.scheduler.borrow_mut().cancel_all();
        self.snap_to_layout();
        if let Some(run) = self.run.take() {
            run.resolver.resolve();
            self.status = RunStatus::Failed {
                reason: error.to_string(),
            };
        }
        log::warn!("sort failed: {error}");
        error
    }
}

impl fmt::Debug for SortSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortSession")
            .field("size", &self.options.size)
            .field("status", &self.status)
            .field("state", &self.state.borrow())
            .field("sinks", &self.sinks)
            .field("active_tweens", &self.active_tweens())
            .finish_non_exhaustive()
    }
}
