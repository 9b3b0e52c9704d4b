//! The instrumented insertion sort.
//!
//! Written as an `async fn` so every animation is a suspension point: the
//! driver starts tweens, awaits their [`Completion`]s and only then touches
//! the logical state again. The host keeps the scheduler and the driver
//! moving from its frame loop (see [`super::SortSession::tick`]).

use std::cell::RefCell;
use std::rc::Rc;

use web_time::Duration;

use super::state::SortState;
use crate::animation::{Completion, TweenScheduler};
use crate::audio::{emit_best_effort, Tone, ToneEmitter};
use crate::options::LayoutOptions;
use crate::sinks::{Cursor, SinkTarget};

/// Everything the driver needs, shared with the owning session.
pub(crate) struct DriverContext {
    pub(crate) state: Rc<RefCell<SortState>>,
    pub(crate) scheduler: Rc<RefCell<TweenScheduler>>,
    pub(crate) tones: Option<Rc<RefCell<dyn ToneEmitter>>>,
    pub(crate) layout: LayoutOptions,
    pub(crate) step: Duration,
}

impl DriverContext {
    fn tween(&self, target: SinkTarget, from: usize, to: usize) -> Completion {
        self.scheduler.borrow_mut().animate(
            target,
            self.layout.slot_x(from),
            self.layout.slot_x(to),
            self.step,
        )
    }

    /// Glide a marker between slots, then commit its logical index.
    async fn move_cursor(&self, cursor: Cursor, from: usize, to: usize) {
        self.tween(SinkTarget::Cursor(cursor), from, to).await;
        self.state.borrow_mut().set_cursor(cursor, to);
    }

    /// Slide the bars in slots `j - 1` and `j` past each other, then swap
    /// them logically once both have landed.
    async fn swap_down(&self, j: usize) {
        let (sinking, rising) = {
            let state = self.state.borrow();
            (state.elements()[j].target(), state.elements()[j - 1].target())
        };
        let sinking = self.tween(sinking, j, j - 1);
        let rising = self.tween(rising, j - 1, j);
        Completion::all([sinking, rising]).await;
        self.state.borrow_mut().swap_down(j);
        log::trace!("swapped slots {} and {j}", j - 1);
    }

    fn emit(&self, tone: Tone) {
        if let Some(tones) = &self.tones {
            emit_best_effort(&mut *tones.borrow_mut(), tone);
        }
    }
}

/// Sort the shared state in place, animating every step.
///
/// Per outer index `i`: cursor j glides to `i`; while the bar at `j` is
/// smaller than its left neighbour a compare cue plays, both bars slide,
/// the logical swap happens and cursor j steps left; then the pass cue
/// plays and cursor i advances. Boards of length 0 or 1 finish on the
/// first poll without animating anything.
pub(crate) async fn run_insertion_sort(ctx: DriverContext) {
    let len = ctx.state.borrow().len();
    let mut j = ctx.state.borrow().cursors().j;

    for i in 1..len {
        ctx.move_cursor(Cursor::J, j, i).await;
        j = i;
        while ctx.state.borrow().out_of_order(j) {
            ctx.emit(Tone::Compare);
            ctx.swap_down(j).await;
            ctx.move_cursor(Cursor::J, j, j - 1).await;
            j -= 1;
        }
        ctx.emit(Tone::PassDone);
        ctx.state.borrow_mut().complete_pass(i);
        log::trace!("pass {i} complete");
        ctx.move_cursor(Cursor::I, i, i + 1).await;
    }
}
