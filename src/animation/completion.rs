//! Completion signals for tweens and runs.
//!
//! A [`Completion`] is the awaitable half; the crate keeps the matching
//! [`Resolver`] and fires it once the work it stands for has visibly
//! finished. Everything here is single-threaded (`Rc`), matching the
//! cooperative frame loop the scheduler runs in.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

#[derive(Debug, Default)]
struct Shared {
    done: Cell<bool>,
    wakers: RefCell<Vec<Waker>>,
}

/// Awaitable "this has finished" signal.
///
/// Cloning yields another handle to the same signal. Hosts without an
/// executor can poll [`Completion::is_done`] instead of awaiting.
#[derive(Debug, Clone)]
pub struct Completion {
    shared: Rc<Shared>,
}

/// Firing side of a [`Completion`].
#[derive(Debug)]
pub(crate) struct Resolver {
    shared: Rc<Shared>,
}

impl Completion {
    /// A linked resolver/completion pair.
    pub(crate) fn pair() -> (Resolver, Self) {
        let shared = Rc::new(Shared::default());
        (
            Resolver {
                shared: Rc::clone(&shared),
            },
            Self { shared },
        )
    }

    /// A completion that is already done.
    pub fn resolved() -> Self {
        let (resolver, completion) = Self::pair();
        resolver.resolve();
        completion
    }

    /// Whether the signal has fired.
    pub fn is_done(&self) -> bool {
        self.shared.done.get()
    }

    /// Barrier over several completions: resolves once every one has.
    pub fn all(completions: impl IntoIterator<Item = Self>) -> Join {
        Join {
            pending: completions.into_iter().collect(),
        }
    }
}

impl Future for Completion {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.is_done() {
            return Poll::Ready(());
        }
        let mut wakers = self.shared.wakers.borrow_mut();
        if !wakers.iter().any(|w| w.will_wake(cx.waker())) {
            wakers.push(cx.waker().clone());
        }
        Poll::Pending
    }
}

impl Resolver {
    /// Fire the signal and wake every waiter. Firing twice is a no-op.
    pub(crate) fn resolve(&self) {
        if self.shared.done.replace(true) {
            return;
        }
        let wakers = self.shared.wakers.take();
        for waker in wakers {
            waker.wake();
        }
    }
}

/// Future returned by [`Completion::all`].
#[derive(Debug)]
pub struct Join {
    pending: Vec<Completion>,
}

impl Join {
    /// Number of member completions still outstanding.
    pub fn remaining(&self) -> usize {
        self.pending.iter().filter(|c| !c.is_done()).count()
    }
}

impl Future for Join {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();
        this.pending
            .retain_mut(|completion| Pin::new(completion).poll(cx).is_pending());
        if this.pending.is_empty() {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    }
}
