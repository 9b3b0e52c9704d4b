//! Audio cues that accompany the sort.
//!
//! Sound is decoration: the driver calls [`emit_best_effort`], which logs and
//! drops any failure so neither ordering nor correctness ever depends on it.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::VisualizerError;

/// The two cues the driver plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// An out-of-order pair was found and is about to swap.
    Compare,
    /// An outer pass finished placing its element.
    PassDone,
}

/// Capability to play a [`Tone`].
pub trait ToneEmitter {
    /// Play `tone`. Errors are reported but never retried.
    fn emit(&mut self, tone: Tone) -> Result<(), VisualizerError>;
}

/// Plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentTones;

impl ToneEmitter for SilentTones {
    fn emit(&mut self, _tone: Tone) -> Result<(), VisualizerError> {
        Ok(())
    }
}

/// Remembers every cue instead of playing it. Clones share one log, so a
/// copy handed to a session can be inspected from outside.
#[derive(Debug, Clone, Default)]
pub struct RecordingTones {
    heard: Rc<RefCell<Vec<Tone>>>,
}

impl RecordingTones {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cues emitted so far, oldest first.
    pub fn heard(&self) -> Vec<Tone> {
        self.heard.borrow().clone()
    }
}

impl ToneEmitter for RecordingTones {
    fn emit(&mut self, tone: Tone) -> Result<(), VisualizerError> {
        self.heard.borrow_mut().push(tone);
        Ok(())
    }
}

impl<F> ToneEmitter for F
where
    F: FnMut(Tone) -> Result<(), VisualizerError>,
{
    fn emit(&mut self, tone: Tone) -> Result<(), VisualizerError> {
        self(tone)
    }
}

/// Play `tone`, logging and swallowing any failure.
pub fn emit_best_effort(emitter: &mut dyn ToneEmitter, tone: Tone) {
    if let Err(e) = emitter.emit(tone) {
        log::debug!("dropping {tone:?} cue: {e}");
    }
}
