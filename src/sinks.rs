//! Position sinks owned by the rendering layer.
//!
//! Tweens never hold a callback directly. They name a [`SinkTarget`] and the
//! scheduler looks the target up in the [`SinkRegistry`] every time it
//! delivers a value, so a bar that remounts and re-registers mid-animation
//! keeps receiving positions through its newest callback.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::error::VisualizerError;
use crate::sort::ElementId;

/// One of the two scanning markers of insertion sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// Outer-loop index: the first slot not yet merged into the sorted prefix.
    I,
    /// Inner-loop index: the slot currently sinking toward its place.
    J,
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I => f.write_str("i"),
            Self::J => f.write_str("j"),
        }
    }
}

/// Something a tween can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkTarget {
    /// A bar, addressed by its stable identity (not its current slot).
    Element(ElementId),
    /// One of the index markers.
    Cursor(Cursor),
}

impl fmt::Display for SinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(id) => write!(f, "element #{}", id.0),
            Self::Cursor(cursor) => write!(f, "cursor {cursor}"),
        }
    }
}

/// Callback receiving a visual x coordinate.
pub type PositionSink = Box<dyn FnMut(f64)>;

/// Indirection table from [`SinkTarget`] to the currently registered
/// callback.
#[derive(Default)]
pub struct SinkRegistry {
    elements: FxHashMap<ElementId, PositionSink>,
    cursor_i: Option<PositionSink>,
    cursor_j: Option<PositionSink>,
}

impl SinkRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or rebind) the sink for a bar.
    pub fn register_element<F>(&mut self, id: ElementId, sink: F)
    where
        F: FnMut(f64) + 'static,
    {
        let _ = self.elements.insert(id, Box::new(sink));
    }

    /// Drop the sink for a bar. Returns whether one was registered.
    pub fn unregister_element(&mut self, id: ElementId) -> bool {
        self.elements.remove(&id).is_some()
    }

    /// Drop every bar sink, e.g. when the board unmounts.
    pub fn clear_elements(&mut self) {
        self.elements.clear();
    }

    /// Register (or rebind) the sink for an index marker.
    pub fn register_cursor<F>(&mut self, cursor: Cursor, sink: F)
    where
        F: FnMut(f64) + 'static,
    {
        *self.cursor_slot(cursor) = Some(Box::new(sink));
    }

    /// Drop the sink for an index marker. Returns whether one was registered.
    pub fn unregister_cursor(&mut self, cursor: Cursor) -> bool {
        self.cursor_slot(cursor).take().is_some()
    }

    /// Whether a sink is currently registered for `target`.
    pub fn is_registered(&self, target: SinkTarget) -> bool {
        match target {
            SinkTarget::Element(id) => self.elements.contains_key(&id),
            SinkTarget::Cursor(Cursor::I) => self.cursor_i.is_some(),
            SinkTarget::Cursor(Cursor::J) => self.cursor_j.is_some(),
        }
    }

    /// First target in `targets` that has no registered sink.
    pub fn first_missing(
        &self,
        targets: impl IntoIterator<Item = SinkTarget>,
    ) -> Option<SinkTarget> {
        targets.into_iter().find(|t| !self.is_registered(*t))
    }

    /// Number of registered bar sinks.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Call the current sink for `target` with `x`.
    pub fn deliver(
        &mut self,
        target: SinkTarget,
        x: f64,
    ) -> Result<(), VisualizerError> {
        let sink = self
            .sink_mut(target)
            .ok_or(VisualizerError::MissingSink(target))?;
        sink(x);
        Ok(())
    }

    /// Like [`Self::deliver`], but a missing sink is skipped. Used for snaps
    /// that a later mount will pick up from the layout anyway.
    pub fn deliver_if_registered(&mut self, target: SinkTarget, x: f64) -> bool {
        match self.sink_mut(target) {
            Some(sink) => {
                sink(x);
                true
            }
            None => false,
        }
    }

    fn sink_mut(&mut self, target: SinkTarget) -> Option<&mut PositionSink> {
        match target {
            SinkTarget::Element(id) => self.elements.get_mut(&id),
            SinkTarget::Cursor(cursor) => self.cursor_slot(cursor).as_mut(),
        }
    }

    fn cursor_slot(&mut self, cursor: Cursor) -> &mut Option<PositionSink> {
        match cursor {
            Cursor::I => &mut self.cursor_i,
            Cursor::J => &mut self.cursor_j,
        }
    }
}

impl fmt::Debug for SinkRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkRegistry")
            .field("elements", &self.elements.len())
            .field("cursor_i", &self.cursor_i.is_some())
            .field("cursor_j", &self.cursor_j.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn deliver_calls_latest_registration() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = SinkRegistry::new();
        let target = SinkTarget::Element(ElementId(0));

        let first = Rc::clone(&log);
        registry.register_element(ElementId(0), move |x| {
            first.borrow_mut().push(("old", x));
        });
        registry.deliver(target, 1.0).unwrap();

        let second = Rc::clone(&log);
        registry.register_element(ElementId(0), move |x| {
            second.borrow_mut().push(("new", x));
        });
        registry.deliver(target, 2.0).unwrap();

        assert_eq!(*log.borrow(), vec![("old", 1.0), ("new", 2.0)]);
    }

    #[test]
    fn missing_sink_is_an_error() {
        let mut registry = SinkRegistry::new();
        let target = SinkTarget::Cursor(Cursor::I);
        assert!(matches!(
            registry.deliver(target, 0.0),
            Err(VisualizerError::MissingSink(t)) if t == target
        ));
        assert!(!registry.deliver_if_registered(target, 0.0));
    }

    #[test]
    fn first_missing_finds_gaps() {
        let mut registry = SinkRegistry::new();
        registry.register_element(ElementId(0), |_| {});
        registry.register_cursor(Cursor::I, |_| {});
        let targets = [
            SinkTarget::Element(ElementId(0)),
            SinkTarget::Cursor(Cursor::I),
            SinkTarget::Cursor(Cursor::J),
        ];
        assert_eq!(
            registry.first_missing(targets),
            Some(SinkTarget::Cursor(Cursor::J))
        );

        registry.register_cursor(Cursor::J, |_| {});
        assert_eq!(registry.first_missing(targets), None);

        assert!(registry.unregister_cursor(Cursor::J));
        assert!(!registry.unregister_cursor(Cursor::J));
        assert!(registry.unregister_element(ElementId(0)));
        assert_eq!(registry.element_count(), 0);
    }
}
