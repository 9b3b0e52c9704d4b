//! Logical array state: the bars in slot order, the cursor pair and the
//! step trace. Only the driver mutates it; hosts read snapshots.

use super::element::Element;
use crate::sinks::Cursor;

/// Slot the cursors rest on between runs.
pub const CURSOR_HOME: usize = 1;

/// The two scanning indices of insertion sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPair {
    /// Outer-loop index.
    pub i: usize,
    /// Inner-loop index.
    pub j: usize,
}

impl CursorPair {
    /// Both cursors on [`CURSOR_HOME`].
    pub fn home() -> Self {
        Self {
            i: CURSOR_HOME,
            j: CURSOR_HOME,
        }
    }

    /// Index held by `cursor`.
    pub fn get(&self, cursor: Cursor) -> usize {
        match cursor {
            Cursor::I => self.i,
            Cursor::J => self.j,
        }
    }
}

/// One logical step of a run, recorded after it settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortStep {
    /// Slots `left` and `right = left + 1` exchanged their bars.
    Swap {
        /// Lower slot of the pair.
        left: usize,
        /// Upper slot of the pair.
        right: usize,
    },
    /// The pass for outer index `i` finished.
    PassComplete {
        /// Outer index of the finished pass.
        i: usize,
    },
}

/// Bars in slot order plus cursor pair and trace.
#[derive(Debug, Clone)]
pub struct SortState {
    elements: Vec<Element>,
    cursors: CursorPair,
    trace: Vec<SortStep>,
}

impl SortState {
    /// Fresh state with both cursors home and an empty trace.
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            elements,
            cursors: CursorPair::home(),
            trace: Vec::new(),
        }
    }

    /// Bars in current slot order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Values in current slot order.
    pub fn values(&self) -> Vec<u32> {
        self.elements.iter().map(Element::value).collect()
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether there are no bars at all.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Current logical cursor positions.
    pub fn cursors(&self) -> CursorPair {
        self.cursors
    }

    /// Steps recorded since the last shuffle.
    pub fn trace(&self) -> &[SortStep] {
        &self.trace
    }

    /// Number of swaps recorded since the last shuffle.
    pub fn swap_count(&self) -> usize {
        self.trace
            .iter()
            .filter(|step| matches!(step, SortStep::Swap { .. }))
            .count()
    }

    /// Whether values are in non-decreasing order.
    pub fn is_sorted(&self) -> bool {
        self.elements.windows(2).all(|w| w[0].value() <= w[1].value())
    }

    /// Whether the bar at `j` must sink below its left neighbour.
    pub(crate) fn out_of_order(&self, j: usize) -> bool {
        j > 0 && self.elements[j - 1].value() > self.elements[j].value()
    }

    /// Exchange slots `j - 1` and `j` and record it.
    pub(crate) fn swap_down(&mut self, j: usize) {
        self.elements.swap(j - 1, j);
        self.trace.push(SortStep::Swap {
            left: j - 1,
            right: j,
        });
    }

    pub(crate) fn complete_pass(&mut self, i: usize) {
        self.trace.push(SortStep::PassComplete { i });
    }

    pub(crate) fn set_cursor(&mut self, cursor: Cursor, index: usize) {
        match cursor {
            Cursor::I => self.cursors.i = index,
            Cursor::J => self.cursors.j = index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::element::elements_from_values;

    #[test]
    fn swap_down_exchanges_identity_not_values() {
        let mut state = SortState::new(elements_from_values(&[3, 1]));
        let moved = state.elements()[1];
        assert!(state.out_of_order(1));

        state.swap_down(1);

        assert_eq!(state.values(), vec![1, 3]);
        assert_eq!(state.elements()[0], moved);
        assert_eq!(state.trace(), &[SortStep::Swap { left: 0, right: 1 }]);
        assert!(state.is_sorted());
        assert!(!state.out_of_order(1));
        assert!(!state.out_of_order(0));
    }

    #[test]
    fn cursors_start_home() {
        let mut state = SortState::new(elements_from_values(&[1, 2, 3]));
        assert_eq!(state.cursors(), CursorPair { i: 1, j: 1 });
        state.set_cursor(Cursor::J, 0);
        assert_eq!(state.cursors().get(Cursor::J), 0);
        assert_eq!(state.cursors().get(Cursor::I), 1);
    }

    #[test]
    fn equal_values_count_as_sorted() {
        let state = SortState::new(elements_from_values(&[2, 2, 1]));
        assert!(!state.is_sorted());
        assert!(!state.out_of_order(1));
        assert!(state.out_of_order(2));
    }
}
