use crate::sinks::SinkTarget;

/// Stable identity of a bar.
///
/// Assigned from the slot a bar occupies when the board is shuffled and
/// kept through every swap, so a sink registered for a bar follows that bar
/// rather than a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

/// One bar: an immutable value plus the identity its sink is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    id: ElementId,
    value: u32,
}

impl Element {
    /// Bar `id` holding `value`.
    pub fn new(id: ElementId, value: u32) -> Self {
        Self { id, value }
    }

    /// Stable identity.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Sort key.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Sink this bar's position is delivered to.
    pub fn target(&self) -> SinkTarget {
        SinkTarget::Element(self.id)
    }
}

/// Bars for `values`, with ids equal to their starting slots.
pub fn elements_from_values(values: &[u32]) -> Vec<Element> {
    values
        .iter()
        .enumerate()
        .map(|(slot, &value)| Element::new(ElementId(slot), value))
        .collect()
}
