//! Per-page registry of emitted content items.

/// Records which items have been shown during one page render and numbers
/// the grid instances rendered so far.
///
/// A tracker belongs to exactly one page render. Call [`reset`](Self::reset)
/// when a new render begins; nothing carries over between renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateTracker {
    displayed: Vec<u64>,
    instances: u32,
}

impl DuplicateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the registry and the instance counter.
    pub fn reset(&mut self) {
        self.displayed.clear();
        self.instances = 0;
    }

    /// Records `id` as shown. Repeats are kept.
    pub fn add(&mut self, id: u64) {
        self.displayed.push(id);
    }

    /// Every id recorded since the last reset, in emission order.
    pub fn all(&self) -> &[u64] {
        &self.displayed
    }

    /// Returns the next 1-based instance number.
    pub fn next_instance_id(&mut self) -> u32 {
        self.instances += 1;
        self.instances
    }

    /// Number of instances handed out since the last reset.
    pub fn instances(&self) -> u32 {
        self.instances
    }
}
