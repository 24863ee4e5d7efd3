// Circular repetition window: detects single-line repeats (capacity 1)
// and repeating groups of `capacity` lines (A-B-A-B, A-B-C-A-B-C, ...)

/// One slot of a repetition window
#[derive(Debug, Clone, Default)]
struct Slot {
    /// Last line written into this slot, `None` until first filled
    line: Option<String>,
    /// Consecutive occurrences of `line` at this position of the cycle
    count: u32,
}

/// Fixed-capacity circular buffer of (line, occurrence count) slots
#[derive(Debug, Clone)]
pub struct RepetitionWindow {
    slots: Vec<Slot>,
    /// Slot compared against (and overwritten by) the next push
    cursor: usize,
    /// Total pushes since creation or last reset
    pushes: u64,
}

impl RepetitionWindow {
    /// Create a window of the given capacity (clamped to at least 1)
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Slot::default(); capacity.max(1)],
            cursor: 0,
            pushes: 0,
        }
    }

    /// Push the newest line and return the repetition count of the window
    ///
    /// The count is the minimum occurrence count across all slots, so it only
    /// grows once every position of a `capacity`-long cycle keeps repeating.
    /// Empty slots hold count 0, which keeps the result at 0 until the window
    /// has received `capacity` lines.
    pub fn push(&mut self, line: &str) -> u32 {
        let slot = &mut self.slots[self.cursor];
        match &slot.line {
            Some(stored) if stored == line => slot.count = slot.count.saturating_add(1),
            _ => {
                slot.line = Some(line.to_string());
                slot.count = 1;
            }
        }

        self.cursor = (self.cursor + 1) % self.slots.len();
        self.pushes = self.pushes.saturating_add(1);

        self.min_count()
    }

    /// Minimum occurrence count across all slots
    pub fn min_count(&self) -> u32 {
        self.slots.iter().map(|s| s.count).min().unwrap_or(0)
    }

    /// Number of slots (cycle length detected by this window)
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// True once every slot has been written at least once
    pub fn is_warm(&self) -> bool {
        self.pushes >= self.slots.len() as u64
    }

    /// Forget all stored lines
    pub fn reset(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = Slot::default());
        self.cursor = 0;
        self.pushes = 0;
    }
}
