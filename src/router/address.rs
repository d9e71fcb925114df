/// The external location string that drives routing.
///
/// Setting a new value raises a change; setting the current value again raises none.
pub trait NavigationAddress {
    fn get(&self) -> Option<String>;
    /// Returns whether the value changed (and a change is now pending).
    fn set(&mut self, value: &str) -> bool;
    /// Consume the pending change flag.
    fn take_change(&mut self) -> bool;
}

/// In-memory `#/<route>` address with browser-like back/forward history.
#[derive(Debug, Clone, Default)]
pub struct HashAddress {
    entries: Vec<String>,
    index: Option<usize>,
    pending: bool,
}

impl HashAddress {
    pub fn new() -> Self { Self::default() }

    /// Start at `value` without raising a change (the address a tab was opened with).
    pub fn starting_at(value: &str) -> Self {
        Self { entries: vec![value.to_string()], index: Some(0), pending: false }
    }

    pub fn can_go_back(&self) -> bool { matches!(self.index, Some(i) if i > 0) }

    pub fn can_go_forward(&self) -> bool {
        matches!(self.index, Some(i) if i + 1 < self.entries.len())
    }

    pub fn back(&mut self) -> bool {
        match self.index {
            Some(i) if i > 0 => self.move_to(i - 1),
            _ => false,
        }
    }

    pub fn forward(&mut self) -> bool {
        match self.index {
            Some(i) if i + 1 < self.entries.len() => self.move_to(i + 1),
            _ => false,
        }
    }

    fn move_to(&mut self, idx: usize) -> bool {
        let changed = self.get().as_deref() != Some(self.entries[idx].as_str());
        self.index = Some(idx);
        self.pending |= changed;
        changed
    }

    pub fn history_len(&self) -> usize { self.entries.len() }
}

impl NavigationAddress for HashAddress {
    fn get(&self) -> Option<String> {
        self.index.and_then(|i| self.entries.get(i)).cloned()
    }

    fn set(&mut self, value: &str) -> bool {
        if self.get().as_deref() == Some(value) { return false; }
        let next = self.index.map(|i| i + 1).unwrap_or(0);
        // new entry drops the forward history
        self.entries.truncate(next);
        self.entries.push(value.to_string());
        self.index = Some(next);
        self.pending = true;
        true
    }

    fn take_change(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}
