use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct Entry<T> {
    due: u64,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool { self.due == other.due && self.seq == other.seq }
}
impl<T> Eq for Entry<T> {}
impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}
impl<T> Ord for Entry<T> {
    // min-heap on (due, seq)
    fn cmp(&self, other: &Self) -> Ordering {
        other.due.cmp(&self.due).then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Virtual-time, single-threaded timer queue.
///
/// Tasks run in (due time, insertion) order; a task scheduled while draining runs in the
/// same drain if it falls due before the drain target.
pub struct Scheduler<T> {
    now_ms: u64,
    seq: u64,
    queue: BinaryHeap<Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self { Self { now_ms: 0, seq: 0, queue: BinaryHeap::new() } }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self { Self::default() }

    pub fn now_ms(&self) -> u64 { self.now_ms }

    pub fn pending(&self) -> usize { self.queue.len() }

    pub fn schedule(&mut self, delay_ms: u64, task: T) {
        self.seq += 1;
        self.queue.push(Entry { due: self.now_ms.saturating_add(delay_ms), seq: self.seq, task });
    }

    /// Pop the next task due at or before `until_ms`, moving the clock to its due time.
    pub fn next_due(&mut self, until_ms: u64) -> Option<T> {
        if self.queue.peek()?.due > until_ms { return None; }
        let e = self.queue.pop()?;
        self.now_ms = self.now_ms.max(e.due);
        Some(e.task)
    }

    /// Move the clock forward to `until_ms` once draining is done.
    pub fn finish(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    pub fn next_due_at(&self) -> Option<u64> { self.queue.peek().map(|e| e.due) }
}
