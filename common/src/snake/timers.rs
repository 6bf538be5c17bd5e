/// One-shot timers on the session clock (milliseconds).
///
/// Every timer remembers the generation it was scheduled in. `cancel_all`
/// starts a new generation, so anything left over from before a reset is
/// dropped instead of firing into the new session.
#[derive(Clone, Debug)]
pub struct OneShotTimers<K> {
    pending: Vec<ScheduledTimer<K>>,
    generation: u64,
}

#[derive(Clone, Debug)]
struct ScheduledTimer<K> {
    due_at_ms: u64,
    generation: u64,
    kind: K,
}

impl<K> Default for OneShotTimers<K> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            generation: 0,
        }
    }
}

impl<K: Copy + PartialEq> OneShotTimers<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64, kind: K) {
        self.pending.push(ScheduledTimer {
            due_at_ms: now_ms + delay_ms,
            generation: self.generation,
            kind,
        });
    }

    pub fn cancel(&mut self, kind: K) {
        self.pending.retain(|timer| timer.kind != kind);
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
        self.generation += 1;
    }

    pub fn is_pending(&self, kind: K) -> bool {
        self.pending.iter().any(|timer| timer.kind == kind)
    }

    pub fn due_at(&self, kind: K) -> Option<u64> {
        self.pending
            .iter()
            .filter(|timer| timer.kind == kind)
            .map(|timer| timer.due_at_ms)
            .min()
    }

    /// Removes and returns every timer due at `now_ms`, earliest first.
    pub fn fire_due(&mut self, now_ms: u64) -> Vec<K> {
        let (mut due, pending): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|timer| timer.due_at_ms <= now_ms);
        self.pending = pending;

        due.sort_by_key(|timer| timer.due_at_ms);
        due.into_iter()
            .filter(|timer| timer.generation == self.generation)
            .map(|timer| timer.kind)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
