//! Delayed events keyed by frame time
//!
//! Stands in for `setTimeout`/`setInterval`: events are queued with a due time
//! and handed back by [`Timeline::drain_due`] at the start of the first frame
//! whose timestamp reaches them. Nothing fires between frames.

/// A queued event with its due time in milliseconds
#[derive(Debug, Clone, PartialEq)]
struct Scheduled<E> {
    due_ms: f64,
    event: E,
}

/// Pending events, kept in insertion order
#[derive(Debug, Clone)]
pub struct Timeline<E> {
    pending: Vec<Scheduled<E>>,
}

impl<E> Default for Timeline<E> {
    fn default() -> Self {
        Self { pending: Vec::new() }
    }
}

impl<E: PartialEq> Timeline<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` to fire once `now_ms + delay_ms` has been reached
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64, event: E) {
        self.pending.push(Scheduled {
            due_ms: now_ms + delay_ms.max(0.0),
            event,
        });
    }

    /// Whether an equal event is already queued
    pub fn is_pending(&self, event: &E) -> bool {
        self.pending.iter().any(|s| &s.event == event)
    }

    /// Due time of the first queued event equal to `event`
    pub fn due_time(&self, event: &E) -> Option<f64> {
        self.pending.iter().find(|s| &s.event == event).map(|s| s.due_ms)
    }

    /// Remove and return every event due at `now_ms` with its due time,
    /// earliest first
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<(f64, E)> {
        let mut due = Vec::new();
        let mut remaining = Vec::with_capacity(self.pending.len());
        for scheduled in self.pending.drain(..) {
            if scheduled.due_ms <= now_ms {
                due.push(scheduled);
            } else {
                remaining.push(scheduled);
            }
        }
        self.pending = remaining;
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms));
        due.into_iter().map(|s| (s.due_ms, s.event)).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
