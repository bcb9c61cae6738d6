//! Virtual-time scheduler for deferred effects.
//!
//! Every delay in the page (reveal stagger, burst cleanup, counter tick,
//! surprise finale) is an entry here instead of a real timer. Time only
//! moves when the owner calls [`Scheduler::advance_to`], so tests can
//! fast-forward and hosts can drive it from a real clock.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::time::Duration;

/// Cancellation handle for a scheduled entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// A scheduled entry
#[derive(Debug)]
struct ScheduledTask<T> {
    /// Virtual time at which the entry fires
    run_at: Duration,
    id: TimerId,
    payload: T,
    /// If Some, the entry repeats with this interval
    repeat_interval: Option<Duration>,
}

impl<T> PartialEq for ScheduledTask<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for ScheduledTask<T> {}

impl<T> PartialOrd for ScheduledTask<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for ScheduledTask<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behaviour; ties fire in scheduling order
        other
            .run_at
            .cmp(&self.run_at)
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// Min-heap of deferred payloads keyed by virtual time
#[derive(Debug)]
pub struct Scheduler<T> {
    tasks: BinaryHeap<ScheduledTask<T>>,
    cancelled: HashSet<TimerId>,
    next_id: u64,
    now: Duration,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Scheduler<T> {
    /// Fire every entry due at or before `target`, in deadline order.
    ///
    /// A repeating entry fires at most once per call and is rescheduled at
    /// the first interval boundary after `target`; missed intervals are
    /// skipped, not replayed. Virtual time never moves backwards; an earlier
    /// `target` fires nothing.
    pub fn advance_to(&mut self, target: Duration) -> Vec<(TimerId, T)> {
        let mut fired = Vec::new();
        while let Some(task) = self.tasks.peek() {
            if task.run_at > target {
                break;
            }
            let Some(task) = self.tasks.pop() else {
                break;
            };
            if self.cancelled.remove(&task.id) {
                continue;
            }
            self.now = self.now.max(task.run_at);
            fired.push((task.id, task.payload.clone()));
            if let Some(interval) = task.repeat_interval {
                match next_boundary(task.run_at, interval, target) {
                    Some(run_at) => self.tasks.push(ScheduledTask {
                        run_at,
                        id: task.id,
                        payload: task.payload,
                        repeat_interval: Some(interval),
                    }),
                    None => {
                        tracing::debug!("Repeating entry {:?} ran past the end of time", task.id)
                    }
                }
            }
        }
        self.now = self.now.max(target);
        fired
    }
}

/// First `run_at + k * interval` (k >= 1) strictly after `target`
fn next_boundary(run_at: Duration, interval: Duration, target: Duration) -> Option<Duration> {
    let step = interval.as_nanos().max(1);
    let missed = target.saturating_sub(run_at).as_nanos() / step;
    let nanos = run_at
        .as_nanos()
        .checked_add(missed.checked_add(1)?.checked_mul(step)?)?;
    let secs = u64::try_from(nanos / 1_000_000_000).ok()?;
    Some(Duration::new(secs, (nanos % 1_000_000_000) as u32))
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            tasks: BinaryHeap::new(),
            cancelled: HashSet::new(),
            next_id: 0,
            now: Duration::ZERO,
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    fn next_id(&mut self) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a one-shot entry firing `delay` after the current virtual time
    pub fn schedule_after(&mut self, delay: Duration, payload: T) -> TimerId {
        let id = self.next_id();
        self.tasks.push(ScheduledTask {
            run_at: self.now.saturating_add(delay),
            id,
            payload,
            repeat_interval: None,
        });
        id
    }

    /// Add a repeating entry, first firing one `interval` from now
    pub fn schedule_every(&mut self, interval: Duration, payload: T) -> TimerId {
        let id = self.next_id();
        // A zero interval would spin forever inside advance_to
        let interval = interval.max(Duration::from_millis(1));
        self.tasks.push(ScheduledTask {
            run_at: self.now.saturating_add(interval),
            id,
            payload,
            repeat_interval: Some(interval),
        });
        id
    }

    /// Cancel an entry. Returns false if it is unknown or already fired.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        if self.cancelled.contains(&id) || !self.tasks.iter().any(|t| t.id == id) {
            return false;
        }
        self.cancelled.insert(id)
    }

    /// Number of live (not cancelled) entries
    pub fn pending(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| !self.cancelled.contains(&t.id))
            .count()
    }

    /// Whether there are live entries
    pub fn has_pending(&self) -> bool {
        self.pending() > 0
    }

    /// Duration until the next live entry fires
    pub fn time_until_next(&self) -> Option<Duration> {
        self.tasks
            .iter()
            .filter(|t| !self.cancelled.contains(&t.id))
            .map(|t| t.run_at.saturating_sub(self.now))
            .min()
    }
}
