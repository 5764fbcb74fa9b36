// One-shot deferred timers
//
// Timers are measured against accumulated real frame time, not frame count.
// Every timer carries its owner so a fired action can be routed back to it.

use std::time::Duration;

/// Identifier returned when a timer is scheduled
pub type TimerId = u64;

#[derive(Debug, Clone)]
struct PendingTimer<O, A> {
    id: TimerId,
    owner: O,
    due: Duration,
    action: A,
}

/// A timer that came due during [`Scheduler::advance`]
#[derive(Debug, Clone, PartialEq)]
pub struct FiredTimer<O, A> {
    pub id: TimerId,
    pub owner: O,
    pub action: A,
}

/// Fire-once, cancellable timer queue
#[derive(Debug)]
pub struct Scheduler<O, A> {
    timers: Vec<PendingTimer<O, A>>,
    next_id: TimerId,
    /// Total time fed through `advance`
    clock: Duration,
}

impl<O, A> Default for Scheduler<O, A>
where
    O: Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<O, A> Scheduler<O, A>
where
    O: Copy,
{
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_id: 0,
            clock: Duration::ZERO,
        }
    }

    /// Schedule `action` to fire once after `delay` has elapsed
    pub fn schedule(&mut self, owner: O, delay: Duration, action: A) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;

        self.timers.push(PendingTimer {
            id,
            owner,
            due: self.clock + delay,
            action,
        });

        id
    }

    /// Cancel everything
    pub fn clear(&mut self) -> usize {
        let dropped = self.timers.len();
        self.timers.clear();
        dropped
    }

    /// Advance the clock by `dt` and return the timers that came due,
    /// earliest first (ties broken by scheduling order)
    pub fn advance(&mut self, dt: Duration) -> Vec<FiredTimer<O, A>> {
        self.clock += dt;
        let now = self.clock;

        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|timer| timer.due <= now);
        self.timers = pending;

        due.sort_by(|a, b| a.due.cmp(&b.due).then(a.id.cmp(&b.id)));
        due.into_iter()
            .map(|timer| FiredTimer {
                id: timer.id,
                owner: timer.owner,
                action: timer.action,
            })
            .collect()
    }

    /// Number of timers waiting to fire
    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }
}
