#![forbid(unsafe_code)]

//! Cancellable deferred work for a single-threaded event loop.
//!
//! A [`DeferredQueue`] holds payloads tagged with a deadline. It never
//! sleeps and never reads the clock: the host calls [`poll`](DeferredQueue::poll)
//! with the current `Instant` and receives whatever has come due. Use
//! [`next_deadline`](DeferredQueue::next_deadline) to bound the host's
//! event wait.
//!
//! # Usage
//!
//! ```
//! use std::time::{Duration, Instant};
//! use folio_assistant::DeferredQueue;
//!
//! let start = Instant::now();
//! let mut queue = DeferredQueue::new();
//! let late = queue.schedule("late", Duration::from_millis(20), start);
//! queue.schedule("early", Duration::from_millis(10), start);
//!
//! assert!(queue.poll(start).is_empty());
//! assert_eq!(queue.cancel(late), Some("late"));
//! assert_eq!(queue.poll(start + Duration::from_millis(30)), vec!["early"]);
//! ```

use std::time::{Duration, Instant};

/// Handle to a scheduled payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

/// A payload that came due, with the deadline it was scheduled for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    /// Deadline the payload was scheduled for, not the poll time.
    pub deadline: Instant,
    /// The scheduled value.
    pub payload: T,
}

#[derive(Debug)]
struct Task<T> {
    id: TaskId,
    deadline: Instant,
    payload: T,
}

/// Deadline-ordered queue of cancellable payloads.
///
/// # Invariants
///
/// 1. Payloads come due in deadline order; equal deadlines keep schedule order.
/// 2. A cancelled payload is never returned by `poll`/`pop_due`.
#[derive(Debug)]
pub struct DeferredQueue<T> {
    // Sorted by (deadline, id).
    tasks: Vec<Task<T>>,
    next_id: u64,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DeferredQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedule `payload` to come due `delay` after `now`.
    pub fn schedule(&mut self, payload: T, delay: Duration, now: Instant) -> TaskId {
        let deadline = now.checked_add(delay).unwrap_or(now);
        self.schedule_at(payload, deadline)
    }

    /// Schedule `payload` for an absolute deadline.
    pub fn schedule_at(&mut self, payload: T, deadline: Instant) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        // Ids increase, so inserting after every task with deadline <= ours
        // keeps ties in schedule order.
        let pos = self.tasks.partition_point(|t| t.deadline <= deadline);
        self.tasks.insert(
            pos,
            Task {
                id,
                deadline,
                payload,
            },
        );
        id
    }

    /// Remove a scheduled payload. Returns it if it had not fired yet.
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        let pos = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(pos).payload)
    }

    /// Drop everything. Returns how many payloads were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.tasks.len();
        self.tasks.clear();
        n
    }

    /// Take the earliest payload if it is due at `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<Fired<T>> {
        if self.tasks.first().is_some_and(|t| t.deadline <= now) {
            let task = self.tasks.remove(0);
            Some(Fired {
                deadline: task.deadline,
                payload: task.payload,
            })
        } else {
            None
        }
    }

    /// Take every payload due at `now`, in due order.
    pub fn poll(&mut self, now: Instant) -> Vec<T> {
        let due = self.tasks.partition_point(|t| t.deadline <= now);
        self.tasks.drain(..due).map(|t| t.payload).collect()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tasks.first().map(|t| t.deadline)
    }

    /// Latest deadline still scheduled.
    #[must_use]
    pub fn last_deadline(&self) -> Option<Instant> {
        self.tasks.last().map(|t| t.deadline)
    }

    /// Time left until the next payload comes due. Zero if already due.
    #[must_use]
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_deadline()
            .map(|d| d.saturating_duration_since(now))
    }

    #[must_use]
    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn nothing_due_before_deadline() {
        let t0 = Instant::now();
        let mut q = DeferredQueue::new();
        q.schedule(1, ms(100), t0);
        assert!(q.poll(t0 + ms(99)).is_empty());
        assert_eq!(q.time_until_next(t0 + ms(40)), Some(ms(60)));
        assert_eq!(q.poll(t0 + ms(100)), vec![1]);
        assert!(q.is_empty());
        assert_eq!(q.next_deadline(), None);
    }

    #[test]
    fn ties_keep_schedule_order() {
        let t0 = Instant::now();
        let mut q = DeferredQueue::new();
        q.schedule("a", ms(10), t0);
        q.schedule("b", ms(5), t0);
        q.schedule("c", ms(10), t0);
        assert_eq!(q.poll(t0 + ms(10)), vec!["b", "a", "c"]);
    }

    #[test]
    fn cancel_removes_only_target() {
        let t0 = Instant::now();
        let mut q = DeferredQueue::new();
        let a = q.schedule('a', ms(1), t0);
        let b = q.schedule('b', ms(2), t0);
        assert_eq!(q.cancel(a), Some('a'));
        assert_eq!(q.cancel(a), None);
        assert!(!q.contains(a));
        assert!(q.contains(b));
        assert_eq!(q.poll(t0 + ms(5)), vec!['b']);
        assert_eq!(q.cancel(b), None);
    }

    #[test]
    fn cancel_all_counts() {
        let t0 = Instant::now();
        let mut q = DeferredQueue::new();
        for i in 0..3 {
            q.schedule(i, ms(i), t0);
        }
        assert_eq!(q.cancel_all(), 3);
        assert!(q.poll(t0 + ms(10)).is_empty());
    }

    #[test]
    fn pop_due_reports_deadline() {
        let t0 = Instant::now();
        let mut q = DeferredQueue::new();
        q.schedule((), ms(7), t0);
        assert!(q.pop_due(t0).is_none());
        let fired = q.pop_due(t0 + ms(50)).unwrap();
        assert_eq!(fired.deadline, t0 + ms(7));
        assert_eq!(q.time_until_next(t0), None);
    }

    #[test]
    fn last_deadline_tracks_latest_task() {
        let t0 = Instant::now();
        let mut q = DeferredQueue::new();
        assert_eq!(q.last_deadline(), None);
        q.schedule_at('b', t0 + ms(20));
        q.schedule_at('a', t0 + ms(10));
        assert_eq!(q.next_deadline(), Some(t0 + ms(10)));
        assert_eq!(q.last_deadline(), Some(t0 + ms(20)));
        assert_eq!(q.poll(t0 + ms(15)), vec!['a']);
        assert_eq!(q.last_deadline(), Some(t0 + ms(20)));
    }

    proptest! {
        #[test]
        fn poll_yields_deadline_then_schedule_order(delays in proptest::collection::vec(0u64..50, 0..30)) {
            let t0 = Instant::now();
            let mut q = DeferredQueue::new();
            for (i, d) in delays.iter().enumerate() {
                q.schedule(i, ms(*d), t0);
            }
            let out = q.poll(t0 + ms(100));
            let mut expected: Vec<usize> = (0..delays.len()).collect();
            expected.sort_by_key(|&i| (delays[i], i));
            prop_assert_eq!(out, expected);
        }
    }
}
