//! Explicit periodic refresh tasks.
//!
//! A task never runs on its own: the owner calls [`RefreshTask::poll`] with
//! the current time and the task decides whether a cycle is due. The next
//! cycle is scheduled only after the work returns, so a cycle can never
//! overlap the previous one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Ran,
    NotDue,
    Cancelled,
}

/// Stops a [`RefreshTask`]. Cloning shares the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Idempotent; the task sees it on its next poll.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct RefreshTask {
    interval: Duration,
    next_due: DateTime<Utc>,
    cancel: CancelHandle,
    cycles: u64,
}

impl RefreshTask {
    /// A task whose first cycle is due at `start`.
    pub fn new(interval: Duration, start: DateTime<Utc>) -> (Self, CancelHandle) {
        let cancel = CancelHandle::default();
        let task = Self { interval, next_due: start, cancel: cancel.clone(), cycles: 0 };
        (task, cancel)
    }

    /// Run `work` if a cycle is due at `now`. The following cycle is due one
    /// interval after `now`; missed cycles are not replayed.
    pub fn poll<F: FnOnce()>(&mut self, now: DateTime<Utc>, work: F) -> PollOutcome {
        if self.cancel.is_cancelled() {
            return PollOutcome::Cancelled;
        }
        if now < self.next_due {
            return PollOutcome::NotDue;
        }
        work();
        self.cycles += 1;
        self.next_due = now + self.interval;
        PollOutcome::Ran
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        !self.cancel.is_cancelled() && now >= self.next_due
    }

    pub fn next_due(&self) -> DateTime<Utc> {
        self.next_due
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 6, 15, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_first_cycle_runs_at_start() {
        let (mut task, _) = RefreshTask::new(Duration::seconds(15), t0());
        let mut runs = 0;
        assert_eq!(task.poll(t0(), || runs += 1), PollOutcome::Ran);
        assert_eq!(runs, 1);
        assert_eq!(task.next_due(), t0() + Duration::seconds(15));
    }

    #[test]
    fn test_not_due_before_interval() {
        let (mut task, _) = RefreshTask::new(Duration::seconds(15), t0());
        task.poll(t0(), || {});
        let mut ran = false;
        assert_eq!(task.poll(t0() + Duration::seconds(14), || ran = true), PollOutcome::NotDue);
        assert!(!ran);
        assert_eq!(task.poll(t0() + Duration::seconds(15), || ran = true), PollOutcome::Ran);
        assert!(ran);
        assert_eq!(task.cycles(), 2);
    }

    #[test]
    fn test_next_cycle_counts_from_completion_and_skips_missed() {
        let (mut task, _) = RefreshTask::new(Duration::seconds(5), t0());
        let late = t0() + Duration::seconds(47);
        task.poll(late, || {});
        assert_eq!(task.next_due(), late + Duration::seconds(5));
        assert_eq!(task.cycles(), 1);
    }

    #[test]
    fn test_cancelled_task_never_runs() {
        let (mut task, handle) = RefreshTask::new(Duration::seconds(5), t0());
        handle.cancel();
        handle.cancel();
        let mut ran = false;
        assert_eq!(task.poll(t0() + Duration::hours(1), || ran = true), PollOutcome::Cancelled);
        assert!(!ran);
        assert!(!task.is_due(t0() + Duration::hours(1)));
        assert!(task.is_cancelled());
    }

    #[test]
    fn test_cancel_from_cloned_handle() {
        let (mut task, _) = RefreshTask::new(Duration::seconds(5), t0());
        let other = task.cancel_handle();
        other.cancel();
        assert_eq!(task.poll(t0(), || {}), PollOutcome::Cancelled);
    }
}
