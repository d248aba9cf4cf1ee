//! Paced, cancellable frame requests.
//!
//! Each tick serves the requests that were pending when it began. A field
//! asks for its next frame while handling the current one, so that request
//! is served on the following tick.

use std::time::{Duration, Instant};

/// Identifies the field that owns a frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub usize);

/// Revocable token for one pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// A request that came due on a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest {
    pub handle: FrameHandle,
    pub owner: FieldId,
}

/// Display-refresh stand-in: hands out frame requests and fires them on a
/// fixed interval.
#[derive(Debug)]
pub struct FrameScheduler {
    interval: Duration,
    next_tick: Instant,
    next_handle: u64,
    pending: Vec<FrameRequest>,
}

impl FrameScheduler {
    /// The first tick fires one interval after `now`.
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_tick: now + interval,
            next_handle: 0,
            pending: Vec::new(),
        }
    }

    /// Ask for `owner` to be stepped on the next tick.
    pub fn request_frame(&mut self, owner: FieldId) -> FrameHandle {
        let handle = FrameHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push(FrameRequest { handle, owner });
        handle
    }

    /// Revoke a pending request. Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel_frame(&mut self, handle: FrameHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|r| r.handle != handle);
        self.pending.len() != before
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.iter().any(|r| r.handle == handle)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// How long the host may block before the next tick is due.
    pub fn time_until_tick(&self, now: Instant) -> Duration {
        self.next_tick.saturating_duration_since(now)
    }

    /// Fire the tick if it is due, returning the requests it serves.
    ///
    /// Missed ticks are dropped rather than replayed.
    pub fn tick(&mut self, now: Instant) -> Vec<FrameRequest> {
        if now < self.next_tick {
            return Vec::new();
        }

        self.next_tick += self.interval;
        if self.next_tick <= now {
            self.next_tick = now + self.interval;
        }

        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn test_tick_waits_for_interval() {
        let start = Instant::now();
        let mut scheduler = FrameScheduler::new(FRAME, start);
        scheduler.request_frame(FieldId(0));

        assert!(scheduler.tick(start).is_empty());
        assert_eq!(scheduler.time_until_tick(start), FRAME);

        let due = scheduler.tick(start + FRAME);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].owner, FieldId(0));
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_requests_during_tick_wait_for_next() {
        let start = Instant::now();
        let mut scheduler = FrameScheduler::new(FRAME, start);
        scheduler.request_frame(FieldId(0));

        let due = scheduler.tick(start + FRAME);
        assert_eq!(due.len(), 1);
        scheduler.request_frame(FieldId(0));

        assert!(scheduler.tick(start + FRAME).is_empty());
        assert_eq!(scheduler.tick(start + FRAME * 2).len(), 1);
    }

    #[test]
    fn test_cancel_revokes_request() {
        let start = Instant::now();
        let mut scheduler = FrameScheduler::new(FRAME, start);
        let a = scheduler.request_frame(FieldId(0));
        let b = scheduler.request_frame(FieldId(1));

        assert!(scheduler.cancel_frame(a));
        assert!(!scheduler.cancel_frame(a));
        assert!(!scheduler.is_pending(a));
        assert!(scheduler.is_pending(b));

        let due = scheduler.tick(start + FRAME);
        assert_eq!(due, vec![FrameRequest { handle: b, owner: FieldId(1) }]);
        assert!(!scheduler.cancel_frame(b));
    }

    #[test]
    fn test_missed_ticks_are_not_replayed() {
        let start = Instant::now();
        let mut scheduler = FrameScheduler::new(FRAME, start);
        let late = start + FRAME * 10;
        scheduler.tick(late);
        assert_eq!(scheduler.time_until_tick(late), FRAME);
    }

    #[test]
    fn test_handles_are_unique() {
        let mut scheduler = FrameScheduler::new(FRAME, Instant::now());
        let a = scheduler.request_frame(FieldId(3));
        let b = scheduler.request_frame(FieldId(3));
        assert_ne!(a, b);
    }
}
