/*!
 * Lock-Free Scheduler Statistics
 * Uses atomic counters so monitors can read while the owning CPU schedules
 */

use super::types::SchedulingPolicy;
use crate::core::types::Ticks;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, AtomicU64, AtomicUsize, Ordering};

/// Point-in-time view of a run queue's counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerStats {
    pub policy: SchedulingPolicy,
    pub max_time_slice: Ticks,
    pub enqueues: u64,
    pub dequeues: u64,
    pub picks: u64,
    pub idle_picks: u64,
    pub ticks: u64,
    pub resched_signals: u64,
    pub queued: usize,
}

/// Atomic scheduler statistics for lock-free updates
///
/// # Performance
/// - Cache-line aligned to prevent false sharing
/// - All operations use relaxed ordering; snapshots need no synchronization
#[repr(C, align(64))]
#[derive(Debug)]
pub struct AtomicSchedulerStats {
    enqueues: AtomicU64,
    dequeues: AtomicU64,
    picks: AtomicU64,
    idle_picks: AtomicU64,
    ticks: AtomicU64,
    resched_signals: AtomicU64,
    queued: AtomicUsize,
    max_time_slice: AtomicU32,
    policy: SchedulingPolicy,
}

impl AtomicSchedulerStats {
    #[inline]
    pub fn new(policy: SchedulingPolicy, max_time_slice: Ticks) -> Self {
        Self {
            enqueues: AtomicU64::new(0),
            dequeues: AtomicU64::new(0),
            picks: AtomicU64::new(0),
            idle_picks: AtomicU64::new(0),
            ticks: AtomicU64::new(0),
            resched_signals: AtomicU64::new(0),
            queued: AtomicUsize::new(0),
            max_time_slice: AtomicU32::new(max_time_slice),
            policy,
        }
    }

    /// Record an enqueue and the resulting queue length
    #[inline(always)]
    pub fn record_enqueue(&self, queued: usize) {
        self.enqueues.fetch_add(1, Ordering::Relaxed);
        self.queued.store(queued, Ordering::Relaxed);
    }

    /// Record a dequeue and the resulting queue length
    #[inline(always)]
    pub fn record_dequeue(&self, queued: usize) {
        self.dequeues.fetch_add(1, Ordering::Relaxed);
        self.queued.store(queued, Ordering::Relaxed);
    }

    /// Record a pick; `found == false` means the queue was empty
    #[inline(always)]
    pub fn record_pick(&self, found: bool) {
        if found {
            self.picks.fetch_add(1, Ordering::Relaxed);
        } else {
            self.idle_picks.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a tick; `resched` marks a fresh need_resched signal
    #[inline(always)]
    pub fn record_tick(&self, resched: bool) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
        if resched {
            self.resched_signals.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Reset counters after a run-queue init
    pub fn reset(&self, max_time_slice: Ticks) {
        self.max_time_slice.store(max_time_slice, Ordering::Relaxed);
        for counter in [
            &self.enqueues,
            &self.dequeues,
            &self.picks,
            &self.idle_picks,
            &self.ticks,
            &self.resched_signals,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
        self.queued.store(0, Ordering::Relaxed);
    }

    /// Get snapshot of current stats
    ///
    /// # Note
    /// Counters may be momentarily inconsistent with each other when read
    /// from another thread; each value is individually accurate.
    #[inline]
    pub fn snapshot(&self) -> SchedulerStats {
        SchedulerStats {
            policy: self.policy,
            max_time_slice: self.max_time_slice.load(Ordering::Relaxed),
            enqueues: self.enqueues.load(Ordering::Relaxed),
            dequeues: self.dequeues.load(Ordering::Relaxed),
            picks: self.picks.load(Ordering::Relaxed),
            idle_picks: self.idle_picks.load(Ordering::Relaxed),
            ticks: self.ticks.load(Ordering::Relaxed),
            resched_signals: self.resched_signals.load(Ordering::Relaxed),
            queued: self.queued.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let stats = AtomicSchedulerStats::new(SchedulingPolicy::Stride, 5);
        stats.record_enqueue(1);
        stats.record_enqueue(2);
        stats.record_dequeue(1);
        stats.record_pick(true);
        stats.record_pick(false);
        stats.record_tick(false);
        stats.record_tick(true);

        let snap = stats.snapshot();
        assert_eq!(snap.policy, SchedulingPolicy::Stride);
        assert_eq!((snap.enqueues, snap.dequeues, snap.queued), (2, 1, 1));
        assert_eq!((snap.picks, snap.idle_picks), (1, 1));
        assert_eq!((snap.ticks, snap.resched_signals), (2, 1));

        stats.reset(9);
        assert_eq!(stats.snapshot().enqueues, 0);
        assert_eq!(stats.snapshot().max_time_slice, 9);
    }
}
