/*!
 * Run Queue
 * Bookkeeping shared by every scheduling policy
 */

use crate::core::types::{RunQueueId, Ticks};
use crate::process::Process;
use tracing::info;

/// Per-CPU run queue bookkeeping
///
/// Policy-specific storage (lists, heap roots) lives in the policy object
/// bound to this queue. `proc_num` always equals the number of processes
/// whose back reference names this queue; [`RunQueue::attach`] and
/// [`RunQueue::detach`] are the only places that change either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunQueue {
    id: RunQueueId,
    max_time_slice: Ticks,
    proc_num: usize,
    initialized: bool,
}

impl RunQueue {
    /// Create an uninitialised run queue
    ///
    /// A scheduling class must `init` it before any other operation.
    pub const fn new(id: RunQueueId) -> Self {
        Self {
            id,
            max_time_slice: 0,
            proc_num: 0,
            initialized: false,
        }
    }

    #[inline]
    pub const fn id(&self) -> RunQueueId {
        self.id
    }

    /// Configured quantum, supplied by the caller at init
    #[inline]
    pub fn max_time_slice(&self) -> Ticks {
        self.assert_initialized();
        self.max_time_slice
    }

    /// Number of processes currently enqueued
    #[inline]
    pub const fn proc_num(&self) -> usize {
        self.proc_num
    }

    #[inline]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Establish empty queue state
    pub(crate) fn reset(&mut self, max_time_slice: Ticks) {
        self.max_time_slice = max_time_slice;
        self.proc_num = 0;
        self.initialized = true;
        info!(rq = %self.id, max_time_slice, "run queue initialized");
    }

    /// Record `proc` as a member of this queue
    ///
    /// # Panics
    /// If the queue is uninitialised or `proc` is already on a run queue.
    pub(crate) fn attach(&mut self, proc: &mut Process) {
        self.assert_initialized();
        assert!(
            proc.run_queue.is_none(),
            "process {} enqueued on {} while already queued on {}",
            proc.pid,
            self.id,
            proc.run_queue.map_or_else(String::new, |rq| rq.to_string()),
        );

        proc.run_queue = Some(self.id);
        self.proc_num += 1;
    }

    /// Drop `proc`'s membership of this queue
    ///
    /// # Panics
    /// If the queue is uninitialised or `proc` is not queued here.
    pub(crate) fn detach(&mut self, proc: &mut Process) {
        self.assert_initialized();
        assert!(
            proc.run_queue == Some(self.id),
            "process {} dequeued from {} but its run queue is {:?}",
            proc.pid,
            self.id,
            proc.run_queue,
        );

        proc.run_queue = None;
        self.proc_num -= 1;
    }

    #[inline]
    pub(crate) fn assert_initialized(&self) {
        assert!(self.initialized, "{} used before init", self.id);
    }
}
