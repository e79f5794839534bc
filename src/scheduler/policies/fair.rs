/*!
 * Fair Policy
 * Weighted virtual runtime: least-charged process runs next
 */

use super::refill_time_slice;
use crate::core::data_structures::{HeapHandle, SkewHeap};
use crate::core::limits::DEFAULT_RUN_QUEUE_CAPACITY;
use crate::core::types::{Pid, Ticks};
use crate::process::{Process, ProcessTable};
use crate::scheduler::run_queue::RunQueue;
use crate::scheduler::traits::SchedClass;
use crate::scheduler::types::SchedulingPolicy;
use ahash::RandomState;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::trace;

#[derive(Debug, Clone, Copy)]
struct FairEntry {
    pid: Pid,
    vruntime: i32,
}

fn vruntime_cmp(a: &FairEntry, b: &FairEntry) -> Ordering {
    a.vruntime.wrapping_sub(b.vruntime).cmp(&0)
}

/// Weighted-fair scheduling by virtual runtime
///
/// The heap is keyed by the vruntime a process had when it was enqueued.
/// Charges accrued while running show up once the driver re-enqueues it.
#[derive(Debug)]
pub struct Fair {
    pool: SkewHeap<FairEntry>,
    handles: HashMap<Pid, HeapHandle, RandomState>,
}

impl Default for Fair {
    fn default() -> Self {
        Self::new()
    }
}

impl Fair {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_RUN_QUEUE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pool: SkewHeap::with_capacity(capacity, vruntime_cmp),
            handles: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }
}

impl SchedClass for Fair {
    fn name(&self) -> &'static str {
        "fair_scheduler"
    }

    fn policy(&self) -> SchedulingPolicy {
        SchedulingPolicy::Fair
    }

    fn init(&mut self, rq: &mut RunQueue, max_time_slice: Ticks) {
        self.pool.clear();
        self.handles.clear();
        rq.reset(max_time_slice);
    }

    fn enqueue(&mut self, rq: &mut RunQueue, proc: &mut Process) {
        rq.attach(proc);
        let handle = self.pool.insert(FairEntry {
            pid: proc.pid,
            vruntime: proc.vruntime,
        });
        let previous = self.handles.insert(proc.pid, handle);
        assert!(previous.is_none(), "process {} already in fair pool", proc.pid);
        refill_time_slice(rq, proc);
        trace!(pid = proc.pid, vruntime = proc.vruntime, "fair enqueue");
    }

    fn dequeue(&mut self, rq: &mut RunQueue, proc: &mut Process) {
        rq.detach(proc);
        let removed = self
            .handles
            .remove(&proc.pid)
            .and_then(|handle| self.pool.remove(handle));
        assert!(removed.is_some(), "process {} not in fair pool", proc.pid);
        trace!(pid = proc.pid, "fair dequeue");
    }

    fn pick_next(&mut self, rq: &RunQueue, _procs: &mut ProcessTable) -> Option<Pid> {
        rq.assert_initialized();
        self.pool.peek().map(|entry| entry.pid)
    }

    /// The tick that spends the last unit of slice is not charged
    ///
    /// A full slice of `n` ticks therefore costs `(n - 1) * fair_priority`,
    /// one charge less than billing every tick would.
    fn proc_tick(&mut self, rq: &RunQueue, proc: &mut Process) {
        rq.assert_initialized();
        if proc.time_slice > 0 {
            proc.time_slice -= 1;
            if proc.time_slice > 0 {
                proc.vruntime = proc.vruntime.wrapping_add(proc.fair_priority);
            }
        }
        if proc.time_slice == 0 {
            proc.need_resched = true;
        }
    }
}
