/*!
 * FCFS Policy
 * Arrival order, no time-slice accounting
 */

use crate::core::data_structures::RunList;
use crate::core::limits::DEFAULT_RUN_QUEUE_CAPACITY;
use crate::core::types::{Pid, Ticks};
use crate::process::{Process, ProcessTable};
use crate::scheduler::run_queue::RunQueue;
use crate::scheduler::traits::SchedClass;
use crate::scheduler::types::SchedulingPolicy;
use tracing::trace;

/// First-come-first-served
///
/// A process leaves the CPU only voluntarily; `max_time_slice` is unused.
#[derive(Debug)]
pub struct Fcfs {
    run_list: RunList,
}

impl Default for Fcfs {
    fn default() -> Self {
        Self::new()
    }
}

impl Fcfs {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_RUN_QUEUE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            run_list: RunList::with_capacity(capacity),
        }
    }
}

impl SchedClass for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS_scheduler"
    }

    fn policy(&self) -> SchedulingPolicy {
        SchedulingPolicy::Fcfs
    }

    fn init(&mut self, rq: &mut RunQueue, max_time_slice: Ticks) {
        self.run_list.clear();
        rq.reset(max_time_slice);
    }

    fn enqueue(&mut self, rq: &mut RunQueue, proc: &mut Process) {
        rq.attach(proc);
        let linked = self.run_list.push_back(proc.pid);
        assert!(linked, "process {} already linked on {}", proc.pid, rq.id());
        trace!(pid = proc.pid, rq = %rq.id(), "fcfs enqueue");
    }

    fn dequeue(&mut self, rq: &mut RunQueue, proc: &mut Process) {
        rq.detach(proc);
        let unlinked = self.run_list.remove(proc.pid);
        assert!(unlinked, "process {} not linked on {}", proc.pid, rq.id());
        trace!(pid = proc.pid, rq = %rq.id(), "fcfs dequeue");
    }

    fn pick_next(&mut self, rq: &RunQueue, _procs: &mut ProcessTable) -> Option<Pid> {
        rq.assert_initialized();
        self.run_list.front()
    }

    fn proc_tick(&mut self, rq: &RunQueue, _proc: &mut Process) {
        rq.assert_initialized();
    }
}
