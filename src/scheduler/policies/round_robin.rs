/*!
 * Round-Robin Policy
 * Arrival order with a fixed quantum
 */

use super::{account_tick, refill_time_slice};
use crate::core::data_structures::RunList;
use crate::core::limits::DEFAULT_RUN_QUEUE_CAPACITY;
use crate::core::types::{Pid, Ticks};
use crate::process::{Process, ProcessTable};
use crate::scheduler::run_queue::RunQueue;
use crate::scheduler::traits::SchedClass;
use crate::scheduler::types::SchedulingPolicy;
use tracing::trace;

/// Round-robin
///
/// Only accounts and signals: rotating an exhausted process to the tail is
/// the driver's dequeue + enqueue.
#[derive(Debug)]
pub struct RoundRobin {
    run_list: RunList,
}

impl Default for RoundRobin {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundRobin {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_RUN_QUEUE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            run_list: RunList::with_capacity(capacity),
        }
    }
}

impl SchedClass for RoundRobin {
    fn name(&self) -> &'static str {
        "RR_scheduler"
    }

    fn policy(&self) -> SchedulingPolicy {
        SchedulingPolicy::RoundRobin
    }

    fn init(&mut self, rq: &mut RunQueue, max_time_slice: Ticks) {
        self.run_list.clear();
        rq.reset(max_time_slice);
    }

    fn enqueue(&mut self, rq: &mut RunQueue, proc: &mut Process) {
        rq.attach(proc);
        let linked = self.run_list.push_back(proc.pid);
        assert!(linked, "process {} already linked on {}", proc.pid, rq.id());
        refill_time_slice(rq, proc);
        trace!(pid = proc.pid, time_slice = proc.time_slice, "rr enqueue");
    }

    fn dequeue(&mut self, rq: &mut RunQueue, proc: &mut Process) {
        rq.detach(proc);
        let unlinked = self.run_list.remove(proc.pid);
        assert!(unlinked, "process {} not linked on {}", proc.pid, rq.id());
        trace!(pid = proc.pid, "rr dequeue");
    }

    fn pick_next(&mut self, rq: &RunQueue, _procs: &mut ProcessTable) -> Option<Pid> {
        rq.assert_initialized();
        self.run_list.front()
    }

    fn proc_tick(&mut self, rq: &RunQueue, proc: &mut Process) {
        rq.assert_initialized();
        account_tick(proc);
    }
}
