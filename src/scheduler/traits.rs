/*!
 * Scheduling Class Traits
 * Uniform interface through which the driver invokes a policy
 */

use super::run_queue::RunQueue;
use super::types::SchedulingPolicy;
use crate::core::errors::SchedulerResult;
use crate::core::types::{Pid, Ticks};
use crate::process::{Process, ProcessTable, SchedParams};

/// A run-queue discipline
///
/// One instance is bound to one run queue; it owns the policy-specific
/// storage while the [`RunQueue`] owns the shared bookkeeping. None of the
/// operations block, and callers provide mutual exclusion.
///
/// # Contract
/// - `init` comes first, exactly once per queue lifetime
/// - `enqueue` requires a detached process; `dequeue` requires one queued
///   on `rq`. Violations panic.
/// - `pick_next` never changes queue membership
pub trait SchedClass: Send {
    /// Name of the discipline, e.g. `RR_scheduler`
    fn name(&self) -> &'static str;

    /// Policy this class implements
    fn policy(&self) -> SchedulingPolicy;

    /// Reject parameters this class cannot queue, before a process exists
    fn admit(&self, _params: &SchedParams) -> SchedulerResult<()> {
        Ok(())
    }

    /// Establish empty queue state with the caller's quantum
    fn init(&mut self, rq: &mut RunQueue, max_time_slice: Ticks);

    /// Make `proc` ready on `rq`
    fn enqueue(&mut self, rq: &mut RunQueue, proc: &mut Process);

    /// Remove `proc` from `rq`
    fn dequeue(&mut self, rq: &mut RunQueue, proc: &mut Process);

    /// Choose the next process to run, or `None` when nothing is ready
    fn pick_next(&mut self, rq: &RunQueue, procs: &mut ProcessTable) -> Option<Pid>;

    /// Account one timer tick against the running process
    fn proc_tick(&mut self, rq: &RunQueue, proc: &mut Process);
}

impl<C: SchedClass + ?Sized> SchedClass for Box<C> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn policy(&self) -> SchedulingPolicy {
        (**self).policy()
    }

    fn admit(&self, params: &SchedParams) -> SchedulerResult<()> {
        (**self).admit(params)
    }

    fn init(&mut self, rq: &mut RunQueue, max_time_slice: Ticks) {
        (**self).init(rq, max_time_slice)
    }

    fn enqueue(&mut self, rq: &mut RunQueue, proc: &mut Process) {
        (**self).enqueue(rq, proc)
    }

    fn dequeue(&mut self, rq: &mut RunQueue, proc: &mut Process) {
        (**self).dequeue(rq, proc)
    }

    fn pick_next(&mut self, rq: &RunQueue, procs: &mut ProcessTable) -> Option<Pid> {
        (**self).pick_next(rq, procs)
    }

    fn proc_tick(&mut self, rq: &RunQueue, proc: &mut Process) {
        (**self).proc_tick(rq, proc)
    }
}
