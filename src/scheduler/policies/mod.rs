/*!
 * Scheduling Policies
 * The five run-queue disciplines and the quantum rules they share
 */

mod fair;
mod fcfs;
mod mlfq;
mod round_robin;
mod stride;

pub use fair::Fair;
pub use fcfs::Fcfs;
pub use mlfq::Mlfq;
pub use round_robin::RoundRobin;
pub use stride::{stride_step, Stride};

use super::run_queue::RunQueue;
use crate::process::Process;

/// Top up a zero or over-long slice to the queue's quantum
#[inline]
pub(crate) fn refill_time_slice(rq: &RunQueue, proc: &mut Process) {
    let max = rq.max_time_slice();
    if proc.time_slice == 0 || proc.time_slice > max {
        proc.time_slice = max;
    }
}

/// Count one tick down and flag a reschedule once the slice is spent
#[inline]
pub(crate) fn account_tick(proc: &mut Process) {
    if proc.time_slice > 0 {
        proc.time_slice -= 1;
    }
    if proc.time_slice == 0 {
        proc.need_resched = true;
    }
}
