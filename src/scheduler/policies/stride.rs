/*!
 * Stride Policy
 * Proportional share: lowest accumulated stride runs next
 */

use super::{account_tick, refill_time_slice};
use crate::core::data_structures::{HeapHandle, SkewHeap};
use crate::core::limits::{DEFAULT_RUN_QUEUE_CAPACITY, STRIDE_STEP};
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
struct StrideEntry {
    pid: Pid,
    stride: i32,
}

/// Signed-difference comparison; stays correct across wraparound while
/// live strides are within `i32::MAX` of each other.
fn stride_cmp(a: &StrideEntry, b: &StrideEntry) -> Ordering {
    a.stride.wrapping_sub(b.stride).cmp(&0)
}

/// Stride advance for one dispatch at `priority`
#[inline]
pub fn stride_step(priority: u32) -> i32 {
    let step = if priority == 0 {
        STRIDE_STEP
    } else {
        STRIDE_STEP / priority
    };
    // STRIDE_STEP fits in i32
    step as i32
}

/// Stride scheduling
///
/// `pick_next` charges the picked process its step in place every time it
/// is called, so a process re-polled before a context switch keeps paying.
/// The heap is not reordered by the charge; the new key takes effect when
/// the driver dequeues and re-enqueues the process.
#[derive(Debug)]
pub struct Stride {
    pool: SkewHeap<StrideEntry>,
    handles: HashMap<Pid, HeapHandle, RandomState>,
}

impl Default for Stride {
    fn default() -> Self {
        Self::new()
    }
}

impl Stride {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_RUN_QUEUE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pool: SkewHeap::with_capacity(capacity, stride_cmp),
            handles: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }
}

impl SchedClass for Stride {
    fn name(&self) -> &'static str {
        "stride_scheduler"
    }

    fn policy(&self) -> SchedulingPolicy {
        SchedulingPolicy::Stride
    }

    fn init(&mut self, rq: &mut RunQueue, max_time_slice: Ticks) {
        self.pool.clear();
        self.handles.clear();
        rq.reset(max_time_slice);
    }

    fn enqueue(&mut self, rq: &mut RunQueue, proc: &mut Process) {
        rq.attach(proc);
        let handle = self.pool.insert(StrideEntry {
            pid: proc.pid,
            stride: proc.stride,
        });
        let previous = self.handles.insert(proc.pid, handle);
        assert!(previous.is_none(), "process {} already in stride pool", proc.pid);
        refill_time_slice(rq, proc);
        trace!(pid = proc.pid, stride = proc.stride, "stride enqueue");
    }

    fn dequeue(&mut self, rq: &mut RunQueue, proc: &mut Process) {
        rq.detach(proc);
        let removed = self
            .handles
            .remove(&proc.pid)
            .and_then(|handle| self.pool.remove(handle));
        assert!(removed.is_some(), "process {} not in stride pool", proc.pid);
        trace!(pid = proc.pid, "stride dequeue");
    }

    fn pick_next(&mut self, rq: &RunQueue, procs: &mut ProcessTable) -> Option<Pid> {
        rq.assert_initialized();
        let entry = self.pool.peek_mut()?;
        let Some(proc) = procs.get_mut(entry.pid) else {
            panic!("stride pool holds unknown process {}", entry.pid);
        };

        proc.stride = proc.stride.wrapping_add(stride_step(proc.priority));
        entry.stride = proc.stride;
        trace!(pid = proc.pid, stride = proc.stride, "stride pick");
        Some(proc.pid)
    }

    fn proc_tick(&mut self, rq: &RunQueue, proc: &mut Process) {
        rq.assert_initialized();
        account_tick(proc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::RunQueueId;
    use crate::process::SchedParams;

    fn setup(params: &[SchedParams]) -> (Stride, RunQueue, ProcessTable) {
        let mut class = Stride::new();
        let mut rq = RunQueue::new(RunQueueId::BOOT);
        class.init(&mut rq, 5);
        let mut table = ProcessTable::with_capacity(8);
        for p in params {
            let pid = table.spawn(p.clone()).unwrap();
            class.enqueue(&mut rq, table.get_mut(pid).unwrap());
        }
        (class, rq, table)
    }

    #[test]
    fn test_step_sizes() {
        assert_eq!(stride_step(0), 0x7FFF_FFFF);
        assert_eq!(stride_step(1), 0x7FFF_FFFF);
        assert_eq!(stride_step(2), 0x3FFF_FFFF);
        assert_eq!(stride_step(u32::MAX), 0);
    }

    #[test]
    fn test_lowest_stride_first() {
        let (mut class, rq, mut table) = setup(&[
            SchedParams::default().with_stride(30),
            SchedParams::default().with_stride(10),
            SchedParams::default().with_stride(20),
        ]);
        assert_eq!(class.pick_next(&rq, &mut table), Some(1));
    }

    #[test]
    fn test_pick_charges_in_place() {
        let (mut class, rq, mut table) =
            setup(&[SchedParams::default().with_priority(4)]);

        assert_eq!(class.pick_next(&rq, &mut table), Some(0));
        assert_eq!(class.pick_next(&rq, &mut table), Some(0));
        assert_eq!(table.get(0).unwrap().stride, 2 * stride_step(4));
        assert_eq!(rq.proc_num(), 1);
    }

    #[test]
    fn test_zero_priority_takes_full_step() {
        let (mut class, rq, mut table) = setup(&[SchedParams::default()]);
        class.pick_next(&rq, &mut table);
        assert_eq!(table.get(0).unwrap().stride, STRIDE_STEP as i32);
    }

    #[test]
    fn test_wrapped_stride_orders_after() {
        // i32::MAX wraps to a negative value, which still compares as larger
        let (mut class, rq, mut table) = setup(&[
            SchedParams::default().with_stride(i32::MAX - 1),
            SchedParams::default().with_stride(i32::MAX - 2),
        ]);
        assert_eq!(class.pick_next(&rq, &mut table), Some(1));

        let mut rq = rq;
        let proc = table.get_mut(1).unwrap();
        assert!(proc.stride < 0);
        class.dequeue(&mut rq, proc);
        class.enqueue(&mut rq, proc);

        assert_eq!(class.pick_next(&rq, &mut table), Some(0));
    }

    #[test]
    fn test_dequeue_interior_process() {
        let (mut class, mut rq, mut table) = setup(&[
            SchedParams::default().with_stride(1),
            SchedParams::default().with_stride(2),
            SchedParams::default().with_stride(3),
        ]);
        class.dequeue(&mut rq, table.get_mut(1).unwrap());
        class.dequeue(&mut rq, table.get_mut(0).unwrap());
        assert_eq!(class.pick_next(&rq, &mut table), Some(2));
        assert_eq!(rq.proc_num(), 1);
    }
}
