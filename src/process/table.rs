/*!
 * Process Table
 * Fixed-capacity arena of process descriptors indexed by PID
 */

use super::types::{Process, SchedParams};
use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::types::{Pid, ProcessState};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use tracing::trace;

/// Arena owning process descriptors on behalf of the kernel
///
/// PIDs are slot indices. Freed PIDs are recycled, lowest first.
#[derive(Debug)]
pub struct ProcessTable {
    slots: Vec<Option<Process>>,
    free: BinaryHeap<Reverse<Pid>>,
    live: usize,
}

impl ProcessTable {
    /// Create a table able to hold `capacity` live processes
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = u32::try_from(capacity).unwrap_or(u32::MAX);
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            free: (0..capacity).map(Reverse).collect(),
            live: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Allocate a PID and create its descriptor
    pub fn spawn(&mut self, params: SchedParams) -> SchedulerResult<Pid> {
        let Reverse(pid) = self
            .free
            .pop()
            .ok_or(SchedulerError::ProcessTableFull(self.capacity()))?;

        self.slots[pid as usize] = Some(Process::new(pid, params));
        self.live += 1;
        trace!(pid, live = self.live, "process slot allocated");
        Ok(pid)
    }

    #[inline]
    pub fn get(&self, pid: Pid) -> Option<&Process> {
        self.slots.get(pid as usize)?.as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, pid: Pid) -> Option<&mut Process> {
        self.slots.get_mut(pid as usize)?.as_mut()
    }

    /// Release a descriptor
    ///
    /// Fails while the process is still on a run queue, so that no queue is
    /// left holding a membership record for a vanished PID.
    pub fn remove(&mut self, pid: Pid) -> SchedulerResult<Process> {
        let slot = self
            .slots
            .get_mut(pid as usize)
            .ok_or(SchedulerError::ProcessNotFound(pid))?;

        match slot {
            None => return Err(SchedulerError::ProcessNotFound(pid)),
            Some(proc) if proc.is_queued() => {
                return Err(SchedulerError::ProcessStillQueued(pid))
            }
            Some(_) => {}
        }

        let mut proc = slot.take().ok_or(SchedulerError::ProcessNotFound(pid))?;
        proc.state = ProcessState::Terminated;
        self.free.push(Reverse(pid));
        self.live -= 1;
        trace!(pid, live = self.live, "process slot released");
        Ok(proc)
    }

    /// Live descriptors in PID order
    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.slots.iter().filter_map(Option::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::RunQueueId;

    #[test]
    fn test_spawn_and_lookup() {
        let mut table = ProcessTable::with_capacity(4);
        let a = table.spawn(SchedParams::new("a")).unwrap();
        let b = table.spawn(SchedParams::new("b")).unwrap();

        assert_eq!((a, b), (0, 1));
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(b).map(|p| p.name.as_str()), Some("b"));
        assert!(table.get(3).is_none());
        assert!(table.get(99).is_none());
    }

    #[test]
    fn test_table_full() {
        let mut table = ProcessTable::with_capacity(1);
        table.spawn(SchedParams::default()).unwrap();
        assert_eq!(
            table.spawn(SchedParams::default()),
            Err(SchedulerError::ProcessTableFull(1))
        );
    }

    #[test]
    fn test_remove_recycles_lowest_pid() {
        let mut table = ProcessTable::with_capacity(4);
        for _ in 0..3 {
            table.spawn(SchedParams::default()).unwrap();
        }

        let gone = table.remove(1).unwrap();
        assert_eq!(gone.state, ProcessState::Terminated);
        table.remove(0).unwrap();

        assert_eq!(table.spawn(SchedParams::default()).unwrap(), 0);
        assert_eq!(table.spawn(SchedParams::default()).unwrap(), 1);
        assert_eq!(table.remove(1).map(|p| p.pid), Ok(1));
        assert_eq!(table.remove(1), Err(SchedulerError::ProcessNotFound(1)));
    }

    #[test]
    fn test_remove_queued_process_rejected() {
        let mut table = ProcessTable::with_capacity(2);
        let pid = table.spawn(SchedParams::default()).unwrap();
        table.get_mut(pid).unwrap().run_queue = Some(RunQueueId::BOOT);

        assert_eq!(table.remove(pid), Err(SchedulerError::ProcessStillQueued(pid)));
        assert_eq!(table.len(), 1);
    }
}
