/*!
 * CPU Scheduling Loop
 * Dispatch, timer accounting, blocking and wakeup for one processor
 */

use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::types::{Pid, ProcessState, RunQueueId};
use crate::process::{Process, ProcessTable, SchedParams};
use crate::scheduler::{SchedClass, Scheduler, SchedulerConfig, SchedulerStats};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Counters for one CPU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CpuStats {
    pub ticks: u64,
    pub idle_ticks: u64,
    pub context_switches: u64,
    pub current: Option<Pid>,
    pub scheduler: SchedulerStats,
}

/// One processor: its process table, run queue and running process
///
/// The running process is never on the run queue. It is re-enqueued on the
/// next `schedule` if still runnable.
pub struct Cpu<C: SchedClass = Box<dyn SchedClass>> {
    scheduler: Scheduler<C>,
    procs: ProcessTable,
    current: Option<Pid>,
    ticks: u64,
    idle_ticks: u64,
    context_switches: u64,
}

impl Cpu {
    /// Boot CPU with the configured policy
    pub fn new(config: &SchedulerConfig) -> SchedulerResult<Self> {
        let scheduler = Scheduler::from_config(RunQueueId::BOOT, config)?;
        Ok(Self::with_scheduler(scheduler, config.capacity))
    }
}

impl<C: SchedClass> Cpu<C> {
    pub fn with_scheduler(scheduler: Scheduler<C>, capacity: usize) -> Self {
        Self {
            scheduler,
            procs: ProcessTable::with_capacity(capacity),
            current: None,
            ticks: 0,
            idle_ticks: 0,
            context_switches: 0,
        }
    }

    #[inline]
    pub fn current(&self) -> Option<Pid> {
        self.current
    }

    #[inline]
    pub fn process(&self, pid: Pid) -> Option<&Process> {
        self.procs.get(pid)
    }

    #[inline]
    pub fn processes(&self) -> &ProcessTable {
        &self.procs
    }

    #[inline]
    pub fn scheduler(&self) -> &Scheduler<C> {
        &self.scheduler
    }

    /// Create a process and make it ready
    pub fn spawn(&mut self, params: SchedParams) -> SchedulerResult<Pid> {
        self.scheduler.admit(&params)?;
        let pid = self.procs.spawn(params)?;
        self.wakeup(pid)?;
        Ok(pid)
    }

    /// Move a waiting process onto the run queue
    pub fn wakeup(&mut self, pid: Pid) -> SchedulerResult<()> {
        let proc = self
            .procs
            .get_mut(pid)
            .ok_or(SchedulerError::ProcessNotFound(pid))?;

        if proc.state.is_runnable() {
            warn!(pid, "wakeup of runnable process ignored");
            return Ok(());
        }

        proc.state = ProcessState::Ready;
        if self.current != Some(pid) {
            self.scheduler.enqueue(proc);
        }
        Ok(())
    }

    /// Pick and dispatch the next process; `None` leaves the CPU idle
    pub fn schedule(&mut self) -> Option<Pid> {
        let prev = self.current;

        if let Some(proc) = prev.and_then(|pid| self.procs.get_mut(pid)) {
            proc.need_resched = false;
            if proc.state == ProcessState::Running {
                proc.state = ProcessState::Ready;
                self.scheduler.enqueue(proc);
            }
        }

        let next = self.scheduler.pick_next(&mut self.procs);
        if let Some(proc) = next.and_then(|pid| self.procs.get_mut(pid)) {
            self.scheduler.dequeue(proc);
            proc.state = ProcessState::Running;
            proc.runs += 1;
        }

        if next != prev {
            self.context_switches += 1;
            debug!(from = ?prev, to = ?next, "context switch");
        }
        self.current = next;
        next
    }

    /// Timer interrupt: account the running process, reschedule if due
    pub fn timer_tick(&mut self) -> Option<Pid> {
        self.ticks += 1;

        let Some(pid) = self.current else {
            self.idle_ticks += 1;
            return self.schedule();
        };

        let need_resched = match self.procs.get_mut(pid) {
            Some(proc) => {
                self.scheduler.proc_tick(proc);
                proc.need_resched
            }
            None => true,
        };

        if need_resched {
            self.schedule()
        } else {
            self.current
        }
    }

    /// Give up the CPU voluntarily
    pub fn yield_current(&mut self) -> Option<Pid> {
        if let Some(proc) = self.current.and_then(|pid| self.procs.get_mut(pid)) {
            proc.need_resched = true;
        }
        self.schedule()
    }

    /// Put the running process to sleep and switch away
    pub fn block_current(&mut self) -> Option<Pid> {
        if let Some(proc) = self.current.and_then(|pid| self.procs.get_mut(pid)) {
            proc.state = ProcessState::Waiting;
            debug!(pid = proc.pid, "process blocked");
        }
        self.schedule()
    }

    /// Tear down a process wherever it is and release its descriptor
    #[instrument(skip(self))]
    pub fn exit(&mut self, pid: Pid) -> SchedulerResult<Process> {
        let proc = self
            .procs
            .get_mut(pid)
            .ok_or(SchedulerError::ProcessNotFound(pid))?;

        if proc.is_queued() {
            self.scheduler.dequeue(proc);
        }
        proc.state = ProcessState::Terminated;

        let released = self.procs.remove(pid)?;
        if self.current == Some(pid) {
            self.current = None;
            self.schedule();
        }
        Ok(released)
    }

    pub fn stats(&self) -> CpuStats {
        CpuStats {
            ticks: self.ticks,
            idle_ticks: self.idle_ticks,
            context_switches: self.context_switches,
            current: self.current,
            scheduler: self.scheduler.stats(),
        }
    }
}
