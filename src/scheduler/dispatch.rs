/*!
 * Scheduling Class Dispatch
 * Driver-facing facade over one run queue and its class
 */

use super::atomic_stats::{AtomicSchedulerStats, SchedulerStats};
use super::config::SchedulerConfig;
use super::policies::{Fair, Fcfs, Mlfq, RoundRobin, Stride};
use super::run_queue::RunQueue;
use super::traits::SchedClass;
use super::types::SchedulingPolicy;
use crate::core::errors::SchedulerResult;
use crate::core::limits::MAX_LEVEL;
use crate::core::types::{Pid, RunQueueId, Ticks};
use crate::process::{Process, ProcessTable, SchedParams};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::info;

impl SchedulingPolicy {
    /// Instantiate the class for this policy, sized by `config`
    pub fn build_class(&self, config: &SchedulerConfig) -> Box<dyn SchedClass> {
        let capacity = config.capacity;
        match self {
            Self::Fcfs => Box::new(Fcfs::with_capacity(capacity)),
            Self::RoundRobin => Box::new(RoundRobin::with_capacity(capacity)),
            Self::Stride => Box::new(Stride::with_capacity(capacity)),
            Self::Fair => Box::new(Fair::with_capacity(capacity)),
            Self::Mlfq => {
                let rng = config
                    .mlfq_seed
                    .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
                Box::new(Mlfq::<MAX_LEVEL>::with_rng(capacity, rng))
            }
        }
    }
}

/// One run queue bound to one scheduling class
///
/// The driver sees the same surface whichever class is active. Use
/// [`Scheduler::from_config`] for runtime selection, or
/// [`Scheduler::with_class`] to fix the class at compile time.
pub struct Scheduler<C: SchedClass = Box<dyn SchedClass>> {
    class: C,
    rq: RunQueue,
    stats: Arc<AtomicSchedulerStats>,
}

impl Scheduler {
    /// Build the configured class and initialise a run queue for it
    pub fn from_config(id: RunQueueId, config: &SchedulerConfig) -> SchedulerResult<Self> {
        config.validate()?;
        let class = config.policy.build_class(config);
        Ok(Self::with_class(class, id, config.max_time_slice))
    }
}

impl<C: SchedClass> Scheduler<C> {
    /// Bind `class` to a fresh run queue and initialise it
    pub fn with_class(mut class: C, id: RunQueueId, max_time_slice: Ticks) -> Self {
        let mut rq = RunQueue::new(id);
        class.init(&mut rq, max_time_slice);
        let stats = Arc::new(AtomicSchedulerStats::new(class.policy(), max_time_slice));

        info!(
            rq = %id,
            class = class.name(),
            max_time_slice,
            "scheduler initialized"
        );

        Self { class, rq, stats }
    }

    /// Name of the active class
    #[inline]
    pub fn name(&self) -> &'static str {
        self.class.name()
    }

    #[inline]
    pub fn policy(&self) -> SchedulingPolicy {
        self.class.policy()
    }

    #[inline]
    pub fn run_queue(&self) -> &RunQueue {
        &self.rq
    }

    /// Number of queued processes
    #[inline]
    pub fn len(&self) -> usize {
        self.rq.proc_num()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Re-establish empty queue state
    ///
    /// Queued processes keep their back references, so callers must drain
    /// the queue first.
    pub fn reinit(&mut self, max_time_slice: Ticks) {
        assert!(self.rq.proc_num() == 0, "{} reinitialized while non-empty", self.rq.id());
        self.class.init(&mut self.rq, max_time_slice);
        self.stats.reset(max_time_slice);
    }

    /// Check `params` against the active class before spawning
    pub fn admit(&self, params: &SchedParams) -> SchedulerResult<()> {
        self.class.admit(params)
    }

    pub fn enqueue(&mut self, proc: &mut Process) {
        self.class.enqueue(&mut self.rq, proc);
        self.stats.record_enqueue(self.rq.proc_num());
    }

    pub fn dequeue(&mut self, proc: &mut Process) {
        self.class.dequeue(&mut self.rq, proc);
        self.stats.record_dequeue(self.rq.proc_num());
    }

    pub fn pick_next(&mut self, procs: &mut ProcessTable) -> Option<Pid> {
        let next = self.class.pick_next(&self.rq, procs);
        self.stats.record_pick(next.is_some());
        next
    }

    pub fn proc_tick(&mut self, proc: &mut Process) {
        let was_flagged = proc.need_resched;
        self.class.proc_tick(&self.rq, proc);
        self.stats.record_tick(proc.need_resched && !was_flagged);
    }

    /// Snapshot of this queue's counters
    pub fn stats(&self) -> SchedulerStats {
        self.stats.snapshot()
    }

    /// Shared handle for monitors on other threads
    pub fn stats_handle(&self) -> Arc<AtomicSchedulerStats> {
        Arc::clone(&self.stats)
    }
}

impl<C: SchedClass> std::fmt::Debug for Scheduler<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("class", &self.class.name())
            .field("rq", &self.rq)
            .finish()
    }
}
