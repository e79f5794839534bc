/*!
 * MLFQ Policy
 * Multi-level feedback queue with randomized, level-weighted selection
 */

use super::account_tick;
use crate::core::data_structures::RunList;
use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::limits::{DEFAULT_RUN_QUEUE_CAPACITY, MAX_LEVEL};
use crate::core::types::{Pid, Ticks};
use crate::process::{Process, ProcessTable, SchedParams};
use crate::scheduler::run_queue::RunQueue;
use crate::scheduler::traits::SchedClass;
use crate::scheduler::types::SchedulingPolicy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

/// Multi-level feedback queue with `LEVELS` FIFO levels
///
/// Level 0 is sampled with weight `2^(LEVELS-1)`, each deeper level with
/// half the weight of the one above. A process that spends its whole slice
/// sinks one level on its next enqueue, and its slice doubles per level.
pub struct Mlfq<const LEVELS: usize = MAX_LEVEL> {
    levels: [RunList; LEVELS],
    rng: StdRng,
}

impl<const LEVELS: usize> std::fmt::Debug for Mlfq<LEVELS> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mlfq")
            .field("levels", &self.levels.iter().map(RunList::len).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Default for Mlfq {
    fn default() -> Self {
        Self::new()
    }
}

impl<const LEVELS: usize> Mlfq<LEVELS> {
    /// Create with an entropy-seeded generator
    pub fn new() -> Self {
        Self::with_rng(DEFAULT_RUN_QUEUE_CAPACITY, StdRng::from_entropy())
    }

    /// Create with a fixed seed for reproducible level selection
    pub fn with_seed(capacity: usize, seed: u64) -> Self {
        Self::with_rng(capacity, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(capacity: usize, rng: StdRng) -> Self {
        assert!(
            LEVELS > 0 && LEVELS < 32,
            "MLFQ needs between 1 and 31 levels, got {LEVELS}"
        );
        Self {
            levels: std::array::from_fn(|_| RunList::with_capacity(capacity)),
            rng,
        }
    }

    /// Number of processes queued at `level`
    pub fn level_len(&self, level: usize) -> usize {
        self.levels.get(level).map_or(0, RunList::len)
    }

    /// Map a draw in `[0, 2^LEVELS - 1)` onto a level by cumulative weight
    pub fn level_for_draw(draw: u32) -> usize {
        let mut bound = 0u32;
        for level in 0..LEVELS {
            bound += 1 << (LEVELS - level - 1);
            if draw < bound {
                return level;
            }
        }
        LEVELS - 1
    }

    /// Quantum granted at `level`
    fn slice_for_level(max_time_slice: Ticks, level: usize) -> Ticks {
        let slice = u64::from(max_time_slice) << level;
        Ticks::try_from(slice).unwrap_or(Ticks::MAX)
    }
}

impl<const LEVELS: usize> SchedClass for Mlfq<LEVELS> {
    fn name(&self) -> &'static str {
        "MLFQ_scheduler"
    }

    fn policy(&self) -> SchedulingPolicy {
        SchedulingPolicy::Mlfq
    }

    fn admit(&self, params: &SchedParams) -> SchedulerResult<()> {
        if params.level >= LEVELS {
            return Err(SchedulerError::InvalidConfig(format!(
                "MLFQ level {} outside 0..{}",
                params.level, LEVELS
            )));
        }
        Ok(())
    }

    fn init(&mut self, rq: &mut RunQueue, max_time_slice: Ticks) {
        self.levels.iter_mut().for_each(RunList::clear);
        rq.reset(max_time_slice);
    }

    fn enqueue(&mut self, rq: &mut RunQueue, proc: &mut Process) {
        assert!(
            proc.level < LEVELS,
            "process {} at level {} outside 0..{}",
            proc.pid,
            proc.level,
            LEVELS
        );
        rq.attach(proc);

        if proc.time_slice == 0 && proc.level != LEVELS - 1 {
            proc.level += 1;
            debug!(pid = proc.pid, level = proc.level, "mlfq demotion");
        }

        let linked = self.levels[proc.level].push_back(proc.pid);
        assert!(linked, "process {} already linked on {}", proc.pid, rq.id());
        proc.time_slice = Self::slice_for_level(rq.max_time_slice(), proc.level);
        trace!(pid = proc.pid, level = proc.level, time_slice = proc.time_slice, "mlfq enqueue");
    }

    fn dequeue(&mut self, rq: &mut RunQueue, proc: &mut Process) {
        rq.detach(proc);
        let unlinked = self.levels.iter_mut().any(|list| list.remove(proc.pid));
        assert!(unlinked, "process {} not linked on {}", proc.pid, rq.id());
        trace!(pid = proc.pid, "mlfq dequeue");
    }

    fn pick_next(&mut self, rq: &RunQueue, _procs: &mut ProcessTable) -> Option<Pid> {
        rq.assert_initialized();
        let range = (1u32 << LEVELS) - 1;
        let level = Self::level_for_draw(self.rng.gen_range(0..range));

        // The drawn level first, then every level top-down
        self.levels[level]
            .front()
            .or_else(|| self.levels.iter().find_map(RunList::front))
    }

    fn proc_tick(&mut self, rq: &RunQueue, proc: &mut Process) {
        rq.assert_initialized();
        account_tick(proc);
    }
}
