/*!
 * Process Types
 * Scheduling-relevant subset of the process descriptor
 */

use crate::core::limits::DEFAULT_FAIR_PRIORITY;
use crate::core::types::{Pid, ProcessState, RunQueueId, Ticks};
use serde::{Deserialize, Serialize};

/// Process descriptor as seen by the scheduler
///
/// Queue membership links are not stored here: each policy keeps its own
/// membership records keyed by PID. `run_queue` is the only trace of
/// membership on the descriptor, and it never owns the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Process {
    pub pid: Pid,
    pub name: String,
    pub state: ProcessState,

    /// Remaining ticks before forced rescheduling
    pub time_slice: Ticks,
    /// Set when the slice is exhausted; cleared by the driver
    pub need_resched: bool,
    /// Run queue currently holding this process, if any
    pub run_queue: Option<RunQueueId>,

    // Stride policy
    pub stride: i32,
    /// Stride weight; 0 is legal and dispatches with the full step
    pub priority: u32,

    // Fair policy
    pub vruntime: i32,
    /// Virtual-runtime charge per tick
    pub fair_priority: i32,

    // MLFQ policy
    pub level: usize,

    /// Number of times the driver dispatched this process
    pub runs: u64,
}

impl Process {
    /// Build a fresh descriptor from `params`
    pub fn new(pid: Pid, params: SchedParams) -> Self {
        Self {
            pid,
            name: params.name,
            state: ProcessState::Waiting,
            time_slice: 0,
            need_resched: false,
            run_queue: None,
            stride: params.stride,
            priority: params.priority,
            vruntime: params.vruntime,
            fair_priority: params.fair_priority,
            level: params.level,
            runs: 0,
        }
    }

    /// Whether the process is currently on a run queue
    #[inline]
    pub fn is_queued(&self) -> bool {
        self.run_queue.is_some()
    }
}

/// Initial scheduling parameters for a new process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SchedParams {
    pub name: String,
    pub priority: u32,
    pub fair_priority: i32,
    pub level: usize,
    pub stride: i32,
    pub vruntime: i32,
}

impl Default for SchedParams {
    fn default() -> Self {
        Self {
            name: String::new(),
            priority: 0,
            fair_priority: DEFAULT_FAIR_PRIORITY,
            level: 0,
            stride: 0,
            vruntime: 0,
        }
    }
}

impl SchedParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_fair_priority(mut self, fair_priority: i32) -> Self {
        self.fair_priority = fair_priority;
        self
    }

    pub fn with_level(mut self, level: usize) -> Self {
        self.level = level;
        self
    }

    pub fn with_stride(mut self, stride: i32) -> Self {
        self.stride = stride;
        self
    }

    pub fn with_vruntime(mut self, vruntime: i32) -> Self {
        self.vruntime = vruntime;
        self
    }
}
