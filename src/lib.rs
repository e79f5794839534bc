/*!
 * AI-OS Scheduling Core
 * Run queues and pluggable CPU scheduling policies exposed as a library
 */

pub mod core;
pub mod driver;
pub mod monitoring;
pub mod process;
pub mod scheduler;

// Re-exports
pub use crate::core::errors::{SchedulerError, SchedulerResult};
pub use crate::core::types::{Pid, ProcessState, RunQueueId, Ticks};
pub use driver::{Cpu, CpuStats};
pub use process::{Process, ProcessTable, SchedParams};
pub use scheduler::{
    Fair, Fcfs, Mlfq, RoundRobin, RunQueue, SchedClass, Scheduler, SchedulerConfig,
    SchedulerStats, SchedulingPolicy, Stride,
};
