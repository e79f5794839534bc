/*!
 * Scheduler Module
 * Run queues, scheduling classes and their dispatch facade
 */

pub mod atomic_stats;
pub mod config;
pub mod dispatch;
pub mod policies;
pub mod run_queue;
pub mod traits;
pub mod types;

// Re-export public API
pub use atomic_stats::{AtomicSchedulerStats, SchedulerStats};
pub use config::SchedulerConfig;
pub use dispatch::Scheduler;
pub use policies::{Fair, Fcfs, Mlfq, RoundRobin, Stride};
pub use run_queue::RunQueue;
pub use traits::SchedClass;
pub use types::SchedulingPolicy;
