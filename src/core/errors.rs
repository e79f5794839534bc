/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 *
 * Only recoverable conditions live here. Broken run-queue contracts
 * (double enqueue, dequeue of a foreign process, use before init) panic.
 */

use super::types::Pid;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scheduler-related errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedulerError {
    #[error("Process {0} not found")]
    #[diagnostic(
        code(scheduler::process_not_found),
        help("The process may have exited or never existed. Check PID validity.")
    )]
    ProcessNotFound(Pid),

    #[error("Process {0} is still queued on a run queue")]
    #[diagnostic(
        code(scheduler::process_still_queued),
        help("Dequeue the process before releasing its descriptor.")
    )]
    ProcessStillQueued(Pid),

    #[error("Process table full: capacity {0}")]
    #[diagnostic(
        code(scheduler::table_full),
        help("Raise the configured capacity or wait for processes to exit.")
    )]
    ProcessTableFull(usize),

    #[error("Invalid scheduling policy: {0}")]
    #[diagnostic(
        code(scheduler::invalid_policy),
        help("Use fcfs, round_robin, stride, fair, or mlfq.")
    )]
    InvalidPolicy(String),

    #[error("Invalid time slice: {0}")]
    #[diagnostic(
        code(scheduler::invalid_time_slice),
        help("Quantum-based policies need a time slice of at least one tick.")
    )]
    InvalidTimeSlice(u32),

    #[error("Invalid scheduler configuration: {0}")]
    #[diagnostic(code(scheduler::invalid_config))]
    InvalidConfig(String),
}

/// Common result type for scheduler operations
pub type SchedulerResult<T> = Result<T, SchedulerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            SchedulerError::ProcessNotFound(7).to_string(),
            "Process 7 not found"
        );
        assert_eq!(
            SchedulerError::ProcessTableFull(64).to_string(),
            "Process table full: capacity 64"
        );
    }

    #[test]
    fn test_error_serialization() {
        let err = SchedulerError::ProcessStillQueued(3);
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"error_type":"process_still_queued","details":3}"#);

        let back: SchedulerError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }
}
