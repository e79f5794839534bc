/*!
 * Core Types
 * Common types used across the scheduling core
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Process ID type
pub type Pid = u32;

/// Scheduler tick count
pub type Ticks = u32;

/// Identity of a run queue (one per CPU)
///
/// Processes hold this as a non-owning back reference; resolving it is a
/// lookup, never a dereference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunQueueId(pub u32);

impl RunQueueId {
    /// The run queue of the boot CPU
    pub const BOOT: Self = Self(0);
}

impl fmt::Display for RunQueueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rq{}", self.0)
    }
}

/// Process state as seen by the scheduling driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Process is ready to run
    Ready,
    /// Process is currently running
    Running,
    /// Process is waiting for I/O or event
    Waiting,
    /// Process has terminated
    Terminated,
}

impl ProcessState {
    /// Whether the process may be placed on a run queue
    #[inline]
    pub const fn is_runnable(&self) -> bool {
        matches!(self, Self::Ready | Self::Running)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_queue_id_display() {
        assert_eq!(RunQueueId(3).to_string(), "rq3");
        assert_eq!(RunQueueId::BOOT, RunQueueId(0));
    }

    #[test]
    fn test_process_state_serde() {
        let json = serde_json::to_string(&ProcessState::Waiting).unwrap();
        assert_eq!(json, "\"waiting\"");
        assert!(ProcessState::Running.is_runnable());
        assert!(!ProcessState::Terminated.is_runnable());
    }
}
