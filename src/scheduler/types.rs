/*!
 * Scheduler Types
 * Policy selection and its string form
 */

use crate::core::errors::SchedulerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Scheduling policy selected for a run queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SchedulingPolicy {
    /// First-come-first-served, no preemption
    Fcfs,
    /// Arrival order with a fixed quantum
    #[default]
    RoundRobin,
    /// Proportional share by stride
    Stride,
    /// Weighted virtual runtime
    Fair,
    /// Multi-level feedback queue
    Mlfq,
}

impl SchedulingPolicy {
    /// Every policy, in declaration order
    pub const ALL: [Self; 5] = [
        Self::Fcfs,
        Self::RoundRobin,
        Self::Stride,
        Self::Fair,
        Self::Mlfq,
    ];

    /// Convert to string representation
    ///
    /// # Performance
    /// Hot path - used for logging and serialization
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::RoundRobin => "round_robin",
            Self::Stride => "stride",
            Self::Fair => "fair",
            Self::Mlfq => "mlfq",
        }
    }

    /// Whether the policy consumes `max_time_slice`
    #[inline]
    pub const fn uses_time_slice(&self) -> bool {
        !matches!(self, Self::Fcfs)
    }
}

impl FromStr for SchedulingPolicy {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(Self::Fcfs),
            "round_robin" | "roundrobin" | "rr" => Ok(Self::RoundRobin),
            "stride" => Ok(Self::Stride),
            "fair" | "cfs" => Ok(Self::Fair),
            "mlfq" | "multi_queue" => Ok(Self::Mlfq),
            _ => Err(SchedulerError::InvalidPolicy(format!(
                "'{}'. Valid: fcfs, round_robin, stride, fair, mlfq",
                s
            ))),
        }
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SchedulingPolicy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SchedulingPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parsing() {
        assert_eq!("fcfs".parse::<SchedulingPolicy>().unwrap(), SchedulingPolicy::Fcfs);
        assert_eq!("RR".parse::<SchedulingPolicy>().unwrap(), SchedulingPolicy::RoundRobin);
        assert_eq!("stride".parse::<SchedulingPolicy>().unwrap(), SchedulingPolicy::Stride);
        assert_eq!("cfs".parse::<SchedulingPolicy>().unwrap(), SchedulingPolicy::Fair);
        assert_eq!(" mlfq ".parse::<SchedulingPolicy>().unwrap(), SchedulingPolicy::Mlfq);
        assert!(matches!(
            "lottery".parse::<SchedulingPolicy>(),
            Err(SchedulerError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn test_policy_string_round_trip() {
        for policy in SchedulingPolicy::ALL {
            assert_eq!(policy.as_str().parse::<SchedulingPolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn test_policy_serde() {
        let json = serde_json::to_string(&SchedulingPolicy::RoundRobin).unwrap();
        assert_eq!(json, "\"round_robin\"");
        let policy: SchedulingPolicy = serde_json::from_str("\"fair\"").unwrap();
        assert_eq!(policy, SchedulingPolicy::Fair);
        assert!(serde_json::from_str::<SchedulingPolicy>("\"edf\"").is_err());
    }
}
