/*!
 * Scheduler Configuration
 * Policy selection and run-queue sizing, from code, JSON or environment
 */

use super::types::SchedulingPolicy;
use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::limits::{
    DEFAULT_MAX_TIME_SLICE, DEFAULT_RUN_QUEUE_CAPACITY, MAX_RUN_QUEUE_CAPACITY,
};
use crate::core::types::Ticks;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Environment variable naming the policy
pub const ENV_POLICY: &str = "SCHED_POLICY";
/// Environment variable holding the quantum in ticks
pub const ENV_MAX_TIME_SLICE: &str = "SCHED_MAX_TIME_SLICE";
/// Environment variable holding the process capacity
pub const ENV_CAPACITY: &str = "SCHED_CAPACITY";
/// Environment variable holding the MLFQ seed
pub const ENV_MLFQ_SEED: &str = "SCHED_MLFQ_SEED";

/// Run-queue configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SchedulerConfig {
    /// Active scheduling class
    pub policy: SchedulingPolicy,
    /// Quantum in ticks handed to the class at init
    pub max_time_slice: Ticks,
    /// Process slots reserved up front
    pub capacity: usize,
    /// Seed for MLFQ level selection; entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mlfq_seed: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            policy: SchedulingPolicy::default(),
            max_time_slice: DEFAULT_MAX_TIME_SLICE,
            capacity: DEFAULT_RUN_QUEUE_CAPACITY,
            mlfq_seed: None,
        }
    }
}

impl SchedulerConfig {
    pub fn new(policy: SchedulingPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub const fn with_max_time_slice(mut self, max_time_slice: Ticks) -> Self {
        self.max_time_slice = max_time_slice;
        self
    }

    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub const fn with_mlfq_seed(mut self, seed: u64) -> Self {
        self.mlfq_seed = Some(seed);
        self
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> SchedulerResult<()> {
        if self.max_time_slice == 0 && self.policy.uses_time_slice() {
            return Err(SchedulerError::InvalidTimeSlice(self.max_time_slice));
        }
        if self.capacity == 0 {
            return Err(SchedulerError::InvalidConfig(
                "capacity must be at least 1".into(),
            ));
        }
        if self.capacity > MAX_RUN_QUEUE_CAPACITY {
            return Err(SchedulerError::InvalidConfig(format!(
                "capacity {} exceeds {}",
                self.capacity, MAX_RUN_QUEUE_CAPACITY
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> SchedulerResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SchedulerError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Build from `SCHED_*` environment variables over the defaults
    pub fn from_env() -> SchedulerResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup over the defaults
    pub fn from_lookup<F>(lookup: F) -> SchedulerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(policy) = lookup(ENV_POLICY) {
            config.policy = policy.parse()?;
        }
        if let Some(slice) = lookup(ENV_MAX_TIME_SLICE) {
            config.max_time_slice = parse_var(ENV_MAX_TIME_SLICE, &slice)?;
        }
        if let Some(capacity) = lookup(ENV_CAPACITY) {
            config.capacity = parse_var(ENV_CAPACITY, &capacity)?;
        }
        if let Some(seed) = lookup(ENV_MLFQ_SEED) {
            config.mlfq_seed = Some(parse_var(ENV_MLFQ_SEED, &seed)?);
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> SchedulerResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| SchedulerError::InvalidConfig(format!("{}={:?} is not a number", key, value)))
}
