/*!
 * Configuration Tests
 * JSON documents, policy names and error reporting
 */

use ai_os_sched::scheduler::config::{ENV_CAPACITY, ENV_POLICY};
use ai_os_sched::{Cpu, SchedulerConfig, SchedulerError, SchedulingPolicy};
use pretty_assertions::assert_eq;

#[test]
fn test_policy_aliases() {
    let cases = [
        ("FIFO", SchedulingPolicy::Fcfs),
        ("rr", SchedulingPolicy::RoundRobin),
        (" Stride ", SchedulingPolicy::Stride),
        ("cfs", SchedulingPolicy::Fair),
        ("multi_queue", SchedulingPolicy::Mlfq),
    ];
    for (name, policy) in cases {
        assert_eq!(name.parse::<SchedulingPolicy>().unwrap(), policy);
    }
    assert!(matches!(
        "lottery".parse::<SchedulingPolicy>(),
        Err(SchedulerError::InvalidPolicy(_))
    ));
}

#[test]
fn test_config_json_round_trip() {
    let config = SchedulerConfig::new(SchedulingPolicy::Mlfq)
        .with_max_time_slice(3)
        .with_capacity(9)
        .with_mlfq_seed(17);
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(SchedulerConfig::from_json(&json).unwrap(), config);
}

#[test]
fn test_unseeded_config_omits_seed() {
    let json = serde_json::to_value(SchedulerConfig::default()).unwrap();
    assert!(json.get("mlfq_seed").is_none());
    assert_eq!(json["policy"], "round_robin");
}

#[test]
fn test_lookup_errors_surface_from_cpu_boot() {
    let lookup = |key: &str| match key {
        k if k == ENV_POLICY => Some("fair".to_string()),
        k if k == ENV_CAPACITY => Some("0".to_string()),
        _ => None,
    };
    let err = SchedulerConfig::from_lookup(lookup).unwrap_err();
    assert!(matches!(err, SchedulerError::InvalidConfig(_)));

    let config = SchedulerConfig {
        capacity: 0,
        ..SchedulerConfig::default()
    };
    assert!(Cpu::new(&config).is_err());
}

#[test]
fn test_oversized_capacity_is_an_error() {
    let err = SchedulerConfig::from_json(r#"{"policy":"stride","capacity":18446744073709551615}"#)
        .unwrap_err();
    assert!(matches!(err, SchedulerError::InvalidConfig(_)));

    let config = SchedulerConfig {
        capacity: usize::MAX,
        ..SchedulerConfig::default()
    };
    assert!(matches!(Cpu::new(&config), Err(SchedulerError::InvalidConfig(_))));
}

#[test]
fn test_error_serialization() {
    let json = serde_json::to_value(SchedulerError::ProcessNotFound(3)).unwrap();
    assert_eq!(json["error_type"], "process_not_found");
    assert_eq!(json["details"], 3);
    assert_eq!(
        SchedulerError::ProcessTableFull(8).to_string(),
        "Process table full: capacity 8"
    );
}
