/*!
 * Scheduler Simulator - Main Entry Point
 *
 * Boots one CPU with the policy from the environment, runs a synthetic
 * workload for a fixed number of timer ticks and prints a JSON report.
 */

use ai_os_sched::monitoring::init_tracing;
use ai_os_sched::{Cpu, CpuStats, Pid, SchedParams, SchedulerConfig, SchedulerError};
use miette::IntoDiagnostic;
use serde::Serialize;
use tracing::info;

const ENV_PROCS: &str = "SCHED_SIM_PROCS";
const ENV_TICKS: &str = "SCHED_SIM_TICKS";
const DEFAULT_PROCS: u32 = 4;
const DEFAULT_TICKS: u64 = 1000;
/// Process 0 sleeps every this many ticks and wakes on the next one
const BLOCK_PERIOD: u64 = 50;

#[derive(Serialize)]
struct ProcessReport {
    pid: Pid,
    name: String,
    priority: u32,
    fair_priority: i32,
    level: usize,
    runs: u64,
}

#[derive(Serialize)]
struct Report {
    config: SchedulerConfig,
    cpu: CpuStats,
    processes: Vec<ProcessReport>,
}

fn env_number<T: std::str::FromStr>(key: &str, default: T) -> Result<T, SchedulerError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| SchedulerError::InvalidConfig(format!("{key}={raw} is not a number"))),
        Err(_) => Ok(default),
    }
}

fn main() -> miette::Result<()> {
    init_tracing();

    let config = SchedulerConfig::from_env()?;
    let procs: u32 = env_number(ENV_PROCS, DEFAULT_PROCS)?;
    let ticks: u64 = env_number(ENV_TICKS, DEFAULT_TICKS)?;

    info!(policy = %config.policy, procs, ticks, "simulation starting");

    let mut cpu = Cpu::new(&config)?;
    let mut pids = Vec::with_capacity(procs as usize);
    for weight in 1..=procs {
        let params = SchedParams::new(format!("worker-{weight}"))
            .with_priority(weight)
            .with_fair_priority(weight as i32);
        pids.push(cpu.spawn(params)?);
    }

    let sleeper = pids.first().copied();
    let mut sleeping = false;
    cpu.schedule();

    for tick in 1..=ticks {
        if let Some(pid) = sleeper {
            if sleeping {
                cpu.wakeup(pid)?;
                sleeping = false;
            } else if tick % BLOCK_PERIOD == 0 && cpu.current() == Some(pid) {
                cpu.block_current();
                sleeping = true;
                continue;
            }
        }
        cpu.timer_tick();
    }

    let report = Report {
        config,
        cpu: cpu.stats(),
        processes: cpu
            .processes()
            .iter()
            .map(|proc| ProcessReport {
                pid: proc.pid,
                name: proc.name.clone(),
                priority: proc.priority,
                fair_priority: proc.fair_priority,
                level: proc.level,
                runs: proc.runs,
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
    info!(context_switches = report.cpu.context_switches, "simulation finished");
    Ok(())
}
