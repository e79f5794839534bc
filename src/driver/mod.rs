/*!
 * Scheduling Driver
 * Reference single-CPU loop that drives a scheduler the way a kernel does
 */

mod cpu;

pub use cpu::{Cpu, CpuStats};
