/*!
 * Scheduler Limits and Constants
 *
 * Centralized location for scheduling constants and defaults.
 */

// =============================================================================
// STRIDE
// =============================================================================

/// Pass increment for a stride dispatch at priority 1
/// Largest positive 32-bit step; a dispatch adds `STRIDE_STEP / priority`.
/// Keeping every increment at or below `i32::MAX` keeps the signed-difference
/// comparison of wrapped strides correct.
pub const STRIDE_STEP: u32 = 0x7FFF_FFFF;

// =============================================================================
// MULTI-LEVEL FEEDBACK QUEUE
// =============================================================================

/// Number of feedback levels (level 0 is sampled most often)
pub const MAX_LEVEL: usize = 4;

// =============================================================================
// RUN QUEUE DEFAULTS
// =============================================================================

/// Default quantum in ticks
pub const DEFAULT_MAX_TIME_SLICE: u32 = 5;

/// Default number of process slots reserved per run queue
/// Membership records are sized up front so enqueue never grows a table.
pub const DEFAULT_RUN_QUEUE_CAPACITY: usize = 64;

/// Largest accepted run-queue capacity
/// Bounds the process table and every policy's up-front reservation.
pub const MAX_RUN_QUEUE_CAPACITY: usize = 1 << 16;

/// Default virtual-runtime charge per tick for the fair policy
pub const DEFAULT_FAIR_PRIORITY: i32 = 1;
