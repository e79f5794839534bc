/*!
 * Monitoring
 * Log subscriber setup shared by the library tests and the simulator
 */

pub mod tracer;

pub use tracer::{init_tracing, init_tracing_with, TraceFormat, ENV_TRACE_JSON};
