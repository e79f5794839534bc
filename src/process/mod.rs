/*!
 * Process Module
 * Process descriptors and the table that owns them
 */

pub mod table;
pub mod types;

// Re-export for convenience
pub use table::ProcessTable;
pub use types::{Process, SchedParams};
