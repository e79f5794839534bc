/*!
 * Core Module
 * Fundamental scheduler types, limits, containers and error handling
 */

pub mod data_structures;
pub mod errors;
pub mod limits;
pub mod types;

// Re-export for convenience
pub use errors::*;
pub use types::*;
