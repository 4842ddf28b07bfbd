//! Duration string parsing module
//!
//! This module turns free-form user input like "1h 2m 3s" into total seconds.

pub mod duration;

// Re-export main functions
pub use duration::parse_duration;
