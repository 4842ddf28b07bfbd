//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod alarm_trigger;

// Re-export main functions
pub use alarm_trigger::alarm_trigger_task;
