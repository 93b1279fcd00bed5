//! Background tasks module
//! 
//! This module contains the tasks spawned for running timers.

pub mod countdown_poll;

// Re-export main functions
pub use countdown_poll::countdown_poll_task;
