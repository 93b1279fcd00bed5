//! Utility functions module
//! 
//! This module contains utility functions used throughout the application.

pub mod signals;
pub mod stream;

// Re-export main functions
pub use signals::shutdown_signal;
pub use stream::watch_stream;
