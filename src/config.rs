//! Configuration and CLI argument handling

use clap::Parser;

use crate::state::{TimerConfig, TimerId};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown-service")]
#[command(about = "A countdown timer service that broadcasts remaining time to subscribers")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Length of the default countdown in seconds
    #[arg(short, long, default_value = "3360")]
    pub duration: u64,

    /// Length of the confirmation countdown in seconds
    #[arg(long, default_value = "30")]
    pub confirm_duration: u64,

    /// Register timers without starting the default countdown
    #[arg(long)]
    pub no_autostart: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Timer configurations to register at startup
    pub fn timer_configs(&self) -> Vec<TimerConfig> {
        vec![
            TimerConfig::new(TimerId::Default, self.duration),
            TimerConfig::new(TimerId::Confirm, self.confirm_duration),
        ]
    }
}
