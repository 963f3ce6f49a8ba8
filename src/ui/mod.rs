//! User interface module - terminal output and diagnostics setup.
//!
//! - `formatter` - Pure formatting functions
//! - This module - logger initialisation

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_report, display_status, display_success, display_usage,
    display_warning, format_usage,
};

/// Default `log` filter for a `-v` count: warn, info, then debug.
pub fn log_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Initialise `env_logger`. `RUST_LOG` overrides the verbosity flag.
pub fn init_logging(verbosity: u8) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_filter(verbosity)))
        .format_timestamp(None)
        .init();
}
