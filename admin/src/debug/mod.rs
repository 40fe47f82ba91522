//! # Debugging and Tracing Infrastructure
//!
//! - **File-based logging**: structured logs to `logs/partner-admin.log` (daily rotation)
//! - **Async task tracking**: container loads and context bindings run through
//!   [`spawn_tracked`] so hung tasks show up in the log
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: log level filter (e.g., `partner_admin=debug,info`)
//! - `ADMIN_LOG_DIR`: log directory (default: `logs`)
//! - `ADMIN_LOG_JSON`: write JSON lines to the log file (1=on)
//! - `ADMIN_LOG_STDERR`: mirror logs to stderr (default on)

pub mod config;
pub mod logger;
pub mod task_tracker;

pub use config::DebugConfig;
pub use logger::init as init_logger;
pub use task_tracker::{active_task_count, spawn_tracked};

/// Initialize the debugging system. Call once at startup.
pub fn init() {
    init_logger();
}
