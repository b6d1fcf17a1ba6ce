pub mod config;
pub mod core;
pub mod error;
pub mod message;
pub mod planner;
pub mod store;
pub mod view;

use std::sync::atomic::{AtomicBool, Ordering};

pub use error::{PlannerError, StoreError, ValidationError};
pub use planner::Planner;

/// Whether debug logging is active, shared between the logger filter and the config.
static DEBUG_LOGGING: AtomicBool = AtomicBool::new(false);

pub fn set_debug_logging(enabled: bool) {
    DEBUG_LOGGING.store(enabled, Ordering::Relaxed);
}

pub fn debug_logging() -> bool {
    DEBUG_LOGGING.load(Ordering::Relaxed)
}
