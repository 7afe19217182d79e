//! Caller-contract errors
//!
//! Losing a run is not an error. These only fire when the host drives the
//! engine out of order.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Placement or interrupt requested before the first activation
    #[error("engine has not been activated")]
    NotActivated,
    /// `activate` called while a session is still running
    #[error("a session is already running")]
    AlreadyRunning,
}
