//! Controller-specific error types.
//!
//! This module defines error types specific to the storage watch controller
//! that are not covered by the decoding library.

use thiserror::Error;
use watch_events::WatchError;

/// Errors that can occur in the storage watch controller.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Watch feed could not be decoded
    #[error("Watch decoding failed: {0}")]
    Watch(#[from] WatchError),

    /// Watch input could not be opened
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A watch task panicked or was cancelled
    #[error("Watch task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
