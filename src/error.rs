//! Error types for rig bring-up.
//!
//! The running rig has no recoverable errors: phase actions are
//! fire-and-forget hardware writes and the only waits are fixed sleeps.
//! What can fail is getting there: peripheral init, task creation or an
//! inconsistent build configuration.  Those funnel into [`Error`].

use core::fmt;

use crate::drivers::hw_init::HwInitError;

/// Every fallible bring-up step funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed.
    Init(HwInitError),
    /// A rig task could not be spawned (carries the task name).
    Spawn(&'static str),
    /// The build configuration is inconsistent.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Spawn(task) => write!(f, "spawn: task '{task}' could not be created"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
