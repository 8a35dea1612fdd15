//! Shared operating mode.
//!
//! The rig has exactly one piece of cross-task state: whether it is in
//! night mode.  The active mode source writes it; every peripheral task
//! reads it once per tick.  A single `AtomicBool` with relaxed ordering
//! is enough. Readers tolerate seeing a flip up to one tick late, and
//! there is no other data whose visibility must be ordered against it.
//!
//! ```text
//!  ModeSource ──toggle()──▶ ┌───────────┐ ──get()──▶ traffic light
//!  (poll task or ISR)       │ ModeState │ ──get()──▶ LED array
//!                           │ AtomicBool│ ──get()──▶ buzzer
//!                           └───────────┘ ──get()──▶ display
//! ```

use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

/// Process-wide mode flag.  Normal mode at boot, never torn down.
pub static MODE: ModeState = ModeState::new();

/// Operating mode of the whole rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Normal,
    Night,
}

impl Mode {
    pub const fn from_night(night: bool) -> Self {
        if night { Self::Night } else { Self::Normal }
    }

    pub const fn is_night(self) -> bool {
        matches!(self, Self::Night)
    }

    /// The other mode.
    pub const fn flipped(self) -> Self {
        match self {
            Self::Normal => Self::Night,
            Self::Night => Self::Normal,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Night => write!(f, "night"),
        }
    }
}

/// Lock-free holder for the current [`Mode`].
pub struct ModeState {
    night: AtomicBool,
}

impl Default for ModeState {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeState {
    pub const fn new() -> Self {
        Self {
            night: AtomicBool::new(false),
        }
    }

    pub fn get(&self) -> Mode {
        Mode::from_night(self.night.load(Ordering::Relaxed))
    }

    pub fn is_night(&self) -> bool {
        self.night.load(Ordering::Relaxed)
    }

    pub fn set(&self, mode: Mode) {
        self.night.store(mode.is_night(), Ordering::Relaxed);
    }

    /// Flip the mode and return the new value.
    ///
    /// Safe from interrupt context: a single atomic RMW, no blocking.
    pub fn toggle(&self) -> Mode {
        let was_night = self.night.fetch_xor(true, Ordering::Relaxed);
        Mode::from_night(!was_night)
    }
}
