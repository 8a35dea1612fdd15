//! Outbound rig events.
//!
//! Peripheral tasks and mode sources emit these through the
//! [`EventSink`](super::ports::EventSink) port.  On the device they go to
//! the serial log; in tests a recorder timestamps them against the
//! simulated clock.

use crate::config::{ButtonSource, FeatureLevel};
use crate::mode::Mode;
use crate::peripherals::Peripheral;

/// Structured events emitted by the rig.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RigEvent {
    /// A peripheral task started running.
    TaskStarted {
        peripheral: Peripheral,
        level: FeatureLevel,
    },

    /// A peripheral is compiled out at this feature level.
    TaskPlaceholder { peripheral: Peripheral },

    /// The mode source began delivering toggles.
    SourceStarted { source: ButtonSource },

    /// A debounced press flipped the shared mode.
    ModeToggled { to: Mode, at_us: u32 },

    /// A peripheral read the mode at the top of its loop.
    BranchEntered { peripheral: Peripheral, mode: Mode },

    /// A phase's action was applied.
    PhaseEntered {
        peripheral: Peripheral,
        mode: Mode,
        index: usize,
    },

    /// A mode change cut a phase short.
    PhaseAborted {
        peripheral: Peripheral,
        mode: Mode,
        index: usize,
        elapsed_ms: u32,
    },

    /// Every phase of the branch ran to completion.
    CycleCompleted { peripheral: Peripheral, mode: Mode },
}
