//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured rig events to the
//! ESP-IDF logger (which goes to UART / USB-CDC in production).
//! Phase-level events are chatty (several per second per task), so they
//! go out at `debug`/`trace`; lifecycle and mode events at `info`.

use log::{debug, info, trace};

use crate::app::events::RigEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`RigEvent`] to the serial console.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &RigEvent) {
        match event {
            RigEvent::TaskStarted { peripheral, level } => {
                info!("TASK  | {} started ({:?})", peripheral, level);
            }
            RigEvent::TaskPlaceholder { peripheral } => {
                info!("TASK  | {} not started at this feature level", peripheral);
            }
            RigEvent::SourceStarted { source } => {
                info!("BTN   | {:?} mode source active", source);
            }
            RigEvent::ModeToggled { to, at_us } => {
                info!("MODE  | -> {} (t={} us)", to, at_us);
            }
            RigEvent::BranchEntered { peripheral, mode } => {
                debug!("CYCLE | {} {}", peripheral, mode);
            }
            RigEvent::PhaseEntered {
                peripheral,
                mode,
                index,
            } => {
                trace!("PHASE | {} {} #{}", peripheral, mode, index);
            }
            RigEvent::PhaseAborted {
                peripheral,
                mode,
                index,
                elapsed_ms,
            } => {
                info!(
                    "ABORT | {} {} phase #{} after {} ms",
                    peripheral, mode, index, elapsed_ms
                );
            }
            RigEvent::CycleCompleted { peripheral, mode } => {
                trace!("DONE  | {} {}", peripheral, mode);
            }
        }
    }
}
