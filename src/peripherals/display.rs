//! Status display: three colour labels with a pointer column.
//!
//! ```text
//!   y=16   >    GREEN
//!   y=26   ^   AMBER
//!   y=36   ^  RED
//!   y=48  Night Mode        (night only)
//! ```
//!
//! The labels and caption are redrawn at every branch entry so a mode
//! change always leaves the screen consistent.

use crate::app::ports::TextDisplayPort;
use crate::config::{NIGHT_PHASE_MS, NORMAL_PHASE_MS, RigConfig};
use crate::mode::{Mode, ModeState};
use crate::sequencer::{ModeTables, Phase, PhaseActuator, PhaseSequencer, TickPolicy};

use super::{Peripheral, PeripheralTask};

/// `(text, x, y)` of a fixed string on screen.
pub type Placement = (&'static str, i32, i32);

pub const LABEL_GREEN: Placement = ("GREEN", 52, 16);
pub const LABEL_AMBER: Placement = ("AMBER", 44, 26);
pub const LABEL_RED: Placement = ("RED", 40, 36);
pub const LABELS: [Placement; 3] = [LABEL_GREEN, LABEL_AMBER, LABEL_RED];

pub const NIGHT_CAPTION: Placement = ("Night Mode", 16, 48);
/// Wider than the caption so it is fully erased.
pub const CAPTION_CLEAR: Placement = ("            ", 16, 48);

pub const POINTER_X: i32 = 24;
pub const POINTER_ACTIVE: &str = ">";
pub const POINTER_INACTIVE: &str = "^";

/// Which label row the pointer marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pointer {
    Green,
    Amber,
    Red,
    Hidden,
}

impl Pointer {
    /// Row index into [`LABELS`], `None` when hidden.
    pub const fn row(self) -> Option<usize> {
        match self {
            Self::Green => Some(0),
            Self::Amber => Some(1),
            Self::Red => Some(2),
            Self::Hidden => None,
        }
    }
}

static NORMAL: [Phase<Pointer>; 3] = [
    Phase::new(Pointer::Green, NORMAL_PHASE_MS),
    Phase::new(Pointer::Amber, NORMAL_PHASE_MS),
    Phase::new(Pointer::Red, NORMAL_PHASE_MS),
];

static NIGHT: [Phase<Pointer>; 2] = [
    Phase::new(Pointer::Amber, NIGHT_PHASE_MS),
    Phase::new(Pointer::Hidden, NIGHT_PHASE_MS),
];

pub fn tables() -> ModeTables<Pointer> {
    ModeTables {
        normal: &NORMAL,
        night: &NIGHT,
    }
}

pub fn policy(config: &RigConfig) -> TickPolicy {
    TickPolicy::Ticked {
        tick_ms: config.display_tick_ms,
    }
}

pub struct StatusDisplay<D: TextDisplayPort> {
    port: D,
}

impl<D: TextDisplayPort> StatusDisplay<D> {
    pub fn new(port: D) -> Self {
        Self { port }
    }

    pub fn port(&self) -> &D {
        &self.port
    }

    fn draw(&mut self, (text, x, y): Placement) {
        self.port.draw_text(text, x, y);
    }
}

impl<D: TextDisplayPort> PhaseActuator for StatusDisplay<D> {
    type Action = Pointer;

    fn enter_branch(&mut self, mode: Mode) {
        for label in LABELS {
            self.draw(label);
        }
        match mode {
            Mode::Night => self.draw(NIGHT_CAPTION),
            Mode::Normal => self.draw(CAPTION_CLEAR),
        }
    }

    fn perform(&mut self, action: Pointer) {
        let active = action.row();
        for (row, &(_, _, y)) in LABELS.iter().enumerate() {
            let glyph = if active == Some(row) {
                POINTER_ACTIVE
            } else {
                POINTER_INACTIVE
            };
            self.port.draw_text(glyph, POINTER_X, y);
        }
    }
}

pub fn task<'m, D: TextDisplayPort>(
    mode: &'m ModeState,
    config: &RigConfig,
    port: D,
) -> PeripheralTask<'m, StatusDisplay<D>> {
    let sequencer = PhaseSequencer::new(Peripheral::Display, mode, tables(), policy(config));
    PeripheralTask::new(sequencer, StatusDisplay::new(port))
}
