//! Indicator LED array mirroring the signal head.
//!
//! Only one cell is ever lit: green in cell 0, amber in cell 1, red in
//! cell 2.  Night mode blinks amber.

use crate::app::ports::{LED_ARRAY_ALL_OFF, LedArrayPort};
use crate::config::{
    FeatureLevel, NIGHT_PHASE_MS, NORMAL_PHASE_MS, REDUCED_NIGHT_PHASE_MS, REDUCED_NORMAL_PHASE_MS,
    RigConfig,
};
use crate::mode::ModeState;
use crate::sequencer::{ModeTables, Phase, PhaseActuator, PhaseSequencer, TickPolicy};

use super::{Peripheral, PeripheralTask};

/// Colour as (R, G, B), each 0–255.
pub type Rgb = (u8, u8, u8);

pub const COLOUR_GREEN: Rgb = (0, 20, 0);
pub const COLOUR_AMBER: Rgb = (20, 20, 0);
pub const COLOUR_RED: Rgb = (20, 0, 0);

/// What the array shows during a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Green,
    Amber,
    Red,
    Off,
}

impl Indicator {
    /// Cell index and colour for `set_one_led`.
    pub const fn cell(self) -> (u8, Rgb) {
        match self {
            Self::Green => (0, COLOUR_GREEN),
            Self::Amber => (1, COLOUR_AMBER),
            Self::Red => (2, COLOUR_RED),
            Self::Off => (LED_ARRAY_ALL_OFF, (0, 0, 0)),
        }
    }
}

static NORMAL: [Phase<Indicator>; 3] = [
    Phase::new(Indicator::Green, NORMAL_PHASE_MS),
    Phase::new(Indicator::Amber, NORMAL_PHASE_MS),
    Phase::new(Indicator::Red, NORMAL_PHASE_MS),
];

static NIGHT: [Phase<Indicator>; 2] = [
    Phase::new(Indicator::Amber, NIGHT_PHASE_MS),
    Phase::new(Indicator::Off, NIGHT_PHASE_MS),
];

static REDUCED_NORMAL: [Phase<Indicator>; 3] = [
    Phase::new(Indicator::Green, REDUCED_NORMAL_PHASE_MS),
    Phase::new(Indicator::Amber, REDUCED_NORMAL_PHASE_MS),
    Phase::new(Indicator::Red, REDUCED_NORMAL_PHASE_MS),
];

static REDUCED_NIGHT: [Phase<Indicator>; 2] = [
    Phase::new(Indicator::Amber, REDUCED_NIGHT_PHASE_MS),
    Phase::new(Indicator::Off, REDUCED_NIGHT_PHASE_MS),
];

pub fn tables(level: FeatureLevel) -> ModeTables<Indicator> {
    match level {
        FeatureLevel::Full => ModeTables {
            normal: &NORMAL,
            night: &NIGHT,
        },
        FeatureLevel::Reduced => ModeTables {
            normal: &REDUCED_NORMAL,
            night: &REDUCED_NIGHT,
        },
    }
}

pub fn policy(config: &RigConfig) -> TickPolicy {
    match config.feature_level {
        FeatureLevel::Full => TickPolicy::Ticked {
            tick_ms: config.led_array_tick_ms,
        },
        FeatureLevel::Reduced => TickPolicy::Coarse,
    }
}

pub struct LedArray<L: LedArrayPort> {
    port: L,
}

impl<L: LedArrayPort> LedArray<L> {
    pub fn new(port: L) -> Self {
        Self { port }
    }

    pub fn port(&self) -> &L {
        &self.port
    }
}

impl<L: LedArrayPort> PhaseActuator for LedArray<L> {
    type Action = Indicator;

    fn perform(&mut self, action: Indicator) {
        let (index, (r, g, b)) = action.cell();
        self.port.set_one_led(index, r, g, b);
    }
}

pub fn task<'m, L: LedArrayPort>(
    mode: &'m ModeState,
    config: &RigConfig,
    port: L,
) -> PeripheralTask<'m, LedArray<L>> {
    let sequencer = PhaseSequencer::new(
        Peripheral::LedArray,
        mode,
        tables(config.feature_level),
        policy(config),
    );
    PeripheralTask::new(sequencer, LedArray::new(port))
}
