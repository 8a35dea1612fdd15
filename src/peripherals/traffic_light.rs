//! Pedestrian signal head: green and red lamps.
//!
//! Normal mode walks green → green+red → red → off; night mode blinks
//! both lamps together.  At the reduced feature level each phase is a
//! single coarse delay of 1000 ms (normal) or 1500 ms (night).

use crate::app::ports::SignalPort;
use crate::config::{
    FeatureLevel, NIGHT_PHASE_MS, NORMAL_PHASE_MS, REDUCED_NIGHT_PHASE_MS, REDUCED_NORMAL_PHASE_MS,
    RigConfig,
};
use crate::mode::ModeState;
use crate::sequencer::{ModeTables, Phase, PhaseActuator, PhaseSequencer, TickPolicy};

use super::{Peripheral, PeripheralTask};

/// Lamp combination shown during a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lamps {
    GreenOnly,
    GreenAndRed,
    RedOnly,
    Both,
    Off,
}

impl Lamps {
    /// `(green, red)` output levels.
    pub const fn levels(self) -> (bool, bool) {
        match self {
            Self::GreenOnly => (true, false),
            Self::GreenAndRed | Self::Both => (true, true),
            Self::RedOnly => (false, true),
            Self::Off => (false, false),
        }
    }
}

static NORMAL: [Phase<Lamps>; 4] = [
    Phase::new(Lamps::GreenOnly, NORMAL_PHASE_MS),
    Phase::new(Lamps::GreenAndRed, NORMAL_PHASE_MS),
    Phase::new(Lamps::RedOnly, NORMAL_PHASE_MS),
    // End-of-cycle reset; the next cycle's first phase follows at once.
    Phase::new(Lamps::Off, 0),
];

static NIGHT: [Phase<Lamps>; 2] = [
    Phase::new(Lamps::Both, NIGHT_PHASE_MS),
    Phase::new(Lamps::Off, NIGHT_PHASE_MS),
];

static REDUCED_NORMAL: [Phase<Lamps>; 4] = [
    Phase::new(Lamps::GreenOnly, REDUCED_NORMAL_PHASE_MS),
    Phase::new(Lamps::GreenAndRed, REDUCED_NORMAL_PHASE_MS),
    Phase::new(Lamps::RedOnly, REDUCED_NORMAL_PHASE_MS),
    Phase::new(Lamps::Off, 0),
];

static REDUCED_NIGHT: [Phase<Lamps>; 2] = [
    Phase::new(Lamps::Both, REDUCED_NIGHT_PHASE_MS),
    Phase::new(Lamps::Off, REDUCED_NIGHT_PHASE_MS),
];

pub fn tables(level: FeatureLevel) -> ModeTables<Lamps> {
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
            tick_ms: config.light_tick_ms,
        },
        FeatureLevel::Reduced => TickPolicy::Coarse,
    }
}

/// Applies [`Lamps`] to a [`SignalPort`].
pub struct TrafficLight<S: SignalPort> {
    port: S,
}

impl<S: SignalPort> TrafficLight<S> {
    pub fn new(port: S) -> Self {
        Self { port }
    }

    pub fn port(&self) -> &S {
        &self.port
    }
}

impl<S: SignalPort> PhaseActuator for TrafficLight<S> {
    type Action = Lamps;

    fn perform(&mut self, action: Lamps) {
        let (green, red) = action.levels();
        self.port.set_lamps(green, red);
    }
}

/// Build the traffic light task for `config`.
pub fn task<'m, S: SignalPort>(
    mode: &'m ModeState,
    config: &RigConfig,
    port: S,
) -> PeripheralTask<'m, TrafficLight<S>> {
    let sequencer = PhaseSequencer::new(
        Peripheral::TrafficLight,
        mode,
        tables(config.feature_level),
        policy(config),
    );
    PeripheralTask::new(sequencer, TrafficLight::new(port))
}
