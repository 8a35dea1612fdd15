//! The four peripheral tasks of the rig.
//!
//! Each submodule supplies the peripheral-specific half of a
//! [`PhaseSequencer`]: an action type, the normal/night phase tables and
//! a [`PhaseActuator`] that turns actions into port calls.  This module
//! bundles the two into a [`PeripheralTask`] that a thread can own.
//!
//! | Peripheral    | Tick   | Normal cycle             | Night cycle        |
//! |---------------|--------|--------------------------|--------------------|
//! | Traffic light | 500 ms | G → G+R → R → off, 12 s  | both on/off, 2+2 s |
//! | LED array     | 500 ms | green → amber → red, 12 s| amber on/off, 2+2 s|
//! | Buzzer        | 100 ms | beep, pause, pips, pulses| 400 Hz on/off 2+2 s|
//! | Display       | 100 ms | pointer G → A → R, 12 s  | amber pointer blink|

pub mod buzzer;
pub mod display;
pub mod led_array;
pub mod traffic_light;

use core::fmt;

use embedded_hal::delay::DelayNs;
use serde::{Deserialize, Serialize};

use crate::app::ports::EventSink;
use crate::config::FeatureLevel;
use crate::sequencer::{PhaseActuator, PhaseOutcome, PhaseSequencer};

/// Identity of a peripheral task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Peripheral {
    TrafficLight,
    LedArray,
    Buzzer,
    Display,
}

impl Peripheral {
    pub const ALL: [Self; 4] = [Self::TrafficLight, Self::LedArray, Self::Buzzer, Self::Display];

    pub const fn name(self) -> &'static str {
        match self {
            Self::TrafficLight => "traffic-light",
            Self::LedArray => "led-array",
            Self::Buzzer => "buzzer",
            Self::Display => "display",
        }
    }

    /// Null-terminated thread name for [`crate::drivers::task_pin::spawn_on_core`].
    pub const fn task_name(self) -> &'static str {
        match self {
            Self::TrafficLight => "traffic-light\0",
            Self::LedArray => "led-array\0",
            Self::Buzzer => "buzzer\0",
            Self::Display => "display\0",
        }
    }

    /// Whether this peripheral runs at all at `level`.
    ///
    /// The reduced level keeps the light and the LED array; buzzer and
    /// display stay silent/blank placeholders.
    pub const fn runs_at(self, level: FeatureLevel) -> bool {
        match level {
            FeatureLevel::Full => true,
            FeatureLevel::Reduced => matches!(self, Self::TrafficLight | Self::LedArray),
        }
    }
}

impl fmt::Display for Peripheral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A peripheral's actuator together with the sequencer driving it.
pub struct PeripheralTask<'m, P: PhaseActuator> {
    sequencer: PhaseSequencer<'m, P::Action>,
    actuator: P,
}

impl<'m, P: PhaseActuator> PeripheralTask<'m, P> {
    pub fn new(sequencer: PhaseSequencer<'m, P::Action>, actuator: P) -> Self {
        Self {
            sequencer,
            actuator,
        }
    }

    pub fn peripheral(&self) -> Peripheral {
        self.sequencer.peripheral()
    }

    pub fn sequencer(&self) -> &PhaseSequencer<'m, P::Action> {
        &self.sequencer
    }

    pub fn actuator(&self) -> &P {
        &self.actuator
    }

    /// One pass over the branch selected by the current mode.
    pub fn run_cycle<D: DelayNs, S: EventSink>(&mut self, delay: &mut D, sink: &mut S) -> PhaseOutcome {
        self.sequencer.run_cycle(&mut self.actuator, delay, sink)
    }

    /// Task body: cycle until power loss.
    pub fn run_forever<D: DelayNs, S: EventSink>(mut self, delay: &mut D, sink: &mut S) -> ! {
        self.sequencer.run_forever(&mut self.actuator, delay, sink)
    }
}
