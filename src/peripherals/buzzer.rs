//! Buzzer tone sequence.
//!
//! Normal mode: one 1 kHz beep, a pause, ten quick 500 Hz pips and two
//! long 800 Hz pulses, 12 s in total.  Night mode: a 400 Hz tone for 2 s
//! followed by 2 s of silence.

use crate::app::ports::TonePort;
use crate::config::{NIGHT_PHASE_MS, RigConfig};
use crate::mode::{Mode, ModeState};
use crate::sequencer::{ModeTables, Phase, PhaseActuator, PhaseSequencer, TickPolicy};

use super::{Peripheral, PeripheralTask};

/// Every phase length is a multiple of this, so any tick that divides it
/// lands exactly on phase boundaries.
pub const PULSE_GRID_MS: u32 = 100;

const BEEP_HZ: u32 = 1_000;
const PIP_HZ: u32 = 500;
const PULSE_HZ: u32 = 800;
const NIGHT_HZ: u32 = 400;

const PIP_COUNT: usize = 10;
const PULSE_COUNT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Hz(u32),
    Silent,
}

const NORMAL_LEN: usize = 2 + 2 * PIP_COUNT + 2 * PULSE_COUNT;

const fn normal_table() -> [Phase<Tone>; NORMAL_LEN] {
    let mut t = [Phase::new(Tone::Silent, 0); NORMAL_LEN];
    t[0] = Phase::new(Tone::Hz(BEEP_HZ), 1_000);
    t[1] = Phase::new(Tone::Silent, 3_000);
    let mut i = 0;
    while i < PIP_COUNT {
        t[2 + 2 * i] = Phase::new(Tone::Hz(PIP_HZ), 200);
        t[3 + 2 * i] = Phase::new(Tone::Silent, 200);
        i += 1;
    }
    let base = 2 + 2 * PIP_COUNT;
    let mut j = 0;
    while j < PULSE_COUNT {
        t[base + 2 * j] = Phase::new(Tone::Hz(PULSE_HZ), 500);
        t[base + 1 + 2 * j] = Phase::new(Tone::Silent, 1_500);
        j += 1;
    }
    t
}

static NORMAL: [Phase<Tone>; NORMAL_LEN] = normal_table();

static NIGHT: [Phase<Tone>; 2] = [
    Phase::new(Tone::Hz(NIGHT_HZ), NIGHT_PHASE_MS),
    Phase::new(Tone::Silent, NIGHT_PHASE_MS),
];

pub fn tables() -> ModeTables<Tone> {
    ModeTables {
        normal: &NORMAL,
        night: &NIGHT,
    }
}

pub fn policy(config: &RigConfig) -> TickPolicy {
    TickPolicy::Ticked {
        tick_ms: config.buzzer_tick_ms,
    }
}

/// Drives a [`TonePort`] from [`Tone`] actions.
pub struct Buzzer<T: TonePort> {
    port: T,
}

impl<T: TonePort> Buzzer<T> {
    /// Takes the port and silences it; the buzzer may power up sounding.
    pub fn new(mut port: T) -> Self {
        port.stop_tone();
        Self { port }
    }

    pub fn port(&self) -> &T {
        &self.port
    }
}

impl<T: TonePort> PhaseActuator for Buzzer<T> {
    type Action = Tone;

    fn enter_branch(&mut self, mode: Mode) {
        log::trace!("buzzer: {mode} branch");
    }

    fn perform(&mut self, action: Tone) {
        match action {
            Tone::Hz(frequency_hz) => self.port.play_tone(frequency_hz),
            Tone::Silent => self.port.stop_tone(),
        }
    }
}

pub fn task<'m, T: TonePort>(
    mode: &'m ModeState,
    config: &RigConfig,
    port: T,
) -> PeripheralTask<'m, Buzzer<T>> {
    let sequencer = PhaseSequencer::new(Peripheral::Buzzer, mode, tables(), policy(config));
    PeripheralTask::new(sequencer, Buzzer::new(port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct ToneLog(Vec<Option<u32>>);

    impl TonePort for ToneLog {
        fn play_tone(&mut self, frequency_hz: u32) {
            self.0.push(Some(frequency_hz));
        }
        fn stop_tone(&mut self) {
            self.0.push(None);
        }
    }

    #[test]
    fn normal_table_shape() {
        let t = tables();
        assert_eq!(t.normal.len(), 26);
        assert_eq!(t.cycle_ms(Mode::Normal), 12_000);
        assert_eq!(t.cycle_ms(Mode::Night), 4_000);
        let pips = t
            .normal
            .iter()
            .filter(|p| p.action == Tone::Hz(PIP_HZ))
            .count();
        assert_eq!(pips, PIP_COUNT);
        assert_eq!(t.normal[24], Phase::new(Tone::Hz(PULSE_HZ), 500));
        assert_eq!(t.normal[25], Phase::new(Tone::Silent, 1_500));
    }

    #[test]
    fn every_phase_is_on_the_pulse_grid() {
        let t = tables();
        assert!(
            t.normal
                .iter()
                .chain(t.night)
                .all(|p| p.duration_ms % PULSE_GRID_MS == 0)
        );
    }

    #[test]
    fn construction_silences_the_port() {
        let buzzer = Buzzer::new(ToneLog::default());
        assert_eq!(buzzer.port().0, [None]);
    }

    #[test]
    fn actions_map_to_port_calls() {
        let mut buzzer = Buzzer::new(ToneLog::default());
        buzzer.perform(Tone::Hz(400));
        buzzer.perform(Tone::Silent);
        assert_eq!(buzzer.port().0, [None, Some(400), None]);
    }
}
