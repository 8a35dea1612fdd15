//! Passive piezo buzzer on a LEDC channel.
//!
//! A tone is a 50 % square wave at the requested frequency: the buzzer
//! timer is retuned and the channel duty set to half scale.  Silence is
//! duty 0.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: retunes LEDC timer 1 and writes CH3 duty via hw_init.
//! On host/test: tracks state in-memory only.

use log::warn;

use crate::app::ports::TonePort;
use crate::drivers::hw_init;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzerState {
    Silent,
    Sounding { frequency_hz: u32 },
}

pub struct PwmBuzzer {
    state: BuzzerState,
}

impl Default for PwmBuzzer {
    fn default() -> Self {
        Self::new()
    }
}

impl PwmBuzzer {
    pub fn new() -> Self {
        Self {
            state: BuzzerState::Silent,
        }
    }

    pub fn state(&self) -> BuzzerState {
        self.state
    }
}

impl TonePort for PwmBuzzer {
    fn play_tone(&mut self, frequency_hz: u32) {
        if frequency_hz == 0 {
            self.stop_tone();
            return;
        }
        if self.state == (BuzzerState::Sounding { frequency_hz }) {
            return;
        }
        if let Err(rc) = hw_init::ledc_tone(frequency_hz) {
            warn!("buzzer: cannot tune to {frequency_hz} Hz (rc={rc}), staying silent");
            self.stop_tone();
            return;
        }
        hw_init::ledc_set(hw_init::LEDC_CH_BUZZER, hw_init::BUZZER_DUTY);
        self.state = BuzzerState::Sounding { frequency_hz };
    }

    fn stop_tone(&mut self) {
        hw_init::ledc_set(hw_init::LEDC_CH_BUZZER, 0);
        self.state = BuzzerState::Silent;
    }
}
