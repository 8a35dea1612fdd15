//! Rig configuration.
//!
//! Everything here is fixed at build time: pin numbers live in
//! [`crate::pins`], phase durations and tick sizes are the constants
//! below, and [`RigConfig`] only records which build variant is running.
//! Nothing is loaded from flash and nothing changes at runtime.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// --- Mode button ---
/// Minimum spacing between two accepted button edges (µs).
pub const DEBOUNCE_WINDOW_US: u32 = 300_000;
/// Polling period of the polling mode source (ms).
pub const BUTTON_POLL_INTERVAL_MS: u32 = 10;

// --- Phase durations (full feature level) ---
/// Length of each normal-mode phase (green, green+red, red) in ms.
pub const NORMAL_PHASE_MS: u32 = 4_000;
/// Length of each night-mode blink half-period in ms.
pub const NIGHT_PHASE_MS: u32 = 2_000;

// --- Phase durations (reduced feature level) ---
/// Single-delay normal-mode phase length in the reduced variant (ms).
pub const REDUCED_NORMAL_PHASE_MS: u32 = 1_000;
/// Single-delay night-mode phase length in the reduced variant (ms).
pub const REDUCED_NIGHT_PHASE_MS: u32 = 1_500;

// --- Tick sizes ---
pub const LIGHT_TICK_MS: u32 = 500;
pub const LED_ARRAY_TICK_MS: u32 = 500;
pub const BUZZER_TICK_MS: u32 = 100;
pub const DISPLAY_TICK_MS: u32 = 100;

// --- Tasks ---
/// FreeRTOS priority shared by every rig task (just above idle).
pub const TASK_PRIORITY: u8 = 1;
/// Stack size for each rig task (KB).
pub const TASK_STACK_KB: usize = 4;

/// How the mode button is observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonSource {
    /// A task samples the pin level every [`BUTTON_POLL_INTERVAL_MS`].
    Polling,
    /// A GPIO falling-edge interrupt runs the debounce in ISR context.
    Interrupt,
}

/// Which peripheral behaviour the build ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureLevel {
    /// All four peripheral tasks, sub-ticked phase waits.
    Full,
    /// Light and LED array with one coarse delay per phase; buzzer and
    /// display are placeholders that are never started.
    Reduced,
}

/// Build-variant description handed to [`crate::app::rig::Rig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigConfig {
    pub button_source: ButtonSource,
    pub feature_level: FeatureLevel,
    pub debounce_window_us: u32,
    pub button_poll_interval_ms: u32,
    pub light_tick_ms: u32,
    pub led_array_tick_ms: u32,
    pub buzzer_tick_ms: u32,
    pub display_tick_ms: u32,
    pub task_priority: u8,
    pub task_stack_kb: usize,
}

impl Default for RigConfig {
    /// Variant selected by the `interrupt-button` cargo feature.
    fn default() -> Self {
        if cfg!(feature = "interrupt-button") {
            Self::interrupt()
        } else {
            Self::polling()
        }
    }
}

impl RigConfig {
    /// Polling button, full peripheral set.
    pub const fn polling() -> Self {
        Self {
            button_source: ButtonSource::Polling,
            feature_level: FeatureLevel::Full,
            debounce_window_us: DEBOUNCE_WINDOW_US,
            button_poll_interval_ms: BUTTON_POLL_INTERVAL_MS,
            light_tick_ms: LIGHT_TICK_MS,
            led_array_tick_ms: LED_ARRAY_TICK_MS,
            buzzer_tick_ms: BUZZER_TICK_MS,
            display_tick_ms: DISPLAY_TICK_MS,
            task_priority: TASK_PRIORITY,
            task_stack_kb: TASK_STACK_KB,
        }
    }

    /// Interrupt button, reduced peripheral set.
    pub const fn interrupt() -> Self {
        Self {
            button_source: ButtonSource::Interrupt,
            feature_level: FeatureLevel::Reduced,
            ..Self::polling()
        }
    }

    /// Reject combinations the sequencers cannot honour.
    ///
    /// Tick sizes must be non-zero and divide every full-level phase
    /// duration, otherwise phases would overrun by a partial tick.
    pub fn validate(&self) -> Result<()> {
        if self.debounce_window_us == 0 {
            return Err(Error::Config("debounce window must be non-zero"));
        }
        if self.button_poll_interval_ms == 0 {
            return Err(Error::Config("button poll interval must be non-zero"));
        }
        if self.task_stack_kb == 0 {
            return Err(Error::Config("task stack must be non-zero"));
        }

        let ticks = [
            self.light_tick_ms,
            self.led_array_tick_ms,
            self.buzzer_tick_ms,
            self.display_tick_ms,
        ];
        if ticks.contains(&0) {
            return Err(Error::Config("tick sizes must be non-zero"));
        }

        if NORMAL_PHASE_MS % self.light_tick_ms != 0 || NIGHT_PHASE_MS % self.light_tick_ms != 0 {
            return Err(Error::Config("light tick must divide phase durations"));
        }
        if NORMAL_PHASE_MS % self.led_array_tick_ms != 0
            || NIGHT_PHASE_MS % self.led_array_tick_ms != 0
        {
            return Err(Error::Config("LED array tick must divide phase durations"));
        }
        if crate::peripherals::buzzer::PULSE_GRID_MS % self.buzzer_tick_ms != 0 {
            return Err(Error::Config("buzzer tick must divide pulse durations"));
        }
        if NORMAL_PHASE_MS % self.display_tick_ms != 0 || NIGHT_PHASE_MS % self.display_tick_ms != 0
        {
            return Err(Error::Config("display tick must divide phase durations"));
        }

        Ok(())
    }
}
