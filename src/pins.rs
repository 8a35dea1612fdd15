//! GPIO / peripheral pin assignments for the crossing rig board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Mode button (active-low, internal pull-up)
// ---------------------------------------------------------------------------

/// Momentary push-button toggling normal/night mode.
pub const BUTTON_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Pedestrian signal head
// ---------------------------------------------------------------------------

pub const LAMP_GREEN_GPIO: i32 = 11;
pub const LAMP_RED_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// Indicator LED array
// ---------------------------------------------------------------------------
//
// All cells share one RGB colour bus driven by three LEDC channels; a
// per-cell enable line selects which cell is lit.

pub const LED_ARRAY_R_GPIO: i32 = 7;
pub const LED_ARRAY_G_GPIO: i32 = 8;
pub const LED_ARRAY_B_GPIO: i32 = 9;

/// Cell enable lines, index 0..=3.  Active HIGH.
pub const LED_ARRAY_CELL_GPIOS: [i32; 4] = [14, 15, 16, 17];

// ---------------------------------------------------------------------------
// Buzzer (passive piezo on an LEDC channel)
// ---------------------------------------------------------------------------

pub const BUZZER_GPIO: i32 = 21;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC frequency for the LED array colour bus (1 kHz).
pub const LED_PWM_FREQ_HZ: u32 = 1_000;
/// Initial LEDC frequency for the buzzer timer; retuned per tone.
pub const BUZZER_BASE_FREQ_HZ: u32 = 1_000;
