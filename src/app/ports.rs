//! Port traits: the boundary between the sequencing core and hardware.
//!
//! ```text
//!   Adapter / driver ──▶ Port trait ──▶ peripheral task (domain)
//! ```
//!
//! Each peripheral task owns exactly one output port; the mode sources
//! own a [`ButtonPort`] and a [`ClockPort`].  Ports are infallible from
//! the caller's point of view: implementations that can fail log the
//! failure and carry on, because a phase action has nothing to retry.
//!
//! Sleeping is not a port here. Tasks take any
//! [`embedded_hal::delay::DelayNs`], which the FreeRTOS delay, a
//! `std::thread::sleep` wrapper and the test clock all implement.

// ───────────────────────────────────────────────────────────────
// Output ports (domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Two-lamp pedestrian signal head.
pub trait SignalPort {
    /// Drive both lamps at once.
    fn set_lamps(&mut self, green: bool, red: bool);
}

/// Number of real cells in the indicator array.
pub const LED_ARRAY_CELLS: u8 = 4;
/// Pseudo-cell index meaning "nothing lit".
pub const LED_ARRAY_ALL_OFF: u8 = LED_ARRAY_CELLS;

/// Addressable indicator array where exactly one cell is lit at a time.
pub trait LedArrayPort {
    /// Light cell `index` with the given intensities and turn every
    /// other cell off.  `index == LED_ARRAY_ALL_OFF` (or any index past
    /// the last cell) turns the whole array off.
    fn set_one_led(&mut self, index: u8, r: u8, g: u8, b: u8);
}

/// Continuous-tone buzzer.  Both calls are idempotent.
pub trait TonePort {
    fn play_tone(&mut self, frequency_hz: u32);
    fn stop_tone(&mut self);
}

/// Character display.  Text overwrites whatever was at `(x, y)`; callers
/// clear text they no longer want by drawing spaces over it.
pub trait TextDisplayPort {
    fn draw_text(&mut self, text: &str, x: i32, y: i32);
}

// ───────────────────────────────────────────────────────────────
// Input ports (hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Level read of the mode button.
pub trait ButtonPort {
    /// `true` while the button is held down.
    fn is_pressed(&mut self) -> bool;
}

/// Monotonic microsecond clock, truncated to 32 bits (wraps).
pub trait ClockPort {
    fn now_us(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Event sink (domain → logging / test recorder)
// ───────────────────────────────────────────────────────────────

/// Tasks emit structured [`RigEvent`](super::events::RigEvent)s here.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::RigEvent);
}
