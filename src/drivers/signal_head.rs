//! Two-lamp pedestrian signal head.
//!
//! Each lamp hangs off its own output pin, driven active-high.  Generic
//! over `embedded-hal` output pins so the host tests can use recording
//! pins; on the device both are [`super::gpio::GpioOutput`].

use embedded_hal::digital::{OutputPin, PinState};

use crate::app::ports::SignalPort;

pub struct SignalHead<G: OutputPin, R: OutputPin> {
    green: G,
    red: R,
    lamps: (bool, bool),
}

impl<G: OutputPin, R: OutputPin> SignalHead<G, R> {
    pub fn new(green: G, red: R) -> Self {
        let mut head = Self {
            green,
            red,
            lamps: (false, false),
        };
        head.set_lamps(false, false);
        head
    }

    /// Last `(green, red)` levels written.
    pub fn lamps(&self) -> (bool, bool) {
        self.lamps
    }
}

impl<G: OutputPin, R: OutputPin> SignalPort for SignalHead<G, R> {
    fn set_lamps(&mut self, green: bool, red: bool) {
        let green_ok = self.green.set_state(PinState::from(green)).is_ok();
        let red_ok = self.red.set_state(PinState::from(red)).is_ok();
        if !(green_ok && red_ok) {
            log::warn!("signal head: lamp write failed (green={green}, red={red})");
        }
        self.lamps = (green, red);
    }
}
