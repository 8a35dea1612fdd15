//! Mode button level reader.
//!
//! ## Hardware
//!
//! Active-low momentary switch on [`crate::pins::BUTTON_GPIO`] with the
//! internal pull-up enabled: the pin reads low while the button is held.
//! Edge detection and debouncing live in [`crate::app::mode_source`];
//! this driver only reports the current level.

use embedded_hal::digital::InputPin;

use crate::app::ports::ButtonPort;

pub struct ButtonDriver<P: InputPin> {
    pin: P,
}

impl<P: InputPin> ButtonDriver<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> ButtonPort for ButtonDriver<P> {
    fn is_pressed(&mut self) -> bool {
        // A read error counts as released: no spurious toggles.
        self.pin.is_low().unwrap_or(false)
    }
}
