//! Plain GPIO pins as `embedded-hal` 1.0 digital pins.
//!
//! Thin wrappers over [`hw_init::gpio_read`] / [`hw_init::gpio_write`] on
//! pins already configured by [`hw_init::init_peripherals`].  Register
//! access cannot fail once configured, so the error type is
//! [`Infallible`].

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};

use super::hw_init;

/// Push-pull output.  Remembers the last level written.
#[derive(Debug)]
pub struct GpioOutput {
    pin: i32,
    high: bool,
}

impl GpioOutput {
    /// Wrap a configured output pin, driving it low.
    pub fn new(pin: i32) -> Self {
        hw_init::gpio_write(pin, false);
        Self { pin, high: false }
    }

    pub fn pin(&self) -> i32 {
        self.pin
    }
}

impl ErrorType for GpioOutput {
    type Error = Infallible;
}

impl OutputPin for GpioOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.pin, false);
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.pin, true);
        self.high = true;
        Ok(())
    }
}

impl StatefulOutputPin for GpioOutput {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high)
    }
}

/// Input with the internal pull-up enabled.
#[derive(Debug)]
pub struct GpioInput {
    pin: i32,
}

impl GpioInput {
    pub fn new(pin: i32) -> Self {
        Self { pin }
    }

    pub fn pin(&self) -> i32 {
        self.pin
    }
}

impl ErrorType for GpioInput {
    type Error = Infallible;
}

impl InputPin for GpioInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(hw_init::gpio_read(self.pin))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!hw_init::gpio_read(self.pin))
    }
}
