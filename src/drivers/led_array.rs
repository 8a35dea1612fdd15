//! Indicator LED array.
//!
//! One shared RGB PWM bus (LEDC CH0-2) feeds every cell; a per-cell
//! enable GPIO selects which cell actually lights.  Only one cell can be
//! lit at a time, which is all the rig ever asks for.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives LEDC duty and the enable GPIOs via hw_init.
//! On host/test: tracks state in-memory only.

use crate::app::ports::{LED_ARRAY_CELLS, LedArrayPort};
use crate::drivers::hw_init;
use crate::pins;

pub struct IndicatorArray {
    lit: Option<(u8, (u8, u8, u8))>,
}

impl Default for IndicatorArray {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorArray {
    pub fn new() -> Self {
        let mut array = Self { lit: None };
        array.off();
        array
    }

    pub fn off(&mut self) {
        self.set_colour_hw(0, 0, 0);
        for &gpio in &pins::LED_ARRAY_CELL_GPIOS {
            hw_init::gpio_write(gpio, false);
        }
        self.lit = None;
    }

    /// Lit cell and its colour, `None` when dark.
    pub fn lit(&self) -> Option<(u8, (u8, u8, u8))> {
        self.lit
    }

    fn set_colour_hw(&self, r: u8, g: u8, b: u8) {
        hw_init::ledc_set(hw_init::LEDC_CH_LED_R, r);
        hw_init::ledc_set(hw_init::LEDC_CH_LED_G, g);
        hw_init::ledc_set(hw_init::LEDC_CH_LED_B, b);
    }
}

impl LedArrayPort for IndicatorArray {
    fn set_one_led(&mut self, index: u8, r: u8, g: u8, b: u8) {
        if index >= LED_ARRAY_CELLS || (r, g, b) == (0, 0, 0) {
            self.off();
            return;
        }

        // Disable first so the new colour never flashes on the old cell.
        for (cell, &gpio) in pins::LED_ARRAY_CELL_GPIOS.iter().enumerate() {
            if cell != index as usize {
                hw_init::gpio_write(gpio, false);
            }
        }
        self.set_colour_hw(r, g, b);
        hw_init::gpio_write(pins::LED_ARRAY_CELL_GPIOS[index as usize], true);
        self.lit = Some((index, (r, g, b)));
    }
}
