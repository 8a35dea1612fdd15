//! Output drivers, hardware initialisation, and task spawning.

pub mod button;
pub mod buzzer;
pub mod gpio;
pub mod hw_init;
pub mod led_array;
pub mod signal_head;
pub mod task_pin;
