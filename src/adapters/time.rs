//! Time adapters.
//!
//! - [`MonotonicClock`] implements [`ClockPort`] for the debouncer.
//!   - **`target_os = "espidf"`**: wraps `esp_timer_get_time()` from the
//!     ESP-IDF high-resolution timer (microsecond precision, monotonic).
//!   - **`not(target_os = "espidf")`**: uses `std::time::Instant` for
//!     host-side testing and simulation.
//! - [`StdDelay`] is the host-side `DelayNs` for the rig tasks.  On the
//!   device they use `esp_idf_hal::delay::FreeRtos` instead, which
//!   yields to the scheduler.

use embedded_hal::delay::DelayNs;

use crate::app::ports::ClockPort;

/// Microseconds since boot, truncated to 32 bits.
pub struct MonotonicClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Microseconds since boot (monotonic, full width).
    #[cfg(target_os = "espidf")]
    pub fn uptime_us(&self) -> u64 {
        // SAFETY: esp_timer_get_time reads the high-resolution timer; no
        // preconditions once the system is running.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
    }

    /// Microseconds since the clock was created (monotonic, full width).
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

impl ClockPort for MonotonicClock {
    fn now_us(&self) -> u32 {
        // Wraps every ~71.6 min; the debouncer compares with wrapping_sub.
        self.uptime_us() as u32
    }
}

/// `std::thread::sleep`-backed delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
