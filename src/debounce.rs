//! Minimum-interval debounce filter for the mode button.
//!
//! One filter per edge source.  Each raw falling edge is offered to
//! [`Debouncer::accept`] together with the current time; the edge is
//! accepted only if strictly more than the debounce window has passed
//! since the previously *accepted* edge.  Rejected edges leave the state
//! untouched, so a burst of contact bounce collapses into one press.
//!
//! ## Timestamps
//!
//! Times are the low 32 bits of the monotonic microsecond clock, which
//! wraps roughly every 71.6 minutes.  The elapsed time is computed with
//! `wrapping_sub`, so the comparison stays correct across a wrap as long
//! as two edges are less than 2³² µs apart.
//!
//! The last-accepted timestamp starts at the boot epoch (`0`): an edge in
//! the first window after boot is treated as bounce.
//!
//! ## Contexts
//!
//! The state is an `AtomicU32` so the filter can live in a `static` and be
//! used through `&self` from the polling task or the GPIO ISR.  Only one
//! execution context ever touches a given filter, so relaxed load/store
//! is sufficient.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::config::DEBOUNCE_WINDOW_US;

pub struct Debouncer {
    window_us: u32,
    last_event_us: AtomicU32,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_WINDOW_US)
    }
}

impl Debouncer {
    pub const fn new(window_us: u32) -> Self {
        Self {
            window_us,
            last_event_us: AtomicU32::new(0),
        }
    }

    pub fn window_us(&self) -> u32 {
        self.window_us
    }

    /// Timestamp of the last accepted edge (`0` until the first one).
    pub fn last_event_us(&self) -> u32 {
        self.last_event_us.load(Ordering::Relaxed)
    }

    /// Offer a raw edge observed at `now_us`.
    ///
    /// Returns `true` (and records `now_us`) iff the edge is outside the
    /// debounce window of the previously accepted edge.
    pub fn accept(&self, now_us: u32) -> bool {
        let last = self.last_event_us.load(Ordering::Relaxed);
        if now_us.wrapping_sub(last) > self.window_us {
            self.last_event_us.store(now_us, Ordering::Relaxed);
            true
        } else {
            false
        }
    }
}
