//! Application core: mode sources, rig composition and the port
//! traits that keep both independent of real peripherals.
//!
//! Everything hardware-specific sits behind [`ports`]; the sequencing
//! core in [`crate::sequencer`] and [`crate::peripherals`] only sees
//! those traits, so the whole rig runs on the host against mocks.

pub mod events;
pub mod mode_source;
pub mod ports;
pub mod rig;
