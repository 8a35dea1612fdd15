//! Crosswalk rig firmware library.
//!
//! Exposes the sequencing core, the mode sources and the drivers for
//! integration testing. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod debounce;
pub mod error;
pub mod mode;
pub mod peripherals;
pub mod pins;
pub mod sequencer;

// Hardware-facing modules compile on the host too; their register
// access is replaced by cfg-gated simulation stubs.
pub mod adapters;
pub mod drivers;
