//! Fuzz target: mode button debounce
//!
//! Feeds arbitrary edge timestamps (as little-endian u32 gaps) through a
//! `ModeSwitch` and verifies:
//! - No panics, including across the 32-bit clock wrap
//! - Accepted edges are strictly more than one window apart
//! - The mode flips exactly once per accepted edge
//!
//! cargo fuzz run fuzz_debounce

#![no_main]

use crosswalk::app::mode_source::ModeSwitch;
use crosswalk::debounce::Debouncer;
use crosswalk::mode::{Mode, ModeState};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let debouncer = Debouncer::default();
    let mode = ModeState::new();
    let switch = ModeSwitch::new(&debouncer, &mode);

    let mut now: u32 = 0;
    let mut last_accepted: Option<u32> = None;
    let mut expected = Mode::Normal;

    for chunk in data.chunks_exact(4) {
        let gap = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        now = now.wrapping_add(gap);

        if let Some(to) = switch.on_edge(now) {
            if let Some(prev) = last_accepted {
                assert!(now.wrapping_sub(prev) > debouncer.window_us());
            }
            expected = expected.flipped();
            assert_eq!(to, expected);
            last_accepted = Some(now);
        }
        assert_eq!(mode.get(), expected);
    }
});
