//! End-to-end timing scenarios on virtual time.
//!
//! Each test drives one peripheral task through the real sequencer,
//! debouncer and mode switch, with presses delivered between ticks.

use crosswalk::app::events::RigEvent;
use crosswalk::config::RigConfig;
use crosswalk::mode::Mode;
use crosswalk::peripherals::{Peripheral, buzzer, display, led_array, traffic_light};

use crate::mock_hw::{RecordingSink, Recorder, SimWorld, run_until};

const G: (bool, bool) = (true, false);
const GR: (bool, bool) = (true, true);
const R: (bool, bool) = (false, true);
const OFF: (bool, bool) = (false, false);

// ── Traffic light ─────────────────────────────────────────────

#[test]
fn held_normal_light_cycles_every_twelve_seconds() {
    let world = SimWorld::new();
    let port = Recorder::new(&world);
    let lamps = port.log.clone();
    let mut sink = RecordingSink::new(&world);
    let mut task = traffic_light::task(world.mode, &RigConfig::polling(), port);

    run_until(&world, &mut task, &mut sink, 24_000);

    assert_eq!(
        lamps.borrow()[..6],
        [
            (0, G),
            (4_000, GR),
            (8_000, R),
            (12_000, OFF),
            (12_000, G),
            (16_000, GR),
        ]
    );
    assert!(sink.aborts().is_empty());
}

#[test]
fn first_cycle_done_and_second_green_begun_at_12_100_ms() {
    let world = SimWorld::new();
    let port = Recorder::new(&world);
    let lamps = port.log.clone();
    let mut sink = RecordingSink::new(&world);
    let mut task = traffic_light::task(world.mode, &RigConfig::polling(), port);

    run_until(&world, &mut task, &mut sink, 12_100);

    // Lamp state at 12 100 ms is the last write at or before it.
    let at_12_100 = lamps
        .borrow()
        .iter()
        .rev()
        .find(|(at, _)| *at <= 12_100)
        .map(|(_, lamps)| *lamps);
    assert_eq!(at_12_100, Some(G));

    let completed: Vec<u64> = sink
        .events
        .borrow()
        .iter()
        .filter(|(_, e)| matches!(e, RigEvent::CycleCompleted { .. }))
        .map(|(at, _)| *at)
        .collect();
    assert_eq!(completed[0], 12_000);
}

#[test]
fn held_night_light_blinks_both_lamps() {
    let world = SimWorld::starting_in(Mode::Night);
    let port = Recorder::new(&world);
    let lamps = port.log.clone();
    let mut sink = RecordingSink::new(&world);
    let mut task = traffic_light::task(world.mode, &RigConfig::polling(), port);

    run_until(&world, &mut task, &mut sink, 8_000);

    assert_eq!(
        lamps.borrow()[..4],
        [(0, GR), (2_000, OFF), (4_000, GR), (6_000, OFF)]
    );
}

#[test]
fn toggle_mid_phase_switches_within_one_tick() {
    let world = SimWorld::new();
    world.press_at(500);
    let port = Recorder::new(&world);
    let lamps = port.log.clone();
    let mut sink = RecordingSink::new(&world);
    let mut task = traffic_light::task(world.mode, &RigConfig::polling(), port);

    run_until(&world, &mut task, &mut sink, 3_000);

    assert_eq!(lamps.borrow()[..3], [(0, G), (500, GR), (2_500, OFF)]);
    assert_eq!(
        sink.aborts(),
        [(
            500,
            RigEvent::PhaseAborted {
                peripheral: Peripheral::TrafficLight,
                mode: Mode::Normal,
                index: 0,
                elapsed_ms: 500,
            }
        )]
    );
}

#[test]
fn presses_100_ms_apart_toggle_once() {
    let world = SimWorld::new();
    world.press_at(1_000);
    world.press_at(1_100);
    let port = Recorder::new(&world);
    let mut sink = RecordingSink::new(&world);
    let mut task = traffic_light::task(world.mode, &RigConfig::polling(), port);

    run_until(&world, &mut task, &mut sink, 3_000);

    assert_eq!(*world.toggles.borrow(), [(1_000, Mode::Night)]);
    assert_eq!(world.mode.get(), Mode::Night);
    assert_eq!(sink.aborts().len(), 1);
}

#[test]
fn aborted_phase_is_not_resumed() {
    let world = SimWorld::new();
    world.press_at(5_000);
    world.press_at(6_000);
    let port = Recorder::new(&world);
    let lamps = port.log.clone();
    let mut sink = RecordingSink::new(&world);
    let mut task = traffic_light::task(world.mode, &RigConfig::polling(), port);

    run_until(&world, &mut task, &mut sink, 10_500);

    // Back in normal mode at 6000 the cycle restarts from green, not
    // from the green+red phase that was cut short at 5000.
    assert_eq!(
        lamps.borrow()[..5],
        [(0, G), (4_000, GR), (5_000, GR), (6_000, G), (10_000, GR)]
    );
    let aborts = sink.aborts();
    assert_eq!(aborts.len(), 2);
    assert_eq!(
        aborts[0].1,
        RigEvent::PhaseAborted {
            peripheral: Peripheral::TrafficLight,
            mode: Mode::Normal,
            index: 1,
            elapsed_ms: 1_000,
        }
    );
}

#[test]
fn reduced_light_reacts_at_phase_end() {
    let world = SimWorld::new();
    world.press_at(500);
    let port = Recorder::new(&world);
    let lamps = port.log.clone();
    let mut sink = RecordingSink::new(&world);
    let mut task = traffic_light::task(world.mode, &RigConfig::interrupt(), port);

    run_until(&world, &mut task, &mut sink, 4_500);

    assert_eq!(
        lamps.borrow()[..4],
        [(0, G), (1_000, GR), (2_500, OFF), (4_000, GR)]
    );
}

#[test]
fn boot_window_press_is_ignored() {
    let world = SimWorld::new();
    world.press_at(200);
    let port = Recorder::new(&world);
    let mut sink = RecordingSink::new(&world);
    let mut task = traffic_light::task(world.mode, &RigConfig::polling(), port);

    run_until(&world, &mut task, &mut sink, 1_000);

    assert!(world.toggles.borrow().is_empty());
    assert_eq!(world.mode.get(), Mode::Normal);
}

// ── LED array ─────────────────────────────────────────────────

#[test]
fn led_array_follows_signal_phases() {
    let world = SimWorld::new();
    world.press_at(12_000);
    let port = Recorder::new(&world);
    let cells = port.log.clone();
    let mut sink = RecordingSink::new(&world);
    let mut task = led_array::task(world.mode, &RigConfig::polling(), port);

    run_until(&world, &mut task, &mut sink, 16_000);

    assert_eq!(
        cells.borrow()[..5],
        [
            (0, (0, (0, 20, 0))),
            (4_000, (1, (20, 20, 0))),
            (8_000, (2, (20, 0, 0))),
            (12_000, (1, (20, 20, 0))),
            (14_000, (4, (0, 0, 0))),
        ]
    );
}

#[test]
fn led_array_switches_mid_phase_within_one_tick() {
    let world = SimWorld::new();
    world.press_at(1_200);
    let port = Recorder::new(&world);
    let cells = port.log.clone();
    let mut sink = RecordingSink::new(&world);
    let mut task = led_array::task(world.mode, &RigConfig::polling(), port);

    run_until(&world, &mut task, &mut sink, 4_000);

    assert_eq!(
        cells.borrow()[..3],
        [
            (0, (0, (0, 20, 0))),
            (1_500, (1, (20, 20, 0))),
            (3_500, (4, (0, 0, 0))),
        ]
    );
    assert_eq!(
        sink.aborts(),
        [(
            1_500,
            RigEvent::PhaseAborted {
                peripheral: Peripheral::LedArray,
                mode: Mode::Normal,
                index: 0,
                elapsed_ms: 1_500,
            }
        )]
    );
}

// ── Buzzer ────────────────────────────────────────────────────

#[test]
fn buzzer_switches_tone_within_100_ms() {
    let world = SimWorld::new();
    world.press_at(4_050);
    let port = Recorder::new(&world);
    let tones = port.log.clone();
    let mut sink = RecordingSink::new(&world);
    let mut task = buzzer::task(world.mode, &RigConfig::polling(), port);

    run_until(&world, &mut task, &mut sink, 6_200);

    assert_eq!(
        tones.borrow()[..5],
        [
            (0, None),
            (0, Some(1_000)),
            (1_000, None),
            (4_000, Some(500)),
            (4_100, Some(400)),
        ]
    );
    let (aborted_at, _) = sink.aborts()[0];
    assert!(aborted_at - 4_050 <= 100);
}

#[test]
fn buzzer_normal_cycle_ends_with_two_long_pulses() {
    let world = SimWorld::new();
    let port = Recorder::new(&world);
    let tones = port.log.clone();
    let mut sink = RecordingSink::new(&world);
    let mut task = buzzer::task(world.mode, &RigConfig::polling(), port);

    run_until(&world, &mut task, &mut sink, 12_000);

    let log = tones.borrow();
    let pips = log.iter().filter(|(_, t)| *t == Some(500)).count();
    assert_eq!(pips, 10);
    let pulses: Vec<u64> = log
        .iter()
        .filter(|(_, t)| *t == Some(800))
        .map(|(at, _)| *at)
        .collect();
    assert_eq!(pulses, [8_000, 10_000]);
}

// ── Display ───────────────────────────────────────────────────

#[test]
fn display_shows_night_caption_within_100_ms() {
    let world = SimWorld::new();
    world.press_at(4_050);
    let port = Recorder::new(&world);
    let screen = port.log.clone();
    let mut sink = RecordingSink::new(&world);
    let mut task = display::task(world.mode, &RigConfig::polling(), port);

    run_until(&world, &mut task, &mut sink, 4_500);

    let log = screen.borrow();
    let caption = log
        .iter()
        .find(|(_, (text, _, _))| text == "Night Mode")
        .map(|(at, _)| *at);
    assert_eq!(caption, Some(4_100));

    // Pointer on amber right after the switch.
    let pointer: Vec<&str> = log
        .iter()
        .filter(|(at, (_, x, _))| *at == 4_100 && *x == display::POINTER_X)
        .map(|(_, (text, _, _))| text.as_str())
        .collect();
    assert_eq!(pointer, ["^", ">", "^"]);
}

#[test]
fn display_normal_branch_clears_caption() {
    let world = SimWorld::new();
    let port = Recorder::new(&world);
    let screen = port.log.clone();
    let mut sink = RecordingSink::new(&world);
    let mut task = display::task(world.mode, &RigConfig::polling(), port);

    run_until(&world, &mut task, &mut sink, 100);

    assert!(
        screen
            .borrow()
            .iter()
            .any(|(_, (text, x, y))| text.trim().is_empty() && text.len() == 12 && (*x, *y) == (16, 48))
    );
}
