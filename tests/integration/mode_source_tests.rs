//! Mode source behaviour against a bouncing button on virtual time.

use std::rc::Rc;

use crosswalk::app::events::RigEvent;
use crosswalk::app::mode_source::{InterruptModeSource, ModeSwitch, PollingModeSource};
use crosswalk::config::BUTTON_POLL_INTERVAL_MS;
use crosswalk::debounce::Debouncer;
use crosswalk::mode::{Mode, ModeState};

use crate::mock_hw::{RecordingSink, ScriptedButton, SimClock, SimWorld};

fn poll_until<B, C, D>(
    world: &Rc<SimWorld>,
    source: &mut PollingModeSource<'_, B, C, D, RecordingSink>,
    until_ms: u64,
) where
    B: crosswalk::app::ports::ButtonPort,
    C: crosswalk::app::ports::ClockPort,
    D: embedded_hal::delay::DelayNs,
{
    while world.now_ms() < until_ms {
        let _ = source.poll_once();
        world.advance_us(u64::from(BUTTON_POLL_INTERVAL_MS) * 1_000);
    }
}

fn toggles(sink: &RecordingSink) -> Vec<(u64, Mode)> {
    sink.events
        .borrow()
        .iter()
        .filter_map(|(at, e)| match e {
            RigEvent::ModeToggled { to, .. } => Some((*at, *to)),
            _ => None,
        })
        .collect()
}

#[test]
fn contact_bounce_collapses_into_one_toggle() {
    let world = SimWorld::new();
    let sink = RecordingSink::new(&world);
    let events = sink.events.clone();
    let mut source = PollingModeSource::new(
        ModeSwitch::new(world.debouncer, world.mode),
        ScriptedButton {
            world: world.clone(),
            steps: vec![
                (1_000, true),
                (1_010, false),
                (1_020, true),
                (1_030, false),
                (1_040, true),
                (1_500, false),
                (2_000, true),
                (2_300, false),
            ],
        },
        SimClock(world.clone()),
        world.delay(),
        sink,
        BUTTON_POLL_INTERVAL_MS,
    );

    poll_until(&world, &mut source, 2_500);

    assert_eq!(
        toggles(source.sink()),
        [(1_000, Mode::Night), (2_000, Mode::Normal)]
    );
    assert_eq!(world.mode.get(), Mode::Normal);
    assert_eq!(
        events.borrow()[0].1,
        RigEvent::ModeToggled {
            to: Mode::Night,
            at_us: 1_000_000
        }
    );
}

#[test]
fn button_held_through_boot_never_toggles() {
    let world = SimWorld::new();
    let mut source = PollingModeSource::new(
        ModeSwitch::new(world.debouncer, world.mode),
        ScriptedButton {
            world: world.clone(),
            steps: vec![(0, true)],
        },
        SimClock(world.clone()),
        world.delay(),
        RecordingSink::new(&world),
        BUTTON_POLL_INTERVAL_MS,
    );

    poll_until(&world, &mut source, 3_000);

    // The first sample is the only edge and it falls in the boot window.
    assert!(toggles(source.sink()).is_empty());
    assert_eq!(world.mode.get(), Mode::Normal);
}

#[test]
fn interrupt_source_handles_clock_wrap() {
    let debouncer = Debouncer::default();
    let mode = ModeState::new();
    let source = InterruptModeSource::new(&debouncer, &mode, 5);

    let before_wrap = u32::MAX - 100_000;
    assert_eq!(source.on_falling_edge(before_wrap), Some(Mode::Night));
    // 250 001 us after the previous accepted edge.
    assert_eq!(source.on_falling_edge(150_000), None);
    // 350 001 us after.
    assert_eq!(source.on_falling_edge(250_000), Some(Mode::Normal));
    assert_eq!(debouncer.last_event_us(), 250_000);
}

#[test]
fn both_sources_share_one_mode_flag() {
    let world = SimWorld::new();
    let isr = InterruptModeSource::new(world.debouncer, world.mode, 5);
    assert_eq!(isr.on_falling_edge(1_000_000), Some(Mode::Night));

    // A press through the polling path 200 ms later is still bounce:
    // the debouncer is shared.
    world.advance_us(1_200_000);
    let mut polling = PollingModeSource::new(
        ModeSwitch::new(world.debouncer, world.mode),
        ScriptedButton {
            world: world.clone(),
            steps: vec![(1_200, true)],
        },
        SimClock(world.clone()),
        world.delay(),
        RecordingSink::new(&world),
        BUTTON_POLL_INTERVAL_MS,
    );
    assert_eq!(polling.poll_once(), None);
    assert_eq!(world.mode.get(), Mode::Night);
}
