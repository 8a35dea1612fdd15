//! Simulated rig hardware for integration tests.
//!
//! A [`SimWorld`] owns virtual time and a schedule of button presses.
//! [`SimDelay`] advances virtual time instead of sleeping and delivers
//! any press that falls inside the sleep through the real debouncer and
//! mode switch, so tasks see mode changes exactly as they would between
//! two ticks on the device.  Every mock port records what it was asked
//! to do together with the virtual time of the call.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crosswalk::app::events::RigEvent;
use crosswalk::app::mode_source::ModeSwitch;
use crosswalk::app::ports::{
    ButtonPort, ClockPort, EventSink, LedArrayPort, SignalPort, TextDisplayPort, TonePort,
};
use crosswalk::debounce::Debouncer;
use crosswalk::mode::{Mode, ModeState};
use crosswalk::peripherals::PeripheralTask;
use crosswalk::sequencer::PhaseActuator;
use embedded_hal::delay::DelayNs;

// ── World ─────────────────────────────────────────────────────

pub struct SimWorld {
    now_us: Cell<u64>,
    presses_us: RefCell<VecDeque<u64>>,
    pub debouncer: &'static Debouncer,
    pub mode: &'static ModeState,
    pub toggles: RefCell<Vec<(u64, Mode)>>,
}

#[allow(dead_code)]
impl SimWorld {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            now_us: Cell::new(0),
            presses_us: RefCell::new(VecDeque::new()),
            debouncer: Box::leak(Box::new(Debouncer::default())),
            mode: Box::leak(Box::new(ModeState::new())),
            toggles: RefCell::new(Vec::new()),
        })
    }

    /// Start in `mode` without going through the button.
    pub fn starting_in(mode: Mode) -> Rc<Self> {
        let world = Self::new();
        world.mode.set(mode);
        world
    }

    pub fn now_ms(&self) -> u64 {
        self.now_us.get() / 1_000
    }

    pub fn now_us(&self) -> u64 {
        self.now_us.get()
    }

    /// Schedule a clean falling edge at `at_ms`.
    pub fn press_at(&self, at_ms: u64) {
        let mut presses = self.presses_us.borrow_mut();
        presses.push_back(at_ms * 1_000);
        presses.make_contiguous().sort_unstable();
    }

    /// Advance virtual time by `us`, delivering scheduled presses on the way.
    pub fn advance_us(&self, us: u64) {
        let target = self.now_us.get() + us;
        loop {
            let next = self.presses_us.borrow().front().copied();
            match next {
                Some(at) if at <= target => {
                    self.presses_us.borrow_mut().pop_front();
                    self.now_us.set(at);
                    let switch = ModeSwitch::new(self.debouncer, self.mode);
                    if let Some(to) = switch.on_edge(at as u32) {
                        self.toggles.borrow_mut().push((at / 1_000, to));
                    }
                }
                _ => break,
            }
        }
        self.now_us.set(target);
    }

    pub fn delay(self: &Rc<Self>) -> SimDelay {
        SimDelay(self.clone())
    }
}

// ── Clock / delay ─────────────────────────────────────────────

pub struct SimDelay(pub Rc<SimWorld>);

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.advance_us(u64::from(ns) / 1_000);
    }

    fn delay_us(&mut self, us: u32) {
        self.0.advance_us(u64::from(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.advance_us(u64::from(ms) * 1_000);
    }
}

pub struct SimClock(pub Rc<SimWorld>);

impl ClockPort for SimClock {
    fn now_us(&self) -> u32 {
        self.0.now_us() as u32
    }
}

/// Button whose level follows a list of `(from_ms, pressed)` steps.
pub struct ScriptedButton {
    pub world: Rc<SimWorld>,
    pub steps: Vec<(u64, bool)>,
}

impl ButtonPort for ScriptedButton {
    fn is_pressed(&mut self) -> bool {
        let now = self.world.now_ms();
        self.steps
            .iter()
            .rev()
            .find(|(from, _)| *from <= now)
            .is_some_and(|(_, pressed)| *pressed)
    }
}

// ── Recording ports ───────────────────────────────────────────

/// `(virtual ms, value)` log shared between a port and the test.
pub type Timeline<T> = Rc<RefCell<Vec<(u64, T)>>>;

pub struct Recorder<T> {
    world: Rc<SimWorld>,
    pub log: Timeline<T>,
}

#[allow(dead_code)]
impl<T> Recorder<T> {
    pub fn new(world: &Rc<SimWorld>) -> Self {
        Self {
            world: world.clone(),
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn push(&self, value: T) {
        self.log.borrow_mut().push((self.world.now_ms(), value));
    }
}

impl SignalPort for Recorder<(bool, bool)> {
    fn set_lamps(&mut self, green: bool, red: bool) {
        self.push((green, red));
    }
}

impl LedArrayPort for Recorder<(u8, (u8, u8, u8))> {
    fn set_one_led(&mut self, index: u8, r: u8, g: u8, b: u8) {
        self.push((index, (r, g, b)));
    }
}

/// `Some(hz)` for a tone, `None` for silence.
impl TonePort for Recorder<Option<u32>> {
    fn play_tone(&mut self, frequency_hz: u32) {
        self.push(Some(frequency_hz));
    }

    fn stop_tone(&mut self) {
        self.push(None);
    }
}

impl TextDisplayPort for Recorder<(String, i32, i32)> {
    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        self.push((text.to_owned(), x, y));
    }
}

pub struct RecordingSink {
    world: Rc<SimWorld>,
    pub events: Timeline<RigEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new(world: &Rc<SimWorld>) -> Self {
        Self {
            world: world.clone(),
            events: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn aborts(&self) -> Vec<(u64, RigEvent)> {
        self.events
            .borrow()
            .iter()
            .filter(|(_, e)| matches!(e, RigEvent::PhaseAborted { .. }))
            .cloned()
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &RigEvent) {
        self.events
            .borrow_mut()
            .push((self.world.now_ms(), event.clone()));
    }
}

// ── Runner ────────────────────────────────────────────────────

/// Run whole cycles of `task` until virtual time reaches `until_ms`.
pub fn run_until<P: PhaseActuator>(
    world: &Rc<SimWorld>,
    task: &mut PeripheralTask<'_, P>,
    sink: &mut RecordingSink,
    until_ms: u64,
) {
    let mut delay = world.delay();
    while world.now_ms() < until_ms {
        let _ = task.run_cycle(&mut delay, sink);
    }
}
