//! Mode sources: turn button presses into mode toggles.
//!
//! Two interchangeable sources feed the same [`ModeSwitch`]:
//!
//! | Source                   | Runs in          | Edge detection                 |
//! |--------------------------|------------------|--------------------------------|
//! | [`PollingModeSource`]    | its own task     | level sampled every 10 ms      |
//! | [`InterruptModeSource`]  | GPIO ISR         | hardware falling edge          |
//!
//! Both debounce with a [`Debouncer`] and flip the shared [`ModeState`].
//! The polling source looks for a released → pressed transition, so a
//! held button toggles once, the same as the interrupt source.

use std::thread::JoinHandle;

use embedded_hal::delay::DelayNs;

use super::events::RigEvent;
use super::ports::{ButtonPort, ClockPort, EventSink};
use crate::config::{ButtonSource, RigConfig};
use crate::debounce::Debouncer;
use crate::drivers::task_pin::{self, Core};
use crate::error::Result;
use crate::mode::{Mode, ModeState};

/// Debouncer and mode flag, wired together.
#[derive(Clone, Copy)]
pub struct ModeSwitch<'a> {
    debouncer: &'a Debouncer,
    mode: &'a ModeState,
}

impl<'a> ModeSwitch<'a> {
    pub const fn new(debouncer: &'a Debouncer, mode: &'a ModeState) -> Self {
        Self { debouncer, mode }
    }

    /// Offer a falling edge seen at `now_us`.  Returns the new mode if
    /// the edge passed the debouncer.
    pub fn on_edge(&self, now_us: u32) -> Option<Mode> {
        if self.debouncer.accept(now_us) {
            Some(self.mode.toggle())
        } else {
            None
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode.get()
    }
}

/// Something that delivers mode toggles once started.
pub trait ModeSource: Send {
    fn kind(&self) -> ButtonSource;

    /// Begin delivering toggles.  Returns the handle of the task the
    /// source runs in, if it needs one.
    fn start(self: Box<Self>, config: &RigConfig) -> Result<Option<JoinHandle<()>>>;
}

// ── Polling ───────────────────────────────────────────────────

/// Samples the button at a fixed period from its own task.
pub struct PollingModeSource<'a, B, C, D, S> {
    switch: ModeSwitch<'a>,
    button: B,
    clock: C,
    delay: D,
    sink: S,
    interval_ms: u32,
    was_pressed: bool,
}

impl<'a, B, C, D, S> PollingModeSource<'a, B, C, D, S>
where
    B: ButtonPort,
    C: ClockPort,
    D: DelayNs,
    S: EventSink,
{
    pub fn new(
        switch: ModeSwitch<'a>,
        button: B,
        clock: C,
        delay: D,
        sink: S,
        interval_ms: u32,
    ) -> Self {
        Self {
            switch,
            button,
            clock,
            delay,
            sink,
            interval_ms,
            was_pressed: false,
        }
    }

    /// Sample the button once.  Returns the new mode if this sample saw
    /// a press that got through the debouncer.
    pub fn poll_once(&mut self) -> Option<Mode> {
        let pressed = self.button.is_pressed();
        let edge = pressed && !self.was_pressed;
        self.was_pressed = pressed;
        if !edge {
            return None;
        }

        let now_us = self.clock.now_us();
        let toggled = self.switch.on_edge(now_us);
        match toggled {
            Some(to) => self.sink.emit(&RigEvent::ModeToggled { to, at_us: now_us }),
            None => log::trace!("button: edge at {now_us} us rejected as bounce"),
        }
        toggled
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Task body.
    pub fn run(mut self) -> ! {
        loop {
            let _ = self.poll_once();
            self.delay.delay_ms(self.interval_ms);
        }
    }
}

impl<B, C, D, S> ModeSource for PollingModeSource<'static, B, C, D, S>
where
    B: ButtonPort + Send + 'static,
    C: ClockPort + Send + 'static,
    D: DelayNs + Send + 'static,
    S: EventSink + Send + 'static,
{
    fn kind(&self) -> ButtonSource {
        ButtonSource::Polling
    }

    fn start(self: Box<Self>, config: &RigConfig) -> Result<Option<JoinHandle<()>>> {
        let handle = task_pin::spawn_on_core(
            Core::App,
            config.task_priority,
            config.task_stack_kb,
            "mode-button\0",
            move || self.run(),
        )?;
        Ok(Some(handle))
    }
}

// ── Interrupt ─────────────────────────────────────────────────

/// Debounces in the GPIO ISR.  No task of its own.
pub struct InterruptModeSource<'a> {
    switch: ModeSwitch<'a>,
    pin: i32,
}

impl<'a> InterruptModeSource<'a> {
    pub const fn new(debouncer: &'a Debouncer, mode: &'a ModeState, pin: i32) -> Self {
        Self {
            switch: ModeSwitch::new(debouncer, mode),
            pin,
        }
    }

    pub fn pin(&self) -> i32 {
        self.pin
    }

    /// ISR body.  Lock-free; must not log.
    pub fn on_falling_edge(&self, now_us: u32) -> Option<Mode> {
        self.switch.on_edge(now_us)
    }
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn falling_edge_isr(arg: *mut core::ffi::c_void) {
    // SAFETY: `arg` is the leaked `InterruptModeSource<'static>` registered
    // in `start`; it is never freed.
    let source = unsafe { &*(arg as *const InterruptModeSource<'static>) };
    // SAFETY: esp_timer_get_time is an RTC counter read; safe in ISR context.
    let now_us = unsafe { esp_idf_svc::sys::esp_timer_get_time() } as u32;
    let _ = source.on_falling_edge(now_us);
}

impl ModeSource for InterruptModeSource<'static> {
    fn kind(&self) -> ButtonSource {
        ButtonSource::Interrupt
    }

    #[cfg(target_os = "espidf")]
    fn start(self: Box<Self>, _config: &RigConfig) -> Result<Option<JoinHandle<()>>> {
        let source: &'static Self = Box::leak(self);
        crate::drivers::hw_init::attach_falling_edge_isr(
            source.pin,
            falling_edge_isr,
            source as *const Self as *mut core::ffi::c_void,
        )?;
        Ok(None)
    }

    #[cfg(not(target_os = "espidf"))]
    fn start(self: Box<Self>, _config: &RigConfig) -> Result<Option<JoinHandle<()>>> {
        log::warn!("mode source(sim): no GPIO interrupts on host, pin {} idle", self.pin);
        Ok(None)
    }
}
