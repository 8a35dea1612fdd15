//! Interruptible phase sequencer.
//!
//! Every peripheral task runs the same loop over its own phase tables:
//!
//! ```text
//! loop {
//!     branch = mode.get()                 ── normal or night table
//!     for (action, duration) in branch {
//!         perform(action)                 ── once, at phase entry
//!         sleep in ticks until duration   ── re-check mode after each
//!         mode changed? ──▶ abort, back to the top of the loop
//!     }
//! }
//! ```
//!
//! There is no scheduler telling tasks that the mode changed.  Each task
//! re-reads the shared flag after every tick, so the tick size bounds how
//! late a peripheral reacts.  An aborted phase is never resumed: the next
//! cycle starts from the first phase of whichever mode is current.
//!
//! ## Tick policies
//!
//! | Policy    | Wait                                  | Reaction latency |
//! |-----------|---------------------------------------|------------------|
//! | `Ticked`  | `tick_ms` sleeps, check after each    | ≤ one tick       |
//! | `Coarse`  | one sleep for the whole phase, check  | ≤ one phase      |

use core::fmt;

use embedded_hal::delay::DelayNs;

use crate::app::events::RigEvent;
use crate::app::ports::EventSink;
use crate::mode::{Mode, ModeState};
use crate::peripherals::Peripheral;

/// One `(action, duration)` step of a peripheral's sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase<A> {
    pub action: A,
    pub duration_ms: u32,
}

impl<A> Phase<A> {
    pub const fn new(action: A, duration_ms: u32) -> Self {
        Self {
            action,
            duration_ms,
        }
    }
}

/// Normal and night phase lists of one peripheral.  Compile-time data.
#[derive(Debug, Clone, Copy)]
pub struct ModeTables<A: 'static> {
    pub normal: &'static [Phase<A>],
    pub night: &'static [Phase<A>],
}

impl<A> ModeTables<A> {
    pub fn branch(&self, mode: Mode) -> &'static [Phase<A>] {
        match mode {
            Mode::Normal => self.normal,
            Mode::Night => self.night,
        }
    }

    /// Sum of the phase durations of one branch.
    pub fn cycle_ms(&self, mode: Mode) -> u32 {
        self.branch(mode).iter().map(|p| p.duration_ms).sum()
    }
}

/// How a phase's duration is waited out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickPolicy {
    /// Sleep in `tick_ms` steps, re-checking the mode after each.
    Ticked { tick_ms: u32 },
    /// Sleep once for the whole phase, re-check afterwards.
    Coarse,
}

/// Result of one pass over a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseOutcome {
    /// All phases of the branch ran to completion.
    Completed,
    /// The mode changed during phase `index`, `elapsed_ms` into it.
    Aborted { index: usize, elapsed_ms: u32 },
}

/// The peripheral-specific half of a sequencer: applies phase actions.
pub trait PhaseActuator {
    type Action: Copy + fmt::Debug + 'static;

    /// Called at the top of every cycle, before the first phase.
    fn enter_branch(&mut self, _mode: Mode) {}

    /// Apply `action`.  Must be idempotent and must not block.
    fn perform(&mut self, action: Self::Action);
}

/// Runs one peripheral's phase tables against the shared mode flag.
pub struct PhaseSequencer<'m, A: 'static> {
    peripheral: Peripheral,
    mode: &'m ModeState,
    tables: ModeTables<A>,
    policy: TickPolicy,
}

impl<'m, A: Copy + fmt::Debug + 'static> PhaseSequencer<'m, A> {
    pub fn new(
        peripheral: Peripheral,
        mode: &'m ModeState,
        tables: ModeTables<A>,
        policy: TickPolicy,
    ) -> Self {
        debug_assert!(
            tables.cycle_ms(Mode::Normal) > 0 && tables.cycle_ms(Mode::Night) > 0,
            "a branch with no duration would spin"
        );
        Self {
            peripheral,
            mode,
            tables,
            policy,
        }
    }

    pub fn peripheral(&self) -> Peripheral {
        self.peripheral
    }

    pub fn policy(&self) -> TickPolicy {
        self.policy
    }

    pub fn tables(&self) -> &ModeTables<A> {
        &self.tables
    }

    /// Run one pass: read the mode, then every phase of that branch
    /// unless the mode changes part-way through.
    pub fn run_cycle<P, D, S>(&self, actuator: &mut P, delay: &mut D, sink: &mut S) -> PhaseOutcome
    where
        P: PhaseActuator<Action = A>,
        D: DelayNs,
        S: EventSink,
    {
        let branch = self.mode.get();
        sink.emit(&RigEvent::BranchEntered {
            peripheral: self.peripheral,
            mode: branch,
        });
        actuator.enter_branch(branch);

        for (index, phase) in self.tables.branch(branch).iter().enumerate() {
            actuator.perform(phase.action);
            sink.emit(&RigEvent::PhaseEntered {
                peripheral: self.peripheral,
                mode: branch,
                index,
            });

            if let Err(elapsed_ms) =
                self.wait_phase(phase.duration_ms, delay, || self.mode.get() != branch)
            {
                sink.emit(&RigEvent::PhaseAborted {
                    peripheral: self.peripheral,
                    mode: branch,
                    index,
                    elapsed_ms,
                });
                return PhaseOutcome::Aborted { index, elapsed_ms };
            }
        }

        sink.emit(&RigEvent::CycleCompleted {
            peripheral: self.peripheral,
            mode: branch,
        });
        PhaseOutcome::Completed
    }

    /// Run cycles forever.  Only suspension point: the tick sleeps.
    pub fn run_forever<P, D, S>(&self, actuator: &mut P, delay: &mut D, sink: &mut S) -> !
    where
        P: PhaseActuator<Action = A>,
        D: DelayNs,
        S: EventSink,
    {
        loop {
            let _ = self.run_cycle(actuator, delay, sink);
        }
    }

    /// Wait out `duration_ms` according to the tick policy.
    ///
    /// Returns `Err(elapsed_ms)` as soon as `abort` reports true after a
    /// sleep.  A zero duration returns immediately without sleeping.
    pub fn wait_phase<D: DelayNs>(
        &self,
        duration_ms: u32,
        delay: &mut D,
        mut abort: impl FnMut() -> bool,
    ) -> Result<(), u32> {
        match self.policy {
            TickPolicy::Ticked { tick_ms } => {
                let mut elapsed = 0;
                while elapsed < duration_ms {
                    let step = tick_ms.min(duration_ms - elapsed);
                    delay.delay_ms(step);
                    elapsed += step;
                    if abort() {
                        return Err(elapsed);
                    }
                }
                Ok(())
            }
            TickPolicy::Coarse => {
                if duration_ms == 0 {
                    return Ok(());
                }
                delay.delay_ms(duration_ms);
                if abort() { Err(duration_ms) } else { Ok(()) }
            }
        }
    }
}
