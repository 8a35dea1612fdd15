//! Rig composition: builds the peripheral tasks for a [`RigConfig`] and
//! starts them together with the mode source.
//!
//! ```text
//!   ModeSource ──toggle──▶ MODE ◀──read── traffic light ─▶ SignalPort
//!                                  ◀──read── LED array ─────▶ LedArrayPort
//!                                  ◀──read── buzzer ────────▶ TonePort
//!                                  ◀──read── display ───────▶ TextDisplayPort
//! ```
//!
//! Every task reads the same [`ModeState`]; nothing else is shared.
//! At the reduced feature level the buzzer and display tasks are not
//! started: the buzzer is silenced once here and the display left blank.

use std::thread::JoinHandle;

use embedded_hal::delay::DelayNs;

use super::events::RigEvent;
use super::mode_source::ModeSource;
use super::ports::{EventSink, LedArrayPort, SignalPort, TextDisplayPort, TonePort};
use crate::config::RigConfig;
use crate::drivers::task_pin::{self, Core};
use crate::error::{Error, Result};
use crate::mode::ModeState;
use crate::peripherals::{self, Peripheral, PeripheralTask};
use crate::sequencer::PhaseActuator;

/// The four output ports, one per peripheral task.
pub struct RigPorts<S, L, T, X> {
    pub signal: S,
    pub led_array: L,
    pub tone: T,
    pub display: X,
}

/// Handles of everything [`Rig::start`] spawned.
#[derive(Default)]
pub struct RigHandles {
    pub tasks: Vec<(Peripheral, JoinHandle<()>)>,
    pub mode_source: Option<JoinHandle<()>>,
}

impl RigHandles {
    pub fn running(&self) -> Vec<Peripheral> {
        self.tasks.iter().map(|(p, _)| *p).collect()
    }

    /// Block on every task.  They never return in normal operation.
    pub fn join(self) -> Result<()> {
        for (peripheral, handle) in self.tasks {
            handle
                .join()
                .map_err(|_| Error::Spawn(peripheral.name()))?;
        }
        if let Some(handle) = self.mode_source {
            handle.join().map_err(|_| Error::Spawn("mode-button"))?;
        }
        Ok(())
    }
}

pub struct Rig {
    config: RigConfig,
    mode: &'static ModeState,
}

impl Rig {
    /// Validate `config` and bind it to the shared mode flag.
    pub fn new(config: RigConfig, mode: &'static ModeState) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, mode })
    }

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    /// Peripherals that get a task under this configuration.
    pub fn planned(&self) -> Vec<Peripheral> {
        Peripheral::ALL
            .into_iter()
            .filter(|p| p.runs_at(self.config.feature_level))
            .collect()
    }

    /// Spawn the peripheral tasks, then start `source`.
    ///
    /// Each task gets its own copy of `delay` and `sink`.
    pub fn start<S, L, T, X, D, K>(
        &self,
        ports: RigPorts<S, L, T, X>,
        delay: D,
        mut sink: K,
        source: Box<dyn ModeSource>,
    ) -> Result<RigHandles>
    where
        S: SignalPort + Send + 'static,
        L: LedArrayPort + Send + 'static,
        T: TonePort + Send + 'static,
        X: TextDisplayPort + Send + 'static,
        D: DelayNs + Clone + Send + 'static,
        K: EventSink + Clone + Send + 'static,
    {
        let level = self.config.feature_level;
        let mut handles = RigHandles::default();
        let RigPorts {
            signal,
            led_array,
            mut tone,
            display,
        } = ports;

        let light = peripherals::traffic_light::task(self.mode, &self.config, signal);
        handles
            .tasks
            .push(self.spawn(light, delay.clone(), sink.clone())?);
        sink.emit(&RigEvent::TaskStarted {
            peripheral: Peripheral::TrafficLight,
            level,
        });

        let array = peripherals::led_array::task(self.mode, &self.config, led_array);
        handles
            .tasks
            .push(self.spawn(array, delay.clone(), sink.clone())?);
        sink.emit(&RigEvent::TaskStarted {
            peripheral: Peripheral::LedArray,
            level,
        });

        if Peripheral::Buzzer.runs_at(level) {
            let buzzer = peripherals::buzzer::task(self.mode, &self.config, tone);
            handles
                .tasks
                .push(self.spawn(buzzer, delay.clone(), sink.clone())?);
            sink.emit(&RigEvent::TaskStarted {
                peripheral: Peripheral::Buzzer,
                level,
            });
        } else {
            tone.stop_tone();
            sink.emit(&RigEvent::TaskPlaceholder {
                peripheral: Peripheral::Buzzer,
            });
        }

        if Peripheral::Display.runs_at(level) {
            let status = peripherals::display::task(self.mode, &self.config, display);
            handles
                .tasks
                .push(self.spawn(status, delay.clone(), sink.clone())?);
            sink.emit(&RigEvent::TaskStarted {
                peripheral: Peripheral::Display,
                level,
            });
        } else {
            drop(display);
            sink.emit(&RigEvent::TaskPlaceholder {
                peripheral: Peripheral::Display,
            });
        }

        let kind = source.kind();
        if kind != self.config.button_source {
            log::warn!(
                "rig: configured for {:?} button but given a {:?} source",
                self.config.button_source,
                kind
            );
        }
        handles.mode_source = source.start(&self.config)?;
        sink.emit(&RigEvent::SourceStarted { source: kind });

        Ok(handles)
    }

    fn spawn<P, D, K>(
        &self,
        task: PeripheralTask<'static, P>,
        mut delay: D,
        mut sink: K,
    ) -> Result<(Peripheral, JoinHandle<()>)>
    where
        P: PhaseActuator + Send + 'static,
        P::Action: Sync,
        D: DelayNs + Send + 'static,
        K: EventSink + Send + 'static,
    {
        let peripheral = task.peripheral();
        let handle = task_pin::spawn_on_core(
            Core::App,
            self.config.task_priority,
            self.config.task_stack_kb,
            peripheral.task_name(),
            move || task.run_forever(&mut delay, &mut sink),
        )?;
        Ok((peripheral, handle))
    }
}
