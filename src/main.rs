//! Crosswalk rig firmware: main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Drivers / adapters                        │
//! │  SignalHead  IndicatorArray  PwmBuzzer  ConsoleDisplay       │
//! │  ButtonDriver  MonotonicClock  LogEventSink  FreeRtos delay  │
//! │                                                              │
//! │  ──────────────── Port trait boundary ────────────────       │
//! │                                                              │
//! │   mode source ──▶ MODE ◀── traffic light · LED array ·       │
//! │                            buzzer · display (one task each)  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! `main` only brings the rig up.  Once every task is running it parks
//! on their join handles; the tasks never return.
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use log::{error, info};

use crosswalk::adapters::console_display::ConsoleDisplay;
use crosswalk::adapters::log_sink::LogEventSink;
use crosswalk::adapters::time::MonotonicClock;
use crosswalk::app::mode_source::{InterruptModeSource, ModeSource, ModeSwitch, PollingModeSource};
use crosswalk::app::rig::{Rig, RigPorts};
use crosswalk::config::{ButtonSource, RigConfig};
use crosswalk::debounce::Debouncer;
use crosswalk::drivers::button::ButtonDriver;
use crosswalk::drivers::buzzer::PwmBuzzer;
use crosswalk::drivers::gpio::{GpioInput, GpioOutput};
use crosswalk::drivers::hw_init;
use crosswalk::drivers::led_array::IndicatorArray;
use crosswalk::drivers::signal_head::SignalHead;
use crosswalk::mode::MODE;
use crosswalk::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Crosswalk rig v{}                   ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Build configuration ────────────────────────────────
    let config = RigConfig::default();
    let config_json = serde_json::to_string(&config)
        .map_err(|e| anyhow::anyhow!("config serialisation failed: {e}"))?;
    info!("config: {}", config_json);

    // ── 3. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        error!("HAL init failed: {}, halting", e);
        return Err(e.into());
    }

    let ports = RigPorts {
        signal: SignalHead::new(
            GpioOutput::new(pins::LAMP_GREEN_GPIO),
            GpioOutput::new(pins::LAMP_RED_GPIO),
        ),
        led_array: IndicatorArray::new(),
        tone: PwmBuzzer::new(),
        display: ConsoleDisplay::new(),
    };

    // ── 4. Mode source ────────────────────────────────────────
    let debouncer: &'static Debouncer = Box::leak(Box::new(Debouncer::new(config.debounce_window_us)));
    let source: Box<dyn ModeSource> = match config.button_source {
        ButtonSource::Polling => Box::new(PollingModeSource::new(
            ModeSwitch::new(debouncer, &MODE),
            ButtonDriver::new(GpioInput::new(pins::BUTTON_GPIO)),
            MonotonicClock::new(),
            FreeRtos,
            LogEventSink::new(),
            config.button_poll_interval_ms,
        )),
        ButtonSource::Interrupt => Box::new(InterruptModeSource::new(
            debouncer,
            &MODE,
            pins::BUTTON_GPIO,
        )),
    };

    // ── 5. Start ──────────────────────────────────────────────
    let rig = Rig::new(config, &MODE)?;
    let handles = rig.start(ports, FreeRtos, LogEventSink::new(), source)?;
    info!("rig running: {:?} in {}", handles.running(), MODE.get());

    handles.join()?;
    Ok(())
}
