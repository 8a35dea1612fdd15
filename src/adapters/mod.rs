//! Adapters: concrete implementations of the port traits that are not
//! plain hardware drivers.
//!
//! | Adapter           | Implements       | Connects to              |
//! |-------------------|------------------|--------------------------|
//! | `console_display` | TextDisplayPort  | Serial log (frame dump)  |
//! | `log_sink`        | EventSink        | Serial log output        |
//! | `time`            | ClockPort        | ESP32 system timer       |
//! |                   | DelayNs (host)   | `std::thread::sleep`     |

pub mod console_display;
pub mod log_sink;
pub mod time;
