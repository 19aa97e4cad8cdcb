//! ILI9806E DSI Panel Driver
//!
//! A lifecycle driver for the Ilitek ILI9806E display panel: power/reset
//! choreography, the page-banked vendor init script, and backlight
//! bridging over a write-mostly DSI command link. Once enabled, the panel
//! is scanned out by the platform's video pipeline; this crate only
//! handles the discrete command and power sequencing around it.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - Table-driven init with per-step failure reporting
//! - Strict or best-effort error tolerance on enable
//! - Brightness bridging with or without link read-back
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use ili9806e::{Builder, CommandLink, Panel, PowerSequence, Regulator};
//!
//! # struct MockLink;
//! # impl CommandLink for MockLink {
//! #     type Error = Infallible;
//! #     fn write(&mut self, _frame: &[u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn set_low_power(&mut self, _enabled: bool) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # struct MockRegulator;
//! # impl Regulator for MockRegulator {
//! #     type Error = Infallible;
//! #     fn enable(&mut self) -> Result<(), Infallible> { Ok(()) }
//! #     fn disable(&mut self) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Infallible> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let link = MockLink;
//! # let regulator = MockRegulator;
//! # let reset = MockPin;
//! # let dsi_enable = MockPin;
//! # let mut delay = MockDelay;
//! let power = PowerSequence::new(regulator, reset, dsi_enable);
//! let mut panel = Panel::new(link, power, Builder::new().build());
//!
//! let _ = panel.prepare(&mut delay);
//! let _ = panel.enable(&mut delay);
//! // ... video pipeline drives pixel data ...
//! let _ = panel.disable();
//! let _ = panel.unprepare();
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// Backlight bridge over the DCS brightness registers
pub mod backlight;
/// ILI9806E command definitions
pub mod command;
/// Panel configuration types and builder
pub mod config;
/// Error types for the driver
pub mod error;
/// Panel initialization script
pub mod init;
/// Init-script instructions
pub mod instruction;
/// Command link abstraction
pub mod interface;
/// Panel lifecycle state machine
pub mod panel;
/// Physical power and reset sequencing
pub mod power;
/// Init-script interpreter
pub mod sequence;

pub use backlight::{Backlight, BacklightState, MAX_BRIGHTNESS};
pub use config::{Builder, Config, DisplayMode, ErrorPolicy};
pub use error::Error;
pub use init::INIT_SEQUENCE;
pub use instruction::Instruction;
pub use interface::CommandLink;
pub use panel::{Panel, PanelState};
pub use power::{PowerError, PowerSequence, RAIL_SETTLE_MS, RESET_RECOVERY_MS, Regulator};
pub use sequence::SequenceError;
