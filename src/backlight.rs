//! Backlight bridge
//!
//! Maps the backlight subsystem's brightness hooks onto the panel's DCS
//! brightness registers. The brightness registers are not reliably
//! accessible while the link is in its low-power command mode, so every
//! access first forces low-power mode off; this is a per-call side effect,
//! not one-time setup.

use crate::command::{GET_DISPLAY_BRIGHTNESS, SET_DISPLAY_BRIGHTNESS};
use crate::interface::CommandLink;

/// Brightness scale maximum (fixed 8-bit scale)
pub const MAX_BRIGHTNESS: u16 = 255;

/// Cached backlight state
///
/// `brightness` mirrors the last value written through the link. On a
/// write-only link it is also what `get_brightness` reports; on a link
/// with read-back the device value wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BacklightState {
    brightness: u16,
    enabled: bool,
}

impl BacklightState {
    /// Initial state: full brightness, not yet enabled
    pub(crate) fn new() -> Self {
        Self { brightness: MAX_BRIGHTNESS, enabled: false }
    }

    /// Whether the panel backlight is currently enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Borrowed backlight handle
///
/// Obtained from [`Panel::backlight`](crate::panel::Panel::backlight).
/// Borrowing the panel mutably is what serializes backlight I/O against
/// lifecycle transitions on the shared link.
pub struct Backlight<'a, L: CommandLink> {
    link: &'a mut L,
    state: &'a mut BacklightState,
}

impl<'a, L: CommandLink> Backlight<'a, L> {
    pub(crate) fn new(link: &'a mut L, state: &'a mut BacklightState) -> Self {
        Self { link, state }
    }

    /// Set the backlight brightness (0-255; larger values are clamped)
    ///
    /// # Errors
    ///
    /// Returns the link error if the mode change or register write fails.
    pub fn set_brightness(&mut self, value: u16) -> Result<(), L::Error> {
        let value = value.min(MAX_BRIGHTNESS);
        self.link.set_low_power(false)?;
        self.link.write(&[SET_DISPLAY_BRIGHTNESS, value as u8])?;
        self.state.brightness = value;
        Ok(())
    }

    /// Read the current brightness
    ///
    /// Reads through the link when it has read capability; otherwise
    /// reports the last written value.
    ///
    /// # Errors
    ///
    /// Returns the link error if the mode change or an attempted read
    /// fails.
    pub fn get_brightness(&mut self) -> Result<u16, L::Error> {
        self.link.set_low_power(false)?;
        match self.link.read_register(GET_DISPLAY_BRIGHTNESS)? {
            Some(value) => Ok(u16::from(value)),
            None => Ok(self.state.brightness),
        }
    }

    /// Turn the backlight on by re-asserting the cached brightness
    ///
    /// Driven by the panel's `enable()` transition.
    pub(crate) fn enable(&mut self) -> Result<(), L::Error> {
        self.link.set_low_power(false)?;
        self.link
            .write(&[SET_DISPLAY_BRIGHTNESS, self.state.brightness as u8])?;
        self.state.enabled = true;
        Ok(())
    }

    /// Turn the backlight off, keeping the cached brightness for re-enable
    ///
    /// Driven by the panel's `disable()` transition.
    pub(crate) fn disable(&mut self) -> Result<(), L::Error> {
        self.state.enabled = false;
        self.link.set_low_power(false)?;
        self.link.write(&[SET_DISPLAY_BRIGHTNESS, 0])
    }
}
