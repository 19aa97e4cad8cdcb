//! Command link abstraction
//!
//! This module provides the [`CommandLink`] trait, the driver's view of the
//! point-to-point display command link (DSI in the reference hardware).
//!
//! The link is write-mostly: every panel operation is a short opaque frame
//! (2-6 bytes) with no acknowledgement. Read-back of registers is an
//! optional capability; links without it report `Ok(None)` from
//! [`CommandLink::read_register`] and the driver falls back to cached
//! values where a read would otherwise be needed.

use core::fmt::Debug;

/// Trait for the command link to the panel
///
/// Implementations wrap the platform's DSI (or equivalent) host controller.
/// An implementation must serialize frame writes: only one frame may be in
/// flight at a time, even when the backlight path and the lifecycle path
/// share the same physical link. This mirrors the contract of
/// `embedded_hal::spi::SpiDevice` for shared buses.
pub trait CommandLink {
    /// Error type for link operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Write one opaque command frame
    ///
    /// Fire-and-forget: success means the host controller accepted the
    /// frame, not that the panel acted on it.
    ///
    /// # Errors
    ///
    /// Returns an error if the link-level transfer fails.
    fn write(&mut self, frame: &[u8]) -> Result<(), Self::Error>;

    /// Read back a single register, if the link supports reads
    ///
    /// The default implementation reports no read capability (`Ok(None)`).
    /// Links that can issue read requests should return `Ok(Some(value))`.
    ///
    /// # Errors
    ///
    /// Returns an error only if a read was attempted and failed at the
    /// link level.
    fn read_register(&mut self, _command: u8) -> Result<Option<u8>, Self::Error> {
        Ok(None)
    }

    /// Select the link's low-power command transfer mode
    ///
    /// `true` switches command transfers to low-power mode, `false` to the
    /// high-speed mode. The init sequence runs in low-power mode; the
    /// brightness registers are only reliably accessible with low-power
    /// mode disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the host controller rejects the mode change.
    fn set_low_power(&mut self, enabled: bool) -> Result<(), Self::Error>;
}

impl<T: CommandLink + ?Sized> CommandLink for &mut T {
    type Error = T::Error;

    fn write(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        T::write(self, frame)
    }

    fn read_register(&mut self, command: u8) -> Result<Option<u8>, Self::Error> {
        T::read_register(self, command)
    }

    fn set_low_power(&mut self, enabled: bool) -> Result<(), Self::Error> {
        T::set_low_power(self, enabled)
    }
}
