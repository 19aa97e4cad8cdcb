//! Physical power and reset sequencing
//!
//! Drives the panel's discrete lifecycle lines: the supply regulator, the
//! reset line and the DSI-enable strobe. The handles are acquired once by
//! the platform binding code and held for the panel's whole lifetime; this
//! module only toggles them.

use core::fmt::Debug;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Settle time after enabling the supply rail, before releasing reset
pub const RAIL_SETTLE_MS: u32 = 20;

/// Reset-recovery time (datasheet tRT max)
///
/// The panel is not guaranteed to accept commands until this long after
/// the reset line is released.
pub const RESET_RECOVERY_MS: u32 = 120;

/// Trait for the panel's supply regulator
///
/// embedded-hal has no regulator abstraction, so the platform wraps its
/// regulator handle in this. Unlike the GPIO lines, regulator operations
/// are fallible and failures abort the transition in progress: toggling
/// reset on an unpowered or half-powered rail is not safe.
pub trait Regulator {
    /// Error type for regulator operations
    type Error: Debug;

    /// Enable the supply rail
    ///
    /// # Errors
    ///
    /// Returns an error if the rail could not be brought up.
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Disable the supply rail
    ///
    /// # Errors
    ///
    /// Returns an error if the rail could not be shut down.
    fn disable(&mut self) -> Result<(), Self::Error>;
}

impl<T: Regulator + ?Sized> Regulator for &mut T {
    type Error = T::Error;

    fn enable(&mut self) -> Result<(), Self::Error> {
        T::enable(self)
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        T::disable(self)
    }
}

/// Errors that can occur while sequencing panel power
#[derive(Debug, PartialEq, Eq)]
pub enum PowerError<E> {
    /// The supply regulator failed to switch
    Regulator(E),
}

impl<E: Debug> core::fmt::Display for PowerError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PowerError::Regulator(e) => write!(f, "regulator error: {e:?}"),
        }
    }
}

impl<E: Debug> core::error::Error for PowerError<E> {}

/// The panel's power, reset and DSI-enable lines
///
/// ## Type Parameters
///
/// * `REG` - Supply regulator implementing [`Regulator`]
/// * `RST` - Reset line implementing [`OutputPin`] (asserted high)
/// * `EN` - DSI-enable strobe implementing [`OutputPin`]
pub struct PowerSequence<REG, RST, EN> {
    /// Supply regulator
    regulator: REG,
    /// Reset line, asserted high to bring the panel out of reset
    reset: RST,
    /// DSI-enable strobe, held asserted across the power-up sequence
    dsi_enable: EN,
}

impl<REG, RST, EN> PowerSequence<REG, RST, EN>
where
    REG: Regulator,
    RST: OutputPin,
    EN: OutputPin,
{
    /// Create a new power sequence from lifetime-held handles
    pub fn new(regulator: REG, reset: RST, dsi_enable: EN) -> Self {
        Self { regulator, reset, dsi_enable }
    }

    /// Bring the panel rail up and take it through reset
    ///
    /// Order: strobe asserted, reset held low, rail enabled, 20 ms rail
    /// settle, reset released high, 120 ms reset recovery, strobe
    /// released. GPIO writes are treated as infallible hardware effects;
    /// a regulator failure aborts before any delay or reset toggling.
    ///
    /// # Errors
    ///
    /// Returns [`PowerError::Regulator`] if the rail could not be enabled.
    /// The caller must not proceed to command sequencing on failure.
    pub fn power_up<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), PowerError<REG::Error>> {
        self.dsi_enable.set_high().ok();
        self.reset.set_low().ok();

        self.regulator.enable().map_err(PowerError::Regulator)?;
        delay.delay_ms(RAIL_SETTLE_MS);

        self.reset.set_high().ok();
        delay.delay_ms(RESET_RECOVERY_MS);

        self.dsi_enable.set_low().ok();
        Ok(())
    }

    /// Drop the panel rail
    ///
    /// The reset line is left at its last driven level; the datasheet does
    /// not mandate a teardown level and driving it here is unverified on
    /// hardware.
    ///
    /// # Errors
    ///
    /// Returns [`PowerError::Regulator`] if the rail could not be disabled.
    pub fn power_down(&mut self) -> Result<(), PowerError<REG::Error>> {
        self.regulator.disable().map_err(PowerError::Regulator)
    }
}
