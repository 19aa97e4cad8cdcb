//! Panel lifecycle state machine
//!
//! [`Panel`] is the only type the platform binding layer drives. It owns
//! the command link, the power lines and the backlight state, and walks
//! the canonical lifecycle `prepare -> enable -> disable -> unprepare`.
//! Calls out of order fail fast with
//! [`Error::InvalidTransition`](crate::error::Error::InvalidTransition);
//! the state is never silently coerced.
//!
//! All operations are synchronous and blocking. Settling delays are real
//! sleeps on the calling context, and a transition runs to completion or
//! to its first unrecoverable error; there is no cancellation and no
//! retry.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::backlight::{Backlight, BacklightState};
use crate::command::{ENTER_SLEEP_MODE, SET_DISPLAY_OFF};
use crate::config::{Config, ErrorPolicy};
use crate::error::Error;
use crate::init::INIT_SEQUENCE;
use crate::interface::CommandLink;
use crate::power::{PowerSequence, Regulator};
use crate::sequence;

/// Lifecycle state of the panel
///
/// Owned exclusively by [`Panel`]; transitions happen only through the
/// four lifecycle operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelState {
    /// Rail down, panel held in reset
    #[default]
    Unprepared,
    /// Rail up and reset released, init script not yet run
    Prepared,
    /// Init script applied, panel scanning out, backlight on
    Enabled,
    /// Display and backlight off, rail still up
    ///
    /// Behaviourally equivalent to [`PanelState::Prepared`]: `enable()`
    /// and `unprepare()` are both legal from here.
    Disabled,
}

/// Panel lifecycle controller
///
/// ## Type Parameters
///
/// * `L` - Command link implementing [`CommandLink`]
/// * `REG` - Supply regulator implementing [`Regulator`]
/// * `RST` - Reset line implementing [`OutputPin`]
/// * `EN` - DSI-enable strobe implementing [`OutputPin`]
///
/// ## Example
///
/// ```rust,ignore
/// use ili9806e::{Builder, Panel, PowerSequence};
///
/// let power = PowerSequence::new(regulator, reset_pin, dsi_enable_pin);
/// let mut panel = Panel::new(link, power, Builder::new().build());
///
/// panel.prepare(&mut delay)?;
/// panel.enable(&mut delay)?;
/// // ... video pipeline scans out ...
/// panel.disable()?;
/// panel.unprepare()?;
/// ```
pub struct Panel<L, REG, RST, EN> {
    /// Command link to the panel
    link: L,
    /// Power, reset and strobe lines
    power: PowerSequence<REG, RST, EN>,
    /// Cached backlight state
    backlight: BacklightState,
    /// Panel configuration
    config: Config,
    /// Current lifecycle state
    state: PanelState,
}

impl<L, REG, RST, EN> Panel<L, REG, RST, EN>
where
    L: CommandLink,
    REG: Regulator,
    RST: OutputPin,
    EN: OutputPin,
{
    /// Create a new panel in the [`PanelState::Unprepared`] state
    ///
    /// The link and power handles are acquired by the platform binding
    /// layer and held here for the panel's whole lifetime.
    pub fn new(link: L, power: PowerSequence<REG, RST, EN>, config: Config) -> Self {
        Self {
            link,
            power,
            backlight: BacklightState::new(),
            config,
            state: PanelState::Unprepared,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Panel configuration, including the video timing descriptor
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Borrow the backlight handle
    ///
    /// Hand this to the backlight subsystem's brightness hooks. The
    /// mutable borrow guarantees brightness I/O cannot interleave with a
    /// lifecycle transition on the shared link. Brightness writes are only
    /// meaningful while the panel is [`PanelState::Enabled`].
    pub fn backlight(&mut self) -> Backlight<'_, L> {
        Backlight::new(&mut self.link, &mut self.backlight)
    }

    /// Power the panel and take it through reset
    ///
    /// `Unprepared -> Prepared`. No command frame is emitted; a power
    /// failure leaves the state at [`PanelState::Unprepared`].
    ///
    /// # Errors
    ///
    /// [`Error::Power`] if the rail could not be enabled, or
    /// [`Error::InvalidTransition`] when not `Unprepared`.
    pub fn prepare<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<L::Error, REG::Error>> {
        if self.state != PanelState::Unprepared {
            return Err(self.invalid("prepare"));
        }

        self.power.power_up(delay)?;
        self.state = PanelState::Prepared;
        log::debug!("panel prepared");
        Ok(())
    }

    /// Run the init script and light the backlight
    ///
    /// `Prepared|Disabled -> Enabled`. Switches the link to its low-power
    /// command mode, issues the software reset, runs the full init script
    /// plus tear-on, then enables the backlight.
    ///
    /// With [`ErrorPolicy::Strict`] any script or backlight failure fails
    /// the transition and leaves the state unchanged; the caller must
    /// treat the panel as non-functional rather than scan out onto it.
    /// With [`ErrorPolicy::BestEffort`] failures are logged, the backlight
    /// is enabled anyway and the transition completes.
    ///
    /// # Errors
    ///
    /// [`Error::Sequence`] with the failing step index, [`Error::Link`]
    /// for the reset/mode/backlight writes, or
    /// [`Error::InvalidTransition`].
    pub fn enable<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<L::Error, REG::Error>> {
        if !matches!(self.state, PanelState::Prepared | PanelState::Disabled) {
            return Err(self.invalid("enable"));
        }
        let strict = self.config.policy == ErrorPolicy::Strict;

        // The init script is sent in low-power command mode.
        if let Err(e) = self.link.set_low_power(true) {
            if strict {
                return Err(Error::Link(e));
            }
            log::warn!("failed to enter low-power command mode: {e:?}");
        }

        let scripted = sequence::software_reset(&mut self.link, delay)
            .map_err(Error::Link)
            .and_then(|()| {
                sequence::run(&mut self.link, delay, &INIT_SEQUENCE).map_err(Error::from)
            });
        if let Err(e) = scripted {
            if strict {
                return Err(e);
            }
            log::warn!("panel init failed, enabling backlight anyway: {e}");
        }

        if let Err(e) = Backlight::new(&mut self.link, &mut self.backlight).enable() {
            if strict {
                return Err(Error::Link(e));
            }
            log::warn!("failed to enable backlight: {e:?}");
        }

        self.state = PanelState::Enabled;
        log::debug!("panel enabled");
        Ok(())
    }

    /// Blank the panel
    ///
    /// `Enabled -> Disabled`. The backlight is switched off first so the
    /// blanking is not visible as a lit white frame; a backlight failure
    /// is logged and does not block the display-off write. Both steps
    /// always run and the state commits regardless.
    ///
    /// # Errors
    ///
    /// [`Error::Link`] if the display-off write failed, or
    /// [`Error::InvalidTransition`] when not `Enabled`.
    pub fn disable(&mut self) -> Result<(), Error<L::Error, REG::Error>> {
        if self.state != PanelState::Enabled {
            return Err(self.invalid("disable"));
        }

        if let Err(e) = Backlight::new(&mut self.link, &mut self.backlight).disable() {
            log::warn!("failed to disable backlight: {e:?}");
        }

        let off = sequence::dcs_command(&mut self.link, SET_DISPLAY_OFF).map_err(Error::Link);
        self.state = PanelState::Disabled;
        log::debug!("panel disabled");
        off
    }

    /// Put the panel to sleep and drop its rail
    ///
    /// `Prepared|Disabled -> Unprepared`. The sleep-mode write is
    /// best-effort: leaving the rail energized on a half-failed teardown
    /// is the worse failure mode, so the regulator is always disabled and
    /// the state always commits, even when the regulator itself reports an
    /// error.
    ///
    /// # Errors
    ///
    /// [`Error::Power`] if the regulator could not be disabled, or
    /// [`Error::InvalidTransition`] when not `Prepared` or `Disabled`.
    pub fn unprepare(&mut self) -> Result<(), Error<L::Error, REG::Error>> {
        if !matches!(self.state, PanelState::Prepared | PanelState::Disabled) {
            return Err(self.invalid("unprepare"));
        }

        if let Err(e) = sequence::dcs_command(&mut self.link, ENTER_SLEEP_MODE) {
            log::warn!("failed to enter sleep mode: {e:?}");
        }

        let result = self.power.power_down().map_err(Error::from);
        self.state = PanelState::Unprepared;
        log::debug!("panel unprepared");
        result
    }

    /// Release the link and power handles
    pub fn release(self) -> (L, PowerSequence<REG, RST, EN>) {
        (self.link, self.power)
    }

    fn invalid(&self, attempted: &'static str) -> Error<L::Error, REG::Error> {
        Error::InvalidTransition { from: self.state, attempted }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Builder;
    use crate::instruction::Instruction;
    use crate::sequence::SequenceError;
    use alloc::vec::Vec;
    use core::convert::Infallible;

    #[derive(Debug, PartialEq, Eq)]
    struct LinkFault;

    struct MockLink {
        frames: Vec<Vec<u8>>,
        low_power: Vec<bool>,
        fail_write_at: Option<usize>,
        writes_seen: usize,
    }

    impl MockLink {
        fn new() -> Self {
            Self {
                frames: Vec::new(),
                low_power: Vec::new(),
                fail_write_at: None,
                writes_seen: 0,
            }
        }

        fn failing_at(write_index: usize) -> Self {
            Self { fail_write_at: Some(write_index), ..Self::new() }
        }
    }

    impl CommandLink for MockLink {
        type Error = LinkFault;

        fn write(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
            let index = self.writes_seen;
            self.writes_seen += 1;
            if self.fail_write_at == Some(index) {
                return Err(LinkFault);
            }
            self.frames.push(frame.to_vec());
            Ok(())
        }

        fn set_low_power(&mut self, enabled: bool) -> Result<(), Self::Error> {
            self.low_power.push(enabled);
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    struct MockRegulator {
        enabled: bool,
        disable_count: usize,
        fail_enable: bool,
    }

    impl Regulator for MockRegulator {
        type Error = ();

        fn enable(&mut self) -> Result<(), ()> {
            if self.fail_enable {
                return Err(());
            }
            self.enabled = true;
            Ok(())
        }

        fn disable(&mut self) -> Result<(), ()> {
            self.enabled = false;
            self.disable_count += 1;
            Ok(())
        }
    }

    struct MockPin;

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    struct MockDelay;
    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    type TestPanel<'a> = Panel<MockLink, &'a mut MockRegulator, MockPin, MockPin>;

    fn panel(regulator: &mut MockRegulator, link: MockLink) -> TestPanel<'_> {
        Panel::new(
            link,
            PowerSequence::new(regulator, MockPin, MockPin),
            Builder::new().build(),
        )
    }

    fn best_effort_panel(regulator: &mut MockRegulator, link: MockLink) -> TestPanel<'_> {
        Panel::new(
            link,
            PowerSequence::new(regulator, MockPin, MockPin),
            Builder::new().policy(ErrorPolicy::BestEffort).build(),
        )
    }

    // Writes per enable(): software reset + init script + tear-on + backlight
    const ENABLE_WRITES: usize = 1 + INIT_SEQUENCE.len() + 1 + 1;

    #[test]
    fn test_only_prepare_is_legal_from_unprepared() {
        let mut regulator = MockRegulator::default();
        let mut panel = panel(&mut regulator, MockLink::new());

        let err = panel.enable(&mut MockDelay).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidTransition { from: PanelState::Unprepared, attempted: "enable" }
        );
        assert_eq!(
            panel.disable().unwrap_err(),
            Error::InvalidTransition { from: PanelState::Unprepared, attempted: "disable" }
        );
        assert_eq!(
            panel.unprepare().unwrap_err(),
            Error::InvalidTransition { from: PanelState::Unprepared, attempted: "unprepare" }
        );
        assert_eq!(panel.state(), PanelState::Unprepared);
    }

    #[test]
    fn test_prepare_twice_is_an_error() {
        let mut regulator = MockRegulator::default();
        let mut panel = panel(&mut regulator, MockLink::new());
        panel.prepare(&mut MockDelay).unwrap();
        assert_eq!(
            panel.prepare(&mut MockDelay).unwrap_err(),
            Error::InvalidTransition { from: PanelState::Prepared, attempted: "prepare" }
        );
    }

    #[test]
    fn test_full_cycle_returns_to_unprepared() {
        let mut regulator = MockRegulator::default();
        let mut panel = panel(&mut regulator, MockLink::new());
        let mut delay = MockDelay;

        panel.prepare(&mut delay).unwrap();
        assert_eq!(panel.state(), PanelState::Prepared);
        panel.enable(&mut delay).unwrap();
        assert_eq!(panel.state(), PanelState::Enabled);
        panel.disable().unwrap();
        assert_eq!(panel.state(), PanelState::Disabled);
        panel.unprepare().unwrap();
        assert_eq!(panel.state(), PanelState::Unprepared);

        let (link, _) = panel.release();
        assert!(!regulator.enabled);
        assert_eq!(regulator.disable_count, 1);
        // Teardown frames: backlight off, display off, enter sleep
        let n = link.frames.len();
        assert_eq!(link.frames[n - 3], [0x51, 0x00].to_vec());
        assert_eq!(link.frames[n - 2], [SET_DISPLAY_OFF].to_vec());
        assert_eq!(link.frames[n - 1], [ENTER_SLEEP_MODE].to_vec());
    }

    #[test]
    fn test_failed_prepare_sends_no_frames_and_stays_unprepared() {
        let mut regulator = MockRegulator { fail_enable: true, ..Default::default() };
        let mut panel = panel(&mut regulator, MockLink::new());

        let err = panel.prepare(&mut MockDelay).unwrap_err();
        assert!(matches!(err, Error::Power(_)));
        assert_eq!(panel.state(), PanelState::Unprepared);
        let (link, _) = panel.release();
        assert!(link.frames.is_empty());
    }

    #[test]
    fn test_strict_enable_fails_on_script_fault_without_backlight() {
        let mut regulator = MockRegulator::default();
        // Fault on the write after the software reset: script step 0
        let mut panel = panel(&mut regulator, MockLink::failing_at(1));
        let mut delay = MockDelay;

        panel.prepare(&mut delay).unwrap();
        let err = panel.enable(&mut delay).unwrap_err();
        assert_eq!(
            err,
            Error::Sequence(SequenceError {
                index: 0,
                instruction: Instruction::SwitchPage(0x01),
                source: LinkFault,
            })
        );
        assert_eq!(panel.state(), PanelState::Prepared);
        let (link, _) = panel.release();
        assert!(!link.frames.iter().any(|f| f[0] == 0x51));
    }

    #[test]
    fn test_best_effort_enable_lights_backlight_despite_script_fault() {
        let mut regulator = MockRegulator::default();
        let mut panel = best_effort_panel(&mut regulator, MockLink::failing_at(1));
        let mut delay = MockDelay;

        panel.prepare(&mut delay).unwrap();
        panel.enable(&mut delay).unwrap();
        assert_eq!(panel.state(), PanelState::Enabled);
        let (link, _) = panel.release();
        assert!(link.frames.iter().any(|f| f[0] == 0x51));
    }

    #[test]
    fn test_enable_emits_full_script_in_low_power_mode() {
        let mut regulator = MockRegulator::default();
        let mut panel = panel(&mut regulator, MockLink::new());
        let mut delay = MockDelay;

        panel.prepare(&mut delay).unwrap();
        panel.enable(&mut delay).unwrap();

        let (link, _) = panel.release();
        assert_eq!(link.frames.len(), ENABLE_WRITES);
        // Init in LPM, backlight with LPM off
        assert_eq!(link.low_power, [true, false]);
        // Tear-on follows the script, backlight write is last
        assert_eq!(link.frames[ENABLE_WRITES - 2], [0x35, 0x22].to_vec());
        assert_eq!(link.frames[ENABLE_WRITES - 1], [0x51, 0xFF].to_vec());
    }

    #[test]
    fn test_unprepare_drops_rail_even_when_sleep_write_fails() {
        let mut regulator = MockRegulator::default();
        let mut link = MockLink::new();
        // Make the next write (the sleep command) fail
        link.fail_write_at = Some(0);
        let mut panel = panel(&mut regulator, link);
        let mut delay = MockDelay;

        panel.prepare(&mut delay).unwrap();
        panel.unprepare().unwrap();
        assert_eq!(panel.state(), PanelState::Unprepared);
        assert!(!regulator.enabled);
        assert_eq!(regulator.disable_count, 1);
    }

    #[test]
    fn test_reenable_from_disabled_is_legal() {
        let mut regulator = MockRegulator::default();
        let mut panel = panel(&mut regulator, MockLink::new());
        let mut delay = MockDelay;

        panel.prepare(&mut delay).unwrap();
        panel.enable(&mut delay).unwrap();
        panel.disable().unwrap();
        panel.enable(&mut delay).unwrap();
        assert_eq!(panel.state(), PanelState::Enabled);
    }

    #[test]
    fn test_disable_turns_backlight_off_before_display_off() {
        let mut regulator = MockRegulator::default();
        let mut panel = panel(&mut regulator, MockLink::new());
        let mut delay = MockDelay;

        panel.prepare(&mut delay).unwrap();
        panel.enable(&mut delay).unwrap();
        panel.disable().unwrap();

        let (link, _) = panel.release();
        let backlight_off = link
            .frames
            .iter()
            .position(|f| f == &[0x51, 0x00].to_vec())
            .unwrap();
        let display_off = link
            .frames
            .iter()
            .position(|f| f == &[SET_DISPLAY_OFF].to_vec())
            .unwrap();
        assert!(backlight_off < display_off);
    }

    #[test]
    fn test_brightness_survives_disable_enable_cycle() {
        let mut regulator = MockRegulator::default();
        let mut panel = panel(&mut regulator, MockLink::new());
        let mut delay = MockDelay;

        panel.prepare(&mut delay).unwrap();
        panel.enable(&mut delay).unwrap();
        panel.backlight().set_brightness(128).unwrap();
        panel.disable().unwrap();
        panel.enable(&mut delay).unwrap();

        assert_eq!(panel.backlight().get_brightness().unwrap(), 128);
        let (link, _) = panel.release();
        // The re-enable re-asserted the cached brightness
        assert_eq!(*link.frames.last().unwrap(), [0x51, 128].to_vec());
    }
}
