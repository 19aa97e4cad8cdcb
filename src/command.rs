//! ILI9806E command definitions
//!
//! The panel decodes two kinds of frames on the command link:
//!
//! - Standard DCS commands (sleep, display on/off, brightness, tearing
//!   signal), sent as a single command byte with optional parameters.
//! - Vendor page-banked register writes, sent as `{register, value}` pairs.
//!   Which bank a register byte decodes against depends on the currently
//!   selected page, switched with [`switch_page_frame`].

// Standard DCS commands

/// Enter sleep mode (0x10)
///
/// Puts the panel into its low-power sleep state. Issued during teardown
/// before the supply rail is dropped.
pub const ENTER_SLEEP_MODE: u8 = 0x10;
/// Exit sleep mode (0x11)
pub const EXIT_SLEEP_MODE: u8 = 0x11;
/// Display off (0x28)
pub const SET_DISPLAY_OFF: u8 = 0x28;
/// Display on (0x29)
pub const SET_DISPLAY_ON: u8 = 0x29;
/// Tearing effect line on (0x35)
///
/// Enables the panel's tearing signal so the video source can avoid
/// updating the frame buffer mid-scanout.
pub const SET_TEAR_ON: u8 = 0x35;
/// Set display brightness (0x51)
pub const SET_DISPLAY_BRIGHTNESS: u8 = 0x51;
/// Get display brightness (0x52)
///
/// Only usable when the command link supports read-back.
pub const GET_DISPLAY_BRIGHTNESS: u8 = 0x52;

/// Tear-on mode parameter issued after the init sequence
pub const TEAR_ON_MODE: u8 = 0x22;

// Vendor frames

/// Fixed prefix of the page-switch frame
///
/// `0xFF` followed by the Ilitek manufacturer ID. The panel treats the full
/// 6-byte frame as "unlock register bank"; the prefix must be reproduced
/// byte-for-byte or the panel ignores the switch.
pub const SWITCH_PAGE_PREFIX: [u8; 5] = [0xFF, 0xFF, 0x98, 0x06, 0x04];

/// Vendor software-reset frame
///
/// Issued once before the init sequence. Needs ~10 ms to settle.
pub const SOFTWARE_RESET_FRAME: [u8; 6] = [0xFF, 0x00, 0x00, 0x00, 0x00, 0x00];

/// Length of the longest frame the driver emits
pub const MAX_FRAME_LEN: usize = 6;

/// Build the 6-byte page-switch frame for `page`
pub const fn switch_page_frame(page: u8) -> [u8; 6] {
    [
        SWITCH_PAGE_PREFIX[0],
        SWITCH_PAGE_PREFIX[1],
        SWITCH_PAGE_PREFIX[2],
        SWITCH_PAGE_PREFIX[3],
        SWITCH_PAGE_PREFIX[4],
        page,
    ]
}
