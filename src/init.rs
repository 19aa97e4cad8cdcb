//! Panel initialization script
//!
//! The vendor-documented power-on register script for the ILI9806E. The
//! byte values are fixed configuration data and must not be altered; they
//! were taken verbatim from the panel vendor's init code.
//!
//! The script is a single immutable static. It is never mutated at
//! runtime and never extended per-panel; board-level variation belongs in
//! [`Config`](crate::config::Config), not here.

use crate::instruction::Instruction;

const fn page(page: u8) -> Instruction {
    Instruction::SwitchPage(page)
}

const fn reg(cmd: u8, data: u8) -> Instruction {
    Instruction::WriteRegister { cmd, data }
}

/// Full init script, run once per `enable()` after the software reset
pub static INIT_SEQUENCE: [Instruction; 112] = [
    page(0x01),
    reg(0x08, 0x10), // output SDA
    reg(0x21, 0x01), // DE active high
    reg(0x30, 0x02), // 480x800
    reg(0x31, 0x02), // 2-dot inversion
    reg(0x40, 0x16), // AVDD/AVEE
    reg(0x41, 0x33), // AVDD/AVEE
    reg(0x42, 0x02), // VGH/VGL
    reg(0x43, 0x09), // VGH
    reg(0x44, 0x09), // VGL
    reg(0x50, 0x78), // VGMP 4.5V
    reg(0x51, 0x78), // VGMN 4.5V
    reg(0x52, 0x00), // flicker
    reg(0x53, 0x5E), // flicker
    reg(0x60, 0x07), // SDTI
    reg(0x61, 0x00), // CRTI
    reg(0x62, 0x08), // EQTI
    reg(0x63, 0x00), // PCTI
    // The vendor script re-selects page 1 here even though it is already
    // active; the switch is idempotent and kept as authored.
    page(0x01),
    // Positive gamma
    reg(0xA0, 0x00),
    reg(0xA1, 0x1B),
    reg(0xA2, 0x24),
    reg(0xA3, 0x11),
    reg(0xA4, 0x07),
    reg(0xA5, 0x0C),
    reg(0xA6, 0x08),
    reg(0xA7, 0x05),
    reg(0xA8, 0x06),
    reg(0xA9, 0x0B),
    reg(0xAA, 0x0E),
    reg(0xAB, 0x07),
    reg(0xAC, 0x0E),
    reg(0xAD, 0x12),
    reg(0xAE, 0x0C),
    reg(0xAF, 0x00),
    // Negative gamma
    reg(0xC0, 0x00),
    reg(0xC1, 0x1C),
    reg(0xC2, 0x24),
    reg(0xC3, 0x11),
    reg(0xC4, 0x07),
    reg(0xC5, 0x0C),
    reg(0xC6, 0x08),
    reg(0xC7, 0x06),
    reg(0xC8, 0x07),
    reg(0xC9, 0x0A),
    reg(0xCA, 0x0E),
    reg(0xCB, 0x07),
    reg(0xCC, 0x0D),
    reg(0xCD, 0x11),
    reg(0xCE, 0x0C),
    reg(0xCF, 0x00),
    // GIP timing
    page(0x06),
    reg(0x00, 0x20),
    reg(0x01, 0x04),
    reg(0x02, 0x00),
    reg(0x03, 0x00),
    reg(0x04, 0x16),
    reg(0x05, 0x16),
    reg(0x06, 0x88),
    reg(0x07, 0x02),
    reg(0x08, 0x01),
    reg(0x09, 0x00),
    reg(0x0A, 0x00),
    reg(0x0B, 0x00),
    reg(0x0C, 0x16),
    reg(0x0D, 0x16),
    reg(0x0E, 0x00),
    reg(0x0F, 0x00),
    reg(0x10, 0x50),
    reg(0x11, 0x52),
    reg(0x12, 0x00),
    reg(0x13, 0x00),
    reg(0x14, 0x00),
    reg(0x15, 0x43),
    reg(0x16, 0x0B),
    reg(0x17, 0x00),
    reg(0x18, 0x00),
    reg(0x19, 0x00),
    reg(0x1A, 0x00),
    reg(0x1B, 0x00),
    reg(0x1C, 0x00),
    reg(0x1D, 0x00),
    reg(0x20, 0x01),
    reg(0x21, 0x23),
    reg(0x22, 0x45),
    reg(0x23, 0x67),
    reg(0x24, 0x01),
    reg(0x25, 0x23),
    reg(0x26, 0x45),
    reg(0x27, 0x67),
    reg(0x30, 0x13),
    reg(0x31, 0x11),
    reg(0x32, 0x00),
    reg(0x33, 0x22),
    reg(0x34, 0x22),
    reg(0x36, 0x22),
    reg(0x37, 0xAA),
    reg(0x38, 0xBB),
    reg(0x39, 0x66),
    reg(0x3A, 0x22),
    reg(0x3B, 0x22),
    reg(0x3C, 0x22),
    reg(0x3D, 0x22),
    reg(0x3E, 0x22),
    reg(0x3F, 0x22),
    reg(0x40, 0x22),
    page(0x07),
    reg(0x17, 0x22),
    reg(0x02, 0x77),
    // Page 0 holds the standard DCS commands
    page(0x00),
    reg(0x11, 0x00), // sleep out
    reg(0x29, 0x00), // display on
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_sequence_starts_with_page_switch() {
        assert_eq!(INIT_SEQUENCE[0], Instruction::SwitchPage(0x01));
    }

    #[test]
    fn test_init_sequence_passes_page_validation() {
        assert_eq!(Instruction::validate(&INIT_SEQUENCE), Ok(()));
    }

    #[test]
    fn test_init_sequence_ends_with_display_on() {
        assert_eq!(
            *INIT_SEQUENCE.last().unwrap(),
            Instruction::WriteRegister { cmd: 0x29, data: 0x00 }
        );
    }

    #[test]
    fn test_init_sequence_switches_every_documented_page() {
        let pages: alloc::vec::Vec<u8> = INIT_SEQUENCE
            .iter()
            .filter_map(|i| match i {
                Instruction::SwitchPage(p) => Some(*p),
                _ => None,
            })
            .collect();
        assert_eq!(pages, [0x01, 0x01, 0x06, 0x07, 0x00]);
    }
}
