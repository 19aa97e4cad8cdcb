//! Init-script instructions
//!
//! The panel multiplexes a single 8-bit register space across named pages;
//! only one page decodes register writes at a time. An init script is a
//! flat ordered list of [`Instruction`]s, where every page switch is
//! unconditional and self-contained — the interpreter keeps no page state,
//! so re-issuing a switch is harmless and script authors do it defensively.

use crate::command::switch_page_frame;

/// One step of a panel init script
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Select the register page that subsequent writes decode against
    SwitchPage(u8),
    /// Write one byte to a register on the currently selected page
    WriteRegister {
        /// Register address
        cmd: u8,
        /// Value to write
        data: u8,
    },
}

impl Instruction {
    /// Encode this instruction into `buf`, returning the frame length
    ///
    /// `buf` must hold at least [`MAX_FRAME_LEN`](crate::command::MAX_FRAME_LEN)
    /// bytes. Page switches encode to the fixed 6-byte vendor frame,
    /// register writes to `{cmd, data}`.
    pub fn encode(&self, buf: &mut [u8; 6]) -> usize {
        match *self {
            Instruction::SwitchPage(page) => {
                *buf = switch_page_frame(page);
                6
            }
            Instruction::WriteRegister { cmd, data } => {
                buf[0] = cmd;
                buf[1] = data;
                2
            }
        }
    }

    /// Check that a script never writes a register before selecting a page
    ///
    /// Simulates the panel's page state across `script` and returns the
    /// index of the first [`Instruction::WriteRegister`] issued before any
    /// [`Instruction::SwitchPage`]. This catches script-authoring mistakes
    /// ahead of hardware testing; the sequencer runs it in debug builds.
    pub fn validate(script: &[Instruction]) -> Result<(), usize> {
        let mut page_selected = false;
        for (index, instruction) in script.iter().enumerate() {
            match instruction {
                Instruction::SwitchPage(_) => page_selected = true,
                Instruction::WriteRegister { .. } if !page_selected => return Err(index),
                Instruction::WriteRegister { .. } => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_switch_page() {
        let mut buf = [0u8; 6];
        let len = Instruction::SwitchPage(0x07).encode(&mut buf);
        assert_eq!(len, 6);
        assert_eq!(buf, [0xFF, 0xFF, 0x98, 0x06, 0x04, 0x07]);
    }

    #[test]
    fn test_encode_write_register() {
        let mut buf = [0u8; 6];
        let len = Instruction::WriteRegister { cmd: 0x21, data: 0x01 }.encode(&mut buf);
        assert_eq!(len, 2);
        assert_eq!(buf[..2], [0x21, 0x01]);
    }

    #[test]
    fn test_validate_accepts_page_before_write() {
        let script = [
            Instruction::SwitchPage(0x01),
            Instruction::WriteRegister { cmd: 0x08, data: 0x10 },
        ];
        assert_eq!(Instruction::validate(&script), Ok(()));
    }

    #[test]
    fn test_validate_flags_write_before_any_page() {
        let script = [
            Instruction::WriteRegister { cmd: 0x08, data: 0x10 },
            Instruction::SwitchPage(0x01),
        ];
        assert_eq!(Instruction::validate(&script), Err(0));
    }

    #[test]
    fn test_validate_empty_script() {
        assert_eq!(Instruction::validate(&[]), Ok(()));
    }
}
