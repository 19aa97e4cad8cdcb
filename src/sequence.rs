//! Init-script interpreter
//!
//! Runs an ordered [`Instruction`] script against a [`CommandLink`],
//! aborting on the first link failure. The interpreter is deliberately
//! stateless: it does not track the panel's current page or deduplicate
//! redundant page switches, so a defensively authored script costs a few
//! extra bus frames but can never be broken by interpreter state drift.

use embedded_hal::delay::DelayNs;

use crate::command::{SET_TEAR_ON, SOFTWARE_RESET_FRAME, TEAR_ON_MODE};
use crate::instruction::Instruction;
use crate::interface::CommandLink;

/// Settle time after a page-switch frame, per vendor init code
const PAGE_SWITCH_SETTLE_US: u32 = 1_000;

/// Settle time after the vendor software-reset frame
const SOFTWARE_RESET_SETTLE_MS: u32 = 10;

/// A script step failed at the link level
///
/// `index` is the position in the script that failed; with a ~120-entry
/// init script this is the only way to tell which register write went
/// wrong, since writes are fire-and-forget. The appended tear-on step
/// reports `index == script.len()`.
#[derive(Debug, PartialEq, Eq)]
pub struct SequenceError<E> {
    /// Zero-based position of the failing step
    pub index: usize,
    /// The instruction that failed
    pub instruction: Instruction,
    /// The underlying link error
    pub source: E,
}

impl<E: core::fmt::Debug> core::fmt::Display for SequenceError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "init script failed at step {} ({:?}): {:?}",
            self.index, self.instruction, self.source
        )
    }
}

impl<E: core::fmt::Debug> core::error::Error for SequenceError<E> {}

/// Run `script` against the link, then enable the tearing signal
///
/// Emits every instruction in script order. On the first link failure the
/// run aborts immediately; nothing is retried or rolled back, and no later
/// step is emitted. The tearing-signal enable is issued after the last
/// script step and reports failure as `index == script.len()`.
///
/// # Errors
///
/// Returns [`SequenceError`] identifying the failing step.
pub fn run<L, D>(
    link: &mut L,
    delay: &mut D,
    script: &[Instruction],
) -> Result<(), SequenceError<L::Error>>
where
    L: CommandLink,
    D: DelayNs,
{
    #[cfg(debug_assertions)]
    if let Err(index) = Instruction::validate(script) {
        log::warn!("init script writes a register before any page switch (step {index})");
    }

    let mut frame = [0u8; 6];
    for (index, instruction) in script.iter().enumerate() {
        let len = instruction.encode(&mut frame);
        link.write(&frame[..len]).map_err(|source| SequenceError {
            index,
            instruction: *instruction,
            source,
        })?;
        if let Instruction::SwitchPage(_) = instruction {
            delay.delay_us(PAGE_SWITCH_SETTLE_US);
        }
    }

    let tear_on = Instruction::WriteRegister { cmd: SET_TEAR_ON, data: TEAR_ON_MODE };
    let len = tear_on.encode(&mut frame);
    link.write(&frame[..len]).map_err(|source| SequenceError {
        index: script.len(),
        instruction: tear_on,
        source,
    })?;

    Ok(())
}

/// Issue the vendor software-reset frame and wait for it to settle
///
/// # Errors
///
/// Returns the link error if the frame write fails.
pub fn software_reset<L, D>(link: &mut L, delay: &mut D) -> Result<(), L::Error>
where
    L: CommandLink,
    D: DelayNs,
{
    link.write(&SOFTWARE_RESET_FRAME)?;
    delay.delay_ms(SOFTWARE_RESET_SETTLE_MS);
    Ok(())
}

/// Write a single parameterless DCS command
///
/// # Errors
///
/// Returns the link error if the frame write fails.
pub fn dcs_command<L: CommandLink>(link: &mut L, command: u8) -> Result<(), L::Error> {
    link.write(&[command])
}
