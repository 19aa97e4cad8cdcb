//! Error types for the driver

use core::fmt::Debug;

use crate::panel::PanelState;
use crate::power::PowerError;
use crate::sequence::SequenceError;

/// Errors that can occur when driving the panel lifecycle
///
/// Generic over the link error `LE` and the regulator error `RE` so the
/// underlying hardware error stays matchable.
#[derive(Debug, PartialEq, Eq)]
pub enum Error<LE, RE> {
    /// A single command-link write failed
    Link(LE),
    /// A step of the init script failed; the payload carries the failing
    /// step index
    Sequence(SequenceError<LE>),
    /// Power sequencing failed
    Power(PowerError<RE>),
    /// A lifecycle call was made from a state that does not support it
    ///
    /// Always a caller bug. The state is never coerced to make the call
    /// legal.
    InvalidTransition {
        /// State the panel was in
        from: PanelState,
        /// The operation that was attempted
        attempted: &'static str,
    },
}

impl<LE, RE> From<SequenceError<LE>> for Error<LE, RE> {
    fn from(err: SequenceError<LE>) -> Self {
        Error::Sequence(err)
    }
}

impl<LE, RE> From<PowerError<RE>> for Error<LE, RE> {
    fn from(err: PowerError<RE>) -> Self {
        Error::Power(err)
    }
}

impl<LE: Debug, RE: Debug> core::fmt::Display for Error<LE, RE> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Link(e) => write!(f, "command link error: {e:?}"),
            Error::Sequence(e) => write!(f, "{e}"),
            Error::Power(e) => write!(f, "{e}"),
            Error::InvalidTransition { from, attempted } => {
                write!(f, "{attempted}() is not valid from the {from:?} state")
            }
        }
    }
}

impl<LE: Debug, RE: Debug> core::error::Error for Error<LE, RE> {}
