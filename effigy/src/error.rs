//! Engine-level failures: conditions that abort a check run before any
//! property evaluation could even produce a verdict, as distinct from
//! [`crate::check::Fail`], which reports a disproven or panicking property.
use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// A strategy discarded too many cases in a row without reaching
    /// `max_success` passing ones.
    DiscardLimit,
    /// The handler stack exceeded its capacity. Unreachable in this
    /// implementation, since the stack is a growable `HashMap`; kept so the
    /// type honestly documents the fixed-size-implementation failure mode.
    HandlerSaturation,
}

impl fmt::Display for EngineError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::DiscardLimit => formatter.write_str("too many cases were discarded"),
            EngineError::HandlerSaturation => {
                formatter.write_str("the handler stack is saturated")
            }
        }
    }
}

impl std::error::Error for EngineError {}
