//! Non-failure and failure terminations of a single test case.
use std::{any::Any, borrow::Cow, fmt, panic::AssertUnwindSafe};

/// Information captured about a failing test case: the message carried by
/// the panic or `Err` that ended it.
#[derive(Clone, Debug)]
pub struct FailureInfo {
    pub message: Cow<'static, str>,
}

impl fmt::Display for FailureInfo {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.message)
    }
}

/// The three ways a single invocation of a property body can end:
/// `Discard` and `Succeed` are cancellations of the current case (never
/// surfaced to the user); `Fail` carries the information needed to report
/// and shrink the failure.
#[derive(Clone, Debug)]
pub enum CaseOutcome {
    /// The case was inadmissible; try another. Never counted as progress or
    /// as a failure, including when encountered while exploring a shrink
    /// child.
    Discard,
    /// The property is proven; stop iterating.
    Succeed,
    /// Any other failure escaping the body.
    Fail(FailureInfo),
}

impl fmt::Display for CaseOutcome {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseOutcome::Discard => formatter.write_str("case discarded"),
            CaseOutcome::Succeed => formatter.write_str("property proven; iteration stopped"),
            CaseOutcome::Fail(info) => write!(formatter, "property failed: {info}"),
        }
    }
}

impl std::error::Error for CaseOutcome {}

/// The result of running a property body once.
pub type Case<T> = Result<T, CaseOutcome>;

/// Extracts a human-readable message from a panic payload, matching the
/// small set of payload types `std::panic!`/`assert!` actually produce.
pub fn panic_message(payload: Box<dyn Any + Send>) -> Cow<'static, str> {
    if let Ok(message) = payload.downcast::<&'static str>() {
        return Cow::Borrowed(*message);
    }
    let payload: Box<dyn Any + Send> = payload;
    match payload.downcast::<String>() {
        Ok(message) => Cow::Owned(*message),
        Err(payload) => match payload.downcast::<Box<str>>() {
            Ok(message) => Cow::Owned(message.to_string()),
            Err(_) => Cow::Borrowed("<non-string panic payload>"),
        },
    }
}

/// Runs `body`, converting an unwinding panic into `Err(CaseOutcome::Fail)`.
/// An `Err(Discard)` or `Err(Succeed)` returned by `body` itself passes
/// through untouched.
pub fn catch<T>(body: impl FnOnce() -> Case<T>) -> Case<T> {
    match std::panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(result) => result,
        Err(payload) => Err(CaseOutcome::Fail(FailureInfo {
            message: panic_message(payload),
        })),
    }
}
