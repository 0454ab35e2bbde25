//! The property-check harness: drives a [`Generate`] against a property
//! function using a [`Strategy`], shrinking and reporting the first failure.
use crate::{
    error::EngineError,
    generate::Generate,
    outcome::{panic_message, Case, CaseOutcome, FailureInfo},
    prove::Prove,
    strategy::{self, Nested, Random, Shrinking, Strategy},
};
use core::{
    fmt,
    ops::{Deref, DerefMut},
    panic::AssertUnwindSafe,
};
use std::{borrow::Cow, cell::RefCell, error};

/// Pairs a generator with the [`Strategy`] that drives it.
///
/// `Checker::new` installs [`strategy::default`]: randomized generation
/// nested with retrospective shrinking. Swap in a different strategy with
/// [`Checker::with_strategy`], or reach into the default's fields directly
/// (`checker.strategy.0.seed = 7`).
#[derive(Clone, Debug)]
pub struct Checker<G, S = Nested<Random, Shrinking>> {
    pub generator: G,
    pub strategy: S,
}

/// A failed check: the offending item and why it failed.
#[derive(Clone, Debug)]
pub struct Fail<T, E> {
    pub item: T,
    pub cause: Cause<E>,
}

/// Why a [`Fail`] happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cause<E> {
    /// The check function returned a disproving value.
    Disprove(E),
    /// The check function panicked; the message is captured when it can be.
    Panic(Option<Cow<'static, str>>),
}

/// An extension trait, implemented for every [`Generate`], for running
/// property checks.
pub trait Check: Generate {
    fn checker(self) -> Checker<Self>
    where
        Self: Sized,
    {
        Checker::new(self)
    }

    fn check<P: Prove, F: Fn(Self::Item) -> P>(
        &self,
        check: F,
    ) -> Option<Fail<Self::Item, P::Error>>
    where
        Self::Item: Clone,
    {
        Checker::new(self).check(check)
    }
}

impl<G: Generate + ?Sized> Check for G {}

impl<G: Generate> Checker<G> {
    pub fn new(generator: G) -> Self {
        Checker {
            generator,
            strategy: strategy::default(),
        }
    }
}

impl<G: Generate, S: Strategy> Checker<G, S> {
    pub fn with_strategy<T: Strategy>(self, strategy: T) -> Checker<G, T> {
        Checker {
            generator: self.generator,
            strategy,
        }
    }

    /// Runs `check` against cases drawn from `generator`, shrinking and
    /// returning the first failure, or `None` if every case passed.
    pub fn check<P: Prove, F: Fn(G::Item) -> P>(&self, check: F) -> Option<Fail<G::Item, P::Error>>
    where
        G::Item: Clone,
    {
        let last_item: RefCell<Option<G::Item>> = RefCell::new(None);
        let last_cause: RefCell<Option<Cause<P::Error>>> = RefCell::new(None);
        let body = || -> Case<()> {
            let item = self.generator.generate()?;
            *last_item.borrow_mut() = Some(item.clone());
            match evaluate(item, &check) {
                Ok(_proof) => Ok(()),
                Err(cause) => {
                    let message = message(&cause);
                    *last_cause.borrow_mut() = Some(cause);
                    Err(CaseOutcome::Fail(FailureInfo { message }))
                }
            }
        };
        match self.strategy.run(&body) {
            Ok(()) => None,
            Err(CaseOutcome::Fail(info)) => {
                match (last_item.into_inner(), last_cause.into_inner()) {
                    (Some(item), Some(cause)) => Some(Fail { item, cause }),
                    // The strategy gave up before any case was ever
                    // evaluated (e.g. too many discards in a row) rather
                    // than a case disproving the property.
                    _ => panic!("{}: {}", EngineError::DiscardLimit, info.message),
                }
            }
            Err(CaseOutcome::Discard | CaseOutcome::Succeed) => None,
        }
    }
}

fn evaluate<T, P: Prove>(item: T, check: &impl Fn(T) -> P) -> Result<P::Proof, Cause<P::Error>> {
    match std::panic::catch_unwind(AssertUnwindSafe(|| check(item))) {
        Ok(prove) => prove.prove().map_err(Cause::Disprove),
        Err(payload) => Err(Cause::Panic(Some(panic_message(payload)))),
    }
}

fn message<E>(cause: &Cause<E>) -> Cow<'static, str> {
    match cause {
        Cause::Disprove(_) => Cow::Borrowed("property disproven"),
        Cause::Panic(Some(message)) => message.clone(),
        Cause::Panic(None) => Cow::Borrowed("panicked"),
    }
}

impl<T, E: fmt::Debug> Fail<T, E> {
    /// A human-readable description of the cause: the panic message, or the
    /// `Debug` representation of the disproving value.
    pub fn message(&self) -> Cow<'static, str> {
        match &self.cause {
            Cause::Panic(Some(message)) => message.clone(),
            Cause::Panic(None) => "panicked".into(),
            Cause::Disprove(error) => format!("{error:?}").into(),
        }
    }
}

impl<T, E> Deref for Fail<T, E> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.item
    }
}

impl<T, E> DerefMut for Fail<T, E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.item
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Display for Fail<T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, formatter)
    }
}

impl<T: fmt::Debug, E: fmt::Debug> error::Error for Fail<T, E> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::range;

    #[test]
    fn passes_when_the_property_always_holds() {
        let generator = range("x", 0i32, 10);
        assert!(generator.check(|x| x >= 0 && x <= 10).is_none());
    }

    #[test]
    fn shrinks_a_failure_to_its_minimal_counterexample() {
        let generator = range("x", 0i32, 1000);
        let fail = generator.check(|x| x < 50).expect("property should fail");
        assert_eq!(fail.item, 50);
        assert!(matches!(fail.cause, Cause::Disprove(())));
    }

    #[test]
    fn captures_a_panic_as_the_cause() {
        let generator = range("x", 0i32, 10);
        let fail = generator
            .check(|x| {
                assert!(x < 0, "boom");
            })
            .expect("property should fail");
        assert!(matches!(fail.cause, Cause::Panic(Some(_))));
    }

    #[test]
    fn with_strategy_swaps_out_the_default() {
        use crate::strategy::Limited;

        let generator = range("x", 0i32, 5);
        let checker = generator.checker().with_strategy(Limited::default());
        assert!(checker.check(|x| x >= 0 && x <= 5).is_none());
    }
}
