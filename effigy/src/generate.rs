//! The `Generate` trait and the small set of combinators built directly on
//! top of it.
//!
//! Unlike the ancestry this crate grew out of, a generator here carries no
//! shrink state of its own: shrinking is wholly the concern of whatever
//! strategy re-invokes the property body (see [`crate::shrink::retrospective`]
//! and [`crate::shrink::forward`]). A generator is just a recipe that calls
//! `label`/`sample`/`shrink_site` each time it runs; running it again under a
//! different decision source naturally produces a different, structurally
//! comparable case.
use crate::outcome::Case;

use crate::{and_then::AndThen, filter::Filter, filter_map::FilterMap, flatten::Flatten, map::Map};

/// Produces one value of `Item` per call, consulting the ambient `sample`/
/// `next`/`shrink_site`/`label` effects.
///
/// # Examples
/// ```
/// # use effigy::{range, Generate};
/// let evens = range("x", 0i32, 100).map(|x| x * 2);
/// ```
#[must_use = "generators do nothing until used"]
pub trait Generate {
    /// The type of the value that this generator produces.
    type Item;

    /// Produces one `Item`, or `Err(CaseOutcome::Discard)` if this call's
    /// inputs turned out to be inadmissible (see [`Self::filter`]).
    fn generate(&self) -> Case<Self::Item>;

    /// Creates a new generator that transforms the output of `self`.
    fn map<T, F: Fn(Self::Item) -> T>(self, map: F) -> Map<Self, F>
    where
        Self: Sized,
    {
        Map(self, map)
    }

    /// Creates a new generator that discards a case whose value fails
    /// `predicate`. A failing predicate is indistinguishable, to the
    /// enclosing strategy, from `guard(false)`.
    fn filter<F: Fn(&Self::Item) -> bool>(self, predicate: F) -> Filter<Self, F>
    where
        Self: Sized,
    {
        Filter(self, predicate)
    }

    /// Filters and maps in one step: `Some(value)` keeps `value`, `None`
    /// discards the case.
    fn filter_map<T, F: Fn(Self::Item) -> Option<T>>(self, transform: F) -> FilterMap<Self, F>
    where
        Self: Sized,
    {
        FilterMap(self, transform)
    }

    /// Creates a generator that depends on the value of `self`: generates a
    /// value, uses it to build a second generator, then generates from that.
    fn and_then<G: Generate, F: Fn(Self::Item) -> G>(self, transform: F) -> AndThen<Self, F>
    where
        Self: Sized,
    {
        AndThen(self, transform)
    }

    /// Flattens a generator of generators, running the inner generator
    /// produced by `self`.
    fn flatten(self) -> Flatten<Self>
    where
        Self: Sized,
        Self::Item: Generate,
    {
        Flatten(self)
    }

    /// Erases this generator's concrete type. Needed for recursive
    /// generators and for returning different generator types from one
    /// function.
    fn boxed(self) -> Box<dyn Generate<Item = Self::Item>>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

impl<G: Generate + ?Sized> Generate for &G {
    type Item = G::Item;

    fn generate(&self) -> Case<Self::Item> {
        (**self).generate()
    }
}

impl<T> Generate for Box<dyn Generate<Item = T>> {
    type Item = T;

    fn generate(&self) -> Case<T> {
        (**self).generate()
    }
}

/// A type with a canonical generator, analogous to `arbitrary` in other
/// property-testing libraries. `#[check(...)]` uses this to fill in
/// arguments left unspecified in the attribute.
pub trait FullGenerate {
    type Item;
    type Generator: Generate<Item = Self::Item>;

    fn generator() -> Self::Generator;
}

/// Converts a value (a range, a slice of choices, a generator already) into
/// a generator. This is the trait argument-position helpers like
/// [`crate::range::range`] and [`crate::container::container`] accept so
/// callers can pass either a ready-made generator or something that implies
/// an obvious one.
pub trait IntoGenerate {
    type Item;
    type Generator: Generate<Item = Self::Item>;

    fn into_generate(self) -> Self::Generator;
}

impl<G: Generate> IntoGenerate for G {
    type Item = G::Item;
    type Generator = G;

    fn into_generate(self) -> G {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::CaseOutcome;

    struct Constant(u64);
    impl Generate for Constant {
        type Item = u64;
        fn generate(&self) -> Case<u64> {
            Ok(self.0)
        }
    }

    #[test]
    fn map_transforms_the_produced_item() {
        let generator = Constant(3).map(|value| value * 2);
        assert_eq!(generator.generate().unwrap(), 6);
    }

    #[test]
    fn filter_discards_on_a_failing_predicate() {
        let generator = Constant(3).filter(|value| *value % 2 == 0);
        assert!(matches!(generator.generate(), Err(CaseOutcome::Discard)));
    }

    #[test]
    fn filter_map_keeps_some_and_discards_none() {
        let keep = Constant(4).filter_map(|value| (value % 2 == 0).then_some(value / 2));
        assert_eq!(keep.generate().unwrap(), 2);
        let drop = Constant(3).filter_map(|value| (value % 2 == 0).then_some(value / 2));
        assert!(matches!(drop.generate(), Err(CaseOutcome::Discard)));
    }
}
