//! Building a collection out of repeated calls to an element generator,
//! honoring the ambient `size` for its length.
use crate::{atom::Atom, generate::Generate, label, ops, outcome::Case};
use std::marker::PhantomData;

/// Builds a `C` by repeatedly generating elements with `generator`. The
/// length shrinks toward `min` and its unshrunk value grows with `size`.
///
/// # Examples
/// ```
/// # use effigy::{container, range, Generate};
/// let xs = container::<Vec<_>, _>("xs", range("x", 0u8, 9));
/// ```
pub fn container<C, G: Generate>(label: impl Into<Atom>, generator: G) -> Container<C, G> {
    Container {
        label: label.into(),
        generator,
        min: 0,
        max: None,
        _marker: PhantomData,
    }
}

#[derive(Clone, Debug)]
pub struct Container<C, G> {
    label: Atom,
    generator: G,
    min: usize,
    max: Option<usize>,
    _marker: PhantomData<C>,
}

impl<C, G> Container<C, G> {
    /// Sets the minimum length. Defaults to `0`.
    pub fn min(mut self, min: usize) -> Self {
        self.min = min;
        self
    }

    /// Sets an upper bound on the length, overriding the `size`-derived one.
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }
}

impl<C, G> Generate for Container<C, G>
where
    G: Generate,
    C: FromIterator<G::Item>,
{
    type Item = C;

    fn generate(&self) -> Case<C> {
        let _scope = label::label(self.label.clone());
        let budget = self.min + ops::size() as usize;
        let upper = self.max.unwrap_or(budget).max(self.min);
        let span = (upper - self.min) as u64;
        let length = {
            let _len_scope = label::label("len");
            self.min as u64 + ops::shrink_site(span + 1).unwrap_or_else(|| ops::sample(span))
        } as usize;
        let mut items = Vec::with_capacity(length);
        for index in 0..length {
            let _item_scope = label::label(index as u64);
            items.push(self.generator.generate()?);
        }
        Ok(items.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{primitive::range, strategy::{Random, Strategy}};
    use std::cell::RefCell;

    #[test]
    fn respects_min_length() {
        let generator = container::<Vec<_>, _>("xs", range("x", 0u8, 9)).min(3);
        let random = Random::default().with_seed(11).with_max_success(32);
        let shortest = RefCell::new(usize::MAX);
        let _ = random.run(&|| {
            let value: Vec<u8> = generator.generate().unwrap();
            let mut shortest = shortest.borrow_mut();
            *shortest = (*shortest).min(value.len());
            Ok(())
        });
        assert!(*shortest.borrow() >= 3);
    }

    #[test]
    fn respects_explicit_max_length() {
        let generator = container::<Vec<_>, _>("xs", range("x", 0u8, 9)).max(5);
        let random = Random::default()
            .with_seed(3)
            .with_max_success(32)
            .with_max_size(1000);
        let longest = RefCell::new(0usize);
        let _ = random.run(&|| {
            let value: Vec<u8> = generator.generate().unwrap();
            let mut longest = longest.borrow_mut();
            *longest = (*longest).max(value.len());
            Ok(())
        });
        assert!(*longest.borrow() <= 5);
    }
}
