//! Picking one value out of a fixed list of choices.
use crate::{atom::Atom, generate::Generate, label, ops, outcome::Case};

/// Picks one of `items` by value, shrinking toward the first one.
///
/// # Examples
/// ```
/// # use effigy::{element, Generate};
/// let suit = element("suit", ["clubs", "diamonds", "hearts", "spades"]);
/// ```
pub fn element<T: Clone>(label: impl Into<Atom>, items: impl IntoIterator<Item = T>) -> Element<T> {
    Element {
        label: label.into(),
        items: items.into_iter().collect(),
    }
}

/// Picks one of `items` by reference, shrinking toward the first one.
pub fn element_of<'a, T: Clone>(label: impl Into<Atom>, items: &'a [T]) -> ElementOf<'a, T> {
    ElementOf {
        label: label.into(),
        items,
    }
}

#[derive(Clone, Debug)]
pub struct Element<T> {
    label: Atom,
    items: Vec<T>,
}

impl<T: Clone> Generate for Element<T> {
    type Item = T;

    fn generate(&self) -> Case<T> {
        let _scope = label::label(self.label.clone());
        ops::guard(!self.items.is_empty())?;
        let last = (self.items.len() - 1) as u64;
        let index =
            ops::shrink_site(self.items.len() as u64).unwrap_or_else(|| ops::sample(last));
        Ok(self.items[index as usize].clone())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ElementOf<'a, T> {
    label: Atom,
    items: &'a [T],
}

impl<'a, T: Clone> Generate for ElementOf<'a, T> {
    type Item = T;

    fn generate(&self) -> Case<T> {
        let _scope = label::label(self.label.clone());
        ops::guard(!self.items.is_empty())?;
        let last = (self.items.len() - 1) as u64;
        let index =
            ops::shrink_site(self.items.len() as u64).unwrap_or_else(|| ops::sample(last));
        Ok(self.items[index as usize].clone())
    }
}
