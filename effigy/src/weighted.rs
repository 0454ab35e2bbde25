//! Picking among alternatives with explicit, non-uniform likelihoods.
use crate::{atom::Atom, generate::Generate, label, ops, outcome::Case};

/// Picks one of `items` in proportion to its `u64` weight, shrinking toward
/// index `0` regardless of weight.
///
/// # Examples
/// ```
/// # use effigy::weighted;
/// let coin = weighted("coin", [(9u64, "heads"), (1, "tails")]);
/// ```
pub fn weighted<T: Clone>(
    label: impl Into<Atom>,
    items: impl IntoIterator<Item = (u64, T)>,
) -> Weighted<T> {
    Weighted {
        label: label.into(),
        items: items.into_iter().collect(),
    }
}

/// Like [`weighted`], but each alternative is itself a generator, consulted
/// only once it has been picked.
pub fn weighted_fn<G: Generate>(
    label: impl Into<Atom>,
    items: impl IntoIterator<Item = (u64, G)>,
) -> WeightedFn<G> {
    WeightedFn {
        label: label.into(),
        items: items.into_iter().collect(),
    }
}

fn pick(weights: &[u64]) -> usize {
    match ops::shrink_site(weights.len() as u64) {
        Some(index) => index as usize,
        None => {
            let total: u64 = weights.iter().sum::<u64>().max(1);
            let mut roll = ops::sample(total - 1);
            let mut chosen = weights.len() - 1;
            for (position, weight) in weights.iter().enumerate() {
                if roll < *weight {
                    chosen = position;
                    break;
                }
                roll = roll.saturating_sub(*weight);
            }
            chosen
        }
    }
}

#[derive(Clone, Debug)]
pub struct Weighted<T> {
    label: Atom,
    items: Vec<(u64, T)>,
}

impl<T: Clone> Generate for Weighted<T> {
    type Item = T;

    fn generate(&self) -> Case<T> {
        let _scope = label::label(self.label.clone());
        ops::guard(!self.items.is_empty())?;
        let weights: Vec<u64> = self.items.iter().map(|(weight, _)| *weight).collect();
        let index = pick(&weights);
        Ok(self.items[index].1.clone())
    }
}

#[derive(Clone, Debug)]
pub struct WeightedFn<G> {
    label: Atom,
    items: Vec<(u64, G)>,
}

impl<G: Generate> Generate for WeightedFn<G> {
    type Item = G::Item;

    fn generate(&self) -> Case<G::Item> {
        let _scope = label::label(self.label.clone());
        ops::guard(!self.items.is_empty())?;
        let weights: Vec<u64> = self.items.iter().map(|(weight, _)| *weight).collect();
        let index = pick(&weights);
        let _choice_scope = label::label(index as u64);
        self.items[index].1.generate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{Random, Strategy};
    use std::cell::RefCell;

    #[test]
    fn favors_the_heavier_alternative() {
        let generator = weighted("coin", [(9u64, "heads"), (1, "tails")]);
        let random = Random::default().with_seed(1).with_max_success(500);
        let heads = RefCell::new(0u32);
        let tails = RefCell::new(0u32);
        let _ = random.run(&|| {
            match generator.generate().unwrap() {
                "heads" => *heads.borrow_mut() += 1,
                _ => *tails.borrow_mut() += 1,
            }
            Ok(())
        });
        assert!(*heads.borrow() > *tails.borrow());
    }
}
