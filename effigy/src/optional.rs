//! A generator that may or may not produce a value, growing more likely to
//! produce one as `size` grows.
use crate::{
    atom::Atom,
    generate::Generate,
    label,
    ops::{self, Weight},
    outcome::Case,
};

/// Wraps `generator` so it sometimes yields `None` instead. Shrinks toward
/// `None`.
///
/// # Examples
/// ```
/// # use effigy::{optional, range, Generate};
/// let maybe = optional("maybe", range("x", 0i32, 9));
/// ```
pub fn optional<G: Generate>(label: impl Into<Atom>, generator: G) -> Optional<G> {
    Optional {
        label: label.into(),
        generator,
    }
}

#[derive(Clone, Debug)]
pub struct Optional<G> {
    label: Atom,
    generator: G,
}

impl<G: Generate> Generate for Optional<G> {
    type Item = Option<G::Item>;

    fn generate(&self) -> Case<Option<G::Item>> {
        let _scope = label::label(self.label.clone());
        let present = {
            let _choice_scope = label::label("some");
            ops::shrink_site(2)
                .map(|index| index == 1)
                .unwrap_or_else(|| ops::next(Weight::new(ops::size().max(1)), Weight::new(1)))
        };
        if present {
            let _item_scope = label::label("value");
            Ok(Some(self.generator.generate()?))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{primitive::range, strategy::{Random, Strategy}};
    use std::cell::RefCell;

    #[test]
    fn produces_both_variants_eventually() {
        let generator = optional("maybe", range("x", 0i32, 9));
        let random = Random::default()
            .with_seed(13)
            .with_max_success(200)
            .with_max_size(50);
        let some = RefCell::new(0u32);
        let none = RefCell::new(0u32);
        let _ = random.run(&|| {
            match generator.generate().unwrap() {
                Some(_) => *some.borrow_mut() += 1,
                None => *none.borrow_mut() += 1,
            }
            Ok(())
        });
        assert!(*some.borrow() > 0);
        assert!(*none.borrow() > 0);
    }
}
