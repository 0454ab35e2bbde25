//! Tagged-union generators: pick one of several differently-typed
//! alternatives, shrinking toward the first.
use crate::{atom::Atom, generate::Generate, label, ops, outcome::Case};

/// Wraps a tuple of generators, producing one of `orn`'s `Or` sum types. The
/// chosen alternative shrinks toward index `0`, same as [`crate::element`].
///
/// # Examples
/// ```
/// # use effigy::{range, same, variant, Generate};
/// let either = variant("either", (range("left", 0i32, 9), same(-1i32)));
/// ```
pub fn variant<T>(label: impl Into<Atom>, generators: T) -> Variant<T> {
    Variant {
        label: label.into(),
        generators,
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Variant<T> {
    label: Atom,
    generators: T,
}

macro_rules! variant {
    ($module:ident, $count:literal, $($index:tt => $name:ident),+) => {
        impl<$($name: Generate),+> Generate for Variant<($($name,)+)> {
            type Item = orn::$module::Or<$($name::Item,)+>;

            fn generate(&self) -> Case<Self::Item> {
                let _scope = label::label(self.label.clone());
                let choice =
                    ops::shrink_site($count).unwrap_or_else(|| ops::sample($count - 1));
                let _choice_scope = label::label(choice);
                match choice {
                    $($index => Ok(orn::$module::Or::$name(self.generators.$index.generate()?)),)+
                    _ => unreachable!("variant selected an index past its arity"),
                }
            }
        }
    };
}

variant!(or2, 2, 0 => T0, 1 => T1);
variant!(or3, 3, 0 => T0, 1 => T1, 2 => T2);
variant!(or4, 4, 0 => T0, 1 => T1, 2 => T2, 3 => T3);
variant!(or5, 5, 0 => T0, 1 => T1, 2 => T2, 3 => T3, 4 => T4);
variant!(or6, 6, 0 => T0, 1 => T1, 2 => T2, 3 => T3, 4 => T4, 5 => T5);
variant!(or7, 7, 0 => T0, 1 => T1, 2 => T2, 3 => T3, 4 => T4, 5 => T5, 6 => T6);
variant!(or8, 8, 0 => T0, 1 => T1, 2 => T2, 3 => T3, 4 => T4, 5 => T5, 6 => T6, 7 => T7);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{primitive::range, strategy::{Random, Strategy}};
    use std::cell::RefCell;

    #[test]
    fn visits_every_alternative_eventually() {
        let generator = variant("pick", (range("a", 0i32, 9), range("b", 100i32, 109)));
        let random = Random::default().with_seed(5).with_max_success(200);
        let firsts = RefCell::new(0u32);
        let seconds = RefCell::new(0u32);
        let _ = random.run(&|| {
            match generator.generate().unwrap() {
                orn::or2::Or::T0(_) => *firsts.borrow_mut() += 1,
                orn::or2::Or::T1(_) => *seconds.borrow_mut() += 1,
            }
            Ok(())
        });
        assert!(*firsts.borrow() > 0);
        assert!(*seconds.borrow() > 0);
    }
}
