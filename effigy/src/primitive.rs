//! Generators for the primitive scalar types: integers, floats, `bool` and
//! `char`, all built on [`crate::ops::sample`]/[`crate::ops::shrink_site`].
use crate::{
    atom::Atom,
    generate::Generate,
    label,
    ops::{self, Weight},
    outcome::Case,
};

/// A type that knows how to turn an inclusive `[min, max]` bound into a
/// concrete [`Generate`] implementation. Implemented for every integer and
/// floating-point primitive; dispatched through [`range`].
pub trait Rangeable: Sized + Copy {
    type Generator: Generate<Item = Self>;

    fn ranged(label: Atom, min: Self, max: Self) -> Self::Generator;
}

/// A uniformly distributed value in `[min, max]`, shrinking toward `min`.
///
/// # Examples
/// ```
/// # use effigy::{range, Generate};
/// let die = range("roll", 1u8, 6u8);
/// ```
pub fn range<T: Rangeable>(label: impl Into<Atom>, min: T, max: T) -> T::Generator {
    T::ranged(label.into(), min, max)
}

#[derive(Clone, Copy, Debug)]
pub struct Range<T> {
    label: Atom,
    min: T,
    max: T,
}

macro_rules! integer {
    ($type:ty) => {
        impl Rangeable for $type {
            type Generator = Range<$type>;

            fn ranged(label: Atom, min: Self, max: Self) -> Self::Generator {
                Range { label, min, max }
            }
        }

        impl Generate for Range<$type> {
            type Item = $type;

            fn generate(&self) -> Case<$type> {
                let _scope = label::label(self.label.clone());
                let span = (self.max as i128 - self.min as i128) as u64;
                let offset = ops::shrink_site(span.saturating_add(1))
                    .unwrap_or_else(|| ops::sample(span));
                Ok((self.min as i128 + offset as i128) as $type)
            }
        }
    };
}

integer!(i8);
integer!(i16);
integer!(i32);
integer!(i64);
integer!(isize);
integer!(u8);
integer!(u16);
integer!(u32);
integer!(u64);
integer!(usize);

#[derive(Clone, Copy, Debug)]
pub struct FloatRange<T> {
    label: Atom,
    min: T,
    max: T,
}

const FLOAT_RESOLUTION: u64 = 1 << 32;

macro_rules! float {
    ($type:ty) => {
        impl Rangeable for $type {
            type Generator = FloatRange<$type>;

            fn ranged(label: Atom, min: Self, max: Self) -> Self::Generator {
                FloatRange { label, min, max }
            }
        }

        impl Generate for FloatRange<$type> {
            type Item = $type;

            fn generate(&self) -> Case<$type> {
                let _scope = label::label(self.label.clone());
                let offset = ops::shrink_site(FLOAT_RESOLUTION + 1)
                    .unwrap_or_else(|| ops::sample(FLOAT_RESOLUTION));
                let fraction = offset as f64 / FLOAT_RESOLUTION as f64;
                let min = self.min as f64;
                let max = self.max as f64;
                Ok((min + (max - min) * fraction) as $type)
            }
        }
    };
}

float!(f32);
float!(f64);

/// A `bool`, shrinking toward `false`.
#[derive(Clone, Copy, Debug)]
pub struct Bool {
    label: Atom,
}

pub fn boolean(label: impl Into<Atom>) -> Bool {
    Bool {
        label: label.into(),
    }
}

impl Generate for Bool {
    type Item = bool;

    fn generate(&self) -> Case<bool> {
        let _scope = label::label(self.label.clone());
        let offset = ops::shrink_site(2).unwrap_or_else(|| {
            ops::next(Weight::new(1), Weight::new(1)) as u64
        });
        Ok(offset != 0)
    }
}

/// A `char` whose codepoint lies in `[min, max]` (as `u32` codepoints),
/// skipping the surrogate range `0xD800..=0xDFFF`, which is never a valid
/// `char`.
#[derive(Clone, Copy, Debug)]
pub struct CharRange {
    label: Atom,
    min: u32,
    max: u32,
}

pub fn char_range(label: impl Into<Atom>, min: char, max: char) -> CharRange {
    CharRange {
        label: label.into(),
        min: min as u32,
        max: max as u32,
    }
}

impl Generate for CharRange {
    type Item = char;

    fn generate(&self) -> Case<char> {
        let _scope = label::label(self.label.clone());
        let span = (self.max - self.min) as u64;
        let offset = ops::shrink_site(span.saturating_add(1)).unwrap_or_else(|| ops::sample(span));
        let codepoint = self.min + offset as u32;
        let codepoint = if (0xD800..=0xDFFF).contains(&codepoint) {
            0xDFFF + 1
        } else {
            codepoint
        };
        Ok(char::from_u32(codepoint).unwrap_or('\u{FFFD}'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{Random, Strategy};
    use std::cell::RefCell;

    fn collect<T>(count: usize, generate: impl Fn() -> T) -> Vec<T> {
        let values = RefCell::new(Vec::new());
        let random = Random::default().with_seed(7).with_max_success(count);
        let _ = random.run(&|| {
            values.borrow_mut().push(generate());
            Ok(())
        });
        values.into_inner()
    }

    #[test]
    fn range_stays_within_bounds() {
        let generator = range("x", 10u32, 20u32);
        for value in collect(64, || generator.generate().unwrap()) {
            assert!((10..=20).contains(&value));
        }
    }

    #[test]
    fn negative_integer_range() {
        let generator = range("x", -5i32, 5i32);
        for value in collect(64, || generator.generate().unwrap()) {
            assert!((-5..=5).contains(&value));
        }
    }

    #[test]
    fn float_range_stays_within_bounds() {
        let generator = range("x", -1.0f64, 1.0f64);
        for value in collect(64, || generator.generate().unwrap()) {
            assert!((-1.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn bool_generates_both_values_eventually() {
        let generator = boolean("x");
        let values = collect(200, || generator.generate().unwrap());
        assert!(values.iter().any(|value| *value));
        assert!(values.iter().any(|value| !*value));
    }
}
