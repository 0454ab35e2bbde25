//! Type-directed generation: dispatches to each type's canonical
//! [`FullGenerate`] generator, under a caller-chosen label.
use crate::{
    atom::Atom,
    container::{container, Container},
    generate::{FullGenerate, Generate},
    label::{labeled, Labeled},
    optional::{optional, Optional},
    primitive::{boolean, char_range, range, Bool, CharRange, Range},
};

/// The label every `FullGenerate` impl in this module uses internally;
/// [`arbitrary`] relabels it to whatever the caller asked for.
const ROOT: u64 = 0;

/// The canonical generator for `T`, addressed under `label`.
///
/// # Examples
/// ```
/// # use effigy::{arbitrary, Generate};
/// let n = arbitrary::<i32>("n");
/// ```
pub fn arbitrary<T: FullGenerate>(label: impl Into<Atom>) -> Labeled<T::Generator> {
    labeled(label, T::generator())
}

macro_rules! integer {
    ($type:ty) => {
        impl FullGenerate for $type {
            type Item = $type;
            type Generator = Range<$type>;

            fn generator() -> Self::Generator {
                range(ROOT, <$type>::MIN, <$type>::MAX)
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

impl FullGenerate for bool {
    type Item = bool;
    type Generator = Bool;

    fn generator() -> Self::Generator {
        boolean(ROOT)
    }
}

impl FullGenerate for char {
    type Item = char;
    type Generator = CharRange;

    fn generator() -> Self::Generator {
        char_range(ROOT, '\u{0}', char::MAX)
    }
}

impl<T: FullGenerate> FullGenerate for Option<T> {
    type Item = Option<T::Item>;
    type Generator = Optional<T::Generator>;

    fn generator() -> Self::Generator {
        optional(ROOT, T::generator())
    }
}

impl<T: FullGenerate> FullGenerate for Vec<T> {
    type Item = Vec<T::Item>;
    type Generator = Container<Vec<T::Item>, T::Generator>;

    fn generator() -> Self::Generator {
        container(ROOT, T::generator())
    }
}

impl FullGenerate for String {
    type Item = String;
    type Generator = Container<String, CharRange>;

    fn generator() -> Self::Generator {
        container(ROOT, char_range(ROOT, ' ', '~'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{Random, Strategy};
    use std::cell::RefCell;

    #[test]
    fn dispatches_to_the_integer_generator() {
        let generator = arbitrary::<u8>("n");
        let random = Random::default().with_seed(6).with_max_success(1);
        let captured = RefCell::new(None);
        let _ = random.run(&|| {
            *captured.borrow_mut() = Some(generator.generate().unwrap());
            Ok(())
        });
        assert!(captured.into_inner().is_some());
    }

    #[test]
    fn dispatches_to_the_container_generator() {
        let generator = arbitrary::<Vec<u8>>("xs");
        let random = Random::default().with_seed(6).with_max_success(1);
        let captured = RefCell::new(None);
        let _ = random.run(&|| {
            *captured.borrow_mut() = Some(generator.generate().unwrap());
            Ok(())
        });
        assert!(captured.into_inner().is_some());
    }
}
