//! Generating plain tuples: each field generates independently, addressed
//! for shrinking by its position.
use crate::{
    generate::{FullGenerate, Generate},
    label,
    outcome::Case,
};

impl Generate for () {
    type Item = ();

    fn generate(&self) -> Case<()> {
        Ok(())
    }
}

impl FullGenerate for () {
    type Item = ();
    type Generator = ();

    fn generator() -> Self::Generator {}
}

macro_rules! tuple {
    ($($index:tt => $name:ident),+) => {
        impl<$($name: Generate),+> Generate for ($($name,)+) {
            type Item = ($($name::Item,)+);

            fn generate(&self) -> Case<Self::Item> {
                Ok(($(
                    {
                        let _scope = label::label($index as u64);
                        self.$index.generate()?
                    },
                )+))
            }
        }

        impl<$($name: FullGenerate),+> FullGenerate for ($($name,)+) {
            type Item = ($($name::Item,)+);
            type Generator = ($($name::Generator,)+);

            fn generator() -> Self::Generator {
                ($($name::generator(),)+)
            }
        }
    };
}

tuple!(0 => T0);
tuple!(0 => T0, 1 => T1);
tuple!(0 => T0, 1 => T1, 2 => T2);
tuple!(0 => T0, 1 => T1, 2 => T2, 3 => T3);
tuple!(0 => T0, 1 => T1, 2 => T2, 3 => T3, 4 => T4);
tuple!(0 => T0, 1 => T1, 2 => T2, 3 => T3, 4 => T4, 5 => T5);
tuple!(0 => T0, 1 => T1, 2 => T2, 3 => T3, 4 => T4, 5 => T5, 6 => T6);
tuple!(0 => T0, 1 => T1, 2 => T2, 3 => T3, 4 => T4, 5 => T5, 6 => T6, 7 => T7);
