//! A prelude of commonly used items, brought into scope automatically
//! by `use effigy::*`.
pub use crate::{
    arbitrary::arbitrary,
    container::container,
    dag::dag,
    element::{element, element_of},
    ops::{discard, guard, scale, size, succeed},
    optional::optional,
    primitive::{boolean, char_range, range},
    same::same,
    variant::variant,
    weighted::{weighted, weighted_fn},
};
