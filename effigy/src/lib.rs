#![doc = include_str!("../../README.md")]
// #![forbid(unsafe_code)]

pub mod and_then;
pub mod arbitrary;
pub mod atom;
pub mod check;
pub mod container;
pub mod dag;
pub mod decisions;
pub mod effect;
pub mod element;
pub mod error;
pub mod filter;
pub mod filter_map;
pub mod flatten;
pub mod generate;
pub mod label;
pub mod map;
pub mod ops;
pub mod optional;
pub mod outcome;
#[cfg(feature = "parallel")]
pub mod parallel;
mod prelude;
pub mod primitive;
pub mod prove;
#[cfg(feature = "replay")]
pub mod replay;
#[doc(hidden)]
pub mod run;
pub mod same;
pub mod sample;
pub mod shrink;
pub mod strategy;
pub mod trie;
pub mod tuple;
pub mod variant;
pub mod weighted;

pub use check::Check;
pub use error::EngineError;
/// Turns a function into a property test.
///
/// It takes a list of generators as input, which are used to produce random
/// arguments for the function it's attached to.
///
/// The function can return `()`, `bool`, or `Result` to indicate whether the
/// property holds. Any `panic` within the function is also treated as a test
/// failure.
///
/// # Arguments
///
/// - **Generators**: The first arguments to the macro are a comma-separated
///   list of generators. The values produced by these generators will be passed
///   as arguments to the test function. You can use `_` to infer the default
///   generator for a type.
/// - `color`: A boolean (`true` or `false`) to enable or disable colored
///   output. Defaults to `true`.
/// - `debug`: A boolean (`true` or `false`) that controls the output format. If
///   `true`, the full `Debug` representation of test results is printed. If
///   `false`, a more minimal output is used. Defaults to `true`.
///
/// # Examples
///
/// A simple test with a range generator:
/// ```
/// # use effigy::check;
/// #[check(range("x", 0, 100))]
/// fn is_less_than_100(x: i32) {
///     assert!(x < 100);
/// }
/// ```
///
/// Using multiple generators and inferring a type:
/// ```
/// # use effigy::check;
/// #[check(range("x", 0, 100), range("y", 0.0, 1.0), _)]
/// fn complex_test(x: i32, y: f64, z: bool) {
///     // ...
/// }
/// ```
///
/// Disabling color:
/// ```
/// # use effigy::check;
/// #[check(range("x", 0, 10), color = false)]
/// #[should_panic]
/// fn failing_test(x: i32) {
///     assert!(x > 5);
/// }
/// ```
#[cfg(feature = "check")]
pub use effigy_macro::check;
pub use generate::{FullGenerate, Generate};
pub use prelude::*;
pub use prove::Prove;
pub use sample::Sample;
