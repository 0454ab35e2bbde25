#![cfg(feature = "parallel")]

use effigy::check::Checker;
use effigy::parallel::Parallel;
use effigy::prelude::*;
use effigy::strategy::Random;

#[test]
fn executes_to_completion() {
    let checker = Checker::new(range("x", 0usize, 999_999)).with_strategy(Random::default());
    assert!(checker.par_check(4, |value| value < 1_000_000).is_none());
}

#[test]
fn finds_a_failure_across_threads() {
    let checker = Checker::new(range("x", 0usize, 1_000_000)).with_strategy(Random::default());
    let fail = checker
        .par_check(4, |value| value < 1_000_000)
        .expect("some thread should find a value at the upper bound");
    assert_eq!(fail.item, 1_000_000);
}
