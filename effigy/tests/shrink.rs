use effigy::check::Check;
use effigy::prelude::*;
use effigy::sample::Sample;

#[test]
fn finds_minimum() {
    let generator = (range("left", 0usize, 1000), range("right", 0usize, 1000));
    let fail = generator.check(|(left, right)| left >= right).unwrap();
    assert_eq!(fail.item, (0, 1));
}

#[test]
fn integer_shrink_to_minimum() {
    let highs = range("high", 1usize, 1_000_000_000).samples(100);
    for high in highs {
        let fail = range("x", 0usize, 2_000_000_000)
            .check(|item| item < high)
            .unwrap();
        assert_eq!(fail.item, high);
    }
}

#[test]
fn vec_removes_irrelevant_then_shrinks() {
    let generator = container::<Vec<usize>, _>("items", range("item", 0usize, 100));
    let fail = generator
        .check(|items: Vec<usize>| items.len() < 10 || items.iter().all(|&item| item < 10))
        .unwrap();
    let shrunk = fail.item;
    assert_eq!(shrunk.len(), 10);
    assert_eq!(shrunk.iter().filter(|&&item| item == 10).count(), 1);
}
