//! End-to-end scenarios exercising the engine as a whole, one per named
//! scenario in the testable-properties module.
use effigy::arbitrary::arbitrary;
use effigy::check::{Check, Checker};
use effigy::effect::{self, Effect, Handle};
use effigy::generate::Generate;
use effigy::ops;
use effigy::outcome::Case;
use effigy::prelude::*;
use effigy::sample::Sample;
use effigy::strategy::Random;

// Scenario A — integer shrinking to a threshold.
#[test]
fn scenario_a_integer_shrinks_to_the_threshold() {
    let generator = range("x", 0u8, u8::MAX);
    let fail = generator.check(|x| x < 42).expect("42 is reachable in u8");
    assert_eq!(fail.item, 42);
}

// Scenario B — vector shrinking to a minimal-sum witness.
#[test]
fn scenario_b_vector_shrinks_toward_a_minimal_witness() {
    let generator = container::<Vec<u8>, _>("xs", range("x", 0u8, 255));
    let fail = generator
        .check(|xs: Vec<u8>| xs.iter().map(|&x| x as u32).sum::<u32>() < 256)
        .expect("a vector summing to at least 256 exists");
    let sum: u32 = fail.item.iter().map(|&x| x as u32).sum();
    assert!(sum >= 256);
    assert!(
        !fail.item.is_empty(),
        "the empty vector satisfies the property and can't be a failure"
    );
}

// Scenario C — replay determinism: the same seed and size reproduce the
// same sequence of generated values.
#[test]
fn scenario_c_same_seed_reproduces_the_same_sequence() {
    let generator = range("x", 0u32, u32::MAX);
    let run = |seed: u64| {
        let mut sampler = generator.sampler();
        sampler.seed = seed;
        sampler.count = 10;
        sampler.samples().collect::<Vec<_>>()
    };
    assert_eq!(run(7), run(7));
}

// Scenario D — effect shadowing: a handler installed inside another
// handler's scope is only visible from outside that handler's own body.
#[test]
fn scenario_d_effect_shadowing() {
    struct Return(i32);
    impl Effect for Return {
        type Output = i32;
        fn fallback(self) -> i32 {
            -1
        }
    }
    struct Const(i32);
    impl Handle<Return> for Const {
        fn handle(&self, _: Return) -> i32 {
            self.0
        }
    }
    struct Recurse;
    impl Handle<Return> for Recurse {
        fn handle(&self, effect: Return) -> i32 {
            effect::invoke(effect) + 10
        }
    }

    let outer = effect::install::<Return, _>(Const(1));
    assert_eq!(effect::invoke(Return(0)), 1);
    {
        let inner = effect::install::<Return, _>(Recurse);
        // Inside `Recurse`'s own body, a nested invoke sees the stack as it
        // stood when `Recurse` was installed: `Const(1)`, not `Recurse`
        // itself.
        assert_eq!(effect::invoke(Return(0)), 11);
        drop(inner);
    }
    assert_eq!(effect::invoke(Return(0)), 1);
    drop(outer);
    assert_eq!(effect::invoke(Return(0)), -1);
}

// Scenario E — discard limit: a body that always discards exhausts the
// strategy's budget and surfaces as an engine-level panic, not a property
// failure.
struct AlwaysDiscards;

impl Generate for AlwaysDiscards {
    type Item = ();

    fn generate(&self) -> Case<()> {
        ops::discard()
    }
}

#[test]
#[should_panic(expected = "too many cases were discarded")]
fn scenario_e_discard_limit_panics() {
    let strategy = Random::default().with_max_success(10).with_discard_ratio(2);
    let checker = Checker::new(AlwaysDiscards).with_strategy(strategy);
    let _ = checker.check(|_| true);
}

// Scenario F — label isolation: values generated under distinct labels
// within the same run are independent draws from the shared PRNG, and two
// runs seeded identically reproduce the same pair.
#[test]
fn scenario_f_labels_isolate_independent_draws() {
    let generator = (arbitrary::<u32>("a"), arbitrary::<u32>("b"));
    let run = |seed: u64| {
        let mut sampler = generator.clone().sampler();
        sampler.seed = seed;
        sampler.count = 1;
        sampler.samples().next().unwrap()
    };
    let (a1, b1) = run(99);
    let (a2, b2) = run(99);
    assert_eq!((a1, b1), (a2, b2));
    assert_ne!(a1, b1, "two independent u32 draws collide with negligible probability");
}
