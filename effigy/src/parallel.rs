//! Running independent property checks across threads.
//!
//! Handler state lives behind a thread-local stack (see [`crate::effect`]),
//! so nothing about an in-flight check can cross a thread boundary.
//! Parallelism here means running several complete, independent
//! [`Checker::check`] invocations at once, each seeded differently, and
//! reporting the first failure any of them finds.
use crate::{
    check::{Checker, Fail},
    generate::Generate,
    prove::Prove,
    strategy::Random,
};
use rayon::iter::{IntoParallelIterator, ParallelIterator};

/// An extension trait, implemented for every [`Checker`] driven by the
/// [`Random`] strategy, for spreading a check across several threads.
pub trait Parallel<G: Generate> {
    /// Runs `threads` independent copies of this check concurrently, each
    /// with a distinct seed derived from the checker's own seed, and returns
    /// the first failure found, if any.
    fn par_check<P, F>(&self, threads: usize, check: F) -> Option<Fail<G::Item, P::Error>>
    where
        G: Sync,
        G::Item: Clone + Send,
        P: Prove,
        P::Error: Send,
        F: Fn(G::Item) -> P + Sync;
}

impl<G: Generate> Parallel<G> for Checker<G, Random> {
    fn par_check<P, F>(&self, threads: usize, check: F) -> Option<Fail<G::Item, P::Error>>
    where
        G: Sync,
        G::Item: Clone + Send,
        P: Prove,
        P::Error: Send,
        F: Fn(G::Item) -> P + Sync,
    {
        (0..threads.max(1))
            .into_par_iter()
            .find_map_any(|index| {
                let strategy = Random {
                    seed: self.strategy.seed.wrapping_add(index as u64),
                    ..self.strategy.clone()
                };
                let checker = Checker {
                    generator: &self.generator,
                    strategy,
                };
                checker.check(&check)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::range;

    #[test]
    fn passes_when_every_thread_finds_no_counterexample() {
        let checker = Checker::new(range("x", 0i32, 10)).with_strategy(Random::default());
        assert!(checker.par_check(4, |x| x >= 0 && x <= 10).is_none());
    }

    #[test]
    fn finds_a_failure_discovered_by_any_thread() {
        let checker = Checker::new(range("x", 0i32, 1000)).with_strategy(Random::default());
        let fail = checker
            .par_check(4, |x| x < 50)
            .expect("at least one thread should find a counterexample");
        assert!(fail.item >= 50);
    }
}
