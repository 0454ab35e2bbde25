use crate::{
    effect::{self, Handle},
    ops::{Next, Sample, Size},
    outcome::{Case, CaseOutcome, FailureInfo},
};
use std::{cell::RefCell, rc::Rc};

use super::Strategy;

/// Randomized generation: installs `sample`/`next`/`size` handlers backed by
/// a seeded PRNG, drives up to `max_success` passing cases, ramping the
/// advisory size from `starting_size` to `max_size` across the run.
///
/// Composes as the outermost strategy in the conventional default,
/// `random() | shrinking()`: each of `random`'s iterations runs `shrinking`
/// in place of the bare body, so a failure is shrunk before `random` even
/// sees it.
#[derive(Clone, Debug)]
pub struct Random {
    pub seed: u64,
    pub max_success: usize,
    pub max_size: u64,
    pub starting_size: u64,
    pub discard_ratio: usize,
}

impl Default for Random {
    fn default() -> Self {
        Random {
            seed: fastrand::u64(..),
            max_success: 100,
            max_size: 100,
            starting_size: 0,
            discard_ratio: 10,
        }
    }
}

impl Random {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_success(mut self, max_success: usize) -> Self {
        self.max_success = max_success;
        self
    }

    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_starting_size(mut self, starting_size: u64) -> Self {
        self.starting_size = starting_size;
        self
    }

    pub fn with_discard_ratio(mut self, discard_ratio: usize) -> Self {
        self.discard_ratio = discard_ratio;
        self
    }
}

fn ramp(start: u64, max: u64, index: usize, total: usize) -> u64 {
    if total <= 1 {
        return max;
    }
    let fraction = index as f64 / (total - 1) as f64;
    let value = start as f64 + (max as f64 - start as f64) * fraction;
    value.round().max(0.0) as u64
}

struct RandomHandler {
    rng: RefCell<fastrand::Rng>,
    size: u64,
}

impl Handle<Sample> for RandomHandler {
    fn handle(&self, effect: Sample) -> u64 {
        self.rng.borrow_mut().u64(0..=effect.max)
    }
}

impl Handle<Next> for RandomHandler {
    fn handle(&self, effect: Next) -> bool {
        let total = effect.weight0.0 + effect.weight1.0;
        if total == 0 {
            return self.rng.borrow_mut().bool();
        }
        self.rng.borrow_mut().u64(0..total) < effect.weight0.0
    }
}

impl Handle<Size> for RandomHandler {
    fn handle(&self, _: Size) -> u64 {
        self.size
    }
}

impl Strategy for Random {
    fn run(&self, body: &dyn Fn() -> Case<()>) -> Case<()> {
        let discard_limit = self.max_success.saturating_mul(self.discard_ratio.max(1));
        let mut successes = 0usize;
        let mut discards = 0usize;
        while successes < self.max_success {
            let size = ramp(self.starting_size, self.max_size, successes, self.max_success);
            let seed = self
                .seed
                .wrapping_add(successes as u64)
                .wrapping_add((discards as u64) << 32);
            let handler = Rc::new(RandomHandler {
                rng: RefCell::new(fastrand::Rng::with_seed(seed)),
                size,
            });
            let scope = effect::join(
                effect::join(
                    effect::install_shared::<Sample, _>(&handler),
                    effect::install_shared::<Next, _>(&handler),
                ),
                effect::install_shared::<Size, _>(&handler),
            );
            let result = body();
            drop(scope);
            match result {
                Ok(()) => successes += 1,
                Err(CaseOutcome::Discard) => {
                    discards += 1;
                    if discards >= discard_limit {
                        return Err(CaseOutcome::Fail(FailureInfo {
                            message: format!(
                                "gave up after {discards} discarded cases ({successes} successful)"
                            )
                            .into(),
                        }));
                    }
                }
                Err(CaseOutcome::Succeed) => return Ok(()),
                Err(fail @ CaseOutcome::Fail(_)) => return Err(fail),
            }
        }
        Ok(())
    }
}
