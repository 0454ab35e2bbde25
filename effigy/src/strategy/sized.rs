use crate::{
    effect::{self, Handle},
    ops,
    outcome::{Case, CaseOutcome},
};
use std::cell::Cell;

use super::Strategy;

struct Fixed(u64);

impl Handle<ops::Size> for Fixed {
    fn handle(&self, _: ops::Size) -> u64 {
        self.0
    }
}

/// Installs an advisory `size` that ramps by one on every non-discarding
/// call to `run`, wrapping back to zero modulo `max` (unbounded when `max ==
/// 0`). Unlike [`crate::strategy::Random`]'s built-in ramp, which spans a
/// fixed `max_success`, the counter here advances once per call to `run`,
/// however many times an outer strategy makes that call. Useful composed as
/// `limited() | sized(n) | ...`.
#[derive(Debug, Default)]
pub struct Sized {
    pub max: u64,
    size: Cell<u64>,
}

impl Sized {
    pub fn new(max: u64) -> Self {
        Sized {
            max,
            size: Cell::new(0),
        }
    }
}

impl Strategy for Sized {
    fn run(&self, body: &dyn Fn() -> Case<()>) -> Case<()> {
        let size = self.size.get();
        let scope = effect::install::<ops::Size, _>(Fixed(size));
        let result = body();
        drop(scope);
        if !matches!(result, Err(CaseOutcome::Discard)) {
            let next = if self.max == 0 {
                size + 1
            } else {
                (size + 1) % self.max
            };
            self.size.set(next);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::size;

    #[test]
    fn ramps_and_wraps_modulo_max() {
        let sized = Sized::new(3);
        let observed: Vec<u64> = (0..7)
            .map(|_| {
                let value = Cell::new(0);
                let _ = sized.run(&|| {
                    value.set(size());
                    Ok(())
                });
                value.get()
            })
            .collect();
        assert_eq!(observed, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn a_discarded_case_does_not_advance_the_ramp() {
        let sized = Sized::new(10);
        let first = Cell::new(None);
        let _ = sized.run(&|| {
            first.set(Some(size()));
            Err(CaseOutcome::Discard)
        });
        let second = Cell::new(None);
        let _ = sized.run(&|| {
            second.set(Some(size()));
            Ok(())
        });
        assert_eq!(first.get(), second.get());
    }
}
