use crate::outcome::{Case, CaseOutcome, FailureInfo};

use super::Strategy;

/// Caps iteration at `max_success` passing cases and escalates to a failure
/// once `discard_ratio * max_success` cases have been discarded. Installs no
/// handlers of its own — compose it in front of something that does, e.g.
/// `limited() | sized(30) | my_sampling_strategy()`.
#[derive(Clone, Copy, Debug)]
pub struct Limited {
    pub max_success: usize,
    pub discard_ratio: usize,
}

impl Default for Limited {
    fn default() -> Self {
        Limited {
            max_success: 100,
            discard_ratio: 10,
        }
    }
}

impl Limited {
    pub fn with_max_success(mut self, max_success: usize) -> Self {
        self.max_success = max_success;
        self
    }

    pub fn with_discard_ratio(mut self, discard_ratio: usize) -> Self {
        self.discard_ratio = discard_ratio;
        self
    }
}

impl Strategy for Limited {
    fn run(&self, body: &dyn Fn() -> Case<()>) -> Case<()> {
        let discard_limit = self.max_success.saturating_mul(self.discard_ratio.max(1));
        let mut successes = 0usize;
        let mut discards = 0usize;
        while successes < self.max_success {
            match body() {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_after_max_success() {
        let calls = std::cell::Cell::new(0);
        let limited = Limited::default().with_max_success(7);
        let result = limited.run(&|| {
            calls.set(calls.get() + 1);
            Ok(())
        });
        assert!(result.is_ok());
        assert_eq!(calls.get(), 7);
    }

    #[test]
    fn discard_ratio_escalates() {
        let limited = Limited::default()
            .with_max_success(3)
            .with_discard_ratio(2);
        let result = limited.run(&|| Err(CaseOutcome::Discard));
        assert!(matches!(result, Err(CaseOutcome::Fail(_))));
    }
}
