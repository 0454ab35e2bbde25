use crate::{
    decisions::Decisions,
    outcome::{Case, CaseOutcome, FailureInfo},
    shrink::{self},
    trie::Trie,
};

use super::Strategy;

/// Retrospective (trie-indexed) shrinking. On failure, greedily explores
/// children that each change exactly one previously-unrecorded site,
/// committing to the first still-failing child and restarting the search
/// from there, until no child fails.
///
/// Run with no inner strategy composed in front of it (i.e. standalone,
/// outside of a `|`), a single invocation of `body` takes the place of
/// "the unmodified case" — the same one `random` would otherwise have run
/// directly.
#[derive(Clone, Debug)]
pub struct Shrinking {
    pub max_shrinks: usize,
    #[cfg(feature = "replay")]
    pub(crate) store: Option<std::rc::Rc<dyn crate::replay::Store>>,
    #[cfg(feature = "replay")]
    pub(crate) key: String,
}

impl Default for Shrinking {
    fn default() -> Self {
        Shrinking {
            max_shrinks: 1 << 16,
            #[cfg(feature = "replay")]
            store: None,
            #[cfg(feature = "replay")]
            key: "INPUT".to_string(),
        }
    }
}

impl Shrinking {
    pub fn with_max_shrinks(mut self, max_shrinks: usize) -> Self {
        self.max_shrinks = max_shrinks;
        self
    }

    #[cfg(feature = "replay")]
    pub fn with_store(mut self, store: std::rc::Rc<dyn crate::replay::Store>) -> Self {
        self.store = Some(store);
        self
    }

    #[cfg(feature = "replay")]
    fn load(&self) -> Trie {
        match &self.store {
            Some(store) => crate::replay::load_trie(store.as_ref(), &self.key).unwrap_or_default(),
            None => Trie::new(),
        }
    }

    #[cfg(not(feature = "replay"))]
    fn load(&self) -> Trie {
        Trie::new()
    }

    #[cfg(feature = "replay")]
    fn persist(&self, trie: &Trie) {
        if let Some(store) = &self.store {
            crate::replay::save_trie(store.as_ref(), &self.key, trie);
        }
    }

    #[cfg(not(feature = "replay"))]
    fn persist(&self, _trie: &Trie) {}

    #[cfg(feature = "replay")]
    fn clear(&self) {
        if let Some(store) = &self.store {
            store.write(&self.key, String::new());
        }
    }

    #[cfg(not(feature = "replay"))]
    fn clear(&self) {}

    fn search(
        &self,
        mut best: Trie,
        mut frontier: Box<dyn Iterator<Item = Trie>>,
        body: &dyn Fn() -> Case<()>,
        mut info: FailureInfo,
    ) -> (Trie, FailureInfo) {
        let mut steps = 0usize;
        loop {
            let mut committed = None;
            while let Some(candidate) = frontier.next() {
                if steps >= self.max_shrinks {
                    return (best, info);
                }
                steps += 1;
                let (result, children) = shrink::retrospective::run(candidate.clone(), body);
                if let Err(CaseOutcome::Fail(next_info)) = result {
                    committed = Some((candidate, children, next_info));
                    break;
                }
                // Ok, Succeed and Discard all fail to reproduce the failure
                // at this candidate; try the next sibling.
            }
            match committed {
                Some((candidate, children, next_info)) => {
                    best = candidate;
                    frontier = Box::new(children);
                    info = next_info;
                }
                None => return (best, info),
            }
        }
    }
}

impl Strategy for Shrinking {
    fn run(&self, body: &dyn Fn() -> Case<()>) -> Case<()> {
        let input = self.load();
        let (result, children) = shrink::retrospective::run(input.clone(), body);
        match result {
            Ok(()) => {
                self.clear();
                Ok(())
            }
            Err(CaseOutcome::Discard) => Err(CaseOutcome::Discard),
            Err(CaseOutcome::Succeed) => Err(CaseOutcome::Succeed),
            Err(CaseOutcome::Fail(info)) => {
                let (trie, info) = self.search(input, Box::new(children), body, info);
                // `search` only re-runs `body` against a candidate to test
                // whether it still fails, so the very last call it made may
                // have been a non-failing sibling tried after the committed
                // minimum. Replay the committed trie once more so whatever
                // `body` observed as a side effect (the checker's last item
                // and cause) reflects the minimized case, not that sibling.
                let (replay, _children) = shrink::retrospective::run(trie.clone(), body);
                let info = match replay {
                    Err(CaseOutcome::Fail(replayed)) => replayed,
                    _ => info,
                };
                self.persist(&trie);
                Err(CaseOutcome::Fail(info))
            }
        }
    }
}

/// Forward (sequence-indexed) shrinking: the flat, single-child variant.
/// On failure, repeatedly grows the decision list by one value as long as
/// the deeper candidate still fails.
#[derive(Clone, Copy, Debug)]
pub struct ForwardShrinking {
    pub max_shrinks: usize,
}

impl Default for ForwardShrinking {
    fn default() -> Self {
        ForwardShrinking { max_shrinks: 1 << 16 }
    }
}

impl ForwardShrinking {
    pub fn with_max_shrinks(mut self, max_shrinks: usize) -> Self {
        self.max_shrinks = max_shrinks;
        self
    }

    fn search(
        &self,
        mut best: Decisions,
        mut frontier: Box<dyn Iterator<Item = Decisions>>,
        body: &dyn Fn() -> Case<()>,
        mut info: FailureInfo,
    ) -> (Decisions, FailureInfo) {
        let mut steps = 0usize;
        loop {
            let mut committed = None;
            while let Some(candidate) = frontier.next() {
                if steps >= self.max_shrinks {
                    return (best, info);
                }
                steps += 1;
                let (result, children) = shrink::forward::run(&candidate, body);
                if let Err(CaseOutcome::Fail(next_info)) = result {
                    committed = Some((candidate, children, next_info));
                    break;
                }
                // Ok, Succeed and Discard all fail to reproduce the failure
                // at this candidate; try the next sibling.
            }
            match committed {
                Some((candidate, children, next_info)) => {
                    best = candidate;
                    frontier = Box::new(children);
                    info = next_info;
                }
                None => return (best, info),
            }
        }
    }
}

impl Strategy for ForwardShrinking {
    fn run(&self, body: &dyn Fn() -> Case<()>) -> Case<()> {
        let base = Decisions::new(Vec::new());
        let (result, children) = shrink::forward::run(&base, body);
        match result {
            Ok(()) => Ok(()),
            Err(CaseOutcome::Discard) => Err(CaseOutcome::Discard),
            Err(CaseOutcome::Succeed) => Err(CaseOutcome::Succeed),
            Err(CaseOutcome::Fail(info)) => {
                let (_decisions, info) = self.search(base, Box::new(children), body, info);
                Err(CaseOutcome::Fail(info))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        label::label,
        ops::shrink_site,
        strategy::Strategy,
    };

    #[test]
    fn shrinks_a_failing_case_down_to_its_minimum() {
        let shrinking = Shrinking::default();
        let last = std::cell::Cell::new(0u64);
        let result = shrinking.run(&|| {
            let _scope = label("x");
            let value = shrink_site(100).unwrap_or(41);
            last.set(value);
            if value >= 40 {
                Err(CaseOutcome::Fail(FailureInfo {
                    message: "too big".into(),
                }))
            } else {
                Ok(())
            }
        });
        assert!(matches!(result, Err(CaseOutcome::Fail(_))));
        assert_eq!(last.get(), 40);
    }

    #[test]
    fn passing_case_is_reported_as_ok() {
        let shrinking = Shrinking::default();
        let result = shrinking.run(&|| Ok(()));
        assert!(result.is_ok());
    }

    #[test]
    fn forward_shrinks_toward_zero() {
        let shrinking = ForwardShrinking::default();
        let result = shrinking.run(&|| {
            let value = shrink_site(100).unwrap_or(7);
            if value >= 3 {
                Err(CaseOutcome::Fail(FailureInfo {
                    message: "too big".into(),
                }))
            } else {
                Ok(())
            }
        });
        assert!(matches!(result, Err(CaseOutcome::Fail(_))));
    }
}
