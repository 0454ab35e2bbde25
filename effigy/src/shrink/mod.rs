//! The two shrinking strategies: [`retrospective`] (trie-indexed by label
//! path) and [`forward`] (index-sequence over a linear decision stream).
pub mod forward;
pub mod retrospective;

/// One step in a shrink search: the outcome of re-running the property body
/// under a candidate decision source, paired with the decision source
/// itself so a strategy can commit to it and keep exploring from there.
#[derive(Clone, Debug)]
pub struct Attempt<D, T> {
    pub decisions: D,
    pub result: T,
}
