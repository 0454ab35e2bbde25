use crate::{
    generate::Generate,
    outcome::{Case, CaseOutcome},
};

/// See [`Generate::filter_map`].
#[derive(Clone, Copy, Debug)]
pub struct FilterMap<G, F>(pub(crate) G, pub(crate) F);

impl<G: Generate, T, F: Fn(G::Item) -> Option<T>> Generate for FilterMap<G, F> {
    type Item = T;

    fn generate(&self) -> Case<T> {
        match (self.1)(self.0.generate()?) {
            Some(value) => Ok(value),
            None => Err(CaseOutcome::Discard),
        }
    }
}
