use crate::{
    generate::Generate,
    outcome::{Case, CaseOutcome},
};

/// See [`Generate::filter`].
#[derive(Clone, Copy, Debug)]
pub struct Filter<G, F>(pub(crate) G, pub(crate) F);

impl<G: Generate, F: Fn(&G::Item) -> bool> Generate for Filter<G, F> {
    type Item = G::Item;

    fn generate(&self) -> Case<Self::Item> {
        let item = self.0.generate()?;
        if (self.1)(&item) {
            Ok(item)
        } else {
            Err(CaseOutcome::Discard)
        }
    }
}
