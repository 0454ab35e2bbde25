use crate::{generate::Generate, outcome::Case};

/// See [`Generate::and_then`].
#[derive(Clone, Copy, Debug)]
pub struct AndThen<G, F>(pub(crate) G, pub(crate) F);

impl<G: Generate, H: Generate, F: Fn(G::Item) -> H> Generate for AndThen<G, F> {
    type Item = H::Item;

    fn generate(&self) -> Case<Self::Item> {
        (self.1)(self.0.generate()?).generate()
    }
}
