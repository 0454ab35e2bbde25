use crate::{generate::Generate, outcome::Case};

/// See [`Generate::flatten`].
#[derive(Clone, Copy, Debug)]
pub struct Flatten<G>(pub(crate) G);

impl<G: Generate> Generate for Flatten<G>
where
    G::Item: Generate,
{
    type Item = <G::Item as Generate>::Item;

    fn generate(&self) -> Case<Self::Item> {
        self.0.generate()?.generate()
    }
}
