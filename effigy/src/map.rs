use crate::{generate::Generate, outcome::Case};

/// See [`Generate::map`].
#[derive(Clone, Copy, Debug)]
pub struct Map<G, F>(pub(crate) G, pub(crate) F);

impl<G: Generate, T, F: Fn(G::Item) -> T> Generate for Map<G, F> {
    type Item = T;

    fn generate(&self) -> Case<T> {
        Ok((self.1)(self.0.generate()?))
    }
}
