//! Random directed acyclic graphs, built node-by-node with edges implied by
//! shared resource names declared during node construction.
use crate::{atom::Atom, generate::Generate, label, ops, outcome::Case};
use std::cell::RefCell;
use std::collections::HashMap;

/// The outcome of a [`dag`] generator: a list of node values in creation
/// order, plus the edges implied by the resources they declared.
#[derive(Clone, Debug)]
pub struct Graph<T> {
    pub nodes: Vec<T>,
    pub edges: Vec<(usize, usize)>,
}

/// Handed to `node` on every call; lets the node declare which named
/// resources it uses. The first node to use a name is unaffected; every
/// later user gets an edge from the most recent prior user, giving the
/// graph a topological order matching node creation order.
pub struct Resources<'a> {
    seen: &'a RefCell<HashMap<Atom, usize>>,
    edges: &'a RefCell<Vec<(usize, usize)>>,
    index: usize,
}

impl<'a> Resources<'a> {
    pub fn uses(&self, name: impl Into<Atom>) {
        let name = name.into();
        let mut seen = self.seen.borrow_mut();
        if let Some(&prior) = seen.get(&name) {
            self.edges.borrow_mut().push((prior, self.index));
        }
        seen.insert(name, self.index);
    }
}

/// Builds a random DAG of up to `size`-bounded node count. `node` is called
/// once per node, in topological (creation) order, and declares the
/// resources that node reads or writes via [`Resources::uses`].
///
/// # Examples
/// ```
/// # use effigy::{dag, range, Generate};
/// let graph = dag("ops", |resources| {
///     resources.uses("buffer");
///     range("value", 0i32, 9).generate()
/// });
/// ```
pub fn dag<T, G>(label: impl Into<Atom>, node: G) -> Dag<T, G>
where
    G: Fn(&Resources) -> Case<T>,
{
    Dag {
        label: label.into(),
        min: 0,
        max: None,
        node,
        _marker: std::marker::PhantomData,
    }
}

pub struct Dag<T, G> {
    label: Atom,
    min: usize,
    max: Option<usize>,
    node: G,
    _marker: std::marker::PhantomData<T>,
}

impl<T, G> Dag<T, G> {
    pub fn min(mut self, min: usize) -> Self {
        self.min = min;
        self
    }

    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }
}

impl<T, G> Generate for Dag<T, G>
where
    G: Fn(&Resources) -> Case<T>,
{
    type Item = Graph<T>;

    fn generate(&self) -> Case<Graph<T>> {
        let _scope = label::label(self.label.clone());
        let budget = self.min + ops::size() as usize;
        let upper = self.max.unwrap_or(budget).max(self.min);
        let span = (upper - self.min) as u64;
        let count = {
            let _len_scope = label::label("len");
            self.min as u64 + ops::shrink_site(span + 1).unwrap_or_else(|| ops::sample(span))
        } as usize;

        let seen = RefCell::new(HashMap::new());
        let edges = RefCell::new(Vec::new());
        let mut nodes = Vec::with_capacity(count);
        for index in 0..count {
            let _node_scope = label::label(index as u64);
            let resources = Resources {
                seen: &seen,
                edges: &edges,
                index,
            };
            nodes.push((self.node)(&resources)?);
        }
        Ok(Graph {
            nodes,
            edges: edges.into_inner(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{primitive::range, strategy::{Random, Strategy}};
    use std::cell::RefCell;

    #[test]
    fn shared_resource_names_imply_edges() {
        let generator = dag("ops", |resources| {
            resources.uses("buffer");
            range("value", 0i32, 9).generate()
        })
        .min(3)
        .max(3);
        let random = Random::default().with_seed(2).with_max_success(1);
        let captured = RefCell::new(None);
        let _ = random.run(&|| {
            *captured.borrow_mut() = Some(generator.generate().unwrap());
            Ok(())
        });
        let graph = captured.into_inner().unwrap();
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.edges, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn independent_resources_have_no_edges() {
        let counter = RefCell::new(0u64);
        let generator = dag("ops", move |resources| {
            let mut counter = counter.borrow_mut();
            resources.uses(*counter);
            *counter += 1;
            Ok(())
        })
        .min(4)
        .max(4);
        let random = Random::default().with_seed(2).with_max_success(1);
        let captured = RefCell::new(None);
        let _ = random.run(&|| {
            *captured.borrow_mut() = Some(generator.generate().unwrap());
            Ok(())
        });
        assert!(captured.into_inner().unwrap().edges.is_empty());
    }
}
