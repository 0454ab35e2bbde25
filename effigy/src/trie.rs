//! A persistent trie from label paths to recorded shrink decisions.
//!
//! `None` at a path means "no shrink recorded here; use default behavior."
//! `Some(k)` means "at this site, use shrink index `min(k, size - 1)`".
//! Updates are structurally shared: setting a path in a trie never mutates
//! anything reachable from the original root.
use crate::atom::Atom;
use std::{collections::BTreeMap, rc::Rc};

#[derive(Clone, Debug, Default)]
struct Node {
    value: Option<u64>,
    children: BTreeMap<AtomKey, Rc<Node>>,
}

/// `Atom` doesn't implement `Ord` (symbols intern to arbitrary allocation
/// order), so the trie keys on a derived, deterministic ordering instead:
/// numbers before symbols, then by value. This only affects iteration order
/// of [`Trie::children`]; it never affects lookup correctness.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum AtomKey {
    Number(i64),
    Symbol(String),
}

impl From<&Atom> for AtomKey {
    fn from(atom: &Atom) -> Self {
        match atom {
            Atom::Number(value) => AtomKey::Number(*value),
            Atom::Symbol(value) => AtomKey::Symbol(value.to_string()),
        }
    }
}

/// An immutable, shareable decision trie.
#[derive(Clone, Debug, Default)]
pub struct Trie(Rc<Node>);

impl Trie {
    pub fn new() -> Self {
        Trie(Rc::new(Node::default()))
    }

    /// The decision recorded at the root of this (sub)trie, if any.
    pub fn value(&self) -> Option<u64> {
        self.0.value
    }

    /// Descends into the child keyed by `atom`, or the empty trie if there
    /// is none.
    pub fn child(&self, atom: &Atom) -> Trie {
        match self.0.children.get(&AtomKey::from(atom)) {
            Some(node) => Trie(node.clone()),
            None => Trie::new(),
        }
    }

    /// Returns a new trie equal to `self` but with the value at `path` set
    /// to `value`. Shares structure with `self` outside of `path`.
    pub fn set(&self, path: &[Atom], value: Option<u64>) -> Trie {
        Trie(Rc::new(set(&self.0, path, value)))
    }

    /// Returns a new trie equal to `self` but with `child` (value and all of
    /// its own descendants) grafted wholesale as the child keyed by `atom`.
    pub fn with_child(&self, atom: &Atom, child: Trie) -> Trie {
        let mut children = self.0.children.clone();
        children.insert(AtomKey::from(atom), child.0);
        Trie(Rc::new(Node {
            value: self.0.value,
            children,
        }))
    }

    /// Iterates this trie's immediate children, paired with the atom each is
    /// keyed by. Iteration order matches [`AtomKey`]'s derived ordering, not
    /// insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (Atom, Trie)> + '_ {
        self.0.children.iter().map(|(key, node)| {
            let atom = match key {
                AtomKey::Number(value) => Atom::number(*value),
                AtomKey::Symbol(value) => Atom::symbol(value),
            };
            (atom, Trie(node.clone()))
        })
    }
}

fn set(node: &Rc<Node>, path: &[Atom], value: Option<u64>) -> Node {
    match path.split_first() {
        None => Node {
            value,
            children: node.children.clone(),
        },
        Some((atom, rest)) => {
            let key = AtomKey::from(atom);
            let mut children = node.children.clone();
            let child = children.get(&key).cloned().unwrap_or_default();
            children.insert(key, Rc::new(set(&child, rest, value)));
            Node {
                value: node.value,
                children,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let path = [Atom::symbol("a"), Atom::number(1)];
        let trie = Trie::new().set(&path, Some(3));
        assert_eq!(trie.child(&path[0]).child(&path[1]).value(), Some(3));
    }

    #[test]
    fn set_does_not_mutate_the_original() {
        let before = Trie::new();
        let after = before.set(&[Atom::symbol("a")], Some(1));
        assert_eq!(before.child(&Atom::symbol("a")).value(), None);
        assert_eq!(after.child(&Atom::symbol("a")).value(), Some(1));
    }

    #[test]
    fn unrelated_paths_are_independent() {
        let base = Trie::new()
            .set(&[Atom::symbol("a")], Some(1))
            .set(&[Atom::symbol("b")], Some(2));
        assert_eq!(base.child(&Atom::symbol("a")).value(), Some(1));
        assert_eq!(base.child(&Atom::symbol("b")).value(), Some(2));
        let updated = base.set(&[Atom::symbol("a")], Some(9));
        assert_eq!(updated.child(&Atom::symbol("a")).value(), Some(9));
        assert_eq!(updated.child(&Atom::symbol("b")).value(), Some(2));
        assert_eq!(base.child(&Atom::symbol("a")).value(), Some(1));
    }
}
