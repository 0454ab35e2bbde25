//! Trie-indexed shrinking: re-run the property body under a handler that
//! consults (and, where silent, records) decisions addressed by label path.
use crate::{
    atom::Atom,
    effect::{self, Handle},
    label::{LabelEffect, LabelScope},
    ops::ShrinkSite,
    outcome::Case,
    trie::Trie,
};
use std::{cell::RefCell, rc::Rc};

/// Installs a retrospective-shrinking handler around `body`, running it
/// once against `input`, and returns the body's result alongside a lazy
/// enumeration of child tries to try next.
///
/// Each child differs from `input` at exactly one path, whose value was
/// previously unrecorded (`None`) there, so every child represents genuine
/// progress over `input`.
pub fn run<T>(
    input: Trie,
    body: impl FnOnce() -> Case<T>,
) -> (Case<T>, impl Iterator<Item = Trie>) {
    let handler = Rc::new(Handler {
        tries: Rc::new(RefCell::new(vec![input.clone()])),
        path: Rc::new(RefCell::new(Vec::new())),
        calls: Rc::new(RefCell::new(Vec::new())),
    });

    let label_scope = effect::install_shared::<LabelEffect, _>(&handler);
    let shrink_scope = effect::install_shared::<ShrinkSite, _>(&handler);
    let scope = effect::join(label_scope, shrink_scope);

    // A discard is neither progress nor failure; the caller decides what to
    // do with `CaseOutcome::Discard`, typically treating this child as
    // inconclusive and moving to the next one.
    let result = body();
    drop(scope);

    let calls = handler.calls.borrow().clone();
    let children = calls.into_iter().flat_map(move |(path, size)| {
        let input = input.clone();
        (0..size).map(move |index| input.set(&path, Some(index)))
    });
    (result, children)
}

struct Handler {
    tries: Rc<RefCell<Vec<Trie>>>,
    path: Rc<RefCell<Vec<Atom>>>,
    calls: Rc<RefCell<Vec<(Vec<Atom>, u64)>>>,
}

impl Handle<LabelEffect> for Handler {
    fn handle(&self, LabelEffect(atom): LabelEffect) -> LabelScope {
        self.path.borrow_mut().push(atom.clone());
        let child = {
            let tries = self.tries.borrow();
            tries.last().expect("trie stack is never empty").child(&atom)
        };
        self.tries.borrow_mut().push(child);

        let tries = self.tries.clone();
        let path = self.path.clone();
        LabelScope::new(move || {
            tries.borrow_mut().pop();
            path.borrow_mut().pop();
        })
    }
}

impl Handle<ShrinkSite> for Handler {
    fn handle(&self, ShrinkSite { size }: ShrinkSite) -> Option<u64> {
        if size == 0 {
            return None;
        }
        let current = self
            .tries
            .borrow()
            .last()
            .expect("trie stack is never empty")
            .clone();
        match current.value() {
            Some(decision) => Some(decision.min(size - 1)),
            None => {
                let path = self.path.borrow().clone();
                self.calls.borrow_mut().push((path, size));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::label;
    use crate::ops::shrink_site;

    fn with_label<T>(name: &str, body: impl FnOnce() -> T) -> T {
        let _scope = label(name);
        body()
    }

    #[test]
    fn records_unvisited_sites_and_enumerates_children() {
        let (result, children): (Case<u64>, _) = run(Trie::new(), || {
            let value = with_label("x", || shrink_site(3).unwrap_or(2));
            Ok(value)
        });
        assert_eq!(result.unwrap(), 2);
        let children: Vec<_> = children.collect();
        assert_eq!(children.len(), 3);
        for (index, child) in children.iter().enumerate() {
            assert_eq!(
                child.child(&Atom::symbol("x")).value(),
                Some(index as u64)
            );
        }
    }

    #[test]
    fn recorded_decision_is_honored_and_clamped() {
        let input = Trie::new().set(&[Atom::symbol("x")], Some(10));
        let (result, _children): (Case<u64>, _) = run(input, || {
            let value = with_label("x", || shrink_site(3).unwrap());
            Ok(value)
        });
        assert_eq!(result.unwrap(), 2); // min(10, 3 - 1)
    }

    #[test]
    fn label_isolation() {
        let input = Trie::new().set(&[Atom::symbol("a")], Some(0));
        let (result, _): (Case<(u64, u64)>, _) = run(input, || {
            let a = with_label("a", || shrink_site(5).unwrap());
            let b = with_label("b", || shrink_site(5).unwrap_or(4));
            Ok((a, b))
        });
        assert_eq!(result.unwrap(), (0, 4));
    }
}
