//! The `label` effect: extends the current dynamic scope's path by one atom.
use crate::{
    atom::Atom,
    effect::{self, Effect},
    generate::Generate,
    outcome::Case,
};
use std::cell::RefCell;

/// `label(atom)`'s argument. Its [`Effect::Output`] is a [`LabelScope`]
/// guard: dropping it restores whatever path/trie position existed before
/// the label was pushed.
pub struct LabelEffect(pub Atom);

/// Restores label-path state (and, when a shrinker handler is installed,
/// trie-cursor state) when dropped.
#[must_use = "dropping a LabelScope immediately pops the label"]
pub struct LabelScope(Option<Box<dyn FnOnce()>>);

impl LabelScope {
    pub fn new(restore: impl FnOnce() + 'static) -> Self {
        LabelScope(Some(Box::new(restore)))
    }

    pub fn noop() -> Self {
        LabelScope(None)
    }
}

impl Drop for LabelScope {
    fn drop(&mut self) {
        if let Some(restore) = self.0.take() {
            restore();
        }
    }
}

impl Effect for LabelEffect {
    type Output = LabelScope;

    fn fallback(self) -> LabelScope {
        // With no shrinker installed, the label path still matters for
        // anything that introspects it (diagnostics, `current_path`), so
        // fall back to the thread-local path tracker below rather than a
        // true no-op.
        push_fallback_path(self.0)
    }
}

thread_local! {
    static FALLBACK_PATH: RefCell<Vec<Atom>> = const { RefCell::new(Vec::new()) };
}

fn push_fallback_path(atom: Atom) -> LabelScope {
    FALLBACK_PATH.with(|path| path.borrow_mut().push(atom));
    LabelScope::new(|| {
        FALLBACK_PATH.with(|path| {
            path.borrow_mut().pop();
        });
    })
}

/// Returns the label path as tracked by the fallback handler (i.e. when no
/// shrinking strategy is installed). Shrinker handlers track their own path
/// internally and are the authority on addressing while they're active.
pub fn current_path() -> Vec<Atom> {
    FALLBACK_PATH.with(|path| path.borrow().clone())
}

/// Installs `atom` onto the current label path for the dynamic extent of the
/// returned scope.
#[must_use]
pub fn label(atom: impl Into<Atom>) -> LabelScope {
    effect::invoke(LabelEffect(atom.into()))
}

/// `label(atom, f, args...)`: install the label scope, invoke `f`, pop it —
/// convenient for single-expression combinators that don't want to manage
/// the guard's lifetime by hand.
pub fn label_with<T>(atom: impl Into<Atom>, body: impl FnOnce() -> T) -> T {
    let _scope = label(atom);
    body()
}

/// Wraps `generator` under `atom`, overriding whatever label it carries
/// internally. Used by [`crate::arbitrary::arbitrary`] to let a type's
/// canonical generator be addressed under a caller-chosen name.
pub fn labeled<G: Generate>(atom: impl Into<Atom>, generator: G) -> Labeled<G> {
    Labeled(atom.into(), generator)
}

#[derive(Clone, Copy, Debug)]
pub struct Labeled<G>(Atom, G);

impl<G: Generate> Generate for Labeled<G> {
    type Item = G::Item;

    fn generate(&self) -> Case<Self::Item> {
        let _scope = label(self.0.clone());
        self.1.generate()
    }
}
