//! Scoped, dynamically-dispatched effects: the substrate every other
//! subsystem in this crate is built on.
//!
//! An [`Effect`] is a value type with an associated output. Calling
//! [`invoke`] resolves to the most recently [`install`]ed [`Handle`]r for
//! that effect's type identity; if none is installed, [`Effect::fallback`]
//! runs instead. Handlers are scoped: dropping the [`Scope`] returned by
//! [`install`] restores whatever was installed before it, even on unwind.
//!
//! The key subtlety (see [`Handle::handle`]'s documentation and the crate's
//! `effect shadowing` test) is that a handler's body sees the handler stack
//! as it existed *when the handler was installed*, not the stack as it
//! exists at the moment of invocation. This is what makes nested
//! installations of the same effect (as `shrinking` nests inside `random`)
//! behave predictably: a handler can call `invoke` recursively and reach the
//! handler that was active before it, never itself.
use std::{
    any::{Any, TypeId},
    cell::RefCell,
    collections::HashMap,
    rc::Rc,
};

/// A value type dispatched through the effect system.
///
/// Implementors are typically small, `Copy`-able structs carrying just the
/// arguments of the operation (see [`crate::ops::Sample`], [`crate::ops::Size`]).
pub trait Effect: Sized + 'static {
    /// The type produced by handling (or falling back on) this effect.
    type Output;

    /// The total, default behavior used when no handler is installed.
    fn fallback(self) -> Self::Output;
}

/// Implemented by a type that wants to intercept effect `E`.
///
/// A single handler type may implement `Handle<E>` for several different
/// effects; each `impl` block is one "claim" on dispatch for that effect.
pub trait Handle<E: Effect> {
    fn handle(&self, effect: E) -> E::Output;
}

type ErasedEntry = Rc<dyn Any>;

struct Entry<E: Effect> {
    handler: Rc<dyn Handle<E>>,
    // The state of this effect's slot at the moment this entry was
    // installed. Restored around the handler's own execution so that its
    // body observes the world as it looked at installation time.
    prior: Option<ErasedEntry>,
}

thread_local! {
    static SLOTS: RefCell<HashMap<TypeId, ErasedEntry>> = RefCell::new(HashMap::new());
}

/// A guard that restores prior handler state when dropped.
///
/// Returned by [`install`] and [`restore`]. Dropping it (including via
/// unwind) puts the affected slots back exactly as they were.
#[must_use = "dropping a Scope immediately un-installs its handlers"]
pub struct Scope {
    // (effect type id, state to restore into that slot)
    restores: Vec<(TypeId, Option<ErasedEntry>)>,
}

impl Scope {
    fn combine(mut self, mut other: Scope) -> Scope {
        self.restores.append(&mut other.restores);
        other.restores.clear();
        self
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        SLOTS.with(|slots| {
            let mut slots = slots.borrow_mut();
            // Restore in reverse installation order, matching well-nested
            // scope lifetimes (LIFO), which is the only order in which
            // scopes are ever dropped when used as RAII guards.
            for (type_id, prior) in self.restores.drain(..).rev() {
                match prior {
                    Some(entry) => {
                        slots.insert(type_id, entry);
                    }
                    None => {
                        slots.remove(&type_id);
                    }
                }
            }
        });
    }
}

/// Installs `handler` for effect `E` for the dynamic extent of the returned
/// [`Scope`]. When a single strategy needs to claim several effects at once
/// with one handler value, wrap it in an `Rc` and call [`install_shared`]
/// once per effect, then [`join`] the resulting scopes.
pub fn install<E, H>(handler: H) -> Scope
where
    E: Effect,
    H: Handle<E> + 'static,
{
    let type_id = TypeId::of::<E>();
    let handler: Rc<dyn Handle<E>> = Rc::new(handler);
    SLOTS.with(|slots| {
        let mut slots = slots.borrow_mut();
        let prior = slots.get(&type_id).cloned();
        let entry: Entry<E> = Entry {
            handler,
            prior: prior.clone(),
        };
        slots.insert(type_id, Rc::new(entry) as ErasedEntry);
        Scope {
            restores: vec![(type_id, prior)],
        }
    })
}

/// Installs handler `handler` for effect `E`, sharing ownership of an
/// already-`Rc`-wrapped handler value with other [`install_shared`] calls
/// for other effects the same value claims.
pub fn install_shared<E, H>(handler: &Rc<H>) -> Scope
where
    E: Effect,
    H: Handle<E> + 'static,
{
    let handler = handler.clone();
    let type_id = TypeId::of::<E>();
    SLOTS.with(|slots| {
        let mut slots = slots.borrow_mut();
        let prior = slots.get(&type_id).cloned();
        let entry: Entry<E> = Entry {
            handler: handler as Rc<dyn Handle<E>>,
            prior: prior.clone(),
        };
        slots.insert(type_id, Rc::new(entry) as ErasedEntry);
        Scope {
            restores: vec![(type_id, prior)],
        }
    })
}

/// Combines two scopes into one whose drop restores both, outer-scope order.
pub fn join(first: Scope, second: Scope) -> Scope {
    first.combine(second)
}

/// Resolves the innermost installed handler for `E` and applies it; falls
/// back to [`Effect::fallback`] if none is installed.
pub fn invoke<E: Effect>(effect: E) -> E::Output {
    let type_id = TypeId::of::<E>();
    let found = SLOTS.with(|slots| slots.borrow().get(&type_id).cloned());
    let Some(erased) = found else {
        return effect.fallback();
    };
    let entry = erased
        .downcast::<Entry<E>>()
        .unwrap_or_else(|_| unreachable!("effect slot type mismatch"));

    // Swap this slot back to what it held when `entry` was installed, so
    // that any nested `invoke::<E>` inside the handler body resolves against
    // that earlier state rather than against `entry` itself (which would
    // recurse) or against something installed after `entry` but before this
    // call (which would break the "installed at" contract).
    let saved = SLOTS.with(|slots| {
        let mut slots = slots.borrow_mut();
        match &entry.prior {
            Some(prior) => slots.insert(type_id, prior.clone()),
            None => slots.remove(&type_id),
        }
    });

    struct Restore {
        type_id: TypeId,
        saved: Option<ErasedEntry>,
    }
    impl Drop for Restore {
        fn drop(&mut self) {
            SLOTS.with(|slots| {
                let mut slots = slots.borrow_mut();
                match self.saved.take() {
                    Some(entry) => {
                        slots.insert(self.type_id, entry);
                    }
                    None => {
                        slots.remove(&self.type_id);
                    }
                }
            });
        }
    }
    let _restore = Restore { type_id, saved };
    entry.handler.handle(effect)
}

/// An opaque, cloneable snapshot of the entire handler stack, usable with
/// [`restore`] to reinstate it verbatim — e.g. to hand a snapshot of the
/// caller's handlers to a helper thread before it does anything else.
#[derive(Clone, Default)]
pub struct HandlerState(HashMap<TypeId, ErasedEntry>);

/// Captures the current handler stack.
pub fn save() -> HandlerState {
    SLOTS.with(|slots| HandlerState(slots.borrow().clone()))
}

/// Installs `state` as if the enclosing scope had installed exactly that
/// handler stack. Dropping the returned [`Scope`] restores whatever was
/// installed before this call.
pub fn restore(state: HandlerState) -> Scope {
    SLOTS.with(|slots| {
        let previous = std::mem::replace(&mut *slots.borrow_mut(), state.0);
        let restores = previous.into_iter().map(|(k, v)| (k, Some(v))).collect();
        // Slots present before `restore` but absent from `state` must be
        // cleared, not left behind; collect every type id that was live
        // before, defaulting missing ones to `None` (i.e. "was empty").
        Scope { restores }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Return(i32);
    impl Effect for Return {
        type Output = i32;
        fn fallback(self) -> i32 {
            self.0
        }
    }

    struct Const(i32);
    impl Handle<Return> for Const {
        fn handle(&self, _: Return) -> i32 {
            self.0
        }
    }

    #[test]
    fn fallback_runs_when_nothing_installed() {
        assert_eq!(invoke(Return(-1)), -1);
    }

    #[test]
    fn install_shadows_fallback_and_restores_on_drop() {
        assert_eq!(invoke(Return(0)), 0);
        {
            let _scope = install::<Return, _>(Const(1));
            assert_eq!(invoke(Return(0)), 1);
        }
        assert_eq!(invoke(Return(0)), 0);
    }

    struct Recurse;
    impl Handle<Return> for Recurse {
        fn handle(&self, effect: Return) -> i32 {
            invoke(effect) + 1
        }
    }

    #[test]
    fn nested_handler_sees_stack_as_of_its_own_installation() {
        // A handler installed while another handler is active sees the
        // stack as it stood at its own installation, not at invocation.
        let outer = install::<Return, _>(Const(1));
        assert_eq!(invoke(Return(0)), 1);
        {
            let inner = install::<Return, _>(Recurse);
            // Outside `Recurse`'s body, inside its own scope: sees `Recurse`.
            assert_eq!(invoke(Return(0)), 2);
            drop(inner);
        }
        // Back to the outer scope only.
        assert_eq!(invoke(Return(0)), 1);
        drop(outer);
        assert_eq!(invoke(Return(0)), 0);
    }

    #[test]
    fn save_and_restore_round_trips() {
        let baseline = save();
        {
            let _scope = install::<Return, _>(Const(9));
            assert_eq!(invoke(Return(0)), 9);
        }
        let _scope = restore(baseline);
        assert_eq!(invoke(Return(0)), 0);
    }

    #[test]
    fn restore_in_handler_free_block_is_a_no_op() {
        let state = save();
        let before = invoke(Return(5));
        {
            let _scope = restore(state);
            assert_eq!(invoke(Return(5)), before);
        }
    }
}
