//! Forward shrinking: a flat, replayable sequence of decisions consumed in
//! visitation order, with no addressing by label path.
use crate::{
    decisions::{Cursor, Decisions},
    effect::{self, Handle},
    ops::ShrinkSite,
    outcome::Case,
};
use std::{
    rc::Rc,
    thread::{self, ThreadId},
};

/// Installs a forward-shrinking handler around `body` using `input` as the
/// decision source, and returns the body's result alongside a lazy
/// enumeration of child decision lists to try next: `input` followed by each
/// `v` in `[0, remaining)`, where `remaining` is the number of shrink-site
/// alternatives seen after `input` was exhausted. Empty when every site the
/// body visited was already addressed by `input`.
pub fn run<T>(
    input: &Decisions,
    body: impl FnOnce() -> Case<T>,
) -> (Case<T>, impl Iterator<Item = Decisions>) {
    let owner = thread::current().id();
    let handler = Rc::new(ForwardShrink {
        owner,
        cursor: input.cursor(),
    });
    let scope = effect::install_shared::<ShrinkSite, _>(&handler);
    let result = body();
    drop(scope);

    let remaining = handler.cursor.remaining();
    let input = input.clone();
    let children = (0..remaining as u64).map(move |value| input.appended(value));
    (result, children)
}

struct ForwardShrink<'a> {
    owner: ThreadId,
    cursor: Cursor<'a>,
}

impl Handle<ShrinkSite> for ForwardShrink<'_> {
    fn handle(&self, effect: ShrinkSite) -> Option<u64> {
        assert_eq!(
            thread::current().id(),
            self.owner,
            "effigy: a forward shrinker was invoked from a different thread than installed it"
        );
        self.cursor.shrink(effect.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::shrink_site;

    #[test]
    fn honors_recorded_decisions_in_order() {
        let input = Decisions::new(vec![2, 0]);
        let (result, children): (Case<(u64, u64)>, _) = run(&input, || {
            let a = shrink_site(4).unwrap();
            let b = shrink_site(4).unwrap();
            Ok((a, b))
        });
        assert_eq!(result.unwrap(), (2, 0));
        assert_eq!(children.count(), 0);
    }

    #[test]
    fn unaddressed_sites_enumerate_every_deeper_child() {
        let input = Decisions::new(vec![]);
        let (_result, children): (Case<()>, _) = run(&input, || {
            let _ = shrink_site(5);
            let _ = shrink_site(3);
            Ok(())
        });
        let children: Vec<_> = children.map(Decisions::into_vec).collect();
        assert_eq!(children, (0u64..8).map(|v| vec![v]).collect::<Vec<_>>());
    }
}
