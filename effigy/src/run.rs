use crate::{
    check::{Check, Checker, Fail},
    strategy::{Nested, Random, Shrinking},
    Generate, Prove,
};
use core::{any::type_name, fmt};
use hook::Guard;
use std::{env, str::FromStr};

struct Colors {
    red: &'static str,
    bold: &'static str,
    reset: &'static str,
}

impl Colors {
    pub const fn new(color: bool) -> Self {
        if color {
            Self {
                red: "\x1b[31m",
                bold: "\x1b[1m",
                reset: "\x1b[0m",
            }
        } else {
            Self {
                red: "",
                bold: "",
                reset: "",
            }
        }
    }
}

fn prepare<G: Generate, U: FnOnce(&mut Checker<G>)>(
    checker: &mut Checker<G>,
    update: U,
) -> Guard {
    environment::update(checker);
    update(checker);
    Guard::new()
}

pub mod synchronous {
    use super::*;

    #[track_caller]
    pub fn default<G: Generate, U: FnOnce(&mut Checker<G>), P: Prove, C: Fn(G::Item) -> P>(
        generator: G,
        update: U,
        check: C,
        color: bool,
    ) where
        G::Item: Clone + fmt::Debug,
        P::Error: fmt::Debug,
    {
        with(generator, update, check, color, |colors, fail| {
            eprintln!(
                "{bold}{red}FAIL{reset} {{ item: {:?}, message: \"{}\" }}",
                &fail.item,
                fail.message(),
                bold = colors.bold,
                red = colors.red,
                reset = colors.reset,
            );
        });
    }

    #[track_caller]
    pub fn debug<G: Generate, U: FnOnce(&mut Checker<G>), P: Prove, C: Fn(G::Item) -> P>(
        generator: G,
        update: U,
        check: C,
        color: bool,
    ) where
        G::Item: Clone + fmt::Debug,
        P::Error: fmt::Debug,
    {
        with(generator, update, check, color, |_colors, fail| {
            eprintln!("{fail:?}");
        });
    }

    #[track_caller]
    pub fn minimal<G: Generate, U: FnOnce(&mut Checker<G>), P: Prove, C: Fn(G::Item) -> P>(
        generator: G,
        update: U,
        check: C,
        color: bool,
    ) where
        G::Item: Clone,
    {
        with(generator, update, check, color, |colors, _fail| {
            eprintln!(
                "{bold}{red}FAIL{reset} {{ type: {} }}",
                type_name::<G::Item>(),
                bold = colors.bold,
                red = colors.red,
                reset = colors.reset,
            );
        });
    }

    #[track_caller]
    fn with<
        G: Generate,
        U: FnOnce(&mut Checker<G>),
        P: Prove,
        C: Fn(G::Item) -> P,
        W: FnOnce(&Colors, Fail<G::Item, P::Error>),
    >(
        generator: G,
        update: U,
        check: C,
        color: bool,
        fail: W,
    ) where
        G::Item: Clone,
    {
        let mut checker = generator.checker();
        let colors = Colors::new(color);
        let _guard = prepare(&mut checker, update);
        if let Some(failure) = hook::silence(|| checker.check(&check)) {
            fail(&colors, failure);
            hook::panic();
        }
    }
}

mod hook {
    use super::*;
    use core::cell::Cell;
    use std::panic;

    pub struct Guard;

    #[rustversion::since(1.81)]
    type Handle = Box<dyn Fn(&panic::PanicHookInfo) + 'static + Sync + Send>;
    #[rustversion::before(1.81)]
    type Handle = Box<dyn Fn(&panic::PanicInfo) + 'static + Sync + Send>;
    thread_local! { static HOOK: Cell<Option<Handle>> = const { Cell::new(None) }; }

    impl Guard {
        pub fn new() -> Self {
            begin();
            Self
        }
    }

    impl Drop for Guard {
        fn drop(&mut self) {
            end();
        }
    }

    pub fn begin() {
        HOOK.with(|cell| cell.set(Some(panic::take_hook())));
        panic::set_hook(Box::new(|panic| {
            HOOK.with(|cell| {
                if let Some(hook) = cell.replace(None) {
                    hook(panic);
                    cell.set(Some(hook));
                }
            });
        }));
    }

    /// Temporarily removes the thread's panic hook (restored before this
    /// returns) so a check's expected, caught-internally panics don't also
    /// print through it.
    pub fn silence<T>(body: impl FnOnce() -> T) -> T {
        HOOK.with(|cell| {
            let hook = cell.replace(None);
            let output = body();
            cell.set(hook);
            output
        })
    }

    pub fn end() {
        HOOK.with(|cell| {
            if let Some(hook) = cell.take() {
                panic::set_hook(hook);
            }
        });
    }

    pub fn panic() -> ! {
        end();
        panic!();
    }
}

mod environment {
    use super::*;

    mod generate {
        use super::*;

        pub fn count() -> Option<usize> {
            parse("EFFIGY_GENERATE_COUNT")
        }

        pub fn size() -> Option<u64> {
            parse("EFFIGY_GENERATE_SIZE")
        }

        pub fn seed() -> Option<u64> {
            parse("EFFIGY_GENERATE_SEED")
        }

        pub fn update<G>(checker: &mut Checker<G, Nested<Random, Shrinking>>) {
            if let Some(value) = size() {
                checker.strategy.0.max_size = value;
                checker.strategy.0.starting_size = value;
            }
            if let Some(value) = count() {
                checker.strategy.0.max_success = value;
            }
            if let Some(value) = seed() {
                checker.strategy.0.seed = value;
            }
        }
    }

    mod shrink {
        use super::*;

        pub fn count() -> Option<usize> {
            parse("EFFIGY_SHRINK_COUNT")
        }

        pub fn update<G>(checker: &mut Checker<G, Nested<Random, Shrinking>>) {
            if let Some(value) = count() {
                checker.strategy.1.max_shrinks = value;
            }
        }
    }

    pub fn update<G>(checker: &mut Checker<G, Nested<Random, Shrinking>>) {
        generate::update(checker);
        shrink::update(checker);
    }

    fn parse<T: FromStr>(key: &str) -> Option<T> {
        match env::var(key) {
            Ok(value) => value.parse().ok(),
            Err(_) => None,
        }
    }
}
