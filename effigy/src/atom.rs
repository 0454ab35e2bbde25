//! Interned, constant-time-comparable labels used to address sampling sites.
use std::{
    collections::HashSet,
    fmt,
    hash::{Hash, Hasher},
    sync::{Arc, Mutex, OnceLock},
};

/// A label attached to a sampling site: either an interned string (a
/// [`Symbol`](Atom::Symbol)) or a signed integer (a [`Number`](Atom::Number)).
///
/// Two atoms are equal iff their underlying representations are equal *and*
/// of the same kind: a symbol whose text is `"7"` never compares equal to
/// the number atom `7`. This asymmetry is deliberate (see the crate's design
/// notes) and must be preserved by any code that hashes or orders atoms.
///
/// Atoms are cheap to copy and compare: symbols are interned in a process-wide
/// table, so equality and hashing are pointer comparisons under the hood.
#[derive(Clone, Debug)]
pub enum Atom {
    Symbol(Arc<str>),
    Number(i64),
}

impl Atom {
    /// Interns `value` and returns the corresponding symbol atom.
    pub fn symbol(value: impl AsRef<str>) -> Self {
        Atom::Symbol(intern(value.as_ref()))
    }

    /// Wraps `value` as a number atom. Numbers are not interned; equality is
    /// a plain integer comparison.
    pub const fn number(value: i64) -> Self {
        Atom::Number(value)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Atom::Symbol(value) => Some(value),
            Atom::Number(_) => None,
        }
    }

    pub const fn as_number(&self) -> Option<i64> {
        match self {
            Atom::Number(value) => Some(*value),
            Atom::Symbol(_) => None,
        }
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Atom::Symbol(left), Atom::Symbol(right)) => Arc::ptr_eq(left, right) || left == right,
            (Atom::Number(left), Atom::Number(right)) => left == right,
            _ => false,
        }
    }
}

impl Eq for Atom {}

impl Hash for Atom {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Atom::Symbol(value) => {
                0u8.hash(state);
                value.hash(state);
            }
            Atom::Number(value) => {
                1u8.hash(state);
                value.hash(state);
            }
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Symbol(value) => formatter.write_str(value),
            Atom::Number(value) => write!(formatter, "{value}"),
        }
    }
}

impl From<&str> for Atom {
    fn from(value: &str) -> Self {
        Atom::symbol(value)
    }
}

impl From<String> for Atom {
    fn from(value: String) -> Self {
        Atom::symbol(value)
    }
}

macro_rules! integers {
    ($($integer:ty),* $(,)?) => {
        $(
            impl From<$integer> for Atom {
                fn from(value: $integer) -> Self {
                    Atom::Number(value as i64)
                }
            }
        )*
    };
}
integers!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

fn table() -> &'static Mutex<HashSet<Arc<str>>> {
    static TABLE: OnceLock<Mutex<HashSet<Arc<str>>>> = OnceLock::new();
    TABLE.get_or_init(|| Mutex::new(HashSet::new()))
}

/// Interns `value`, returning the process-wide shared allocation for it.
///
/// Contention on the intern table's mutex only occurs while constructing a
/// new symbol atom; once interned, comparing and hashing symbol atoms never
/// touches the table again.
fn intern(value: &str) -> Arc<str> {
    let table = table();
    if let Some(existing) = table.lock().unwrap().get(value) {
        return existing.clone();
    }
    let mut guard = table.lock().unwrap();
    if let Some(existing) = guard.get(value) {
        return existing.clone();
    }
    let arc: Arc<str> = Arc::from(value);
    guard.insert(arc.clone());
    arc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_symbols_intern_to_the_same_allocation() {
        let a = Atom::symbol("path.to.value");
        let b = Atom::symbol("path.to.value");
        assert_eq!(a, b);
        if let (Atom::Symbol(a), Atom::Symbol(b)) = (&a, &b) {
            assert!(Arc::ptr_eq(a, b));
        } else {
            unreachable!();
        }
    }

    #[test]
    fn distinct_symbols_are_unequal() {
        assert_ne!(Atom::symbol("a"), Atom::symbol("b"));
    }

    #[test]
    fn numbers_compare_by_value() {
        assert_eq!(Atom::number(7), Atom::number(7));
        assert_ne!(Atom::number(7), Atom::number(8));
    }

    #[test]
    fn cross_kind_atoms_are_never_equal() {
        assert_ne!(Atom::symbol("7"), Atom::number(7));
    }
}
