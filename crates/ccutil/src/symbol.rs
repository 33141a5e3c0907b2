//! String interning for identifiers and string-literal contents.
//!
//! Unlike the teacher's global, thread-safe `STRING_TABLE` (this compiler
//! never runs more than one compilation concurrently, per the single-pass,
//! single-threaded model), the interner here is an ordinary owned value:
//! one per compilation, dropped with it.

use rustc_hash::FxHashMap;
use std::fmt;

/// A compact handle to an interned string. Cheap to copy and compare.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

/// Owns the backing storage for every [`Symbol`] produced from it.
#[derive(Default)]
pub struct Interner {
    strings: Vec<Box<str>>,
    lookup: FxHashMap<Box<str>, u32>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&idx) = self.lookup.get(s) {
            return Symbol(idx);
        }
        let idx = self.strings.len() as u32;
        let owned: Box<str> = s.into();
        self.strings.push(owned.clone());
        self.lookup.insert(owned, idx);
        Symbol(idx)
    }

    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.strings[sym.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_dedups() {
        let mut i = Interner::new();
        let a = i.intern("foo");
        let b = i.intern("foo");
        let c = i.intern("bar");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(i.resolve(a), "foo");
        assert_eq!(i.resolve(c), "bar");
    }

    #[test]
    fn distinct_strings_get_distinct_symbols() {
        let mut i = Interner::new();
        let syms: Vec<_> = ["a", "b", "c", "d"].iter().map(|s| i.intern(s)).collect();
        for (idx, sym) in syms.iter().enumerate() {
            assert_eq!(i.resolve(*sym), ["a", "b", "c", "d"][idx]);
        }
    }
}
