//! # Symbols - Vertex Names
//!
//! A [`Symbol`] is the opaque name of a random variable. A [`SymbolSet`] is an
//! insertion-ordered set of symbols with the usual set algebra.
//!
//! ## Key Concepts
//!
//! - **Identity by name**: two symbols are equal iff their canonical strings are
//! - **Ordered sets**: iteration follows insertion order, which the graph uses
//!   as a deterministic tiebreaker
//! - **Set equality**: `{a, b} == {b, a}`; order never affects comparison
//!
//! Anything that names one or more vertices converts into a `SymbolSet`, so
//! graph queries accept `"x"`, `["x", "y"]`, `vec![...]` or a set alike.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// The name of a vertex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(Arc<str>);

impl Symbol {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// The canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primed copy used for summation dummies in formulas (`x` → `x'`).
    pub fn primed(&self) -> Self {
        Self::new(format!("{}'", self.0))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&Symbol> for Symbol {
    fn from(symbol: &Symbol) -> Self {
        symbol.clone()
    }
}

/// An insertion-ordered set of symbols.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Symbol>", into = "Vec<Symbol>")]
pub struct SymbolSet {
    order: Vec<Symbol>,
    members: HashSet<Symbol>,
}

impl SymbolSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a symbol, returning `false` if it was already present.
    pub fn insert(&mut self, symbol: impl Into<Symbol>) -> bool {
        let symbol = symbol.into();
        if self.members.insert(symbol.clone()) {
            self.order.push(symbol);
            true
        } else {
            false
        }
    }

    /// Remove a symbol, returning `true` if it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        if self.members.remove(name) {
            self.order.retain(|s| s.as_str() != name);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    /// Look a symbol up by name.
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.members.get(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.order.iter()
    }

    pub fn first(&self) -> Option<&Symbol> {
        self.order.first()
    }

    /// The most recently inserted symbol.
    pub fn last(&self) -> Option<&Symbol> {
        self.order.last()
    }

    /// The canonical names, in order.
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(Symbol::as_str).collect()
    }

    /// `self ∪ other`, keeping `self`'s order and appending new members.
    pub fn union(&self, other: &SymbolSet) -> SymbolSet {
        let mut out = self.clone();
        out.extend(other.iter().cloned());
        out
    }

    /// `self ∩ other`, in `self`'s order.
    pub fn intersection(&self, other: &SymbolSet) -> SymbolSet {
        self.iter().filter(|s| other.contains(s.as_str())).cloned().collect()
    }

    /// `self \ other`, in `self`'s order.
    pub fn difference(&self, other: &SymbolSet) -> SymbolSet {
        self.iter().filter(|s| !other.contains(s.as_str())).cloned().collect()
    }

    /// Copy of `self` without one member.
    pub fn without(&self, name: &str) -> SymbolSet {
        let mut out = self.clone();
        out.remove(name);
        out
    }

    /// Copy of `self` with one extra member.
    pub fn with(&self, symbol: impl Into<Symbol>) -> SymbolSet {
        let mut out = self.clone();
        out.insert(symbol);
        out
    }

    pub fn is_subset(&self, other: &SymbolSet) -> bool {
        self.iter().all(|s| other.contains(s.as_str()))
    }

    pub fn is_disjoint(&self, other: &SymbolSet) -> bool {
        !self.intersects(other)
    }

    /// `true` when the sets share at least one member.
    pub fn intersects(&self, other: &SymbolSet) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().any(|s| large.contains(s.as_str()))
    }

    /// Comma-separated names, as used inside formulas: `a, b, c`.
    pub fn format_names(&self) -> String {
        self.names().join(", ")
    }
}

impl PartialEq for SymbolSet {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Eq for SymbolSet {}

impl fmt::Debug for SymbolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.order.iter().map(Symbol::as_str)).finish()
    }
}

impl fmt::Display for SymbolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.format_names())
    }
}

impl<S: Into<Symbol>> FromIterator<S> for SymbolSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SymbolSet::new();
        set.extend(iter);
        set
    }
}

impl<S: Into<Symbol>> Extend<S> for SymbolSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for s in iter {
            self.insert(s);
        }
    }
}

impl IntoIterator for SymbolSet {
    type Item = Symbol;
    type IntoIter = std::vec::IntoIter<Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.into_iter()
    }
}

impl<'a> IntoIterator for &'a SymbolSet {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

// ============================================================================
// Conversions: everything that names vertices becomes a SymbolSet
// ============================================================================

impl From<Vec<Symbol>> for SymbolSet {
    fn from(symbols: Vec<Symbol>) -> Self {
        symbols.into_iter().collect()
    }
}

impl From<SymbolSet> for Vec<Symbol> {
    fn from(set: SymbolSet) -> Self {
        set.order
    }
}

impl From<&SymbolSet> for SymbolSet {
    fn from(set: &SymbolSet) -> Self {
        set.clone()
    }
}

impl From<Symbol> for SymbolSet {
    fn from(symbol: Symbol) -> Self {
        std::iter::once(symbol).collect()
    }
}

impl From<&Symbol> for SymbolSet {
    fn from(symbol: &Symbol) -> Self {
        std::iter::once(symbol.clone()).collect()
    }
}

impl From<&str> for SymbolSet {
    fn from(name: &str) -> Self {
        std::iter::once(name).collect()
    }
}

impl From<Vec<&str>> for SymbolSet {
    fn from(names: Vec<&str>) -> Self {
        names.into_iter().collect()
    }
}

impl<const N: usize> From<[&str; N]> for SymbolSet {
    fn from(names: [&str; N]) -> Self {
        names.into_iter().collect()
    }
}

impl<const N: usize> From<[Symbol; N]> for SymbolSet {
    fn from(symbols: [Symbol; N]) -> Self {
        symbols.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order_and_dedups() {
        let mut set = SymbolSet::new();
        assert!(set.insert("b"));
        assert!(set.insert("a"));
        assert!(!set.insert("b"));
        assert_eq!(set.names(), vec!["b", "a"]);
    }

    #[test]
    fn test_equality_ignores_order() {
        assert_eq!(SymbolSet::from(["a", "b"]), SymbolSet::from(["b", "a"]));
        assert_ne!(SymbolSet::from(["a"]), SymbolSet::from(["a", "b"]));
    }

    #[test]
    fn test_set_algebra() {
        let ab = SymbolSet::from(["a", "b"]);
        let bc = SymbolSet::from(["b", "c"]);

        assert_eq!(ab.union(&bc).names(), vec!["a", "b", "c"]);
        assert_eq!(ab.intersection(&bc), SymbolSet::from("b"));
        assert_eq!(ab.difference(&bc), SymbolSet::from("a"));
        assert!(ab.intersects(&bc));
        assert!(ab.is_disjoint(&SymbolSet::from("c")));
        assert!(SymbolSet::from("a").is_subset(&ab));
        assert!(SymbolSet::new().is_subset(&ab));
    }

    #[test]
    fn test_remove_and_lookup() {
        let mut set = SymbolSet::from(["x", "y", "z"]);
        assert!(set.remove("y"));
        assert!(!set.remove("y"));
        assert_eq!(set.get("x").map(Symbol::as_str), Some("x"));
        assert!(set.get("y").is_none());
        assert_eq!(set.last().map(Symbol::as_str), Some("z"));
    }

    #[test]
    fn test_display() {
        let set = SymbolSet::from(["m", "n"]);
        assert_eq!(set.to_string(), "{m, n}");
        assert_eq!(SymbolSet::new().to_string(), "{}");
        assert_eq!(Symbol::new("x").primed().as_str(), "x'");
    }
}
