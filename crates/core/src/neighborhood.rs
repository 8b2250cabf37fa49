//! Local neighbourhood queries.
//!
//! Every accessor takes anything that names vertices (one name, an array, a
//! `SymbolSet`), normalises it through the synonym map and returns a set in
//! vertex order. With `include_self` the normalised query is added to the
//! result.

use petgraph::Direction;
use std::collections::VecDeque;

use crate::admg::Admg;
use crate::symbol::SymbolSet;

impl Admg {
    /// Direct causes of any vertex in `set`.
    pub fn parents(&self, set: impl Into<SymbolSet>, include_self: bool) -> SymbolSet {
        self.step(set.into(), Direction::Incoming, false, include_self)
    }

    /// Direct effects of any vertex in `set`.
    pub fn children(&self, set: impl Into<SymbolSet>, include_self: bool) -> SymbolSet {
        self.step(set.into(), Direction::Outgoing, false, include_self)
    }

    /// Everything with a directed path into `set`.
    pub fn ancestors(&self, set: impl Into<SymbolSet>, include_self: bool) -> SymbolSet {
        self.step(set.into(), Direction::Incoming, true, include_self)
    }

    /// Everything reachable from `set` along directed edges.
    pub fn descendants(&self, set: impl Into<SymbolSet>, include_self: bool) -> SymbolSet {
        self.step(set.into(), Direction::Outgoing, true, include_self)
    }

    /// Vertices sharing a bidirected edge with some vertex of `set`.
    pub fn bidirected_neighbors(&self, set: impl Into<SymbolSet>, include_self: bool) -> SymbolSet {
        let query = self.normalize(set);
        let mut mask = if include_self {
            self.mask(&query)
        } else {
            vec![false; self.vertex_count()]
        };
        for (a, b) in self.bidirected_edges() {
            if query.contains(a.as_str()) {
                mask[self.rank(b.as_str())] = true;
            }
            if query.contains(b.as_str()) {
                mask[self.rank(a.as_str())] = true;
            }
        }
        self.set_from_mask(&mask)
    }

    /// Union of the c-components that meet `set`.
    ///
    /// A c-component always contains its own members, so `include_self` only
    /// matters for the empty query.
    pub fn c_component(&self, set: impl Into<SymbolSet>, include_self: bool) -> SymbolSet {
        let query = self.normalize(set);
        let mut mask = if include_self {
            self.mask(&query)
        } else {
            vec![false; self.vertex_count()]
        };
        for component in self.c_components() {
            if component.intersects(&query) {
                for v in component {
                    mask[self.rank(v.as_str())] = true;
                }
            }
        }
        self.set_from_mask(&mask)
    }

    fn rank(&self, name: &str) -> usize {
        self.node(name).map(|idx| idx.index()).unwrap_or_default()
    }

    /// One step (or the transitive closure) along directed edges.
    fn step(
        &self,
        set: SymbolSet,
        direction: Direction,
        transitive: bool,
        include_self: bool,
    ) -> SymbolSet {
        let query = self.normalize(set);
        let graph = self.directed_graph();
        let mut reached = vec![false; self.vertex_count()];
        let mut queue: VecDeque<_> = self.indices(&query).into();

        while let Some(node) = queue.pop_front() {
            for next in graph.neighbors_directed(node, direction) {
                if !reached[next.index()] {
                    reached[next.index()] = true;
                    if transitive {
                        queue.push_back(next);
                    }
                }
            }
        }

        if include_self {
            for idx in self.indices(&query) {
                reached[idx.index()] = true;
            }
        }
        self.set_from_mask(&reached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Admg {
        // a → b → d, a → c → d, c ↔ e
        Admg::builder()
            .vertices(["a", "b", "c", "d", "e"])
            .edges([("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")])
            .bidirected_edge("c", "e")
            .build()
            .unwrap()
    }

    #[test]
    fn test_parents_and_children() {
        let g = diamond();
        assert_eq!(g.parents("d", false), SymbolSet::from(["b", "c"]));
        assert_eq!(g.children("a", false), SymbolSet::from(["b", "c"]));
        assert_eq!(g.parents("a", false), SymbolSet::new());
        assert_eq!(g.parents("d", true), SymbolSet::from(["b", "c", "d"]));
    }

    #[test]
    fn test_closures() {
        let g = diamond();
        assert_eq!(g.ancestors("d", false), SymbolSet::from(["a", "b", "c"]));
        assert_eq!(g.descendants("a", false), SymbolSet::from(["b", "c", "d"]));
        assert_eq!(g.descendants(["b", "c"], true), SymbolSet::from(["b", "c", "d"]));
    }

    #[test]
    fn test_closure_of_set_contains_inner_ancestors() {
        let g = diamond();
        // b is an ancestor of d, so it appears even without include_self
        assert_eq!(g.ancestors(["b", "d"], false), SymbolSet::from(["a", "b", "c"]));
    }

    #[test]
    fn test_results_follow_vertex_order() {
        let g = diamond();
        assert_eq!(g.ancestors("d", true).names(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_bidirected_neighbors_and_components() {
        let g = diamond();
        assert_eq!(g.bidirected_neighbors("c", false), SymbolSet::from("e"));
        assert_eq!(g.bidirected_neighbors("a", false), SymbolSet::new());
        assert_eq!(g.c_component("e", false), SymbolSet::from(["c", "e"]));
        assert_eq!(g.c_component("a", false), SymbolSet::from("a"));
    }

    #[test]
    fn test_synonyms_are_followed() {
        let g = Admg::builder()
            .vertices(["x", "y"])
            .edge("x", "y")
            .synonym("x_{x=1}", "x")
            .build()
            .unwrap();
        assert_eq!(g.children("x_{x=1}", false), SymbolSet::from("y"));
    }
}
