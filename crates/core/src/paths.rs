//! Proper causal paths.
//!
//! A proper causal path from X to Y is a directed path `x → … → y` with
//! `x ∈ X`, `y ∈ Y` whose interior avoids `X ∪ Y`. These are the paths that
//! carry the causal effect; their first edges are what the proper back-door
//! graph removes, and their non-source vertices seed the forbidden set.

use petgraph::graph::NodeIndex;
use petgraph::Direction;
use std::fmt;

use crate::admg::Admg;
use crate::symbol::{Symbol, SymbolSet};

/// A directed path, source first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CausalPath(Vec<Symbol>);

impl CausalPath {
    pub fn vertices(&self) -> &[Symbol] {
        &self.0
    }

    /// The `(source, next)` edge.
    pub fn first_edge(&self) -> Option<(&Symbol, &Symbol)> {
        match self.0.as_slice() {
            [a, b, ..] => Some((a, b)),
            _ => None,
        }
    }

    /// Vertices strictly between the endpoints.
    pub fn interior(&self) -> &[Symbol] {
        match self.0.len() {
            0..=2 => &[],
            n => &self.0[1..n - 1],
        }
    }

    /// Every vertex after the source.
    pub fn tail(&self) -> &[Symbol] {
        self.0.get(1..).unwrap_or(&[])
    }

    /// `true` if some vertex of the path is in `set`.
    pub fn meets(&self, set: &SymbolSet) -> bool {
        self.0.iter().any(|v| set.contains(v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CausalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(Symbol::as_str).collect();
        f.write_str(&names.join(" → "))
    }
}

impl Admg {
    /// Enumerate every proper causal path from `x` to `y`, each exactly once.
    ///
    /// Paths come out in depth-first order, children visited in vertex order.
    /// Overlapping or empty endpoint sets yield no paths through the overlap.
    pub fn find_all_proper_causal_paths(
        &self,
        x: impl Into<SymbolSet>,
        y: impl Into<SymbolSet>,
    ) -> Vec<CausalPath> {
        let x = self.normalize(x);
        let y = self.normalize(y);
        let sources = self.mask(&x);
        let targets = self.mask(&y);

        let mut paths = Vec::new();
        for start in self.indices(&x) {
            let mut trail = vec![start];
            let mut on_trail = vec![false; self.vertex_count()];
            on_trail[start.index()] = true;
            self.extend_paths(&mut trail, &mut on_trail, &sources, &targets, &mut paths);
        }
        paths
    }

    /// The distinct first edges of the proper causal paths from `x` to `y`.
    pub fn proper_causal_edges(
        &self,
        x: impl Into<SymbolSet>,
        y: impl Into<SymbolSet>,
    ) -> Vec<(Symbol, Symbol)> {
        let mut edges: Vec<(Symbol, Symbol)> = Vec::new();
        for path in self.find_all_proper_causal_paths(x, y) {
            if let Some((a, b)) = path.first_edge() {
                if !edges.iter().any(|(p, q)| p == a && q == b) {
                    edges.push((a.clone(), b.clone()));
                }
            }
        }
        edges
    }

    fn extend_paths(
        &self,
        trail: &mut Vec<NodeIndex>,
        on_trail: &mut [bool],
        sources: &[bool],
        targets: &[bool],
        out: &mut Vec<CausalPath>,
    ) {
        let Some(&tip) = trail.last() else {
            return;
        };
        let mut next: Vec<NodeIndex> = self
            .directed_graph()
            .neighbors_directed(tip, Direction::Outgoing)
            .collect();
        next.sort();

        for child in next {
            let i = child.index();
            if on_trail[i] || sources[i] {
                continue;
            }
            trail.push(child);
            if targets[i] {
                out.push(CausalPath(
                    trail.iter().map(|&n| self.symbol_at(n).clone()).collect(),
                ));
            } else {
                on_trail[i] = true;
                self.extend_paths(trail, on_trail, sources, targets, out);
                on_trail[i] = false;
            }
            trail.pop();
        }
    }
}
