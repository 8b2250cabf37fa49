//! # D-Separation
//!
//! Separation in an ADMG (m-separation) is decided as d-separation in its
//! latent projection, where every bidirected edge became an exogenous parent.
//!
//! ## Conventions
//!
//! - Empty X or Y is never separated (`false`)
//! - Overlapping X and Y are never separated (`false`)
//! - If the conditioning set meets X or Y the answer is `true`: conditioning
//!   on a variable blocks every trail that starts or ends at it
//!
//! ## Algorithms
//!
//! - **Bayes-ball** reachability for separation tests
//! - **Ancestral reachability** (Tian, Paz & Pearl) for minimality
//! - **Power-set sweep** for enumeration; exponential, small graphs only

use itertools::Itertools;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::VecDeque;
use tracing::debug;

use crate::admg::Admg;
use crate::symbol::SymbolSet;

/// How a trail entered a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    /// Arrived from a child, travelling against an edge.
    FromChild,
    /// Arrived from a parent, travelling along an edge.
    FromParent,
}

/// Nodes d-connected to `sources` given the `conditioned` mask.
///
/// The sources themselves are reported unless conditioned on.
fn d_connected<N>(graph: &DiGraph<N, ()>, sources: &[NodeIndex], conditioned: &[bool]) -> Vec<bool> {
    let n = graph.node_count();

    // Colliders open when they or a descendant are conditioned on.
    let mut opens_collider = conditioned.to_vec();
    let mut stack: Vec<NodeIndex> = (0..n)
        .filter(|&i| conditioned[i])
        .map(NodeIndex::new)
        .collect();
    while let Some(node) = stack.pop() {
        for parent in graph.neighbors_directed(node, Direction::Incoming) {
            if !opens_collider[parent.index()] {
                opens_collider[parent.index()] = true;
                stack.push(parent);
            }
        }
    }

    let mut visited = vec![[false; 2]; n];
    let mut reached = vec![false; n];
    let mut queue: VecDeque<(NodeIndex, Entry)> =
        sources.iter().map(|&s| (s, Entry::FromChild)).collect();

    while let Some((node, entry)) = queue.pop_front() {
        let slot = &mut visited[node.index()][entry as usize];
        if *slot {
            continue;
        }
        *slot = true;

        let blocked = conditioned[node.index()];
        if !blocked {
            reached[node.index()] = true;
        }

        match entry {
            Entry::FromChild => {
                if !blocked {
                    for parent in graph.neighbors_directed(node, Direction::Incoming) {
                        queue.push_back((parent, Entry::FromChild));
                    }
                    for child in graph.neighbors_directed(node, Direction::Outgoing) {
                        queue.push_back((child, Entry::FromParent));
                    }
                }
            }
            Entry::FromParent => {
                if !blocked {
                    for child in graph.neighbors_directed(node, Direction::Outgoing) {
                        queue.push_back((child, Entry::FromParent));
                    }
                }
                if opens_collider[node.index()] {
                    for parent in graph.neighbors_directed(node, Direction::Incoming) {
                        queue.push_back((parent, Entry::FromChild));
                    }
                }
            }
        }
    }

    reached
}

/// Nodes of `allowed` reachable from `sources` when only non-colliders in
/// `conditioned` block. This is separation in the moral graph of the
/// ancestral set, walked without building it.
fn connected_within<N>(
    graph: &DiGraph<N, ()>,
    sources: &[NodeIndex],
    allowed: &[bool],
    conditioned: &[bool],
) -> Vec<bool> {
    let n = graph.node_count();
    let mut processed = vec![[false; 2]; n];
    let mut queue = VecDeque::new();

    for &s in sources {
        if graph.neighbors_directed(s, Direction::Incoming).next().is_some() {
            processed[s.index()][Entry::FromParent as usize] = true;
            queue.push_back((s, Entry::FromParent));
        }
        if graph.neighbors_directed(s, Direction::Outgoing).next().is_some() {
            processed[s.index()][Entry::FromChild as usize] = true;
            queue.push_back((s, Entry::FromChild));
        }
    }

    while let Some((node, entry)) = queue.pop_front() {
        let moves = graph
            .neighbors_directed(node, Direction::Incoming)
            .map(|p| (p, Entry::FromChild))
            .chain(
                graph
                    .neighbors_directed(node, Direction::Outgoing)
                    .map(|c| (c, Entry::FromParent)),
            );
        for (next, next_entry) in moves {
            // Through a conditioned node only as a collider: in from a
            // parent, out to a parent.
            let passes = !conditioned[node.index()]
                || (entry == Entry::FromParent && next_entry == Entry::FromChild);
            let slot = &mut processed[next.index()][next_entry as usize];
            if allowed[next.index()] && passes && !*slot {
                *slot = true;
                queue.push_back((next, next_entry));
            }
        }
    }

    processed.iter().map(|p| p[0] || p[1]).collect()
}

impl Admg {
    /// `true` iff `z` d-separates `x` from `y` in the latent projection.
    ///
    /// See the module docs for the empty / overlap conventions.
    pub fn is_d_separator(
        &self,
        x: impl Into<SymbolSet>,
        y: impl Into<SymbolSet>,
        z: impl Into<SymbolSet>,
    ) -> bool {
        let x = self.normalize(x);
        let y = self.normalize(y);
        let z = self.normalize(z);

        if x.is_empty() || y.is_empty() {
            debug!("d-separation query with an empty side");
            return false;
        }
        if x.intersects(&y) {
            debug!(%x, %y, "d-separation query with overlapping sides");
            return false;
        }
        if x.intersects(&z) || y.intersects(&z) {
            return true;
        }
        self.separated(&x, &y, &z)
    }

    /// Separation test on already-normalised, disjoint sets.
    pub(crate) fn separated(&self, x: &SymbolSet, y: &SymbolSet, z: &SymbolSet) -> bool {
        let latent = self.latent_projection();
        let mut conditioned = vec![false; latent.node_count()];
        for idx in self.indices(z) {
            conditioned[idx.index()] = true;
        }
        let targets = self.indices(y);

        self.indices(x).into_iter().all(|source| {
            let reached = d_connected(latent, &[source], &conditioned);
            targets.iter().all(|t| !reached[t.index()])
        })
    }

    /// `true` iff, for every pair `(x, y)`, `z` (minus the pair itself) is a
    /// minimal d-separator of `x` and `y` in the directed part of the graph.
    pub fn is_minimal_d_separator(
        &self,
        x: impl Into<SymbolSet>,
        y: impl Into<SymbolSet>,
        z: impl Into<SymbolSet>,
    ) -> bool {
        let x = self.normalize(x);
        let y = self.normalize(y);
        let z = self.normalize(z);

        if x.is_empty() || y.is_empty() || x.intersects(&y) {
            return false;
        }

        x.iter().all(|xv| {
            y.iter().all(|yv| {
                let z = z.without(xv.as_str()).without(yv.as_str());
                self.is_minimal_pair(xv.as_str(), yv.as_str(), &z)
            })
        })
    }

    fn is_minimal_pair(&self, x: &str, y: &str, z: &SymbolSet) -> bool {
        let (Some(xi), Some(yi)) = (self.node(x), self.node(y)) else {
            return false;
        };
        let dag = self.directed_graph();
        let conditioned = self.mask(z);

        if d_connected(dag, &[xi], &conditioned)[yi.index()] {
            return false;
        }

        // A minimal separator lives inside An({x, y}) ...
        let ancestral = self.mask(&self.ancestors([x, y], true));
        if self.indices(z).iter().any(|zi| !ancestral[zi.index()]) {
            return false;
        }

        // ... and every member is needed from both sides.
        let from_x = connected_within(dag, &[xi], &ancestral, &conditioned);
        let from_y = connected_within(dag, &[yi], &ancestral, &conditioned);
        self.indices(z)
            .iter()
            .all(|zi| from_x[zi.index()] && from_y[zi.index()])
    }

    /// The smallest set `S` with `included ⊆ S ⊆ restricted` separating every
    /// pair of `x × y`, or `None`.
    ///
    /// Families of separators are computed pair by pair and intersected; the
    /// first survivor of minimum size wins. A pair with no separator empties
    /// the intersection, so the answer is `None` whatever the pair order.
    /// `restricted` defaults to `V \ (x ∪ y)`.
    pub fn find_minimal_d_separator(
        &self,
        x: impl Into<SymbolSet>,
        y: impl Into<SymbolSet>,
        included: impl Into<SymbolSet>,
        restricted: Option<SymbolSet>,
    ) -> Option<SymbolSet> {
        let x = self.normalize(x);
        let y = self.normalize(y);
        let included = self.normalize(included);
        if x.is_empty() || y.is_empty() || x.intersects(&y) {
            return None;
        }
        let restricted = self.default_restriction(&x, &y, restricted);

        let mut survivors: Option<Vec<SymbolSet>> = None;
        for xv in &x {
            for yv in &y {
                let family = self.find_all_d_separators(
                    xv,
                    yv,
                    included.clone(),
                    Some(restricted.clone()),
                );
                survivors = Some(match survivors {
                    None => family,
                    Some(acc) => acc.into_iter().filter(|s| family.contains(s)).collect(),
                });
            }
        }

        let found = survivors?.into_iter().min_by_key(SymbolSet::len);
        debug!(%x, %y, found = ?found, "minimal d-separator search");
        found
    }

    /// Every `S` with `included ⊆ S ⊆ restricted ⊆ V \ (x ∪ y)` that
    /// d-separates `x` from `y`, smallest first.
    pub fn find_all_d_separators(
        &self,
        x: impl Into<SymbolSet>,
        y: impl Into<SymbolSet>,
        included: impl Into<SymbolSet>,
        restricted: Option<SymbolSet>,
    ) -> Vec<SymbolSet> {
        let x = self.normalize(x);
        let y = self.normalize(y);
        let included = self.normalize(included);
        if x.is_empty() || y.is_empty() || x.intersects(&y) {
            return Vec::new();
        }

        let universe = self.default_restriction(&x, &y, restricted);
        if !included.is_subset(&universe) {
            return Vec::new();
        }

        universe
            .difference(&included)
            .into_iter()
            .powerset()
            .map(|extra| {
                let candidate = included.union(&SymbolSet::from(extra));
                self.set_from_mask(&self.mask(&candidate))
            })
            .filter(|candidate| self.separated(&x, &y, candidate))
            .collect()
    }

    /// `restricted ∩ (V \ (x ∪ y))`, with a missing restriction meaning all of
    /// `V \ (x ∪ y)`. `x` and `y` are expected in normalised form.
    pub fn default_restriction(
        &self,
        x: &SymbolSet,
        y: &SymbolSet,
        restricted: Option<SymbolSet>,
    ) -> SymbolSet {
        let outside = self.vertices().difference(&x.union(y));
        match restricted {
            Some(r) => outside.intersection(&self.normalize(r)),
            None => outside,
        }
    }
}
