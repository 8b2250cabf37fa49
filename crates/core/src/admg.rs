//! # ADMG - Acyclic Directed Mixed Graphs
//!
//! An ADMG is a causal diagram with two kinds of edges:
//!
//! - **Directed** `a → b`: `a` is a direct cause of `b`. The directed part is a DAG.
//! - **Bidirected** `a ↔ b`: `a` and `b` share an unobserved common cause.
//!
//! The value is immutable. Construction validates it once and caches two
//! derived structures:
//!
//! - **C-components**: connected components of the bidirected subgraph
//! - **Latent projection**: the DAG obtained by replacing every `a ↔ b` with a
//!   fresh exogenous parent `U_ab → a`, `U_ab → b`; m-separation in the ADMG is
//!   d-separation in this DAG
//!
//! Every derived graph (interventions, back-door graphs, ...) is a new value.
//!
//! ## Synonyms
//!
//! A synonym map sends an alias (typically an interventional twin such as
//! `X_{x=1}`) to a vertex of the graph. Queries are normalised through it, so
//! callers may name either.

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::warn;

use crate::error::GraphError;
use crate::symbol::{Symbol, SymbolSet};

/// A node of the latent projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LatentNode {
    /// A vertex of the ADMG.
    Observed(Symbol),
    /// The exogenous common parent standing in for a bidirected edge.
    Confounder(Symbol, Symbol),
}

/// An acyclic directed mixed graph over named vertices.
///
/// Node `i` of both internal petgraph graphs is the `i`-th vertex in insertion
/// order, so a `NodeIndex` doubles as the vertex's rank.
#[derive(Debug, Clone)]
pub struct Admg {
    vertices: SymbolSet,
    index: HashMap<Symbol, NodeIndex>,
    directed: DiGraph<Symbol, ()>,
    /// Unordered pairs, stored with the earlier vertex first.
    bidirected: Vec<(Symbol, Symbol)>,
    synonyms: HashMap<Symbol, Symbol>,
    components: Vec<SymbolSet>,
    latent: DiGraph<LatentNode, ()>,
}

impl Admg {
    /// Start building a graph.
    pub fn builder() -> AdmgBuilder {
        AdmgBuilder::default()
    }

    /// Validate and construct a graph from its parts.
    ///
    /// Returns an error if:
    /// - an edge endpoint or synonym target is not a vertex
    /// - a bidirected edge joins a vertex to itself
    /// - the directed edges contain a cycle (self-loops included)
    ///
    /// Duplicate vertices and edges collapse silently.
    pub fn from_parts(
        vertices: SymbolSet,
        directed: Vec<(Symbol, Symbol)>,
        bidirected: Vec<(Symbol, Symbol)>,
        synonyms: HashMap<Symbol, Symbol>,
    ) -> Result<Self, GraphError> {
        for (a, b) in &directed {
            for v in [a, b] {
                if !vertices.contains(v.as_str()) {
                    return Err(GraphError::UnknownVertex {
                        vertex: v.to_string(),
                        context: format!("directed edge {} -> {}", a, b),
                    });
                }
            }
        }

        for (a, b) in &bidirected {
            for v in [a, b] {
                if !vertices.contains(v.as_str()) {
                    return Err(GraphError::UnknownVertex {
                        vertex: v.to_string(),
                        context: format!("bidirected edge {} <-> {}", a, b),
                    });
                }
            }
            if a == b {
                return Err(GraphError::BidirectedSelfLoop {
                    vertex: a.to_string(),
                });
            }
        }

        for (alias, target) in &synonyms {
            if !vertices.contains(target.as_str()) {
                return Err(GraphError::UnknownVertex {
                    vertex: target.to_string(),
                    context: format!("synonym {}", alias),
                });
            }
        }

        let graph = Self::assemble(vertices, directed, bidirected, synonyms);

        if let Err(cycle) = toposort(&graph.directed, None) {
            return Err(GraphError::Cycle {
                vertex: graph.directed[cycle.node_id()].to_string(),
            });
        }

        Ok(graph)
    }

    /// Build the value and its caches without validation.
    ///
    /// Edges naming unknown vertices are skipped. Callers guarantee
    /// acyclicity; every surgery only ever removes edges or vertices.
    pub(crate) fn assemble(
        vertices: SymbolSet,
        directed: Vec<(Symbol, Symbol)>,
        bidirected: Vec<(Symbol, Symbol)>,
        synonyms: HashMap<Symbol, Symbol>,
    ) -> Self {
        let mut graph = DiGraph::new();
        let mut index = HashMap::new();
        for v in &vertices {
            let idx = graph.add_node(v.clone());
            index.insert(v.clone(), idx);
        }

        let mut seen = HashSet::new();
        for (a, b) in &directed {
            if let (Some(&ia), Some(&ib)) = (index.get(a), index.get(b)) {
                if seen.insert((ia, ib)) {
                    graph.add_edge(ia, ib, ());
                }
            }
        }

        let mut pairs = Vec::new();
        let mut seen = HashSet::new();
        for (a, b) in &bidirected {
            if let (Some(&ia), Some(&ib)) = (index.get(a), index.get(b)) {
                if ia == ib {
                    continue;
                }
                let (lo, hi) = if ia < ib { (ia, ib) } else { (ib, ia) };
                if seen.insert((lo, hi)) {
                    pairs.push((graph[lo].clone(), graph[hi].clone()));
                }
            }
        }

        let synonyms = synonyms
            .into_iter()
            .filter(|(_, target)| index.contains_key(target))
            .collect();

        let components = c_components_of(&vertices, &index, &pairs);
        let latent = latent_projection_of(&graph, &index, &pairs);

        Self {
            vertices,
            index,
            directed: graph,
            bidirected: pairs,
            synonyms,
            components,
            latent,
        }
    }

    // ========================================================================
    // Structure
    // ========================================================================

    /// The vertices, in insertion order.
    pub fn vertices(&self) -> &SymbolSet {
        &self.vertices
    }

    /// The directed edges, in insertion order.
    pub fn directed_edges(&self) -> Vec<(Symbol, Symbol)> {
        self.directed
            .edge_references()
            .map(|e| (self.directed[e.source()].clone(), self.directed[e.target()].clone()))
            .collect()
    }

    /// The bidirected edges, each with its earlier vertex first.
    pub fn bidirected_edges(&self) -> &[(Symbol, Symbol)] {
        &self.bidirected
    }

    pub fn synonyms(&self) -> &HashMap<Symbol, Symbol> {
        &self.synonyms
    }

    /// The c-components, ordered by their first vertex.
    pub fn c_components(&self) -> &[SymbolSet] {
        &self.components
    }

    /// The DAG in which bidirected edges became exogenous parents.
    pub fn latent_projection(&self) -> &DiGraph<LatentNode, ()> {
        &self.latent
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vertices.contains(name)
    }

    /// `true` if the directed edge `from → to` is present.
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.index.get(from), self.index.get(to)) {
            (Some(&a), Some(&b)) => self.directed.contains_edge(a, b),
            _ => false,
        }
    }

    /// `true` if the bidirected edge `a ↔ b` is present.
    pub fn has_bidirected(&self, a: &str, b: &str) -> bool {
        self.bidirected.iter().any(|(p, q)| {
            (p.as_str() == a && q.as_str() == b) || (p.as_str() == b && q.as_str() == a)
        })
    }

    // ========================================================================
    // Normalisation
    // ========================================================================

    /// Follow the synonym map from `name` to the vertex it stands for.
    pub fn resolve(&self, name: &str) -> Option<&Symbol> {
        let mut current = name;
        for _ in 0..=self.synonyms.len() {
            match self.synonyms.get(current) {
                Some(next) if next.as_str() != current => current = next.as_str(),
                _ => break,
            }
        }
        self.vertices.get(current)
    }

    /// Canonical form of a query set: synonyms resolved, unknown names
    /// dropped, members ordered by vertex insertion order.
    pub fn normalize(&self, set: impl Into<SymbolSet>) -> SymbolSet {
        let set = set.into();
        let mut mask = vec![false; self.vertices.len()];
        for name in &set {
            match self.resolve(name.as_str()).and_then(|v| self.index.get(v)) {
                Some(idx) => mask[idx.index()] = true,
                None => warn!(vertex = %name, "ignoring unknown vertex in query"),
            }
        }
        self.set_from_mask(&mask)
    }

    // ========================================================================
    // Index plumbing shared by the algorithm modules
    // ========================================================================

    pub(crate) fn directed_graph(&self) -> &DiGraph<Symbol, ()> {
        &self.directed
    }

    pub(crate) fn node(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    pub(crate) fn symbol_at(&self, idx: NodeIndex) -> &Symbol {
        &self.directed[idx]
    }

    /// Node indices of an already-normalised set.
    pub(crate) fn indices(&self, set: &SymbolSet) -> Vec<NodeIndex> {
        set.iter().filter_map(|s| self.node(s.as_str())).collect()
    }

    /// Membership mask over vertices of an already-normalised set.
    pub(crate) fn mask(&self, set: &SymbolSet) -> Vec<bool> {
        let mut mask = vec![false; self.vertices.len()];
        for idx in self.indices(set) {
            mask[idx.index()] = true;
        }
        mask
    }

    pub(crate) fn set_from_mask(&self, mask: &[bool]) -> SymbolSet {
        self.vertices
            .iter()
            .zip(mask)
            .filter(|(_, m)| **m)
            .map(|(v, _)| v.clone())
            .collect()
    }

    /// Rebuild with a subset of the edges, keeping vertices and synonyms.
    pub(crate) fn with_edges(
        &self,
        directed: Vec<(Symbol, Symbol)>,
        bidirected: Vec<(Symbol, Symbol)>,
    ) -> Self {
        Self::assemble(
            self.vertices.clone(),
            directed,
            bidirected,
            self.synonyms.clone(),
        )
    }
}

/// Structural equality: same vertex set, edges and synonyms.
impl PartialEq for Admg {
    fn eq(&self, other: &Self) -> bool {
        let directed = |g: &Admg| g.directed_edges().into_iter().collect::<HashSet<_>>();
        let bidirected = |g: &Admg| {
            g.bidirected
                .iter()
                .map(|(a, b)| if a <= b { (a.clone(), b.clone()) } else { (b.clone(), a.clone()) })
                .collect::<HashSet<_>>()
        };
        self.vertices == other.vertices
            && directed(self) == directed(other)
            && bidirected(self) == bidirected(other)
            && self.synonyms == other.synonyms
    }
}

impl Eq for Admg {}

impl fmt::Display for Admg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ADMG({} vertices, {} directed, {} bidirected)",
            self.vertices.len(),
            self.directed.edge_count(),
            self.bidirected.len()
        )?;
        for (a, b) in self.directed_edges() {
            writeln!(f, "  {} -> {}", a, b)?;
        }
        for (a, b) in &self.bidirected {
            writeln!(f, "  {} <-> {}", a, b)?;
        }
        Ok(())
    }
}

fn c_components_of(
    vertices: &SymbolSet,
    index: &HashMap<Symbol, NodeIndex>,
    pairs: &[(Symbol, Symbol)],
) -> Vec<SymbolSet> {
    let mut uf = UnionFind::<usize>::new(vertices.len());
    for (a, b) in pairs {
        uf.union(index[a].index(), index[b].index());
    }

    let mut slot_of_root: HashMap<usize, usize> = HashMap::new();
    let mut components: Vec<SymbolSet> = Vec::new();
    for (i, v) in vertices.iter().enumerate() {
        let root = uf.find(i);
        let slot = *slot_of_root.entry(root).or_insert_with(|| {
            components.push(SymbolSet::new());
            components.len() - 1
        });
        components[slot].insert(v.clone());
    }
    components
}

fn latent_projection_of(
    directed: &DiGraph<Symbol, ()>,
    index: &HashMap<Symbol, NodeIndex>,
    pairs: &[(Symbol, Symbol)],
) -> DiGraph<LatentNode, ()> {
    let mut latent = directed.map(|_, v| LatentNode::Observed(v.clone()), |_, _| ());
    for (a, b) in pairs {
        let u = latent.add_node(LatentNode::Confounder(a.clone(), b.clone()));
        latent.add_edge(u, index[a], ());
        latent.add_edge(u, index[b], ());
    }
    latent
}

// ============================================================================
// Builder
// ============================================================================

/// Fluent constructor for [`Admg`].
///
/// Vertices must be declared; edges naming undeclared vertices are rejected
/// by [`AdmgBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct AdmgBuilder {
    vertices: SymbolSet,
    directed: Vec<(Symbol, Symbol)>,
    bidirected: Vec<(Symbol, Symbol)>,
    synonyms: HashMap<Symbol, Symbol>,
}

impl AdmgBuilder {
    pub fn vertex(mut self, v: impl Into<Symbol>) -> Self {
        self.vertices.insert(v);
        self
    }

    pub fn vertices<S: Into<Symbol>>(mut self, vs: impl IntoIterator<Item = S>) -> Self {
        self.vertices.extend(vs);
        self
    }

    /// Add the directed edge `from → to`.
    pub fn edge(mut self, from: impl Into<Symbol>, to: impl Into<Symbol>) -> Self {
        self.directed.push((from.into(), to.into()));
        self
    }

    pub fn edges<S: Into<Symbol>>(mut self, edges: impl IntoIterator<Item = (S, S)>) -> Self {
        self.directed
            .extend(edges.into_iter().map(|(a, b)| (a.into(), b.into())));
        self
    }

    /// Add the bidirected edge `a ↔ b`.
    pub fn bidirected_edge(mut self, a: impl Into<Symbol>, b: impl Into<Symbol>) -> Self {
        self.bidirected.push((a.into(), b.into()));
        self
    }

    pub fn bidirected_edges<S: Into<Symbol>>(
        mut self,
        edges: impl IntoIterator<Item = (S, S)>,
    ) -> Self {
        self.bidirected
            .extend(edges.into_iter().map(|(a, b)| (a.into(), b.into())));
        self
    }

    /// Let `alias` stand for `vertex` in queries.
    pub fn synonym(mut self, alias: impl Into<Symbol>, vertex: impl Into<Symbol>) -> Self {
        self.synonyms.insert(alias.into(), vertex.into());
        self
    }

    pub fn build(self) -> Result<Admg, GraphError> {
        Admg::from_parts(self.vertices, self.directed, self.bidirected, self.synonyms)
    }
}
