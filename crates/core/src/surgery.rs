//! # Graph Surgery
//!
//! Derived graphs used by the identification criteria. Each returns a new
//! [`Admg`]; the input is never touched.
//!
//! | Operation | Removes |
//! |---|---|
//! | `do_x(X)` | directed edges into X, bidirected edges at X |
//! | `backdoor(X)` | directed edges out of X |
//! | `adjustment_backdoor(X, Y, D)` | first edges of proper causal paths X → Y, then the vertices D |
//! | `frontdoor_graph(X, Y, Z)` | edges missing from either proper back-door graph |

use crate::admg::Admg;
use crate::symbol::SymbolSet;

impl Admg {
    /// The intervention graph `G_do(X)`: X loses its causes, observed and not.
    pub fn do_x(&self, x: impl Into<SymbolSet>) -> Admg {
        let x = self.normalize(x);
        let directed = self
            .directed_edges()
            .into_iter()
            .filter(|(_, to)| !x.contains(to.as_str()))
            .collect();
        let bidirected = self
            .bidirected_edges()
            .iter()
            .filter(|(a, b)| !x.contains(a.as_str()) && !x.contains(b.as_str()))
            .cloned()
            .collect();
        self.with_edges(directed, bidirected)
    }

    /// The back-door graph: X keeps its causes but loses its effects.
    pub fn backdoor(&self, x: impl Into<SymbolSet>) -> Admg {
        let x = self.normalize(x);
        let directed = self
            .directed_edges()
            .into_iter()
            .filter(|(from, _)| !x.contains(from.as_str()))
            .collect();
        self.with_edges(directed, self.bidirected_edges().to_vec())
    }

    /// The proper back-door graph for the effect of `x` on `y`.
    ///
    /// Drops the first edge of every proper causal path from `x` to `y`, then
    /// deletes the vertices in `drop_z` together with their edges (synonyms
    /// pointing at them go too).
    pub fn adjustment_backdoor(
        &self,
        x: impl Into<SymbolSet>,
        y: impl Into<SymbolSet>,
        drop_z: impl Into<SymbolSet>,
    ) -> Admg {
        let first_edges = self.proper_causal_edges(x, y);
        let drop_z = self.normalize(drop_z);
        let kept = |a: &str, b: &str| !drop_z.contains(a) && !drop_z.contains(b);

        let directed = self
            .directed_edges()
            .into_iter()
            .filter(|(a, b)| kept(a.as_str(), b.as_str()))
            .filter(|edge| !first_edges.contains(edge))
            .collect();
        let bidirected = self
            .bidirected_edges()
            .iter()
            .filter(|(a, b)| kept(a.as_str(), b.as_str()))
            .cloned()
            .collect();

        Admg::assemble(
            self.vertices().difference(&drop_z),
            directed,
            bidirected,
            self.synonyms().clone(),
        )
    }

    /// Edges common to the proper back-door graphs for `x → z` and `z → y`.
    pub fn frontdoor_graph(
        &self,
        x: impl Into<SymbolSet>,
        y: impl Into<SymbolSet>,
        z: impl Into<SymbolSet>,
    ) -> Admg {
        let z = self.normalize(z);
        let first = self.adjustment_backdoor(x, &z, SymbolSet::new());
        let second = self.adjustment_backdoor(&z, y, SymbolSet::new());

        let directed = first
            .directed_edges()
            .into_iter()
            .filter(|(a, b)| second.has_edge(a.as_str(), b.as_str()))
            .collect();
        let bidirected = first
            .bidirected_edges()
            .iter()
            .filter(|(a, b)| second.has_bidirected(a.as_str(), b.as_str()))
            .cloned()
            .collect();
        self.with_edges(directed, bidirected)
    }
}
