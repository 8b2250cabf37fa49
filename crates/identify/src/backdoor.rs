//! # Back-Door Adjustment
//!
//! A set Z is a back-door adjustment set for the effect of X on Y when
//!
//! 1. no member of Z descends (in `G_do(X)`) from a vertex after the source
//!    of some proper causal path X → Y, and
//! 2. Z d-separates X from Y in the proper back-door graph, where the first
//!    edge of every proper causal path has been removed.
//!
//! The constructive search is the ListSep recursion (van der Zander, Liśkiewicz
//! & Textor): seed with the ancestral closure of `X ∪ Y ∪ included` inside
//! `restricted`, and branch on the last free vertex, trying to shrink the
//! restriction before growing the included set.

use causal_core::{Admg, SymbolSet};
use itertools::Itertools;
use tracing::{debug, trace, warn};

use crate::formula::{Estimand, Formula};
use crate::Identifier;

/// Bounds on a back-door search.
///
/// - `included`: vertices every answer must contain
/// - `restricted`: vertices an answer may draw from (default `V \ (X ∪ Y)`)
/// - `dropped`: vertices deleted from the graph before testing separation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraints {
    pub included: SymbolSet,
    pub restricted: Option<SymbolSet>,
    pub dropped: SymbolSet,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include(mut self, set: impl Into<SymbolSet>) -> Self {
        self.included = set.into();
        self
    }

    pub fn restrict_to(mut self, set: impl Into<SymbolSet>) -> Self {
        self.restricted = Some(set.into());
        self
    }

    pub fn drop_vertices(mut self, set: impl Into<SymbolSet>) -> Self {
        self.dropped = set.into();
        self
    }
}

impl<'g> Identifier<'g> {
    /// Members of `universe` that no back-door set for `x → y` may contain.
    pub fn forbidden(
        &self,
        x: impl Into<SymbolSet>,
        y: impl Into<SymbolSet>,
        universe: impl Into<SymbolSet>,
    ) -> SymbolSet {
        match self.query(x, y) {
            Some((x, y)) => self.forbidden_within(&x, &y, &self.graph().normalize(universe)),
            None => SymbolSet::new(),
        }
    }

    pub(crate) fn forbidden_within(
        &self,
        x: &SymbolSet,
        y: &SymbolSet,
        universe: &SymbolSet,
    ) -> SymbolSet {
        let mediated: SymbolSet = self
            .graph()
            .find_all_proper_causal_paths(x, y)
            .iter()
            .flat_map(|path| path.tail().iter().cloned())
            .collect();
        if mediated.is_empty() {
            return SymbolSet::new();
        }
        self.graph()
            .do_x(x)
            .descendants(&mediated, true)
            .intersection(universe)
    }

    /// `true` iff `z` is a back-door adjustment set for `x → y` once the
    /// vertices in `drop_z` are deleted.
    ///
    /// A `z` that meets `x` or `y` is rejected, even though
    /// [`Admg::is_d_separator`] reports such sets as separating.
    pub fn is_backdoor_adjustment(
        &self,
        x: impl Into<SymbolSet>,
        y: impl Into<SymbolSet>,
        z: impl Into<SymbolSet>,
        drop_z: impl Into<SymbolSet>,
    ) -> bool {
        let Some((x, y)) = self.query(x, y) else {
            return false;
        };
        let z = self.graph().normalize(z);
        if z.intersects(&x) || z.intersects(&y) {
            debug!(%z, "adjustment set overlaps treatment or outcome");
            return false;
        }

        let forbidden = self.forbidden_within(&x, &y, &z);
        if !forbidden.is_empty() {
            debug!(%forbidden, "adjustment set contains descendants of mediators");
            return false;
        }

        let bd = self.graph().adjustment_backdoor(&x, &y, drop_z);
        let valid = bd.is_d_separator(&x, &y, &z);
        debug!(%x, %y, %z, valid, "back-door check");
        valid
    }

    /// One back-door adjustment set for `x → y` within `constraints`, or
    /// `None`.
    pub fn find_backdoor_adjustment(
        &self,
        x: impl Into<SymbolSet>,
        y: impl Into<SymbolSet>,
        constraints: &Constraints,
    ) -> Option<SymbolSet> {
        let (x, y) = self.query(x, y)?;
        let graph = self.graph();

        let dropped = graph.normalize(&constraints.dropped);
        let restricted = graph
            .default_restriction(&x, &y, constraints.restricted.clone())
            .difference(&dropped);
        let included = graph.normalize(&constraints.included).intersection(&restricted);

        let forbidden = self.forbidden_within(&x, &y, &restricted);
        if included.intersects(&forbidden) {
            debug!(%included, %forbidden, "required vertices are forbidden");
            return None;
        }
        let restricted = restricted.difference(&forbidden);

        let bd = graph.adjustment_backdoor(&x, &y, &dropped);
        let found = self.list_separators(&bd, &x, &y, included, restricted);
        debug!(%x, %y, found = ?found, "back-door search");
        found
    }

    fn list_separators(
        &self,
        bd: &Admg,
        x: &SymbolSet,
        y: &SymbolSet,
        included: SymbolSet,
        restricted: SymbolSet,
    ) -> Option<SymbolSet> {
        let seed = x.union(y).union(&included);
        let candidate = bd.ancestors(&seed, true).intersection(&restricted);
        trace!(%included, %restricted, %candidate, "list separators");

        if !bd.is_d_separator(x, y, &candidate) {
            return None;
        }
        if included == restricted {
            return Some(included);
        }

        let w = restricted.difference(&included).last()?.clone();
        let shrunk = restricted.without(w.as_str());
        self.list_separators(bd, x, y, included.clone(), shrunk)
            .or_else(|| self.list_separators(bd, x, y, included.with(w), restricted))
    }

    /// Every back-door adjustment set for `x → y` within `constraints`.
    ///
    /// Sweeps the power set of the free vertices, smallest first. Returns
    /// `None` when nothing qualifies or the sweep exceeds
    /// `max_enumeration_vertices`.
    pub fn find_all_backdoor_adjustments(
        &self,
        x: impl Into<SymbolSet>,
        y: impl Into<SymbolSet>,
        constraints: &Constraints,
    ) -> Option<Vec<SymbolSet>> {
        let (x, y) = self.query(x, y)?;
        let graph = self.graph();

        let dropped = graph.normalize(&constraints.dropped);
        let restricted = graph
            .default_restriction(&x, &y, constraints.restricted.clone())
            .difference(&dropped);
        let universe = restricted.difference(&self.forbidden_within(&x, &y, &restricted));
        let included = graph.normalize(&constraints.included);
        if !included.is_subset(&universe) {
            debug!(%included, %universe, "required vertices fall outside the universe");
            return None;
        }

        let free = universe.difference(&included);
        if !self.config().allows_enumeration(free.len()) {
            warn!(
                size = free.len(),
                limit = self.config().max_enumeration_vertices,
                "refusing exhaustive back-door enumeration"
            );
            return None;
        }

        let bd = graph.adjustment_backdoor(&x, &y, &dropped);
        let found: Vec<SymbolSet> = free
            .into_iter()
            .powerset()
            .map(|extra| graph.normalize(included.union(&SymbolSet::from(extra))))
            .filter(|candidate| bd.is_d_separator(&x, &y, candidate))
            .collect();
        debug!(%x, %y, count = found.len(), "back-door enumeration");
        (!found.is_empty()).then_some(found)
    }

    /// The back-door estimand for `P(y | do(x))` adjusting for `z`, if `z`
    /// is valid.
    ///
    /// The effect is unconditional, so the formula carries no extra
    /// conditioning context; see [`Formula::backdoor`] for the general form.
    pub fn backdoor_estimand(
        &self,
        x: impl Into<SymbolSet>,
        y: impl Into<SymbolSet>,
        z: impl Into<SymbolSet>,
    ) -> Option<Estimand> {
        let (x, y) = self.query(x, y)?;
        let z = self.graph().normalize(z);
        if !self.is_backdoor_adjustment(&x, &y, &z, SymbolSet::new()) {
            return None;
        }
        Some(Estimand {
            expression: Formula::backdoor(&x, &y, &z, &SymbolSet::new()),
            outcome: y,
            treatment: x,
        })
    }
}
