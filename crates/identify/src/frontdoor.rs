//! # Front-Door Adjustment
//!
//! When X and Y share an unobserved cause no back-door set exists, but the
//! effect may still be identified through mediators. A triple `(Z, XZ, ZY)`
//! is a front-door adjustment for X → Y when
//!
//! 1. `XZ` is a back-door set for the effect of X on Z,
//! 2. `ZY` is a back-door set for the effect of Z on Y with X deleted, and
//! 3. every proper causal path from X to Y passes through Z.
//!
//! ```text
//!   smoking → tar → cancer
//!      ↑               ↑
//!      └── genotype ───┘        (unobserved: smoking ↔ cancer)
//!
//!   P(cancer | do(smoking)) = Σ_tar P(tar | smoking) Σ_{smoking'} P(cancer | smoking', tar) P(smoking')
//! ```

use causal_core::{CausalPath, SymbolSet};
use itertools::Itertools;
use serde::Serialize;
use std::fmt;
use tracing::{debug, trace, warn};

use crate::backdoor::Constraints;
use crate::formula::{Estimand, Formula};
use crate::Identifier;

/// Mediators plus the back-door sets for both halves of the effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrontdoorAdjustment {
    pub z: SymbolSet,
    pub xz: SymbolSet,
    pub zy: SymbolSet,
}

impl fmt::Display for FrontdoorAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Z = {}, XZ = {}, ZY = {}", self.z, self.xz, self.zy)
    }
}

/// Proper causal paths and the candidate mediators on them.
struct Mediation {
    paths: Vec<CausalPath>,
    potential: SymbolSet,
    universe: SymbolSet,
}

impl Mediation {
    fn blocked_by(&self, z: &SymbolSet) -> bool {
        self.paths.iter().all(|path| path.meets(z))
    }
}

impl<'g> Identifier<'g> {
    /// `true` iff `(z, xz, zy)` is a front-door adjustment for `x → y`.
    ///
    /// `z` must be non-empty and disjoint from `x ∪ y`.
    pub fn is_frontdoor_adjustment(
        &self,
        x: impl Into<SymbolSet>,
        y: impl Into<SymbolSet>,
        z: impl Into<SymbolSet>,
        xz: impl Into<SymbolSet>,
        zy: impl Into<SymbolSet>,
    ) -> bool {
        let Some((x, y)) = self.query(x, y) else {
            return false;
        };
        let graph = self.graph();
        let z = graph.normalize(z);
        if z.is_empty() || z.intersects(&x) || z.intersects(&y) {
            debug!(%z, "mediator set is empty or overlaps treatment or outcome");
            return false;
        }

        let paths = graph.find_all_proper_causal_paths(&x, &y);
        if let Some(missed) = paths.iter().find(|path| !path.meets(&z)) {
            debug!(path = %missed, %z, "causal path avoids the mediators");
            return false;
        }

        self.is_backdoor_adjustment(&x, &z, xz, SymbolSet::new())
            && self.is_backdoor_adjustment(&z, &y, zy, &x)
    }

    /// One front-door adjustment for `x → y` with every chosen vertex in
    /// `restricted` (default `V \ (x ∪ y)`), or `None`.
    ///
    /// Mediators are drawn from the interiors of the proper causal paths;
    /// the side sets come from the back-door search over what remains.
    /// Smaller mediator sets are tried first. `xz` and `zy` are searched
    /// independently and may share vertices.
    pub fn find_frontdoor_adjustment(
        &self,
        x: impl Into<SymbolSet>,
        y: impl Into<SymbolSet>,
        restricted: Option<SymbolSet>,
    ) -> Option<FrontdoorAdjustment> {
        let (x, y) = self.query(x, y)?;
        let mediation = self.mediation(&x, &y, restricted);
        if mediation.paths.is_empty() {
            debug!(%x, %y, "no causal path to mediate");
            return None;
        }

        let potential = mediation.potential.clone();
        let found = self.search_mediators(&x, &y, &mediation, SymbolSet::new(), potential);
        debug!(%x, %y, found = ?found, "front-door search");
        found
    }

    fn search_mediators(
        &self,
        x: &SymbolSet,
        y: &SymbolSet,
        mediation: &Mediation,
        included: SymbolSet,
        potential: SymbolSet,
    ) -> Option<FrontdoorAdjustment> {
        trace!(%included, %potential, "search mediators");
        if !mediation.blocked_by(&potential) {
            return None;
        }
        if included == potential {
            return self.complete_mediators(x, y, &mediation.universe, potential);
        }

        let w = potential.difference(&included).last()?.clone();
        let shrunk = potential.without(w.as_str());
        self.search_mediators(x, y, mediation, included.clone(), shrunk)
            .or_else(|| self.search_mediators(x, y, mediation, included.with(w), potential))
    }

    /// Find the side sets for a fixed mediator set.
    fn complete_mediators(
        &self,
        x: &SymbolSet,
        y: &SymbolSet,
        universe: &SymbolSet,
        z: SymbolSet,
    ) -> Option<FrontdoorAdjustment> {
        if z.is_empty() {
            return None;
        }
        let within = Constraints::new().restrict_to(universe);
        let xz = self.find_backdoor_adjustment(x, &z, &within)?;
        let zy = self.find_backdoor_adjustment(&z, y, &within.drop_vertices(x))?;
        Some(FrontdoorAdjustment { z, xz, zy })
    }

    /// Every front-door adjustment for `x → y` within `restricted`.
    ///
    /// Sweeps non-empty mediator sets and disjoint pairs of side sets.
    /// Returns `None` when nothing qualifies or the sweep exceeds
    /// `max_enumeration_vertices`.
    ///
    /// Only triples with `xz ∩ zy = ∅` are listed, so this can return `None`
    /// where [`Identifier::find_frontdoor_adjustment`] finds a triple whose
    /// side sets overlap.
    pub fn find_all_frontdoor_adjustments(
        &self,
        x: impl Into<SymbolSet>,
        y: impl Into<SymbolSet>,
        restricted: Option<SymbolSet>,
    ) -> Option<Vec<FrontdoorAdjustment>> {
        let (x, y) = self.query(x, y)?;
        let mediation = self.mediation(&x, &y, restricted);

        let size = mediation.potential.len() + mediation.universe.len();
        if !self.config().allows_enumeration(size) {
            warn!(
                size,
                limit = self.config().max_enumeration_vertices,
                "refusing exhaustive front-door enumeration"
            );
            return None;
        }

        let subsets = |set: &SymbolSet| -> Vec<SymbolSet> {
            set.iter()
                .cloned()
                .powerset()
                .map(SymbolSet::from)
                .collect()
        };

        let mut found = Vec::new();
        for z in subsets(&mediation.potential) {
            if z.is_empty() || !mediation.blocked_by(&z) {
                continue;
            }
            for xz in subsets(&mediation.universe) {
                if !self.is_backdoor_adjustment(&x, &z, &xz, SymbolSet::new()) {
                    continue;
                }
                for zy in subsets(&mediation.universe.difference(&xz)) {
                    if self.is_backdoor_adjustment(&z, &y, &zy, &x) {
                        found.push(FrontdoorAdjustment {
                            z: z.clone(),
                            xz: xz.clone(),
                            zy,
                        });
                    }
                }
            }
        }

        debug!(%x, %y, count = found.len(), "front-door enumeration");
        (!found.is_empty()).then_some(found)
    }

    /// The front-door estimand for `P(y | do(x))`, if `adjustment` is valid.
    pub fn frontdoor_estimand(
        &self,
        x: impl Into<SymbolSet>,
        y: impl Into<SymbolSet>,
        adjustment: &FrontdoorAdjustment,
    ) -> Option<Estimand> {
        let (x, y) = self.query(x, y)?;
        let FrontdoorAdjustment { z, xz, zy } = adjustment;
        if !self.is_frontdoor_adjustment(&x, &y, z, xz, zy) {
            return None;
        }
        let graph = self.graph();
        Some(Estimand {
            expression: Formula::frontdoor(
                &x,
                &y,
                &graph.normalize(z),
                &graph.normalize(xz),
                &graph.normalize(zy),
            ),
            outcome: y,
            treatment: x,
        })
    }

    fn mediation(&self, x: &SymbolSet, y: &SymbolSet, restricted: Option<SymbolSet>) -> Mediation {
        let graph = self.graph();
        let restricted = graph.default_restriction(x, y, restricted);
        let paths = graph.find_all_proper_causal_paths(x, y);
        let interior: SymbolSet = paths
            .iter()
            .flat_map(|path| path.interior().iter().cloned())
            .collect();
        let potential = restricted.intersection(&interior);
        let universe = restricted.difference(&potential);
        Mediation {
            paths,
            potential,
            universe,
        }
    }
}
