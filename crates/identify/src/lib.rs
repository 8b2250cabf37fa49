//! # Identify - Causal Effects from Graphs
//!
//! Decides whether `P(y | do(x))` can be computed from observational data on
//! a given [`Admg`], and if so writes down the formula.
//!
//! ## Key Concepts
//!
//! - **Back-door adjustment**: a set Z that blocks every non-causal path from
//!   X to Y without touching descendants of the causal paths
//! - **Front-door adjustment**: a mediator set Z on every causal path, whose
//!   effects from X and onto Y are themselves back-door identifiable
//! - **Forbidden set**: descendants of mediators; conditioning on them biases
//!   the effect
//! - **Estimand**: the adjustment formula, rendered plain or as LaTeX
//!
//! ## Example
//!
//! ```rust
//! use causal_core::Admg;
//! use causal_identify::{Constraints, Identify};
//!
//! let g = Admg::builder()
//!     .vertices(["x", "y", "z"])
//!     .edges([("z", "x"), ("z", "y"), ("x", "y")])
//!     .build()
//!     .unwrap();
//!
//! let z = g.identify().find_backdoor_adjustment("x", "y", &Constraints::new());
//! assert_eq!(z.map(|s| s.to_string()), Some("{z}".to_string()));
//!
//! let estimand = g.identify().backdoor_estimand("x", "y", "z").unwrap();
//! assert_eq!(estimand.to_string(), "P(y | do(x)) = Σ_z P(y | x, z) P(z)");
//! ```
//!
//! Every query is total: empty or overlapping treatment/outcome sets and
//! failed searches give `false` or `None`.

pub mod backdoor;
pub mod config;
pub mod error;
pub mod formula;
pub mod frontdoor;
pub mod networks;

pub use backdoor::Constraints;
pub use config::{FormulaStyle, IdentifyConfig};
pub use error::IdentifyError;
pub use formula::{Estimand, Formula};
pub use frontdoor::FrontdoorAdjustment;
pub use networks::smoking_tar_cancer;

use causal_core::{Admg, SymbolSet};
use tracing::debug;

/// Identification queries against one graph.
#[derive(Debug, Clone)]
pub struct Identifier<'g> {
    graph: &'g Admg,
    config: IdentifyConfig,
}

impl<'g> Identifier<'g> {
    pub fn new(graph: &'g Admg) -> Self {
        Self::with_config(graph, IdentifyConfig::default())
    }

    pub fn with_config(graph: &'g Admg, config: IdentifyConfig) -> Self {
        Self { graph, config }
    }

    pub fn graph(&self) -> &'g Admg {
        self.graph
    }

    pub fn config(&self) -> &IdentifyConfig {
        &self.config
    }

    /// Render an estimand in the configured style.
    pub fn render(&self, estimand: &Estimand) -> String {
        estimand.render(self.config.formula_style)
    }

    /// Identify `P(y | do(x))` by back-door adjustment if possible, front-door
    /// otherwise.
    pub fn estimand(&self, x: impl Into<SymbolSet>, y: impl Into<SymbolSet>) -> Option<Estimand> {
        let (x, y) = self.query(x, y)?;
        if let Some(z) = self.find_backdoor_adjustment(&x, &y, &Constraints::new()) {
            return self.backdoor_estimand(&x, &y, z);
        }
        let adjustment = self.find_frontdoor_adjustment(&x, &y, None)?;
        self.frontdoor_estimand(&x, &y, &adjustment)
    }

    /// Normalise a treatment/outcome pair, rejecting empty or overlapping
    /// sides.
    pub(crate) fn query(
        &self,
        x: impl Into<SymbolSet>,
        y: impl Into<SymbolSet>,
    ) -> Option<(SymbolSet, SymbolSet)> {
        let x = self.graph.normalize(x);
        let y = self.graph.normalize(y);
        if x.is_empty() || y.is_empty() {
            debug!(%x, %y, "identification query with an empty side");
            return None;
        }
        if x.intersects(&y) {
            debug!(%x, %y, "identification query with overlapping sides");
            return None;
        }
        Some((x, y))
    }
}

/// Extension trait giving every graph an `identify()` entry point.
pub trait Identify {
    fn identify(&self) -> Identifier<'_>;

    fn identify_with(&self, config: IdentifyConfig) -> Identifier<'_>;
}

impl Identify for Admg {
    fn identify(&self) -> Identifier<'_> {
        Identifier::new(self)
    }

    fn identify_with(&self, config: IdentifyConfig) -> Identifier<'_> {
        Identifier::with_config(self, config)
    }
}
