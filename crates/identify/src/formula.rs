//! # Adjustment Formulas
//!
//! Symbolic do-calculus estimands. A [`Formula`] is a small expression tree
//! over probability terms; an [`Estimand`] pairs it with the interventional
//! query it identifies.
//!
//! ## Key Concepts
//!
//! - **Back-door**: `P(y | do(x)) = Σ_z P(y | x, z) P(z)`
//! - **Front-door**: `P(y | do(x)) = Σ_m P(m | x) Σ_{x'} P(y | x', m) P(x')`
//! - **Collapsing**: a sum over nothing is its body, a product of one factor
//!   is that factor
//!
//! Rendering is plain Unicode through `Display` or LaTeX through
//! [`Formula::to_latex`].

use causal_core::{Symbol, SymbolSet};
use serde::Serialize;
use std::fmt;

use crate::config::FormulaStyle;

/// An expression over probability terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Formula {
    /// `P(vars | given)`.
    Prob { vars: Vec<Symbol>, given: Vec<Symbol> },
    /// `Σ_over body`.
    Sum { over: Vec<Symbol>, body: Box<Formula> },
    /// Juxtaposed factors.
    Product(Vec<Formula>),
}

impl Formula {
    pub fn prob<A, B>(vars: A, given: B) -> Formula
    where
        A: IntoIterator,
        A::Item: Into<Symbol>,
        B: IntoIterator,
        B::Item: Into<Symbol>,
    {
        Formula::Prob {
            vars: vars.into_iter().map(Into::into).collect(),
            given: given.into_iter().map(Into::into).collect(),
        }
    }

    /// `P(vars)`.
    pub fn marginal<A>(vars: A) -> Formula
    where
        A: IntoIterator,
        A::Item: Into<Symbol>,
    {
        Formula::prob(vars, std::iter::empty::<Symbol>())
    }

    /// Sum `body` over `over`; an empty index set leaves `body` alone.
    pub fn sum<I>(over: I, body: Formula) -> Formula
    where
        I: IntoIterator,
        I::Item: Into<Symbol>,
    {
        let over: Vec<Symbol> = over.into_iter().map(Into::into).collect();
        if over.is_empty() {
            body
        } else {
            Formula::Sum {
                over,
                body: Box::new(body),
            }
        }
    }

    /// Multiply factors, flattening nested products.
    pub fn product(factors: Vec<Formula>) -> Formula {
        let mut flat = Vec::with_capacity(factors.len());
        for factor in factors {
            match factor {
                Formula::Product(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        if flat.len() == 1 {
            flat.remove(0)
        } else {
            Formula::Product(flat)
        }
    }

    /// The back-door adjustment formula for `P(outcome | do(treatment), given)`.
    ///
    /// `Σ_Z P(Y | X, Z, given) P(Z | given)`; with `Z = ∅` just
    /// `P(Y | X, given)`. Pass an empty `given` for an unconditional effect.
    pub fn backdoor(
        treatment: &SymbolSet,
        outcome: &SymbolSet,
        adjustment: &SymbolSet,
        given: &SymbolSet,
    ) -> Formula {
        let conditional = Formula::prob(
            outcome.iter().cloned(),
            treatment.iter().chain(adjustment).chain(given).cloned(),
        );
        if adjustment.is_empty() {
            return conditional;
        }
        Formula::sum(
            adjustment.iter().cloned(),
            Formula::product(vec![
                conditional,
                Formula::prob(adjustment.iter().cloned(), given.iter().cloned()),
            ]),
        )
    }

    /// The generalized front-door formula.
    ///
    /// `Σ_Z [Σ_XZ P(Z | X, XZ) P(XZ)] Σ_{X', ZY} P(Y | X', Z, ZY) P(X', ZY)`,
    /// where `X'` are primed copies of the treatment summed out.
    pub fn frontdoor(
        treatment: &SymbolSet,
        outcome: &SymbolSet,
        z: &SymbolSet,
        xz: &SymbolSet,
        zy: &SymbolSet,
    ) -> Formula {
        let primed: Vec<Symbol> = treatment.iter().map(Symbol::primed).collect();

        let mut mediator_factors = vec![Formula::prob(
            z.iter().cloned(),
            treatment.iter().chain(xz).cloned(),
        )];
        if !xz.is_empty() {
            mediator_factors.push(Formula::marginal(xz.iter().cloned()));
        }
        let mediator = Formula::sum(xz.iter().cloned(), Formula::product(mediator_factors));

        let outer_index: Vec<Symbol> = primed.iter().cloned().chain(zy.iter().cloned()).collect();
        let outcome_term = Formula::sum(
            outer_index.clone(),
            Formula::product(vec![
                Formula::prob(
                    outcome.iter().cloned(),
                    primed.iter().cloned().chain(z.iter().cloned()).chain(zy.iter().cloned()),
                ),
                Formula::marginal(outer_index),
            ]),
        );

        Formula::sum(z.iter().cloned(), Formula::product(vec![mediator, outcome_term]))
    }

    pub fn to_latex(&self) -> String {
        self.render(FormulaStyle::Latex)
    }

    pub fn render(&self, style: FormulaStyle) -> String {
        match self {
            Formula::Prob { vars, given } => {
                let bar = match style {
                    FormulaStyle::Plain => " | ",
                    FormulaStyle::Latex => " \\mid ",
                };
                if given.is_empty() {
                    format!("P({})", join(vars))
                } else {
                    format!("P({}{}{})", join(vars), bar, join(given))
                }
            }
            Formula::Sum { over, body } => {
                let body = body.render(style);
                match style {
                    FormulaStyle::Plain => format!("Σ_{} {}", plain_subscript(over), body),
                    FormulaStyle::Latex => format!("\\sum_{{{}}} {}", join(over), body),
                }
            }
            Formula::Product(factors) => factors
                .iter()
                .map(|f| f.render(style))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(FormulaStyle::Plain))
    }
}

fn join(symbols: &[Symbol]) -> String {
    symbols
        .iter()
        .map(Symbol::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `z` for a single one-character name, `{x', z}` otherwise.
fn plain_subscript(over: &[Symbol]) -> String {
    match over {
        [only] if only.as_str().chars().count() == 1 => only.to_string(),
        _ => format!("{{{}}}", join(over)),
    }
}

/// An identified interventional query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Estimand {
    pub outcome: SymbolSet,
    pub treatment: SymbolSet,
    pub expression: Formula,
}

impl Estimand {
    pub fn to_latex(&self) -> String {
        self.render(FormulaStyle::Latex)
    }

    pub fn render(&self, style: FormulaStyle) -> String {
        let lhs = match style {
            FormulaStyle::Plain => format!(
                "P({} | do({}))",
                self.outcome.format_names(),
                self.treatment.format_names()
            ),
            FormulaStyle::Latex => format!(
                "P({} \\mid \\mathrm{{do}}({}))",
                self.outcome.format_names(),
                self.treatment.format_names()
            ),
        };
        format!("{} = {}", lhs, self.expression.render(style))
    }
}

impl fmt::Display for Estimand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(FormulaStyle::Plain))
    }
}
