//! Canonical diagrams for demos and tests.

use causal_core::{Admg, GraphError};

/// The smoking / tar / cancer front-door diagram.
///
/// Structure:
/// ```text
///   Smoking → Tar → Cancer
///      ↑              ↑
///      └── Genotype ──┘   (unobserved)
/// ```
///
/// - smoking: smoking behaviour (treatment)
/// - tar: tar deposits in the lungs (mediator)
/// - cancer: lung cancer (outcome)
///
/// Genotype is latent, so it appears as the bidirected edge
/// `smoking ↔ cancer`. No back-door set exists; tar is a front-door
/// mediator.
pub fn smoking_tar_cancer() -> Result<Admg, GraphError> {
    Admg::builder()
        .vertices(["smoking", "tar", "cancer"])
        .edges([("smoking", "tar"), ("tar", "cancer")])
        .bidirected_edge("smoking", "cancer")
        .build()
}
