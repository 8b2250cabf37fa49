//! End-to-end identification scenarios.
//!
//! Each section builds one textbook diagram and checks separation, the
//! adjustment searches and the resulting estimand together.

use causal_core::{Admg, SymbolSet};
use causal_identify::{
    smoking_tar_cancer, Constraints, FormulaStyle, FrontdoorAdjustment, Identify, IdentifyConfig,
};

// ============================================================================
// Chain: a → b → c
// ============================================================================

fn chain() -> Admg {
    Admg::builder()
        .vertices(["a", "b", "c"])
        .edges([("a", "b"), ("b", "c")])
        .build()
        .unwrap()
}

#[test]
fn test_chain_needs_no_adjustment() {
    let g = chain();
    assert!(g.is_d_separator("a", "c", "b"));

    let id = g.identify();
    assert_eq!(
        id.find_backdoor_adjustment("a", "c", &Constraints::new()),
        Some(SymbolSet::new())
    );
    let estimand = id.backdoor_estimand("a", "c", SymbolSet::new()).unwrap();
    assert_eq!(estimand.to_string(), "P(c | do(a)) = P(c | a)");
}

#[test]
fn test_chain_mediator_is_forbidden() {
    let g = chain();
    let id = g.identify();
    assert!(!id.is_backdoor_adjustment("a", "c", "b", SymbolSet::new()));
    assert_eq!(id.backdoor_estimand("a", "c", "b"), None);
}

// ============================================================================
// Classic confounder: z → x, z → y, x → y
// ============================================================================

fn confounder() -> Admg {
    Admg::builder()
        .vertices(["x", "y", "z"])
        .edges([("z", "x"), ("z", "y"), ("x", "y")])
        .build()
        .unwrap()
}

#[test]
fn test_confounder_adjustment() {
    let g = confounder();
    let id = g.identify();
    assert!(id.is_backdoor_adjustment("x", "y", "z", SymbolSet::new()));
    assert_eq!(
        id.find_backdoor_adjustment("x", "y", &Constraints::new()),
        Some(SymbolSet::from("z"))
    );
    assert_eq!(
        id.find_all_backdoor_adjustments("x", "y", &Constraints::new()),
        Some(vec![SymbolSet::from("z")])
    );

    let estimand = id.backdoor_estimand("x", "y", "z").unwrap();
    assert_eq!(estimand.to_string(), "P(y | do(x)) = Σ_z P(y | x, z) P(z)");
    assert_eq!(
        estimand.to_latex(),
        "P(y \\mid \\mathrm{do}(x)) = \\sum_{z} P(y \\mid x, z) P(z)"
    );
}

#[test]
fn test_full_universe_is_returned_or_rejected() {
    let g = confounder();
    let universe = SymbolSet::from("z");
    let constraints = Constraints::new()
        .include(&universe)
        .restrict_to(&universe);
    assert_eq!(
        g.identify().find_backdoor_adjustment("x", "y", &constraints),
        Some(universe)
    );
}

// ============================================================================
// Front-door: x → m → y, x ↔ y
// ============================================================================

fn frontdoor() -> Admg {
    Admg::builder()
        .vertices(["x", "m", "y"])
        .edges([("x", "m"), ("m", "y")])
        .bidirected_edge("x", "y")
        .build()
        .unwrap()
}

#[test]
fn test_frontdoor_has_no_backdoor_set() {
    let g = frontdoor();
    let id = g.identify();
    assert!(!id.is_backdoor_adjustment("x", "y", SymbolSet::new(), SymbolSet::new()));
    assert_eq!(id.find_backdoor_adjustment("x", "y", &Constraints::new()), None);
    assert_eq!(id.find_all_backdoor_adjustments("x", "y", &Constraints::new()), None);
}

#[test]
fn test_frontdoor_adjustment_and_formula() {
    let g = frontdoor();
    let id = g.identify();

    let found = id.find_frontdoor_adjustment("x", "y", None).unwrap();
    assert_eq!(
        found,
        FrontdoorAdjustment {
            z: "m".into(),
            xz: SymbolSet::new(),
            zy: SymbolSet::new(),
        }
    );

    let estimand = id.frontdoor_estimand("x", "y", &found).unwrap();
    assert_eq!(
        estimand.to_string(),
        "P(y | do(x)) = Σ_m P(m | x) Σ_{x'} P(y | x', m) P(x')"
    );
    assert_eq!(id.estimand("x", "y"), Some(estimand));

    assert_eq!(
        id.find_all_frontdoor_adjustments("x", "y", None),
        Some(vec![found])
    );
}

#[test]
fn test_smoking_tar_cancer() {
    let g = smoking_tar_cancer().unwrap();
    let config = IdentifyConfig::default().with_formula_style(FormulaStyle::Latex);
    let id = g.identify_with(config);

    let estimand = id.estimand("smoking", "cancer").unwrap();
    let rendered = id.render(&estimand);
    assert!(rendered.starts_with("P(cancer \\mid \\mathrm{do}(smoking))"));
    assert!(rendered.contains("\\sum_{tar}"));
    assert!(rendered.contains("\\sum_{smoking'}"));
}

// ============================================================================
// M-bias: x ← u1 → z ← u2 → y
// ============================================================================

fn m_bias() -> Admg {
    Admg::builder()
        .vertices(["x", "y", "z", "u1", "u2"])
        .edges([("u1", "x"), ("u1", "z"), ("u2", "y"), ("u2", "z")])
        .build()
        .unwrap()
}

#[test]
fn test_m_bias_collider_not_adjusted() {
    let g = m_bias();
    assert!(g.is_d_separator("x", "y", SymbolSet::new()));
    assert!(!g.is_d_separator("x", "y", "z"));

    let id = g.identify();
    assert_eq!(
        id.find_backdoor_adjustment("x", "y", &Constraints::new()),
        Some(SymbolSet::new())
    );
    assert!(!id.is_backdoor_adjustment("x", "y", "z", SymbolSet::new()));
    assert!(id.is_backdoor_adjustment("x", "y", ["z", "u1"], SymbolSet::new()));
}

// ============================================================================
// Forbidden descendant: x → m → y, m → d, x ↔ y
// ============================================================================

#[test]
fn test_descendant_of_mediator_is_forbidden() {
    let g = Admg::builder()
        .vertices(["x", "m", "y", "d"])
        .edges([("x", "m"), ("m", "y"), ("m", "d")])
        .bidirected_edge("x", "y")
        .build()
        .unwrap();
    let id = g.identify();
    assert!(!id.is_backdoor_adjustment("x", "y", "d", SymbolSet::new()));
    assert_eq!(id.forbidden("x", "y", ["m", "d"]), SymbolSet::from(["m", "d"]));
}

// ============================================================================
// Proper causal paths: diamond a → {b, c} → d
// ============================================================================

#[test]
fn test_diamond_paths_and_backdoor() {
    let g = Admg::builder()
        .vertices(["a", "b", "c", "d"])
        .edges([("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")])
        .build()
        .unwrap();

    let rendered: Vec<String> = g
        .find_all_proper_causal_paths("a", "d")
        .iter()
        .map(|p| p.to_string())
        .collect();
    assert_eq!(rendered, vec!["a → b → d", "a → c → d"]);

    let id = g.identify();
    assert_eq!(
        id.find_backdoor_adjustment("a", "d", &Constraints::new()),
        Some(SymbolSet::new())
    );
    // b and c sit on the causal paths
    assert_eq!(id.forbidden("a", "d", ["b", "c"]), SymbolSet::from(["b", "c"]));
}

// ============================================================================
// Degenerate queries
// ============================================================================

#[test]
fn test_degenerate_queries_are_total() {
    let g = confounder();
    let id = g.identify();
    assert!(!id.is_backdoor_adjustment(SymbolSet::new(), "y", "z", SymbolSet::new()));
    assert!(!id.is_backdoor_adjustment(["x", "y"], "y", "z", SymbolSet::new()));
    assert_eq!(
        id.find_backdoor_adjustment("x", "x", &Constraints::new()),
        None
    );
    assert_eq!(id.find_frontdoor_adjustment("x", "nowhere", None), None);
    assert_eq!(id.estimand("y", "x"), None);
}

#[test]
fn test_synonyms_resolve_in_queries() {
    let g = Admg::builder()
        .vertices(["x", "y", "z"])
        .edges([("z", "x"), ("z", "y"), ("x", "y")])
        .synonym("x_{x=1}", "x")
        .build()
        .unwrap();
    assert!(g
        .identify()
        .is_backdoor_adjustment("x_{x=1}", "y", "z", SymbolSet::new()));
}
