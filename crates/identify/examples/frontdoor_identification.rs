//! Front-Door Identification - Smoking, Tar and Cancer
//!
//! Run with: cargo run -p causal-identify --example frontdoor_identification
//!
//! Set `RUST_LOG=causal_identify=debug` to watch the searches.
//!
//! This example demonstrates:
//! - Building an ADMG with a latent confounder
//! - Why no back-door adjustment set exists
//! - Finding a front-door adjustment and its estimand
//! - Rendering the graph as DOT and the formula as LaTeX

use causal_core::SymbolSet;
use causal_identify::{
    smoking_tar_cancer, Constraints, FormulaStyle, Identify, IdentifyConfig, IdentifyError,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), IdentifyError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Front-Door Identification ===\n");

    // -------------------------------------------------------------------------
    // The Diagram
    // -------------------------------------------------------------------------
    println!("1. The Diagram");
    println!("--------------");

    let graph = smoking_tar_cancer()?;
    print!("{}", graph);
    println!("c-components: {:?}\n", graph.c_components());

    // -------------------------------------------------------------------------
    // Back-Door Fails
    // -------------------------------------------------------------------------
    println!("2. Back-Door Adjustment");
    println!("-----------------------");

    let id = graph.identify();
    println!(
        "∅ blocks the back-door paths: {}",
        id.is_backdoor_adjustment("smoking", "cancer", SymbolSet::new(), SymbolSet::new())
    );
    println!(
        "forbidden among {{tar}}: {}",
        id.forbidden("smoking", "cancer", "tar")
    );
    println!(
        "back-door search: {:?}\n",
        id.find_backdoor_adjustment("smoking", "cancer", &Constraints::new())
    );

    // -------------------------------------------------------------------------
    // Front-Door Succeeds
    // -------------------------------------------------------------------------
    println!("3. Front-Door Adjustment");
    println!("------------------------");

    for path in graph.find_all_proper_causal_paths("smoking", "cancer") {
        println!("causal path: {}", path);
    }

    match id.find_frontdoor_adjustment("smoking", "cancer", None) {
        Some(adjustment) => {
            println!("found: {}", adjustment);
            if let Some(estimand) = id.frontdoor_estimand("smoking", "cancer", &adjustment) {
                println!("{}\n", estimand);
            }
        }
        None => println!("no front-door adjustment\n"),
    }

    // -------------------------------------------------------------------------
    // Output Formats
    // -------------------------------------------------------------------------
    println!("4. Output Formats");
    println!("-----------------");

    let config = IdentifyConfig::from_toml("formula_style = \"latex\"")?;
    assert_eq!(config.formula_style, FormulaStyle::Latex);
    let latex = graph.identify_with(config);
    if let Some(estimand) = latex.estimand("smoking", "cancer") {
        println!("{}", latex.render(&estimand));
    }

    println!("\n{}", graph.to_dot());

    Ok(())
}
