//! D-Separation - Reading Independences off a Diagram
//!
//! Run with: cargo run -p causal-core --example d_separation
//!
//! This example demonstrates:
//! - Building an ADMG with the builder
//! - Colliders: conditioning on a common effect opens a path
//! - Minimal separators and the full separator list
//! - Graph surgery with do(x)

use causal_core::{Admg, GraphError, SymbolSet};

fn main() -> Result<(), GraphError> {
    println!("=== D-Separation ===\n");

    // -------------------------------------------------------------------------
    // M-Bias
    // -------------------------------------------------------------------------
    println!("1. M-Bias");
    println!("---------");

    let g = Admg::builder()
        .vertices(["x", "y", "z", "u1", "u2"])
        .edges([("u1", "x"), ("u1", "z"), ("u2", "y"), ("u2", "z")])
        .edge("x", "y")
        .build()?;
    print!("{}", g);

    let backdoor = g.backdoor("x");
    println!(
        "x ⊥ y | ∅ without x's outgoing edges: {}",
        backdoor.is_d_separator("x", "y", SymbolSet::new())
    );
    println!("x ⊥ y | z (z is a collider): {}", backdoor.is_d_separator("x", "y", "z"));
    println!("x ⊥ y | z, u1: {}\n", backdoor.is_d_separator("x", "y", ["z", "u1"]));

    // -------------------------------------------------------------------------
    // Separators
    // -------------------------------------------------------------------------
    println!("2. Separators");
    println!("-------------");

    println!(
        "minimal separator including z: {:?}",
        backdoor.find_minimal_d_separator("x", "y", "z", None)
    );
    for z in backdoor.find_all_d_separators("x", "y", SymbolSet::new(), None) {
        println!(
            "  {} (minimal: {})",
            z,
            backdoor.is_minimal_d_separator("x", "y", &z)
        );
    }

    // -------------------------------------------------------------------------
    // Surgery
    // -------------------------------------------------------------------------
    println!("\n3. Surgery");
    println!("----------");

    let intervened = g.do_x("x");
    println!("parents of x after do(x): {}", intervened.parents("x", false));
    println!("{}", intervened.to_dot());

    Ok(())
}
