//! Soundness of the searches over random small ADMGs: whatever a search
//! returns must pass the matching check.

use causal_core::{Admg, Symbol, SymbolSet};
use causal_identify::{Constraints, Identify};
use proptest::prelude::*;

const MAX_VERTICES: usize = 6;

fn build(n: usize, directed: &[bool], bidirected: &[bool]) -> Admg {
    let names: Vec<String> = (0..n).map(|i| format!("v{}", i)).collect();
    let mut builder = Admg::builder().vertices(names.iter().map(String::as_str));
    let mut k = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            if directed[k] {
                builder = builder.edge(names[i].as_str(), names[j].as_str());
            }
            if bidirected[k] {
                builder = builder.bidirected_edge(names[i].as_str(), names[j].as_str());
            }
            k += 1;
        }
    }
    builder.build().unwrap()
}

fn arb_admg() -> impl Strategy<Value = Admg> {
    (2..=MAX_VERTICES)
        .prop_flat_map(|n| {
            let pairs = n * (n - 1) / 2;
            (
                Just(n),
                prop::collection::vec(prop::bool::weighted(0.45), pairs),
                prop::collection::vec(prop::bool::weighted(0.2), pairs),
            )
        })
        .prop_map(|(n, directed, bidirected)| build(n, &directed, &bidirected))
}

fn pick(g: &Admg, i: usize) -> Symbol {
    let vs = g.vertices();
    vs.iter().nth(i % vs.len()).cloned().unwrap()
}

proptest! {
    #[test]
    fn found_backdoor_sets_are_valid(
        g in arb_admg(),
        a in 0..MAX_VERTICES,
        b in 0..MAX_VERTICES,
    ) {
        let (x, y) = (pick(&g, a), pick(&g, b));
        let id = g.identify();
        if let Some(z) = id.find_backdoor_adjustment(&x, &y, &Constraints::new()) {
            prop_assert!(id.is_backdoor_adjustment(&x, &y, &z, SymbolSet::new()));
        }
    }

    #[test]
    fn enumerated_backdoor_sets_are_valid(
        g in arb_admg(),
        a in 0..MAX_VERTICES,
        b in 0..MAX_VERTICES,
    ) {
        let (x, y) = (pick(&g, a), pick(&g, b));
        let id = g.identify();
        let found = id.find_backdoor_adjustment(&x, &y, &Constraints::new());
        let all = id.find_all_backdoor_adjustments(&x, &y, &Constraints::new());
        // the constructive search succeeds exactly when the sweep finds something
        prop_assert_eq!(found.is_some(), all.is_some());
        for z in all.unwrap_or_default() {
            prop_assert!(id.is_backdoor_adjustment(&x, &y, &z, SymbolSet::new()));
        }
    }

    #[test]
    fn found_frontdoor_triples_are_valid(
        g in arb_admg(),
        a in 0..MAX_VERTICES,
        b in 0..MAX_VERTICES,
    ) {
        let (x, y) = (pick(&g, a), pick(&g, b));
        let id = g.identify();
        if let Some(found) = id.find_frontdoor_adjustment(&x, &y, None) {
            prop_assert!(id.is_frontdoor_adjustment(&x, &y, &found.z, &found.xz, &found.zy));
            prop_assert!(id.is_backdoor_adjustment(&x, &found.z, &found.xz, SymbolSet::new()));
            prop_assert!(id.is_backdoor_adjustment(&found.z, &y, &found.zy, &x));
        }
    }

    #[test]
    fn enumerated_frontdoor_triples_are_valid(
        g in arb_admg(),
        a in 0..MAX_VERTICES,
        b in 0..MAX_VERTICES,
    ) {
        let (x, y) = (pick(&g, a), pick(&g, b));
        let id = g.identify();
        for t in id.find_all_frontdoor_adjustments(&x, &y, None).unwrap_or_default() {
            prop_assert!(id.is_frontdoor_adjustment(&x, &y, &t.z, &t.xz, &t.zy));
            prop_assert!(t.xz.is_disjoint(&t.zy));
        }
    }
}
