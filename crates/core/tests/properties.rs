//! Property tests over random small ADMGs.
//!
//! Graphs are generated with directed edges only from lower to higher
//! vertex rank, so every sample is acyclic by construction.

use causal_core::{Admg, Symbol, SymbolSet};
use proptest::prelude::*;

const MAX_VERTICES: usize = 7;

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
                prop::collection::vec(prop::bool::weighted(0.4), pairs),
                prop::collection::vec(prop::bool::weighted(0.15), pairs),
            )
        })
        .prop_map(|(n, directed, bidirected)| build(n, &directed, &bidirected))
}

fn pick(g: &Admg, i: usize) -> Symbol {
    let vs = g.vertices();
    vs.iter().nth(i % vs.len()).cloned().unwrap()
}

fn subset(g: &Admg, mask: &[bool]) -> SymbolSet {
    g.vertices()
        .iter()
        .zip(mask)
        .filter(|(_, m)| **m)
        .map(|(v, _)| v.clone())
        .collect()
}

proptest! {
    #[test]
    fn d_separation_is_symmetric(
        g in arb_admg(),
        a in 0..MAX_VERTICES,
        b in 0..MAX_VERTICES,
        mask in prop::collection::vec(any::<bool>(), MAX_VERTICES),
    ) {
        let x = pick(&g, a);
        let y = pick(&g, b);
        let z = subset(&g, &mask);
        prop_assert_eq!(g.is_d_separator(&x, &y, &z), g.is_d_separator(&y, &x, &z));
    }

    #[test]
    fn intervened_vertices_have_no_parents(
        g in arb_admg(),
        mask in prop::collection::vec(any::<bool>(), MAX_VERTICES),
    ) {
        let x = subset(&g, &mask);
        let done = g.do_x(&x);
        for v in &x {
            prop_assert!(done.parents(v, false).is_empty());
            prop_assert!(done.bidirected_neighbors(v, false).is_empty());
        }
    }

    #[test]
    fn backdoor_vertices_have_no_children(
        g in arb_admg(),
        mask in prop::collection::vec(any::<bool>(), MAX_VERTICES),
    ) {
        let x = subset(&g, &mask);
        let bd = g.backdoor(&x);
        for v in &x {
            prop_assert!(bd.children(v, false).is_empty());
        }
    }

    #[test]
    fn empty_surgery_is_identity(g in arb_admg()) {
        prop_assert_eq!(&g.do_x(SymbolSet::new()), &g);
        prop_assert_eq!(&g.backdoor(SymbolSet::new()), &g);
    }

    #[test]
    fn proper_causal_paths_are_unique_and_proper(
        g in arb_admg(),
        xs in prop::collection::vec(any::<bool>(), MAX_VERTICES),
        ys in prop::collection::vec(any::<bool>(), MAX_VERTICES),
    ) {
        let x = subset(&g, &xs);
        let y = subset(&g, &ys).difference(&x);
        let paths = g.find_all_proper_causal_paths(&x, &y);
        let endpoints = x.union(&y);

        for (i, path) in paths.iter().enumerate() {
            prop_assert!(!paths[i + 1..].contains(path));
            prop_assert!(x.contains(path.vertices()[0].as_str()));
            prop_assert!(path.vertices().last().is_some_and(|v| y.contains(v.as_str())));
            prop_assert!(path.interior().iter().all(|v| !endpoints.contains(v.as_str())));
            for pair in path.vertices().windows(2) {
                prop_assert!(g.has_edge(pair[0].as_str(), pair[1].as_str()));
            }
        }
    }

    #[test]
    fn enumerated_separators_separate(
        g in arb_admg(),
        a in 0..MAX_VERTICES,
        b in 0..MAX_VERTICES,
    ) {
        let x = pick(&g, a);
        let y = pick(&g, b);
        for s in g.find_all_d_separators(&x, &y, SymbolSet::new(), None) {
            prop_assert!(g.is_d_separator(&x, &y, &s));
        }
    }

    #[test]
    fn dot_round_trip(g in arb_admg()) {
        let back = Admg::from_dot(&g.to_dot()).unwrap();
        prop_assert_eq!(back, g);
    }
}
