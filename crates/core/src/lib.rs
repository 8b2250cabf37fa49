//! # Causal Core - Acyclic Directed Mixed Graphs
//!
//! The graph layer of the causal identification workspace:
//!
//! - **Symbols**: cheap vertex names and insertion-ordered name sets
//! - **ADMG**: validated, immutable causal diagrams with directed and
//!   bidirected edges, c-components and a cached latent projection
//! - **Neighbourhoods**: parents, children, ancestors, descendants, ...
//! - **Separation**: d-separation tests, minimality, enumeration
//! - **Paths**: proper causal paths between vertex sets
//! - **Surgery**: intervention and back-door graphs
//! - **DOT**: Graphviz rendering and re-ingest
//!
//! ## Design Philosophy
//!
//! A graph is a value. Every query takes `&self`, every surgery returns a new
//! graph, and queries over a valid graph never fail: "nothing there" is
//! `false`, `None` or an empty collection. Only construction returns errors.

pub mod admg;
pub mod dot;
pub mod error;
pub mod neighborhood;
pub mod paths;
pub mod separation;
pub mod surgery;
pub mod symbol;

pub use admg::{Admg, AdmgBuilder, LatentNode};
pub use error::GraphError;
pub use paths::CausalPath;
pub use symbol::{Symbol, SymbolSet};
