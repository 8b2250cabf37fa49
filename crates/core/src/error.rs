//! # Error Types
//!
//! A graph that fails validation is not an ADMG: the directed part must be
//! acyclic and every edge must name known vertices. These are the only hard
//! failures in the crate. Queries over a valid graph are total and report
//! "nothing found" as `false` / `None` instead of an error.

use thiserror::Error;

/// Errors raised while constructing or parsing an ADMG.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The directed edges contain a cycle through this vertex.
    #[error("directed edges form a cycle through `{vertex}`")]
    Cycle { vertex: String },

    /// An edge or synonym refers to a vertex that is not in the graph.
    #[error("{context} refers to unknown vertex `{vertex}`")]
    UnknownVertex { vertex: String, context: String },

    /// A bidirected edge joins a vertex to itself.
    #[error("bidirected edge joins `{vertex}` to itself")]
    BidirectedSelfLoop { vertex: String },

    /// DOT input could not be read back.
    #[error("DOT parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },
}
