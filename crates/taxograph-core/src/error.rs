//! Error taxonomy for the SAP engine.
//!
//! Construction-time failures (`MalformedTaxonomy`, `DuplicateVertex`,
//! `UnknownVertex`) are all-or-nothing: a failed rooted-DAG check produces no
//! facade instance. Query-time failures (`UnknownLabel`, `InvalidArgument`)
//! never poison engine state.

use crate::digraph::VertexId;

/// Errors produced by the digraph, validators, solver and facade layers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The loaded digraph is not a rooted DAG. Fatal at construction time.
    #[error("input does not correspond to a rooted DAG: {reason}")]
    MalformedTaxonomy { reason: String },

    /// A vertex id was inserted twice.
    #[error("vertex {id} already present in digraph")]
    DuplicateVertex { id: VertexId },

    /// An edge endpoint or solver source does not resolve to a vertex.
    #[error("unknown vertex {id}")]
    UnknownVertex { id: VertexId },

    /// A query label has no synonym-set entry.
    #[error("unknown label {label:?}")]
    UnknownLabel { label: String },

    /// A contract violation, e.g. an empty source set passed to the solver.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

pub type Result<T> = std::result::Result<T, GraphError>;
