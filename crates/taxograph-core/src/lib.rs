//! Taxograph core: shortest-ancestral-path engine over a rooted DAG.
//!
//! The engine computes semantic distance between taxonomy vertices as the
//! length of the shortest path through a common ancestor (following is-a
//! edges upward from both endpoints).
//!
//! ## Module Organization
//!
//! - `digraph`: directed graph with O(1) id lookup and insertion-ordered
//!   adjacency (deterministic traversal order)
//! - `validate`: rootedness and acyclicity checks, run once at load time
//! - `sap`: multi-source bidirectional BFS solver
//! - `cache`: memoizing label-pair cache shared by all callers
//!
//! ## Phases
//!
//! Construction and querying are disjoint: a loader builds and validates the
//! digraph once, after which the graph is read-only. Per-query BFS state is
//! always local, so concurrent readers need no locking; the cache is the one
//! shared structure and is concurrency-safe.

pub mod cache;
pub mod digraph;
pub mod error;
pub mod sap;
pub mod validate;

pub use cache::{CacheStats, CachedSap, SapCache, NO_ANCESTOR};
pub use digraph::{Digraph, VertexId};
pub use error::{GraphError, Result};
pub use sap::{CommonAncestor, SapSolver};
pub use validate::{has_source, is_dag, is_rooted};
