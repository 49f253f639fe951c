//! WordNet facade over the taxograph SAP engine.
//!
//! Construction parses the synsets/hypernyms tables, builds the digraph and
//! validates it as a rooted DAG exactly once. Every label-pair query then
//! flows: noun -> synset-id-set lookup, query cache (hit/miss), SAP solver on
//! miss, cache store, result. One cached entry serves both the distance and
//! the ancestor query for a pair, so each pair runs the solver at most once.

pub mod loader;
pub mod outcast;

use anyhow::Result;
use std::collections::HashMap;

use taxograph_core::{
    is_dag, is_rooted, CacheStats, CachedSap, Digraph, GraphError, SapCache, SapSolver, VertexId,
    NO_ANCESTOR,
};

pub use loader::{load_from_paths, load_synsets, load_hypernyms, SynsetRecord, TaxonomyTables};
pub use outcast::Outcast;

/// A loaded, validated WordNet taxonomy.
///
/// Immutable after construction; queries may run from multiple threads (the
/// cache is the only shared mutable structure and is concurrency-safe).
#[derive(Debug)]
pub struct WordNet {
    graph: Digraph,
    noun_to_synsets: HashMap<String, Vec<VertexId>>,
    cache: SapCache,
}

impl WordNet {
    /// Build from the two taxonomy files.
    pub fn from_paths(
        synsets_path: impl AsRef<std::path::Path>,
        hypernyms_path: impl AsRef<std::path::Path>,
    ) -> Result<Self> {
        Self::from_tables(loader::load_from_paths(synsets_path, hypernyms_path)?)
    }

    /// Build from in-memory table text (used by tests and embedders).
    pub fn from_strs(synsets: &str, hypernyms: &str) -> Result<Self> {
        let mut tables = loader::load_synsets(synsets)?;
        loader::load_hypernyms(&mut tables, hypernyms)?;
        Self::from_tables(tables)
    }

    /// Validate and wrap already-parsed tables. Fails with
    /// `MalformedTaxonomy` if the digraph is not a rooted DAG; no instance is
    /// produced on failure.
    pub fn from_tables(tables: TaxonomyTables) -> Result<Self> {
        if !is_dag(&tables.graph) {
            return Err(GraphError::MalformedTaxonomy {
                reason: "digraph contains a cycle".to_string(),
            }
            .into());
        }
        if !is_rooted(&tables.graph) {
            return Err(GraphError::MalformedTaxonomy {
                reason: "no vertex is reachable from every other vertex".to_string(),
            }
            .into());
        }

        Ok(Self {
            graph: tables.graph,
            noun_to_synsets: tables.noun_to_synsets,
            cache: SapCache::new(),
        })
    }

    // ========================================================================
    // Query surface
    // ========================================================================

    /// Semantic distance between two nouns: the length of the shortest
    /// ancestral path between their synset sets, or -1 if no common ancestor
    /// exists. Cached per unordered noun pair.
    pub fn distance(&self, noun_a: &str, noun_b: &str) -> Result<i64, GraphError> {
        Ok(self.query(noun_a, noun_b)?.length)
    }

    /// The synset string of the common ancestor participating in a shortest
    /// ancestral path, or `None` when no common ancestor exists.
    pub fn common_ancestor_label(
        &self,
        noun_a: &str,
        noun_b: &str,
    ) -> Result<Option<String>, GraphError> {
        let cached = self.query(noun_a, noun_b)?;
        Ok(cached
            .ancestor
            .and_then(|id| self.graph.label(id))
            .map(str::to_string))
    }

    /// Cache-through SAP query for a noun pair.
    fn query(&self, noun_a: &str, noun_b: &str) -> Result<CachedSap, GraphError> {
        let a_sets = self.synsets_of(noun_a)?;
        let b_sets = self.synsets_of(noun_b)?;

        self.cache.get_or_insert_with(noun_a, noun_b, || {
            let solver = SapSolver::new(&self.graph);
            let outcome = solver.shortest_ancestral_path(a_sets, b_sets)?;
            Ok(match outcome {
                Some(found) => CachedSap {
                    length: i64::from(found.length),
                    ancestor: Some(found.ancestor),
                },
                None => CachedSap {
                    length: NO_ANCESTOR,
                    ancestor: None,
                },
            })
        })
    }

    fn synsets_of(&self, noun: &str) -> Result<&[VertexId], GraphError> {
        self.noun_to_synsets
            .get(noun)
            .map(Vec::as_slice)
            .ok_or_else(|| GraphError::UnknownLabel {
                label: noun.to_string(),
            })
    }

    /// Is the word a WordNet noun?
    pub fn is_noun(&self, word: &str) -> bool {
        self.noun_to_synsets.contains_key(word)
    }

    /// All distinct nouns, in no particular order.
    pub fn nouns(&self) -> impl Iterator<Item = &str> {
        self.noun_to_synsets.keys().map(String::as_str)
    }

    pub fn noun_count(&self) -> usize {
        self.noun_to_synsets.len()
    }

    pub fn synset_count(&self) -> usize {
        self.graph.vertex_count()
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Acyclicity of the underlying digraph. Always true for a constructed
    /// instance; exposed for diagnostics.
    pub fn is_dag(&self) -> bool {
        is_dag(&self.graph)
    }

    /// Rooted-DAG status of the underlying digraph.
    pub fn is_rooted_dag(&self) -> bool {
        is_dag(&self.graph) && is_rooted(&self.graph)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn graph(&self) -> &Digraph {
        &self.graph
    }
}
