//! Taxonomy input parsing.
//!
//! Two comma-delimited record formats:
//!
//! - synsets: `id,noun noun ...,gloss` — the gloss may itself contain commas,
//!   so the line is split at most twice
//! - hypernyms: `id,hypernym-id,hypernym-id,...` — one record per synset,
//!   zero or more hypernym ids (the root has none)
//!
//! Parsing failures carry line numbers; a duplicate synset id surfaces as the
//! digraph's `DuplicateVertex` error wrapped with the offending line.

use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use taxograph_core::{Digraph, VertexId};

/// One parsed synset record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynsetRecord {
    pub id: VertexId,
    /// The whole synset string (space-separated nouns), kept verbatim as the
    /// vertex label.
    pub synset: String,
    pub gloss: Option<String>,
}

/// Parsed taxonomy tables: the digraph plus the noun -> synset-id-set map.
#[derive(Debug, Default)]
pub struct TaxonomyTables {
    pub graph: Digraph,
    /// Synonym membership: a noun may appear in several synsets.
    pub noun_to_synsets: HashMap<String, Vec<VertexId>>,
}

/// Parse one `id,noun noun ...[,gloss]` line.
fn parse_synset_line(line: &str) -> Result<SynsetRecord> {
    let mut fields = line.splitn(3, ',');
    let id_field = fields
        .next()
        .ok_or_else(|| anyhow!("empty synset record"))?;
    let synset = fields
        .next()
        .ok_or_else(|| anyhow!("missing synset field"))?;

    let id: u32 = id_field
        .trim()
        .parse()
        .with_context(|| format!("bad synset id {id_field:?}"))?;
    if synset.is_empty() {
        return Err(anyhow!("empty synset field"));
    }

    Ok(SynsetRecord {
        id: VertexId::new(id),
        synset: synset.to_string(),
        gloss: fields.next().map(str::to_string),
    })
}

/// Build the digraph vertices and the noun map from synset records.
pub fn load_synsets(text: &str) -> Result<TaxonomyTables> {
    let mut tables = TaxonomyTables::default();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record = parse_synset_line(line)
            .with_context(|| format!("synsets line {}", index + 1))?;

        tables
            .graph
            .insert_vertex(record.id, record.synset.clone())
            .with_context(|| format!("synsets line {}", index + 1))?;

        for noun in record.synset.split_whitespace() {
            tables
                .noun_to_synsets
                .entry(noun.to_string())
                .or_default()
                .push(record.id);
        }
    }

    Ok(tables)
}

/// Link vertices from `id,hypernym-id,...` records. Any id that does not
/// resolve against the synsets table fails the load, targets and the
/// leading id alike.
pub fn load_hypernyms(tables: &mut TaxonomyTables, text: &str) -> Result<usize> {
    let mut edges = 0usize;

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split(',');
        let from_field = fields.next().unwrap_or_default();
        let from: u32 = from_field
            .trim()
            .parse()
            .with_context(|| format!("hypernyms line {}: bad synset id {from_field:?}", index + 1))?;

        // Even a record with zero hypernyms (the root's) must name a synset
        // from the synsets table.
        if !tables.graph.contains(VertexId::new(from)) {
            return Err(anyhow!(
                "hypernyms line {}: unknown synset id {from}",
                index + 1
            ));
        }

        for to_field in fields {
            let to: u32 = to_field.trim().parse().with_context(|| {
                format!("hypernyms line {}: bad hypernym id {to_field:?}", index + 1)
            })?;
            tables
                .graph
                .insert_edge(VertexId::new(from), VertexId::new(to))
                .with_context(|| format!("hypernyms line {}", index + 1))?;
            edges += 1;
        }
    }

    Ok(edges)
}

/// Load both tables from files on disk.
pub fn load_from_paths(
    synsets_path: impl AsRef<Path>,
    hypernyms_path: impl AsRef<Path>,
) -> Result<TaxonomyTables> {
    let synsets_path = synsets_path.as_ref();
    let hypernyms_path = hypernyms_path.as_ref();

    let synsets_text = fs::read_to_string(synsets_path)
        .with_context(|| format!("reading synsets file {}", synsets_path.display()))?;
    let hypernyms_text = fs::read_to_string(hypernyms_path)
        .with_context(|| format!("reading hypernyms file {}", hypernyms_path.display()))?;

    let mut tables = load_synsets(&synsets_text)
        .with_context(|| format!("parsing {}", synsets_path.display()))?;
    let edges = load_hypernyms(&mut tables, &hypernyms_text)
        .with_context(|| format!("parsing {}", hypernyms_path.display()))?;

    tracing::info!(
        vertices = tables.graph.vertex_count(),
        edges,
        nouns = tables.noun_to_synsets.len(),
        "taxonomy loaded"
    );

    Ok(tables)
}
