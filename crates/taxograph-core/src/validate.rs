//! Structural validators: rootedness and acyclicity.
//!
//! Both checks run once at taxonomy-load time. Traversals are iterative with
//! explicit work-lists so deep taxonomies cannot blow the call stack, and
//! visited sets are roaring bitmaps over the u32 vertex ids.

use roaring::RoaringBitmap;

use crate::digraph::{Digraph, VertexId};

/// True iff some zero-out-degree vertex is reachable (forward) from every
/// vertex, i.e. a reverse traversal from it marks the whole graph.
///
/// Every zero-out-degree candidate is tested; the graph is rooted as soon as
/// one passes. Uniqueness of the passing candidate is not required. An empty
/// digraph is not rooted.
pub fn is_rooted(graph: &Digraph) -> bool {
    let total = graph.vertex_count() as u64;
    if total == 0 {
        return false;
    }

    graph
        .vertex_ids()
        .filter(|&v| graph.out_degree(v) == 0)
        .any(|candidate| reverse_reach_count(graph, candidate) == total)
}

/// Number of vertices reached by a traversal over *incoming* edges from
/// `start` (including `start` itself).
fn reverse_reach_count(graph: &Digraph, start: VertexId) -> u64 {
    let mut marked = RoaringBitmap::new();
    let mut stack = vec![start];
    marked.insert(start.raw());

    while let Some(v) = stack.pop() {
        for &w in graph.in_neighbors(v) {
            if marked.insert(w.raw()) {
                stack.push(w);
            }
        }
    }

    marked.len()
}

/// True iff the digraph contains no directed cycle. Self-loops count as
/// cycles. An empty digraph is a DAG.
pub fn is_dag(graph: &Digraph) -> bool {
    if graph.is_empty() {
        return true;
    }

    // A finite nonempty digraph with no zero-in-degree vertex necessarily
    // contains a cycle, so skip the DFS entirely in that case.
    if !has_source(graph) {
        return false;
    }

    // Three-color DFS: absent from both bitmaps = unvisited, in `in_progress`
    // = on the current DFS path, in `done` = fully explored.
    let mut done = RoaringBitmap::new();
    let mut in_progress = RoaringBitmap::new();

    for root in graph.vertex_ids() {
        if done.contains(root.raw()) {
            continue;
        }
        if has_cycle_from(graph, root, &mut done, &mut in_progress) {
            return false;
        }
    }

    true
}

/// Cheap cycle pre-check: does any vertex with in-degree 0 exist?
pub fn has_source(graph: &Digraph) -> bool {
    graph.vertex_ids().any(|v| graph.in_degree(v) == 0)
}

/// Iterative DFS from `root`; true iff a back edge to an in-progress vertex
/// is found. The stack holds `(vertex, next-edge cursor)` frames so each
/// adjacency list is walked exactly once.
fn has_cycle_from(
    graph: &Digraph,
    root: VertexId,
    done: &mut RoaringBitmap,
    in_progress: &mut RoaringBitmap,
) -> bool {
    let mut stack: Vec<(VertexId, usize)> = vec![(root, 0)];
    in_progress.insert(root.raw());

    while let Some(frame) = stack.last_mut() {
        let v = frame.0;
        let out = graph.out_neighbors(v);

        if frame.1 < out.len() {
            let w = out[frame.1];
            frame.1 += 1;

            if done.contains(w.raw()) {
                continue;
            }
            if in_progress.contains(w.raw()) {
                // Back edge; covers self-loops (w == v).
                return true;
            }
            in_progress.insert(w.raw());
            stack.push((w, 0));
        } else {
            in_progress.remove(v.raw());
            done.insert(v.raw());
            stack.pop();
        }
    }

    false
}
