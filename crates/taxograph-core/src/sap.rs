//! Shortest-ancestral-path solver.
//!
//! A common ancestor of `a` and `b` is a vertex reachable from both by
//! following outgoing (is-a) edges. The SAP is the ancestor minimizing
//! `dist(a -> ancestor) + dist(b -> ancestor)`; the solver generalizes both
//! endpoints to vertex sets so synonym-set queries fall out directly.
//!
//! All BFS state (distance maps, queues) is freshly allocated per query, so
//! concurrent readers of an immutable digraph never share mutable state.

use ahash::AHashMap;
use serde::Serialize;
use std::collections::VecDeque;

use crate::digraph::{Digraph, VertexId};
use crate::error::{GraphError, Result};

/// A common ancestor participating in a shortest ancestral path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommonAncestor {
    pub ancestor: VertexId,
    /// Total path length `dist(a -> ancestor) + dist(b -> ancestor)`.
    pub length: u32,
}

/// SAP solver borrowing an immutable digraph.
///
/// The digraph is expected to be a validated rooted DAG, but the solver does
/// not require it: on a graph where the two reachable cones never meet, the
/// query resolves to `Ok(None)` rather than an error.
pub struct SapSolver<'g> {
    graph: &'g Digraph,
}

impl<'g> SapSolver<'g> {
    pub fn new(graph: &'g Digraph) -> Self {
        Self { graph }
    }

    /// Single-vertex convenience over [`shortest_ancestral_path`].
    ///
    /// [`shortest_ancestral_path`]: Self::shortest_ancestral_path
    pub fn shortest_ancestral_path_single(
        &self,
        a: VertexId,
        b: VertexId,
    ) -> Result<Option<CommonAncestor>> {
        self.shortest_ancestral_path(&[a], &[b])
    }

    /// Minimum `dist(a -> v) + dist(b -> v)` over all `a ∈ A`, `b ∈ B` and
    /// common ancestors `v`, together with the winning ancestor.
    ///
    /// Errors: `InvalidArgument` if either side is empty, `UnknownVertex` if
    /// any id does not resolve. Ties in total length keep the first result
    /// found, which is deterministic given the digraph's insertion-order
    /// adjacency.
    pub fn shortest_ancestral_path(
        &self,
        a_sources: &[VertexId],
        b_sources: &[VertexId],
    ) -> Result<Option<CommonAncestor>> {
        if a_sources.is_empty() || b_sources.is_empty() {
            return Err(GraphError::InvalidArgument {
                message: "SAP query requires non-empty source sets".to_string(),
            });
        }
        for &id in a_sources.iter().chain(b_sources) {
            if !self.graph.contains(id) {
                return Err(GraphError::UnknownVertex { id });
            }
        }

        let mut best: Option<CommonAncestor> = None;

        for &b in b_sources {
            // Distances from b to every vertex in its ancestor cone. Rebuilt
            // per b; never reused across outer iterations.
            let b_dist = self.ancestor_distances(b);

            for &a in a_sources {
                self.probe(a, &b_dist, &mut best);
            }
        }

        Ok(best)
    }

    /// Forward BFS from `source`, returning the distance to every reached
    /// vertex (`source` itself at distance 0).
    fn ancestor_distances(&self, source: VertexId) -> AHashMap<VertexId, u32> {
        let mut dist = AHashMap::new();
        let mut queue = VecDeque::new();
        dist.insert(source, 0);
        queue.push_back(source);

        while let Some(v) = queue.pop_front() {
            let d = dist[&v];
            for &w in self.graph.out_neighbors(v) {
                if !dist.contains_key(&w) {
                    dist.insert(w, d + 1);
                    queue.push_back(w);
                }
            }
        }

        dist
    }

    /// Forward BFS from `a`; every newly reached vertex (including `a` at
    /// distance 0) that also appears in `b_dist` is a common-ancestor
    /// candidate. Strict `<` keeps the first-found result on ties.
    ///
    /// A vertex at distance `d >= best.length` can never improve the strict
    /// minimum (`total = d + db >= d`), and everything past it is farther
    /// still, so the frontier is cut off there. `best` only shrinks, so the
    /// cutoff stays valid as the scan proceeds.
    fn probe(&self, a: VertexId, b_dist: &AHashMap<VertexId, u32>, best: &mut Option<CommonAncestor>) {
        let mut a_dist: AHashMap<VertexId, u32> = AHashMap::new();
        let mut queue = VecDeque::new();
        a_dist.insert(a, 0);
        queue.push_back(a);

        while let Some(v) = queue.pop_front() {
            let d = a_dist[&v];
            if best.map_or(false, |cur| d >= cur.length) {
                continue;
            }

            if let Some(&db) = b_dist.get(&v) {
                let total = d + db;
                if best.map_or(true, |cur| total < cur.length) {
                    *best = Some(CommonAncestor {
                        ancestor: v,
                        length: total,
                    });
                }
            }

            for &w in self.graph.out_neighbors(v) {
                if !a_dist.contains_key(&w) {
                    a_dist.insert(w, d + 1);
                    queue.push_back(w);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(raw: u32) -> VertexId {
        VertexId::new(raw)
    }

    fn graph(vertices: &[(u32, &str)], edges: &[(u32, u32)]) -> Digraph {
        let mut g = Digraph::new();
        for &(id, label) in vertices {
            g.insert_vertex(v(id), label).unwrap();
        }
        for &(from, to) in edges {
            g.insert_edge(v(from), v(to)).unwrap();
        }
        g
    }

    #[test]
    fn siblings_meet_at_parent() {
        let g = graph(
            &[(0, "animal"), (1, "dog"), (2, "cat")],
            &[(1, 0), (2, 0)],
        );
        let solver = SapSolver::new(&g);
        let got = solver
            .shortest_ancestral_path_single(v(1), v(2))
            .unwrap()
            .unwrap();
        assert_eq!(got.length, 2);
        assert_eq!(got.ancestor, v(0));
        assert_eq!(g.label(got.ancestor), Some("animal"));
    }

    #[test]
    fn same_vertex_has_distance_zero() {
        let g = graph(&[(0, "entity")], &[]);
        let solver = SapSolver::new(&g);
        let got = solver
            .shortest_ancestral_path_single(v(0), v(0))
            .unwrap()
            .unwrap();
        assert_eq!(got.length, 0);
        assert_eq!(got.ancestor, v(0));
    }

    #[test]
    fn shared_source_across_sets() {
        let g = graph(&[(0, "root"), (1, "x"), (2, "y")], &[(1, 0), (2, 0)]);
        let solver = SapSolver::new(&g);
        // A and B overlap on vertex 1: distance must be 0 via the shared vertex.
        let got = solver
            .shortest_ancestral_path(&[v(1), v(2)], &[v(1)])
            .unwrap()
            .unwrap();
        assert_eq!(got.length, 0);
        assert_eq!(got.ancestor, v(1));
    }

    #[test]
    fn ancestor_descendant_pair() {
        // 2 -> 1 -> 0: SAP(2, 0) runs straight up, ancestor is 0 itself.
        let g = graph(&[(0, "a"), (1, "b"), (2, "c")], &[(1, 0), (2, 1)]);
        let solver = SapSolver::new(&g);
        let got = solver
            .shortest_ancestral_path_single(v(2), v(0))
            .unwrap()
            .unwrap();
        assert_eq!(got.length, 2);
        assert_eq!(got.ancestor, v(0));
    }

    #[test]
    fn diamond_resolves_through_the_top() {
        // 3 -> 1 -> 0 and 3 -> 2 -> 0. SAP(1, 2) is 2 via 0; vertex 3 is a
        // descendant, not an ancestor, and must not participate.
        let g = graph(
            &[(0, "top"), (1, "left"), (2, "right"), (3, "bottom")],
            &[(3, 1), (3, 2), (1, 0), (2, 0)],
        );
        let solver = SapSolver::new(&g);
        let got = solver
            .shortest_ancestral_path_single(v(1), v(2))
            .unwrap()
            .unwrap();
        assert_eq!(got.length, 2);
        assert_eq!(got.ancestor, v(0));
    }

    #[test]
    fn nearer_ancestor_wins_over_root() {
        // 3 -> 2 -> 0, 4 -> 2, 1 -> 0: SAP(3, 4) meets at 2 (length 2), not
        // at the root 0 (length 4).
        let g = graph(
            &[(0, "root"), (1, "a"), (2, "mid"), (3, "x"), (4, "y")],
            &[(1, 0), (2, 0), (3, 2), (4, 2)],
        );
        let solver = SapSolver::new(&g);
        let got = solver
            .shortest_ancestral_path_single(v(3), v(4))
            .unwrap()
            .unwrap();
        assert_eq!(got.length, 2);
        assert_eq!(got.ancestor, v(2));
    }

    #[test]
    fn set_queries_take_the_best_pair() {
        // Two chains meeting at 0; the set query must pick whichever pair
        // yields the shortest combined path.
        let g = graph(
            &[(0, "root"), (1, "a1"), (2, "a2"), (3, "b1"), (4, "b2")],
            &[(1, 0), (2, 1), (3, 0), (4, 3)],
        );
        let solver = SapSolver::new(&g);
        let got = solver
            .shortest_ancestral_path(&[v(1), v(2)], &[v(3), v(4)])
            .unwrap()
            .unwrap();
        // Best pair is (1, 3): 1 -> 0 and 3 -> 0, total 2.
        assert_eq!(got.length, 2);
        assert_eq!(got.ancestor, v(0));
    }

    #[test]
    fn disconnected_cones_yield_none() {
        let g = graph(&[(0, "a"), (1, "b"), (2, "c"), (3, "d")], &[(1, 0), (3, 2)]);
        let solver = SapSolver::new(&g);
        let got = solver.shortest_ancestral_path_single(v(1), v(3)).unwrap();
        assert_eq!(got, None);
    }

    #[test]
    fn empty_source_set_is_rejected() {
        let g = graph(&[(0, "a")], &[]);
        let solver = SapSolver::new(&g);
        let err = solver.shortest_ancestral_path(&[], &[v(0)]).unwrap_err();
        assert!(matches!(err, GraphError::InvalidArgument { .. }));
        let err = solver.shortest_ancestral_path(&[v(0)], &[]).unwrap_err();
        assert!(matches!(err, GraphError::InvalidArgument { .. }));
    }

    #[test]
    fn unknown_vertex_is_rejected() {
        let g = graph(&[(0, "a")], &[]);
        let solver = SapSolver::new(&g);
        let err = solver
            .shortest_ancestral_path_single(v(0), v(42))
            .unwrap_err();
        assert_eq!(err, GraphError::UnknownVertex { id: v(42) });
    }

    #[test]
    fn duplicate_ids_in_a_side_are_harmless() {
        let g = graph(&[(0, "root"), (1, "x"), (2, "y")], &[(1, 0), (2, 0)]);
        let solver = SapSolver::new(&g);
        let got = solver
            .shortest_ancestral_path(&[v(1), v(1)], &[v(2), v(2)])
            .unwrap()
            .unwrap();
        assert_eq!(got.length, 2);
        assert_eq!(got.ancestor, v(0));
    }

    #[test]
    fn frontier_cutoff_keeps_first_found_ties() {
        // 3 and 4 meet at both 1 and 2 with total 2; adjacency order probes
        // 1 first and the strict minimum must keep it.
        let g = graph(
            &[(0, "root"), (1, "left"), (2, "right"), (3, "x"), (4, "y")],
            &[(3, 1), (3, 2), (4, 1), (4, 2), (1, 0), (2, 0)],
        );
        let solver = SapSolver::new(&g);
        let got = solver
            .shortest_ancestral_path_single(v(3), v(4))
            .unwrap()
            .unwrap();
        assert_eq!(got.length, 2);
        assert_eq!(got.ancestor, v(1));
    }

    #[test]
    fn later_pairs_cannot_degrade_an_early_zero() {
        // First (a, b) pair shares vertex 1 (length 0); the later pair with
        // the deep chain must leave that result untouched.
        let g = graph(
            &[(0, "root"), (1, "x"), (2, "c2"), (3, "c3"), (4, "c4")],
            &[(1, 0), (4, 3), (3, 2), (2, 0)],
        );
        let solver = SapSolver::new(&g);
        let got = solver
            .shortest_ancestral_path(&[v(1)], &[v(1), v(4)])
            .unwrap()
            .unwrap();
        assert_eq!(got.length, 0);
        assert_eq!(got.ancestor, v(1));
    }

    #[test]
    fn multi_edges_do_not_change_distances() {
        let g = graph(
            &[(0, "root"), (1, "x"), (2, "y")],
            &[(1, 0), (1, 0), (2, 0), (2, 0)],
        );
        let solver = SapSolver::new(&g);
        let got = solver
            .shortest_ancestral_path_single(v(1), v(2))
            .unwrap()
            .unwrap();
        assert_eq!(got.length, 2);
    }
}
