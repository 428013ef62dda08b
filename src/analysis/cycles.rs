//! Simple-cycle enumeration from a chosen start node.
//!
//! A simple cycle is a closed walk that returns to the start node
//! without revisiting any intermediate node. Enumeration is a DFS over
//! outgoing edges in edge-storage order, so results are deterministic
//! for a fixed graph.

use std::collections::HashSet;

use log::warn;

use crate::graph_utils::graph::{EdgeId, GraphModel, NodeId};

/// Upper bound on recorded cycles. Simple-cycle enumeration is
/// combinatorial in dense graphs; stopping here keeps a pathological
/// diagram from hanging the editor. Hitting the cap logs a warning.
pub const MAX_CYCLES: usize = 10_000;

/// Enumerate all simple cycles that start and end at `start`.
///
/// Each result is the edge sequence of one cycle: the first edge leaves
/// `start` and the last edge re-enters it. A self-loop on `start` is a
/// one-edge cycle. A start node that is missing from the graph, or has
/// no path back to itself, yields an empty list.
pub fn find_cycles(graph: &GraphModel, start: NodeId) -> Vec<Vec<EdgeId>> {
    let mut results = Vec::new();
    if graph.node(start).is_none() {
        return results;
    }
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut path: Vec<EdgeId> = Vec::new();
    dfs(graph, start, start, &mut visited, &mut path, &mut results);
    if results.len() >= MAX_CYCLES {
        warn!(
            "cycle enumeration stopped at {} results; graph is too dense for a full listing",
            MAX_CYCLES
        );
    }
    results
}

fn dfs(
    graph: &GraphModel,
    start: NodeId,
    current: NodeId,
    visited: &mut HashSet<NodeId>,
    path: &mut Vec<EdgeId>,
    results: &mut Vec<Vec<EdgeId>>,
) {
    for edge in graph.edges() {
        if results.len() >= MAX_CYCLES {
            return;
        }
        if edge.from != current {
            continue;
        }
        if edge.to == start {
            // Closing the cycle is a leaf of this branch; the search
            // never continues past the start node.
            path.push(edge.id);
            results.push(path.clone());
            path.pop();
        } else if !visited.contains(&edge.to) {
            visited.insert(edge.to);
            path.push(edge.id);
            dfs(graph, start, edge.to, visited, path, results);
            path.pop();
            visited.remove(&edge.to);
        }
    }
}

/// A computed cycle listing plus an ordinal cursor for navigation.
///
/// The analyzer holds no subscription to the graph; it stamps the graph
/// revision at analysis time and hosts check [`CycleAnalysis::is_stale`]
/// to decide when to re-run.
#[derive(Clone, Debug, Default)]
pub struct CycleAnalysis {
    cycles: Vec<Vec<EdgeId>>,
    current: usize,
    graph_rev: u64,
}

impl CycleAnalysis {
    pub fn analyze(graph: &GraphModel, start: NodeId) -> Self {
        CycleAnalysis {
            cycles: find_cycles(graph, start),
            current: 0,
            graph_rev: graph.rev(),
        }
    }

    pub fn count(&self) -> usize {
        self.cycles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_cycle(&self) -> Option<&[EdgeId]> {
        self.cycles.get(self.current).map(Vec::as_slice)
    }

    pub fn cycle_at(&self, index: usize) -> Option<&[EdgeId]> {
        self.cycles.get(index).map(Vec::as_slice)
    }

    /// Advance the cursor, wrapping past the last cycle to the first.
    pub fn next(&mut self) {
        if !self.cycles.is_empty() {
            self.current = (self.current + 1) % self.cycles.len();
        }
    }

    /// Step the cursor back, wrapping before the first cycle to the
    /// last.
    pub fn prev(&mut self) {
        if !self.cycles.is_empty() {
            self.current = self
                .current
                .checked_sub(1)
                .unwrap_or(self.cycles.len() - 1);
        }
    }

    /// Discard the result list and reset the cursor.
    pub fn clear(&mut self) {
        *self = CycleAnalysis::default();
    }

    /// True once the graph has structurally changed since this analysis
    /// ran. Stale results should be discarded and re-computed.
    pub fn is_stale(&self, graph: &GraphModel) -> bool {
        graph.rev() != self.graph_rev
    }

    /// Human-readable path for one cycle: node labels joined by arrows,
    /// e.g. `A -> B -> A`. Unlabeled nodes show as `(unnamed)`.
    pub fn describe(&self, graph: &GraphModel, index: usize) -> String {
        let Some(cycle) = self.cycles.get(index) else {
            return String::new();
        };
        let mut out = String::new();
        let mut first = true;
        for eid in cycle {
            let Some(edge) = graph.edge(*eid) else {
                continue;
            };
            if first {
                out.push_str(&display_label(graph, edge.from));
                first = false;
            }
            out.push_str(" -> ");
            out.push_str(&display_label(graph, edge.to));
        }
        out
    }
}

fn display_label(graph: &GraphModel, id: NodeId) -> String {
    match graph.node(id) {
        Some(n) if !n.label.is_empty() => n.label.clone(),
        Some(_) => "(unnamed)".to_string(),
        None => "(missing)".to_string(),
    }
}
