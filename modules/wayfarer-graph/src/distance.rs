//! Hop-distance to a target screen via reverse breadth-first search.
//!
//! Computed once per run over the inverted adjacency and shared read-only by
//! every session. Screens with no path to the target are absent from the map
//! — callers treat absence as infinite distance.

use std::collections::{HashMap, VecDeque};

use crate::graph::ScreenGraph;

/// Shortest hop count from every screen that can reach `target_id`.
/// The target itself maps to 0.
pub fn to_target(graph: &ScreenGraph, target_id: i64) -> HashMap<i64, u32> {
    let mut dist = HashMap::new();
    if !graph.contains(target_id) {
        return dist;
    }

    let mut inverted: HashMap<i64, Vec<i64>> = HashMap::new();
    for id in graph.node_ids() {
        for edge in graph.outgoing(id) {
            inverted.entry(edge.dest).or_default().push(edge.source);
        }
    }

    dist.insert(target_id, 0);
    let mut queue = VecDeque::from([target_id]);
    while let Some(node) = queue.pop_front() {
        let hops = dist[&node];
        let Some(preds) = inverted.get(&node) else {
            continue;
        };
        for &pred in preds {
            if !dist.contains_key(&pred) {
                dist.insert(pred, hops + 1);
                queue.push_back(pred);
            }
        }
    }
    dist
}
