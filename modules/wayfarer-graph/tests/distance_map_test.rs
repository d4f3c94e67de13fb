//! Distance-map contract tests.
//!
//! The reverse-BFS distance map must agree with an independent forward BFS
//! from every node, on both hand-built and randomly generated graphs.

use std::collections::{HashMap, HashSet, VecDeque};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use wayfarer_common::{RawLink, RawScreen};
use wayfarer_graph::{distance, ScreenGraph};

fn build(node_count: i64, edges: &[(i64, i64)]) -> ScreenGraph {
    let screens = (1..=node_count)
        .map(|id| RawScreen {
            id,
            name: format!("Screen {id}"),
            file: None,
            description: None,
        })
        .collect();
    let links = edges
        .iter()
        .enumerate()
        .map(|(i, (s, d))| RawLink {
            source_screen_id: s.to_string(),
            destination_screen_id: d.to_string(),
            link_id: i as i64 + 1,
            click_target: String::new(),
            user_intent: String::new(),
            is_auto_delay: None,
            is_click_anywhere: None,
        })
        .collect();
    ScreenGraph::build(screens, links, &HashMap::new())
}

/// Forward BFS from `source` over the graph's real edge direction.
fn forward_hops(graph: &ScreenGraph, source: i64, target: i64) -> Option<u32> {
    let mut seen = HashSet::from([source]);
    let mut queue = VecDeque::from([(source, 0u32)]);
    while let Some((node, hops)) = queue.pop_front() {
        if node == target {
            return Some(hops);
        }
        for edge in graph.outgoing(node) {
            if seen.insert(edge.dest) {
                queue.push_back((edge.dest, hops + 1));
            }
        }
    }
    None
}

fn assert_map_matches_forward_bfs(graph: &ScreenGraph, target: i64) {
    let dist = distance::to_target(graph, target);
    for node in graph.node_ids() {
        let expected = forward_hops(graph, node, target);
        assert_eq!(
            dist.get(&node).copied(),
            expected,
            "distance mismatch for node {node} -> target {target}"
        );
    }
}

#[test]
fn target_distance_is_zero() {
    let graph = build(5, &[(1, 2), (2, 3), (3, 4), (4, 5)]);
    let dist = distance::to_target(&graph, 5);
    assert_eq!(dist[&5], 0);
}

#[test]
fn matches_forward_bfs_on_a_branching_graph() {
    let graph = build(
        7,
        &[(1, 2), (1, 3), (2, 4), (3, 4), (4, 5), (5, 6), (3, 6), (6, 7)],
    );
    for target in 1..=7 {
        assert_map_matches_forward_bfs(&graph, target);
    }
}

#[test]
fn matches_forward_bfs_on_random_graphs() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let node_count = rng.random_range(2..=20);
        let edge_count = rng.random_range(1..=60);
        let edges: Vec<(i64, i64)> = (0..edge_count)
            .map(|_| {
                (
                    rng.random_range(1..=node_count),
                    rng.random_range(1..=node_count),
                )
            })
            .collect();
        let graph = build(node_count, &edges);
        let target = rng.random_range(1..=node_count);
        assert_map_matches_forward_bfs(&graph, target);
    }
}
