//! Loop-guard contract tests.
//!
//! Oscillating walks must terminate via the guard — not by exhausting a
//! budget and not by the scorer refusing every option — and must do so
//! within six steps on a two-node cycle.

use wayfarer_common::{FrictionKind, Outcome};
use wayfarer_graph::distance;
use wayfarer_sim::session::Session;
use wayfarer_sim::testing::{graph_from, link, neutral_persona, params, screen, two_cycle_graph};

#[test]
fn two_node_cycle_terminates_as_loop_detected() {
    let graph = two_cycle_graph();
    // Target 3 exists but nothing reaches it.
    let distances = distance::to_target(&graph, 3);
    assert!(!distances.contains_key(&1));

    let persona = neutral_persona();
    let p = params(1, 3, "find the unreachable screen");
    let trace = Session::new(&graph, &distances, &persona, &p).unwrap().run();

    assert_eq!(trace.outcome, Outcome::LoopDetected);
    assert!(trace.total_steps <= 6, "took {} steps", trace.total_steps);
    assert!(trace.consistent());
}

#[test]
fn loop_detection_raises_oscillation_friction_and_drop_off() {
    let graph = two_cycle_graph();
    let distances = distance::to_target(&graph, 3);
    let persona = neutral_persona();
    let p = params(1, 3, "goal");
    let trace = Session::new(&graph, &distances, &persona, &p).unwrap().run();

    assert!(trace
        .friction_points
        .iter()
        .any(|fp| fp.kind == FrictionKind::LoopOscillation));
    assert!(!trace.drop_off_points.is_empty());
    assert_eq!(trace.drop_off_points[0].reason, "loop_detected");
}

#[test]
fn self_loop_terminates_as_loop_detected() {
    let graph = graph_from(
        vec![screen(1, "Stuck"), screen(2, "Exit")],
        vec![link(1, 1, 1)],
    );
    let distances = distance::to_target(&graph, 2);
    let persona = neutral_persona();
    let p = params(1, 2, "leave");
    let trace = Session::new(&graph, &distances, &persona, &p).unwrap().run();

    assert_eq!(trace.outcome, Outcome::LoopDetected);
    assert!(trace.total_steps <= 6);
}

#[test]
fn loop_guard_does_not_fire_on_progressing_walks() {
    // A 10-screen chain revisits nothing; the walk must reach the end.
    let screens = (1..=10).map(|i| screen(i, &format!("S{i}"))).collect();
    let links = (1..=9).map(|i| link(i, i + 1, i)).collect();
    let graph = graph_from(screens, links);
    let distances = distance::to_target(&graph, 10);
    let persona = neutral_persona();
    let p = params(1, 10, "reach the end");
    let trace = Session::new(&graph, &distances, &persona, &p).unwrap().run();

    assert_eq!(trace.outcome, Outcome::ReachedTarget);
    assert_eq!(trace.total_steps, 9);
}

#[test]
fn cycle_with_an_exit_to_the_target_escapes() {
    // 1 <-> 2 cycles, but 2 also leads straight to the target; the
    // direct-target bonus wins before the guard can fire.
    let graph = graph_from(
        vec![screen(1, "A"), screen(2, "B"), screen(3, "Goal checkout")],
        vec![link(1, 2, 1), link(2, 1, 2), link(2, 3, 3)],
    );
    let distances = distance::to_target(&graph, 3);
    let persona = neutral_persona();
    let p = params(1, 3, "checkout");
    let trace = Session::new(&graph, &distances, &persona, &p).unwrap().run();

    assert_eq!(trace.outcome, Outcome::ReachedTarget);
    assert_eq!(trace.total_steps, 2);
    assert!(trace.consistent());
}
