//! Test fixtures — tiny graphs, links, and run parameters shared by unit and
//! integration tests.

use std::collections::HashMap;

use wayfarer_common::{PersonaProfile, RawLink, RawScreen, RunParams};
use wayfarer_graph::ScreenGraph;

pub fn screen(id: i64, name: &str) -> RawScreen {
    RawScreen {
        id,
        name: name.to_string(),
        file: None,
        description: None,
    }
}

/// Link with empty text fields.
pub fn link(source: i64, dest: i64, link_id: i64) -> RawLink {
    named_link(source, dest, link_id, "")
}

/// Link with a click target, the way exporters usually annotate them.
pub fn named_link(source: i64, dest: i64, link_id: i64, click_target: &str) -> RawLink {
    RawLink {
        source_screen_id: source.to_string(),
        destination_screen_id: dest.to_string(),
        link_id,
        click_target: click_target.to_string(),
        user_intent: String::new(),
        is_auto_delay: None,
        is_click_anywhere: None,
    }
}

pub fn graph_from(screens: Vec<RawScreen>, links: Vec<RawLink>) -> ScreenGraph {
    ScreenGraph::build(screens, links, &HashMap::new())
}

/// A two-screen cycle plus an isolated screen 3 that nothing reaches.
pub fn two_cycle_graph() -> ScreenGraph {
    graph_from(
        vec![screen(1, "A"), screen(2, "B"), screen(3, "C")],
        vec![link(1, 2, 1), link(2, 1, 2)],
    )
}

pub fn params(source_id: i64, target_id: i64, goal: &str) -> RunParams {
    RunParams::builder()
        .goal(goal)
        .source_id(source_id)
        .target_id(target_id)
        .build()
}

/// Persona with every trait at 0.5 and no categorical attributes.
pub fn neutral_persona() -> PersonaProfile {
    PersonaProfile::default()
}
