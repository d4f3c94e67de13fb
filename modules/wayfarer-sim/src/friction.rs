//! Friction signals — per-step classification and the oscillation guard.

use std::collections::HashSet;

use wayfarer_common::{FrictionKind, NavigationEdge};

use crate::decision;

/// Trailing visits inspected by the loop guard.
pub const LOOP_WINDOW: usize = 6;
/// At most this many distinct screens inside the window before the walk
/// counts as oscillating.
pub const LOOP_DISTINCT_MAX: usize = 2;

/// Friction flags raised by taking one edge.
pub fn classify_step(edge: &NavigationEdge) -> Vec<FrictionKind> {
    let mut flags = Vec::new();
    if edge.auto_advance {
        flags.push(FrictionKind::Waiting);
    }
    if decision::is_back_edge(edge) {
        flags.push(FrictionKind::BackNavigation);
    }
    flags
}

/// True when the last `LOOP_WINDOW` visits collapse to at most
/// `LOOP_DISTINCT_MAX` distinct screens. Short histories never oscillate.
pub fn oscillating(history: &[i64]) -> bool {
    if history.len() < LOOP_WINDOW {
        return false;
    }
    let window = &history[history.len() - LOOP_WINDOW..];
    let distinct: HashSet<i64> = window.iter().copied().collect();
    distinct.len() <= LOOP_DISTINCT_MAX
}
