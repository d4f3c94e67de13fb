//! Edge scoring and selection.
//!
//! Every candidate edge gets a score from goal-text overlap, persona-scaled
//! bonuses and penalties, hop-distance improvement, and loop avoidance. The
//! highest score wins; ties keep the earliest candidate so selection is
//! stable. All scoring is total over its inputs — malformed text fields
//! simply contribute no tokens.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use wayfarer_common::{NavigationEdge, RankedCandidate};
use wayfarer_graph::ScreenGraph;

use crate::persona::PersonaScales;

/// Words carrying no intent signal, excluded from overlap scoring.
const STOPWORDS: &[&str] = &[
    "the", "a", "an", "to", "of", "and", "or", "in", "on", "for", "with", "is", "it", "at", "by",
    "this", "that", "i", "my", "your",
];

/// Generic call-to-action vocabulary; any match earns a small bonus.
const CTA_WORDS: &[&str] = &[
    "continue", "next", "submit", "confirm", "proceed", "start", "finish", "done", "ok", "go",
    "open",
];

/// Words that read as undoing progress.
const BACK_WORDS: &[&str] = &["back", "return", "close", "cancel"];

/// Below this score even the best candidate reads as the persona giving up.
/// Sits under the back-deterrent floor (-6.0 x 1.6) so a lone back edge is
/// still taken and oscillation is terminated by the loop guard, not here.
pub const VIABILITY_FLOOR: f64 = -10.0;

/// Clarity gap reported when there is no runner-up to compare against.
pub const SOLO_CHOICE_GAP: f64 = 10.0;

const CTA_BONUS: f64 = 0.3;
const BACK_PENALTY: f64 = 6.0;
const DIRECT_TARGET_BONUS: f64 = 100.0;
const RECENT_REVISIT_PENALTY: f64 = 8.0;
const HISTORY_REVISIT_PENALTY: f64 = 4.0;

/// Lowercase alphanumeric tokens minus stopwords.
pub fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty() && !STOPWORDS.contains(t))
        .map(str::to_string)
        .collect()
}

fn edge_tokens(edge: &NavigationEdge, graph: &ScreenGraph) -> HashSet<String> {
    let mut text = format!("{} {}", edge.click_target, edge.user_intent);
    if let Some(node) = graph.node(edge.dest) {
        text.push(' ');
        text.push_str(&node.name);
        if let Some(desc) = &node.description {
            text.push(' ');
            text.push_str(desc);
        }
    }
    tokenize(&text)
}

/// True when the edge's own text reads as a back/close/cancel action.
pub fn is_back_edge(edge: &NavigationEdge) -> bool {
    let tokens = tokenize(&format!("{} {}", edge.click_target, edge.user_intent));
    BACK_WORDS.iter().any(|w| tokens.contains(*w))
}

/// Score one candidate edge against the goal.
pub fn score_edge(
    goal_tokens: &HashSet<String>,
    edge: &NavigationEdge,
    graph: &ScreenGraph,
    target_id: i64,
    distances: &HashMap<i64, u32>,
    history: &[i64],
    scales: &PersonaScales,
) -> f64 {
    let tokens = edge_tokens(edge, graph);

    let mut score = goal_tokens.intersection(&tokens).count() as f64;

    if CTA_WORDS.iter().any(|w| tokens.contains(*w)) {
        score += CTA_BONUS;
    }
    if BACK_WORDS.iter().any(|w| tokens.contains(*w)) {
        score -= BACK_PENALTY * scales.back;
    }
    if edge.dest == target_id {
        score += DIRECT_TARGET_BONUS * scales.direct;
    }
    if let Some(&hops) = distances.get(&edge.dest) {
        score += scales.distance * (40.0 - 10.0 * f64::from(hops)).max(0.0);
    }

    let recent = &history[history.len().saturating_sub(2)..];
    if recent.contains(&edge.dest) {
        score -= RECENT_REVISIT_PENALTY;
    } else if history.contains(&edge.dest) {
        score -= HISTORY_REVISIT_PENALTY;
    }

    score
}

/// Pick the best-scoring candidate and return the full ranking.
///
/// Ties keep the earliest candidate. An empty candidate list yields `None` —
/// a terminal condition for the caller, not an error.
pub fn choose_edge<'a>(
    goal: &str,
    candidates: &'a [NavigationEdge],
    graph: &ScreenGraph,
    target_id: i64,
    distances: &HashMap<i64, u32>,
    history: &[i64],
    scales: &PersonaScales,
) -> (Option<&'a NavigationEdge>, Vec<RankedCandidate>) {
    let goal_tokens = tokenize(goal);

    let mut ranked = Vec::with_capacity(candidates.len());
    let mut best: Option<(usize, f64)> = None;
    for (i, edge) in candidates.iter().enumerate() {
        let score = score_edge(&goal_tokens, edge, graph, target_id, distances, history, scales);
        ranked.push(RankedCandidate {
            link_id: edge.link_id,
            dest_id: edge.dest,
            score,
        });
        let better = match best {
            None => true,
            Some((_, best_score)) => score > best_score,
        };
        if better {
            best = Some((i, score));
        }
    }

    // Stable sort keeps candidate order within equal scores.
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    (best.map(|(i, _)| &candidates[i]), ranked)
}

/// Gap between the top two scores. A lone candidate is fully decisive.
pub fn clarity_gap(ranked: &[RankedCandidate]) -> f64 {
    match ranked {
        [first, second, ..] => first.score - second.score,
        _ => SOLO_CHOICE_GAP,
    }
}
