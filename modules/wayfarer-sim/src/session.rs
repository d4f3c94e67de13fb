//! One simulated traversal session.
//!
//! The loop is a straight state machine: terminal checks (target first), edge
//! enumeration, auto-advance short-circuit or scored decision, wait + emotion
//! update, step append, then the oscillation guard. Every terminal state is
//! reached exactly once and nothing inside a step can fail — per-step
//! heuristics are total.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;
use uuid::Uuid;

use wayfarer_common::{
    ActionRef, DropOffPoint, FrictionKind, FrictionPoint, NavigationEdge, Outcome, PersonaProfile,
    RankedCandidate, RunParams, SessionTrace, StepRecord, WayfarerError,
};
use wayfarer_graph::ScreenGraph;

use crate::decision::{self, SOLO_CHOICE_GAP, VIABILITY_FLOOR};
use crate::emotion::{EmotionState, StepSignals};
use crate::friction;
use crate::persona::PersonaScales;
use crate::wait::{self, WaitContext};

/// Runs one persona through the graph. Owns all mutable session state;
/// the graph and distance map are shared read-only.
#[derive(Debug)]
pub struct Session<'a> {
    graph: &'a ScreenGraph,
    distances: &'a HashMap<i64, u32>,
    persona: &'a PersonaProfile,
    params: &'a RunParams,
}

impl<'a> Session<'a> {
    /// Fails only on the fatal precondition: source or target not in the
    /// graph. Everything after this point terminates with an `Outcome`.
    pub fn new(
        graph: &'a ScreenGraph,
        distances: &'a HashMap<i64, u32>,
        persona: &'a PersonaProfile,
        params: &'a RunParams,
    ) -> Result<Self, WayfarerError> {
        if !graph.contains(params.source_id) {
            return Err(WayfarerError::UnknownScreen(params.source_id));
        }
        if !graph.contains(params.target_id) {
            return Err(WayfarerError::UnknownScreen(params.target_id));
        }
        Ok(Self {
            graph,
            distances,
            persona,
            params,
        })
    }

    pub fn run(&self) -> SessionTrace {
        let session_id = Uuid::new_v4();
        let scales = PersonaScales::derive(self.persona);
        let mut rng = StdRng::seed_from_u64(self.params.seed);
        let mut emotion = EmotionState::baseline(self.persona);

        let target_id = self.params.target_id;
        let mut current = self.params.source_id;
        let mut history = vec![current];
        let mut elapsed = 0.0_f64;
        let mut steps: Vec<StepRecord> = Vec::new();
        let mut actions: Vec<ActionRef> = Vec::new();
        let mut friction_points: Vec<FrictionPoint> = Vec::new();

        let outcome = loop {
            // Terminal checks, target first: a session that starts on the
            // target reaches it in zero steps.
            if current == target_id {
                break Outcome::ReachedTarget;
            }
            if elapsed > self.params.max_seconds {
                break Outcome::Timeout;
            }
            if steps.len() as u32 >= self.params.max_steps {
                break Outcome::Timeout;
            }

            let candidates = self.graph.outgoing(current);
            if candidates.is_empty() {
                break Outcome::NoOutgoing;
            }

            // An auto-advance edge fires without user action: take the first
            // one (link_id order) deterministically, no scoring.
            let auto = candidates.iter().find(|e| e.auto_advance);
            let (chosen, ranked, gap) = match auto {
                Some(edge) => {
                    let ranked = vec![RankedCandidate {
                        link_id: edge.link_id,
                        dest_id: edge.dest,
                        score: 0.0,
                    }];
                    (edge, ranked, SOLO_CHOICE_GAP)
                }
                None => {
                    let (best, ranked) = decision::choose_edge(
                        &self.params.goal,
                        candidates,
                        self.graph,
                        target_id,
                        self.distances,
                        &history,
                        &scales,
                    );
                    let Some(best) = best else {
                        break Outcome::NoOutgoing;
                    };
                    if ranked[0].score <= VIABILITY_FLOOR {
                        break Outcome::NoChoice;
                    }
                    let gap = decision::clarity_gap(&ranked);
                    (best, ranked, gap)
                }
            };
            let is_auto = auto.is_some();

            let screen_text = self.screen_text(current);
            let wait_seconds = wait::compute_wait(
                &WaitContext {
                    screen_text: &screen_text,
                    option_count: candidates.len(),
                    clarity_gap: gap,
                    auto_advance: is_auto,
                },
                &emotion,
                self.persona,
                &mut rng,
            );

            let reduces_distance = match (
                self.distances.get(&current),
                self.distances.get(&chosen.dest),
            ) {
                (Some(&from), Some(&to)) => to < from,
                _ => false,
            };

            emotion = emotion.update(
                &StepSignals {
                    wait_seconds,
                    option_count: candidates.len(),
                    clarity_gap: gap,
                    reduces_distance,
                    auto_wait: is_auto,
                },
                self.persona,
            );

            let flags = friction::classify_step(chosen);
            for kind in &flags {
                friction_points.push(self.friction_point(*kind, current, chosen));
            }

            debug!(
                from = current,
                to = chosen.dest,
                link_id = chosen.link_id,
                score = ranked[0].score,
                wait_seconds,
                "Step taken"
            );

            steps.push(StepRecord {
                index: steps.len() as u32 + 1,
                from_id: current,
                from_name: self
                    .graph
                    .node(current)
                    .map(|n| n.name.clone())
                    .unwrap_or_default(),
                to_id: chosen.dest,
                link_id: chosen.link_id,
                click_target: chosen.click_target.clone(),
                auto_advance: is_auto,
                wait_seconds,
                reduced_distance: reduces_distance,
                candidates: ranked,
                emotion: emotion.snapshot(),
                friction: flags,
                thought: None,
            });
            actions.push(ActionRef {
                from_id: current,
                to_id: chosen.dest,
                link_id: chosen.link_id,
            });
            elapsed += wait_seconds;
            current = chosen.dest;
            history.push(current);

            // Loop guard — fires ahead of the next iteration's budget checks.
            // Arriving on the target is never treated as oscillation.
            if current != target_id && friction::oscillating(&history) {
                friction_points.push(FrictionPoint {
                    kind: FrictionKind::LoopOscillation,
                    screen_id: current,
                    description: format!(
                        "Last {} visits cycle through at most {} screens",
                        friction::LOOP_WINDOW,
                        friction::LOOP_DISTINCT_MAX
                    ),
                });
                break Outcome::LoopDetected;
            }
        };

        let drop_off_points = drop_offs(outcome, current, &friction_points);
        let trace = SessionTrace {
            session_id,
            persona: self.persona.name.clone(),
            goal: self.params.goal.clone(),
            source_id: self.params.source_id,
            target_id,
            outcome,
            total_steps: steps.len() as u32,
            elapsed_seconds: elapsed,
            steps,
            actions,
            friction_points,
            drop_off_points,
        };
        debug_assert!(trace.consistent());
        trace
    }

    fn screen_text(&self, id: i64) -> String {
        match self.graph.node(id) {
            Some(node) => match &node.description {
                Some(desc) => format!("{} {}", node.name, desc),
                None => node.name.clone(),
            },
            None => String::new(),
        }
    }

    fn friction_point(
        &self,
        kind: FrictionKind,
        screen_id: i64,
        edge: &NavigationEdge,
    ) -> FrictionPoint {
        let description = match kind {
            FrictionKind::Waiting => format!(
                "Screen advanced on its own via link {}",
                edge.link_id
            ),
            FrictionKind::BackNavigation => {
                format!("Chose a back/close action: \"{}\"", edge.click_target)
            }
            FrictionKind::LoopOscillation => "Oscillating between screens".to_string(),
        };
        FrictionPoint {
            kind,
            screen_id,
            description,
        }
    }
}

/// Where the persona stalled, for sessions that never reached the target.
fn drop_offs(outcome: Outcome, last: i64, friction_points: &[FrictionPoint]) -> Vec<DropOffPoint> {
    if outcome == Outcome::ReachedTarget {
        return Vec::new();
    }
    let mut points = vec![DropOffPoint {
        screen_id: last,
        reason: outcome.to_string(),
    }];
    for fp in friction_points {
        if fp.kind == FrictionKind::LoopOscillation && fp.screen_id != last {
            points.push(DropOffPoint {
                screen_id: fp.screen_id,
                reason: fp.kind.to_string(),
            });
        }
    }
    points
}
