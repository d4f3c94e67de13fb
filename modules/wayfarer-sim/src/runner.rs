//! Batch execution — many personas over a bounded worker pool.
//!
//! The graph and each distance map are built once and shared by reference;
//! every session owns its mutable state exclusively. Jobs run through
//! `buffer_unordered`, so one failing or slow session never blocks or aborts
//! its siblings — every result is collected independently.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use wayfarer_common::{Outcome, PersonaProfile, RunParams, SessionTrace};
use wayfarer_graph::{distance, ScreenGraph};

use crate::narrate::Narrator;
use crate::session::Session;

/// One unit of batch work: a persona attempting a goal.
#[derive(Debug, Clone)]
pub struct SessionJob {
    pub persona: PersonaProfile,
    pub params: RunParams,
}

#[derive(Debug, Clone, Default)]
pub struct BatchStats {
    pub sessions_run: u32,
    pub reached_target: u32,
    pub timed_out: u32,
    pub no_outgoing: u32,
    pub no_choice: u32,
    pub loops_detected: u32,
    pub failed: u32,
    pub friction_points: u32,
    pub total_steps: u64,
    pub total_elapsed: f64,
}

impl BatchStats {
    fn record(&mut self, trace: &SessionTrace) {
        self.sessions_run += 1;
        match trace.outcome {
            Outcome::ReachedTarget => self.reached_target += 1,
            Outcome::Timeout => self.timed_out += 1,
            Outcome::NoOutgoing => self.no_outgoing += 1,
            Outcome::NoChoice => self.no_choice += 1,
            Outcome::LoopDetected => self.loops_detected += 1,
        }
        self.friction_points += trace.friction_points.len() as u32;
        self.total_steps += u64::from(trace.total_steps);
        self.total_elapsed += trace.elapsed_seconds;
    }

    pub fn completion_rate(&self) -> f64 {
        if self.sessions_run == 0 {
            return 0.0;
        }
        f64::from(self.reached_target) / f64::from(self.sessions_run)
    }
}

impl std::fmt::Display for BatchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Simulation Batch Complete ===")?;
        writeln!(f, "Sessions run:     {}", self.sessions_run)?;
        writeln!(f, "Reached target:   {}", self.reached_target)?;
        writeln!(f, "Timed out:        {}", self.timed_out)?;
        writeln!(f, "No outgoing:      {}", self.no_outgoing)?;
        writeln!(f, "No viable choice: {}", self.no_choice)?;
        writeln!(f, "Loops detected:   {}", self.loops_detected)?;
        writeln!(f, "Failed:           {}", self.failed)?;
        writeln!(f, "Friction points:  {}", self.friction_points)?;
        let sessions = self.sessions_run.max(1);
        writeln!(
            f,
            "Completion rate:  {:.0}%",
            self.completion_rate() * 100.0
        )?;
        writeln!(
            f,
            "Mean steps:       {:.1}",
            self.total_steps as f64 / f64::from(sessions)
        )?;
        writeln!(
            f,
            "Mean elapsed:     {:.1}s (simulated)",
            self.total_elapsed / f64::from(sessions)
        )
    }
}

pub struct BatchRunner {
    graph: Arc<ScreenGraph>,
    workers: usize,
}

impl BatchRunner {
    pub fn new(graph: Arc<ScreenGraph>, workers: usize) -> Self {
        Self {
            graph,
            workers: workers.max(1),
        }
    }

    /// Run every job to completion and narrate the finished traces.
    pub async fn run(
        &self,
        jobs: Vec<SessionJob>,
        narrator: &dyn Narrator,
    ) -> (Vec<SessionTrace>, BatchStats) {
        // One distance map per distinct target, computed up front and shared.
        let mut distance_maps: HashMap<i64, Arc<HashMap<i64, u32>>> = HashMap::new();
        for job in &jobs {
            distance_maps
                .entry(job.params.target_id)
                .or_insert_with(|| Arc::new(distance::to_target(&self.graph, job.params.target_id)));
        }

        info!(
            jobs = jobs.len(),
            workers = self.workers,
            targets = distance_maps.len(),
            "Starting simulation batch"
        );

        let results: Vec<Result<SessionTrace>> = stream::iter(jobs.into_iter().map(|job| {
            let graph = Arc::clone(&self.graph);
            let distances = Arc::clone(&distance_maps[&job.params.target_id]);
            async move {
                let mut trace = Session::new(&graph, &distances, &job.persona, &job.params)
                    .with_context(|| {
                        format!("Session rejected for persona \"{}\"", job.persona.name)
                    })?
                    .run();
                if let Err(e) = narrator.annotate(&mut trace).await {
                    // Narration is cosmetic; the trace stands without it.
                    warn!(persona = job.persona.name.as_str(), error = %e, "Narration failed");
                }
                Ok(trace)
            }
        }))
        .buffer_unordered(self.workers)
        .collect()
        .await;

        let mut stats = BatchStats::default();
        let mut traces = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(trace) => {
                    stats.record(&trace);
                    traces.push(trace);
                }
                Err(e) => {
                    warn!(error = %e, "Session failed");
                    stats.failed += 1;
                }
            }
        }
        (traces, stats)
    }
}

#[cfg(test)]
mod tests {
    use crate::narrate::NoopNarrator;
    use crate::testing::{graph_from, named_link, params, screen};

    use super::*;

    fn jobs_graph() -> Arc<ScreenGraph> {
        Arc::new(graph_from(
            vec![screen(1, "Home"), screen(2, "Done")],
            vec![named_link(1, 2, 10, "Continue")],
        ))
    }

    #[tokio::test]
    async fn batch_collects_every_session() {
        let runner = BatchRunner::new(jobs_graph(), 4);
        let jobs: Vec<SessionJob> = (0..10)
            .map(|i| {
                let mut p = params(1, 2, "continue");
                p.seed = i;
                SessionJob {
                    persona: PersonaProfile::default(),
                    params: p,
                }
            })
            .collect();
        let (traces, stats) = runner.run(jobs, &NoopNarrator).await;
        assert_eq!(traces.len(), 10);
        assert_eq!(stats.sessions_run, 10);
        assert_eq!(stats.reached_target, 10);
        assert_eq!(stats.failed, 0);
        assert_eq!(stats.completion_rate(), 1.0);
    }

    #[tokio::test]
    async fn one_bad_job_does_not_abort_siblings() {
        let runner = BatchRunner::new(jobs_graph(), 4);
        let good = SessionJob {
            persona: PersonaProfile::default(),
            params: params(1, 2, "continue"),
        };
        let bad = SessionJob {
            persona: PersonaProfile::default(),
            // Unknown source id: rejected at the precondition.
            params: params(77, 2, "continue"),
        };
        let (traces, stats) = runner.run(vec![bad, good.clone(), good], &NoopNarrator).await;
        assert_eq!(traces.len(), 2);
        assert_eq!(stats.sessions_run, 2);
        assert_eq!(stats.failed, 1);
    }

    #[tokio::test]
    async fn zero_workers_still_runs() {
        let runner = BatchRunner::new(jobs_graph(), 0);
        let (traces, _) = runner
            .run(
                vec![SessionJob {
                    persona: PersonaProfile::default(),
                    params: params(1, 2, "continue"),
                }],
                &NoopNarrator,
            )
            .await;
        assert_eq!(traces.len(), 1);
    }
}
