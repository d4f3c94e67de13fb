//! Narrative pass — an external collaborator fills per-step thought text
//! after a trace is finalised.
//!
//! Narration never participates in the decision loop: the engine produces a
//! complete trace first, then a narrator may annotate it. The default
//! implementation does nothing, keeping the core deterministic and offline.

use anyhow::Result;
use async_trait::async_trait;

use wayfarer_common::SessionTrace;

#[async_trait]
pub trait Narrator: Send + Sync {
    /// Fill `thought` on the steps of a completed trace.
    async fn annotate(&self, trace: &mut SessionTrace) -> Result<()>;
}

/// Leaves thoughts empty.
pub struct NoopNarrator;

#[async_trait]
impl Narrator for NoopNarrator {
    async fn annotate(&self, _trace: &mut SessionTrace) -> Result<()> {
        Ok(())
    }
}

/// Deterministic template narrator for local runs and tests. A remote
/// LLM-backed implementation plugs in behind the same trait.
pub struct TemplateNarrator;

#[async_trait]
impl Narrator for TemplateNarrator {
    async fn annotate(&self, trace: &mut SessionTrace) -> Result<()> {
        for step in &mut trace.steps {
            let feeling = step.emotion.label.clone();
            step.thought = Some(if step.auto_advance {
                format!("{} — the \"{}\" screen moves on by itself.", feeling, step.from_name)
            } else {
                format!(
                    "{} — on \"{}\" with {} option(s), going with \"{}\".",
                    feeling,
                    step.from_name,
                    step.candidates.len(),
                    step.click_target
                )
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use wayfarer_common::PersonaProfile;
    use wayfarer_graph::distance;

    use crate::session::Session;
    use crate::testing::{graph_from, named_link, params, screen};

    use super::*;

    #[tokio::test]
    async fn template_narrator_fills_every_step() {
        let graph = graph_from(
            vec![screen(1, "Home"), screen(2, "Done")],
            vec![named_link(1, 2, 10, "Continue")],
        );
        let distances = distance::to_target(&graph, 2);
        let persona = PersonaProfile::default();
        let p = params(1, 2, "continue");
        let mut trace = Session::new(&graph, &distances, &persona, &p).unwrap().run();

        TemplateNarrator.annotate(&mut trace).await.unwrap();
        assert!(trace.steps.iter().all(|s| s.thought.is_some()));
    }

    #[tokio::test]
    async fn noop_narrator_leaves_thoughts_empty() {
        let graph = graph_from(
            vec![screen(1, "Home"), screen(2, "Done")],
            vec![named_link(1, 2, 10, "Continue")],
        );
        let distances = distance::to_target(&graph, 2);
        let persona = PersonaProfile::default();
        let p = params(1, 2, "continue");
        let mut trace = Session::new(&graph, &distances, &persona, &p).unwrap().run();

        NoopNarrator.annotate(&mut trace).await.unwrap();
        assert!(trace.steps.iter().all(|s| s.thought.is_none()));
    }
}
