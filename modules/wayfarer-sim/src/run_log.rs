//! Run log — append-only JSON-lines timeline of every session event in a run.
//!
//! Each run produces a single `{DATA_DIR}/session-logs/{run_id}.jsonl` file,
//! one serialized `EventRecord` per line, ordered by sequence number.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use wayfarer_common::events::{EventRecord, SessionEvent};
use wayfarer_common::SessionTrace;

/// Root data directory, controlled by `DATA_DIR` env var (default: `"data"`).
pub fn data_dir() -> PathBuf {
    PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()))
}

pub struct RunLog {
    pub run_id: String,
    path: PathBuf,
    writer: BufWriter<File>,
    seq: u32,
}

impl RunLog {
    pub fn create(data_dir: &Path, run_id: &str) -> Result<Self> {
        let dir = data_dir.join("session-logs");
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{run_id}.jsonl"));
        let writer = BufWriter::new(File::create(&path)?);
        Ok(Self {
            run_id: run_id.to_string(),
            path,
            writer,
            seq: 0,
        })
    }

    /// Append one event line. Sequence numbers are monotonic across the run.
    pub fn append(&mut self, session_id: Uuid, event: SessionEvent) -> Result<()> {
        let record = EventRecord {
            seq: self.seq,
            ts: Utc::now(),
            session_id,
            event,
        };
        serde_json::to_writer(&mut self.writer, &record)?;
        self.writer.write_all(b"\n")?;
        self.seq += 1;
        Ok(())
    }

    /// Emit the full event timeline for one completed trace: start, then per
    /// step thought / wait / emotion / ranking / action, then the terminal.
    pub fn append_trace(&mut self, trace: &SessionTrace) -> Result<()> {
        let id = trace.session_id;
        self.append(
            id,
            SessionEvent::SessionStarted {
                persona: trace.persona.clone(),
                goal: trace.goal.clone(),
                source_id: trace.source_id,
                target_id: trace.target_id,
            },
        )?;

        for step in &trace.steps {
            if let Some(text) = &step.thought {
                self.append(
                    id,
                    SessionEvent::Thought {
                        screen_id: step.from_id,
                        text: text.clone(),
                    },
                )?;
            }
            self.append(
                id,
                SessionEvent::Waited {
                    screen_id: step.from_id,
                    seconds: step.wait_seconds,
                    auto_advance: step.auto_advance,
                },
            )?;
            self.append(
                id,
                SessionEvent::Emotion {
                    screen_id: step.to_id,
                    emotion: step.emotion.clone(),
                },
            )?;
            self.append(
                id,
                SessionEvent::CandidatesRanked {
                    screen_id: step.from_id,
                    candidates: step.candidates.clone(),
                },
            )?;
            self.append(
                id,
                SessionEvent::ActionTaken {
                    action: wayfarer_common::ActionRef {
                        from_id: step.from_id,
                        to_id: step.to_id,
                        link_id: step.link_id,
                    },
                    click_target: step.click_target.clone(),
                },
            )?;
        }

        self.append(
            id,
            SessionEvent::SessionEnded {
                outcome: trace.outcome,
                total_steps: trace.total_steps,
                elapsed_seconds: trace.elapsed_seconds,
            },
        )?;
        Ok(())
    }

    /// Flush and close. Returns the file path.
    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer.flush()?;
        info!(path = %self.path.display(), events = self.seq, "Run log saved");
        Ok(self.path)
    }
}
