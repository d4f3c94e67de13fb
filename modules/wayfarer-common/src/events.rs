//! Typed session events for the JSON-lines run log.
//!
//! Each line in a run log is one `EventRecord`: a monotonic sequence number,
//! a wall-clock timestamp, the owning session, and a tagged event payload.
//! Downstream consumers match on the `type` field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{ActionRef, EmotionSnapshot, Outcome, RankedCandidate};

/// Envelope around one event line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub seq: u32,
    pub ts: DateTime<Utc>,
    pub session_id: Uuid,
    #[serde(flatten)]
    pub event: SessionEvent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    SessionStarted {
        persona: String,
        goal: String,
        source_id: i64,
        target_id: i64,
    },
    /// Pre-decision thought, present when a narrator pass ran.
    Thought {
        screen_id: i64,
        text: String,
    },
    Waited {
        screen_id: i64,
        seconds: f64,
        auto_advance: bool,
    },
    #[serde(rename = "emotion_snapshot")]
    Emotion {
        screen_id: i64,
        emotion: EmotionSnapshot,
    },
    CandidatesRanked {
        screen_id: i64,
        candidates: Vec<RankedCandidate>,
    },
    ActionTaken {
        action: ActionRef,
        click_target: String,
    },
    SessionEnded {
        outcome: Outcome,
        total_steps: u32,
        elapsed_seconds: f64,
    },
}
