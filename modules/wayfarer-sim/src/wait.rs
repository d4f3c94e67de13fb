//! Hesitation model — how long the persona lingers before acting.
//!
//! The wait is simulated time only; nothing sleeps. It feeds both the
//! session's elapsed-time budget and the next emotion update, so hesitation
//! and affect reinforce each other.

use rand::rngs::StdRng;
use rand::Rng;

use wayfarer_common::PersonaProfile;

use crate::emotion::EmotionState;

/// Cues in a screen description that read as the app doing work.
const LOADING_CUES: &[&str] = &[
    "loading",
    "processing",
    "progress",
    "spinner",
    "please wait",
    "uploading",
    "syncing",
];

pub const MIN_WAIT: f64 = 0.4;
pub const MAX_WAIT: f64 = 6.0;
/// Auto-advance screens hold the user for a bounded beat.
pub const AUTO_MIN_WAIT: f64 = 0.6;
pub const AUTO_MAX_WAIT: f64 = 2.0;

const BASE_WAIT: f64 = 0.8;

pub struct WaitContext<'a> {
    /// Current screen name plus description.
    pub screen_text: &'a str,
    pub option_count: usize,
    pub clarity_gap: f64,
    pub auto_advance: bool,
}

pub fn compute_wait(
    ctx: &WaitContext<'_>,
    emotion: &EmotionState,
    persona: &PersonaProfile,
    rng: &mut StdRng,
) -> f64 {
    let mut wait = BASE_WAIT;

    let text = ctx.screen_text.to_lowercase();
    if LOADING_CUES.iter().any(|cue| text.contains(cue)) {
        wait += 0.6;
    }

    wait += match ctx.option_count {
        n if n >= 6 => 0.8,
        3..=5 => 0.3,
        _ => 0.0,
    };

    if ctx.clarity_gap >= 2.0 {
        wait -= 0.4;
    } else if ctx.clarity_gap <= 0.3 {
        wait += 0.5;
    }

    wait += 0.5 * emotion.frustration + 0.4 * emotion.stress;
    wait -= 0.4 * emotion.valence.max(0.0);

    wait -= 0.3 * persona.conscientiousness;
    wait += 0.2 * persona.openness + 0.3 * persona.neuroticism;

    // Per-step jitter from the session rng: identical seeds reproduce
    // identical traces, identical screens still vary within a run.
    wait += rng.random_range(-0.1..0.1);

    if ctx.auto_advance {
        wait.clamp(AUTO_MIN_WAIT, AUTO_MAX_WAIT)
    } else {
        wait.clamp(MIN_WAIT, MAX_WAIT)
    }
}
