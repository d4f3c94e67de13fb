//! Affect tracking for a session.
//!
//! The emotion state is a small bounded vector mutated exactly once per step:
//! every scalar decays geometrically, the step's signals apply deltas, then
//! everything is re-clamped. `update` is pure — state in, state out — so
//! sessions can run in parallel and bound properties are easy to test.

use wayfarer_common::{EmotionSnapshot, PersonaProfile};

/// Geometric decay applied to every scalar before the step's deltas.
const DECAY: f64 = 0.88;

/// A wait at or past this many seconds reads as the app making the user sit.
const LONG_WAIT_SECONDS: f64 = 3.0;

/// At this many visible options the screen reads as cluttered.
const CROWDED_OPTION_COUNT: usize = 6;

/// Below this score gap between the top two candidates, the choice was murky.
const MURKY_CLARITY_GAP: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmotionState {
    /// [-1, 1]; everything else [0, 1].
    pub valence: f64,
    pub arousal: f64,
    pub stress: f64,
    pub frustration: f64,
    pub confidence: f64,
}

/// Signals from one step that move the emotion state.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepSignals {
    pub wait_seconds: f64,
    pub option_count: usize,
    pub clarity_gap: f64,
    /// The chosen edge strictly lowered hop-distance to the target.
    pub reduces_distance: bool,
    /// The screen advanced on its own.
    pub auto_wait: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmotionLabel {
    Stressed,
    Confident,
    Focused,
    Frustrated,
    Neutral,
}

impl std::fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmotionLabel::Stressed => write!(f, "Stressed"),
            EmotionLabel::Confident => write!(f, "Confident"),
            EmotionLabel::Focused => write!(f, "Focused"),
            EmotionLabel::Frustrated => write!(f, "Frustrated"),
            EmotionLabel::Neutral => write!(f, "Neutral"),
        }
    }
}

impl EmotionState {
    /// Session-start baseline seeded from the persona profile: stress from
    /// Neuroticism, confidence from Conscientiousness minus Neuroticism,
    /// valence from Extraversion minus Neuroticism.
    pub fn baseline(persona: &PersonaProfile) -> Self {
        let n = persona.neuroticism;
        Self {
            valence: (0.4 * (persona.extraversion - n)).clamp(-1.0, 1.0),
            arousal: 0.3,
            stress: (0.2 + 0.4 * n).clamp(0.0, 1.0),
            frustration: (0.1 * n).clamp(0.0, 1.0),
            confidence: (0.5 + 0.4 * (persona.conscientiousness - n)).clamp(0.0, 1.0),
        }
    }

    /// Apply one step's signals: decay, deltas, re-clamp.
    pub fn update(self, signals: &StepSignals, persona: &PersonaProfile) -> Self {
        let mut next = Self {
            valence: self.valence * DECAY,
            arousal: self.arousal * DECAY,
            stress: self.stress * DECAY,
            frustration: self.frustration * DECAY,
            confidence: self.confidence * DECAY,
        };

        if signals.wait_seconds >= LONG_WAIT_SECONDS {
            next.arousal += 0.15;
            next.stress += 0.08 + 0.15 * persona.neuroticism;
        }
        if signals.option_count >= CROWDED_OPTION_COUNT {
            next.frustration += 0.08 + 0.12 * persona.openness;
        }
        if signals.clarity_gap < MURKY_CLARITY_GAP {
            next.frustration += 0.12;
        }
        if signals.auto_wait {
            // Auto-advance reads as loss of control.
            next.stress += 0.08;
            next.frustration += 0.06;
        }
        if signals.reduces_distance {
            next.confidence += 0.12;
            next.valence += 0.15;
            next.stress -= 0.08;
            next.frustration -= 0.10;
        }

        next.clamped()
    }

    fn clamped(self) -> Self {
        Self {
            valence: self.valence.clamp(-1.0, 1.0),
            arousal: self.arousal.clamp(0.0, 1.0),
            stress: self.stress.clamp(0.0, 1.0),
            frustration: self.frustration.clamp(0.0, 1.0),
            confidence: self.confidence.clamp(0.0, 1.0),
        }
    }

    pub fn in_bounds(&self) -> bool {
        (-1.0..=1.0).contains(&self.valence)
            && (0.0..=1.0).contains(&self.arousal)
            && (0.0..=1.0).contains(&self.stress)
            && (0.0..=1.0).contains(&self.frustration)
            && (0.0..=1.0).contains(&self.confidence)
    }

    /// Categorical label from fixed thresholds, checked in priority order.
    pub fn label(&self) -> EmotionLabel {
        if self.frustration > 0.65 || self.stress > 0.7 {
            EmotionLabel::Stressed
        } else if self.valence > 0.2 && self.confidence > 0.6 {
            EmotionLabel::Confident
        } else if self.arousal > 0.6 && self.frustration < 0.3 && self.stress < 0.4 {
            EmotionLabel::Focused
        } else if self.valence < -0.1 && self.frustration > 0.35 {
            EmotionLabel::Frustrated
        } else {
            EmotionLabel::Neutral
        }
    }

    pub fn snapshot(&self) -> EmotionSnapshot {
        EmotionSnapshot {
            valence: self.valence,
            arousal: self.arousal,
            stress: self.stress,
            frustration: self.frustration,
            confidence: self.confidence,
            label: self.label().to_string(),
        }
    }
}
