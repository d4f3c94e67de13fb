use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use uuid::Uuid;

// --- Screen graph types ---

/// A single application screen, addressable by integer id.
/// Immutable once loaded; owned by the screen graph for the duration of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenNode {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Source filename for asset lookup, when the exporter provides one.
    #[serde(default)]
    pub file: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Transition attached to the whole frame.
    Frame,
    /// Transition attached to a single element.
    Element,
}

/// A navigable transition between two screens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationEdge {
    pub source: i64,
    pub dest: i64,
    /// Unique per edge; the stable sort key for deterministic iteration.
    pub link_id: i64,
    pub click_target: String,
    pub user_intent: String,
    /// The clickable region covers the whole screen.
    pub frame_wide: bool,
    /// Fires without user action (timed transition).
    pub auto_advance: bool,
    pub kind: EdgeKind,
}

// --- Raw export types (input boundary) ---

/// Screen record as exported by the upstream design-tool extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawScreen {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Link record as exported upstream. Screen endpoints are opaque strings
/// that must be resolved against the screen list before graph construction.
/// Missing text fields deserialize as empty strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLink {
    pub source_screen_id: String,
    pub destination_screen_id: String,
    #[serde(rename = "linkId")]
    pub link_id: i64,
    #[serde(default)]
    pub click_target: String,
    #[serde(default)]
    pub user_intent: String,
    #[serde(default)]
    pub is_auto_delay: Option<bool>,
    #[serde(default)]
    pub is_click_anywhere: Option<bool>,
}

// --- Persona types ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskAppetite {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationStyle {
    Concise,
    Expressive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Novice,
    Intermediate,
    Expert,
}

fn default_trait_score() -> f64 {
    0.5
}

/// Five-factor (OCEAN) personality profile plus optional categorical
/// attributes. Trait scores live in [0, 1]; missing fields default to 0.5.
/// Validated once at session start — scoring code never falls back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_trait_score")]
    pub openness: f64,
    #[serde(default = "default_trait_score")]
    pub conscientiousness: f64,
    #[serde(default = "default_trait_score")]
    pub extraversion: f64,
    #[serde(default = "default_trait_score")]
    pub agreeableness: f64,
    #[serde(default = "default_trait_score")]
    pub neuroticism: f64,
    #[serde(default)]
    pub risk_appetite: Option<RiskAppetite>,
    #[serde(default)]
    pub communication_style: Option<CommunicationStyle>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub experience: Option<ExperienceLevel>,
}

impl PersonaProfile {
    /// Clamp every trait score into [0, 1]. Exported profiles occasionally
    /// carry values slightly outside the range.
    pub fn normalized(mut self) -> Self {
        self.openness = self.openness.clamp(0.0, 1.0);
        self.conscientiousness = self.conscientiousness.clamp(0.0, 1.0);
        self.extraversion = self.extraversion.clamp(0.0, 1.0);
        self.agreeableness = self.agreeableness.clamp(0.0, 1.0);
        self.neuroticism = self.neuroticism.clamp(0.0, 1.0);
        self
    }
}

impl Default for PersonaProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            openness: 0.5,
            conscientiousness: 0.5,
            extraversion: 0.5,
            agreeableness: 0.5,
            neuroticism: 0.5,
            risk_appetite: None,
            communication_style: None,
            age: None,
            experience: None,
        }
    }
}

// --- Run parameters ---

fn default_max_steps() -> u32 {
    40
}

fn default_max_seconds() -> f64 {
    180.0
}

/// Parameters for one simulated session.
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
pub struct RunParams {
    #[builder(setter(into))]
    pub goal: String,
    pub source_id: i64,
    pub target_id: i64,
    /// Step budget; exhaustion terminates the session as `Timeout`.
    #[serde(default = "default_max_steps")]
    #[builder(default = 40)]
    pub max_steps: u32,
    /// Simulated-time budget in seconds.
    #[serde(default = "default_max_seconds")]
    #[builder(default = 180.0)]
    pub max_seconds: f64,
    /// Seed for the session rng; identical seeds reproduce identical traces.
    #[serde(default)]
    #[builder(default = 0)]
    pub seed: u64,
}

// --- Outcome and friction ---

/// Terminal state of a session. Every session reaches exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    ReachedTarget,
    Timeout,
    NoOutgoing,
    NoChoice,
    LoopDetected,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::ReachedTarget => write!(f, "reached_target"),
            Outcome::Timeout => write!(f, "timeout"),
            Outcome::NoOutgoing => write!(f, "no_outgoing"),
            Outcome::NoChoice => write!(f, "no_choice"),
            Outcome::LoopDetected => write!(f, "loop_detected"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrictionKind {
    /// The screen advanced on its own; the persona could only wait.
    Waiting,
    /// The chosen action undoes progress (back, close, cancel).
    BackNavigation,
    /// The walk collapsed into oscillation between a few screens.
    LoopOscillation,
}

impl std::fmt::Display for FrictionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrictionKind::Waiting => write!(f, "waiting"),
            FrictionKind::BackNavigation => write!(f, "back_navigation"),
            FrictionKind::LoopOscillation => write!(f, "loop_oscillation"),
        }
    }
}

/// A classified friction signal anchored to a screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrictionPoint {
    pub kind: FrictionKind,
    pub screen_id: i64,
    pub description: String,
}

/// Screen where a persona stalled or gave up, for sessions that did not
/// reach the target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropOffPoint {
    pub screen_id: i64,
    pub reason: String,
}

// --- Trace types (output boundary) ---

/// One ranked candidate considered at a decision point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub link_id: i64,
    pub dest_id: i64,
    pub score: f64,
}

/// A completed navigation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRef {
    pub from_id: i64,
    pub to_id: i64,
    pub link_id: i64,
}

/// Emotion scalars captured after a step, plus the derived label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionSnapshot {
    pub valence: f64,
    pub arousal: f64,
    pub stress: f64,
    pub frustration: f64,
    pub confidence: f64,
    pub label: String,
}

/// One step of a simulated session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub index: u32,
    pub from_id: i64,
    pub from_name: String,
    pub to_id: i64,
    pub link_id: i64,
    pub click_target: String,
    pub auto_advance: bool,
    pub wait_seconds: f64,
    /// The chosen edge strictly lowered hop-distance to the target.
    pub reduced_distance: bool,
    pub candidates: Vec<RankedCandidate>,
    pub emotion: EmotionSnapshot,
    pub friction: Vec<FrictionKind>,
    /// Narrated pre-decision thought, filled by the narrator pass.
    #[serde(default)]
    pub thought: Option<String>,
}

/// Complete record of one simulated traversal attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTrace {
    pub session_id: Uuid,
    pub persona: String,
    pub goal: String,
    pub source_id: i64,
    pub target_id: i64,
    pub outcome: Outcome,
    pub steps: Vec<StepRecord>,
    /// Ordered actions, one per step.
    pub actions: Vec<ActionRef>,
    pub friction_points: Vec<FrictionPoint>,
    /// Populated only when the target was not reached.
    pub drop_off_points: Vec<DropOffPoint>,
    pub total_steps: u32,
    /// Simulated seconds, never wall clock.
    pub elapsed_seconds: f64,
}

impl SessionTrace {
    /// The last step's destination equals the target iff the outcome is
    /// `ReachedTarget`. A zero-step trace reaches the target only when the
    /// session started on it.
    pub fn consistent(&self) -> bool {
        let landed = self
            .steps
            .last()
            .map_or(self.source_id == self.target_id, |s| {
                s.to_id == self.target_id
            });
        landed == (self.outcome == Outcome::ReachedTarget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persona_defaults_on_missing_fields() {
        let p: PersonaProfile = serde_json::from_str(r#"{"name": "Ana"}"#).unwrap();
        assert_eq!(p.openness, 0.5);
        assert_eq!(p.neuroticism, 0.5);
        assert!(p.risk_appetite.is_none());
    }

    #[test]
    fn persona_normalize_clamps_out_of_range_scores() {
        let p: PersonaProfile =
            serde_json::from_str(r#"{"openness": 1.7, "neuroticism": -0.2}"#).unwrap();
        let p = p.normalized();
        assert_eq!(p.openness, 1.0);
        assert_eq!(p.neuroticism, 0.0);
    }

    #[test]
    fn raw_link_tolerates_missing_text_fields() {
        let link: RawLink = serde_json::from_str(
            r#"{"source_screen_id": "1", "destination_screen_id": "2", "linkId": 7}"#,
        )
        .unwrap();
        assert_eq!(link.click_target, "");
        assert_eq!(link.user_intent, "");
        assert!(link.is_auto_delay.is_none());
    }

    #[test]
    fn run_params_builder_fills_budget_defaults() {
        let params = RunParams::builder().goal("checkout").source_id(1).target_id(9).build();
        assert_eq!(params.max_steps, 40);
        assert_eq!(params.max_seconds, 180.0);
        assert_eq!(params.seed, 0);
    }
}
