//! Persona scales — per-session scoring weights derived from the profile.
//!
//! Derived once at session start and read-only thereafter. Scoring code reads
//! these three scalars instead of reaching back into the raw profile.

use wayfarer_common::{ExperienceLevel, PersonaProfile, RiskAppetite};

/// Scoring weights for one session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersonaScales {
    /// Bias toward edges landing exactly on the target. Floor of 0.9 keeps
    /// the direct-target bonus dominant over every other attainable score.
    pub direct: f64,
    /// Multiplier on the back/close deterrent.
    pub back: f64,
    /// Weight on hop-distance improvement.
    pub distance: f64,
}

impl PersonaScales {
    pub fn derive(persona: &PersonaProfile) -> Self {
        let c = persona.conscientiousness;
        let o = persona.openness;

        let experience_nudge = match persona.experience {
            Some(ExperienceLevel::Expert) => 0.15,
            Some(ExperienceLevel::Novice) => -0.15,
            _ => 0.0,
        };
        // Risk takers wander; cautious personas beeline.
        let risk_nudge = match persona.risk_appetite {
            Some(RiskAppetite::High) => -0.1,
            Some(RiskAppetite::Low) => 0.1,
            _ => 0.0,
        };

        let direct = 1.0 + 0.8 * (c - 0.5) + experience_nudge + risk_nudge;
        let back = 1.0 + (c - 0.5) - 0.8 * (o - 0.5);
        let distance = 1.0 + 0.8 * (c - 0.5) + experience_nudge;

        Self {
            direct: direct.clamp(0.9, 1.6),
            back: back.clamp(0.5, 1.6),
            distance: distance.clamp(0.5, 1.6),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persona_with(conscientiousness: f64, openness: f64) -> PersonaProfile {
        PersonaProfile {
            conscientiousness,
            openness,
            ..PersonaProfile::default()
        }
    }

    #[test]
    fn neutral_persona_gets_unit_scales() {
        let scales = PersonaScales::derive(&PersonaProfile::default());
        assert_eq!(scales.direct, 1.0);
        assert_eq!(scales.back, 1.0);
        assert_eq!(scales.distance, 1.0);
    }

    #[test]
    fn conscientious_personas_weight_progress_harder() {
        let diligent = PersonaScales::derive(&persona_with(0.9, 0.5));
        let sloppy = PersonaScales::derive(&persona_with(0.1, 0.5));
        assert!(diligent.direct > sloppy.direct);
        assert!(diligent.back > sloppy.back);
        assert!(diligent.distance > sloppy.distance);
    }

    #[test]
    fn open_personas_tolerate_backtracking() {
        let curious = PersonaScales::derive(&persona_with(0.5, 1.0));
        let rigid = PersonaScales::derive(&persona_with(0.5, 0.0));
        assert!(curious.back < rigid.back);
    }

    #[test]
    fn scales_stay_inside_their_bounds() {
        let extreme = PersonaProfile {
            conscientiousness: 1.0,
            openness: 0.0,
            experience: Some(ExperienceLevel::Expert),
            risk_appetite: Some(RiskAppetite::Low),
            ..PersonaProfile::default()
        };
        let scales = PersonaScales::derive(&extreme);
        assert!(scales.direct <= 1.6);
        assert!(scales.back <= 1.6);
        assert!(scales.distance <= 1.6);

        let opposite = PersonaProfile {
            conscientiousness: 0.0,
            openness: 1.0,
            experience: Some(ExperienceLevel::Novice),
            risk_appetite: Some(RiskAppetite::High),
            ..PersonaProfile::default()
        };
        let scales = PersonaScales::derive(&opposite);
        assert!(scales.direct >= 0.9);
        assert!(scales.back >= 0.5);
        assert!(scales.distance >= 0.5);
    }
}
