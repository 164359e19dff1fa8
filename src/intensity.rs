//! Intensity scaling for exercise difficulty tiers
//!
//! Every exercise is authored once at "normal" intensity; the easy and hard
//! tiers are derived here by multiplicative scaling with floor clamps. Pure
//! and deterministic - inputs are catalog constants, not user input.

use crate::catalog::{IntensityConfig, IntensityTiers, Measure};

const DEFAULT_EASY_MULTIPLIER: f64 = 0.66;
const DEFAULT_HARD_MULTIPLIER: f64 = 1.5;
const DEFAULT_REP_FLOOR: u32 = 1;
const DEFAULT_DURATION_FLOOR_SECONDS: u32 = 10;

const EASY_SUFFIX: &str = "(Focus on form)";
const HARD_SUFFIX: &str = "(Push your limits!)";

/// ---------------------------------------------------------------------------
/// Scaling Parameters
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ScaleParams {
    pub easy_multiplier: f64,
    pub hard_multiplier: f64,
    pub rep_floor: u32,
    pub duration_floor_seconds: u32,
    pub easy_suffix: String,
    pub hard_suffix: String,
}

impl Default for ScaleParams {
    fn default() -> Self {
        Self {
            easy_multiplier: DEFAULT_EASY_MULTIPLIER,
            hard_multiplier: DEFAULT_HARD_MULTIPLIER,
            rep_floor: DEFAULT_REP_FLOOR,
            duration_floor_seconds: DEFAULT_DURATION_FLOOR_SECONDS,
            easy_suffix: EASY_SUFFIX.to_string(),
            hard_suffix: HARD_SUFFIX.to_string(),
        }
    }
}

impl ScaleParams {
    /// Override the duration floor for longer exercises (e.g. 300s for runs)
    pub fn with_duration_floor(mut self, seconds: u32) -> Self {
        self.duration_floor_seconds = seconds;
        self
    }

    /// Override the hard-tier suffix for themed exercises
    pub fn with_hard_suffix(mut self, suffix: &str) -> Self {
        self.hard_suffix = suffix.to_string();
        self
    }
}

/// ---------------------------------------------------------------------------
/// Scaling Functions
/// ---------------------------------------------------------------------------

/// Derive the easy and hard variants of a normal-mode baseline
pub fn scale_tiers(baseline: &IntensityConfig, params: &ScaleParams) -> IntensityTiers {
    IntensityTiers {
        easy: scale_config(baseline, params.easy_multiplier, &params.easy_suffix, params),
        normal: baseline.clone(),
        hard: scale_config(baseline, params.hard_multiplier, &params.hard_suffix, params),
    }
}

fn scale_config(
    baseline: &IntensityConfig,
    multiplier: f64,
    suffix: &str,
    params: &ScaleParams,
) -> IntensityConfig {
    let measure = match &baseline.measure {
        // An absent sets count stays absent - never fabricate one
        Measure::Reps { reps, sets } => Measure::Reps {
            reps: scale_count(*reps, multiplier, params.rep_floor),
            sets: sets.map(|s| scale_count(s, multiplier, params.rep_floor)),
        },
        Measure::Timed { duration } => Measure::Timed {
            duration: scale_duration(duration, multiplier, params.duration_floor_seconds),
        },
    };

    IntensityConfig {
        measure,
        description_suffix: Some(suffix.to_string()),
    }
}

/// Scale a rep or set count: round, then clamp to the floor
pub fn scale_count(baseline: u32, multiplier: f64, floor: u32) -> u32 {
    let scaled = (baseline as f64 * multiplier).round() as u32;
    scaled.max(floor)
}

/// Scale a `"<seconds>s"` duration string: parse, multiply, round, clamp,
/// re-serialize. Non-conforming strings pass through unchanged.
pub fn scale_duration(raw: &str, multiplier: f64, floor_seconds: u32) -> String {
    let Some(seconds) = parse_duration_seconds(raw) else {
        return raw.to_string();
    };
    let scaled = (seconds as f64 * multiplier).round() as u32;
    format!("{}s", scaled.max(floor_seconds))
}

fn parse_duration_seconds(raw: &str) -> Option<u32> {
    raw.strip_suffix('s')?.parse().ok()
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_count_rounds() {
        assert_eq!(scale_count(15, 0.66, 1), 10); // 9.9 rounds up
        assert_eq!(scale_count(15, 1.5, 1), 23); // 22.5 rounds away from zero
        assert_eq!(scale_count(20, 0.66, 1), 13); // 13.2 rounds down
    }

    #[test]
    fn test_scale_count_floor_clamp() {
        // reps: 1 scaled by 0.2 must not produce zero
        assert_eq!(scale_count(1, 0.2, 1), 1);
        assert_eq!(scale_count(3, 0.1, 1), 1);
    }

    #[test]
    fn test_scale_duration_round_trip() {
        assert_eq!(scale_duration("900s", 0.66, 300), "594s");
        assert_eq!(scale_duration("900s", 0.1, 300), "300s");
        assert_eq!(scale_duration("60s", 1.5, 10), "90s");
    }

    #[test]
    fn test_scale_duration_non_conforming_passes_through() {
        assert_eq!(scale_duration("5 minutes", 0.66, 10), "5 minutes");
        assert_eq!(scale_duration("", 0.66, 10), "");
        assert_eq!(scale_duration("90", 0.66, 10), "90");
    }

    #[test]
    fn test_scale_tiers_reps() {
        let baseline = IntensityConfig::reps(15, Some(3));
        let tiers = scale_tiers(&baseline, &ScaleParams::default());

        assert_eq!(tiers.easy.measure, Measure::Reps { reps: 10, sets: Some(2) });
        assert_eq!(tiers.normal, baseline);
        assert_eq!(tiers.hard.measure, Measure::Reps { reps: 23, sets: Some(5) });
        assert_eq!(tiers.easy.description_suffix.as_deref(), Some("(Focus on form)"));
        assert_eq!(tiers.hard.description_suffix.as_deref(), Some("(Push your limits!)"));
    }

    #[test]
    fn test_scale_tiers_absent_sets_stays_absent() {
        let baseline = IntensityConfig::reps(12, None);
        let tiers = scale_tiers(&baseline, &ScaleParams::default());

        assert_eq!(tiers.easy.measure, Measure::Reps { reps: 8, sets: None });
        assert_eq!(tiers.hard.measure, Measure::Reps { reps: 18, sets: None });
    }

    #[test]
    fn test_scale_tiers_duration_floor() {
        let baseline = IntensityConfig::timed("60s");
        let params = ScaleParams::default().with_duration_floor(60);
        let tiers = scale_tiers(&baseline, &params);

        // 60 * 0.66 = 39.6 -> 40, clamped up to the 60s floor
        assert_eq!(tiers.easy.measure, Measure::Timed { duration: "60s".to_string() });
        assert_eq!(tiers.hard.measure, Measure::Timed { duration: "90s".to_string() });
    }

    #[test]
    fn test_scale_tiers_deterministic() {
        let baseline = IntensityConfig::reps(10, Some(3));
        let params = ScaleParams::default();
        assert_eq!(scale_tiers(&baseline, &params), scale_tiers(&baseline, &params));
    }

    #[test]
    fn test_custom_hard_suffix() {
        let baseline = IntensityConfig::reps(10, Some(3));
        let params = ScaleParams::default().with_hard_suffix("(Max Power!)");
        let tiers = scale_tiers(&baseline, &params);

        assert_eq!(tiers.hard.description_suffix.as_deref(), Some("(Max Power!)"));
    }
}
