//! XP and level progression engine
//!
//! Converts completed workouts into XP awards and resolves level-ups against
//! an exponential per-level threshold curve:
//! - 10 XP per exercise, +50 for completing the whole workout
//! - difficulty multiplies the award (easy 0.75, normal 1.0, hard 1.25)
//! - level N requires 100 * 1.2^(N-1) XP; excess carries over, never capped
//!
//! Everything here is pure. Preconditions (zero exercises, double awards) are
//! the service layer's job, enforced through the daily log flags.

use serde::{Deserialize, Serialize};

use crate::models::UserProfile;

pub const XP_PER_EXERCISE: u32 = 10;
pub const XP_WORKOUT_COMPLETION_BONUS: u32 = 50;
pub const XP_EXTRA_QUEST_BONUS: u32 = 75;

const BASE_LEVEL_XP: f64 = 100.0;
const LEVEL_XP_GROWTH: f64 = 1.2;

/// ---------------------------------------------------------------------------
/// Difficulty
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Easy => 0.75,
            Self::Normal => 1.0,
            Self::Hard => 1.25,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Normal => write!(f, "normal"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "normal" => Ok(Self::Normal),
            "hard" => Ok(Self::Hard),
            _ => Err(format!("Unknown difficulty: {}", s)),
        }
    }
}

/// ---------------------------------------------------------------------------
/// XP Awards
/// ---------------------------------------------------------------------------

/// XP threshold to advance past the given level
pub fn xp_to_next_level(level: u32) -> f64 {
    BASE_LEVEL_XP * LEVEL_XP_GROWTH.powi(level as i32 - 1)
}

/// XP for a finished workout. Fractional results are kept as-is; rounding is
/// the presentation layer's concern.
pub fn compute_workout_xp(
    exercises_completed: usize,
    total_exercises: usize,
    difficulty: Difficulty,
) -> f64 {
    let mut xp = (exercises_completed as u32 * XP_PER_EXERCISE) as f64;
    if total_exercises > 0 && exercises_completed == total_exercises {
        xp += XP_WORKOUT_COMPLETION_BONUS as f64;
    }
    xp * difficulty.multiplier()
}

/// Bonus XP for the once-per-day extra quest
pub fn compute_extra_quest_xp(difficulty: Difficulty) -> f64 {
    XP_EXTRA_QUEST_BONUS as f64 * difficulty.multiplier()
}

/// The result of applying an XP award to a profile
#[derive(Debug, Clone)]
pub struct XpAward {
    pub profile: UserProfile,
    pub leveled_up: bool,
    pub new_level: Option<u32>,
}

/// Add earned XP to a profile and resolve level-ups.
///
/// An award large enough to cross several thresholds levels up repeatedly in
/// one application; the loop ends when the remaining XP is strictly below the
/// threshold for the (possibly incremented) current level. On level-up a
/// reward label for the reached level is appended, never removed.
pub fn apply_xp(profile: UserProfile, xp_earned: f64) -> XpAward {
    let mut profile = profile;
    profile.experience_points += xp_earned;

    let mut leveled_up = false;
    while profile.experience_points >= xp_to_next_level(profile.level) {
        profile.experience_points -= xp_to_next_level(profile.level);
        profile.level += 1;
        leveled_up = true;
    }

    let new_level = leveled_up.then_some(profile.level);
    if let Some(level) = new_level {
        profile.rewards.push(format!("Level {} Achieved Aura", level));
    }

    XpAward { profile, leveled_up, new_level }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
