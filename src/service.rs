//! Progression service: the single entry point for workout state transitions
//!
//! The web client mutated profile and log records ad hoc from many call
//! sites; here every transition goes through one service that takes the
//! current state by value and returns updated copies plus a display summary.
//! The caller (persistence collaborator) owns the read-modify-write cycle.
//!
//! Idempotency is enforced here through the daily log flags: a completed
//! workout cannot be re-awarded and the extra quest fires at most once per
//! day. The pure calculators below this layer never check preconditions.

use chrono::{NaiveDate, NaiveTime};

use crate::catalog::{Catalog, CatalogError, Workout};
use crate::models::{DailyLog, UserProfile, DAYS_OF_WEEK};
use crate::progression::{
    apply_xp, compute_extra_quest_xp, compute_workout_xp, Difficulty,
};
use crate::streak::compute_streak;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Workout already logged for {0}")]
    WorkoutAlreadyLogged(NaiveDate),

    #[error("No exercises completed - log at least one before finishing")]
    NoExercisesLogged,

    #[error("Workout must be completed before the extra quest")]
    WorkoutNotCompleted,

    #[error("Extra quest already completed for {0}")]
    ExtraQuestAlreadyCompleted(NaiveDate),

    #[error("Invalid reminder time: {0} (expected HH:MM)")]
    InvalidReminderTime(String),

    #[error("Invalid workout day: {0}")]
    InvalidWorkoutDay(String),

    #[error("Display name cannot be empty")]
    EmptyDisplayName,

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// ---------------------------------------------------------------------------
/// Outcomes
/// ---------------------------------------------------------------------------

/// What the presentation layer renders after an award
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSummary {
    pub xp_earned: f64,
    pub leveled_up: bool,
    pub new_level: Option<u32>,
    pub current_streak: u32,
}

/// Updated state plus the summary, returned as one unit so the caller can
/// persist both records atomically
#[derive(Debug, Clone)]
pub struct WorkoutOutcome {
    pub profile: UserProfile,
    pub log: DailyLog,
    pub summary: WorkoutSummary,
}

/// ---------------------------------------------------------------------------
/// Service
/// ---------------------------------------------------------------------------

pub struct ProgressionService {
    catalog: Catalog,
}

impl ProgressionService {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Service over the standard exercise and character roster
    pub fn standard() -> Self {
        Self::new(Catalog::standard())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The workout in effect for this user's session, applying the
    /// themed-exercise override of the selected character
    pub fn active_workout(&self, profile: &UserProfile) -> Result<Workout, EngineError> {
        Ok(self
            .catalog
            .workout_for_character(profile.selected_character_id.as_deref())?)
    }

    /// Toggle one exercise in today's log, creating the log on first use.
    /// Rejected once the workout is completed (the log becomes read-only).
    pub fn toggle_exercise(
        &self,
        profile: &UserProfile,
        log: Option<DailyLog>,
        today: NaiveDate,
        exercise_id: &str,
    ) -> Result<DailyLog, EngineError> {
        let workout = self.active_workout(profile)?;
        if !workout.exercises.iter().any(|e| e.id == exercise_id) {
            return Err(CatalogError::UnknownExercise(exercise_id.to_string()).into());
        }

        let mut log = log.unwrap_or_else(|| DailyLog::new(today));
        if log.workout_completed {
            return Err(EngineError::WorkoutAlreadyLogged(log.date));
        }

        if log.is_exercise_done(exercise_id) {
            log.completed_exercise_ids.retain(|id| id != exercise_id);
        } else {
            log.completed_exercise_ids.push(exercise_id.to_string());
        }
        Ok(log)
    }

    /// Finish today's workout: award XP, resolve level-ups, update the
    /// streak, and lock the log.
    pub fn finish_workout(
        &self,
        profile: UserProfile,
        log: DailyLog,
        difficulty: Difficulty,
        duration: Option<String>,
        today: NaiveDate,
    ) -> Result<WorkoutOutcome, EngineError> {
        if log.workout_completed {
            return Err(EngineError::WorkoutAlreadyLogged(log.date));
        }
        if log.completed_count() == 0 {
            return Err(EngineError::NoExercisesLogged);
        }

        let workout = self.active_workout(&profile)?;
        let xp_earned = compute_workout_xp(
            log.completed_count(),
            workout.exercises.len(),
            difficulty,
        );

        let award = apply_xp(profile, xp_earned);
        let mut profile = award.profile;

        profile.current_streak =
            compute_streak(profile.current_streak, profile.last_workout_date, today);
        profile.last_workout_date = Some(today);

        let mut log = log;
        log.workout_completed = true;
        log.difficulty = Some(difficulty);
        log.duration = duration;

        let summary = WorkoutSummary {
            xp_earned,
            leveled_up: award.leveled_up,
            new_level: award.new_level,
            current_streak: profile.current_streak,
        };

        Ok(WorkoutOutcome { profile, log, summary })
    }

    /// Award the once-per-day extra quest bonus. Requires a completed workout
    /// and an unclaimed quest; the streak is untouched.
    pub fn complete_extra_quest(
        &self,
        profile: UserProfile,
        log: DailyLog,
    ) -> Result<WorkoutOutcome, EngineError> {
        if !log.workout_completed {
            return Err(EngineError::WorkoutNotCompleted);
        }
        if log.extra_quest_completed {
            return Err(EngineError::ExtraQuestAlreadyCompleted(log.date));
        }

        let difficulty = log.difficulty.unwrap_or_default();
        let xp_earned = compute_extra_quest_xp(difficulty);
        let award = apply_xp(profile, xp_earned);

        let mut log = log;
        log.extra_quest_completed = true;

        let summary = WorkoutSummary {
            xp_earned,
            leveled_up: award.leveled_up,
            new_level: award.new_level,
            current_streak: award.profile.current_streak,
        };

        Ok(WorkoutOutcome { profile: award.profile, log, summary })
    }

    /// XP progress toward the next level, for the level indicator
    pub fn xp_progress(&self, profile: &UserProfile) -> (f64, f64) {
        (
            profile.experience_points,
            crate::progression::xp_to_next_level(profile.level),
        )
    }

    /// ---------------------------------------------------------------------
    /// Reminders and Schedule
    /// ---------------------------------------------------------------------

    /// Whether the workout reminder should show: a reminder is configured,
    /// today is a scheduled day, the workout isn't done, and the reminder
    /// wasn't already dismissed today.
    pub fn reminder_due(
        &self,
        profile: &UserProfile,
        todays_log: Option<&DailyLog>,
        today: NaiveDate,
    ) -> bool {
        if profile.reminder_time.is_none() {
            return false;
        }
        let day_name = today.format("%A").to_string();
        if !profile.workout_days.iter().any(|d| *d == day_name) {
            return false;
        }
        if todays_log.is_some_and(|log| log.workout_completed) {
            return false;
        }
        profile.last_reminder_dismissed_date != Some(today)
    }

    pub fn dismiss_reminder(&self, mut profile: UserProfile, today: NaiveDate) -> UserProfile {
        profile.last_reminder_dismissed_date = Some(today);
        profile
    }

    pub fn set_reminder_time(
        &self,
        mut profile: UserProfile,
        time: Option<String>,
    ) -> Result<UserProfile, EngineError> {
        if let Some(raw) = &time {
            NaiveTime::parse_from_str(raw, "%H:%M")
                .map_err(|_| EngineError::InvalidReminderTime(raw.clone()))?;
        }
        profile.reminder_time = time;
        Ok(profile)
    }

    pub fn set_workout_days(
        &self,
        mut profile: UserProfile,
        days: Vec<String>,
    ) -> Result<UserProfile, EngineError> {
        for day in &days {
            if !DAYS_OF_WEEK.contains(&day.as_str()) {
                return Err(EngineError::InvalidWorkoutDay(day.clone()));
            }
        }
        profile.workout_days = days;
        Ok(profile)
    }

    /// ---------------------------------------------------------------------
    /// Profile Edits
    /// ---------------------------------------------------------------------

    pub fn select_character(
        &self,
        mut profile: UserProfile,
        character_id: Option<&str>,
    ) -> Result<UserProfile, EngineError> {
        if let Some(id) = character_id {
            self.catalog.character(id)?;
        }
        profile.selected_character_id = character_id.map(str::to_string);
        Ok(profile)
    }

    pub fn set_display_name(
        &self,
        mut profile: UserProfile,
        name: &str,
    ) -> Result<UserProfile, EngineError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(EngineError::EmptyDisplayName);
        }
        profile.name = trimmed.to_string();
        Ok(profile)
    }

    pub fn set_custom_image_url(
        &self,
        mut profile: UserProfile,
        url: Option<String>,
    ) -> UserProfile {
        profile.custom_profile_image_url = url;
        profile
    }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
