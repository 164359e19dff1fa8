use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::progression::Difficulty;

/// One workout log per calendar date.
///
/// Created on the first exercise toggle for the day and mutated until
/// `workout_completed` is set, after which the main workout is read-only.
/// The completion and extra-quest flags double as idempotency markers: the
/// service refuses to award XP twice for the same log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
  pub date: NaiveDate,
  pub completed_exercise_ids: Vec<String>,
  pub workout_completed: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub difficulty: Option<Difficulty>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub duration: Option<String>,
  #[serde(default)]
  pub extra_quest_completed: bool,
}

impl DailyLog {
  pub fn new(date: NaiveDate) -> Self {
    Self {
      date,
      completed_exercise_ids: Vec::new(),
      workout_completed: false,
      difficulty: None,
      duration: None,
      extra_quest_completed: false,
    }
  }

  pub fn is_exercise_done(&self, exercise_id: &str) -> bool {
    self.completed_exercise_ids.iter().any(|id| id == exercise_id)
  }

  pub fn completed_count(&self) -> usize {
    self.completed_exercise_ids.len()
  }
}
