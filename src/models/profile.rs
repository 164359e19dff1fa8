use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical day names used for workout scheduling
pub const DAYS_OF_WEEK: [&str; 7] = [
  "Sunday",
  "Monday",
  "Tuesday",
  "Wednesday",
  "Thursday",
  "Friday",
  "Saturday",
];

/// Current profile schema version. Bump when fields are added so that
/// normalization on load can stamp upgraded records.
pub const PROFILE_SCHEMA_VERSION: u32 = 2;

/// The mutable aggregate root for one user.
///
/// Serialized with the web client's original field names so state written by
/// either side loads unchanged. Fields added after launch carry serde defaults
/// and are backfilled by `normalized` in one place instead of ad hoc
/// null-checks at call sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
  pub id: String,
  pub name: String,
  pub selected_character_id: Option<String>,
  #[serde(default)]
  pub custom_profile_image_url: Option<String>,
  pub level: u32,
  pub experience_points: f64,
  pub workout_days: Vec<String>,
  pub rewards: Vec<String>,
  pub reminder_time: Option<String>,
  #[serde(default)]
  pub current_streak: u32,
  #[serde(default)]
  pub last_workout_date: Option<NaiveDate>,
  #[serde(default)]
  pub last_reminder_dismissed_date: Option<NaiveDate>,
  #[serde(default)]
  pub schema_version: u32,
}

impl UserProfile {
  /// Seed a fresh profile for a newly authenticated user
  pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      selected_character_id: None,
      custom_profile_image_url: None,
      level: 1,
      experience_points: 0.0,
      workout_days: vec![
        "Monday".to_string(),
        "Wednesday".to_string(),
        "Friday".to_string(),
      ],
      rewards: vec!["First Step Badge".to_string()],
      reminder_time: Some("08:00".to_string()),
      current_streak: 0,
      last_workout_date: None,
      last_reminder_dismissed_date: None,
      schema_version: PROFILE_SCHEMA_VERSION,
    }
  }

  /// One-shot normalization run after deserializing a stored profile.
  ///
  /// Serde defaults already backfill fields missing from older records; this
  /// clamps the numeric invariants (level >= 1, XP >= 0) and stamps the
  /// current schema version so the upgrade happens exactly once.
  pub fn normalized(mut self) -> Self {
    if self.level < 1 {
      self.level = 1;
    }
    if self.experience_points < 0.0 {
      self.experience_points = 0.0;
    }
    self.schema_version = PROFILE_SCHEMA_VERSION;
    self
  }
}
