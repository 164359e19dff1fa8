//! SQLite-backed state store
//!
//! The web client persisted everything as JSON strings in a per-key store
//! (`userProfile-{id}` and `dailyLogs`). This module keeps that exact key and
//! document scheme over a single `app_state` table, so state written by the
//! web app loads unchanged. Profiles pass through schema normalization once
//! on load.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;

use crate::models::{DailyLog, UserProfile};

pub type DbPool = SqlitePool;

const PROFILE_KEY_PREFIX: &str = "userProfile-";
const DAILY_LOGS_KEY: &str = "dailyLogs";

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Migration error: {0}")]
  Migration(#[from] sqlx::migrate::MigrateError),

  #[error("Serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),
}

/// ---------------------------------------------------------------------------
/// Initialization
/// ---------------------------------------------------------------------------

/// Open (creating if needed) the database at the given path and run migrations
pub async fn initialize_db(db_path: &Path) -> Result<DbPool, StoreError> {
  if let Some(parent) = db_path.parent() {
    fs::create_dir_all(parent)?;
  }

  let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(&db_url)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  Ok(pool)
}

/// ---------------------------------------------------------------------------
/// Key/Value Primitives
/// ---------------------------------------------------------------------------

async fn get_value(pool: &DbPool, key: &str) -> Result<Option<String>, StoreError> {
  let row = sqlx::query("SELECT value FROM app_state WHERE key = ?")
    .bind(key)
    .fetch_optional(pool)
    .await?;

  Ok(row.map(|r| r.get("value")))
}

async fn set_value(pool: &DbPool, key: &str, value: &str) -> Result<(), StoreError> {
  sqlx::query(
    r#"
    INSERT INTO app_state (key, value, updated_at)
    VALUES (?, ?, datetime('now'))
    ON CONFLICT(key) DO UPDATE SET
      value = excluded.value,
      updated_at = excluded.updated_at
    "#,
  )
  .bind(key)
  .bind(value)
  .execute(pool)
  .await?;

  Ok(())
}

fn profile_key(user_id: &str) -> String {
  format!("{}{}", PROFILE_KEY_PREFIX, user_id)
}

/// ---------------------------------------------------------------------------
/// Profiles
/// ---------------------------------------------------------------------------

/// Load a profile by user id, applying schema normalization.
/// Returns None for a user with no stored profile yet.
pub async fn load_profile(
  pool: &DbPool,
  user_id: &str,
) -> Result<Option<UserProfile>, StoreError> {
  let json = get_value(pool, &profile_key(user_id)).await?;
  match json {
    Some(json) => {
      let profile: UserProfile = serde_json::from_str(&json)?;
      Ok(Some(profile.normalized()))
    }
    None => Ok(None),
  }
}

pub async fn save_profile(pool: &DbPool, profile: &UserProfile) -> Result<(), StoreError> {
  let json = serde_json::to_string(profile)?;
  set_value(pool, &profile_key(&profile.id), &json).await
}

/// ---------------------------------------------------------------------------
/// Daily Logs
/// ---------------------------------------------------------------------------

/// Load the full date -> log map (one JSON document, as the web client kept it)
pub async fn load_daily_logs(
  pool: &DbPool,
) -> Result<HashMap<NaiveDate, DailyLog>, StoreError> {
  let json = get_value(pool, DAILY_LOGS_KEY).await?;
  match json {
    Some(json) => Ok(serde_json::from_str(&json)?),
    None => Ok(HashMap::new()),
  }
}

pub async fn save_daily_logs(
  pool: &DbPool,
  logs: &HashMap<NaiveDate, DailyLog>,
) -> Result<(), StoreError> {
  let json = serde_json::to_string(logs)?;
  set_value(pool, DAILY_LOGS_KEY, &json).await
}

/// Insert or replace a single day's log
pub async fn upsert_daily_log(pool: &DbPool, log: &DailyLog) -> Result<(), StoreError> {
  let mut logs = load_daily_logs(pool).await?;
  logs.insert(log.date, log.clone());
  save_daily_logs(pool, &logs).await
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
