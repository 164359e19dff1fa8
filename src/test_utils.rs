//! Test utilities and helpers
//!
//! Common test infrastructure: in-memory database setup/teardown and small
//! fixture factories for profiles and daily logs.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::models::{DailyLog, UserProfile};

/// Create an in-memory SQLite database for testing.
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// A fresh level-1 profile with default settings
pub fn make_test_profile(id: &str) -> UserProfile {
  UserProfile::new(id, "Test Hero")
}

/// A daily log with the given exercises already checked off
pub fn make_test_log(date: NaiveDate, exercise_ids: &[&str]) -> DailyLog {
  let mut log = DailyLog::new(date);
  log.completed_exercise_ids = exercise_ids.iter().map(|s| s.to_string()).collect();
  log
}
